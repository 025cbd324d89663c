//! # smartenergy-domain
//!
//! Pure domain model for the smartenergy home controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **feature records** (one environmental snapshot per decision cycle)
//! - Define **actuators** (climate unit, entertainment unit, lighting) and
//!   the per-actuator [`ActuatorMap`](actuator::ActuatorMap) container
//! - Define **override modes** (`auto`, `on`, `off`) and their resolution
//! - Define the **ground-truth rule** used to label synthetic training data
//! - Define **power and cost accounting**
//! - Define **decision records** (immutable, one per cycle)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod actuator;
pub mod control;
pub mod decision;
pub mod energy;
pub mod feature;
pub mod ground_truth;
pub mod training;
