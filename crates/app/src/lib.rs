//! # smartenergy-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `FeatureSource`: produce one feature record per decision cycle
//!   - `DecisionLog`: append-only, ordered decision persistence
//! - Synthesize the **training corpus** from the ground-truth rule
//! - Fit and freeze the per-actuator **random-forest classifiers**
//! - Define **driving/inbound** use-cases:
//!   - `DecisionEngine`: sample → predict → resolve → price → log
//!   - `HourlyForecaster`: typical-day power forecast
//!
//! ## Dependency rule
//! Depends on `smartenergy-domain` only (plus `rand` for sampling).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod classifier;
pub mod corpus;
pub mod ports;
pub mod services;
