//! # smartenergy-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** over the decision engine
//!   (`/api/decisions`, `/api/cycle`, `/api/overrides/{actuator}`, …)
//! - Map HTTP requests into engine calls (driving adapter)
//! - Map domain errors into HTTP status codes
//!
//! Presentation layers read records through this API; none of the routes
//! edit a stored record.
//!
//! ## Dependency rule
//! Depends on `smartenergy-app` (for port traits and services) and
//! `smartenergy-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
