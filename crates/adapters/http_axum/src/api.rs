//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod control;
#[allow(clippy::missing_errors_doc)]
pub mod cycle;
#[allow(clippy::missing_errors_doc)]
pub mod decisions;
#[allow(clippy::missing_errors_doc)]
pub mod forecast;
#[allow(clippy::missing_errors_doc)]
pub mod model;

use axum::Router;
use axum::routing::{get, post, put};

use smartenergy_app::ports::{DecisionLog, FeatureSource};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, L>() -> Router<AppState<S, L>>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    Router::new()
        .route(
            "/decisions",
            get(decisions::list::<S, L>).delete(decisions::reset::<S, L>),
        )
        .route("/decisions.csv", get(decisions::export::<S, L>))
        .route("/cycle", post(cycle::run::<S, L>))
        .route("/state", get(control::current::<S, L>))
        .route("/overrides/{actuator}", put(control::set_override::<S, L>))
        .route("/model", get(model::report::<S, L>))
        .route("/forecast", get(forecast::hourly::<S, L>))
}
