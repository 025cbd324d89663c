//! JSON handler for the typical-day forecast.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use smartenergy_app::ports::{DecisionLog, FeatureSource};
use smartenergy_app::services::ForecastPoint;
use smartenergy_app::services::forecast::HOURS_PER_DAY;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the forecast endpoint.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Number of hours from midnight; capped at 24.
    pub hours: Option<u8>,
}

/// `GET /api/forecast`
pub async fn hourly<S, L>(
    State(state): State<AppState<S, L>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<Vec<ForecastPoint>>, ApiError>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    let hours = params.hours.unwrap_or(HOURS_PER_DAY);
    let points = state
        .with_forecaster(move |forecaster| forecaster.forecast(hours))
        .await?;
    Ok(Json(points))
}
