//! JSON handler that runs one decision cycle on demand.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smartenergy_app::ports::{DecisionLog, FeatureSource};
use smartenergy_app::services::CycleReport;
use smartenergy_domain::feature::FeatureRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// Optional request body: supplied features replace a sensor sample.
#[derive(Debug, Default, Deserialize)]
pub struct CycleRequest {
    pub features: Option<FeatureRecord>,
}

/// Possible responses from the cycle endpoint.
pub enum CycleResponse {
    Created(Json<CycleReport>),
}

impl IntoResponse for CycleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/cycle`
///
/// An empty body samples the feature source. Supplied features the
/// classifiers cannot encode are decided by the ground-truth rule.
pub async fn run<S, L>(
    State(state): State<AppState<S, L>>,
    body: Bytes,
) -> Result<CycleResponse, ApiError>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CycleRequest::default()
    } else {
        serde_json::from_slice::<CycleRequest>(&body)
            .map_err(|err| ApiError::BadRequest(err.to_string()))?
    };

    let report = state
        .with_engine(move |engine| match request.features {
            Some(features) => Ok(engine.run_cycle_with(features)),
            None => engine.run_cycle(),
        })
        .await??;
    Ok(CycleResponse::Created(Json(report)))
}
