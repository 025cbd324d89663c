//! JSON handlers for the current actuator state and operator overrides.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use smartenergy_app::ports::{DecisionLog, FeatureSource};
use smartenergy_domain::actuator::{Actuator, ActuatorState};
use smartenergy_domain::control::{OverrideMode, Overrides};

use crate::error::ApiError;
use crate::state::AppState;

/// Current state of the home as seen by the engine.
#[derive(Debug, Serialize)]
pub struct StateView {
    pub state: ActuatorState,
    pub overrides: Overrides,
    pub records: usize,
}

/// Request body for changing an override.
#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    /// `auto`, `on` or `off`.
    pub mode: String,
}

/// Possible responses from the state endpoint.
pub enum StateResponse {
    Ok(Json<StateView>),
}

impl IntoResponse for StateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the override endpoint.
pub enum OverrideResponse {
    Ok(Json<Overrides>),
}

impl IntoResponse for OverrideResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/state`
pub async fn current<S, L>(State(state): State<AppState<S, L>>) -> StateResponse
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    let engine = state.engine.lock().await;
    StateResponse::Ok(Json(StateView {
        state: *engine.current_state(),
        overrides: *engine.overrides(),
        records: engine.records().len(),
    }))
}

/// `PUT /api/overrides/{actuator}`
pub async fn set_override<S, L>(
    State(state): State<AppState<S, L>>,
    Path(actuator): Path<String>,
    Json(req): Json<OverrideRequest>,
) -> Result<OverrideResponse, ApiError>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    let actuator = Actuator::from_str(&actuator)?;
    let mode = OverrideMode::from_str(&req.mode)?;

    let mut engine = state.engine.lock().await;
    engine.set_override(actuator, mode);
    Ok(OverrideResponse::Ok(Json(*engine.overrides())))
}
