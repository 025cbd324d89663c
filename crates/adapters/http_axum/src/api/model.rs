//! JSON handler for the classifier training report.

use axum::Json;
use axum::extract::State;

use smartenergy_app::classifier::TrainingReport;
use smartenergy_app::ports::{DecisionLog, FeatureSource};

use crate::state::AppState;

/// `GET /api/model`
pub async fn report<S, L>(State(state): State<AppState<S, L>>) -> Json<TrainingReport>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    Json(state.report.as_ref().clone())
}
