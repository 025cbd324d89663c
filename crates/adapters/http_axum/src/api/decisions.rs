//! JSON handlers for the decision log.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use smartenergy_app::ports::{DecisionLog, FeatureSource};
use smartenergy_domain::decision::DecisionRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<DecisionRecord>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the reset endpoint.
pub enum ResetResponse {
    NoContent,
}

impl IntoResponse for ResetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// File name suggested to clients downloading the log.
pub const EXPORT_FILE_NAME: &str = "log_energi.csv";

/// Possible responses from the export endpoint.
pub enum ExportResponse {
    Ok(Vec<u8>),
    NotFound,
}

impl IntoResponse for ExportResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(bytes) => (
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                    ),
                ],
                bytes,
            )
                .into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// `GET /api/decisions`
pub async fn list<S, L>(State(state): State<AppState<S, L>>) -> ListResponse
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    let engine = state.engine.lock().await;
    ListResponse::Ok(Json(engine.records().to_vec()))
}

/// `DELETE /api/decisions`
pub async fn reset<S, L>(State(state): State<AppState<S, L>>) -> Result<ResetResponse, ApiError>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    state.with_engine(|engine| engine.reset()).await??;
    Ok(ResetResponse::NoContent)
}

/// `GET /api/decisions.csv`
///
/// The durable log exactly as written; `404` until the first record lands.
pub async fn export<S, L>(State(state): State<AppState<S, L>>) -> Result<ExportResponse, ApiError>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    let contents = state.with_engine(|engine| engine.export()).await??;
    Ok(contents.map_or(ExportResponse::NotFound, ExportResponse::Ok))
}
