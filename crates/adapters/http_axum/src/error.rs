//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smartenergy_domain::error::{SmartEnergyError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SmartEnergyError`] and malformed requests to an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// An error raised by the engine.
    Domain(SmartEnergyError),
    /// The request body could not be parsed.
    BadRequest(String),
    /// A blocking engine call panicked or was cancelled.
    Task(tokio::task::JoinError),
}

impl From<SmartEnergyError> for ApiError {
    fn from(err: SmartEnergyError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Domain(SmartEnergyError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(SmartEnergyError::Sampling(err)) => {
                tracing::warn!(error = %err, "cycle skipped");
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            Self::Task(err) => {
                tracing::error!(error = %err, "engine task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Domain(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartenergy_domain::error::SamplingError;

    #[test]
    fn should_map_validation_to_bad_request() {
        let response = ApiError::from(ValidationError::UnknownActuator("fan".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_sampling_to_service_unavailable() {
        let err: SmartEnergyError = SamplingError::SensorUnavailable("pir").into();
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn should_hide_persistence_details() {
        let err = SmartEnergyError::Persistence(Box::new(std::io::Error::other("disk full")));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn should_map_failed_engine_task_to_internal_error() {
        let err = tokio::spawn(async { panic!("engine poisoned") })
            .await
            .unwrap_err();
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn should_map_bad_request() {
        let response = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
