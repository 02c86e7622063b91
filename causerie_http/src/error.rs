//! Error-to-status mapping for the HTTP boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use causerie_core::Error;
use serde_json::json;
use tracing::error;

/// Wrapper mapping core errors onto HTTP responses.
///
/// Validation failures are the caller's fault and carry their specific
/// message; everything else is reported generically so provider internals
/// never leak. Full detail is always logged server-side.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else if matches!(self.0, Error::ConversationNotFound(_)) {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!("Request failed ({status}): {:?}", self.0);

        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from(Error::MissingField("pseudo"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(Error::OutOfRange {
            field: "randomness",
            min: 0.0,
            max: 1.0,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_conversation_maps_to_not_found() {
        let err = ApiError::from(Error::ConversationNotFound("c1".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn provider_failures_map_to_internal_error() {
        let err = ApiError::from(Error::Provider(anyhow::anyhow!("quota exceeded")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(Error::DuplicateConversation("c1".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
