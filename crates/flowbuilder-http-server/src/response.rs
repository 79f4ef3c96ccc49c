//! Response envelope and error mapping
//!
//! Every response body is `{ success, data?, error?, message? }`. Failures
//! carry an HTTP status and a human-readable `error`; internal causes are
//! logged and replaced with the handler's generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flowbuilder_workflow_service::WorkflowServiceError;
use serde::Serialize;
use thiserror::Error;

use crate::constants::messages;

/// JSON envelope shared by all workflow endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Successful response with only a message
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// A failed request: status plus the message placed in `error`
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, messages::WORKFLOW_NOT_FOUND)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a service failure; anything that is neither a missing record
    /// nor a validation failure becomes a 500 with `fallback`.
    pub fn from_service(err: WorkflowServiceError, fallback: &'static str) -> Self {
        match err {
            WorkflowServiceError::NotFound { .. } => Self::not_found(),
            WorkflowServiceError::Validation(message) => Self::bad_request(message),
            other => {
                log::error!("{}: {}", fallback, other);
                Self::internal(fallback)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, ApiResponse::failure(self.message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowbuilder_workflow_service::StoreError;
    use serde_json::json;

    #[test]
    fn test_envelope_omits_absent_members() {
        let body = serde_json::to_value(ApiResponse::ok(json!({ "total": 0 }))).unwrap();
        assert_eq!(body, json!({ "success": true, "data": { "total": 0 } }));

        let body = serde_json::to_value(ApiResponse::notice("Workflow deleted successfully")).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "message": "Workflow deleted successfully" })
        );

        let body = serde_json::to_value(ApiResponse::failure("Workflow not found")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "Workflow not found" }));
    }

    #[test]
    fn test_service_error_mapping() {
        let err = ApiError::from_service(WorkflowServiceError::not_found("x"), messages::FETCH_WORKFLOW_FAILED);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Workflow not found");

        let err = ApiError::from_service(
            WorkflowServiceError::validation("Workflow name is required"),
            messages::CREATE_FAILED,
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Workflow name is required");

        let err = ApiError::from_service(
            StoreError::Unavailable("disk gone".to_string()).into(),
            messages::UPDATE_FAILED,
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to update workflow");
    }
}
