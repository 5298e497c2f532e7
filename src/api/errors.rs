use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::types::TransitionError;
use crate::repositories::store::StoreError;
use crate::services::{
    ai_flows::{FlowError, INVALID_RESPONSE_MESSAGE},
    content::ContentError, grading::AssignmentError,
    grading::GradeEntryError, materials::MaterialsError,
};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    detail: String,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    Forbidden(&'static str),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests(&'static str),
    BadGateway(String),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::TooManyRequests(message) => message.to_string(),
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message) => message,
            ApiError::BadGateway(message) => {
                tracing::warn!(error = %message, "Upstream generation failed");
                message
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
                message
            }
        };

        (status, Json(ErrorResponse { status: status.as_u16(), detail })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => ApiError::Conflict(message),
            StoreError::Database(err) => ApiError::internal(err, "Database operation failed"),
        }
    }
}

impl From<TransitionError> for ApiError {
    fn from(err: TransitionError) -> Self {
        ApiError::Conflict(err.to_string())
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::InvalidResponse(_) => {
                ApiError::BadGateway(INVALID_RESPONSE_MESSAGE.to_string())
            }
            FlowError::Upstream(source) => {
                tracing::error!(error = %source, "Text generator unavailable");
                ApiError::BadGateway("The AI service is unavailable. Please try again.".to_string())
            }
        }
    }
}

impl From<GradeEntryError> for ApiError {
    fn from(err: GradeEntryError) -> Self {
        match err {
            GradeEntryError::Validation(message) => ApiError::BadRequest(message),
            GradeEntryError::Store(err) => err.into(),
        }
    }
}

impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::NotFound => ApiError::NotFound("Assignment not found".to_string()),
            AssignmentError::Store(err) => err.into(),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation(message) => ApiError::BadRequest(message),
            ContentError::NotFound => ApiError::NotFound("Content not found".to_string()),
            ContentError::InvalidTransition(err) => err.into(),
            ContentError::Store(err) => err.into(),
        }
    }
}

impl From<MaterialsError> for ApiError {
    fn from(err: MaterialsError) -> Self {
        match err {
            MaterialsError::Validation(message) => ApiError::BadRequest(message),
            MaterialsError::Store(err) => err.into(),
        }
    }
}
