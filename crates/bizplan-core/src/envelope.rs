//! JSON response envelope shared by every backend endpoint:
//! `{ "success": bool, "data"?: T, "error"?: { "code", "message", "details"? } }`.

use crate::error::BizplanError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    ValidationError,
    NotFound,
    Conflict,
    NotInitialized,
    InternalError,
}

impl ErrorCode {
    pub fn for_error(err: &BizplanError) -> Self {
        match err {
            BizplanError::NotInitialized => ErrorCode::NotInitialized,
            BizplanError::InvalidPlan(_) => ErrorCode::BadRequest,
            BizplanError::StepNotFound(_)
            | BizplanError::QuestionNotFound { .. }
            | BizplanError::ProjectNotFound => ErrorCode::NotFound,
            BizplanError::Validation(_) => ErrorCode::ValidationError,
            BizplanError::AlreadyRegistered(_) => ErrorCode::Conflict,
            BizplanError::Io(_) | BizplanError::Yaml(_) | BizplanError::Json(_) => {
                ErrorCode::InternalError
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }
}

impl From<&BizplanError> for ApiError {
    fn from(err: &BizplanError) -> Self {
        let details = match err {
            BizplanError::Validation(fields) => serde_json::to_value(fields).ok(),
            _ => None,
        };
        Self {
            code: ErrorCode::for_error(err),
            message: err.to_string(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Collapse back into a `Result`; an envelope claiming success without
    /// data is reported as an internal error.
    pub fn into_result(self) -> std::result::Result<T, ApiError> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            _ => Err(ApiError::new(
                ErrorCode::InternalError,
                "malformed response envelope",
            )),
        }
    }
}
