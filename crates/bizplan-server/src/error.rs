use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bizplan_core::envelope::{ApiError, ApiResponse, ErrorCode};
use bizplan_core::error::BizplanError;

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 400 errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 400 through
/// the `anyhow::Error` chain without touching the `BizplanError` enum.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. Always rendered as a failed
/// response envelope.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    fn status_for(code: ErrorCode) -> StatusCode {
        match code {
            ErrorCode::BadRequest | ErrorCode::NotInitialized => StatusCode::BAD_REQUEST,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let api_error = if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            ApiError::new(ErrorCode::BadRequest, b.0.clone())
        } else if let Some(e) = self.0.downcast_ref::<BizplanError>() {
            ApiError::from(e)
        } else {
            ApiError::new(ErrorCode::InternalError, self.0.to_string())
        };

        let status = Self::status_for(api_error.code);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ApiResponse::<()>::err(api_error);
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizplan_core::error::FieldError;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn invalid_plan_maps_to_400() {
        let err = AppError(BizplanError::InvalidPlan("gold".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn step_not_found_maps_to_404() {
        let err = AppError(BizplanError::StepNotFound(9).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn project_not_found_maps_to_404() {
        let err = AppError(BizplanError::ProjectNotFound.into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_registered_maps_to_409() {
        let err = AppError(BizplanError::AlreadyRegistered("a@b.co".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_422() {
        let err = AppError(
            BizplanError::Validation(vec![FieldError::new("email", "required")]).into(),
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError(BizplanError::Io(io_err).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn foreign_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn body_is_failed_envelope() {
        let err = AppError::bad_request("invalid 'at' timestamp");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(json["error"]["message"], "invalid 'at' timestamp");
    }

    #[tokio::test]
    async fn validation_body_lists_fields() {
        let err = AppError(
            BizplanError::Validation(vec![FieldError::new("name", "required")]).into(),
        );
        let json = body_json(err.into_response()).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"][0]["field"], "name");
    }
}
