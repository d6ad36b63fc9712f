pub mod evaluations;
pub mod projects;
pub mod promotion;
pub mod registrations;
pub mod wizard;

use axum::Json;
use bizplan_core::envelope::ApiResponse;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

pub(crate) fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

/// Optional `?at=<RFC 3339>` override of the wall clock, for previewing
/// prices at another moment.
#[derive(Debug, Default, Deserialize)]
pub struct AtQuery {
    pub at: Option<String>,
}

impl AtQuery {
    pub fn now(&self) -> Result<DateTime<Utc>, AppError> {
        match self.at.as_deref() {
            None => Ok(Utc::now()),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| AppError::bad_request(format!("invalid 'at' timestamp '{s}': {e}"))),
        }
    }
}

/// Run blocking storage work off the async executor.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> bizplan_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let value = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(value)
}
