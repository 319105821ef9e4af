use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use logbook_core::LogbookError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. The body is always
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<LogbookError>() {
            Some(e) => match e {
                LogbookError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
                LogbookError::ConfigParse { .. }
                | LogbookError::SourceRead { .. }
                | LogbookError::SourceParse { .. }
                | LogbookError::SourceSchema { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        self.0.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message() });
        (self.status(), axum::Json(body)).into_response()
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
