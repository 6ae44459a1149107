use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use todos_core::ManagerError;

/// Error returned by handlers.
///
/// Store failures are not recovered from: they are logged and turned
/// into a plain error page.
#[derive(Debug)]
pub struct AppError(ManagerError);

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
