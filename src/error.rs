use crate::models::query::QueryError;
use crate::models::storage::StorageError;
use crate::utils::html::html_escape;
use crate::views::ViewError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Failures surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    BadRequest(#[from] QueryError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::View(ViewError::UnknownTemplate(_)) => StatusCode::NOT_FOUND,
            AppError::View(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "The product listing is unavailable right now.".to_string()
        } else {
            warn!("Rejected request: {}", self);
            self.to_string()
        };

        let body = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{code}</title></head>
<body><h1>{code}</h1><p class="error">{message}</p></body>
</html>
"#,
            code = status,
            message = html_escape(&message),
        );

        (status, Html(body)).into_response()
    }
}
