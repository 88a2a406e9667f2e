use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::ServerError;

/// JSON body sent for a [`ServerError`]
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: ErrorDetails<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetails<'a> {
    status: u16,
    text: &'a str,
    message: &'a str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                status: status.as_u16(),
                text: self.text(),
                message: self.message(),
            },
        };

        (status, Json(body)).into_response()
    }
}
