//! Error-to-response mapping for handlers

use axum::{
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::errors::{AppError, UpstreamError};

/// Status code for an application error
pub fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
        _ if error.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for(error: &AppError) -> String {
    match error {
        AppError::MissingParameter { name } => format!("Error: missing '{name}' parameter"),
        AppError::Upstream(UpstreamError::Timeout { url }) => {
            format!("Error: timeout while fetching {url}")
        }
        other => format!("Error while fetching upstream resource: {other}"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!("Request failed ({}): {}", status.as_u16(), self);
        } else {
            warn!("Rejected request ({}): {}", status.as_u16(), self);
        }
        error_response(status, &message_for(&self))
    }
}

/// Plain-text error body
pub fn error_response(status: StatusCode, msg: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from(msg.to_string()),
    )
        .into_response()
}
