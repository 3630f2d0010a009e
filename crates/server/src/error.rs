// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bungalow_bliss_api::ApiError;
use serde::Serialize;
use tracing::error;

use crate::render::RenderError;
use crate::session::{Flash, SessionError, TypedSession};

/// API response for errors.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
}

impl HttpError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::StorageFailure { .. } => {
                error!(error = %err, "Storage failure");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        error!(error = %err, "Session error");
        Self::internal("Internal server error")
    }
}

impl From<RenderError> for HttpError {
    fn from(err: RenderError) -> Self {
        error!(error = %err, "Render error");
        Self::internal("Internal server error")
    }
}

/// Stores a flash message and answers with `redirect`.
///
/// # Errors
///
/// Returns an error if the flash cannot be stored.
pub async fn flash_redirect(
    session: &TypedSession,
    kind: Flash,
    message: &str,
    redirect: Redirect,
) -> Result<Response, HttpError> {
    session.flash(kind, message).await?;
    Ok(redirect.into_response())
}
