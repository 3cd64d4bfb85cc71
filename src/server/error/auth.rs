use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The webhook request did not carry the shared secret header.
    #[error("Webhook request is missing the {0} header")]
    MissingSecret(&'static str),

    /// The shared secret header did not match the configured secret.
    #[error("Webhook request supplied an invalid secret")]
    InvalidSecret,
}

/// Converts authentication errors into HTTP responses.
///
/// Both variants map to 401 Unauthorized with the same generic body so callers
/// cannot distinguish a missing header from a wrong secret. The specific reason
/// is logged at debug level.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected webhook request: {}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Unauthorized".to_string(),
            }),
        )
            .into_response()
    }
}
