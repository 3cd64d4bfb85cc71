use axum::http::HeaderMap;

use crate::server::error::{auth::AuthError, AppError};

/// Header carrying the shared secret of the webhook routes (`X-Webhook-Secret`).
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Checks the shared secret of an incoming webhook request.
pub struct WebhookGuard<'a> {
    headers: &'a HeaderMap,
    secret: &'a str,
}

impl<'a> WebhookGuard<'a> {
    pub fn new(headers: &'a HeaderMap, secret: &'a str) -> Self {
        Self { headers, secret }
    }

    /// Requires the request to carry the configured secret.
    ///
    /// # Returns
    /// - `Ok(())` - Header present and matching
    /// - `Err(AuthError::MissingSecret)` - Header absent or not valid UTF-8
    /// - `Err(AuthError::InvalidSecret)` - Header does not match
    pub fn require(&self) -> Result<(), AppError> {
        let Some(supplied) = self
            .headers
            .get(WEBHOOK_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
        else {
            return Err(AuthError::MissingSecret(WEBHOOK_SECRET_HEADER).into());
        };

        if !constant_time_eq(supplied.as_bytes(), self.secret.as_bytes()) {
            return Err(AuthError::InvalidSecret.into());
        }

        Ok(())
    }
}

/// Compares two byte strings in time independent of where they differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
