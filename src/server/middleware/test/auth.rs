use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{WebhookGuard, WEBHOOK_SECRET_HEADER},
};

const SECRET: &str = "s3cr3t-webhook-token";

fn headers(secret: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(secret) = secret {
        headers.insert(WEBHOOK_SECRET_HEADER, HeaderValue::from_str(secret).unwrap());
    }
    headers
}

/// Expected: Ok(()) when the header matches the configured secret
#[test]
fn accepts_matching_secret() {
    let headers = headers(Some(SECRET));

    assert!(WebhookGuard::new(&headers, SECRET).require().is_ok());
}

/// Expected: Err(AuthError::MissingSecret) when no header is sent
#[test]
fn rejects_missing_header() {
    let headers = headers(None);

    let result = WebhookGuard::new(&headers, SECRET).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingSecret(_)))
    ));
}

/// Expected: Err(AuthError::InvalidSecret) for a different secret of equal length
#[test]
fn rejects_wrong_secret() {
    let wrong = "s3cr3t-webhook-tokeN";
    let headers = headers(Some(wrong));

    let result = WebhookGuard::new(&headers, SECRET).require();

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InvalidSecret))));
}

/// Expected: Err(AuthError::InvalidSecret) when the secret is only a prefix
#[test]
fn rejects_secret_prefix() {
    let headers = headers(Some("s3cr3t"));

    let result = WebhookGuard::new(&headers, SECRET).require();

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InvalidSecret))));
}

/// Expected: header lookup ignores case
#[test]
fn header_name_is_case_insensitive() {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_bytes(b"X-WEBHOOK-SECRET").unwrap(),
        HeaderValue::from_static(SECRET),
    );

    assert!(WebhookGuard::new(&headers, SECRET).require().is_ok());
}
