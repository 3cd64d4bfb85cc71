use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::server::{
    controller::{
        health::health,
        webhook::{post_rules, post_schedule},
        ApiDoc,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/schedule", post(post_schedule))
        .route("/rules", post(post_rules))
        .route("/api/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::role::{AnnouncementChannels, RoleConfig};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use serenity::{all::ChannelId, http::Http};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "webhook-secret";

    fn app(channels: AnnouncementChannels) -> Router {
        let role_config = RoleConfig {
            channels,
            ..RoleConfig::default()
        };
        let state = AppState::new(Arc::new(Http::new("")), Arc::new(role_config), SECRET);

        router().with_state(state)
    }

    fn configured() -> AnnouncementChannels {
        AnnouncementChannels {
            schedule: Some(ChannelId::new(900)),
            rules: Some(ChannelId::new(901)),
        }
    }

    fn webhook(path: &str, secret: Option<&str>, body: Value) -> Request<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(secret) = secret {
            request = request.header("X-Webhook-Secret", secret);
        }
        request.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(configured())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_webhook_without_secret_is_unauthorized() {
        let response = app(configured())
            .oneshot(webhook("/schedule", None, json!({ "title": "Events" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_webhook_with_wrong_secret_is_unauthorized() {
        let response = app(configured())
            .oneshot(webhook("/rules", Some("guess"), json!({ "title": "Rules" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unauthorized_before_channel_check() {
        let response = app(AnnouncementChannels::default())
            .oneshot(webhook("/rules", None, json!({ "title": "Rules" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body_without_secret_is_unauthorized() {
        let request = Request::builder()
            .method("POST")
            .uri("/schedule")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(configured()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_missing_content_type_without_secret_is_unauthorized() {
        let request = Request::builder()
            .method("POST")
            .uri("/rules")
            .body(Body::from(r#"{"title":"Rules"}"#))
            .unwrap();

        let response = app(configured()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body_with_secret_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/schedule")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-Webhook-Secret", SECRET)
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(configured()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_unconfigured_channel_is_unavailable() {
        let response = app(AnnouncementChannels::default())
            .oneshot(webhook("/schedule", Some(SECRET), json!({ "title": "Events" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_empty_announcement_is_bad_request() {
        let response = app(configured())
            .oneshot(webhook("/schedule", Some(SECRET), json!({ "fields": [] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let response = app(configured())
            .oneshot(
                Request::get("/api/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["paths"]["/schedule"]["post"].is_object());
        assert!(body["paths"]["/rules"]["post"].is_object());
        assert!(body["paths"]["/health"]["get"].is_object());
    }
}
