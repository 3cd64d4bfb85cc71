use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        announcement::{AnnouncementDto, AnnouncementPostedDto},
        api::ErrorDto,
    },
    server::{
        data::discord::DiscordChannelRepository,
        error::AppError,
        middleware::auth::WebhookGuard,
        model::announcement::{AnnouncementKind, AnnouncementParam},
        service::announcement::AnnouncementService,
        state::AppState,
    },
};

pub static WEBHOOK_TAG: &str = "webhook";

#[utoipa::path(
    post,
    path = "/schedule",
    tag = WEBHOOK_TAG,
    params(
        ("X-Webhook-Secret" = String, Header, description = "Shared webhook secret")
    ),
    request_body = AnnouncementDto,
    responses(
        (status = 200, description = "Schedule announcement replaced", body = AnnouncementPostedDto),
        (status = 400, description = "Malformed body or nothing to post", body = ErrorDto),
        (status = 401, description = "Missing or invalid webhook secret", body = ErrorDto),
        (status = 503, description = "No schedule channel configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AnnouncementDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    publish(&state, &headers, AnnouncementKind::Schedule, payload).await
}

#[utoipa::path(
    post,
    path = "/rules",
    tag = WEBHOOK_TAG,
    params(
        ("X-Webhook-Secret" = String, Header, description = "Shared webhook secret")
    ),
    request_body = AnnouncementDto,
    responses(
        (status = 200, description = "Rules announcement replaced", body = AnnouncementPostedDto),
        (status = 400, description = "Malformed body or nothing to post", body = ErrorDto),
        (status = 401, description = "Missing or invalid webhook secret", body = ErrorDto),
        (status = 503, description = "No rules channel configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_rules(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AnnouncementDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    publish(&state, &headers, AnnouncementKind::Rules, payload).await
}

/// Authenticates the request, then replaces the announcement of `kind`.
///
/// The secret is checked before the body is looked at, so an unauthenticated caller
/// gets a 401 even for a malformed body and never learns whether a channel is
/// configured.
async fn publish(
    state: &AppState,
    headers: &HeaderMap,
    kind: AnnouncementKind,
    payload: Result<Json<AnnouncementDto>, JsonRejection>,
) -> Result<Json<AnnouncementPostedDto>, AppError> {
    WebhookGuard::new(headers, &state.webhook_secret).require()?;

    let Some(channel_id) = kind.channel(&state.role_config.channels) else {
        return Err(AppError::ServiceUnavailable(format!(
            "No {} channel is configured",
            kind
        )));
    };

    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let param = AnnouncementParam::from_dto(payload)?;

    let messenger = DiscordChannelRepository::new(state.discord_http.clone());
    let message_ids = AnnouncementService::new(&messenger)
        .publish(channel_id, state.announcements.posted(kind), &param)
        .await?;

    tracing::info!(
        "Replaced {} announcement with {} message(s)",
        kind,
        message_ids.len()
    );

    Ok(Json(AnnouncementPostedDto {
        message_ids: message_ids.iter().map(|id| id.to_string()).collect(),
    }))
}
