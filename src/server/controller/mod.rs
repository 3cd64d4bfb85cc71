//! HTTP handlers of the webhook server.

pub mod health;
pub mod webhook;

use utoipa::OpenApi;

use crate::model::{
    announcement::{AnnouncementDto, AnnouncementFieldDto, AnnouncementPostedDto},
    api::{ErrorDto, HealthDto},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "vatsync", description = "Announcement webhooks of the VATSIM Discord bot"),
    paths(health::health, webhook::post_schedule, webhook::post_rules),
    components(schemas(
        AnnouncementDto,
        AnnouncementFieldDto,
        AnnouncementPostedDto,
        ErrorDto,
        HealthDto
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "webhook", description = "Announcement webhooks")
    )
)]
pub struct ApiDoc;
