use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Announcement pushed by an external service to `/schedule` or `/rules`.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct AnnouncementDto {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Embed colour as a 24-bit RGB integer
    pub color: Option<u32>,
    /// Plain message content posted above the first embed
    pub content: Option<String>,
    #[serde(default)]
    pub fields: Vec<AnnouncementFieldDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AnnouncementFieldDto {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AnnouncementPostedDto {
    /// Discord message IDs of the posted announcement, as strings
    pub message_ids: Vec<String>,
}
