//! Domain & parameter models for webhook announcements
//!
//! Defines the two announcement routes and the validated parameter model the
//! announcement service posts, converted from the webhook DTO.

use serenity::all::ChannelId;
use std::fmt;

use crate::{
    model::announcement::AnnouncementDto,
    server::{error::AppError, model::role::AnnouncementChannels},
};

/// The announcement routes. Each keeps its own list of posted messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    Schedule,
    Rules,
}

impl AnnouncementKind {
    /// Channel configured for this announcement, if any.
    pub fn channel(&self, channels: &AnnouncementChannels) -> Option<ChannelId> {
        match self {
            AnnouncementKind::Schedule => channels.schedule,
            AnnouncementKind::Rules => channels.rules,
        }
    }
}

impl fmt::Display for AnnouncementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnouncementKind::Schedule => write!(f, "schedule"),
            AnnouncementKind::Rules => write!(f, "rules"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Parameters for posting an announcement
///
/// Blank strings from the webhook payload are normalized to `None` and fields with
/// a blank name or value are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementParam {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub content: Option<String>,
    pub fields: Vec<AnnouncementField>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AnnouncementParam {
    /// Validates and converts a webhook payload.
    ///
    /// # Returns
    /// - `Ok(AnnouncementParam)` - Payload has something to post
    /// - `Err(AppError::BadRequest)` - Payload has no title, description, content or fields
    pub fn from_dto(dto: AnnouncementDto) -> Result<Self, AppError> {
        let param = Self {
            title: non_blank(dto.title),
            description: non_blank(dto.description),
            color: dto.color.map(|c| c & 0x00ff_ffff),
            content: non_blank(dto.content),
            fields: dto
                .fields
                .into_iter()
                .filter(|f| !f.name.trim().is_empty() && !f.value.trim().is_empty())
                .map(|f| AnnouncementField {
                    name: f.name,
                    value: f.value,
                    inline: f.inline,
                })
                .collect(),
        };

        if param.title.is_none()
            && param.description.is_none()
            && param.content.is_none()
            && param.fields.is_empty()
        {
            return Err(AppError::BadRequest(
                "Announcement must contain a title, description, content or fields".to_string(),
            ));
        }

        Ok(param)
    }
}
