//! Discord channel message repository.
//!
//! Posts and deletes the messages the announcement webhooks manage.

use async_trait::async_trait;
use serenity::{
    all::{ChannelId, CreateMessage, MessageId},
    http::Http,
};
use std::sync::Arc;

use crate::server::error::AppError;

/// Posts and deletes messages in guild channels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelMessenger: Send + Sync {
    /// Posts a message, returning its ID.
    async fn send(&self, channel_id: ChannelId, message: CreateMessage)
        -> Result<MessageId, AppError>;

    async fn delete(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), AppError>;
}

pub struct DiscordChannelRepository {
    http: Arc<Http>,
}

impl DiscordChannelRepository {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChannelMessenger for DiscordChannelRepository {
    async fn send(
        &self,
        channel_id: ChannelId,
        message: CreateMessage,
    ) -> Result<MessageId, AppError> {
        let message = channel_id.send_message(&self.http, message).await?;

        Ok(message.id)
    }

    async fn delete(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), AppError> {
        self.http
            .delete_message(channel_id, message_id, None)
            .await?;

        Ok(())
    }
}
