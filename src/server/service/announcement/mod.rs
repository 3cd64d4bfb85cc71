//! Announcement service.
//!
//! Replaces the announcement of a webhook route: the messages posted by the previous
//! call are deleted, then the new announcement is posted and its message IDs are
//! remembered for the next call. The posted-message list of a route stays locked for
//! the whole sequence, so two calls to the same route never interleave.

pub mod builder;

use serenity::all::{ChannelId, MessageId};
use tokio::sync::Mutex;

use crate::server::{
    data::discord::ChannelMessenger, error::AppError,
    model::announcement::AnnouncementParam,
};

pub struct AnnouncementService<'a> {
    messenger: &'a dyn ChannelMessenger,
}

impl<'a> AnnouncementService<'a> {
    pub fn new(messenger: &'a dyn ChannelMessenger) -> Self {
        Self { messenger }
    }

    /// Replaces the announcement in `channel_id`.
    ///
    /// Failing to delete an old message is logged and skipped; the message may
    /// already have been removed by hand. Failing to post aborts the call, keeping
    /// the IDs of whatever was posted so the next call cleans them up.
    ///
    /// # Arguments
    /// - `channel_id` - Channel the announcement is posted in
    /// - `posted` - Messages posted by the previous call for this route
    /// - `param` - Validated announcement
    ///
    /// # Returns
    /// - `Ok(Vec<MessageId>)` - IDs of the newly posted messages
    /// - `Err(AppError::DiscordErr)` - Posting a message failed
    pub async fn publish(
        &self,
        channel_id: ChannelId,
        posted: &Mutex<Vec<MessageId>>,
        param: &AnnouncementParam,
    ) -> Result<Vec<MessageId>, AppError> {
        let mut posted = posted.lock().await;

        // An ID leaves the list only once its delete has finished, so a cancelled
        // call leaves the remaining messages for the next one.
        while let Some(&message_id) = posted.first() {
            match self.messenger.delete(channel_id, message_id).await {
                Ok(()) => tracing::debug!(
                    "Deleted announcement message {} in channel {}",
                    message_id,
                    channel_id
                ),
                Err(e) => tracing::warn!(
                    "Failed to delete announcement message {} in channel {}: {}",
                    message_id,
                    channel_id,
                    e
                ),
            }
            posted.remove(0);
        }

        for message in builder::build_messages(param) {
            match self.messenger.send(channel_id, message).await {
                Ok(message_id) => posted.push(message_id),
                Err(e) => {
                    tracing::error!(
                        "Failed to post announcement in channel {} after {} message(s): {}",
                        channel_id,
                        posted.len(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Posted announcement of {} message(s) in channel {}",
            posted.len(),
            channel_id
        );

        Ok(posted.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        data::discord::channel::MockChannelMessenger,
        model::announcement::AnnouncementField,
    };
    use async_trait::async_trait;
    use mockall::{predicate::eq, Sequence};
    use serenity::all::CreateMessage;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const CHANNEL: u64 = 900;

    fn param(field_count: usize) -> AnnouncementParam {
        AnnouncementParam {
            title: Some("Weekly Schedule".to_string()),
            description: None,
            color: None,
            content: None,
            fields: (0..field_count)
                .map(|i| AnnouncementField {
                    name: format!("Event {}", i),
                    value: "TBD".to_string(),
                    inline: false,
                })
                .collect(),
        }
    }

    fn counting_sender(messenger: &mut MockChannelMessenger, start: u64) {
        let next = Arc::new(AtomicU64::new(start));
        messenger
            .expect_send()
            .returning(move |_, _| Ok(MessageId::new(next.fetch_add(1, Ordering::SeqCst))));
    }

    #[tokio::test]
    async fn test_publish_first_announcement() {
        let mut messenger = MockChannelMessenger::new();
        messenger.expect_delete().never();
        counting_sender(&mut messenger, 1000);

        let posted = Mutex::new(Vec::new());
        let service = AnnouncementService::new(&messenger);
        let ids = service
            .publish(ChannelId::new(CHANNEL), &posted, &param(30))
            .await
            .unwrap();

        assert_eq!(ids, vec![MessageId::new(1000), MessageId::new(1001)]);
        assert_eq!(*posted.lock().await, ids);
    }

    #[tokio::test]
    async fn test_publish_replaces_previous_messages() {
        let mut messenger = MockChannelMessenger::new();
        let mut seq = Sequence::new();
        messenger
            .expect_delete()
            .with(eq(ChannelId::new(CHANNEL)), eq(MessageId::new(10)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        messenger
            .expect_delete()
            .with(eq(ChannelId::new(CHANNEL)), eq(MessageId::new(11)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        messenger
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(MessageId::new(20)));

        let posted = Mutex::new(vec![MessageId::new(10), MessageId::new(11)]);
        let service = AnnouncementService::new(&messenger);
        let ids = service
            .publish(ChannelId::new(CHANNEL), &posted, &param(3))
            .await
            .unwrap();

        assert_eq!(ids, vec![MessageId::new(20)]);
        assert_eq!(*posted.lock().await, vec![MessageId::new(20)]);
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_block_posting() {
        let mut messenger = MockChannelMessenger::new();
        messenger
            .expect_delete()
            .times(1)
            .returning(|_, _| Err(AppError::InternalError("Unknown Message".to_string())));
        counting_sender(&mut messenger, 30);

        let posted = Mutex::new(vec![MessageId::new(10)]);
        let service = AnnouncementService::new(&messenger);
        let ids = service
            .publish(ChannelId::new(CHANNEL), &posted, &param(1))
            .await
            .unwrap();

        assert_eq!(ids, vec![MessageId::new(30)]);
    }

    #[tokio::test]
    async fn test_failed_post_keeps_partial_ids() {
        let mut messenger = MockChannelMessenger::new();
        let calls = AtomicU64::new(0);
        messenger.expect_send().times(2).returning(move |_, _| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(MessageId::new(40))
            } else {
                Err(AppError::InternalError("Missing Access".to_string()))
            }
        });

        let posted = Mutex::new(Vec::new());
        let service = AnnouncementService::new(&messenger);
        let result = service
            .publish(ChannelId::new(CHANNEL), &posted, &param(30))
            .await;

        assert!(result.is_err());
        assert_eq!(*posted.lock().await, vec![MessageId::new(40)]);
    }

    /// Messenger whose deletes never complete.
    struct StalledMessenger;

    #[async_trait]
    impl ChannelMessenger for StalledMessenger {
        async fn send(
            &self,
            _channel_id: ChannelId,
            _message: CreateMessage,
        ) -> Result<MessageId, AppError> {
            Ok(MessageId::new(99))
        }

        async fn delete(
            &self,
            _channel_id: ChannelId,
            _message_id: MessageId,
        ) -> Result<(), AppError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_publish_keeps_undeleted_ids() {
        let messenger = StalledMessenger;
        let posted = Mutex::new(vec![MessageId::new(10), MessageId::new(11)]);
        let service = AnnouncementService::new(&messenger);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            service.publish(ChannelId::new(CHANNEL), &posted, &param(1)),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            *posted.lock().await,
            vec![MessageId::new(10), MessageId::new(11)]
        );
    }
}
