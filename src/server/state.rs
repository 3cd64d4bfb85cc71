//! Shared state of the webhook server, the bot and the scheduler.
//!
//! This module defines the `AppState` struct handed to the axum handlers, the
//! `AnnouncementState` holding the message IDs each announcement route posted last,
//! and the `SyncState` shared by everything that runs a role sync. All of them are
//! initialized once during startup and cloned into each consumer.

use serenity::{
    all::{GuildId, MessageId},
    http::Http,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::server::{
    data::vatsim::VatsimApi,
    model::{announcement::AnnouncementKind, role::RoleConfig},
};

/// Message IDs posted by the last call of each announcement route.
///
/// Each route has its own lock, held by the announcement service for the whole
/// delete-then-post sequence. Lists live in memory only and start empty after a
/// restart.
#[derive(Clone, Default)]
pub struct AnnouncementState {
    schedule: Arc<Mutex<Vec<MessageId>>>,
    rules: Arc<Mutex<Vec<MessageId>>>,
}

impl AnnouncementState {
    pub fn posted(&self, kind: AnnouncementKind) -> &Mutex<Vec<MessageId>> {
        match kind {
            AnnouncementKind::Schedule => &self.schedule,
            AnnouncementKind::Rules => &self.rules,
        }
    }
}

/// Dependencies of a role sync, shared by the bot and the scheduler.
#[derive(Clone)]
pub struct SyncState {
    /// VATSIM API client
    pub vatsim: Arc<dyn VatsimApi>,

    /// Role mapping, read once at startup
    pub role_config: Arc<RoleConfig>,

    /// The guild whose members are synced
    pub guild_id: GuildId,

    /// Held for the duration of a full guild sync so passes never overlap
    pub running: Arc<Mutex<()>>,
}

impl SyncState {
    pub fn new(vatsim: Arc<dyn VatsimApi>, role_config: Arc<RoleConfig>, guild_id: GuildId) -> Self {
        Self {
            vatsim,
            role_config,
            guild_id,
            running: Arc::new(Mutex::new(())),
        }
    }
}

/// Application state of the webhook server.
///
/// All fields are cheap to clone:
/// - `Arc<Http>` and `Arc<RoleConfig>` are reference-counted pointers
/// - `AnnouncementState` shares its lists through `Arc`
/// - `Arc<str>` shares the secret without copying it
#[derive(Clone)]
pub struct AppState {
    /// Discord HTTP client of the bot, used to post announcements.
    pub discord_http: Arc<Http>,

    /// Role configuration, read here for the announcement channels.
    pub role_config: Arc<RoleConfig>,

    /// Messages posted by each announcement route.
    pub announcements: AnnouncementState,

    /// Shared secret expected in the `X-Webhook-Secret` header.
    pub webhook_secret: Arc<str>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Arguments
    /// - `discord_http` - Discord HTTP client of the bot
    /// - `role_config` - Role configuration
    /// - `webhook_secret` - Shared secret of the webhook routes
    pub fn new(discord_http: Arc<Http>, role_config: Arc<RoleConfig>, webhook_secret: &str) -> Self {
        Self {
            discord_http,
            role_config,
            announcements: AnnouncementState::default(),
            webhook_secret: Arc::from(webhook_secret),
        }
    }
}
