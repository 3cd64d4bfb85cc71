use serenity::all::{Context, EventHandler, Interaction, Member, Ready};
use serenity::async_trait;

use crate::server::state::SyncState;

pub mod interaction;
pub mod member;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub sync: SyncState,
    /// Pilot shown by `/whereis` when no CID is given
    pub default_cid: u64,
}

impl Handler {
    pub fn new(sync: SyncState, default_cid: u64) -> Self {
        Self { sync, default_cid }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.sync, ctx, ready).await;
    }

    /// Called for slash commands and other interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(self, ctx, interaction).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.sync, ctx, new_member).await;
    }
}
