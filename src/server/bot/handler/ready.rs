//! Ready event handler for bot initialization.
//!
//! The `ready` event fires once the bot has connected to Discord's gateway. The bot
//! uses it to register its slash commands in the configured guild.

use serenity::all::{ActivityData, Context, Ready};

use crate::server::{bot::command, state::SyncState};

/// Handles the ready event when the bot connects to Discord.
///
/// Registration replaces the guild's command set, so commands dropped from the bot
/// disappear from Discord as well. A failed registration is logged; the bot keeps
/// running with whatever commands Discord still has.
///
/// # Arguments
/// - `sync` - Shared sync state carrying the configured guild
/// - `ctx` - Discord context
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(sync: &SyncState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("the VATSIM network")));

    match sync
        .guild_id
        .set_commands(&ctx.http, command::create_commands())
        .await
    {
        Ok(commands) => tracing::info!(
            "Registered {} slash commands in guild {}",
            commands.len(),
            sync.guild_id
        ),
        Err(e) => tracing::error!(
            "Failed to register slash commands in guild {}: {}",
            sync.guild_id,
            e
        ),
    }
}
