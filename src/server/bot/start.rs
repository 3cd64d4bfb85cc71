use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{bot::handler::Handler, config::Config, error::AppError, state::SyncState};

/// Builds the Discord bot client without connecting it.
///
/// The client's HTTP handle is returned separately so the webhook server and the
/// scheduler can use the Discord API before the gateway connection is up.
///
/// # Arguments
/// - `config` - Application configuration carrying the bot token and tracked CID
/// - `sync` - Shared role sync dependencies for the event handler
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its HTTP handle
/// - `Err(AppError::DiscordErr)` - Client could not be built
pub async fn init_bot(config: &Config, sync: SyncState) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(sync, config.vatsim_cid);

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Connects the bot to the gateway.
///
/// Blocks until the connection shuts down, so it should run in its own task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
