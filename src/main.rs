mod model;
mod server;

use std::sync::Arc;

use crate::server::{
    bot,
    config::Config,
    data::VatsimClient,
    error::AppError,
    router,
    scheduler::role_sync,
    startup,
    state::{AppState, SyncState},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let role_config = Arc::new(startup::load_role_config(&config).await?);
    let http_client = startup::setup_reqwest_client()?;

    let vatsim = Arc::new(VatsimClient::new(
        http_client,
        &config.vatsim_api_url,
        &config.vatsim_data_url,
    )?);

    let sync = SyncState::new(vatsim, role_config.clone(), config.guild_id);

    tracing::info!("Starting server");

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, sync.clone()).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // Kept alive for the lifetime of the process
    let _scheduler = role_sync::start_scheduler(sync, discord_http.clone()).await?;

    let app = router::router().with_state(AppState::new(
        discord_http,
        role_config,
        &config.webhook_secret,
    ));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Webhook server listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
