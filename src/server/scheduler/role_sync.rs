use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::guild_sync, state::SyncState};

/// Starts the periodic guild role sync.
///
/// Runs a full guild sync every `auto_sync_interval` minutes. A tick that fires while
/// the previous pass is still running is skipped by the guild sync itself.
///
/// # Arguments
/// - `sync`: Shared role sync dependencies
/// - `discord_http`: Discord HTTP client used to list members and change roles
///
/// # Returns
/// - `Ok(Some(JobScheduler))` - Scheduler running; keep it alive for the process lifetime
/// - `Ok(None)` - Periodic sync disabled (`auto_sync_interval: 0`)
/// - `Err(AppError::SchedulerErr)` - The job could not be scheduled
pub async fn start_scheduler(
    sync: SyncState,
    discord_http: Arc<Http>,
) -> Result<Option<JobScheduler>, AppError> {
    let Some(interval) = sync.role_config.settings.auto_sync_interval() else {
        tracing::info!("Periodic role sync disabled");
        return Ok(None);
    };

    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let sync = sync.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            if let Err(e) = guild_sync::sync_guild(http, &sync).await {
                tracing::error!("Error running periodic role sync: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Role sync scheduler started, running every {:?}", interval);

    Ok(Some(scheduler))
}
