use chrono::Utc;
use serenity::all::{
    CommandInteraction, Context, CreateCommand, EditInteractionResponse, Permissions,
};

use crate::server::{
    data::discord::DiscordGuildMemberRepository,
    error::AppError,
    service::{flight_status::builder, guild_sync, role_sync::RoleSyncService},
    state::SyncState,
};

use super::{SYNC, SYNCALL};

pub fn register_sync() -> CreateCommand {
    CreateCommand::new(SYNC).description("Sync your roles with your VATSIM ratings and hours")
}

pub fn register_syncall() -> CreateCommand {
    CreateCommand::new(SYNCALL)
        .description("Sync the roles of every member of this server")
        .default_member_permissions(Permissions::MANAGE_ROLES)
}

/// Syncs the roles of the invoking member and replies with the outcome.
pub async fn run_sync(
    ctx: &Context,
    command: &CommandInteraction,
    sync: &SyncState,
) -> Result<(), AppError> {
    command.defer_ephemeral(&ctx.http).await?;

    let now = Utc::now();

    let member = match (&command.member, command.guild_id) {
        (Some(member), Some(guild_id)) if guild_id == sync.guild_id => member,
        _ => {
            let embed = builder::error_embed("Use this command in the VATSIM server.", now);
            command
                .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
                .await?;
            return Ok(());
        }
    };

    let repo = DiscordGuildMemberRepository::new(ctx.http.clone(), sync.guild_id);
    let result = RoleSyncService::new(sync.vatsim.as_ref(), &repo, &sync.role_config)
        .sync_member(member.user.id, &member.roles)
        .await;

    let embed = match result {
        Ok(outcome) => builder::role_sync_embed(&outcome, now),
        Err(e) => {
            tracing::warn!("Role sync of user {} failed: {}", member.user.id, e);
            builder::vatsim_error_embed(&e, now)
        }
    };

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await?;

    Ok(())
}

/// Starts a full guild sync in the background.
///
/// Replies right away; the pass itself can take minutes with the per-member delay
/// and reports its totals in the log.
pub async fn run_syncall(
    ctx: &Context,
    command: &CommandInteraction,
    sync: &SyncState,
) -> Result<(), AppError> {
    command.defer_ephemeral(&ctx.http).await?;

    let now = Utc::now();
    let allowed = command
        .member
        .as_ref()
        .and_then(|m| m.permissions)
        .is_some_and(|p| p.manage_roles());

    let embed = if !allowed {
        builder::error_embed("You need the Manage Roles permission to sync everyone.", now)
    } else if sync.running.try_lock().is_err() {
        builder::info_embed(
            "Sync In Progress",
            "A full role sync is already running.",
            now,
        )
    } else {
        let sync = sync.clone();
        let http = ctx.http.clone();
        let requested_by = command.user.id;

        tokio::spawn(async move {
            tracing::info!("Full role sync requested by {}", requested_by);
            if let Err(e) = guild_sync::sync_guild(http, &sync).await {
                tracing::error!("Full role sync failed: {}", e);
            }
        });

        builder::info_embed(
            "Sync Started",
            "Syncing the roles of every member. This can take a while.",
            now,
        )
    };

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await?;

    Ok(())
}
