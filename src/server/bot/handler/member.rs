use serenity::all::{Context, Member};

use crate::server::{
    data::discord::DiscordGuildMemberRepository, error::vatsim::VatsimError,
    service::role_sync::RoleSyncService, state::SyncState,
};

/// Handles the guild_member_addition event by syncing the new member's roles.
///
/// Bots and members of other guilds are ignored. A member without a linked VATSIM
/// account is left alone until they link one and run `/sync`.
pub async fn handle_guild_member_addition(sync: &SyncState, ctx: Context, new_member: Member) {
    if new_member.user.bot || new_member.guild_id != sync.guild_id {
        return;
    }

    let user_id = new_member.user.id;
    let repo = DiscordGuildMemberRepository::new(ctx.http.clone(), sync.guild_id);

    match RoleSyncService::new(sync.vatsim.as_ref(), &repo, &sync.role_config)
        .sync_member(user_id, &new_member.roles)
        .await
    {
        Ok(outcome) => tracing::info!(
            "Synced roles of new member {} (CID {}): {} added, {} failed",
            user_id,
            outcome.cid,
            outcome.added().len(),
            outcome.failures().len()
        ),
        Err(VatsimError::NotLinked(_)) => {
            tracing::debug!("New member {} has no linked VATSIM account", user_id)
        }
        Err(e) => tracing::warn!("Failed to sync roles of new member {}: {}", user_id, e),
    }
}
