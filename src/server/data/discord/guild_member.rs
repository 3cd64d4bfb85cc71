//! Discord guild member repository.
//!
//! This module provides the `GuildRoleMutator` trait used by the role sync service
//! to change a member's roles, the `GuildMemberLister` trait used by the guild sync
//! to enumerate members, and the `DiscordGuildMemberRepository` which implements both
//! over serenity's HTTP client.
//!
//! Every role call is a separate Discord API request and may fail on its own
//! (missing permissions, role hierarchy, rate limits).

use async_trait::async_trait;
use serenity::{
    all::{GuildId, RoleId, UserId},
    http::Http,
};
use std::sync::Arc;

use crate::server::{error::AppError, model::role_sync::MemberSnapshot};

/// Maximum page size of Discord's list guild members endpoint.
const MEMBER_PAGE_SIZE: u64 = 1000;

const AUDIT_LOG_REASON: &str = "VATSIM role sync";

/// Adds and removes roles of guild members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuildRoleMutator: Send + Sync {
    async fn add_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), AppError>;

    async fn remove_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), AppError>;
}

/// Lists the members of a guild.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuildMemberLister: Send + Sync {
    /// Lists every member of the guild, bots included.
    async fn get_all(&self) -> Result<Vec<MemberSnapshot>, AppError>;
}

/// Repository for a single guild's members, backed by the Discord HTTP API.
pub struct DiscordGuildMemberRepository {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl DiscordGuildMemberRepository {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client
    /// - `guild_id` - The guild whose members are read and mutated
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

#[async_trait]
impl GuildMemberLister for DiscordGuildMemberRepository {
    /// Lists every member of the guild.
    ///
    /// Pages through the list guild members endpoint until a short page is returned.
    /// Requires the `GUILD_MEMBERS` privileged intent to be enabled for the bot.
    ///
    /// # Returns
    /// - `Ok(Vec<MemberSnapshot>)` - All members, bots included
    /// - `Err(AppError::DiscordErr)` - Discord API request failed
    async fn get_all(&self) -> Result<Vec<MemberSnapshot>, AppError> {
        let mut members = Vec::new();
        let mut after: Option<u64> = None;

        loop {
            let page = self
                .http
                .get_guild_members(self.guild_id, Some(MEMBER_PAGE_SIZE), after)
                .await?;

            let page_len = page.len() as u64;
            after = page.last().map(|m| m.user.id.get());
            members.extend(page.iter().map(MemberSnapshot::from));

            if page_len < MEMBER_PAGE_SIZE || after.is_none() {
                break;
            }
        }

        tracing::debug!(
            "Fetched {} members of guild {}",
            members.len(),
            self.guild_id
        );

        Ok(members)
    }
}

#[async_trait]
impl GuildRoleMutator for DiscordGuildMemberRepository {
    async fn add_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), AppError> {
        self.http
            .add_member_role(self.guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await?;

        Ok(())
    }

    async fn remove_role(&self, user_id: UserId, role_id: RoleId) -> Result<(), AppError> {
        self.http
            .remove_member_role(self.guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await?;

        Ok(())
    }
}
