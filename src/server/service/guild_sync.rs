//! Full guild role synchronization.
//!
//! Walks every non-bot member of the guild and syncs their roles one at a time,
//! pausing between members to stay clear of Discord's rate limits. A member whose
//! sync fails is logged and counted; the pass always runs to the end.

use serenity::http::Http;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

use crate::server::{
    data::{
        discord::{DiscordGuildMemberRepository, GuildMemberLister, GuildRoleMutator},
        vatsim::VatsimApi,
    },
    error::{vatsim::VatsimError, AppError},
    model::{role::RoleConfig, role_sync::GuildSyncReport},
    service::role_sync::RoleSyncService,
    state::SyncState,
};

/// Runs a full pass over the configured guild through the Discord HTTP API.
///
/// Entry point of the scheduler and the `/syncall` command.
pub async fn sync_guild(
    http: Arc<Http>,
    sync: &SyncState,
) -> Result<Option<GuildSyncReport>, AppError> {
    let repo = DiscordGuildMemberRepository::new(http, sync.guild_id);

    GuildSyncService::new(sync.vatsim.as_ref(), &repo, &repo, &sync.role_config)
        .run(&sync.running)
        .await
}

pub struct GuildSyncService<'a> {
    vatsim: &'a dyn VatsimApi,
    members: &'a dyn GuildMemberLister,
    roles: &'a dyn GuildRoleMutator,
    config: &'a RoleConfig,
}

impl<'a> GuildSyncService<'a> {
    /// Creates a new GuildSyncService instance.
    ///
    /// # Arguments
    /// - `vatsim` - VATSIM API used to look up members
    /// - `members` - Source of the guild's member list
    /// - `roles` - Role mutator for the guild
    /// - `config` - Role mapping configuration, including the per-member delay
    pub fn new(
        vatsim: &'a dyn VatsimApi,
        members: &'a dyn GuildMemberLister,
        roles: &'a dyn GuildRoleMutator,
        config: &'a RoleConfig,
    ) -> Self {
        Self {
            vatsim,
            members,
            roles,
            config,
        }
    }

    /// Runs one full pass over the guild.
    ///
    /// `running` guards against overlapping passes: if another pass holds it, this
    /// call returns immediately without touching any member.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSyncReport))` - Pass completed
    /// - `Ok(None)` - Another pass is still running
    /// - `Err(AppError::DiscordErr)` - The member list could not be fetched
    pub async fn run(&self, running: &Mutex<()>) -> Result<Option<GuildSyncReport>, AppError> {
        let Ok(_guard) = running.try_lock() else {
            tracing::info!("Guild role sync already in progress, skipping");
            return Ok(None);
        };

        let members: Vec<_> = self
            .members
            .get_all()
            .await?
            .into_iter()
            .filter(|m| !m.bot)
            .collect();

        let delay = self.config.settings.member_delay();

        tracing::info!(
            "Starting guild role sync for {} members ({:?} of pacing)",
            members.len(),
            expected_delay(members.len(), delay)
        );

        let sync = RoleSyncService::new(self.vatsim, self.roles, self.config);
        let mut report = GuildSyncReport::default();

        for (index, member) in members.iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match sync.sync_member(member.user_id, &member.roles).await {
                Ok(outcome) => {
                    report.synced += 1;
                    report.failed_mutations += outcome.failures().len();
                }
                Err(VatsimError::NotLinked(_)) => {
                    tracing::debug!("Member {} has no linked VATSIM account", member.user_id);
                    report.not_linked += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to sync roles of member {}: {}", member.user_id, e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            "Guild role sync finished: {} synced, {} not linked, {} failed, {} failed role changes",
            report.synced,
            report.not_linked,
            report.failed,
            report.failed_mutations
        );

        Ok(Some(report))
    }
}

/// Total time a pass over `member_count` members spends waiting between members.
pub fn expected_delay(member_count: usize, delay: Duration) -> Duration {
    let waits = u32::try_from(member_count.saturating_sub(1)).unwrap_or(u32::MAX);
    delay.saturating_mul(waits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        data::{
            discord::guild_member::{MockGuildMemberLister, MockGuildRoleMutator},
            vatsim::MockVatsimApi,
        },
        model::{
            role::RoleSettings,
            role_sync::MemberSnapshot,
            vatsim::{MemberData, PilotStats},
        },
    };
    use serenity::all::{RoleId, UserId};

    const LINKED: u64 = 1;
    const UNLINKED: u64 = 2;
    const BROKEN: u64 = 3;
    const BOT: u64 = 4;

    fn snapshot(user_id: u64, bot: bool) -> MemberSnapshot {
        MemberSnapshot {
            user_id: UserId::new(user_id),
            roles: Vec::new(),
            bot,
        }
    }

    fn config(delay_ms: u64) -> RoleConfig {
        RoleConfig {
            verified_role: Some(RoleId::new(100)),
            settings: RoleSettings {
                sync_member_delay_ms: delay_ms,
                ..RoleSettings::default()
            },
            ..RoleConfig::default()
        }
    }

    fn lister(members: Vec<MemberSnapshot>) -> MockGuildMemberLister {
        let mut lister = MockGuildMemberLister::new();
        lister
            .expect_get_all()
            .times(1)
            .returning(move || Ok(members.clone()));
        lister
    }

    fn vatsim() -> MockVatsimApi {
        let mut vatsim = MockVatsimApi::new();
        vatsim
            .expect_find_cid_by_discord_id()
            .returning(|discord_id| match discord_id {
                UNLINKED => Err(VatsimError::NotLinked(discord_id)),
                BOT => panic!("bots must not be synced"),
                _ => Ok(discord_id + 1_000_000),
            });
        vatsim.expect_get_member().returning(|cid| {
            if cid == BROKEN + 1_000_000 {
                return Err(VatsimError::UpstreamUnavailable {
                    endpoint: format!("v2/members/{}", cid),
                    reason: "returned 500 Internal Server Error".to_string(),
                });
            }
            Ok(MemberData {
                cid,
                rating: 1,
                pilotrating: 0,
                name: None,
                name_first: None,
                name_last: None,
            })
        });
        vatsim
            .expect_get_pilot_stats()
            .returning(|_| Ok(PilotStats::from_minutes(0.0)));
        vatsim
    }

    #[tokio::test]
    async fn test_run_counts_each_outcome() {
        let members = lister(vec![
            snapshot(LINKED, false),
            snapshot(UNLINKED, false),
            snapshot(BROKEN, false),
            snapshot(BOT, true),
        ]);
        let vatsim = vatsim();
        let mut roles = MockGuildRoleMutator::new();
        roles
            .expect_add_role()
            .times(1)
            .returning(|_, _| Err(AppError::InternalError("Missing Permissions".to_string())));

        let config = config(0);
        let service = GuildSyncService::new(&vatsim, &members, &roles, &config);
        let report = service.run(&Mutex::new(())).await.unwrap().unwrap();

        assert_eq!(
            report,
            GuildSyncReport {
                synced: 1,
                not_linked: 1,
                failed: 1,
                failed_mutations: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_run_skips_while_running() {
        let mut members = MockGuildMemberLister::new();
        members.expect_get_all().never();
        let vatsim = MockVatsimApi::new();
        let roles = MockGuildRoleMutator::new();

        let running = Mutex::new(());
        let _held = running.lock().await;

        let config = config(0);
        let service = GuildSyncService::new(&vatsim, &members, &roles, &config);

        assert_eq!(service.run(&running).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_run_propagates_member_list_failure() {
        let mut members = MockGuildMemberLister::new();
        members
            .expect_get_all()
            .returning(|| Err(AppError::ServiceUnavailable("gateway".to_string())));
        let vatsim = MockVatsimApi::new();
        let roles = MockGuildRoleMutator::new();

        let config = config(0);
        let service = GuildSyncService::new(&vatsim, &members, &roles, &config);
        let running = Mutex::new(());

        assert!(service.run(&running).await.is_err());
        assert!(running.try_lock().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_between_members() {
        let members = lister(vec![
            snapshot(UNLINKED, false),
            snapshot(UNLINKED, false),
            snapshot(UNLINKED, false),
        ]);
        let vatsim = vatsim();
        let roles = MockGuildRoleMutator::new();

        let config = config(250);
        let service = GuildSyncService::new(&vatsim, &members, &roles, &config);

        let started = tokio::time::Instant::now();
        let report = service.run(&Mutex::new(())).await.unwrap().unwrap();

        assert_eq!(report.not_linked, 3);
        assert_eq!(
            started.elapsed(),
            expected_delay(3, config.settings.member_delay())
        );
    }

    #[test]
    fn expected_delay_has_no_wait_for_single_member() {
        assert_eq!(expected_delay(0, Duration::from_secs(1)), Duration::ZERO);
        assert_eq!(expected_delay(1, Duration::from_secs(1)), Duration::ZERO);
        assert_eq!(
            expected_delay(4, Duration::from_millis(250)),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn expected_delay_saturates() {
        assert_eq!(
            expected_delay(usize::MAX, Duration::from_secs(u64::MAX)),
            Duration::MAX
        );
    }
}
