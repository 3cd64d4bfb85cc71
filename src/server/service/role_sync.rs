//! Role sync service for a single guild member.
//!
//! Fetches the member's VATSIM data, resolves the role delta and applies it. Each
//! role change is attempted independently: a failure is recorded in the outcome and
//! logged, and the remaining changes still go through.

use serenity::all::{RoleId, UserId};

use crate::server::{
    data::{discord::GuildRoleMutator, vatsim::VatsimApi},
    error::vatsim::VatsimError,
    model::{
        role::RoleConfig,
        role_sync::{RoleAction, RoleMutation, RoleResolution, RoleSyncOutcome},
    },
    service::role_resolver,
};

pub struct RoleSyncService<'a> {
    vatsim: &'a dyn VatsimApi,
    roles: &'a dyn GuildRoleMutator,
    config: &'a RoleConfig,
}

impl<'a> RoleSyncService<'a> {
    /// Creates a new RoleSyncService instance.
    ///
    /// # Arguments
    /// - `vatsim` - VATSIM API used to look up the member
    /// - `roles` - Role mutator for the guild the member belongs to
    /// - `config` - Role mapping configuration
    pub fn new(
        vatsim: &'a dyn VatsimApi,
        roles: &'a dyn GuildRoleMutator,
        config: &'a RoleConfig,
    ) -> Self {
        Self {
            vatsim,
            roles,
            config,
        }
    }

    /// Syncs the roles of one member.
    ///
    /// Resolves the linked CID, then fetches the member record and the pilot
    /// statistics concurrently. Both must succeed before any role is touched.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the member
    /// - `current_roles` - Roles the member currently holds
    ///
    /// # Returns
    /// - `Ok(RoleSyncOutcome)` - Roles were resolved; individual mutations may have failed
    /// - `Err(VatsimError::NotLinked)` - The member has no linked VATSIM account
    /// - `Err(VatsimError::UpstreamUnavailable)` - A VATSIM lookup failed
    pub async fn sync_member(
        &self,
        user_id: UserId,
        current_roles: &[RoleId],
    ) -> Result<RoleSyncOutcome, VatsimError> {
        let cid = self.vatsim.find_cid_by_discord_id(user_id.get()).await?;

        let (member, stats) = tokio::try_join!(
            self.vatsim.get_member(cid),
            self.vatsim.get_pilot_stats(cid)
        )?;

        let resolution = role_resolver::resolve(current_roles, &member, &stats, self.config);

        tracing::debug!(
            "Resolved roles for user {} (CID {}): {} to add, {} to remove",
            user_id,
            cid,
            resolution.to_add.len(),
            resolution.to_remove.len()
        );

        let mutations = self.apply(user_id, &resolution).await;

        Ok(RoleSyncOutcome {
            user_id,
            cid,
            derived: resolution.derived,
            mutations,
        })
    }

    /// Applies a resolved delta, collecting one result per role change.
    async fn apply(&self, user_id: UserId, resolution: &RoleResolution) -> Vec<RoleMutation> {
        let mut mutations = Vec::with_capacity(resolution.to_add.len() + resolution.to_remove.len());

        for role_id in &resolution.to_add {
            let result = self.roles.add_role(user_id, *role_id).await;
            mutations.push(record(user_id, *role_id, RoleAction::Add, result));
        }

        for role_id in &resolution.to_remove {
            let result = self.roles.remove_role(user_id, *role_id).await;
            mutations.push(record(user_id, *role_id, RoleAction::Remove, result));
        }

        mutations
    }
}

fn record<E: std::fmt::Display>(
    user_id: UserId,
    role_id: RoleId,
    action: RoleAction,
    result: Result<(), E>,
) -> RoleMutation {
    match result {
        Ok(()) => {
            tracing::info!("Role sync: {} role {} for user {}", action, role_id, user_id);
            RoleMutation {
                role_id,
                action,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(
                "Failed to {} role {} for user {}: {}",
                action,
                role_id,
                user_id,
                e
            );
            RoleMutation {
                role_id,
                action,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        data::{discord::guild_member::MockGuildRoleMutator, vatsim::MockVatsimApi},
        error::AppError,
        model::{
            role::RoleSettings,
            vatsim::{MemberData, PilotStats},
        },
    };
    use mockall::predicate::eq;

    const USER: u64 = 42;
    const CID: u64 = 1234567;

    fn member(rating: i32, pilotrating: i32) -> MemberData {
        MemberData {
            cid: CID,
            rating,
            pilotrating,
            name: Some("Jane Doe".to_string()),
            name_first: None,
            name_last: None,
        }
    }

    fn vatsim_returning(member: MemberData, minutes: f64) -> MockVatsimApi {
        let mut vatsim = MockVatsimApi::new();
        vatsim
            .expect_find_cid_by_discord_id()
            .with(eq(USER))
            .returning(|_| Ok(CID));
        vatsim
            .expect_get_member()
            .with(eq(CID))
            .returning(move |_| Ok(member.clone()));
        vatsim
            .expect_get_pilot_stats()
            .with(eq(CID))
            .returning(move |_| Ok(PilotStats::from_minutes(minutes)));
        vatsim
    }

    fn config() -> RoleConfig {
        RoleConfig {
            verified_role: Some(RoleId::new(100)),
            atc_roles: [(2, RoleId::new(202)), (5, RoleId::new(205))]
                .into_iter()
                .collect(),
            default_atc_role: Some(RoleId::new(200)),
            pilot_hour_roles: [(0, RoleId::new(400)), (100, RoleId::new(410))]
                .into_iter()
                .collect(),
            settings: RoleSettings {
                remove_old_atc_roles: true,
                remove_lower_hour_roles: true,
                ..RoleSettings::default()
            },
            ..RoleConfig::default()
        }
    }

    #[tokio::test]
    async fn applies_resolved_delta() {
        let vatsim = vatsim_returning(member(5, 0), 7200.0);
        let mut roles = MockGuildRoleMutator::new();
        roles
            .expect_add_role()
            .times(4)
            .returning(|_, _| Ok(()));
        roles
            .expect_remove_role()
            .times(2)
            .returning(|_, _| Ok(()));

        let config = config();
        let service = RoleSyncService::new(&vatsim, &roles, &config);
        let outcome = service
            .sync_member(
                UserId::new(USER),
                &[RoleId::new(202), RoleId::new(400)],
            )
            .await
            .unwrap();

        assert_eq!(outcome.cid, CID);
        assert_eq!(
            outcome.added(),
            vec![
                RoleId::new(100),
                RoleId::new(200),
                RoleId::new(205),
                RoleId::new(410)
            ]
        );
        assert_eq!(outcome.removed(), vec![RoleId::new(202), RoleId::new(400)]);
        assert_eq!(outcome.derived.total_hours, 120.0);
        assert!(outcome.failures().is_empty());
    }

    #[tokio::test]
    async fn failed_mutation_does_not_block_others() {
        let vatsim = vatsim_returning(member(5, 0), 0.0);
        let mut roles = MockGuildRoleMutator::new();
        roles.expect_add_role().times(4).returning(|_, role| {
            if role == RoleId::new(200) {
                Err(AppError::InternalError("Missing Permissions".to_string()))
            } else {
                Ok(())
            }
        });
        roles
            .expect_remove_role()
            .with(eq(UserId::new(USER)), eq(RoleId::new(202)))
            .times(1)
            .returning(|_, _| Ok(()));

        let config = config();
        let service = RoleSyncService::new(&vatsim, &roles, &config);
        let outcome = service
            .sync_member(UserId::new(USER), &[RoleId::new(202)])
            .await
            .unwrap();

        assert_eq!(outcome.mutations.len(), 5);
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].role_id, RoleId::new(200));
        assert_eq!(outcome.failures()[0].action, RoleAction::Add);
        assert_eq!(outcome.removed(), vec![RoleId::new(202)]);
    }

    #[tokio::test]
    async fn synced_member_makes_no_calls() {
        let vatsim = vatsim_returning(member(5, 0), 0.0);
        let roles = MockGuildRoleMutator::new();

        let config = config();
        let service = RoleSyncService::new(&vatsim, &roles, &config);
        let outcome = service
            .sync_member(
                UserId::new(USER),
                &[
                    RoleId::new(100),
                    RoleId::new(200),
                    RoleId::new(205),
                    RoleId::new(400),
                ],
            )
            .await
            .unwrap();

        assert!(outcome.mutations.is_empty());
    }

    #[tokio::test]
    async fn not_linked_member_is_reported() {
        let mut vatsim = MockVatsimApi::new();
        vatsim
            .expect_find_cid_by_discord_id()
            .returning(|id| Err(VatsimError::NotLinked(id)));
        vatsim.expect_get_member().never();
        vatsim.expect_get_pilot_stats().never();
        let roles = MockGuildRoleMutator::new();

        let config = config();
        let service = RoleSyncService::new(&vatsim, &roles, &config);
        let result = service.sync_member(UserId::new(USER), &[]).await;

        assert!(matches!(result, Err(VatsimError::NotLinked(USER))));
    }

    #[tokio::test]
    async fn upstream_failure_leaves_roles_untouched() {
        let mut vatsim = MockVatsimApi::new();
        vatsim
            .expect_find_cid_by_discord_id()
            .returning(|_| Ok(CID));
        vatsim
            .expect_get_member()
            .returning(|_| Ok(member(5, 0)));
        vatsim.expect_get_pilot_stats().returning(|_| {
            Err(VatsimError::UpstreamUnavailable {
                endpoint: "v2/members/1234567/stats".to_string(),
                reason: "returned 503 Service Unavailable".to_string(),
            })
        });
        let mut roles = MockGuildRoleMutator::new();
        roles.expect_add_role().never();
        roles.expect_remove_role().never();

        let config = config();
        let service = RoleSyncService::new(&vatsim, &roles, &config);
        let result = service.sync_member(UserId::new(USER), &[]).await;

        assert!(matches!(
            result,
            Err(VatsimError::UpstreamUnavailable { .. })
        ));
    }
}
