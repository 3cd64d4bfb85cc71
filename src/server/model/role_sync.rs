//! Domain models for role synchronization.
//!
//! A sync runs in two steps: the resolver turns member data into a
//! [`RoleResolution`], then the sync service applies it and records one
//! [`RoleMutation`] per attempted role change in a [`RoleSyncOutcome`].

use serenity::all::{Member, RoleId, UserId};
use std::collections::BTreeSet;
use std::fmt;

/// Values derived from the member data, used for replies and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedValues {
    pub atc_label: String,
    pub pilot_label: String,
    pub total_hours: f64,
}

/// Role delta computed by the resolver.
///
/// `to_add` never contains a role the member already holds and `to_remove` only
/// contains held roles, so applying an empty resolution makes no API calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleResolution {
    pub to_add: BTreeSet<RoleId>,
    pub to_remove: BTreeSet<RoleId>,
    pub derived: DerivedValues,
}

impl RoleResolution {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// The role set a member ends up with once this delta is applied.
    pub fn apply_to(&self, current_roles: &[RoleId]) -> Vec<RoleId> {
        let mut roles: BTreeSet<RoleId> = current_roles.iter().copied().collect();
        roles.retain(|role| !self.to_remove.contains(role));
        roles.extend(self.to_add.iter().copied());
        roles.into_iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Add,
    Remove,
}

impl fmt::Display for RoleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleAction::Add => write!(f, "add"),
            RoleAction::Remove => write!(f, "remove"),
        }
    }
}

/// Result of a single attempted role change.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMutation {
    pub role_id: RoleId,
    pub action: RoleAction,
    /// `None` on success, the failure description otherwise
    pub error: Option<String>,
}

impl RoleMutation {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything that happened while syncing one member.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSyncOutcome {
    pub user_id: UserId,
    pub cid: u64,
    pub derived: DerivedValues,
    pub mutations: Vec<RoleMutation>,
}

impl RoleSyncOutcome {
    fn roles_with(&self, action: RoleAction) -> Vec<RoleId> {
        self.mutations
            .iter()
            .filter(|m| m.action == action && m.succeeded())
            .map(|m| m.role_id)
            .collect()
    }

    /// Roles successfully added.
    pub fn added(&self) -> Vec<RoleId> {
        self.roles_with(RoleAction::Add)
    }

    /// Roles successfully removed.
    pub fn removed(&self) -> Vec<RoleId> {
        self.roles_with(RoleAction::Remove)
    }

    /// Role changes that failed.
    pub fn failures(&self) -> Vec<&RoleMutation> {
        self.mutations.iter().filter(|m| !m.succeeded()).collect()
    }
}

/// The parts of a guild member a role sync needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSnapshot {
    pub user_id: UserId,
    pub roles: Vec<RoleId>,
    pub bot: bool,
}

impl From<&Member> for MemberSnapshot {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user.id,
            roles: member.roles.clone(),
            bot: member.user.bot,
        }
    }
}

/// Totals of one pass over the guild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuildSyncReport {
    /// Members whose roles were synced (some individual role changes may have failed)
    pub synced: usize,
    /// Members skipped because they have no linked VATSIM account
    pub not_linked: usize,
    /// Members whose sync failed before any role change
    pub failed: usize,
    /// Individual role changes that failed
    pub failed_mutations: usize,
}
