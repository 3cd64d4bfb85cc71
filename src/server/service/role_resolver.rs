//! Role resolution for VATSIM members.
//!
//! Turns a member's VATSIM data into the roles they should gain and lose. This is
//! pure computation on already-fetched data: no network or Discord calls happen
//! here, and it cannot fail.
//!
//! Each category (verified, ATC rating, default ATC, pilot rating, hour tier) is
//! resolved independently into a target role set and a set of stale held roles.
//! The delta is then `target - held` to add and `stale - target` to remove.

use serenity::all::RoleId;
use std::collections::{BTreeMap, BTreeSet};

use crate::server::model::{
    role::RoleConfig,
    role_sync::{DerivedValues, RoleResolution},
    vatsim::{atc_rating_label, pilot_rating_label, MemberData, PilotStats, OBSERVER_RATING},
};

/// Computes the role delta for a member.
///
/// # Arguments
/// - `current_roles` - Roles the member currently holds
/// - `member` - VATSIM member record
/// - `stats` - VATSIM pilot statistics
/// - `config` - Role mapping configuration
///
/// # Returns
/// The roles to add, the roles to remove and the derived display values.
pub fn resolve(
    current_roles: &[RoleId],
    member: &MemberData,
    stats: &PilotStats,
    config: &RoleConfig,
) -> RoleResolution {
    let held: BTreeSet<RoleId> = current_roles.iter().copied().collect();
    let settings = &config.settings;

    let mut target = BTreeSet::new();
    let mut stale = BTreeSet::new();

    target.extend(config.verified_role);

    let atc_role = config.atc_roles.get(&member.rating).copied();
    target.extend(atc_role);
    if settings.remove_old_atc_roles {
        stale.extend(other_held_roles(&config.atc_roles, atc_role, &held));
    }

    if let Some(default_atc_role) = config.default_atc_role {
        if member.rating > OBSERVER_RATING {
            target.insert(default_atc_role);
        } else if held.contains(&default_atc_role) {
            stale.insert(default_atc_role);
        }
    }

    let pilot_role = config
        .pilot_rating_roles
        .get(&member.pilotrating)
        .copied();
    target.extend(pilot_role);
    if settings.remove_old_pilot_rating_roles {
        stale.extend(other_held_roles(
            &config.pilot_rating_roles,
            pilot_role,
            &held,
        ));
    }

    let total_hours = stats.total_hours();
    let hour_role = qualifying_hour_tier(&config.pilot_hour_roles, total_hours).map(|(_, r)| r);
    target.extend(hour_role);
    if settings.remove_lower_hour_roles {
        // Every other tier goes, including tiers above the qualifying one.
        stale.extend(other_held_roles(&config.pilot_hour_roles, hour_role, &held));
    }

    RoleResolution {
        to_add: target.difference(&held).copied().collect(),
        to_remove: stale.difference(&target).copied().collect(),
        derived: DerivedValues {
            atc_label: atc_rating_label(member.rating).to_string(),
            pilot_label: pilot_rating_label(member.pilotrating).to_string(),
            total_hours,
        },
    }
}

/// Finds the highest hour tier reached.
///
/// # Returns
/// - `Some((threshold, role))` - The largest threshold `<= total_hours`
/// - `None` - `total_hours` is below every configured threshold
pub fn qualifying_hour_tier(
    tiers: &BTreeMap<u32, RoleId>,
    total_hours: f64,
) -> Option<(u32, RoleId)> {
    tiers
        .iter()
        .rev()
        .find(|(threshold, _)| f64::from(**threshold) <= total_hours)
        .map(|(threshold, role)| (*threshold, *role))
}

/// Configured roles of one category that the member holds, except `keep`.
fn other_held_roles<'a, K>(
    category: &'a BTreeMap<K, RoleId>,
    keep: Option<RoleId>,
    held: &'a BTreeSet<RoleId>,
) -> impl Iterator<Item = RoleId> + 'a {
    category
        .values()
        .copied()
        .filter(move |role| Some(*role) != keep && held.contains(role))
}
