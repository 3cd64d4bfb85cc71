//! Static role mapping configuration.
//!
//! The role configuration is read from YAML once at startup and never mutated
//! afterwards. Role and channel IDs may be written either as YAML integers or as
//! quoted strings, since Discord snowflakes are commonly copied as strings.

use serde::Deserialize;
use serenity::all::{ChannelId, RoleId};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::server::error::AppError;

const DEFAULT_AUTO_SYNC_INTERVAL_MINUTES: u64 = 60;
const DEFAULT_SYNC_MEMBER_DELAY_MS: u64 = 1000;

/// Mapping of VATSIM certification data onto Discord roles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawRoleConfig")]
pub struct RoleConfig {
    /// Role granted to every member with a linked VATSIM account
    pub verified_role: Option<RoleId>,
    /// ATC rating code -> role
    pub atc_roles: BTreeMap<i32, RoleId>,
    /// Role granted to every member rated above Observer
    pub default_atc_role: Option<RoleId>,
    /// Pilot rating code -> role
    pub pilot_rating_roles: BTreeMap<i32, RoleId>,
    /// Minimum pilot hours -> role
    pub pilot_hour_roles: BTreeMap<u32, RoleId>,
    pub settings: RoleSettings,
    pub channels: AnnouncementChannels,
}

/// Behaviour switches for role synchronization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoleSettings {
    /// Keep only the ATC role matching the current rating
    pub remove_old_atc_roles: bool,
    /// Keep only the pilot role matching the current pilot rating
    pub remove_old_pilot_rating_roles: bool,
    /// Keep only the hour role of the qualifying tier. Removes every other
    /// configured hour role, higher tiers included.
    pub remove_lower_hour_roles: bool,
    /// Minutes between full guild syncs, `0` disables the periodic sync
    pub auto_sync_interval: u64,
    /// Pause between two members during a full guild sync
    pub sync_member_delay_ms: u64,
}

impl Default for RoleSettings {
    fn default() -> Self {
        Self {
            remove_old_atc_roles: false,
            remove_old_pilot_rating_roles: false,
            remove_lower_hour_roles: false,
            auto_sync_interval: DEFAULT_AUTO_SYNC_INTERVAL_MINUTES,
            sync_member_delay_ms: DEFAULT_SYNC_MEMBER_DELAY_MS,
        }
    }
}

impl RoleSettings {
    /// Interval of the periodic guild sync, `None` when disabled or out of range.
    pub fn auto_sync_interval(&self) -> Option<Duration> {
        self.auto_sync_interval
            .checked_mul(60)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn member_delay(&self) -> Duration {
        Duration::from_millis(self.sync_member_delay_ms)
    }
}

/// Channels the announcement webhooks post into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementChannels {
    pub schedule: Option<ChannelId>,
    pub rules: Option<ChannelId>,
}

impl RoleConfig {
    /// Parses the role configuration from YAML.
    ///
    /// # Returns
    /// - `Ok(RoleConfig)` - Parsed and validated configuration
    /// - `Err(AppError::YamlErr)` - Malformed YAML or an invalid role/channel ID
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Snowflake as written in the YAML file, before validation.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    String(String),
}

impl RawId {
    fn into_u64(self, field: &str) -> Result<u64, String> {
        let value = match self {
            RawId::Number(value) => value,
            RawId::String(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("{}: '{}' is not a valid ID: {}", field, value, e))?,
        };

        if value == 0 {
            return Err(format!("{}: ID must not be 0", field));
        }

        Ok(value)
    }

    fn into_role_id(self, field: &str) -> Result<RoleId, String> {
        self.into_u64(field).map(RoleId::new)
    }

    fn into_channel_id(self, field: &str) -> Result<ChannelId, String> {
        self.into_u64(field).map(ChannelId::new)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawRoleConfig {
    verified_role: Option<RawId>,
    atc_roles: BTreeMap<i32, RawId>,
    default_atc_role: Option<RawId>,
    pilot_rating_roles: BTreeMap<i32, RawId>,
    pilot_hour_roles: BTreeMap<u32, RawId>,
    settings: RoleSettings,
    channels: RawChannels,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawChannels {
    schedule: Option<RawId>,
    rules: Option<RawId>,
}

fn convert_map<K: Ord + Copy + std::fmt::Display>(
    field: &str,
    raw: BTreeMap<K, RawId>,
) -> Result<BTreeMap<K, RoleId>, String> {
    raw.into_iter()
        .map(|(key, id)| Ok((key, id.into_role_id(&format!("{}.{}", field, key))?)))
        .collect()
}

impl TryFrom<RawRoleConfig> for RoleConfig {
    type Error = String;

    fn try_from(raw: RawRoleConfig) -> Result<Self, Self::Error> {
        if raw.settings.auto_sync_interval.checked_mul(60).is_none() {
            return Err(format!(
                "settings.auto_sync_interval: {} minutes is too large",
                raw.settings.auto_sync_interval
            ));
        }

        Ok(Self {
            verified_role: raw
                .verified_role
                .map(|id| id.into_role_id("verified_role"))
                .transpose()?,
            atc_roles: convert_map("atc_roles", raw.atc_roles)?,
            default_atc_role: raw
                .default_atc_role
                .map(|id| id.into_role_id("default_atc_role"))
                .transpose()?,
            pilot_rating_roles: convert_map("pilot_rating_roles", raw.pilot_rating_roles)?,
            pilot_hour_roles: convert_map("pilot_hour_roles", raw.pilot_hour_roles)?,
            settings: raw.settings,
            channels: AnnouncementChannels {
                schedule: raw
                    .channels
                    .schedule
                    .map(|id| id.into_channel_id("channels.schedule"))
                    .transpose()?,
                rules: raw
                    .channels
                    .rules
                    .map(|id| id.into_channel_id("channels.rules"))
                    .transpose()?,
            },
        })
    }
}
