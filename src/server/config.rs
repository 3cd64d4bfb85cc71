use serenity::all::GuildId;

use crate::server::{
    data::vatsim::{DEFAULT_VATSIM_API_URL, DEFAULT_VATSIM_DATA_URL},
    error::{config::ConfigError, AppError},
};

const DEFAULT_ROLE_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

pub struct Config {
    pub discord_token: String,
    pub guild_id: GuildId,
    pub webhook_secret: String,
    /// Pilot looked up by `/whereis` when no CID is given
    pub vatsim_cid: u64,

    pub role_config_path: String,
    pub bind_address: String,
    pub vatsim_api_url: String,
    pub vatsim_data_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };
        let optional = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let guild_id = parse_id("DISCORD_GUILD_ID", &required("DISCORD_GUILD_ID")?)?;
        let vatsim_cid = parse_id("VATSIM_CID", &required("VATSIM_CID")?)?;

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            guild_id: GuildId::new(guild_id),
            webhook_secret: required("WEBHOOK_SECRET")?,
            vatsim_cid,
            role_config_path: optional("ROLE_CONFIG_PATH", DEFAULT_ROLE_CONFIG_PATH),
            bind_address: optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            vatsim_api_url: optional("VATSIM_API_URL", DEFAULT_VATSIM_API_URL),
            vatsim_data_url: optional("VATSIM_DATA_URL", DEFAULT_VATSIM_DATA_URL),
        })
    }
}

fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: "must not be 0".to_string(),
        }),
        Ok(id) => Ok(id),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
