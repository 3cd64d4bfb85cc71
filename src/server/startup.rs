use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::server::{config::Config, error::AppError, model::role::RoleConfig};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Initializes the tracing subscriber.
///
/// Log levels come from `RUST_LOG`, defaulting to `info` for everything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

/// Builds the reqwest client shared by every outbound VATSIM request.
///
/// Redirects are disabled so a misconfigured base URL cannot bounce requests to an
/// arbitrary host.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(HTTP_TIMEOUT)
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Reads and parses the YAML role configuration.
///
/// # Returns
/// - `Ok(RoleConfig)` - Parsed configuration
/// - `Err(AppError::IoErr)` - File could not be read
/// - `Err(AppError::YamlErr)` - File is not a valid role configuration
pub async fn load_role_config(config: &Config) -> Result<RoleConfig, AppError> {
    let contents = tokio::fs::read_to_string(&config.role_config_path)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to read role configuration {}: {}",
                config.role_config_path,
                e
            );
            e
        })?;

    let role_config = RoleConfig::from_yaml_str(&contents)?;

    tracing::info!(
        "Loaded role configuration from {}: {} ATC roles, {} pilot rating roles, {} hour tiers",
        config.role_config_path,
        role_config.atc_roles.len(),
        role_config.pilot_rating_roles.len(),
        role_config.pilot_hour_roles.len()
    );

    Ok(role_config)
}
