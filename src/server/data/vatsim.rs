//! VATSIM API repository.
//!
//! This module provides the `VatsimApi` trait the services depend on and the
//! `VatsimClient` implementation that talks to the VATSIM REST API and the v3
//! data feed over the shared reqwest client. Every call hits the network; nothing
//! is cached.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::server::{
    error::{config::ConfigError, vatsim::VatsimError, AppError},
    model::vatsim::{DiscordLink, MemberData, Pilot, PilotStats, VatsimDataFeed},
};

pub const DEFAULT_VATSIM_API_URL: &str = "https://api.vatsim.net";
pub const DEFAULT_VATSIM_DATA_URL: &str = "https://data.vatsim.net/v3/vatsim-data.json";

/// Lookups against the VATSIM network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VatsimApi: Send + Sync {
    /// Resolves the VATSIM CID linked to a Discord account.
    ///
    /// # Returns
    /// - `Ok(cid)` - Linked VATSIM CID
    /// - `Err(VatsimError::NotLinked)` - No VATSIM account is linked
    /// - `Err(VatsimError::UpstreamUnavailable)` - Request failed
    async fn find_cid_by_discord_id(&self, discord_id: u64) -> Result<u64, VatsimError>;

    /// Fetches the member record of a CID.
    async fn get_member(&self, cid: u64) -> Result<MemberData, VatsimError>;

    /// Fetches the pilot statistics of a CID.
    async fn get_pilot_stats(&self, cid: u64) -> Result<PilotStats, VatsimError>;

    /// Finds a CID among the pilots currently connected, `None` if not flying.
    async fn find_online_pilot(&self, cid: u64) -> Result<Option<Pilot>, VatsimError>;
}

/// `VatsimApi` implementation backed by reqwest.
pub struct VatsimClient {
    http_client: reqwest::Client,
    api_url: Url,
    data_url: Url,
}

/// Parses a base URL from configuration, ensuring it ends with `/` so relative
/// paths are appended rather than replacing the last segment.
fn parse_base_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{}/", value)
    };

    Url::parse(&normalized).map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

impl VatsimClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// - `http_client` - Shared reqwest client
    /// - `api_url` - Base URL of the VATSIM REST API
    /// - `data_url` - Full URL of the v3 data feed
    ///
    /// # Returns
    /// - `Ok(VatsimClient)` - Client ready for use
    /// - `Err(AppError::ConfigErr)` - One of the URLs is invalid
    pub fn new(
        http_client: reqwest::Client,
        api_url: &str,
        data_url: &str,
    ) -> Result<Self, AppError> {
        let api_url = parse_base_url("VATSIM_API_URL", api_url)?;
        let data_url = Url::parse(data_url).map_err(|e| ConfigError::InvalidEnvVar {
            name: "VATSIM_DATA_URL".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http_client,
            api_url,
            data_url,
        })
    }

    /// Builds the absolute URL of an API path such as `v2/members/1234567`.
    fn endpoint(&self, path: &str) -> Result<Url, VatsimError> {
        self.api_url
            .join(path)
            .map_err(|e| VatsimError::UpstreamUnavailable {
                endpoint: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Performs a GET request and decodes the JSON body.
    ///
    /// Returns `Ok(None)` on 404 so callers can decide what a missing resource means.
    async fn get_json<T: DeserializeOwned>(
        &self,
        label: &str,
        url: Url,
    ) -> Result<Option<T>, VatsimError> {
        tracing::debug!("Requesting VATSIM {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| VatsimError::request(label, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(VatsimError::status(label, status));
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| VatsimError::request(label, e))?;

        Ok(Some(body))
    }

    /// Like `get_json`, but treats 404 as an upstream failure.
    async fn get_required_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, VatsimError> {
        let url = self.endpoint(path)?;
        self.get_json(path, url)
            .await?
            .ok_or_else(|| VatsimError::status(path, StatusCode::NOT_FOUND))
    }
}

#[async_trait]
impl VatsimApi for VatsimClient {
    async fn find_cid_by_discord_id(&self, discord_id: u64) -> Result<u64, VatsimError> {
        let path = format!("v2/members/discord/{}", discord_id);
        let url = self.endpoint(&path)?;

        match self.get_json::<DiscordLink>(&path, url).await? {
            Some(link) => Ok(link.user_id),
            None => Err(VatsimError::NotLinked(discord_id)),
        }
    }

    async fn get_member(&self, cid: u64) -> Result<MemberData, VatsimError> {
        self.get_required_json(&format!("v2/members/{}", cid)).await
    }

    async fn get_pilot_stats(&self, cid: u64) -> Result<PilotStats, VatsimError> {
        self.get_required_json(&format!("v2/members/{}/stats", cid))
            .await
    }

    async fn find_online_pilot(&self, cid: u64) -> Result<Option<Pilot>, VatsimError> {
        let feed = self
            .get_json::<VatsimDataFeed>("v3/vatsim-data.json", self.data_url.clone())
            .await?
            .ok_or_else(|| VatsimError::status("v3/vatsim-data.json", StatusCode::NOT_FOUND))?;

        Ok(feed.pilots.into_iter().find(|pilot| pilot.cid == cid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> VatsimClient {
        VatsimClient::new(reqwest::Client::new(), api_url, DEFAULT_VATSIM_DATA_URL).unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_without_trailing_slash() {
        let client = client("https://api.vatsim.net");
        let url = client.endpoint("v2/members/1234567/stats").unwrap();

        assert_eq!(url.as_str(), "https://api.vatsim.net/v2/members/1234567/stats");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = client("http://localhost:8080/vatsim/");
        let url = client.endpoint("v2/members/discord/42").unwrap();

        assert_eq!(url.as_str(), "http://localhost:8080/vatsim/v2/members/discord/42");
    }

    #[test]
    fn invalid_api_url_is_config_error() {
        let result = VatsimClient::new(reqwest::Client::new(), "not a url", DEFAULT_VATSIM_DATA_URL);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }

    #[test]
    fn invalid_data_url_is_config_error() {
        let result =
            VatsimClient::new(reqwest::Client::new(), DEFAULT_VATSIM_API_URL, "::feed::");

        assert!(matches!(result, Err(AppError::ConfigErr(_))));
    }
}
