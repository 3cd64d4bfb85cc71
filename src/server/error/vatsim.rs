use thiserror::Error;

/// Failures of the VATSIM lookups a role sync or flight status depends on.
///
/// Both variants are surfaced to the Discord user as a formatted message, see
/// [`VatsimError::user_message`]. Neither is retried; the next scheduled sync tick
/// acts as the retry.
#[derive(Error, Debug)]
pub enum VatsimError {
    /// The Discord account has no VATSIM account linked.
    #[error("Discord user {0} has no linked VATSIM account")]
    NotLinked(u64),

    /// The VATSIM API answered with a non-2xx status or could not be reached.
    #[error("VATSIM endpoint {endpoint} unavailable: {reason}")]
    UpstreamUnavailable {
        /// The endpoint path that failed
        endpoint: String,
        /// Status code or transport error description
        reason: String,
    },
}

impl VatsimError {
    /// Builds an `UpstreamUnavailable` error from a transport or decoding failure.
    pub fn request(endpoint: &str, err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        }
    }

    /// Builds an `UpstreamUnavailable` error from a non-success status code.
    pub fn status(endpoint: &str, status: reqwest::StatusCode) -> Self {
        Self::UpstreamUnavailable {
            endpoint: endpoint.to_string(),
            reason: format!("returned {}", status),
        }
    }

    /// Message shown to the Discord user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotLinked(_) => {
                "Your Discord account is not linked to a VATSIM account. Link it at https://community.vatsim.net and try again."
            }
            Self::UpstreamUnavailable { .. } => {
                "Failed to fetch VATSIM data. Please try again later."
            }
        }
    }
}
