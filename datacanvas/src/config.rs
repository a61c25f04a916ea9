//! Client configuration and credentials.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings required to construct a [`DataCanvas`](crate::DataCanvas) client.
///
/// All four connection fields are required and have no defaults; obtain the
/// access keys and project id from the DataCanvas dashboard. The values are
/// checked once, by [`Config::validate`], when the client is built.
#[derive(Clone)]
pub struct Config {
    /// Client access key id.
    pub access_key_client: String,
    /// Secret access key.
    pub access_key_secret: String,
    /// Project the requests are scoped to.
    pub project_id: u64,
    /// Base URL of the DataCanvas API, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    pub fn new(
        access_key_client: impl Into<String>,
        access_key_secret: impl Into<String>,
        project_id: u64,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            access_key_client: access_key_client.into(),
            access_key_secret: access_key_secret.into(),
            project_id,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check every field, in declaration order; the first failure wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_key_client.trim().is_empty() {
            return Err(ConfigError::AccessKeyClient);
        }
        if self.access_key_secret.trim().is_empty() {
            return Err(ConfigError::AccessKeySecret);
        }
        if self.project_id == 0 {
            return Err(ConfigError::ProjectId);
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::BaseUrl);
        }
        Url::parse(self.base_url.trim())?;
        Ok(())
    }

    /// Base URL without surrounding whitespace or trailing slashes.
    pub(crate) fn normalized_base_url(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_string()
    }

    pub(crate) fn credentials(&self) -> Credentials {
        Credentials {
            project_id: self.project_id,
            access_key_client: self.access_key_client.clone(),
            access_key_secret: self.access_key_secret.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key_client", &self.access_key_client)
            .field("access_key_secret", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Identity injected into every request body.
#[derive(Clone)]
pub(crate) struct Credentials {
    pub project_id: u64,
    pub access_key_client: String,
    pub access_key_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("access_key_client", &self.access_key_client)
            .field("access_key_secret", &"<redacted>")
            .finish()
    }
}
