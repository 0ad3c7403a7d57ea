// ABOUTME: Engine connection settings: endpoint, API version and timeouts.
// ABOUTME: Falls back to DOCKER_HOST, then the default unix socket.

use crate::connector::Endpoint;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

pub const DOCKER_HOST_ENV: &str = "DOCKER_HOST";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `unix:///path`, `tcp://host:port` or `http://host:port`.
    pub endpoint: Option<String>,

    /// API version to pin, e.g. `1.41`. Unversioned paths otherwise.
    pub api_version: Option<String>,

    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Longest silence tolerated while reading a response.
    #[serde(with = "humantime_serde")]
    pub read_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_version: None,
            connect_timeout: Duration::from_secs(10),
            read_timeout: None,
        }
    }
}

impl EngineConfig {
    /// The configured endpoint, else `DOCKER_HOST`, else the default socket.
    pub fn endpoint(&self) -> Result<Endpoint> {
        let raw = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => match std::env::var(DOCKER_HOST_ENV) {
                Ok(host) if !host.trim().is_empty() => host,
                _ => return Ok(Endpoint::default()),
            },
        };

        Endpoint::parse(&raw).map_err(|e| Error::InvalidConfig(format!("engine endpoint: {}", e)))
    }
}
