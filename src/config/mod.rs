// ABOUTME: Configuration types and loading for dockwire.yml.
// ABOUTME: Engine connection settings plus registry credentials.

mod engine;
mod env_value;
mod registry_auth;

pub use engine::{DOCKER_HOST_ENV, EngineConfig};
pub use env_value::EnvValue;
pub use registry_auth::{DefaultCredentialConfig, RegistryAuthConfig, RegistryCredentialConfig};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "dockwire.yml";
pub const CONFIG_FILENAME_ALT: &str = "dockwire.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".dockwire/config.yml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub registry_auth: RegistryAuthConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading configuration");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like [`discover`](Self::discover), but an absent file means defaults.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }
}
