// ABOUTME: Registry credentials section of the config file.
// ABOUTME: Builds the process-wide CredentialStore, resolving env references.

use super::env_value::EnvValue;
use crate::auth::{Credential, CredentialStore};
use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryAuthConfig {
    /// Used when an operation names no registry.
    #[serde(default)]
    pub default: Option<DefaultCredentialConfig>,

    /// Order matters: substring lookups take the first match.
    #[serde(default)]
    pub registries: Vec<RegistryCredentialConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultCredentialConfig {
    #[serde(default)]
    pub username: EnvValue,
    #[serde(default)]
    pub password: EnvValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryCredentialConfig {
    pub server_address: String,
    #[serde(default)]
    pub username: EnvValue,
    #[serde(default)]
    pub password: EnvValue,
}

impl RegistryAuthConfig {
    pub fn credential_store(&self) -> Result<CredentialStore> {
        let default = match &self.default {
            Some(entry) => Some(Credential::unbound(
                entry.username.resolve()?,
                entry.password.resolve()?,
            )),
            None => None,
        };

        let credentials = self
            .registries
            .iter()
            .map(|entry| {
                if entry.server_address.trim().is_empty() {
                    return Err(Error::InvalidConfig(
                        "registry server_address cannot be empty".to_string(),
                    ));
                }
                Ok(Credential::new(
                    entry.server_address.clone(),
                    entry.username.resolve()?,
                    entry.password.resolve()?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CredentialStore::new(default, credentials))
    }
}
