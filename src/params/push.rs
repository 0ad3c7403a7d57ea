// ABOUTME: Parameters for pushing a repository to a registry.
// ABOUTME: The registry, when set, prefixes the repository name.

use super::{ValidationError, optional, required};
use crate::auth::AuthConfigs;

/// Arguments for an image push.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PushParams {
    repository: String,
    tag: Option<String>,
    registry: Option<String>,
    auth_configs: Option<AuthConfigs>,
}

impl PushParams {
    pub fn create(repository: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            repository: required("repository", repository)?,
            tag: None,
            registry: None,
            auth_configs: None,
        })
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = optional(tag);
        self
    }

    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = optional(registry);
        self
    }

    pub fn with_auth_configs(mut self, auth_configs: AuthConfigs) -> Self {
        self.auth_configs = Some(auth_configs);
        self
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn auth_configs(&self) -> Option<&AuthConfigs> {
        self.auth_configs.as_ref()
    }

    /// `[registry/]repository`, without the tag.
    pub fn repository_fqn(&self) -> String {
        match &self.registry {
            Some(registry) => format!("{}/{}", registry, self.repository),
            None => self.repository.clone(),
        }
    }
}
