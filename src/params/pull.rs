// ABOUTME: Parameters for pulling an image from a registry.
// ABOUTME: Derives the fully-qualified image name from registry, namespace and image.

use super::{ValidationError, optional, required};
use crate::auth::AuthConfigs;

/// Arguments for an image pull.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullParams {
    image: String,
    tag: Option<String>,
    registry: Option<String>,
    namespace: Option<String>,
    auth_configs: Option<AuthConfigs>,
}

impl PullParams {
    /// Create pull parameters for `image`.
    ///
    /// `image` may already contain a namespace (`library/nginx`).
    pub fn create(image: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            image: required("image", image)?,
            tag: None,
            registry: None,
            namespace: None,
            auth_configs: None,
        })
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = optional(tag);
        self
    }

    /// Registry host and port, e.g. `localhost:5000`.
    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = optional(registry);
        self
    }

    /// Namespace the image belongs to. For registries this is usually the user name.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = optional(namespace);
        self
    }

    pub fn with_auth_configs(mut self, auth_configs: AuthConfigs) -> Self {
        self.auth_configs = Some(auth_configs);
        self
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn auth_configs(&self) -> Option<&AuthConfigs> {
        self.auth_configs.as_ref()
    }

    /// `[registry/][namespace/]image`, without the tag.
    pub fn image_fqn(&self) -> String {
        match (&self.registry, &self.namespace) {
            (Some(registry), Some(namespace)) => {
                format!("{}/{}/{}", registry, namespace, self.image)
            }
            // image may carry its own namespace here; it is used as-is
            (Some(registry), None) => format!("{}/{}", registry, self.image),
            (None, Some(namespace)) => format!("{}/{}", namespace, self.image),
            (None, None) => self.image.clone(),
        }
    }
}
