// ABOUTME: Parameters for building an image from a local directory or a remote context.
// ABOUTME: Carries the engine's build options and per-call registry credentials.

use super::{ValidationError, optional, required};
use crate::auth::AuthConfigs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where the engine gets the build context from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildContext {
    /// Directory archived and sent as the request body.
    Directory(PathBuf),
    /// Git repository or tarball URL fetched by the engine.
    Remote(String),
}

/// Arguments for an image build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildImageParams {
    context: BuildContext,
    repository: Option<String>,
    tag: Option<String>,
    dockerfile: Option<String>,
    no_cache: bool,
    remove_intermediate: bool,
    force_remove: bool,
    pull: bool,
    quiet: bool,
    memory_limit: Option<i64>,
    memory_swap_limit: Option<i64>,
    build_args: BTreeMap<String, String>,
    auth_configs: Option<AuthConfigs>,
}

impl BuildImageParams {
    /// Build from a local directory containing a Dockerfile.
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ValidationError::MissingField("build context"));
        }
        Ok(Self::new(BuildContext::Directory(path.to_path_buf())))
    }

    /// Build from a context the engine downloads itself.
    pub fn from_remote(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = required("remote build context", url)?;
        Ok(Self::new(BuildContext::Remote(url)))
    }

    fn new(context: BuildContext) -> Self {
        Self {
            context,
            repository: None,
            tag: None,
            dockerfile: None,
            no_cache: false,
            remove_intermediate: true,
            force_remove: false,
            pull: false,
            quiet: false,
            memory_limit: None,
            memory_swap_limit: None,
            build_args: BTreeMap::new(),
            auth_configs: None,
        }
    }

    /// Repository name for the built image, e.g. `user/app`.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = optional(repository);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = optional(tag);
        self
    }

    /// Dockerfile path relative to the context root.
    pub fn with_dockerfile(mut self, dockerfile: impl Into<String>) -> Self {
        self.dockerfile = optional(dockerfile);
        self
    }

    pub fn with_no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    /// Remove intermediate containers after a successful build. On by default.
    pub fn with_remove_intermediate(mut self, remove: bool) -> Self {
        self.remove_intermediate = remove;
        self
    }

    /// Always remove intermediate containers, even after a failed step.
    pub fn with_force_remove(mut self, force_remove: bool) -> Self {
        self.force_remove = force_remove;
        self
    }

    /// Always attempt to pull a newer version of base images.
    pub fn with_pull(mut self, pull: bool) -> Self {
        self.pull = pull;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Memory limit for build containers, in bytes.
    pub fn with_memory_limit(mut self, bytes: i64) -> Self {
        self.memory_limit = Some(bytes);
        self
    }

    /// Memory plus swap limit, in bytes. `-1` disables swap limiting.
    pub fn with_memory_swap_limit(mut self, bytes: i64) -> Self {
        self.memory_swap_limit = Some(bytes);
        self
    }

    pub fn with_build_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.build_args.insert(name.into(), value.into());
        self
    }

    pub fn with_auth_configs(mut self, auth_configs: AuthConfigs) -> Self {
        self.auth_configs = Some(auth_configs);
        self
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn dockerfile(&self) -> Option<&str> {
        self.dockerfile.as_deref()
    }

    pub fn no_cache(&self) -> bool {
        self.no_cache
    }

    pub fn remove_intermediate(&self) -> bool {
        self.remove_intermediate
    }

    pub fn force_remove(&self) -> bool {
        self.force_remove
    }

    pub fn pull(&self) -> bool {
        self.pull
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn memory_limit(&self) -> Option<i64> {
        self.memory_limit
    }

    pub fn memory_swap_limit(&self) -> Option<i64> {
        self.memory_swap_limit
    }

    pub fn build_args(&self) -> &BTreeMap<String, String> {
        &self.build_args
    }

    pub fn auth_configs(&self) -> Option<&AuthConfigs> {
        self.auth_configs.as_ref()
    }

    /// `repository[:tag]` for the engine's `t` parameter. A tag without a
    /// repository names nothing and is ignored.
    pub fn image_tag(&self) -> Option<String> {
        let repository = self.repository.as_ref()?;
        Some(match &self.tag {
            Some(tag) => format!("{}:{}", repository, tag),
            None => repository.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_tag_joins_repository_and_tag() {
        let params = BuildImageParams::from_directory("/ctx")
            .unwrap()
            .with_repository("user/app")
            .with_tag("v2");
        assert_eq!(params.image_tag().as_deref(), Some("user/app:v2"));
    }

    #[test]
    fn tag_without_repository_is_ignored() {
        let params = BuildImageParams::from_directory("/ctx").unwrap().with_tag("v2");
        assert_eq!(params.image_tag(), None);
    }

    #[test]
    fn empty_contexts_are_rejected() {
        assert!(BuildImageParams::from_directory("").is_err());
        assert!(BuildImageParams::from_remote("").is_err());
    }
}
