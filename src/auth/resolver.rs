// ABOUTME: Precedence-ordered resolution of registry auth headers.
// ABOUTME: Encodes credentials as base64 JSON for the engine's auth headers.

use super::credential::{AuthConfigs, Credential};
use super::matcher::RegistryMatch;
use super::store::CredentialStore;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry name that selects the store's default credential.
pub const DEFAULT_REGISTRY: &str = "";

/// Header value for "no credentials": base64 of `{}`.
pub const EMPTY_AUTH_HEADER: &str = "e30=";

/// Body of an `X-Registry-Auth` header. Never carries the server address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthHeaderUnit {
    pub username: String,
    pub password: String,
}

impl From<&Credential> for AuthHeaderUnit {
    fn from(credential: &Credential) -> Self {
        Self {
            username: credential.username().to_string(),
            password: credential.password().to_string(),
        }
    }
}

/// Body of an `X-Registry-Config` header, keyed by server address.
pub type AuthConfigMap = BTreeMap<String, AuthHeaderUnit>;

/// Errors from decoding a header value produced elsewhere.
#[derive(Debug, thiserror::Error)]
pub enum AuthHeaderError {
    #[error("auth header is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("auth header is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolves auth headers from per-call credentials and the process store.
///
/// Lookup order for a single registry: the default credential when the
/// registry is [`DEFAULT_REGISTRY`], then per-call credentials, then the
/// store. Nothing found encodes as `{}`. Resolution never fails.
#[derive(Debug, Clone)]
pub struct AuthResolver {
    store: Arc<CredentialStore>,
    registry_match: RegistryMatch,
}

impl AuthResolver {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self {
            store,
            registry_match: RegistryMatch::default(),
        }
    }

    /// Replace the matching rule used by [`resolve_auth_header`](Self::resolve_auth_header).
    pub fn with_match(mut self, registry_match: RegistryMatch) -> Self {
        self.registry_match = registry_match;
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// `X-Registry-Auth` value for a registry name or fragment.
    pub fn resolve_auth_header(&self, registry: &str, per_call: Option<&AuthConfigs>) -> String {
        self.resolve_with(registry, per_call, self.registry_match)
    }

    /// `X-Registry-Auth` value for an exact server address.
    pub fn resolve_auth_header_by_address(
        &self,
        server_address: &str,
        per_call: Option<&AuthConfigs>,
    ) -> String {
        self.resolve_with(server_address, per_call, RegistryMatch::Exact)
    }

    /// `X-Registry-Config` value covering every known registry.
    ///
    /// Per-call credentials replace stored ones for the same server address.
    pub fn resolve_auth_config_header(&self, per_call: Option<&AuthConfigs>) -> String {
        let mut map = AuthConfigMap::new();
        for credential in self.store.all_credentials() {
            map.insert(credential.server_address().to_string(), credential.into());
        }
        for credential in per_call.into_iter().flat_map(|configs| configs.iter()) {
            map.insert(credential.server_address().to_string(), credential.into());
        }
        encode_json(&map)
    }

    fn resolve_with(
        &self,
        registry: &str,
        per_call: Option<&AuthConfigs>,
        rule: RegistryMatch,
    ) -> String {
        if registry == DEFAULT_REGISTRY {
            return encode_credential(Some(self.store.default_credential()));
        }

        let found = per_call
            .and_then(|configs| {
                configs
                    .iter()
                    .find(|c| rule.matches(c.server_address(), registry))
            })
            .or_else(|| self.store.lookup(registry, rule));

        encode_credential(found)
    }
}

fn encode_credential(credential: Option<&Credential>) -> String {
    match credential {
        Some(credential) if !credential.is_anonymous() => {
            encode_json(&AuthHeaderUnit::from(credential))
        }
        _ => EMPTY_AUTH_HEADER.to_string(),
    }
}

fn encode_json<T: Serialize>(value: &T) -> String {
    // Plain string fields and string-keyed maps always serialize.
    match serde_json::to_vec(value) {
        Ok(json) => BASE64.encode(json),
        Err(_) => EMPTY_AUTH_HEADER.to_string(),
    }
}

/// Decode an `X-Registry-Auth` value. `{}` decodes to empty username and password.
pub fn decode_auth_header(value: &str) -> Result<AuthHeaderUnit, AuthHeaderError> {
    #[derive(Deserialize)]
    struct Partial {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    }

    let bytes = BASE64.decode(value)?;
    let partial: Partial = serde_json::from_slice(&bytes)?;
    Ok(AuthHeaderUnit {
        username: partial.username,
        password: partial.password,
    })
}

/// Decode an `X-Registry-Config` value.
pub fn decode_auth_config_header(value: &str) -> Result<AuthConfigMap, AuthHeaderError> {
    let bytes = BASE64.decode(value)?;
    Ok(serde_json::from_slice(&bytes)?)
}
