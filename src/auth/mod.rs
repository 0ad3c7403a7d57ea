// ABOUTME: Registry credential storage and auth header resolution.
// ABOUTME: Produces the X-Registry-Auth and X-Registry-Config header values.

mod credential;
mod matcher;
mod resolver;
mod store;

pub use credential::{AuthConfigs, Credential};
pub use matcher::RegistryMatch;
pub use resolver::{
    AuthConfigMap, AuthHeaderError, AuthHeaderUnit, AuthResolver, DEFAULT_REGISTRY,
    EMPTY_AUTH_HEADER, decode_auth_config_header, decode_auth_header,
};
pub use store::CredentialStore;
