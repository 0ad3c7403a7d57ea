// ABOUTME: Process-wide registry credential store, read-only after construction.
// ABOUTME: Answers exact and substring lookups in stored order.

use super::credential::Credential;
use super::matcher::RegistryMatch;

static ANONYMOUS: Credential = Credential::anonymous();

/// Registry credentials loaded once at startup.
///
/// Stored order is significant: substring lookups return the first match.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    default: Option<Credential>,
    credentials: Vec<Credential>,
}

impl CredentialStore {
    pub fn new(default: Option<Credential>, credentials: Vec<Credential>) -> Self {
        Self {
            default,
            credentials,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Credential used when no registry is named. Anonymous if none is configured.
    pub fn default_credential(&self) -> &Credential {
        self.default.as_ref().unwrap_or(&ANONYMOUS)
    }

    /// Exact match on server address.
    pub fn lookup_by_address(&self, address: &str) -> Option<&Credential> {
        self.lookup(address, RegistryMatch::Exact)
    }

    /// First stored credential whose server address contains `fragment`.
    pub fn lookup_by_registry_contains(&self, fragment: &str) -> Option<&Credential> {
        self.lookup(fragment, RegistryMatch::Contains)
    }

    pub fn lookup(&self, registry: &str, rule: RegistryMatch) -> Option<&Credential> {
        self.credentials
            .iter()
            .find(|c| rule.matches(c.server_address(), registry))
    }

    pub fn all_credentials(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
