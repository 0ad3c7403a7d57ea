// ABOUTME: Registry credential value type and the per-call credential set.
// ABOUTME: AuthConfigs keeps insertion order so first-match lookups are stable.

use std::fmt;

/// Username/password pair for one registry server address.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential {
    server_address: String,
    username: String,
    password: String,
}

impl Credential {
    pub fn new(
        server_address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server_address: server_address.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Credential that is not bound to any registry.
    pub fn unbound(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(String::new(), username, password)
    }

    /// Credential with no server address, username or password.
    pub const fn anonymous() -> Self {
        Self {
            server_address: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// True when there is nothing to authenticate with.
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("server_address", &self.server_address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credentials supplied for a single operation, keyed by server address.
///
/// Inserting an address that is already present replaces the credential in
/// place, so the original position is kept for first-match lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AuthConfigs {
    entries: Vec<Credential>,
}

impl AuthConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, credential: Credential) -> Self {
        self.insert(credential);
        self
    }

    pub fn insert(&mut self, credential: Credential) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.server_address == credential.server_address)
        {
            Some(existing) => *existing = credential,
            None => self.entries.push(credential),
        }
    }

    pub fn get(&self, server_address: &str) -> Option<&Credential> {
        self.entries
            .iter()
            .find(|c| c.server_address == server_address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Credential> for AuthConfigs {
    fn from_iter<I: IntoIterator<Item = Credential>>(iter: I) -> Self {
        let mut configs = Self::new();
        for credential in iter {
            configs.insert(credential);
        }
        configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let cred = Credential::new("ghcr.io", "bot", "hunter2");
        let rendered = format!("{:?}", cred);
        assert!(rendered.contains("bot"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let configs = AuthConfigs::new()
            .with(Credential::new("a.io", "first", "x"))
            .with(Credential::new("b.io", "second", "y"))
            .with(Credential::new("a.io", "replaced", "z"));

        let users: Vec<_> = configs.iter().map(Credential::username).collect();
        assert_eq!(users, ["replaced", "second"]);
        assert_eq!(configs.len(), 2);
    }

    #[test]
    fn anonymous_has_no_secrets() {
        assert!(Credential::anonymous().is_anonymous());
        assert!(!Credential::unbound("u", "").is_anonymous());
    }
}
