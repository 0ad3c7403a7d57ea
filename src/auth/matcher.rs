// ABOUTME: Strategy for matching a registry query against stored server addresses.
// ABOUTME: Substring matching is the compatible default; exact matching is opt-in.

/// How a registry name is compared with a credential's server address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistryMatch {
    /// Server address contains the registry as a substring.
    ///
    /// Registry URLs vary in scheme and path (`https://index.docker.io/v1/`
    /// vs `index.docker.io`), so a fragment is enough. Registries whose names
    /// contain one another can collide; the first stored match wins.
    #[default]
    Contains,
    /// Server address equals the registry exactly.
    Exact,
}

impl RegistryMatch {
    pub fn matches(self, server_address: &str, registry: &str) -> bool {
        match self {
            RegistryMatch::Contains => server_address.contains(registry),
            RegistryMatch::Exact => server_address == registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_accepts_fragments() {
        assert!(RegistryMatch::Contains.matches("https://index.docker.io/v1/", "index.docker.io"));
        assert!(RegistryMatch::Contains.matches("index.docker.io", "index.docker"));
        assert!(!RegistryMatch::Contains.matches("ghcr.io", "quay.io"));
    }

    #[test]
    fn exact_rejects_fragments() {
        assert!(RegistryMatch::Exact.matches("ghcr.io", "ghcr.io"));
        assert!(!RegistryMatch::Exact.matches("https://ghcr.io", "ghcr.io"));
    }
}
