//! Local alias matching.

use super::HostMatcher;

/// Matches the loopback identities: `localhost` (any case), `127.0.0.1`
/// and `::1`.
///
/// These tokens match on every machine, production included.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAliasMatcher;

impl LocalAliasMatcher {
    /// Check a token against the loopback aliases.
    pub fn is_alias(host: &str) -> bool {
        host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1" || host == "::1"
    }
}

impl HostMatcher for LocalAliasMatcher {
    fn name(&self) -> &str {
        "local-alias"
    }

    fn matches(&self, host: &str) -> bool {
        !host.is_empty() && Self::is_alias(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_localhost_any_case() {
        assert!(LocalAliasMatcher.matches("localhost"));
        assert!(LocalAliasMatcher.matches("LocalHost"));
        assert!(LocalAliasMatcher.matches("LOCALHOST"));
    }

    #[test]
    fn matches_loopback_addresses() {
        assert!(LocalAliasMatcher.matches("127.0.0.1"));
        assert!(LocalAliasMatcher.matches("::1"));
    }

    #[test]
    fn rejects_other_hosts() {
        assert!(!LocalAliasMatcher.matches("127.0.0.2"));
        assert!(!LocalAliasMatcher.matches("localhost.localdomain"));
        assert!(!LocalAliasMatcher.matches(" localhost"));
        assert!(!LocalAliasMatcher.matches(""));
    }
}
