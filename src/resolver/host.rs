//! Per-host resolution strategies.

use super::{EnvironmentResolver, Resolution};
use crate::machine::MachineIdentity;
use crate::matcher::{HostMatcher, LocalAliasMatcher, MachineHostMatcher, PatternHostMatcher};

/// A resolution strategy that inspects one host token at a time.
///
/// Implementors get [`EnvironmentResolver`] through a blanket impl: the host
/// list is walked in declaration order and the first token for which
/// [`resolves_host`](HostResolver::resolves_host) returns `true` resolves the
/// environment.
pub trait HostResolver: Send + Sync {
    /// Name used in log output.
    const NAME: &'static str;

    /// Check whether a single host token places us in `environment`.
    fn resolves_host(&self, environment: &str, host: &str) -> bool;
}

impl<R: HostResolver> EnvironmentResolver for R {
    fn name(&self) -> &str {
        R::NAME
    }

    fn resolve(&self, environment: &str, hosts: &[String]) -> Resolution {
        match hosts
            .iter()
            .find(|host| self.resolves_host(environment, host))
        {
            Some(host) => {
                tracing::trace!("{} resolved {} via host {}", R::NAME, environment, host);
                Resolution::MatchedTo(environment.to_string())
            }
            None => Resolution::NoMatch,
        }
    }
}

/// Resolves environments listing the machine's own host name or address.
#[derive(Debug, Clone, Default)]
pub struct MachineHostResolver {
    matcher: MachineHostMatcher,
}

impl MachineHostResolver {
    /// Resolve against the process-wide machine identity.
    pub fn new() -> Self {
        Self {
            matcher: MachineHostMatcher::new(),
        }
    }

    /// Resolve against a fixed identity (for testing).
    pub fn with_identity(identity: MachineIdentity) -> Self {
        Self {
            matcher: MachineHostMatcher::with_identity(identity),
        }
    }
}

impl HostResolver for MachineHostResolver {
    const NAME: &'static str = "machine-host";

    fn resolves_host(&self, _environment: &str, host: &str) -> bool {
        self.matcher.matches(host)
    }
}

/// Resolves environments listing a `/regex/` that matches the machine's host
/// name or host address.
#[derive(Debug, Clone)]
pub struct MachinePatternResolver {
    matcher: PatternHostMatcher,
}

impl MachinePatternResolver {
    /// Resolve against the process-wide machine identity.
    pub fn new() -> Self {
        Self {
            matcher: PatternHostMatcher::strict(),
        }
    }

    /// Resolve against a fixed identity (for testing).
    pub fn with_identity(identity: MachineIdentity) -> Self {
        Self {
            matcher: PatternHostMatcher::strict_with_identity(identity),
        }
    }
}

impl Default for MachinePatternResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HostResolver for MachinePatternResolver {
    const NAME: &'static str = "machine-pattern";

    fn resolves_host(&self, _environment: &str, host: &str) -> bool {
        self.matcher.matches(host)
    }
}

/// Resolves environments listing `localhost`, `127.0.0.1` or `::1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAliasResolver;

impl LocalAliasResolver {
    /// Create a local alias resolver.
    pub fn new() -> Self {
        Self
    }
}

impl HostResolver for LocalAliasResolver {
    const NAME: &'static str = "local-alias";

    fn resolves_host(&self, _environment: &str, host: &str) -> bool {
        LocalAliasMatcher.matches(host)
    }
}

/// Exposes any [`HostMatcher`] through the resolver contract.
#[derive(Debug, Clone, Default)]
pub struct MatcherResolver<M> {
    matcher: M,
}

impl<M: HostMatcher> MatcherResolver<M> {
    /// Wrap a matcher.
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    /// The wrapped matcher.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }
}

impl<M: HostMatcher> HostResolver for MatcherResolver<M> {
    const NAME: &'static str = "host-matcher";

    fn resolves_host(&self, _environment: &str, host: &str) -> bool {
        self.matcher.matches(host)
    }
}
