//! Ordered resolver chains.

use super::{EnvironmentResolver, Resolution};

/// Tries several [`EnvironmentResolver`]s in insertion order.
///
/// The first resolver that matches decides the outcome. Empty slots (from
/// [`push_optional`](Self::push_optional)) are skipped.
#[derive(Default)]
pub struct CompoundEnvironmentResolver {
    resolvers: Vec<Option<Box<dyn EnvironmentResolver>>>,
}

impl CompoundEnvironmentResolver {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Append a resolver, builder style.
    pub fn with(mut self, resolver: impl EnvironmentResolver + 'static) -> Self {
        self.push(resolver);
        self
    }

    /// Append a resolver.
    pub fn push(&mut self, resolver: impl EnvironmentResolver + 'static) -> &mut Self {
        self.resolvers.push(Some(Box::new(resolver)));
        self
    }

    /// Append a slot that may be empty.
    pub fn push_optional(&mut self, resolver: Option<Box<dyn EnvironmentResolver>>) -> &mut Self {
        self.resolvers.push(resolver);
        self
    }

    /// Append several boxed resolvers.
    pub fn extend(
        &mut self,
        resolvers: impl IntoIterator<Item = Box<dyn EnvironmentResolver>>,
    ) -> &mut Self {
        self.resolvers.extend(resolvers.into_iter().map(Some));
        self
    }

    /// Remove every resolver.
    pub fn clear(&mut self) -> &mut Self {
        self.resolvers.clear();
        self
    }

    /// Number of slots in the chain, empty ones included.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Whether the chain has no slots.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Names of the present resolvers, in order.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().flatten().map(|r| r.name()).collect()
    }
}

impl std::fmt::Debug for CompoundEnvironmentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompoundEnvironmentResolver")
            .field("resolvers", &self.names())
            .finish()
    }
}

impl EnvironmentResolver for CompoundEnvironmentResolver {
    fn name(&self) -> &str {
        "compound"
    }

    fn resolve(&self, environment: &str, hosts: &[String]) -> Resolution {
        for resolver in self.resolvers.iter().flatten() {
            let resolution = resolver.resolve(environment, hosts);
            if resolution.is_match() {
                tracing::debug!("Environment {} resolved by {}", environment, resolver.name());
                return resolution;
            }
        }
        Resolution::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Resolves when a fixed token is listed, counting calls.
    struct Fixed {
        name: &'static str,
        token: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn new(name: &'static str, token: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    name,
                    token,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl EnvironmentResolver for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn resolve(&self, environment: &str, hosts: &[String]) -> Resolution {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if hosts.iter().any(|h| h == self.token) {
                Resolution::MatchedTo(environment.to_string())
            } else {
                Resolution::NoMatch
            }
        }
    }

    fn hosts(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn empty_chain_never_matches() {
        let chain = CompoundEnvironmentResolver::new();
        assert!(chain.is_empty());
        assert_eq!(chain.resolve("L1", &hosts(&["localhost"])), Resolution::NoMatch);
    }

    #[test]
    fn stops_at_first_success() {
        let (first, first_calls) = Fixed::new("first", "a");
        let (second, second_calls) = Fixed::new("second", "b");
        let chain = CompoundEnvironmentResolver::new().with(first).with(second);

        assert!(chain.resolve("L1", &hosts(&["a", "b"])).is_match());
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);

        assert!(chain.resolve("L1", &hosts(&["b"])).is_match());
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);

        assert!(!chain.resolve("L1", &hosts(&["c"])).is_match());
    }

    #[test]
    fn keeps_insertion_order() {
        let (first, _) = Fixed::new("first", "a");
        let (second, _) = Fixed::new("second", "b");
        let chain = CompoundEnvironmentResolver::new().with(second).with(first);
        assert_eq!(chain.names(), vec!["second", "first"]);
    }

    #[test]
    fn skips_empty_slots() {
        let (fixed, calls) = Fixed::new("fixed", "a");
        let mut chain = CompoundEnvironmentResolver::new();
        chain.push_optional(None);
        chain.push_optional(Some(Box::new(fixed)));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.names(), vec!["fixed"]);
        assert_eq!(
            chain.resolve("L1", &hosts(&["a"])),
            Resolution::MatchedTo("L1".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_and_extend() {
        let (fixed, _) = Fixed::new("fixed", "a");
        let mut chain = CompoundEnvironmentResolver::new();
        chain.extend(vec![Box::new(fixed) as Box<dyn EnvironmentResolver>]);
        assert!(chain.resolve("L1", &hosts(&["a"])).is_match());

        chain.clear();
        assert!(chain.is_empty());
        assert!(!chain.resolve("L1", &hosts(&["a"])).is_match());
    }
}
