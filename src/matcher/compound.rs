//! Ordered matcher chains.

use super::HostMatcher;

/// Combines several [`HostMatcher`]s into one.
///
/// Matchers are tried in insertion order and the first match wins. An empty
/// chain matches nothing.
#[derive(Default)]
pub struct CompoundHostMatcher {
    matchers: Vec<Box<dyn HostMatcher>>,
}

impl CompoundHostMatcher {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Append a matcher, builder style.
    pub fn with(mut self, matcher: impl HostMatcher + 'static) -> Self {
        self.push(matcher);
        self
    }

    /// Append a matcher.
    pub fn push(&mut self, matcher: impl HostMatcher + 'static) -> &mut Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Append several boxed matchers.
    pub fn extend(&mut self, matchers: impl IntoIterator<Item = Box<dyn HostMatcher>>) -> &mut Self {
        self.matchers.extend(matchers);
        self
    }

    /// Remove every matcher.
    pub fn clear(&mut self) -> &mut Self {
        self.matchers.clear();
        self
    }

    /// Number of matchers in the chain.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl std::fmt::Debug for CompoundHostMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.matchers.iter().map(|m| m.name()).collect();
        f.debug_struct("CompoundHostMatcher")
            .field("matchers", &names)
            .finish()
    }
}

impl HostMatcher for CompoundHostMatcher {
    fn name(&self) -> &str {
        "compound"
    }

    fn matches(&self, host: &str) -> bool {
        self.matchers.iter().any(|matcher| {
            let matched = matcher.matches(host);
            if matched {
                tracing::trace!("Host {} matched by {}", host, matcher.name());
            }
            matched
        })
    }
}
