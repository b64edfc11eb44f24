//! Host-name pattern matching.

use regex::Regex;

use super::HostMatcher;
use crate::machine::{self, MachineIdentity};

/// Matches `/regex/` tokens against the machine's host name.
///
/// The pattern must match the whole host name. For host `xenon-company1.com`:
///
/// - `/xenon.+/` matches
/// - `/xenon-company[\d].+/` matches
/// - `/xenon-company[2].+/` does not
///
/// The strict variant also tests the pattern against the host address.
#[derive(Debug, Clone, Default)]
pub struct PatternHostMatcher {
    identity: Option<MachineIdentity>,
    strict: bool,
}

impl PatternHostMatcher {
    /// Match patterns against the process-wide host name.
    pub fn new() -> Self {
        Self {
            identity: None,
            strict: false,
        }
    }

    /// Match patterns against the process-wide host name and address.
    pub fn strict() -> Self {
        Self {
            identity: None,
            strict: true,
        }
    }

    /// Match patterns against a fixed host name (for testing).
    pub fn with_identity(identity: MachineIdentity) -> Self {
        Self {
            identity: Some(identity),
            strict: false,
        }
    }

    /// Match patterns against a fixed host name and address (for testing).
    pub fn strict_with_identity(identity: MachineIdentity) -> Self {
        Self {
            identity: Some(identity),
            strict: true,
        }
    }

    fn identity(&self) -> &MachineIdentity {
        self.identity.as_ref().unwrap_or_else(|| machine::identity())
    }
}

impl HostMatcher for PatternHostMatcher {
    fn name(&self) -> &str {
        if self.strict {
            "machine-pattern-strict"
        } else {
            "machine-pattern"
        }
    }

    fn matches(&self, host: &str) -> bool {
        let Some(pattern) = host_pattern(host) else {
            return false;
        };

        let identity = self.identity();
        pattern.is_match(&identity.host_name)
            || (self.strict && pattern.is_match(&identity.host_address))
    }
}

/// Compile a slash-delimited host token into an anchored regex.
///
/// Returns `None` for tokens that are not of the `/pattern/` form and for
/// patterns that fail to compile (the latter is logged).
pub(crate) fn host_pattern(host: &str) -> Option<Regex> {
    let inner = host.strip_prefix('/')?.strip_suffix('/')?;

    // The bare pattern must compile on its own before it is anchored, or
    // unbalanced groups could escape the wrapper.
    let anchored = Regex::new(inner).and_then(|_| Regex::new(&format!("^(?:{})$", inner)));
    match anchored {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!("Ignoring invalid host pattern {}: {}", host, e);
            None
        }
    }
}
