//! Machine identity matching.

use super::HostMatcher;
use crate::machine::{self, MachineIdentity};

/// Matches the machine's own host name or address, e.g. `192.168.56.1` or
/// `xenon-company.com`. Comparison ignores case.
#[derive(Debug, Clone, Default)]
pub struct MachineHostMatcher {
    identity: Option<MachineIdentity>,
}

impl MachineHostMatcher {
    /// Match against the process-wide machine identity.
    pub fn new() -> Self {
        Self { identity: None }
    }

    /// Match against a fixed identity (for testing).
    pub fn with_identity(identity: MachineIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    fn identity(&self) -> &MachineIdentity {
        self.identity.as_ref().unwrap_or_else(|| machine::identity())
    }
}

impl HostMatcher for MachineHostMatcher {
    fn name(&self) -> &str {
        "machine-host"
    }

    fn matches(&self, host: &str) -> bool {
        self.identity().is_named(host)
    }
}
