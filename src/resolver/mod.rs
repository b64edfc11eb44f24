//! Environment resolution.
//!
//! An [`EnvironmentResolver`] decides whether a named environment, given the
//! host tokens declared for it, is the environment this process runs in. The
//! answer is a [`Resolution`]: either [`Resolution::NoMatch`] or
//! [`Resolution::MatchedTo`] carrying the environment name.
//!
//! Most strategies only need to look at one host token at a time; they
//! implement [`HostResolver`] and get the list iteration for free.
//!
//! The default chain is tried in this order:
//!
//! 1. Machine identity (`build-01.corp`, `10.4.3.121`)
//! 2. File marker content (`file:/etc/deploy.env@environment`)
//! 3. Host pattern against name and address (`/build-\d+\..*/`)
//! 4. Local aliases (`localhost`, `127.0.0.1`, `::1`)

pub mod compound;
pub mod file;
pub mod host;
pub mod properties_file;

pub use compound::CompoundEnvironmentResolver;
pub use file::FileEnvironmentResolver;
pub use host::{
    HostResolver, LocalAliasResolver, MachineHostResolver, MachinePatternResolver, MatcherResolver,
};
pub use properties_file::PropertiesFileParser;

use crate::error::{HostenvError, Result};

/// Outcome of asking a resolver about one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// None of the environment's hosts identify this machine.
    NoMatch,
    /// This machine belongs to the named environment.
    MatchedTo(String),
}

impl Resolution {
    /// Whether the resolver matched.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::MatchedTo(_))
    }

    /// The matched environment, if any.
    pub fn environment(&self) -> Option<&str> {
        match self {
            Self::MatchedTo(env) => Some(env),
            Self::NoMatch => None,
        }
    }

    /// The matched environment, or [`HostenvError::NoResolution`] when asked
    /// of a result that did not match.
    pub fn resolves_to(&self) -> Result<&str> {
        self.environment().ok_or(HostenvError::NoResolution)
    }
}

/// Trait for environment resolution strategies.
pub trait EnvironmentResolver: Send + Sync {
    /// The name of this resolver, used in log output.
    fn name(&self) -> &str;

    /// Decide whether `environment`, declared with `hosts`, is where we run.
    fn resolve(&self, environment: &str, hosts: &[String]) -> Resolution;
}

/// The resolver chain used when nothing else is configured.
pub fn default_resolver() -> CompoundEnvironmentResolver {
    CompoundEnvironmentResolver::new()
        .with(MachineHostResolver::new())
        .with(FileEnvironmentResolver::new())
        .with(MachinePatternResolver::new())
        .with(LocalAliasResolver::new())
}
