//! Host matching.
//!
//! A [`HostMatcher`] answers one question about one host token: does it
//! identify the machine we are running on? Each variant understands one
//! token syntax and ignores the others:
//!
//! - [`LocalAliasMatcher`] - `localhost`, `127.0.0.1`, `::1`
//! - [`MachineHostMatcher`] - the machine's own host name or address
//! - [`PatternHostMatcher`] - `/regex/` tested against the host name
//! - [`FileExistsMatcher`] - `file:<path>` that exists on disk
//! - [`CompoundHostMatcher`] - an ordered chain of the above
//!
//! Every matcher returns `false` for an empty token.

pub mod compound;
pub mod file;
pub mod local;
pub mod machine;
pub mod pattern;

pub use compound::CompoundHostMatcher;
pub use file::{FileExistsMatcher, FILE_PREFIX};
pub use local::LocalAliasMatcher;
pub use machine::MachineHostMatcher;
pub use pattern::PatternHostMatcher;

/// Trait for host matching strategies.
pub trait HostMatcher: Send + Sync {
    /// The name of this matcher, used in log output.
    fn name(&self) -> &str;

    /// Check if the host token identifies this machine.
    fn matches(&self, host: &str) -> bool;
}

impl<M: HostMatcher + ?Sized> HostMatcher for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn matches(&self, host: &str) -> bool {
        (**self).matches(host)
    }
}

/// The matcher chain used when nothing else is configured: local aliases,
/// then machine identity, then host-name patterns.
pub fn default_matcher() -> CompoundHostMatcher {
    CompoundHostMatcher::new()
        .with(LocalAliasMatcher)
        .with(MachineHostMatcher::new())
        .with(PatternHostMatcher::new())
}
