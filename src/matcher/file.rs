//! File-marker matching.

use std::path::Path;

use super::HostMatcher;

/// Prefix that marks a host token as a filesystem path.
pub const FILE_PREFIX: &str = "file:";

/// Matches `file:<path>` tokens whose path exists on this machine.
///
/// ```xml
/// <context>
///   <hosts env="TEST">
///     <host>file:/etc/deploy/test.env</host>
///   </hosts>
///   <hosts env="PROD">
///     <host>file:/etc/deploy/prod.env</host>
///   </hosts>
/// </context>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExistsMatcher;

impl HostMatcher for FileExistsMatcher {
    fn name(&self) -> &str {
        "file-exists"
    }

    fn matches(&self, host: &str) -> bool {
        match host.strip_prefix(FILE_PREFIX) {
            Some(path) if !path.is_empty() => Path::new(path).exists(),
            _ => false,
        }
    }
}
