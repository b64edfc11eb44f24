//! File marker resolution.
//!
//! A host token of the form `file:<path>[@<key>]` names a small properties
//! file on the machine. The environment resolves when that file carries
//! `<key>=<environment>`. The key defaults to [`DEFAULT_KEY`].
//!
//! ```xml
//! <hosts env="L2">
//!   <host>file:/etc/deploy/marker.env@tier</host>
//! </hosts>
//! ```

use std::path::Path;

use tracing::{trace, warn};

use super::host::HostResolver;
use super::PropertiesFileParser;
use crate::matcher::FILE_PREFIX;

/// Key looked up when the token has no `@<key>` suffix.
pub const DEFAULT_KEY: &str = "environment";

/// Resolves environments from the content of a marker file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEnvironmentResolver;

impl FileEnvironmentResolver {
    /// Create a file marker resolver.
    pub fn new() -> Self {
        Self
    }

    /// Split a token into path and key. Returns `None` for non-file tokens.
    fn split_token(host: &str) -> Option<(&str, &str)> {
        let rest = host.strip_prefix(FILE_PREFIX)?;
        let (path, key) = match rest.split_once('@') {
            Some((path, key)) if !key.trim().is_empty() => (path, key.trim()),
            Some((path, _)) => (path, DEFAULT_KEY),
            None => (rest, DEFAULT_KEY),
        };
        if path.is_empty() {
            return None;
        }
        Some((path, key))
    }
}

impl HostResolver for FileEnvironmentResolver {
    const NAME: &'static str = "file-environment";

    fn resolves_host(&self, environment: &str, host: &str) -> bool {
        if environment.is_empty() {
            return false;
        }
        let Some((path, key)) = Self::split_token(host) else {
            return false;
        };

        let path = Path::new(path);
        if !path.is_file() {
            trace!("Marker {} is not a file", path.display());
            return false;
        }

        match PropertiesFileParser::load(path) {
            Ok(props) => props
                .get(key)
                .is_some_and(|value| value.eq_ignore_ascii_case(environment)),
            Err(e) => {
                warn!("Could not read marker {}: {}", path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{EnvironmentResolver, Resolution};
    use std::fs;
    use tempfile::TempDir;

    fn marker(temp: &TempDir, content: &str) -> String {
        let path = temp.path().join("deploy.env");
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    #[test]
    fn split_defaults_key() {
        assert_eq!(
            FileEnvironmentResolver::split_token("file:/a/b"),
            Some(("/a/b", "environment"))
        );
        assert_eq!(
            FileEnvironmentResolver::split_token("file:/a/b@"),
            Some(("/a/b", "environment"))
        );
        assert_eq!(
            FileEnvironmentResolver::split_token("file:/a/b@  "),
            Some(("/a/b", "environment"))
        );
    }

    #[test]
    fn split_on_first_at() {
        assert_eq!(
            FileEnvironmentResolver::split_token("file:/a/b@tier@x"),
            Some(("/a/b", "tier@x"))
        );
    }

    #[test]
    fn split_rejects_other_tokens() {
        assert_eq!(FileEnvironmentResolver::split_token("localhost"), None);
        assert_eq!(FileEnvironmentResolver::split_token("file:"), None);
        assert_eq!(FileEnvironmentResolver::split_token("file:@key"), None);
    }

    #[test]
    fn resolves_with_default_key() {
        let temp = TempDir::new().unwrap();
        let path = marker(&temp, "environment=L2\n");
        let token = format!("file:{}", path);

        let resolver = FileEnvironmentResolver::new();
        assert_eq!(
            resolver.resolve("L2", &[token.clone()]),
            Resolution::MatchedTo("L2".to_string())
        );
        assert_eq!(resolver.resolve("L1", &[token]), Resolution::NoMatch);
    }

    #[test]
    fn resolves_with_explicit_key_case_insensitively() {
        let temp = TempDir::new().unwrap();
        let path = marker(&temp, "# marker\ntier: prod\n");
        let token = format!("file:{}@tier", path);

        let resolver = FileEnvironmentResolver::new();
        assert!(resolver.resolve("PROD", &[token]).is_match());
    }

    #[test]
    fn missing_key_does_not_match() {
        let temp = TempDir::new().unwrap();
        let path = marker(&temp, "environment=L2\n");
        let token = format!("file:{}@tier", path);

        assert!(!FileEnvironmentResolver::new().resolve("L2", &[token]).is_match());
    }

    #[test]
    fn missing_file_and_directory_do_not_match() {
        let temp = TempDir::new().unwrap();
        let resolver = FileEnvironmentResolver::new();

        assert!(!resolver
            .resolve("L2", &["file:/not/exist/deploy.env".to_string()])
            .is_match());
        let dir = format!("file:{}", temp.path().display());
        assert!(!resolver.resolve("L2", &[dir]).is_match());
    }

    #[test]
    fn empty_environment_never_matches() {
        let temp = TempDir::new().unwrap();
        let path = marker(&temp, "environment=\n");
        let token = format!("file:{}", path);

        assert!(!FileEnvironmentResolver::new().resolves_host("", &token));
    }
}
