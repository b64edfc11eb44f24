//! Error types for hostenv operations.
//!
//! This module defines [`HostenvError`], the single configuration-level error
//! type every fatal load failure is wrapped into, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Structural, markup and schema problems abort the parse; no partial model
//!   is handed back
//! - Ambiguous and unresolved environments abort the resolution; nothing is
//!   written to the property sink
//! - File-marker I/O problems are not errors at all: they are logged and the
//!   marker simply does not match
//! - Use `anyhow::Error` (via `HostenvError::Other`) for unexpected errors

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Core error type for hostenv operations.
#[derive(Debug, Error)]
pub enum HostenvError {
    /// The document does not have the expected element/attribute shape.
    #[error("Invalid configuration structure: {message}")]
    Structural { message: String },

    /// The markup itself could not be tokenized.
    #[error("Malformed configuration markup at byte {position}: {message}")]
    Markup { position: u64, message: String },

    /// The document targets a schema or namespace we do not know.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// More than one declared environment matches this host.
    #[error("Ambiguous environment, more than one matched: {}", describe_attempts(.attempts))]
    AmbiguousEnvironment {
        /// Every `(environment, hosts)` pair tried during the pass.
        attempts: Vec<(String, Vec<String>)>,
    },

    /// No declared environment matches this host.
    #[error("No host environment found for [{}]", .hosts.join(" "))]
    UnresolvedEnvironment {
        /// Every host token tried, across every environment.
        hosts: Vec<String>,
    },

    /// A resolution was read from a result that did not match.
    #[error("No resolution available")]
    NoResolution,

    /// Configuration document not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Loading the configuration document at `path` failed.
    #[error("Failed to load configuration at {path}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: Box<HostenvError>,
    },

    /// Failed to parse a load-options file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HostenvError {
    /// Build a structural error from anything displayable.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// Whether this error is one of the environment resolution failures.
    pub fn is_fatal_resolution(&self) -> bool {
        match self {
            Self::AmbiguousEnvironment { .. } | Self::UnresolvedEnvironment { .. } => true,
            Self::ConfigLoad { source, .. } => source.is_fatal_resolution(),
            _ => false,
        }
    }
}

impl From<quick_xml::Error> for HostenvError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(shared) => Self::Io(
                Arc::try_unwrap(shared)
                    .unwrap_or_else(|shared| std::io::Error::new(shared.kind(), shared.to_string())),
            ),
            other => Self::Markup {
                position: 0,
                message: other.to_string(),
            },
        }
    }
}

fn describe_attempts(attempts: &[(String, Vec<String>)]) -> String {
    attempts
        .iter()
        .map(|(env, hosts)| format!("{}=[{}]", env, hosts.join(" ")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for hostenv operations.
pub type Result<T> = std::result::Result<T, HostenvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_displays_message() {
        let err = HostenvError::structural("hosts[@env] attribute required");
        assert!(err.to_string().contains("hosts[@env] attribute required"));
    }

    #[test]
    fn markup_displays_position() {
        let err = HostenvError::Markup {
            position: 42,
            message: "unexpected end".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("unexpected end"));
    }

    #[test]
    fn ambiguous_lists_every_attempt() {
        let err = HostenvError::AmbiguousEnvironment {
            attempts: vec![
                ("0".into(), vec!["localhost".into()]),
                ("1".into(), vec!["/.*/".into(), "box-1".into()]),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("0=[localhost]"));
        assert!(msg.contains("1=[/.*/ box-1]"));
    }

    #[test]
    fn unresolved_lists_every_host() {
        let err = HostenvError::UnresolvedEnvironment {
            hosts: vec!["alpha".into(), "beta".into()],
        };
        assert_eq!(err.to_string(), "No host environment found for [alpha beta]");
    }

    #[test]
    fn config_load_keeps_cause() {
        let err = HostenvError::ConfigLoad {
            path: PathBuf::from("/etc/app.xml"),
            source: Box::new(HostenvError::UnresolvedEnvironment { hosts: vec![] }),
        };
        assert!(err.to_string().contains("/etc/app.xml"));
        assert!(err.is_fatal_resolution());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn structural_is_not_a_resolution_failure() {
        assert!(!HostenvError::structural("x").is_fatal_resolution());
        assert!(!HostenvError::NoResolution.is_fatal_resolution());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: HostenvError = io_err.into();
        assert!(matches!(err, HostenvError::Io(_)));
    }

    #[test]
    fn quick_xml_io_error_stays_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: HostenvError = quick_xml::Error::Io(Arc::new(io_err)).into();
        match err {
            HostenvError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn quick_xml_syntax_error_is_markup() {
        let err: HostenvError =
            quick_xml::Error::Syntax(quick_xml::errors::SyntaxError::UnclosedTag).into();
        assert!(matches!(err, HostenvError::Markup { .. }));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(HostenvError::NoResolution)
        }
        assert!(returns_error().is_err());
    }
}
