//! Load options.
//!
//! Which resolvers run, in which order, and how values are selected can be
//! set from a small YAML file:
//!
//! ```yaml
//! resolvers: [machine, file, pattern, local]
//! policy: global-first
//! template_host: localhost
//! ```
//!
//! Every field is optional; missing fields take the defaults shown above.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::writer::{TemplateWriter, DEFAULT_TEMPLATE_HOST};
use crate::engine::{ResolutionEngine, SelectionPolicy};
use crate::error::{HostenvError, Result};
use crate::resolver::{
    CompoundEnvironmentResolver, EnvironmentResolver, FileEnvironmentResolver, LocalAliasResolver,
    MachineHostResolver, MachinePatternResolver,
};

/// A resolver that can be named in load options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Machine host name or address.
    Machine,
    /// `file:` marker content.
    File,
    /// `/regex/` against host name and address.
    Pattern,
    /// `localhost` and loopback addresses.
    Local,
}

impl ResolverKind {
    /// Build the resolver this kind names.
    pub fn build(self) -> Box<dyn EnvironmentResolver> {
        match self {
            Self::Machine => Box::new(MachineHostResolver::new()),
            Self::File => Box::new(FileEnvironmentResolver::new()),
            Self::Pattern => Box::new(MachinePatternResolver::new()),
            Self::Local => Box::new(LocalAliasResolver::new()),
        }
    }
}

/// Options for loading a runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Resolver chain, tried in order.
    pub resolvers: Vec<ResolverKind>,

    /// Value selection policy.
    pub policy: SelectionPolicy,

    /// Host token written into templates.
    pub template_host: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            resolvers: vec![
                ResolverKind::Machine,
                ResolverKind::File,
                ResolverKind::Pattern,
                ResolverKind::Local,
            ],
            policy: SelectionPolicy::default(),
            template_host: DEFAULT_TEMPLATE_HOST.to_string(),
        }
    }
}

impl LoadOptions {
    /// Parse options from YAML text. Empty text yields the defaults.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| HostenvError::SettingsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load options from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HostenvError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content, path)
    }

    /// Load options from a file if given, else use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Build the configured resolver chain.
    pub fn resolver(&self) -> CompoundEnvironmentResolver {
        let mut chain = CompoundEnvironmentResolver::new();
        chain.extend(self.resolvers.iter().map(|kind| kind.build()));
        chain
    }

    /// Build an engine with the configured chain and policy.
    pub fn engine(&self) -> ResolutionEngine {
        ResolutionEngine::with_resolver(self.resolver()).with_policy(self.policy)
    }

    /// Build a template writer bound to the configured host.
    pub fn template_writer(&self) -> TemplateWriter {
        TemplateWriter::with_host(self.template_host.clone())
    }
}
