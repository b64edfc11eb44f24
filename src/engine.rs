//! Environment resolution and value selection.
//!
//! The engine asks a resolver about every environment declared in a
//! [`DocumentModel`]. Exactly one distinct environment must match; its values
//! (or global `*` values) become the resolved properties.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::writer::unescape_delimiters;
use crate::document::{DocumentModel, GLOBAL_ENVIRONMENT};
use crate::error::{HostenvError, Result};
use crate::resolver::{default_resolver, EnvironmentResolver, Resolution};
use crate::sink::PropertySink;

/// How a value is picked for the resolved environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// A global `*` value wins; the environment's own value is the fallback.
    #[default]
    GlobalFirst,
    /// Only the environment's own value is used; `*` is ignored.
    EnvironmentOnly,
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global-first" => Ok(Self::GlobalFirst),
            "environment-only" => Ok(Self::EnvironmentOnly),
            _ => Err(format!("unknown selection policy: {}", s)),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalFirst => write!(f, "global-first"),
            Self::EnvironmentOnly => write!(f, "environment-only"),
        }
    }
}

impl SelectionPolicy {
    /// Pick the value for `environment` out of one key's per-environment map.
    pub fn select<'a>(
        self,
        values: &'a BTreeMap<String, String>,
        environment: &str,
    ) -> Option<&'a str> {
        let own = values.get(environment);
        let chosen = match self {
            Self::GlobalFirst => values.get(GLOBAL_ENVIRONMENT).or(own),
            Self::EnvironmentOnly => own,
        };
        chosen.map(String::as_str)
    }
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProperties {
    /// The environment this machine resolved to.
    pub environment: String,
    /// Selected values, trimmed and with list delimiters decoded.
    pub properties: BTreeMap<String, String>,
}

impl ResolvedProperties {
    /// Value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Number of resolved keys.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether no key resolved.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Hand every pair to a sink.
    pub fn apply<S: PropertySink + ?Sized>(&self, sink: &mut S) {
        for (key, value) in &self.properties {
            sink.add(key, value);
        }
    }
}

/// Resolves a document against this machine.
pub struct ResolutionEngine {
    resolver: Box<dyn EnvironmentResolver>,
    policy: SelectionPolicy,
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolutionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionEngine")
            .field("resolver", &self.resolver.name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl ResolutionEngine {
    /// Engine with the default resolver chain and policy.
    pub fn new() -> Self {
        Self::with_resolver(default_resolver())
    }

    /// Engine with a custom resolver.
    pub fn with_resolver(resolver: impl EnvironmentResolver + 'static) -> Self {
        Self::with_boxed_resolver(Box::new(resolver))
    }

    /// Engine with an already boxed resolver.
    pub fn with_boxed_resolver(resolver: Box<dyn EnvironmentResolver>) -> Self {
        Self {
            resolver,
            policy: SelectionPolicy::default(),
        }
    }

    /// Set the selection policy, builder style.
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The selection policy in use.
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Find the one environment this machine belongs to.
    ///
    /// Every declared environment is tried. Fails with
    /// [`HostenvError::AmbiguousEnvironment`] if two different environments
    /// match and [`HostenvError::UnresolvedEnvironment`] if none does.
    pub fn resolve_environment(&self, model: &DocumentModel) -> Result<String> {
        let mut candidate: Option<String> = None;
        let mut ambiguous = false;
        let mut attempts = Vec::with_capacity(model.hosts().len());

        for (environment, hosts) in model.hosts() {
            debug!("Trying environment {} with hosts [{}]", environment, hosts.join(" "));
            attempts.push((environment.clone(), hosts.clone()));

            if let Resolution::MatchedTo(matched) = self.resolver.resolve(environment, hosts) {
                match &candidate {
                    None => candidate = Some(matched),
                    Some(existing) if *existing != matched => {
                        debug!("Environment {} also matches after {}", matched, existing);
                        ambiguous = true;
                    }
                    Some(_) => {}
                }
            }
        }

        if ambiguous {
            return Err(HostenvError::AmbiguousEnvironment { attempts });
        }

        match candidate {
            Some(environment) => {
                info!("Resolved host environment {}", environment);
                Ok(environment)
            }
            None => Err(HostenvError::UnresolvedEnvironment {
                hosts: attempts.into_iter().flat_map(|(_, hosts)| hosts).collect(),
            }),
        }
    }

    /// Resolve the environment and select a value for every key.
    pub fn resolve(&self, model: &DocumentModel) -> Result<ResolvedProperties> {
        let environment = self.resolve_environment(model)?;
        let mut properties = BTreeMap::new();

        for (key, values) in model.properties() {
            match self.policy.select(values, &environment) {
                Some(value) => {
                    properties.insert(key.clone(), unescape_delimiters(value.trim()));
                }
                None => debug!("No value for {} in environment {}", key, environment),
            }
        }

        Ok(ResolvedProperties {
            environment,
            properties,
        })
    }

    /// Resolve and write the result into `sink`.
    ///
    /// The sink is untouched unless resolution succeeds. Returns the resolved
    /// environment.
    pub fn resolve_into<S: PropertySink + ?Sized>(
        &self,
        model: &DocumentModel,
        sink: &mut S,
    ) -> Result<String> {
        let resolved = self.resolve(model)?;
        resolved.apply(sink);
        Ok(resolved.environment)
    }
}
