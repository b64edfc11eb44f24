//! In-memory form of a parsed configuration document.

use std::collections::BTreeMap;

use crate::error::{HostenvError, Result};

/// Environment name whose values apply wherever we run.
pub const GLOBAL_ENVIRONMENT: &str = "*";

/// Hosts and properties read from one document.
///
/// Both maps are ordered so that resolution and error messages are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentModel {
    hosts: BTreeMap<String, Vec<String>>,
    properties: BTreeMap<String, BTreeMap<String, String>>,
}

impl DocumentModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an environment with no hosts yet.
    ///
    /// A repeated declaration replaces the earlier host list.
    pub fn declare_environment(&mut self, environment: impl Into<String>) {
        let environment = environment.into();
        if self.hosts.insert(environment.clone(), Vec::new()).is_some() {
            tracing::warn!(
                "Environment {} declared more than once, keeping the last declaration",
                environment
            );
        }
    }

    /// Append a host token to a declared environment.
    pub fn add_host(&mut self, environment: &str, host: impl Into<String>) -> Result<()> {
        let hosts = self.hosts.get_mut(environment).ok_or_else(|| {
            HostenvError::structural(format!("host added to undeclared environment {}", environment))
        })?;
        hosts.push(host.into());
        Ok(())
    }

    /// Declare a property key with no values yet.
    ///
    /// A repeated declaration replaces the earlier values.
    pub fn declare_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.properties.insert(key.clone(), BTreeMap::new()).is_some() {
            tracing::debug!("Property {} declared more than once", key);
        }
    }

    /// Set the value of a declared key for one environment.
    pub fn set_value(
        &mut self,
        key: &str,
        environment: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let values = self.properties.get_mut(key).ok_or_else(|| {
            HostenvError::structural(format!("value added to undeclared property {}", key))
        })?;
        values.insert(environment.into(), value.into());
        Ok(())
    }

    /// Environment to host tokens.
    pub fn hosts(&self) -> &BTreeMap<String, Vec<String>> {
        &self.hosts
    }

    /// Property key to per-environment values.
    pub fn properties(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.properties
    }

    /// Host tokens declared for one environment.
    pub fn hosts_for(&self, environment: &str) -> Option<&[String]> {
        self.hosts.get(environment).map(Vec::as_slice)
    }

    /// The value of `key` for exactly `environment`, without global fallback.
    pub fn value(&self, key: &str, environment: &str) -> Option<&str> {
        self.properties
            .get(key)
            .and_then(|values| values.get(environment))
            .map(String::as_str)
    }

    /// Whether neither environments nor properties were declared.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.properties.is_empty()
    }
}
