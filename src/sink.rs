//! Property sinks and sources.
//!
//! Resolved properties are handed to a [`PropertySink`]; the template writer
//! reads existing pairs from a [`PropertySource`]. Both are implemented for
//! the standard map types.

use std::collections::{BTreeMap, HashMap};

/// Receives resolved key/value pairs.
pub trait PropertySink {
    /// Add one property. Later additions of the same key replace earlier ones.
    fn add(&mut self, key: &str, value: &str);
}

/// Supplies key/value pairs to serialize.
pub trait PropertySource {
    /// Iterate over every pair.
    fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;
}

impl PropertySink for BTreeMap<String, String> {
    fn add(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl PropertySink for HashMap<String, String> {
    fn add(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Pairs come out in arbitrary order.
impl PropertySource for HashMap<String, String> {
    fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}
