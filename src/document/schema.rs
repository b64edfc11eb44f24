//! Document shape and the embedded schema resource.
//!
//! The accepted shape is encoded twice: as the XSD shipped under `schemas/`
//! (for editors and external validators) and as the transition table below,
//! which the parser actually runs.

use include_dir::{include_dir, Dir};

use super::markup::Attribute;
use crate::error::{HostenvError, Result};

/// Namespace of the 1.0.0 document format.
pub const NAMESPACE: &str = "urn:hostenv:runtime-configuration:1.0.0";

/// File name of the 1.0.0 schema resource.
pub const SCHEMA_FILE: &str = "runtime-configuration-1.0.0.xsd";

/// XML Schema instance namespace, bound to `xsi` in written documents.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Embedded schema directory.
static SCHEMAS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/schemas");

/// Parser position within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Before the root element.
    Start,
    /// Inside `configuration`.
    Root,
    /// Inside `context`.
    Context,
    /// Inside `hosts`.
    Hosts,
    /// Inside `host`.
    Host,
    /// Inside `property`.
    Property,
    /// Inside `value`.
    Value,
    /// After the root element closed.
    End,
}

impl State {
    /// Whether character data is collected in this state.
    pub fn accepts_text(self) -> bool {
        matches!(self, Self::Host | Self::Value)
    }
}

/// `(from, element, to)`: opening `element` while in `from` moves to `to`.
const TRANSITIONS: &[(State, &str, State)] = &[
    (State::Start, "configuration", State::Root),
    (State::Root, "context", State::Context),
    (State::Context, "hosts", State::Hosts),
    (State::Hosts, "host", State::Host),
    (State::Root, "property", State::Property),
    (State::Property, "value", State::Value),
];

/// Look up the state entered by opening `element` in `state`.
pub fn transition(state: State, element: &str) -> Option<State> {
    TRANSITIONS
        .iter()
        .find(|(from, name, _)| *from == state && *name == element)
        .map(|(_, _, to)| *to)
}

/// The element names allowed to open in `state`.
pub fn expected(state: State) -> Vec<&'static str> {
    TRANSITIONS
        .iter()
        .filter(|(from, _, _)| *from == state)
        .map(|(_, name, _)| *name)
        .collect()
}

/// Fetch an embedded schema by file name.
pub fn schema(name: &str) -> Option<&'static str> {
    SCHEMAS_DIR.get_file(name).and_then(|file| file.contents_utf8())
}

/// Names of every embedded schema.
pub fn schema_names() -> Vec<&'static str> {
    SCHEMAS_DIR
        .files()
        .filter_map(|file| file.path().file_name())
        .filter_map(|name| name.to_str())
        .collect()
}

/// Validate the namespace and schema location declared on the root element.
///
/// A root without a namespace is accepted. A declared default namespace must
/// be [`NAMESPACE`]. Every location named by `xsi:schemaLocation` must be an
/// embedded schema, matched on its final path segment.
pub fn check_root(attributes: &[Attribute]) -> Result<()> {
    if let Some(ns) = attributes
        .iter()
        .find(|attr| attr.prefix.is_none() && attr.name == "xmlns")
    {
        if ns.value.trim() != NAMESPACE {
            return Err(HostenvError::SchemaMismatch {
                message: format!("unknown namespace {}, expected {}", ns.value, NAMESPACE),
            });
        }
    }

    let location = attributes
        .iter()
        .find(|attr| !attr.is_namespace_declaration() && attr.name == "schemalocation");
    if let Some(location) = location {
        for file in schema_locations(&location.value) {
            let name = file.rsplit('/').next().unwrap_or(file);
            if schema(name).is_none() {
                return Err(HostenvError::SchemaMismatch {
                    message: format!("schema {} could not be resolved", file),
                });
            }
        }
    }

    Ok(())
}

/// Locations in an `xsi:schemaLocation` value.
///
/// The value is a list of namespace/location pairs. A lone token is taken
/// as a location.
fn schema_locations(value: &str) -> Vec<&str> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() == 1 {
        return tokens;
    }
    tokens.iter().skip(1).step_by(2).copied().collect()
}
