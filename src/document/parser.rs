//! Streaming document parser.
//!
//! Markup events drive a small state machine. Which element may open where
//! is decided by [`schema::transition`]; this module carries out the action
//! attached to each transition and builds the [`DocumentModel`].

use std::io::BufRead;

use quick_xml::escape::escape;
use tracing::trace;

use super::markup::{MarkupEvent, MarkupReader};
use super::model::DocumentModel;
use super::schema::{self, State};
use crate::error::{HostenvError, Result};

/// Parse a complete document from a buffered stream.
///
/// Any structural, markup or schema problem aborts the parse; no partial
/// model is returned.
pub fn parse_document<R: BufRead>(source: R) -> Result<DocumentModel> {
    let mut parser = DocumentParser::new();
    for event in MarkupReader::new(source) {
        parser.handle(event?)?;
    }
    parser.finish()
}

/// Parse a complete document held in memory.
pub fn parse_str(content: &str) -> Result<DocumentModel> {
    parse_document(content.as_bytes())
}

/// Event-at-a-time parser state.
#[derive(Debug, Default)]
pub struct DocumentParser {
    model: DocumentModel,
    stack: Vec<State>,
    root_closed: bool,
    context_seen: bool,
    property_seen: bool,
    environment: Option<String>,
    key: Option<String>,
    value_environment: Option<String>,
    values_in_property: usize,
    text: String,
}

impl DocumentParser {
    /// Create a parser positioned before the root element.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state the next event is interpreted in.
    pub fn state(&self) -> State {
        match self.stack.last() {
            Some(state) => *state,
            None if self.root_closed => State::End,
            None => State::Start,
        }
    }

    /// Feed one markup event.
    pub fn handle(&mut self, event: MarkupEvent) -> Result<()> {
        match event {
            MarkupEvent::Open { ref name, .. } => {
                let from = self.state();
                let to = schema::transition(from, name).ok_or_else(|| {
                    HostenvError::structural(format!(
                        "element <{}> is not allowed in {} (expected {})",
                        name,
                        describe(from),
                        describe_expected(from)
                    ))
                })?;
                self.enter(to, &event)?;
                trace!("{:?} -> {:?} on <{}>", from, to, name);
                self.stack.push(to);
            }
            MarkupEvent::Text(text) => {
                if self.state().accepts_text() {
                    self.text.push_str(&text);
                } else if !text.trim().is_empty() {
                    return Err(HostenvError::structural(format!(
                        "unexpected text {:?} in {}",
                        text.trim(),
                        describe(self.state())
                    )));
                }
            }
            MarkupEvent::Close { name } => {
                let state = self.stack.pop().ok_or_else(|| {
                    HostenvError::structural(format!("unexpected closing </{}>", name))
                })?;
                self.leave(state)?;
            }
        }
        Ok(())
    }

    /// Finish parsing and hand back the model.
    pub fn finish(self) -> Result<DocumentModel> {
        match self.state() {
            State::End => Ok(self.model),
            State::Start => Err(HostenvError::structural(
                "document is empty, expected <configuration>",
            )),
            open => Err(HostenvError::structural(format!(
                "document ended inside {}",
                describe(open)
            ))),
        }
    }

    fn enter(&mut self, to: State, event: &MarkupEvent) -> Result<()> {
        match to {
            State::Root => {
                if let MarkupEvent::Open { attributes, .. } = event {
                    schema::check_root(attributes)?;
                }
            }
            State::Context => {
                if self.context_seen {
                    return Err(HostenvError::structural(
                        "<context> may appear only once",
                    ));
                }
                if self.property_seen {
                    return Err(HostenvError::structural(
                        "<context> must come before any <property>",
                    ));
                }
                self.context_seen = true;
            }
            State::Hosts => {
                let environment = required_name(event, "hosts", "env")?;
                self.model.declare_environment(environment.clone());
                self.environment = Some(environment);
            }
            State::Property => {
                if !self.context_seen {
                    return Err(HostenvError::structural(
                        "<context> must come before any <property>",
                    ));
                }
                self.property_seen = true;
                let key = required_name(event, "property", "key")?;
                self.model.declare_key(key.clone());
                self.key = Some(key);
                self.values_in_property = 0;
            }
            State::Value => {
                let environment = required_name(event, "value", "env")?;
                self.value_environment = Some(environment);
                self.text.clear();
            }
            State::Host => self.text.clear(),
            State::Start | State::End => {}
        }
        Ok(())
    }

    fn leave(&mut self, state: State) -> Result<()> {
        match state {
            State::Host => {
                let environment = self.environment.as_deref().ok_or_else(|| {
                    HostenvError::structural("<host> outside of <hosts>")
                })?;
                let host = normalize(&self.text);
                self.model.add_host(environment, host)?;
                self.text.clear();
            }
            State::Hosts => self.environment = None,
            State::Value => {
                let (Some(key), Some(environment)) =
                    (self.key.as_deref(), self.value_environment.take())
                else {
                    return Err(HostenvError::structural("<value> outside of <property>"));
                };
                self.model
                    .set_value(key, environment, self.text.trim().to_string())?;
                self.values_in_property += 1;
                self.text.clear();
            }
            State::Property => {
                if self.values_in_property == 0 {
                    return Err(HostenvError::structural(format!(
                        "property[@key={}] requires at least one <value>",
                        self.key.as_deref().unwrap_or_default()
                    )));
                }
                self.key = None;
            }
            State::Root => {
                if !self.context_seen {
                    return Err(HostenvError::structural(
                        "<configuration> requires a <context>",
                    ));
                }
                self.root_closed = true;
            }
            State::Context | State::Start | State::End => {}
        }
        Ok(())
    }
}

/// Fetch a required attribute, naming it as `element[@attribute]` when absent.
fn required<'a>(event: &'a MarkupEvent, element: &str, attribute: &str) -> Result<&'a str> {
    event.attribute(attribute).ok_or_else(|| {
        HostenvError::structural(format!(
            "{}[@{}] attribute is required",
            element, attribute
        ))
    })
}

/// A required attribute that must stay non-empty once trimmed.
fn required_name(event: &MarkupEvent, element: &str, attribute: &str) -> Result<String> {
    let name = normalize(required(event, element, attribute)?);
    if name.is_empty() {
        return Err(HostenvError::structural(format!(
            "{}[@{}] must not be empty",
            element, attribute
        )));
    }
    Ok(name)
}

/// Trim and escape a name or host token.
fn normalize(raw: &str) -> String {
    escape(raw.trim()).into_owned()
}

fn describe(state: State) -> &'static str {
    match state {
        State::Start => "the document prolog",
        State::Root => "<configuration>",
        State::Context => "<context>",
        State::Hosts => "<hosts>",
        State::Host => "<host>",
        State::Property => "<property>",
        State::Value => "<value>",
        State::End => "the document epilog",
    }
}

fn describe_expected(state: State) -> String {
    let names = schema::expected(state);
    if names.is_empty() {
        "no child elements".to_string()
    } else {
        names
            .iter()
            .map(|name| format!("<{}>", name))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
