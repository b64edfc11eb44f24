//! Markup tokenization.
//!
//! Wraps a `quick-xml` reader and reduces its event stream to the three
//! events the document parser cares about: an element opens, text arrives,
//! an element closes. Names are reduced to lower-cased local names.
//! Declarations, comments, processing instructions and doctypes are dropped.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{HostenvError, Result};

/// One attribute of an opened element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace prefix as written (`xsi` in `xsi:schemaLocation`).
    pub prefix: Option<String>,
    /// Lower-cased local name.
    pub name: String,
    /// Unescaped value, preserved as given.
    pub value: String,
}

impl Attribute {
    /// Whether this attribute declares a namespace (`xmlns` or `xmlns:*`).
    pub fn is_namespace_declaration(&self) -> bool {
        match &self.prefix {
            Some(prefix) => prefix == "xmlns",
            None => self.name == "xmlns",
        }
    }
}

/// Simplified markup event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An element opened.
    Open {
        name: String,
        attributes: Vec<Attribute>,
    },
    /// Character data: unescaped text or verbatim CDATA content.
    Text(String),
    /// An element closed.
    Close { name: String },
}

impl MarkupEvent {
    /// Look up an unprefixed attribute by lower-cased name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Open { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.prefix.is_none() && attr.name == name)
                .map(|attr| attr.value.as_str()),
            _ => None,
        }
    }
}

/// Pull reader producing [`MarkupEvent`]s from any buffered stream.
pub struct MarkupReader<R> {
    reader: Reader<R>,
    pending_close: Option<String>,
    finished: bool,
}

impl<R: BufRead> MarkupReader<R> {
    /// Wrap a buffered stream.
    pub fn new(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            pending_close: None,
            finished: false,
        }
    }

    /// Byte offset reached in the stream.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    /// Read the next event, or `None` at end of input.
    pub fn next_event(&mut self) -> Result<Option<MarkupEvent>> {
        if let Some(name) = self.pending_close.take() {
            return Ok(Some(MarkupEvent::Close { name }));
        }

        let mut buf = Vec::new();
        loop {
            if self.finished {
                return Ok(None);
            }
            buf.clear();
            let event = match self.reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(e) => return Err(self.markup_error(e.to_string())),
            };

            let converted = match event {
                Event::Start(start) => Some(self.open(&start)?),
                Event::Empty(start) => {
                    let open = self.open(&start)?;
                    if let MarkupEvent::Open { name, .. } = &open {
                        self.pending_close = Some(name.clone());
                    }
                    Some(open)
                }
                Event::End(end) => Some(MarkupEvent::Close {
                    name: self.name(end.local_name().as_ref())?,
                }),
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| self.markup_error(e.to_string()))?;
                    Some(MarkupEvent::Text(text.into_owned()))
                }
                Event::CData(cdata) => {
                    let bytes = cdata.into_inner().into_owned();
                    let text = String::from_utf8(bytes)
                        .map_err(|e| self.markup_error(e.to_string()))?;
                    Some(MarkupEvent::Text(text))
                }
                Event::Eof => {
                    self.finished = true;
                    None
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => None,
            };

            if converted.is_some() {
                return Ok(converted);
            }
        }
    }

    fn open(&self, start: &BytesStart<'_>) -> Result<MarkupEvent> {
        let name = self.name(start.local_name().as_ref())?;
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.markup_error(e.to_string()))?;
            let qualified = self.text(attr.key.as_ref())?;
            let (prefix, local) = match qualified.split_once(':') {
                Some((prefix, local)) => (Some(prefix.to_string()), local),
                None => (None, qualified.as_str()),
            };
            let value = attr
                .unescape_value()
                .map_err(|e| self.markup_error(e.to_string()))?;

            attributes.push(Attribute {
                prefix,
                name: local.to_lowercase(),
                value: value.into_owned(),
            });
        }

        Ok(MarkupEvent::Open { name, attributes })
    }

    fn name(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.text(bytes)?.to_lowercase())
    }

    fn text(&self, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| self.markup_error(e.to_string()))
    }

    fn markup_error(&self, message: String) -> HostenvError {
        HostenvError::Markup {
            position: self.position(),
            message,
        }
    }
}

impl<R: BufRead> Iterator for MarkupReader<R> {
    type Item = Result<MarkupEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
