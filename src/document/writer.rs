//! Template serialization.
//!
//! Writes the smallest document the parser accepts: one environment with one
//! host, and one value per property for that environment. Deployments copy
//! the template and add their own environments.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::schema::{NAMESPACE, SCHEMA_FILE, XSI_NAMESPACE};
use crate::error::Result;
use crate::machine;
use crate::sink::PropertySource;

/// Environment name used in written templates.
pub const TEMPLATE_ENVIRONMENT: &str = "0";

/// Host written when no other host is configured.
pub const DEFAULT_TEMPLATE_HOST: &str = "localhost";

/// Escape list delimiters in a value.
///
/// Inverse of [`unescape_delimiters`].
pub fn escape_delimiters(value: &str) -> String {
    value.replace(',', "\\,")
}

/// Decode list delimiters escaped by [`escape_delimiters`].
pub fn unescape_delimiters(value: &str) -> String {
    value.replace("\\,", ",")
}

/// Serializes properties as a single-environment template.
#[derive(Debug, Clone)]
pub struct TemplateWriter {
    host: String,
}

impl Default for TemplateWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateWriter {
    /// Template bound to [`DEFAULT_TEMPLATE_HOST`].
    pub fn new() -> Self {
        Self {
            host: DEFAULT_TEMPLATE_HOST.to_string(),
        }
    }

    /// Template bound to a specific host token.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Template bound to this machine's host name.
    pub fn with_machine_host() -> Self {
        Self::with_host(machine::identity().host_name.clone())
    }

    /// The host token the template is bound to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Write the template for every pair of `source`.
    pub fn write<S, W>(&self, source: &S, out: W) -> Result<()>
    where
        S: PropertySource + ?Sized,
        W: Write,
    {
        let mut writer = Writer::new_with_indent(out, b' ', 2);
        let location = format!("{} {}", NAMESPACE, SCHEMA_FILE);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("configuration").with_attributes([
            ("xmlns", NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", location.as_str()),
        ])))?;

        writer.write_event(Event::Start(BytesStart::new("context")))?;
        writer.write_event(Event::Start(
            BytesStart::new("hosts").with_attributes([("env", TEMPLATE_ENVIRONMENT)]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("host")))?;
        writer.write_event(Event::Text(BytesText::new(&self.host)))?;
        writer.write_event(Event::End(BytesEnd::new("host")))?;
        writer.write_event(Event::End(BytesEnd::new("hosts")))?;
        writer.write_event(Event::End(BytesEnd::new("context")))?;

        let mut written = 0usize;
        for (key, value) in source.pairs() {
            let value = escape_delimiters(value);
            writer.write_event(Event::Start(
                BytesStart::new("property").with_attributes([("key", key)]),
            ))?;
            writer.write_event(Event::Start(
                BytesStart::new("value").with_attributes([("env", TEMPLATE_ENVIRONMENT)]),
            ))?;
            writer.write_event(Event::Text(BytesText::new(&value)))?;
            writer.write_event(Event::End(BytesEnd::new("value")))?;
            writer.write_event(Event::End(BytesEnd::new("property")))?;
            written += 1;
        }

        writer.write_event(Event::End(BytesEnd::new("configuration")))?;
        writer.get_mut().write_all(b"\n")?;

        tracing::debug!("Wrote template for host {} with {} properties", self.host, written);
        Ok(())
    }

    /// Render the template into a string.
    pub fn render<S: PropertySource + ?Sized>(&self, source: &S) -> Result<String> {
        let mut out = Vec::new();
        self.write(source, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_str;
    use std::collections::BTreeMap;

    fn source(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_reports_io_error() {
        let err = TemplateWriter::new()
            .write(&source(&[("k", "v")]), ClosedPipe)
            .unwrap_err();
        assert!(matches!(err, crate::error::HostenvError::Io(_)), "{:?}", err);
    }

    #[test]
    fn delimiter_escaping_is_invertible() {
        for value in ["plain", "a,b", "a\\,b", ",", "\\", "x\\"] {
            assert_eq!(unescape_delimiters(&escape_delimiters(value)), value);
        }
    }

    #[test]
    fn template_declares_namespace_and_location() {
        let xml = TemplateWriter::new().render(&source(&[])).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(&format!("xmlns=\"{}\"", NAMESPACE)));
        assert!(xml.contains(SCHEMA_FILE));
        assert!(xml.contains("<hosts env=\"0\">"));
        assert!(xml.contains("<host>localhost</host>"));
    }

    #[test]
    fn values_escape_commas_and_markup() {
        let xml = TemplateWriter::new()
            .render(&source(&[("list", "a,b"), ("markup", "<i>&</i>")]))
            .unwrap();

        assert!(xml.contains("<property key=\"list\">"));
        assert!(xml.contains("a\\,b"));
        assert!(xml.contains("&lt;i&gt;&amp;&lt;/i&gt;"));
    }

    #[test]
    fn template_parses_back() {
        let xml = TemplateWriter::with_host("build-01")
            .render(&source(&[("k", "v,w"), ("cdata", "<![CDATA[x]]>")]))
            .unwrap();
        let model = parse_str(&xml).unwrap();

        assert_eq!(model.hosts_for("0").unwrap(), &["build-01".to_string()]);
        assert_eq!(model.value("k", "0"), Some("v\\,w"));
        assert_eq!(model.value("cdata", "0"), Some("<![CDATA[x]]>"));
    }

    #[test]
    fn custom_host_is_kept() {
        let writer = TemplateWriter::with_host("xenon");
        assert_eq!(writer.host(), "xenon");
        assert_eq!(TemplateWriter::default().host(), DEFAULT_TEMPLATE_HOST);
    }
}
