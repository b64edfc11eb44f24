//! Load and save facade.
//!
//! [`RuntimeConfiguration`] ties the document parser, the resolution engine
//! and the template writer together over files, readers and writers.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::document::{parse_document, TemplateWriter};
use crate::engine::{ResolutionEngine, ResolvedProperties};
use crate::error::{HostenvError, Result};
use crate::settings::LoadOptions;
use crate::sink::{PropertySink, PropertySource};

/// Loads host-specific properties and writes templates.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use hostenv::RuntimeConfiguration;
///
/// let xml = r#"<configuration>
///   <context><hosts env="dev"><host>localhost</host></hosts></context>
///   <property key="k"><value env="dev">v</value></property>
/// </configuration>"#;
///
/// let mut props: BTreeMap<String, String> = BTreeMap::new();
/// let env = RuntimeConfiguration::new().load_str(xml, &mut props).unwrap();
/// assert_eq!(env, "dev");
/// assert_eq!(props.get("k"), Some(&"v".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct RuntimeConfiguration {
    engine: ResolutionEngine,
    writer: TemplateWriter,
}

impl RuntimeConfiguration {
    /// Default resolver chain, global-first selection, `localhost` templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure from load options.
    pub fn from_options(options: &LoadOptions) -> Self {
        Self {
            engine: options.engine(),
            writer: options.template_writer(),
        }
    }

    /// Replace the resolution engine, builder style.
    pub fn with_engine(mut self, engine: ResolutionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the template writer, builder style.
    pub fn with_writer(mut self, writer: TemplateWriter) -> Self {
        self.writer = writer;
        self
    }

    /// The resolution engine in use.
    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    /// Parse and resolve a document from a stream.
    pub fn resolve_reader<R: BufRead>(&self, reader: R) -> Result<ResolvedProperties> {
        let model = parse_document(reader)?;
        self.engine.resolve(&model)
    }

    /// Parse and resolve a document file.
    ///
    /// Failures are wrapped in [`HostenvError::ConfigLoad`] naming the path.
    pub fn resolve_file(&self, path: &Path) -> Result<ResolvedProperties> {
        if !path.exists() {
            return Err(HostenvError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let result = File::open(path)
            .map_err(HostenvError::from)
            .and_then(|file| self.resolve_reader(BufReader::new(file)));

        result.map_err(|source| HostenvError::ConfigLoad {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Load a document from a stream into `sink`. Returns the environment.
    pub fn load_reader<R, S>(&self, reader: R, sink: &mut S) -> Result<String>
    where
        R: BufRead,
        S: PropertySink + ?Sized,
    {
        let resolved = self.resolve_reader(reader)?;
        resolved.apply(sink);
        Ok(resolved.environment)
    }

    /// Load a document held in memory into `sink`.
    pub fn load_str<S: PropertySink + ?Sized>(&self, content: &str, sink: &mut S) -> Result<String> {
        self.load_reader(content.as_bytes(), sink)
    }

    /// Load a document file into `sink`. Returns the environment.
    ///
    /// The sink is untouched if anything fails.
    pub fn load_file<S: PropertySink + ?Sized>(&self, path: &Path, sink: &mut S) -> Result<String> {
        let resolved = self.resolve_file(path)?;
        tracing::debug!(
            "Loaded {} properties from {}",
            resolved.len(),
            path.display()
        );
        resolved.apply(sink);
        Ok(resolved.environment)
    }

    /// Write a template for `source` to a stream.
    pub fn save<S, W>(&self, source: &S, out: W) -> Result<()>
    where
        S: PropertySource + ?Sized,
        W: Write,
    {
        self.writer.write(source, out)
    }

    /// Write a template for `source` to a file, creating parent directories.
    pub fn save_file<S: PropertySource + ?Sized>(&self, source: &S, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.save(source, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
