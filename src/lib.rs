//! hostenv - Host-specific runtime configuration.
//!
//! One configuration document travels through every deployment tier. It
//! names environments by the hosts they run on and gives each property a
//! value per environment. At load time, the machine works out which
//! environment it belongs to and picks the matching values.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`document`] - Document parsing, schema and template writing
//! - [`engine`] - Environment resolution and value selection
//! - [`error`] - Error types and result aliases
//! - [`machine`] - Host name and address of this machine
//! - [`matcher`] - Single host token matching
//! - [`resolver`] - Environment resolution strategies
//! - [`runtime`] - Load/save facade over files and streams
//! - [`settings`] - Load options read from YAML
//! - [`sink`] - Property sinks and sources
//!
//! # Example
//!
//! ```
//! use hostenv::document::parse_str;
//! use hostenv::engine::ResolutionEngine;
//!
//! let model = parse_str(r#"<configuration>
//!   <context>
//!     <hosts env="local"><host>localhost</host></hosts>
//!     <hosts env="prod"><host>prod-01.invalid</host></hosts>
//!   </context>
//!   <property key="k">
//!     <value env="local">good</value>
//!     <value env="prod">bad</value>
//!   </property>
//! </configuration>"#).unwrap();
//!
//! let resolved = ResolutionEngine::new().resolve(&model).unwrap();
//! assert_eq!(resolved.environment, "local");
//! assert_eq!(resolved.get("k"), Some("good"));
//! ```

pub mod cli;
pub mod document;
pub mod engine;
pub mod error;
pub mod machine;
pub mod matcher;
pub mod resolver;
pub mod runtime;
pub mod settings;
pub mod sink;

pub use engine::{ResolutionEngine, ResolvedProperties, SelectionPolicy};
pub use error::{HostenvError, Result};
pub use runtime::RuntimeConfiguration;
pub use sink::{PropertySink, PropertySource};
