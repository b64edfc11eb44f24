//! Runtime configuration documents.
//!
//! A document declares environments by the hosts they run on, then gives
//! each property a value per environment (or a global `*` value):
//!
//! ```xml
//! <configuration xmlns="urn:hostenv:runtime-configuration:1.0.0">
//!   <context>
//!     <hosts env="L1">
//!       <host>build-01.corp</host>
//!       <host>/build-\d+\.corp/</host>
//!     </hosts>
//!   </context>
//!   <property key="db.url">
//!     <value env="L1">jdbc:postgresql://db-l1/app</value>
//!     <value env="*">jdbc:h2:mem:app</value>
//!   </property>
//! </configuration>
//! ```
//!
//! - [`markup`] - tokenizes the stream into open/text/close events
//! - [`schema`] - the element transition table and the embedded XSD
//! - [`parser`] - runs the state machine and builds a [`DocumentModel`]
//! - [`writer`] - writes single-environment templates

pub mod markup;
pub mod model;
pub mod parser;
pub mod schema;
pub mod writer;

pub use markup::{Attribute, MarkupEvent, MarkupReader};
pub use model::{DocumentModel, GLOBAL_ENVIRONMENT};
pub use parser::{parse_document, parse_str, DocumentParser};
pub use schema::{State, NAMESPACE, SCHEMA_FILE};
pub use writer::{TemplateWriter, TEMPLATE_ENVIRONMENT};
