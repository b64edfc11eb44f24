//! Schema command implementation.
//!
//! The `hostenv schema` command prints an embedded document schema.

use std::io::Write;

use crate::cli::args::SchemaArgs;
use crate::document::schema;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand {
    args: SchemaArgs,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new(args: SchemaArgs) -> Self {
        Self { args }
    }
}

impl Command for SchemaCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match schema::schema(&self.args.name) {
            Some(content) => {
                out.write_all(content.as_bytes())?;
                Ok(CommandResult::success())
            }
            None => {
                tracing::error!(
                    "Unknown schema {}, available: {}",
                    self.args.name,
                    schema::schema_names().join(", ")
                );
                Ok(CommandResult::failure(2))
            }
        }
    }
}
