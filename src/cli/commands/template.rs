//! Template command implementation.
//!
//! The `hostenv template` command writes a single-environment document for
//! the given properties, ready to be extended with more environments.

use std::collections::BTreeMap;
use std::io::Write;

use crate::cli::args::TemplateArgs;
use crate::document::TemplateWriter;
use crate::error::{HostenvError, Result};
use crate::runtime::RuntimeConfiguration;
use crate::settings::LoadOptions;

use super::dispatcher::{Command, CommandResult};

/// The template command implementation.
pub struct TemplateCommand {
    options: LoadOptions,
    args: TemplateArgs,
}

impl TemplateCommand {
    /// Create a new template command.
    pub fn new(options: &LoadOptions, args: TemplateArgs) -> Self {
        Self {
            options: options.clone(),
            args,
        }
    }

    /// Parse the `KEY=VALUE` arguments. Later keys replace earlier ones.
    pub fn properties(&self) -> Result<BTreeMap<String, String>> {
        let mut properties = BTreeMap::new();
        for pair in &self.args.keys {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                HostenvError::Other(anyhow::anyhow!(
                    "invalid property '{}', expected KEY=VALUE",
                    pair
                ))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(HostenvError::Other(anyhow::anyhow!(
                    "invalid property '{}', key is empty",
                    pair
                )));
            }
            properties.insert(key.to_string(), value.to_string());
        }
        Ok(properties)
    }

    fn writer(&self) -> TemplateWriter {
        if self.args.machine_host {
            TemplateWriter::with_machine_host()
        } else {
            self.options.template_writer()
        }
    }
}

impl Command for TemplateCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let properties = self.properties()?;
        let config = RuntimeConfiguration::from_options(&self.options).with_writer(self.writer());

        match &self.args.output {
            Some(path) => {
                config.save_file(&properties, path)?;
                writeln!(out, "Wrote template to {}", path.display())?;
            }
            None => config.save(&properties, out)?,
        }

        Ok(CommandResult::success())
    }
}
