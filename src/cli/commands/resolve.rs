//! Resolve command implementation.
//!
//! The `hostenv resolve` command loads a configuration document and prints
//! the properties selected for this machine.

use std::io::Write;

use crate::cli::args::ResolveArgs;
use crate::error::{HostenvError, Result};
use crate::runtime::RuntimeConfiguration;
use crate::settings::LoadOptions;

use super::dispatcher::{Command, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand {
    options: LoadOptions,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(options: &LoadOptions, args: ResolveArgs) -> Self {
        let mut options = options.clone();
        if let Some(policy) = args.policy {
            options.policy = policy;
        }
        Self { options, args }
    }

    /// Get the effective load options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }
}

impl Command for ResolveCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = RuntimeConfiguration::from_options(&self.options);
        let resolved = config.resolve_file(&self.args.file)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&resolved)
                .map_err(|e| HostenvError::Other(e.into()))?;
            writeln!(out, "{}", json)?;
        } else {
            for (key, value) in &resolved.properties {
                writeln!(out, "{}={}", key, value)?;
            }
        }

        Ok(CommandResult::success())
    }
}
