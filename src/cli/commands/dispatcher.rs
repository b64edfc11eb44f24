//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::settings::LoadOptions;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Where command output goes (stdout in the binary)
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    options: LoadOptions,
}

impl CommandDispatcher {
    /// Create a new dispatcher using the given load options.
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Get the load options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Commands::Resolve(args) => {
                let cmd = super::resolve::ResolveCommand::new(&self.options, args.clone());
                cmd.execute(out)
            }
            Commands::Template(args) => {
                let cmd = super::template::TemplateCommand::new(&self.options, args.clone());
                cmd.execute(out)
            }
            Commands::Machine(args) => {
                let cmd = super::machine::MachineCommand::new(args.clone());
                cmd.execute(out)
            }
            Commands::Schema(args) => {
                let cmd = super::schema::SchemaCommand::new(args.clone());
                cmd.execute(out)
            }
        }
    }
}
