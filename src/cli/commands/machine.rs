//! Machine command implementation.
//!
//! The `hostenv machine` command shows the identity host tokens are matched
//! against.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::MachineArgs;
use crate::error::{HostenvError, Result};
use crate::machine::{self, MachineIdentity};

use super::dispatcher::{Command, CommandResult};

#[derive(Serialize)]
struct MachineReport<'a> {
    host_name: &'a str,
    host_address: &'a str,
    fqdn: &'a str,
    machine_id: String,
}

/// The machine command implementation.
pub struct MachineCommand {
    args: MachineArgs,
    identity: Option<MachineIdentity>,
}

impl MachineCommand {
    /// Create a new machine command reporting the process identity.
    pub fn new(args: MachineArgs) -> Self {
        Self {
            args,
            identity: None,
        }
    }

    /// Report a fixed identity (for testing).
    pub fn with_identity(args: MachineArgs, identity: MachineIdentity) -> Self {
        Self {
            args,
            identity: Some(identity),
        }
    }
}

impl Command for MachineCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let identity = self.identity.as_ref().unwrap_or_else(|| machine::identity());

        if self.args.json {
            let report = MachineReport {
                host_name: &identity.host_name,
                host_address: &identity.host_address,
                fqdn: &identity.fqdn,
                machine_id: identity.machine_id(),
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| HostenvError::Other(e.into()))?;
            writeln!(out, "{}", json)?;
        } else {
            writeln!(out, "Host name:    {}", identity.host_name)?;
            writeln!(out, "Host address: {}", identity.host_address)?;
            writeln!(out, "Canonical:    {}", identity.fqdn)?;
            writeln!(out, "Machine id:   {}", identity.machine_id())?;
        }

        Ok(CommandResult::success())
    }
}
