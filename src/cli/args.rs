//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::SelectionPolicy;

/// hostenv - Host-specific configuration resolution.
#[derive(Debug, Parser)]
#[command(name = "hostenv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a load-options YAML file
    #[arg(short, long, global = true, env = "HOSTENV_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a configuration document for this machine
    Resolve(ResolveArgs),

    /// Write a single-environment template document
    Template(TemplateArgs),

    /// Show this machine's host name and address
    Machine(MachineArgs),

    /// Print the embedded document schema
    Schema(SchemaArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Configuration document to resolve
    pub file: PathBuf,

    /// Value selection policy (global-first, environment-only)
    #[arg(long)]
    pub policy: Option<SelectionPolicy>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `template` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplateArgs {
    /// Property to include, as KEY=VALUE (repeatable)
    #[arg(short, long = "key", value_name = "KEY=VALUE")]
    pub keys: Vec<String>,

    /// Bind the template to this machine's host name
    #[arg(long)]
    pub machine_host: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `machine` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MachineArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `schema` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SchemaArgs {
    /// Schema file to print
    #[arg(default_value = crate::document::SCHEMA_FILE)]
    pub name: String,
}
