//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`hostenv resolve`, `hostenv template`)
//! - Shared load options for every command
//! - Consistent global flag handling

pub mod dispatcher;
pub mod machine;
pub mod resolve;
pub mod schema;
pub mod template;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
