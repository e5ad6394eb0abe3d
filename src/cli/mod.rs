//! CLI module
//!
//! - init: create the database file and schema
//! - serve: open the store and serve the persona API

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_server, init, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
