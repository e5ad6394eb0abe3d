//! CLI argument definitions using clap
//!
//! Commands:
//! - personas init --config <path>
//! - personas serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Personas - CRUD HTTP service for person records
#[derive(Parser, Debug)]
#[command(name = "personas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and its schema
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./personas.json")]
        config: PathBuf,
    },

    /// Serve the persona API over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./personas.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["personas", "serve", "--config", "c.json", "--port", "9000"])
            .unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("c.json"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_default_config_path() {
        let cli = Cli::try_parse_from(["personas", "init"]).unwrap();
        match cli.command {
            Command::Init { config } => assert_eq!(config, PathBuf::from("./personas.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
