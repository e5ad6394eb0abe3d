//! CLI command implementations
//!
//! `serve` is the composition root: config → repository → service →
//! router, built once, then handed to the tokio runtime.

use std::path::Path;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::db::open_db;
use crate::http_server::HttpServer;
use crate::observability::{Logger, OperationScope};
use crate::persona::SqlitePersonaRepository;

/// Main CLI entry point
///
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the database file and apply the schema.
///
/// Refuses to touch an existing file.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);

    if config.is_in_memory() {
        return Err(CliError::config_error(
            "init needs a file database_path, not ':memory:'",
        ));
    }

    if config.database_path().exists() {
        return Err(CliError::already_initialized(&config.database_path));
    }

    open_db(config.database_path())?;
    Logger::info(
        "DB_INITIALIZED",
        &[("path", config.database_path.as_str())],
    );

    Ok(())
}

/// Open the store and serve HTTP until the process is stopped.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);

    if let Some(port) = port {
        config.port = port;
    }

    let scope = OperationScope::new("SERVER_BOOT", &[("database", config.database_path.as_str())]);
    let server = match build_server(&config) {
        Ok(server) => server,
        Err(e) => {
            scope.fail(e.message());
            return Err(e);
        }
    };
    scope.complete();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Wire repository → service → router for `config`.
pub fn build_server(config: &Config) -> CliResult<HttpServer> {
    let repo = open_repository(config)?;
    Ok(HttpServer::with_repository(config.http_config(), repo))
}

fn open_repository(config: &Config) -> CliResult<SqlitePersonaRepository> {
    if config.is_in_memory() {
        return Ok(SqlitePersonaRepository::in_memory()?);
    }

    if !config.database_path().exists() {
        return Err(CliError::not_initialized(&config.database_path));
    }

    Ok(SqlitePersonaRepository::open(config.database_path())?)
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir) -> std::path::PathBuf {
        let config_path = temp_dir.path().join("personas.json");
        let db_path = temp_dir.path().join("personas.db");

        let config = json!({
            "database_path": db_path.to_string_lossy(),
            "log_level": "error"
        });

        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_database() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();
        assert!(temp_dir.path().join("personas.db").exists());
    }

    #[test]
    fn test_init_refuses_reinit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();

        let result = init(&config_path);
        assert_eq!(
            result.unwrap_err().code(),
            &CliErrorCode::AlreadyInitialized
        );
    }

    #[test]
    fn test_serve_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        let result = serve(&config_path, None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::NotInitialized);
    }

    #[test]
    fn test_build_server_after_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);
        init(&config_path).unwrap();

        let mut config = Config::load(&config_path).unwrap();
        config.port = 9100;
        let server = build_server(&config).unwrap();
        assert_eq!(server.socket_addr(), "0.0.0.0:9100");
    }

    #[test]
    fn test_build_server_in_memory_needs_no_init() {
        let config = Config {
            database_path: ":memory:".to_string(),
            ..Default::default()
        };
        assert!(build_server(&config).is_ok());
    }

    #[test]
    fn test_init_rejects_in_memory() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("personas.json");
        fs::write(&config_path, json!({ "database_path": ":memory:" }).to_string()).unwrap();

        let result = init(&config_path);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }
}
