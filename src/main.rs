//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, prepares the expense database
//! and starts the server with the configured transport.

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use expense_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    init_logging(&config);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Expense database: {}", config.storage.db_path.display());

    // Storage failures are fatal: nothing is served without a usable database
    let server = McpServer::bootstrap(config.clone())
        .inspect_err(|e| error!("Database initialization error: {}", e))
        .context("failed to initialize expense database")?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(config: &Config) {
    let level = match config.logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if config.logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
