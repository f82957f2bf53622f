//! journal-mcp binary: serves the journaling API over MCP on stdio.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use journal_mcp::{ClientConfig, JournalClient, McpServer, DEFAULT_BASE_URL};

/// MCP server for the journaling service.
#[derive(Debug, Parser)]
#[command(name = "journal-mcp", version, about)]
struct Cli {
    /// API key for the journaling service
    #[arg(long, env = "JOURNAL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the journaling API
    #[arg(long, env = "JOURNAL_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "JOURNAL_API_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("journal_mcp={}", cli.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(serve(cli));

    // The stdin reader blocks a pool thread until the next line arrives;
    // do not wait for it on the way out.
    runtime.shutdown_background();
    code
}

async fn serve(cli: Cli) -> ExitCode {
    let config = ClientConfig::new(cli.api_key.unwrap_or_default())
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    let client = match JournalClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %client.base_url(),
        "journal-mcp starting"
    );
    let server = McpServer::new(client);

    tokio::select! {
        result = server.run_stdio() => {
            if let Err(e) = result {
                error!("server error: {}", e);
                return ExitCode::FAILURE;
            }
            info!("stdin closed, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
        }
    }

    ExitCode::SUCCESS
}
