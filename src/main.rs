//! dispatch-gateway - HTTP front end for the inference dispatcher

use clap::Parser;
use inference_dispatch::utils::init_logging;
use inference_dispatch::{Config, server};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Resilient multi-provider inference gateway
#[derive(Debug, Parser)]
#[command(name = "dispatch-gateway", version, about)]
struct Cli {
    /// YAML configuration file; built-in defaults plus environment when omitted
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long, env = "GATEWAY_HOST")]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long, env = "GATEWAY_PORT")]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, env = "GATEWAY_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_json) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    let mut config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = cli.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.server.port = port;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    info!(
        providers = config.providers().len(),
        "Configuration loaded"
    );

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
