//! SEOnaut server.
//!
//! # Architecture Overview
//!
//! ```text
//!   process start
//!       │
//!       ▼
//!   ┌──────────────┐   ┌────────────────┐
//!   │ Environment  │──▶│ config resolver│──▶ Configuration ──▶ bind host:port
//!   │  snapshot    │   └────────────────┘
//!   │              │   ┌────────────────┐
//!   │              │──▶│ origin policy  │──▶ OriginPolicy
//!   └──────────────┘   └────────────────┘
//!
//!   per request:
//!       request-id → trace → admission gate → [session gate] → handler
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use seonaut_server::config::Environment;
use seonaut_server::http::middleware::SessionPresence;
use seonaut_server::lifecycle::{self, signals, Shutdown};
use seonaut_server::observability::logging;

#[derive(Parser)]
#[command(name = "seonaut")]
#[command(about = "SEOnaut web server", long_about = None)]
struct Cli {
    /// Configuration file; `.toml` is appended when the name has no extension.
    #[arg(short, long, env = "SEONAUT_CONFIG", default_value = "config")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    tracing::info!("seonaut v{} starting", env!("CARGO_PKG_VERSION"));

    let env = Environment::from_process();
    let (server, listener) =
        match lifecycle::start(&cli.config, &env, Arc::new(SessionPresence::default())).await {
            Ok(started) => started,
            Err(e) => {
                tracing::error!(error = %e, "Startup failed");
                return ExitCode::FAILURE;
            }
        };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    if let Err(e) = server.run(listener, server_shutdown).await {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
