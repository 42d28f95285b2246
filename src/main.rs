//! OneMatch - Signing Service Entry Point
//!
//! Loads configuration, initializes the signing key once, and serves the
//! proof API. Exits with a non-zero status if no key is configured.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use onematch::core::config::ServerConfig;
use onematch::core::error::Result;
use onematch::proof::SigningService;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// OneMatch signing service
#[derive(Parser, Debug)]
#[command(name = "onematch")]
#[command(about = "Serve signed game-result, leaderboard and achievement proofs")]
struct Args {
    /// TOML config file (environment variables override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding config and PORT
    #[arg(long)]
    port: Option<u16>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("onematch=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("Failed to start server: {}", e);
        eprintln!("\nTo generate a key pair, run:\n  cargo run --bin keygen\n");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load_from_toml(path)?,
        None => ServerConfig::new(),
    }
    .with_env_overrides()?;

    if let Some(port) = args.port {
        config.port = port;
    }
    config.validate()?;

    let signer = Arc::new(SigningService::new());
    if let Some(key) = config.signing_key() {
        signer.initialize(key)?;
    }

    let rt = Runtime::new()?;
    rt.block_on(onematch::server::serve(&config, signer))
}
