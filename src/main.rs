//! Entry point for the quote engine binary.
//!
//! Running this binary starts an HTTP server exposing the pricing and
//! config endpoints.  The location of the rate-config JSON file may be
//! specified via the `QUOTE_CONFIG_PATH` environment variable; if
//! unset the server keeps a `config.json` in the current working
//! directory.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Determine where the rate config lives and where to bind.
    let config_path = std::env::var("QUOTE_CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string());
    let addr = std::env::var("QUOTE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    if let Err(err) = quote_engine::api::serve(&addr, PathBuf::from(config_path)).await {
        tracing::error!(error = %err, "error running server");
        std::process::exit(1);
    }
}
