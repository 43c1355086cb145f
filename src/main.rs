//! Service entry point.
//!
//! Run with:
//!   PORT=3000 RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:3000/api/trust-proofs

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use trustproofs::controllers::TrustProofsController;
use trustproofs::{app, Config, Server};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("trustproofs: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let router = app::build(Arc::new(TrustProofsController::default()));

    tracing::info!(addr = %config.addr(), "starting trust-proofs server");

    if let Err(e) = Server::bind(config.addr()).serve(router).await {
        tracing::error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
