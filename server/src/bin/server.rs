//! Server binary: hosts the Fancy QR Code Generator form.
//!
//! Starts the axum web server and stops it on Ctrl+C.

use tracing_subscriber::EnvFilter;

use fancy_qr_lib::app::SharedState;
use fancy_qr_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting Fancy QR Code Generator");

    let config = fancy_qr_lib::init_foundation()?;
    let state = SharedState::new(config);

    let server_state = state.clone();
    let mut server_handle = tokio::spawn(async move { server::start_server(server_state).await });

    tracing::info!(
        port = state.server_port(),
        "Server running. Press Ctrl+C to stop."
    );

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down...");
        }
        // Server stopped on its own (e.g. bind failure)
        result = &mut server_handle => return result?,
    }

    state.shutdown_token().cancel();
    server_handle.await??;
    Ok(())
}
