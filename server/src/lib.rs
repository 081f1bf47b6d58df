pub mod app;
pub mod config;
pub mod server;
pub mod services;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load `.env` and build the runtime configuration.
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::load()?;
    tracing::info!(
        addr = %config.bind_addr(),
        box_size = config.box_size,
        border = config.border,
        error_correction = ?config.error_correction,
        "Configuration loaded"
    );
    Ok(config)
}
