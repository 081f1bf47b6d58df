//! Runs the QR engine for a validated request.

use qr_engine::{QrError, QrOptions, QrRequest, generate_fancy_qr};

/// Errors surfaced by [`QrService::render`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Engine(#[from] QrError),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Renders QR images with the configured symbol geometry.
#[derive(Debug, Clone)]
pub struct QrService {
    options: QrOptions,
}

impl QrService {
    pub fn new(options: QrOptions) -> Self {
        Self { options }
    }

    /// Render `request` to PNG bytes on the blocking thread pool.
    pub async fn render(&self, request: QrRequest) -> Result<Vec<u8>, GenerateError> {
        let options = self.options.clone();
        let png = tokio::task::spawn_blocking(move || generate_fancy_qr(&request, &options)).await??;
        Ok(png)
    }
}
