//! QR code rendering with optional background blending and alpha gradient.
//!
//! The QR matrix itself comes from the `qrcode` crate; this crate paints it
//! into an RGB bitmap, composites it over an uploaded background, applies the
//! left-to-right alpha ramp and encodes the result as PNG.

pub mod codec;
pub mod color;
pub mod compose;
pub mod qr;

use image::DynamicImage;
use tracing::{debug, info};

// Re-exports for convenience
pub use codec::{decode_image, encode_png, is_supported_upload};
pub use color::Color;
pub use compose::{apply_alpha_mask, composite, gradient_mask};
pub use qr::{ErrorCorrection, QrOptions, generate_qr, symbol_size};

/// Pixel size of a single QR module.
pub const DEFAULT_BOX_SIZE: u32 = 10;

/// Quiet-zone width around the symbol, in modules.
pub const DEFAULT_BORDER: u32 = 4;

/// Uniform alpha given to the QR layer before it is blended onto a background.
pub const BLEND_ALPHA: u8 = 128;

/// Errors produced while rendering a QR image.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR payload is empty")]
    EmptyPayload,

    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("PNG encode error: {0}")]
    Png(String),
}

/// One generation request as submitted by the user.
#[derive(Debug, Clone)]
pub struct QrRequest {
    pub data: String,
    pub color: Color,
    pub background_color: Color,
    pub background_image: Option<DynamicImage>,
    pub gradient: bool,
}

impl QrRequest {
    /// Request with the default black-on-white colors and no effects.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            color: Color::BLACK,
            background_color: Color::WHITE,
            background_image: None,
            gradient: false,
        }
    }
}

/// Render a request to PNG bytes.
///
/// `options` supplies the symbol geometry and error-correction level; the
/// colors always come from the request.
pub fn generate_fancy_qr(request: &QrRequest, options: &QrOptions) -> Result<Vec<u8>, QrError> {
    if request.data.is_empty() {
        return Err(QrError::EmptyPayload);
    }

    let options = QrOptions {
        foreground: request.color,
        background: request.background_color,
        ..options.clone()
    };

    let bitmap = generate_qr(&request.data, &options)?;
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        "QR bitmap generated"
    );

    let image = composite(bitmap, request.background_image.as_ref(), request.gradient);
    let png = encode_png(&image)?;

    info!(
        width = image.width(),
        height = image.height(),
        background = request.background_image.is_some(),
        gradient = request.gradient,
        bytes = png.len(),
        "Fancy QR code rendered"
    );

    Ok(png)
}
