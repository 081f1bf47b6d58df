//! QR bitmap generation.

use std::str::FromStr;

use image::RgbImage;
use qrcode::{EcLevel, QrCode};

use crate::{Color, DEFAULT_BORDER, DEFAULT_BOX_SIZE, QrError};

/// Error-correction tolerance of the encoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    /// ~7% of codewords recoverable.
    Low,
    /// ~15% of codewords recoverable.
    #[default]
    Medium,
    /// ~25% of codewords recoverable.
    Quartile,
    /// ~30% of codewords recoverable.
    High,
}

impl ErrorCorrection {
    fn ec_level(self) -> EcLevel {
        match self {
            Self::Low => EcLevel::L,
            Self::Medium => EcLevel::M,
            Self::Quartile => EcLevel::Q,
            Self::High => EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::Low),
            "M" => Ok(Self::Medium),
            "Q" => Ok(Self::Quartile),
            "H" => Ok(Self::High),
            _ => Err("must be one of L, M, Q, H".into()),
        }
    }
}

/// Geometry and palette of a rendered symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    /// Pixels per module edge.
    pub box_size: u32,
    /// Quiet-zone width in modules.
    pub border: u32,
    pub error_correction: ErrorCorrection,
    pub foreground: Color,
    pub background: Color,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            error_correction: ErrorCorrection::default(),
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

fn encode(data: &str, options: &QrOptions) -> Result<QrCode, QrError> {
    QrCode::with_error_correction_level(data.as_bytes(), options.error_correction.ec_level())
        .map_err(|e| QrError::Encode(e.to_string()))
}

fn edge_pixels(module_count: u32, options: &QrOptions) -> u32 {
    (module_count + 2 * options.border) * options.box_size.max(1)
}

/// Pixel edge length of the square bitmap `generate_qr` would produce.
pub fn symbol_size(data: &str, options: &QrOptions) -> Result<u32, QrError> {
    let code = encode(data, options)?;
    Ok(edge_pixels(code.width() as u32, options))
}

/// Generate a QR bitmap from a URL or text string.
///
/// Uses the smallest symbol version that fits `data`. Dark modules are painted
/// in `options.foreground`, light modules and the quiet zone in
/// `options.background`.
pub fn generate_qr(data: &str, options: &QrOptions) -> Result<RgbImage, QrError> {
    let code = encode(data, options)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = options.box_size.max(1);
    let img_size = edge_pixels(module_count, options);
    let fg = options.foreground.to_rgb();

    let mut img = RgbImage::from_pixel(img_size, img_size, options.background.to_rgb());

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let x = (i as u32) % module_count + options.border;
        let y = (i as u32) / module_count + options.border;

        for dx in 0..scale {
            for dy in 0..scale {
                img.put_pixel(x * scale + dx, y * scale + dy, fg);
            }
        }
    }

    Ok(img)
}
