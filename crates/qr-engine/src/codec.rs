//! PNG encoding and upload decoding.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use crate::QrError;

/// File extensions accepted for background uploads.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Encode an image into an in-memory PNG buffer.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, QrError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| QrError::Png(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Decode an uploaded image, detecting the format from its content.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, QrError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| QrError::InvalidImage(e.to_string()))?;

    if reader.format().is_none() {
        return Err(QrError::InvalidImage("unrecognized image format".into()));
    }

    let img = reader
        .decode()
        .map_err(|e| QrError::InvalidImage(e.to_string()))?;
    debug!(width = img.width(), height = img.height(), "Decoded uploaded image");
    Ok(img)
}

/// Whether `filename` carries one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_upload(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}
