//! Form submission parsing and validation.
//!
//! The checks here run before the QR engine is invoked; a failure becomes a
//! user-visible warning on the page instead of an image.

use qr_engine::{Color, QrRequest, decode_image, is_supported_upload};
use tracing::debug;

/// Background choice from the form's select box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    #[default]
    Plain,
    Image,
}

impl BackgroundMode {
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Self::Image,
            _ => Self::Plain,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Image => "image",
        }
    }
}

/// An uploaded background file as received.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Raw field values of one form submission.
#[derive(Debug, Clone, Default)]
pub struct QrForm {
    pub data: String,
    pub color: String,
    pub background_color: String,
    pub background: BackgroundMode,
    pub upload: Option<Upload>,
    pub gradient: bool,
}

/// Reasons a submission is rejected before generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormWarning {
    #[error("Please upload a valid image file.")]
    InvalidImage,

    #[error("Please enter the data for the QR code.")]
    EmptyData,

    #[error("Please select a valid color.")]
    InvalidColor,
}

/// Interpret a checkbox value. Browsers send `on` for a checked box.
pub fn parse_checkbox(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

impl QrForm {
    /// Validate the submission and turn it into an engine request.
    ///
    /// The upload is only considered in [`BackgroundMode::Image`]; an empty
    /// file field counts as no upload.
    pub fn validate(&self) -> Result<QrRequest, FormWarning> {
        let background_image = match (&self.background, &self.upload) {
            (BackgroundMode::Image, Some(upload)) if !upload.bytes.is_empty() => {
                if !is_supported_upload(&upload.filename) {
                    debug!(filename = %upload.filename, "Rejected upload extension");
                    return Err(FormWarning::InvalidImage);
                }
                let img = decode_image(&upload.bytes).map_err(|e| {
                    debug!(filename = %upload.filename, "Rejected upload: {e}");
                    FormWarning::InvalidImage
                })?;
                Some(img)
            }
            _ => None,
        };

        if self.data.is_empty() {
            return Err(FormWarning::EmptyData);
        }

        let color: Color = self.color.parse().map_err(|_| FormWarning::InvalidColor)?;
        let background_color: Color = self
            .background_color
            .parse()
            .map_err(|_| FormWarning::InvalidColor)?;

        Ok(QrRequest {
            data: self.data.clone(),
            color,
            background_color,
            background_image,
            gradient: self.gradient,
        })
    }
}
