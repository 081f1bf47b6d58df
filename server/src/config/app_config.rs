//! Runtime application configuration loaded from environment variables.

use anyhow::bail;
use qr_engine::{Color, DEFAULT_BORDER, DEFAULT_BOX_SIZE, ErrorCorrection, QrOptions};

use super::{SETTING_KEYS, validate_setting};

/// Runtime configuration populated from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub max_upload_bytes: usize,
    pub box_size: u32,
    pub border: u32,
    pub error_correction: ErrorCorrection,
    pub default_color: Color,
    pub default_background: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 8080,
            max_upload_bytes: 20 * 1024 * 1024,
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            error_correction: ErrorCorrection::Medium,
            default_color: Color::BLACK,
            default_background: Color::WHITE,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset or empty keys fall back to defaults; set keys must pass
    /// [`validate_setting`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };

        let mut errors = Vec::new();
        for key in SETTING_KEYS {
            let value = g(key);
            if value.is_empty() {
                continue;
            }
            if let Err(e) = validate_setting(key, &value) {
                errors.push(format!("{key}: {e}"));
            }
        }
        if !errors.is_empty() {
            bail!("invalid configuration: {}", errors.join("; "));
        }

        let defaults = Self::default();
        Ok(Self {
            server_host: {
                let h = g("SERVER_HOST");
                if h.is_empty() { defaults.server_host } else { h }
            },
            server_port: parse_or(&g("SERVER_PORT"), defaults.server_port),
            max_upload_bytes: parse_or(&g("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes),
            box_size: parse_or(&g("QR_BOX_SIZE"), defaults.box_size),
            border: parse_or(&g("QR_BORDER"), defaults.border),
            error_correction: parse_or(&g("QR_ERROR_CORRECTION"), defaults.error_correction),
            default_color: parse_or(&g("QR_DEFAULT_COLOR"), defaults.default_color),
            default_background: parse_or(&g("QR_DEFAULT_BACKGROUND"), defaults.default_background),
        })
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Symbol geometry for the QR engine. Colors are filled in per request.
    pub fn qr_options(&self) -> QrOptions {
        QrOptions {
            box_size: self.box_size,
            border: self.border,
            error_correction: self.error_correction,
            foreground: self.default_color,
            background: self.default_background,
        }
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
