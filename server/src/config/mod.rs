//! Configuration management: defaults, validation, loading from environment.

pub mod app_config;
pub mod validation;

pub use app_config::AppConfig;
pub use validation::validate_setting;

/// Every setting key recognised by [`AppConfig::load`].
pub const SETTING_KEYS: [&str; 8] = [
    "SERVER_HOST",
    "SERVER_PORT",
    "MAX_UPLOAD_BYTES",
    "QR_BOX_SIZE",
    "QR_BORDER",
    "QR_ERROR_CORRECTION",
    "QR_DEFAULT_COLOR",
    "QR_DEFAULT_BACKGROUND",
];
