//! Setting value validation.

use qr_engine::{Color, ErrorCorrection};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_HOST" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "SERVER_PORT" => {
            value.parse::<u16>().map_err(|_| "must be a port number (0-65535)")?;
        }
        "MAX_UPLOAD_BYTES" => validate_int_range(value, 1024, 100 * 1024 * 1024)?,
        "QR_BOX_SIZE" => validate_int_range(value, 1, 50)?,
        "QR_BORDER" => validate_int_range(value, 0, 20)?,
        "QR_ERROR_CORRECTION" => {
            value.parse::<ErrorCorrection>()?;
        }
        "QR_DEFAULT_COLOR" | "QR_DEFAULT_BACKGROUND" => {
            value.parse::<Color>().map_err(|e| e.to_string())?;
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_defaults() {
        assert!(validate_setting("SERVER_HOST", "0.0.0.0").is_ok());
        assert!(validate_setting("SERVER_PORT", "8080").is_ok());
        assert!(validate_setting("MAX_UPLOAD_BYTES", "20971520").is_ok());
        assert!(validate_setting("QR_BOX_SIZE", "10").is_ok());
        assert!(validate_setting("QR_BORDER", "4").is_ok());
        assert!(validate_setting("QR_ERROR_CORRECTION", "M").is_ok());
        assert!(validate_setting("QR_DEFAULT_COLOR", "#000000").is_ok());
        assert!(validate_setting("QR_DEFAULT_BACKGROUND", "#FFFFFF").is_ok());
    }

    #[test]
    fn rejects_out_of_range_integers() {
        assert_eq!(
            validate_setting("QR_BOX_SIZE", "0").unwrap_err(),
            "must be between 1 and 50"
        );
        assert!(validate_setting("QR_BORDER", "21").is_err());
        assert!(validate_setting("MAX_UPLOAD_BYTES", "12").is_err());
        assert_eq!(
            validate_setting("QR_BORDER", "four").unwrap_err(),
            "must be an integer"
        );
    }

    #[test]
    fn rejects_bad_port_and_host() {
        assert!(validate_setting("SERVER_PORT", "70000").is_err());
        assert!(validate_setting("SERVER_HOST", "  ").is_err());
    }

    #[test]
    fn rejects_bad_colors_and_levels() {
        assert!(validate_setting("QR_DEFAULT_COLOR", "black").is_err());
        assert!(validate_setting("QR_ERROR_CORRECTION", "Z").is_err());
    }

    #[test]
    fn unknown_keys_pass() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }
}
