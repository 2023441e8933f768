//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use receipt_core::ReceiptCodeConfig;

const DEFAULT_DB_PATH: &str = "./receipts_dev.db";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Receipt code settings handed to the service.
    pub codes: ReceiptCodeConfig,

    /// SQLite receipt store path.
    pub db_path: PathBuf,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut codes = ReceiptCodeConfig::default();

        if let Some(store_id) = var("RECEIPT_STORE_ID") {
            codes = codes.with_store_id(store_id);
        }

        if let Some(base_url) = var("RECEIPT_LOOKUP_BASE_URL") {
            codes = codes.with_lookup_base_url(base_url.trim_end_matches('/'));
        }

        if let Some(service_base) = var("RECEIPT_QR_SERVICE_BASE") {
            codes = codes.with_qr_image_service_base(service_base);
        }

        if let Some(size) = pixels(&var, "RECEIPT_QR_SIZE")? {
            codes = codes.with_qr_size(size);
        }

        let width = pixels(&var, "RECEIPT_BARCODE_WIDTH")?;
        let height = pixels(&var, "RECEIPT_BARCODE_HEIGHT")?;
        if width.is_some() || height.is_some() {
            let width = width.unwrap_or(codes.default_barcode_width);
            let height = height.unwrap_or(codes.default_barcode_height);
            codes = codes.with_barcode_size(width, height);
        }

        let db_path = var("RECEIPT_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
            .into();

        Ok(CliConfig { codes, db_path })
    }
}

/// Reads a positive pixel dimension.
fn pixels(var: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u32>, ConfigError> {
    let Some(value) = var(key) else {
        return Ok(None);
    };

    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.codes, ReceiptCodeConfig::default());
        assert_eq!(config.db_path, PathBuf::from("./receipts_dev.db"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("RECEIPT_STORE_ID", "STORE-7"),
            ("RECEIPT_LOOKUP_BASE_URL", "https://shop.example/"),
            ("RECEIPT_QR_SIZE", "320"),
            ("RECEIPT_DB_PATH", "/tmp/r.db"),
        ])
        .unwrap();

        assert_eq!(config.codes.store_id, "STORE-7");
        assert_eq!(config.codes.lookup_base_url, "https://shop.example");
        assert_eq!(config.codes.default_qr_size, 320);
        assert_eq!(config.db_path, PathBuf::from("/tmp/r.db"));
    }

    #[test]
    fn test_barcode_size() {
        let config = load(&[("RECEIPT_BARCODE_HEIGHT", "120")]).unwrap();
        assert_eq!(config.codes.default_barcode_width, 200);
        assert_eq!(config.codes.default_barcode_height, 120);

        let config = load(&[
            ("RECEIPT_BARCODE_WIDTH", "400"),
            ("RECEIPT_BARCODE_HEIGHT", "100"),
        ])
        .unwrap();
        assert_eq!(config.codes.default_barcode_width, 400);
        assert_eq!(config.codes.default_barcode_height, 100);

        assert!(load(&[("RECEIPT_BARCODE_WIDTH", "-5")]).is_err());
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            load(&[("RECEIPT_QR_SIZE", "big")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(load(&[("RECEIPT_QR_SIZE", "0")]).is_err());
    }
}
