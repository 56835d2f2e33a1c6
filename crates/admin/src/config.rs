//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PANEL_BRAND_NAME` - Brand shown in the panel chrome (default: Mercado)
//! - `PANEL_DEFAULT_CURRENCY` - ISO 4217 code preselected on order forms
//!   (default: BRL; must exist in the currency table)
//! - `PANEL_RECORDS_PER_PAGE` - List page size (default: 25, min 1)

use thiserror::Error;

use crate::directory::{CurrencyLookup, IsoCurrencies};

const DEFAULT_BRAND_NAME: &str = "Mercado";
const DEFAULT_CURRENCY: &str = "BRL";
const DEFAULT_RECORDS_PER_PAGE: u16 = 25;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Panel-wide configuration.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Brand name shown in the panel chrome.
    pub brand_name: String,
    /// ISO 4217 code preselected on order forms.
    pub default_currency: String,
    /// List page size.
    pub records_per_page: u16,
}

impl PanelConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let brand_name = get_env_or_default("PANEL_BRAND_NAME", DEFAULT_BRAND_NAME);

        let default_currency = get_env_or_default("PANEL_DEFAULT_CURRENCY", DEFAULT_CURRENCY);
        let default_currency = validate_currency(&default_currency)?;

        let records_per_page = get_env_or_default(
            "PANEL_RECORDS_PER_PAGE",
            &DEFAULT_RECORDS_PER_PAGE.to_string(),
        );
        let records_per_page = parse_page_size(&records_per_page)?;

        Ok(Self {
            brand_name,
            default_currency,
            records_per_page,
        })
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            records_per_page: DEFAULT_RECORDS_PER_PAGE,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Normalize and check a currency code against the bundled table.
fn validate_currency(code: &str) -> Result<String, ConfigError> {
    let upper = code.to_ascii_uppercase();
    if IsoCurrencies.currency_name(&upper).is_some() {
        Ok(upper)
    } else {
        Err(ConfigError::InvalidEnvVar(
            "PANEL_DEFAULT_CURRENCY".to_string(),
            format!("unknown currency code: {code}"),
        ))
    }
}

/// Parse the page size, rejecting zero.
fn parse_page_size(raw: &str) -> Result<u16, ConfigError> {
    let parsed = raw.parse::<u16>().map_err(|e| {
        ConfigError::InvalidEnvVar("PANEL_RECORDS_PER_PAGE".to_string(), e.to_string())
    })?;

    if parsed == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "PANEL_RECORDS_PER_PAGE".to_string(),
            "must be at least 1".to_string(),
        ));
    }

    Ok(parsed)
}
