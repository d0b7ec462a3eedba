//! Environment configuration

use std::env;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::RateFallback;

/// Application configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// VAT rate applied to the pricing subtotal (e.g. 0.24 for 24%)
    pub tax_rate: Decimal,
    /// How the engine treats catalog items with no configured rate
    pub rate_fallback: RateFallback,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let tax_rate = match env::var("TAX_RATE") {
            Ok(raw) => raw.parse::<Decimal>()?,
            Err(_) => dec!(0.24),
        };

        let rate_fallback = match env::var("PRICING_STRICT_RATES").as_deref() {
            Ok("1") | Ok("true") => RateFallback::Strict,
            _ => RateFallback::Lenient,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            tax_rate,
            rate_fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rate_is_24_percent() {
        std::env::remove_var("TAX_RATE");
        std::env::set_var("DATABASE_URL", "postgres://localhost/test");
        let config = Config::from_env().unwrap();
        assert_eq!(config.tax_rate, dec!(0.24));
        assert_eq!(config.rate_fallback, RateFallback::Lenient);
    }
}
