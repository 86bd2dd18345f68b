//! Error types for pricing book loading and quoting.
//!
//! A valid [`PricingBook`](crate::config::PricingBook) makes every pricing
//! operation total, so almost all failures surface as [`ConfigError`] while
//! the book is loaded. [`PricingError`] covers the remaining user-input
//! failures at the CLI boundary (unknown ids, malformed selections).

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PricingError>;

/// Invalid pricing book content, reported at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read pricing book {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write pricing book {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pricing book is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize pricing book: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Catalog has no modules")]
    EmptyCatalog,

    #[error("Module at position {0} has an empty id")]
    EmptyModuleId(usize),

    #[error("Duplicate module id: {0}")]
    DuplicateModule(String),

    #[error("Module '{module}' has a negative {tier} price ({price})")]
    NegativeTierPrice {
        module: String,
        tier: &'static str,
        price: Decimal,
    },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} must not be negative (got {value})")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveBlockSize { field: &'static str, value: i64 },

    #[error("FX rate must be greater than zero (got {0})")]
    NonPositiveFxRate(Decimal),

    #[error("{field} overflows at the largest quantity it can be quoted for")]
    AmountOverflow { field: &'static str },

    #[error("Email volume steps must not be empty")]
    EmptyVolumeSteps,

    #[error("Email volume steps must be strictly ascending ({previous} then {next})")]
    UnorderedVolumeSteps { previous: u64, next: u64 },

    #[error("Default email step {index} is out of range ({len} steps configured)")]
    DefaultStepOutOfRange { index: usize, len: usize },

    #[error("Duplicate bundle id: {0}")]
    DuplicateBundle(String),

    #[error("Bundle '{bundle}' includes unknown module '{module}'")]
    BundleUnknownModule { bundle: String, module: String },
}

/// Failures while applying user selections to a valid pricing book.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Unknown bundle: {0}")]
    UnknownBundle(String),

    #[error("Unknown tier '{0}'. Expected: starter, professional, enterprise")]
    UnknownTier(String),

    #[error("Invalid selection '{0}'. Expected MODULE=VALUE")]
    InvalidSelection(String),

    #[error("Invalid customer count '{0}'")]
    InvalidCount(String),

    #[error("Bundle '{bundle}' includes {included} seats and sells no extra seats ({requested} requested)")]
    SeatLimitExceeded {
        bundle: String,
        included: u32,
        requested: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_error_messages_name_the_field() {
        let err = ConfigError::NegativeTierPrice {
            module: "crm".to_string(),
            tier: "starter",
            price: dec!(-1),
        };
        assert_eq!(
            err.to_string(),
            "Module 'crm' has a negative starter price (-1)"
        );

        let err = ConfigError::NonPositiveBlockSize {
            field: "email.block_size",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "email.block_size must be greater than zero (got 0)"
        );
    }

    #[test]
    fn test_overflow_message() {
        let err = ConfigError::AmountOverflow {
            field: "conversion.fx_rate",
        };
        assert_eq!(
            err.to_string(),
            "conversion.fx_rate overflows at the largest quantity it can be quoted for"
        );
    }

    #[test]
    fn test_config_error_converts_into_pricing_error() {
        let err: PricingError = ConfigError::EmptyCatalog.into();
        assert_eq!(err.to_string(), "Catalog has no modules");
    }
}
