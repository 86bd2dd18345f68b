use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::{Bundle, Module};

/// Pricing book as written in `pricing.toml`.
///
/// This is the unchecked form; [`Config::validate`](super::book) turns it
/// into a [`PricingBook`](super::PricingBook). Counts are signed here so a
/// negative value reaches validation and gets a proper message instead of a
/// TOML type error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub email: EmailPricingConfig,
    #[serde(default)]
    pub dedicated_ip: DedicatedIpConfig,
    #[serde(default)]
    pub customers: CustomerPricingConfig,
    #[serde(default, rename = "modules")]
    pub modules: Vec<Module>,
    #[serde(default, rename = "bundles")]
    pub bundles: Vec<Bundle>,
}

/// Margin and FX shared by all vendor-cost add-ons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Markup applied to vendor cost, e.g. 1.60 for 60%
    pub margin_multiplier: Decimal,
    /// Source currency (USD) to ZAR
    pub fx_rate: Decimal,
}

/// Email volume pricing, vendor amounts in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailPricingConfig {
    pub base_allowance: i64,
    pub base_cost: Decimal,
    pub block_size: i64,
    pub overage_rate_per_block: Decimal,
    pub volume_steps: Vec<u64>,
    pub default_step: usize,
}

/// Dedicated sending IP, vendor amounts in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedIpConfig {
    pub monthly_cost: Decimal,
    #[serde(default)]
    pub setup_cost: Decimal,
}

/// Extra customers beyond a module's entitlement, amounts in ZAR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPricingConfig {
    pub block_size: i64,
    pub block_price: Decimal,
}
