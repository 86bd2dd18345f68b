use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// Service level a module is sold at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Starter,
    Professional,
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Starter, Tier::Professional, Tier::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Starter => "starter",
            Tier::Professional => "professional",
            Tier::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starter" => Ok(Tier::Starter),
            "professional" | "pro" => Ok(Tier::Professional),
            "enterprise" => Ok(Tier::Enterprise),
            _ => Err(PricingError::UnknownTier(s.to_string())),
        }
    }
}

/// Invoicing cadence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Annually,
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => f.write_str("monthly"),
            BillingPeriod::Annually => f.write_str("annually"),
        }
    }
}

/// Flat monthly price for each tier of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrices {
    pub starter: Decimal,
    pub professional: Decimal,
    pub enterprise: Decimal,
}

impl TierPrices {
    pub fn get(&self, tier: Tier) -> Decimal {
        match tier {
            Tier::Starter => self.starter,
            Tier::Professional => self.professional,
            Tier::Enterprise => self.enterprise,
        }
    }

    /// Whether prices rise (or stay level) from starter to enterprise
    pub fn is_ascending(&self) -> bool {
        self.starter <= self.professional && self.professional <= self.enterprise
    }
}

/// A sellable platform module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Customers bundled at no extra charge; `None` when the module has no
    /// customer entitlement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_customers: Option<u64>,
    pub prices: TierPrices,
}

impl Module {
    pub fn price(&self, tier: Tier) -> Decimal {
        self.prices.get(tier)
    }
}

/// Handle to a module in a [`Catalog`](super::catalog::Catalog).
///
/// Only the catalog hands these out, so a selection can never refer to a
/// module the catalog does not contain. Ordering follows catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(pub(crate) usize);

impl ModuleKey {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Customers requested beyond a module's entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtraCustomers {
    pub requested: u64,
    pub included: u64,
    pub extra: u64,
    pub blocks: u64,
    pub monthly_charge: Decimal,
}

/// One selected module in a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub module_id: String,
    pub module_name: String,
    pub tier: Tier,
    pub effective_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_customers: Option<ExtraCustomers>,
}

/// Derived, never-persisted summary of a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingQuote {
    pub period: BillingPeriod,
    pub lines: Vec<QuoteLine>,
    /// Sum of the per-line effective prices
    pub total: Decimal,
    /// Sum of extra-customer charges; reported apart from `total`
    pub customer_add_ons: Decimal,
}

impl PricingQuote {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
