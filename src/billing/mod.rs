pub mod bundles;
pub mod catalog;
pub mod entitlement;
pub mod period;
pub mod selection;
pub mod types;
pub mod usage;

#[cfg(test)]
mod tests;

pub use bundles::{Bundle, BundleQuote};
pub use catalog::Catalog;
pub use entitlement::CustomerBlockPricing;
pub use period::{effective_price, ANNUAL_DISCOUNT_MULTIPLIER};
pub use selection::Selection;
pub use types::{
    BillingPeriod, ExtraCustomers, Module, ModuleKey, PricingQuote, QuoteLine, Tier, TierPrices,
};
pub use usage::{ConversionRates, DedicatedQuote, DedicatedResource, UsageBreakdown, UsageRateCard};
