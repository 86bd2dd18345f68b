use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::catalog::Catalog;
use super::entitlement::CustomerBlockPricing;
use super::period::effective_price;
use super::{BillingPeriod, Module, ModuleKey, PricingQuote, QuoteLine, Tier};

/// Which modules a buyer has picked, and at which tier.
///
/// Owned by whoever drives the UI or CLI; every method is a plain state
/// update with no side effects. Keys are ordered by catalog position, so
/// iteration already follows catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    tiers: BTreeMap<ModuleKey, Tier>,
    customers: BTreeMap<ModuleKey, u64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `tier` for a module, or deselect it if `tier` is already chosen.
    ///
    /// Picking a different tier for a selected module switches tiers.
    pub fn toggle(&mut self, key: ModuleKey, tier: Tier) {
        if self.tiers.get(&key) == Some(&tier) {
            self.tiers.remove(&key);
            tracing::debug!(module = key.index(), %tier, "Module deselected");
        } else {
            self.tiers.insert(key, tier);
            tracing::debug!(module = key.index(), %tier, "Module selected");
        }
    }

    /// Drop a module from the selection regardless of its tier
    pub fn remove(&mut self, key: ModuleKey) {
        self.tiers.remove(&key);
        self.customers.remove(&key);
    }

    pub fn clear(&mut self) {
        self.tiers.clear();
        self.customers.clear();
    }

    pub fn tier(&self, key: ModuleKey) -> Option<Tier> {
        self.tiers.get(&key).copied()
    }

    pub fn is_selected(&self, key: ModuleKey) -> bool {
        self.tiers.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Record how many customers the buyer wants on a module
    pub fn set_customers(&mut self, key: ModuleKey, count: u64) {
        self.customers.insert(key, count);
    }

    pub fn customers(&self, key: ModuleKey) -> Option<u64> {
        self.customers.get(&key).copied()
    }

    /// Selected modules with their tiers, in catalog order
    pub fn selected_products<'a>(&self, catalog: &'a Catalog) -> Vec<(&'a Module, Tier)> {
        self.tiers
            .iter()
            .map(|(key, tier)| (catalog.module(*key), *tier))
            .collect()
    }

    /// Sum of effective prices of every selected module
    pub fn total(&self, catalog: &Catalog, period: BillingPeriod) -> Decimal {
        self.selected_products(catalog)
            .into_iter()
            .map(|(module, tier)| effective_price(module.price(tier), period))
            .sum()
    }

    /// Build the full quote for the current selection
    pub fn quote(
        &self,
        catalog: &Catalog,
        customer_pricing: &CustomerBlockPricing,
        period: BillingPeriod,
    ) -> PricingQuote {
        let lines: Vec<QuoteLine> = self
            .tiers
            .iter()
            .map(|(key, tier)| {
                let module = catalog.module(*key);
                let extra_customers = match (module.included_customers, self.customers(*key)) {
                    (Some(included), Some(requested)) => {
                        Some(customer_pricing.extra_customers(included, requested))
                    }
                    _ => None,
                };

                QuoteLine {
                    module_id: module.id.clone(),
                    module_name: module.name.clone(),
                    tier: *tier,
                    effective_price: effective_price(module.price(*tier), period),
                    extra_customers,
                }
            })
            .collect();

        let total = lines.iter().map(|l| l.effective_price).sum();
        let customer_add_ons = lines
            .iter()
            .filter_map(|l| l.extra_customers.map(|e| e.monthly_charge))
            .sum();

        PricingQuote {
            period,
            lines,
            total,
            customer_add_ons,
        }
    }
}
