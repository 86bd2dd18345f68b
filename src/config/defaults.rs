use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{
    Config, ConversionConfig, CustomerPricingConfig, DedicatedIpConfig, EmailPricingConfig,
};
use crate::billing::usage::{DEFAULT_VOLUME_STEPS, DEFAULT_VOLUME_STEP_INDEX};
use crate::billing::{Bundle, Module, TierPrices};

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            margin_multiplier: dec!(1.60),
            fx_rate: dec!(18.50),
        }
    }
}

impl Default for EmailPricingConfig {
    fn default() -> Self {
        EmailPricingConfig {
            base_allowance: 6_000,
            base_cost: dec!(4),
            block_size: 1_000,
            overage_rate_per_block: dec!(0.75),
            volume_steps: DEFAULT_VOLUME_STEPS.to_vec(),
            default_step: DEFAULT_VOLUME_STEP_INDEX,
        }
    }
}

impl Default for DedicatedIpConfig {
    fn default() -> Self {
        DedicatedIpConfig {
            monthly_cost: dec!(40),
            setup_cost: dec!(20),
        }
    }
}

impl Default for CustomerPricingConfig {
    fn default() -> Self {
        CustomerPricingConfig {
            block_size: 1_000,
            block_price: dec!(50),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            conversion: ConversionConfig::default(),
            email: EmailPricingConfig::default(),
            dedicated_ip: DedicatedIpConfig::default(),
            customers: CustomerPricingConfig::default(),
            modules: default_modules(),
            bundles: default_bundles(),
        }
    }
}

fn module(
    id: &str,
    name: &str,
    category: &str,
    prices: [i64; 3],
    included_customers: Option<u64>,
) -> Module {
    Module {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        prices: TierPrices {
            starter: Decimal::from(prices[0]),
            professional: Decimal::from(prices[1]),
            enterprise: Decimal::from(prices[2]),
        },
        included_customers,
    }
}

/// The fourteen sellable hubs, in display order
pub fn default_modules() -> Vec<Module> {
    vec![
        module("communication", "Communication Hub", "Core", [199, 499, 1499], None),
        module("sales", "Sales Hub", "Revenue", [299, 899, 2999], Some(1_000)),
        module("crm", "CRM Hub", "Customer", [249, 749, 2499], Some(1_000)),
        module("service", "Service Hub", "Customer", [199, 599, 1999], Some(500)),
        module("retention", "Retention Hub", "Analytics", [399, 1199, 3999], Some(1_000)),
        module("network", "Network Ops Hub", "Operations", [499, 1499, 4999], None),
        module("call-center", "Call Center Hub", "Customer", [299, 899, 2999], None),
        module("marketing", "Marketing Hub", "Revenue", [299, 899, 2999], Some(1_000)),
        module("compliance", "Compliance Hub", "Operations", [199, 599, 1999], None),
        module("talent", "Staff Dome", "Operations", [149, 449, 1499], None),
        module("billing", "Billing Hub", "Revenue", [249, 749, 2499], Some(1_000)),
        module("finance", "Finance & FP&A Hub", "Revenue", [299, 899, 2999], None),
        module("products", "Product Hub", "Operations", [149, 449, 1499], None),
        module("portal", "Portal Hub", "Core", [199, 599, 1999], None),
    ]
}

fn module_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Customer platform bundles followed by the individual plans
pub fn default_bundles() -> Vec<Bundle> {
    vec![
        Bundle {
            id: "professional".to_string(),
            name: "Professional".to_string(),
            description: "Comprehensive ISP management software for growing businesses."
                .to_string(),
            monthly_price: dec!(3500),
            annual_price: Some(dec!(2800)),
            included_seats: 6,
            extra_seat_price: Some(dec!(45)),
            credits: Some(5_000),
            included_modules: module_ids(&[
                "marketing", "sales", "service", "crm", "billing", "portal",
            ]),
        },
        Bundle {
            id: "enterprise".to_string(),
            name: "Enterprise".to_string(),
            description:
                "Our most powerful platform with advanced features and unlimited customization."
                    .to_string(),
            monthly_price: dec!(9500),
            annual_price: Some(dec!(7600)),
            included_seats: 8,
            extra_seat_price: Some(dec!(75)),
            credits: Some(10_000),
            included_modules: module_ids(&[
                "marketing",
                "sales",
                "service",
                "crm",
                "billing",
                "portal",
                "retention",
                "network",
                "compliance",
            ]),
        },
        Bundle {
            id: "starter".to_string(),
            name: "Starter".to_string(),
            description: "Essential tools for new ISPs getting started.".to_string(),
            monthly_price: dec!(0),
            annual_price: None,
            included_seats: 1,
            extra_seat_price: None,
            credits: None,
            included_modules: module_ids(&["crm"]),
        },
        Bundle {
            id: "growth".to_string(),
            name: "Growth".to_string(),
            description: "Everything you need to scale your first 1,000 customers.".to_string(),
            monthly_price: dec!(999),
            annual_price: None,
            included_seats: 3,
            extra_seat_price: None,
            credits: None,
            included_modules: module_ids(&["crm", "sales"]),
        },
    ]
}
