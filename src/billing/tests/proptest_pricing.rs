use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::billing::{
    effective_price, BillingPeriod, Catalog, Module, Selection, Tier, TierPrices, UsageRateCard,
};

fn tier_strategy() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::Starter),
        Just(Tier::Professional),
        Just(Tier::Enterprise),
    ]
}

fn period_strategy() -> impl Strategy<Value = BillingPeriod> {
    prop_oneof![Just(BillingPeriod::Monthly), Just(BillingPeriod::Annually)]
}

/// Prices in cents, so fractional Rand values get exercised too
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec((price_strategy(), price_strategy(), price_strategy()), 1..12).prop_map(
        |prices| {
            let modules = prices
                .into_iter()
                .enumerate()
                .map(|(i, (starter, professional, enterprise))| Module {
                    id: format!("module-{}", i),
                    name: format!("Module {}", i),
                    category: String::new(),
                    prices: TierPrices {
                        starter,
                        professional,
                        enterprise,
                    },
                    included_customers: None,
                })
                .collect();
            Catalog::new(modules).expect("generated catalog is valid")
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_annual_never_exceeds_monthly(price in price_strategy()) {
        let monthly = effective_price(price, BillingPeriod::Monthly);
        let annual = effective_price(price, BillingPeriod::Annually);
        prop_assert!(annual <= monthly, "annual {} > monthly {}", annual, monthly);
        prop_assert_eq!(effective_price(price, BillingPeriod::Annually), annual);
    }

    #[test]
    fn test_toggle_twice_restores_selection(
        catalog in catalog_strategy(),
        picks in prop::collection::vec((0usize..12, tier_strategy()), 0..8),
        index in 0usize..12,
        tier in tier_strategy(),
    ) {
        let mut selection = Selection::new();
        for (i, t) in picks {
            if let Some((key, _)) = catalog.iter().nth(i) {
                selection.toggle(key, t);
            }
        }
        let Some((key, _)) = catalog.iter().nth(index % catalog.len()) else {
            return Ok(());
        };

        let before = selection.clone();
        selection.toggle(key, tier);
        selection.toggle(key, tier);
        match before.tier(key) {
            // Select then deselect, or deselect then reselect
            None => {
                prop_assert_eq!(&selection, &before);
            }
            Some(current) if current == tier => {
                prop_assert_eq!(&selection, &before);
            }
            // Switch tiers, then the second toggle deselects
            Some(_) => {
                prop_assert_eq!(selection.tier(key), None);
            }
        }
    }

    #[test]
    fn test_total_is_additive(
        catalog in catalog_strategy(),
        picks in prop::collection::vec((0usize..12, tier_strategy()), 1..8),
        period in period_strategy(),
    ) {
        let mut selection = Selection::new();
        for (i, t) in picks {
            if let Some((key, _)) = catalog.iter().nth(i % catalog.len()) {
                if selection.tier(key).is_none() {
                    selection.toggle(key, t);
                }
            }
        }

        let expected: Decimal = selection
            .selected_products(&catalog)
            .iter()
            .map(|(m, t)| effective_price(m.price(*t), period))
            .sum();
        let total = selection.total(&catalog, period);
        prop_assert_eq!(total, expected);

        let keys: Vec<_> = catalog
            .iter()
            .filter(|(key, _)| selection.is_selected(*key))
            .map(|(key, m)| (key, m.clone()))
            .collect();
        for (key, module) in keys {
            let tier = selection.tier(key).expect("selected");
            let line_price = effective_price(module.price(tier), period);
            let mut reduced = selection.clone();
            reduced.remove(key);
            prop_assert_eq!(reduced.total(&catalog, period), total - line_price);
        }
    }

    #[test]
    fn test_usage_cost_is_monotonic(a in -10_000i64..2_000_000, b in -10_000i64..2_000_000) {
        let card = UsageRateCard::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(card.cost(low) <= card.cost(high));
    }

    #[test]
    fn test_usage_within_allowance_is_flat(units in 1i64..=6_000) {
        let card = UsageRateCard::default();
        prop_assert_eq!(card.cost(units), card.cost(6_000));
    }
}
