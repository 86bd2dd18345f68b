use ispquote::billing::{BillingPeriod, Tier};
use ispquote::config::ConfigLoader;
use ispquote::core::{Estimate, EstimateRequest};
use rust_decimal_macros::dec;
use std::fs;

const BOOK: &str = r#"
[email]
base_allowance = 6000
base_cost = 4
block_size = 1000
overage_rate_per_block = "0.75"
volume_steps = [1000, 6000, 10000]
default_step = 1

[[modules]]
id = "a"
name = "Module A"
prices = { starter = 199, professional = 499, enterprise = 1499 }

[[modules]]
id = "b"
name = "Module B"
included_customers = 1000
prices = { starter = 199, professional = 599, enterprise = 1999 }
"#;

fn load_book() -> ispquote::config::PricingBook {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricing.toml");
    fs::write(&path, BOOK).unwrap();

    let config = ConfigLoader::load_from_path(&path).unwrap();
    config.validate().unwrap()
}

#[test]
fn annual_discount_applies_to_tier_price() {
    let book = load_book();
    let a = book.catalog.key("a").unwrap();
    let module = book.catalog.module(a);

    assert_eq!(
        ispquote::billing::effective_price(module.price(Tier::Professional), BillingPeriod::Annually),
        dec!(399)
    );
}

#[test]
fn selection_totals_follow_billing_period() {
    let book = load_book();
    let mut selection = ispquote::billing::Selection::new();
    selection.toggle(book.catalog.key("a").unwrap(), Tier::Professional);
    selection.toggle(book.catalog.key("b").unwrap(), Tier::Starter);

    assert_eq!(book.quote(&selection, BillingPeriod::Monthly).total, dec!(698));
    // 399 + 159
    assert_eq!(book.quote(&selection, BillingPeriod::Annually).total, dec!(558));

    // Picking the same tier again removes the module
    selection.toggle(book.catalog.key("b").unwrap(), Tier::Starter);
    assert_eq!(book.quote(&selection, BillingPeriod::Monthly).total, dec!(499));
}

#[test]
fn email_volume_estimates() {
    let book = load_book();
    let selection = ispquote::billing::Selection::new();

    let at_allowance = Estimate::build(
        &book,
        &selection,
        &EstimateRequest {
            emails: Some(6_000),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(at_allowance.monthly_total, dec!(118));

    let by_step = Estimate::build(
        &book,
        &selection,
        &EstimateRequest {
            email_step: Some(2),
            dedicated_ip: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(by_step.email.as_ref().unwrap().breakdown.units, 10_000);
    // 207 + 1184
    assert_eq!(by_step.monthly_total, dec!(1391));
    assert_eq!(by_step.setup_total, dec!(592));
}

#[test]
fn estimate_serializes_to_json() {
    let book = load_book();
    let mut selection = ispquote::billing::Selection::new();
    selection.toggle(book.catalog.key("a").unwrap(), Tier::Starter);

    let estimate =
        Estimate::build(&book, &selection, &EstimateRequest::default()).unwrap();
    let json = serde_json::to_value(&estimate).unwrap();

    assert_eq!(json["period"], "monthly");
    assert_eq!(json["modules"]["lines"][0]["module_id"], "a");
    assert_eq!(json["monthly_total"], "199");
    assert!(json.get("email").is_none());
}
