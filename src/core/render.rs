use std::fmt::Write;

use super::estimate::Estimate;
use crate::billing::period::annual_saving;
use crate::billing::{effective_price, BillingPeriod, Tier};
use crate::config::PricingBook;
use crate::utils::money::group_thousands;
use crate::utils::{format_usd, format_zar};

fn per_month(period: BillingPeriod) -> &'static str {
    match period {
        BillingPeriod::Monthly => "/mo",
        BillingPeriod::Annually => "/mo, billed annually",
    }
}

/// Catalog table with each tier priced for `period`, followed by bundles
pub fn render_catalog(book: &PricingBook, period: BillingPeriod) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Modules ({})", period);
    let _ = writeln!(
        out,
        "  {:<16} {:<20} {:>10} {:>13} {:>11}  {}",
        "ID", "NAME", "STARTER", "PROFESSIONAL", "ENTERPRISE", "INCLUDES"
    );

    for (_, module) in book.catalog.iter() {
        let prices: Vec<String> = Tier::ALL
            .iter()
            .map(|tier| format_zar(effective_price(module.price(*tier), period)))
            .collect();
        let includes = module
            .included_customers
            .map(|n| format!("{} customers", group_thousands(&n.to_string())))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<16} {:<20} {:>10} {:>13} {:>11}  {}",
            module.id, module.name, prices[0], prices[1], prices[2], includes
        );
    }

    if !book.bundles.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Bundles ({})", period);
        for bundle in &book.bundles {
            let price = if bundle.is_free() {
                "Free".to_string()
            } else {
                format!("{}{}", format_zar(bundle.price(period)), per_month(period))
            };
            let seats = match bundle.extra_seat_price {
                Some(extra) => format!(
                    "{} seats, extra seats {}/mo",
                    bundle.included_seats,
                    format_zar(extra)
                ),
                None => format!("{} seats", bundle.included_seats),
            };
            let _ = writeln!(out, "  {:<16} {:<28} {}", bundle.id, price, seats);
        }
    }

    let customers = &book.customer_pricing;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Additional customers are sold in blocks of {} at {}/mo.",
        group_thousands(&customers.block_size().to_string()),
        format_zar(customers.block_price())
    );

    out
}

/// JSON form of [`render_catalog`]: modules and bundles
pub fn catalog_json(book: &PricingBook) -> serde_json::Value {
    serde_json::json!({
        "modules": book.catalog.modules(),
        "bundles": book.bundles,
    })
}

/// Human-readable estimate
pub fn render_estimate(estimate: &Estimate, book: &PricingBook) -> String {
    let mut out = String::new();
    let period = estimate.period;

    if let Some(quote) = &estimate.modules {
        let _ = writeln!(out, "Modules ({})", period);
        for line in &quote.lines {
            let _ = writeln!(
                out,
                "  {:<20} {:<13} {:>10}{}",
                line.module_name,
                line.tier,
                format_zar(line.effective_price),
                per_month(period)
            );
            if let Some(extra) = line.extra_customers.filter(|e| e.blocks > 0) {
                let _ = writeln!(
                    out,
                    "    + {} extra customers ({} x {}) {}/mo",
                    group_thousands(&extra.extra.to_string()),
                    extra.blocks,
                    format_zar(book.customer_pricing.block_price()),
                    format_zar(extra.monthly_charge)
                );
            }
        }
        let _ = writeln!(out, "  Subtotal: {}{}", format_zar(quote.total), per_month(period));
        if period == BillingPeriod::Annually {
            let saving: rust_decimal::Decimal = quote
                .lines
                .iter()
                .filter_map(|l| book.catalog.get(&l.module_id).map(|m| annual_saving(m.price(l.tier))))
                .sum();
            let _ = writeln!(out, "  Annual billing saves {}/mo", format_zar(saving));
        }
    }

    if let Some(bundle) = &estimate.bundle {
        let _ = writeln!(out, "Bundle: {} ({})", bundle.bundle_name, period);
        let _ = writeln!(out, "  Base: {}{}", format_zar(bundle.base_price), per_month(period));
        if bundle.extra_seats > 0 {
            let _ = writeln!(
                out,
                "  Extra seats: {} = {}/mo",
                bundle.extra_seats,
                format_zar(bundle.extra_seat_cost)
            );
        }
    }

    if let Some(email) = &estimate.email {
        let card = &book.email;
        let b = &email.breakdown;
        let _ = writeln!(
            out,
            "Email: {} sends/month = {}/mo",
            group_thousands(&b.units.to_string()),
            format_zar(b.price)
        );
        let _ = writeln!(
            out,
            "  {} base covers {}; {} overage blocks at {} per {}",
            format_usd(card.base_cost()),
            group_thousands(&card.base_allowance().to_string()),
            b.overage_blocks,
            format_usd(card.overage_rate_per_block()),
            group_thousands(&card.block_size().to_string())
        );
    }

    if let Some(ip) = &estimate.dedicated_ip {
        let _ = writeln!(
            out,
            "Dedicated IP: {}/mo + {} setup",
            format_zar(ip.monthly),
            format_zar(ip.setup)
        );
    }

    if out.is_empty() {
        return "Nothing selected. Try --list, or --select MODULE=TIER.\n".to_string();
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {}/mo", format_zar(estimate.monthly_total));
    if !estimate.setup_total.is_zero() {
        let _ = writeln!(out, "One-time setup: {}", format_zar(estimate.setup_total));
    }
    let _ = writeln!(out, "Prices shown are subject to applicable tax.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::Selection;
    use crate::config::Config;
    use crate::core::estimate::EstimateRequest;

    fn book() -> PricingBook {
        Config::default().validate().unwrap()
    }

    #[test]
    fn test_render_catalog_lists_every_module() {
        let book = book();
        let text = render_catalog(&book, BillingPeriod::Monthly);
        assert!(text.contains("communication"));
        assert!(text.contains("R1,499"));
        assert!(text.contains("1,000 customers"));
        assert!(text.contains("Free"));
        assert!(text.contains("blocks of 1,000 at R50/mo"));

        let annual = render_catalog(&book, BillingPeriod::Annually);
        assert!(annual.contains("R1,199"));
        assert!(annual.contains("R2,800/mo, billed annually"));
    }

    #[test]
    fn test_catalog_json_matches_text_listing() {
        let book = book();
        let json = catalog_json(&book);
        assert_eq!(json["modules"].as_array().map(Vec::len), Some(14));
        assert_eq!(json["modules"][0]["id"], "communication");
        assert_eq!(json["bundles"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["bundles"][1]["id"], "enterprise");
        assert_eq!(json["bundles"][1]["annual_price"], "7600");
    }

    #[test]
    fn test_render_empty_estimate() {
        let book = book();
        let estimate =
            Estimate::build(&book, &Selection::new(), &EstimateRequest::default()).unwrap();
        assert!(render_estimate(&estimate, &book).starts_with("Nothing selected"));
    }

    #[test]
    fn test_render_estimate() {
        let book = book();
        let mut selection = Selection::new();
        selection.toggle(book.catalog.key("communication").unwrap(), Tier::Professional);
        selection.toggle(book.catalog.key("sales").unwrap(), Tier::Starter);
        let request = EstimateRequest {
            period: BillingPeriod::Annually,
            email_step: Some(3),
            dedicated_ip: true,
            ..Default::default()
        };
        let estimate = Estimate::build(&book, &selection, &request).unwrap();
        let text = render_estimate(&estimate, &book);

        assert!(text.contains("Communication Hub"));
        assert!(text.contains("R399/mo, billed annually"));
        // 399 + 239
        assert!(text.contains("Subtotal: R638"));
        // 100 + 60
        assert!(text.contains("saves R160/mo"));
        assert!(text.contains("Email: 10,000 sends/month = R207/mo"));
        assert!(text.contains("Dedicated IP: R1,184/mo + R592 setup"));
        // 638 + 207 + 1184
        assert!(text.contains("Total: R2,029/mo"));
        assert!(text.contains("One-time setup: R592"));
    }
}
