use clap::Parser;
use std::path::PathBuf;

use crate::billing::{BillingPeriod, Catalog, ModuleKey, Selection, Tier};
use crate::error::{PricingError, Result};

#[derive(Parser, Debug)]
#[command(name = "ispquote")]
#[command(version, about = "Module pricing and add-on quotes for ISP platform plans")]
pub struct Cli {
    /// Pricing book to use instead of the default location
    #[arg(long = "config-file", value_name = "PATH", env = "ISPQUOTE_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Initialize the pricing book with built-in prices
    #[arg(long = "init")]
    pub init: bool,

    /// Print the pricing book as TOML
    #[arg(long = "print")]
    pub print: bool,

    /// Validate the pricing book
    #[arg(long = "check")]
    pub check: bool,

    /// List modules, tier prices and bundles
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Select a module at a tier (repeatable, e.g. -s sales=professional).
    /// Selecting the same module at the same tier twice deselects it
    #[arg(short = 's', long = "select", value_name = "MODULE=TIER")]
    pub select: Vec<String>,

    /// Customers wanted on a module with an entitlement (repeatable)
    #[arg(long = "customers", value_name = "MODULE=COUNT")]
    pub customers: Vec<String>,

    /// Quote annual billing (20% off module prices)
    #[arg(short = 'a', long = "annual")]
    pub annual: bool,

    /// Price this many email sends per month
    #[arg(long = "emails", value_name = "COUNT", allow_negative_numbers = true, conflicts_with = "email_step")]
    pub emails: Option<i64>,

    /// Price an email volume step by index (0 = smallest)
    #[arg(long = "email-step", value_name = "INDEX")]
    pub email_step: Option<usize>,

    /// Add the dedicated sending IP
    #[arg(long = "dedicated-ip")]
    pub dedicated_ip: bool,

    /// Quote a platform bundle or individual plan
    #[arg(short = 'b', long = "bundle", value_name = "ID")]
    pub bundle: Option<String>,

    /// Seats on the bundle (defaults to its included seats)
    #[arg(long = "seats", value_name = "SEATS", requires = "bundle")]
    pub seats: Option<u32>,

    /// Output JSON instead of text
    #[arg(long = "json")]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn period(&self) -> BillingPeriod {
        if self.annual {
            BillingPeriod::Annually
        } else {
            BillingPeriod::Monthly
        }
    }

    /// Whether anything beyond config management was asked for
    pub fn wants_estimate(&self) -> bool {
        !self.select.is_empty()
            || !self.customers.is_empty()
            || self.emails.is_some()
            || self.email_step.is_some()
            || self.dedicated_ip
            || self.bundle.is_some()
    }

    /// Replay `--select` and `--customers` onto a fresh selection
    pub fn selection(&self, catalog: &Catalog) -> Result<Selection> {
        let mut selection = Selection::new();

        for raw in &self.select {
            let (key, tier) = parse_module_tier(catalog, raw)?;
            selection.toggle(key, tier);
        }

        for raw in &self.customers {
            let (key, count) = parse_module_count(catalog, raw)?;
            if catalog.module(key).included_customers.is_none() {
                tracing::warn!(
                    module = %catalog.module(key).id,
                    "Module has no customer entitlement, count ignored"
                );
            } else if !selection.is_selected(key) {
                tracing::warn!(
                    module = %catalog.module(key).id,
                    "Customer count has no effect until the module is selected"
                );
            }
            selection.set_customers(key, count);
        }

        Ok(selection)
    }
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .ok_or_else(|| PricingError::InvalidSelection(raw.to_string()))
}

/// Parse `MODULE=TIER`
pub fn parse_module_tier(catalog: &Catalog, raw: &str) -> Result<(ModuleKey, Tier)> {
    let (module, tier) = split_pair(raw)?;
    Ok((catalog.resolve(module)?, tier.parse()?))
}

/// Parse `MODULE=COUNT`; thousands separators are accepted
pub fn parse_module_count(catalog: &Catalog, raw: &str) -> Result<(ModuleKey, u64)> {
    let (module, count) = split_pair(raw)?;
    let key = catalog.resolve(module)?;
    let count = count
        .replace([',', '_'], "")
        .parse::<u64>()
        .map_err(|_| PricingError::InvalidCount(count.to_string()))?;
    Ok((key, count))
}
