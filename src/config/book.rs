use rust_decimal::Decimal;
use std::collections::HashSet;

use super::types::{Config, ConversionConfig, CustomerPricingConfig, EmailPricingConfig};
use crate::billing::{
    BillingPeriod, Bundle, Catalog, Tier, ConversionRates, CustomerBlockPricing, DedicatedResource,
    PricingQuote, Selection, UsageRateCard,
};
use crate::error::{ConfigError, PricingError};

/// Everything needed to quote, checked once at load time.
///
/// Once a book exists every pricing operation on it is infallible.
#[derive(Debug, Clone)]
pub struct PricingBook {
    pub catalog: Catalog,
    pub email: UsageRateCard,
    pub dedicated_ip: DedicatedResource,
    pub customer_pricing: CustomerBlockPricing,
    pub bundles: Vec<Bundle>,
}

impl PricingBook {
    pub fn bundle(&self, id: &str) -> Result<&Bundle, PricingError> {
        let id = id.trim();
        self.bundles
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| PricingError::UnknownBundle(id.to_string()))
    }

    pub fn rates(&self) -> &ConversionRates {
        self.email.rates()
    }

    pub fn quote(&self, selection: &Selection, period: BillingPeriod) -> PricingQuote {
        selection.quote(&self.catalog, &self.customer_pricing, period)
    }
}

impl TryFrom<&Config> for PricingBook {
    type Error = ConfigError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        config.validate()
    }
}

impl Config {
    /// Check every field and build the validated book
    pub fn validate(&self) -> Result<PricingBook, ConfigError> {
        let rates = validate_conversion(&self.conversion)?;
        let email = validate_email(&self.email, rates)?;

        non_negative("dedicated_ip.monthly_cost", self.dedicated_ip.monthly_cost)?;
        non_negative("dedicated_ip.setup_cost", self.dedicated_ip.setup_cost)?;
        let dedicated_ip =
            DedicatedResource::new(self.dedicated_ip.monthly_cost, self.dedicated_ip.setup_cost);

        let customer_pricing = validate_customers(&self.customers)?;
        let catalog = Catalog::new(self.modules.clone())?;
        validate_bundles(&self.bundles, &catalog)?;
        let ceiling = check_ceilings(
            &catalog,
            &email,
            &dedicated_ip,
            &customer_pricing,
            &self.bundles,
        )?;

        tracing::debug!(
            modules = catalog.len(),
            bundles = self.bundles.len(),
            margin = %rates.margin_multiplier(),
            fx_rate = %rates.fx_rate(),
            %ceiling,
            "Pricing book validated"
        );

        Ok(PricingBook {
            catalog,
            email,
            dedicated_ip,
            customer_pricing,
            bundles: self.bundles.clone(),
        })
    }
}

fn is_negative(value: Decimal) -> bool {
    value.is_sign_negative() && !value.is_zero()
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), ConfigError> {
    if is_negative(value) {
        return Err(ConfigError::NegativeAmount { field, value });
    }
    Ok(())
}

fn validate_conversion(config: &ConversionConfig) -> Result<ConversionRates, ConfigError> {
    non_negative("conversion.margin_multiplier", config.margin_multiplier)?;
    if config.fx_rate <= Decimal::ZERO {
        return Err(ConfigError::NonPositiveFxRate(config.fx_rate));
    }
    if config.margin_multiplier < Decimal::ONE {
        tracing::warn!(
            margin = %config.margin_multiplier,
            "Margin multiplier below 1.0 sells add-ons under cost"
        );
    }
    Ok(ConversionRates::new(config.margin_multiplier, config.fx_rate))
}

fn validate_email(
    config: &EmailPricingConfig,
    rates: ConversionRates,
) -> Result<UsageRateCard, ConfigError> {
    let base_allowance =
        u64::try_from(config.base_allowance).map_err(|_| ConfigError::NegativeCount {
            field: "email.base_allowance",
            value: config.base_allowance,
        })?;
    non_negative("email.base_cost", config.base_cost)?;
    non_negative("email.overage_rate_per_block", config.overage_rate_per_block)?;

    if config.block_size <= 0 {
        return Err(ConfigError::NonPositiveBlockSize {
            field: "email.block_size",
            value: config.block_size,
        });
    }

    if config.volume_steps.is_empty() {
        return Err(ConfigError::EmptyVolumeSteps);
    }
    for pair in config.volume_steps.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ConfigError::UnorderedVolumeSteps {
                previous: pair[0],
                next: pair[1],
            });
        }
    }
    if config.default_step >= config.volume_steps.len() {
        return Err(ConfigError::DefaultStepOutOfRange {
            index: config.default_step,
            len: config.volume_steps.len(),
        });
    }

    Ok(UsageRateCard::new(
        base_allowance,
        config.base_cost,
        config.block_size as u64,
        config.overage_rate_per_block,
        rates,
        config.volume_steps.clone(),
        config.default_step,
    ))
}

fn validate_customers(config: &CustomerPricingConfig) -> Result<CustomerBlockPricing, ConfigError> {
    if config.block_size <= 0 {
        return Err(ConfigError::NonPositiveBlockSize {
            field: "customers.block_size",
            value: config.block_size,
        });
    }
    non_negative("customers.block_price", config.block_price)?;
    Ok(CustomerBlockPricing::new(
        config.block_size as u64,
        config.block_price,
    ))
}

fn validate_bundles(bundles: &[Bundle], catalog: &Catalog) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for bundle in bundles {
        if !seen.insert(bundle.id.as_str()) {
            return Err(ConfigError::DuplicateBundle(bundle.id.clone()));
        }
        non_negative("bundles.monthly_price", bundle.monthly_price)?;
        if let Some(annual) = bundle.annual_price {
            non_negative("bundles.annual_price", annual)?;
            if annual > bundle.monthly_price {
                tracing::warn!(
                    bundle = %bundle.id,
                    monthly = %bundle.monthly_price,
                    annual = %annual,
                    "Annual price is higher than the monthly price"
                );
            }
        }
        if let Some(extra) = bundle.extra_seat_price {
            non_negative("bundles.extra_seat_price", extra)?;
        }
        if let Some(unknown) = bundle
            .included_modules
            .iter()
            .find(|m| !catalog.contains(m))
        {
            return Err(ConfigError::BundleUnknownModule {
                bundle: bundle.id.clone(),
                module: unknown.clone(),
            });
        }
    }
    Ok(())
}

fn bounded(field: &'static str, value: Option<Decimal>) -> Result<Decimal, ConfigError> {
    value.ok_or(ConfigError::AmountOverflow { field })
}

/// Price every part at the largest quantity it can be quoted for.
///
/// Pricing arithmetic is monotonic in quantity and all amounts are
/// non-negative, so if these worst cases fit in a `Decimal` every real quote
/// does too. The extra Rand covers round-half-up at the ceiling.
fn check_ceilings(
    catalog: &Catalog,
    email: &UsageRateCard,
    dedicated_ip: &DedicatedResource,
    customers: &CustomerBlockPricing,
    bundles: &[Bundle],
) -> Result<Decimal, ConfigError> {
    let rates = email.rates();
    let convert = |field: &'static str, cost: Decimal| {
        bounded(
            field,
            cost.checked_mul(rates.margin_multiplier())
                .and_then(|c| c.checked_mul(rates.fx_rate()))
                .and_then(|c| c.checked_add(Decimal::ONE)),
        )
    };

    let email_blocks = Decimal::from(u64::MAX.div_ceil(email.block_size()));
    let email_basis = bounded(
        "email price",
        email_blocks
            .checked_mul(email.overage_rate_per_block())
            .and_then(|o| o.checked_add(email.base_cost())),
    )?;
    let email_price = convert("email price", email_basis)?;
    let ip_monthly = convert("dedicated IP price", dedicated_ip.monthly_cost())?;
    convert("dedicated IP setup fee", dedicated_ip.setup_cost())?;

    let customer_blocks = Decimal::from(u64::MAX.div_ceil(customers.block_size()));
    let customer_add_ons = bounded(
        "customer block price",
        customers
            .block_price()
            .checked_mul(customer_blocks)
            .and_then(|line| line.checked_mul(Decimal::from(catalog.len()))),
    )?;

    let modules = catalog.iter().try_fold(Decimal::ZERO, |sum, (_, module)| {
        let highest = Tier::ALL
            .iter()
            .map(|tier| module.price(*tier))
            .max()
            .unwrap_or_default();
        bounded("catalog total", sum.checked_add(highest))
    })?;

    let bundle = bundles.iter().try_fold(Decimal::ZERO, |highest, bundle| {
        let base = bundle
            .annual_price
            .map_or(bundle.monthly_price, |annual| annual.max(bundle.monthly_price));
        let seats = bundle
            .extra_seat_price
            .unwrap_or_default()
            .checked_mul(Decimal::from(u32::MAX));
        let total = bounded("bundle price", seats.and_then(|s| s.checked_add(base)))?;
        Ok::<_, ConfigError>(highest.max(total))
    })?;

    [customer_add_ons, bundle, email_price, ip_monthly]
        .into_iter()
        .try_fold(modules, |sum, part| {
            bounded("estimate total", sum.checked_add(part))
        })
}
