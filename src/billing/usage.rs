//! Usage-based add-ons priced from a vendor's USD cost.
//!
//! Email sending is billed as a flat base covering an allowance plus whole
//! overage blocks; a dedicated sending IP is a flat monthly fee. Both go
//! through the same [`ConversionRates`] so a margin or FX change moves them
//! together.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::utils::money::round_half_up;

/// Default email volume breakpoints (sends per month)
pub const DEFAULT_VOLUME_STEPS: [u64; 10] = [
    1_000, 3_000, 6_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000,
];

/// Index of 6,000 sends in [`DEFAULT_VOLUME_STEPS`]
pub const DEFAULT_VOLUME_STEP_INDEX: usize = 2;

/// Margin and currency conversion shared by every vendor-cost add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionRates {
    margin_multiplier: Decimal,
    fx_rate: Decimal,
}

impl Default for ConversionRates {
    fn default() -> Self {
        Self {
            margin_multiplier: dec!(1.60),
            fx_rate: dec!(18.50),
        }
    }
}

impl ConversionRates {
    pub(crate) fn new(margin_multiplier: Decimal, fx_rate: Decimal) -> Self {
        Self {
            margin_multiplier,
            fx_rate,
        }
    }

    pub fn margin_multiplier(&self) -> Decimal {
        self.margin_multiplier
    }

    pub fn fx_rate(&self) -> Decimal {
        self.fx_rate
    }

    /// Vendor cost in source currency to a whole-Rand customer price
    pub fn convert(&self, source_cost: Decimal) -> Decimal {
        round_half_up(source_cost * self.margin_multiplier * self.fx_rate)
    }
}

/// Intermediate values of an email volume price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageBreakdown {
    pub units: u64,
    pub overage_units: u64,
    pub overage_blocks: u64,
    /// Vendor cost before margin and conversion
    pub cost_basis: Decimal,
    pub price: Decimal,
}

/// Email volume price card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRateCard {
    base_allowance: u64,
    base_cost: Decimal,
    block_size: u64,
    overage_rate_per_block: Decimal,
    rates: ConversionRates,
    steps: Vec<u64>,
    default_step: usize,
}

impl Default for UsageRateCard {
    fn default() -> Self {
        Self {
            base_allowance: 6_000,
            base_cost: dec!(4),
            block_size: 1_000,
            overage_rate_per_block: dec!(0.75),
            rates: ConversionRates::default(),
            steps: DEFAULT_VOLUME_STEPS.to_vec(),
            default_step: DEFAULT_VOLUME_STEP_INDEX,
        }
    }
}

impl UsageRateCard {
    /// Parameters are checked by the config layer: non-zero block size,
    /// non-empty ascending steps, in-range default step.
    pub(crate) fn new(
        base_allowance: u64,
        base_cost: Decimal,
        block_size: u64,
        overage_rate_per_block: Decimal,
        rates: ConversionRates,
        steps: Vec<u64>,
        default_step: usize,
    ) -> Self {
        debug_assert!(block_size > 0);
        debug_assert!(default_step < steps.len());
        Self {
            base_allowance,
            base_cost,
            block_size,
            overage_rate_per_block,
            rates,
            steps,
            default_step,
        }
    }

    pub fn base_allowance(&self) -> u64 {
        self.base_allowance
    }

    pub fn base_cost(&self) -> Decimal {
        self.base_cost
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn overage_rate_per_block(&self) -> Decimal {
        self.overage_rate_per_block
    }

    pub fn rates(&self) -> &ConversionRates {
        &self.rates
    }

    pub fn steps(&self) -> &[u64] {
        &self.steps
    }

    pub fn default_step(&self) -> usize {
        self.default_step
    }

    /// Price for `units` sends per month.
    ///
    /// Negative or zero usage costs nothing.
    pub fn cost(&self, units: i64) -> Decimal {
        self.breakdown(units).price
    }

    pub fn breakdown(&self, units: i64) -> UsageBreakdown {
        self.volume_breakdown(u64::try_from(units).unwrap_or(0))
    }

    /// Same as [`UsageRateCard::breakdown`] for an unsigned volume, such as a
    /// configured step
    pub fn volume_breakdown(&self, units: u64) -> UsageBreakdown {
        if units == 0 {
            return UsageBreakdown {
                units,
                overage_units: 0,
                overage_blocks: 0,
                cost_basis: Decimal::ZERO,
                price: Decimal::ZERO,
            };
        }

        let overage_units = units.saturating_sub(self.base_allowance);
        let overage_blocks = overage_units.div_ceil(self.block_size);
        let cost_basis = self.base_cost + Decimal::from(overage_blocks) * self.overage_rate_per_block;

        UsageBreakdown {
            units,
            overage_units,
            overage_blocks,
            cost_basis,
            price: self.rates.convert(cost_basis),
        }
    }

    /// Volume at a slider position; out-of-range positions use the default
    pub fn step(&self, index: usize) -> u64 {
        self.steps
            .get(index)
            .copied()
            .unwrap_or(self.steps[self.default_step])
    }

    pub fn cost_at_step(&self, index: usize) -> Decimal {
        self.volume_breakdown(self.step(index)).price
    }
}

/// Converted price of a dedicated resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DedicatedQuote {
    pub monthly: Decimal,
    pub setup: Decimal,
}

/// A flat-fee add-on such as a dedicated sending IP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedicatedResource {
    monthly_cost: Decimal,
    setup_cost: Decimal,
}

impl Default for DedicatedResource {
    fn default() -> Self {
        Self {
            monthly_cost: dec!(40),
            setup_cost: dec!(20),
        }
    }
}

impl DedicatedResource {
    pub(crate) fn new(monthly_cost: Decimal, setup_cost: Decimal) -> Self {
        Self {
            monthly_cost,
            setup_cost,
        }
    }

    pub fn monthly_cost(&self) -> Decimal {
        self.monthly_cost
    }

    pub fn setup_cost(&self) -> Decimal {
        self.setup_cost
    }

    pub fn price(&self, rates: &ConversionRates) -> DedicatedQuote {
        DedicatedQuote {
            monthly: rates.convert(self.monthly_cost),
            setup: rates.convert(self.setup_cost),
        }
    }
}
