use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::BillingPeriod;
use crate::utils::money::round_half_up;

/// Multiplier applied to monthly prices on annual billing (20% off)
pub const ANNUAL_DISCOUNT_MULTIPLIER: Decimal = dec!(0.8);

/// Monthly-equivalent price for a billing period.
///
/// Monthly billing returns the base price untouched. Annual billing applies
/// [`ANNUAL_DISCOUNT_MULTIPLIER`] and rounds half up to whole Rand.
pub fn effective_price(base_price: Decimal, period: BillingPeriod) -> Decimal {
    match period {
        BillingPeriod::Monthly => base_price,
        BillingPeriod::Annually => round_half_up(base_price * ANNUAL_DISCOUNT_MULTIPLIER),
    }
}

/// Amount saved per month by paying annually
pub fn annual_saving(base_price: Decimal) -> Decimal {
    effective_price(base_price, BillingPeriod::Monthly)
        - effective_price(base_price, BillingPeriod::Annually)
}
