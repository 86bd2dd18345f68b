use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ExtraCustomers;

/// Price of customers beyond a module's included entitlement.
///
/// Extra customers are sold in whole blocks; a partial block is billed as a
/// full one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerBlockPricing {
    block_size: u64,
    block_price: Decimal,
}

impl Default for CustomerBlockPricing {
    fn default() -> Self {
        Self {
            block_size: 1_000,
            block_price: dec!(50),
        }
    }
}

impl CustomerBlockPricing {
    /// `block_size` must be non-zero and `block_price` non-negative; the
    /// config layer checks both before calling this.
    pub(crate) fn new(block_size: u64, block_price: Decimal) -> Self {
        debug_assert!(block_size > 0);
        Self {
            block_size,
            block_price,
        }
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn block_price(&self) -> Decimal {
        self.block_price
    }

    /// Charge for `requested` customers against an entitlement of `included`.
    ///
    /// A request of zero means "the included amount" and costs nothing.
    pub fn extra_customers(&self, included: u64, requested: u64) -> ExtraCustomers {
        let requested = if requested == 0 { included } else { requested };
        let extra = requested.saturating_sub(included);
        let blocks = extra.div_ceil(self.block_size);

        ExtraCustomers {
            requested,
            included,
            extra,
            blocks,
            monthly_charge: self.block_price * Decimal::from(blocks),
        }
    }
}
