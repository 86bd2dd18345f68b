use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::effective_price;
use super::BillingPeriod;
use crate::error::PricingError;

/// A pre-packaged plan: a platform bundle or an individual plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub monthly_price: Decimal,
    /// Negotiated monthly-equivalent price on annual billing. Falls back to
    /// the standard annual discount when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_price: Option<Decimal>,
    pub included_seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_seat_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u64>,
    #[serde(default)]
    pub included_modules: Vec<String>,
}

/// Price of a bundle for a seat count and billing period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleQuote {
    pub bundle_id: String,
    pub bundle_name: String,
    pub period: BillingPeriod,
    pub base_price: Decimal,
    pub seats: u32,
    pub extra_seats: u32,
    pub extra_seat_cost: Decimal,
    pub total: Decimal,
}

impl Bundle {
    pub fn price(&self, period: BillingPeriod) -> Decimal {
        match (period, self.annual_price) {
            (BillingPeriod::Annually, Some(annual)) => annual,
            _ => effective_price(self.monthly_price, period),
        }
    }

    pub fn is_free(&self) -> bool {
        self.monthly_price.is_zero()
    }

    /// Monthly charge for seats above the included count.
    ///
    /// Bundles without an extra-seat price cannot grow past their seats.
    pub fn seat_cost(&self, seats: u32) -> Result<Decimal, PricingError> {
        let extra = seats.saturating_sub(self.included_seats);
        if extra == 0 {
            return Ok(Decimal::ZERO);
        }
        match self.extra_seat_price {
            Some(price) => Ok(price * Decimal::from(extra)),
            None => Err(PricingError::SeatLimitExceeded {
                bundle: self.id.clone(),
                included: self.included_seats,
                requested: seats,
            }),
        }
    }

    /// Quote the bundle; `seats` of `None` means the included seats
    pub fn quote(
        &self,
        seats: Option<u32>,
        period: BillingPeriod,
    ) -> Result<BundleQuote, PricingError> {
        let seats = seats.unwrap_or(self.included_seats);
        let extra_seat_cost = self.seat_cost(seats)?;
        let base_price = self.price(period);

        Ok(BundleQuote {
            bundle_id: self.id.clone(),
            bundle_name: self.name.clone(),
            period,
            base_price,
            seats,
            extra_seats: seats.saturating_sub(self.included_seats),
            extra_seat_cost,
            total: base_price + extra_seat_cost,
        })
    }

    pub fn includes_module(&self, module_id: &str) -> bool {
        self.included_modules.iter().any(|m| m == module_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn professional() -> Bundle {
        Bundle {
            id: "professional".to_string(),
            name: "Professional".to_string(),
            description: String::new(),
            monthly_price: dec!(3500),
            annual_price: Some(dec!(2800)),
            included_seats: 6,
            extra_seat_price: Some(dec!(45)),
            credits: Some(5_000),
            included_modules: vec!["sales".to_string(), "crm".to_string()],
        }
    }

    fn growth() -> Bundle {
        Bundle {
            id: "growth".to_string(),
            name: "Growth".to_string(),
            description: String::new(),
            monthly_price: dec!(999),
            annual_price: None,
            included_seats: 3,
            extra_seat_price: None,
            credits: None,
            included_modules: vec![],
        }
    }

    #[test]
    fn test_bundle_price_by_period() {
        let bundle = professional();
        assert_eq!(bundle.price(BillingPeriod::Monthly), dec!(3500));
        assert_eq!(bundle.price(BillingPeriod::Annually), dec!(2800));

        // No negotiated annual price: standard discount, 999 * 0.8 = 799.2
        assert_eq!(growth().price(BillingPeriod::Annually), dec!(799));
    }

    #[test]
    fn test_seat_cost() {
        let bundle = professional();
        assert_eq!(bundle.seat_cost(4).unwrap(), dec!(0));
        assert_eq!(bundle.seat_cost(6).unwrap(), dec!(0));
        assert_eq!(bundle.seat_cost(9).unwrap(), dec!(135));
    }

    #[test]
    fn test_seat_limit_without_extra_price() {
        let bundle = growth();
        assert_eq!(bundle.seat_cost(3).unwrap(), dec!(0));
        assert!(matches!(
            bundle.seat_cost(4),
            Err(PricingError::SeatLimitExceeded { included: 3, requested: 4, .. })
        ));
    }

    #[test]
    fn test_bundle_quote() {
        let quote = professional()
            .quote(Some(8), BillingPeriod::Annually)
            .unwrap();
        assert_eq!(quote.base_price, dec!(2800));
        assert_eq!(quote.extra_seats, 2);
        assert_eq!(quote.extra_seat_cost, dec!(90));
        assert_eq!(quote.total, dec!(2890));

        let default_seats = professional().quote(None, BillingPeriod::Monthly).unwrap();
        assert_eq!(default_seats.seats, 6);
        assert_eq!(default_seats.total, dec!(3500));
    }

    #[test]
    fn test_includes_module() {
        let bundle = professional();
        assert!(bundle.includes_module("crm"));
        assert!(!bundle.includes_module("network"));
        assert!(!growth().is_free());
    }
}
