use rust_decimal::Decimal;
use serde::Serialize;

use crate::billing::{BillingPeriod, BundleQuote, DedicatedQuote, PricingQuote, Selection, UsageBreakdown};
use crate::config::PricingBook;
use crate::error::Result;

/// What to price besides the module selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstimateRequest {
    pub period: BillingPeriod,
    /// Explicit email sends per month
    pub emails: Option<i64>,
    /// Email volume step index, used when `emails` is not given
    pub email_step: Option<usize>,
    pub dedicated_ip: bool,
    pub bundle: Option<String>,
    pub seats: Option<u32>,
}

/// Email add-on line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailEstimate {
    pub step: Option<usize>,
    #[serde(flatten)]
    pub breakdown: UsageBreakdown,
}

/// Everything priced for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub period: BillingPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<PricingQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<BundleQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedicated_ip: Option<DedicatedQuote>,
    /// Recurring monthly charges across every priced part
    pub monthly_total: Decimal,
    /// One-time charges
    pub setup_total: Decimal,
}

impl Estimate {
    pub fn build(
        book: &PricingBook,
        selection: &Selection,
        request: &EstimateRequest,
    ) -> Result<Self> {
        let period = request.period;

        let modules = (!selection.is_empty()).then(|| book.quote(selection, period));

        let bundle = match &request.bundle {
            Some(id) => Some(book.bundle(id)?.quote(request.seats, period)?),
            None => None,
        };

        let email = match (request.emails, request.email_step) {
            (Some(units), _) => Some(EmailEstimate {
                step: None,
                breakdown: book.email.breakdown(units),
            }),
            (None, Some(index)) => {
                let step = if index < book.email.steps().len() {
                    index
                } else {
                    tracing::warn!(
                        index,
                        steps = book.email.steps().len(),
                        "Email step out of range, using the default step"
                    );
                    book.email.default_step()
                };
                Some(EmailEstimate {
                    step: Some(step),
                    breakdown: book.email.volume_breakdown(book.email.step(step)),
                })
            }
            (None, None) => None,
        };

        let dedicated_ip = request
            .dedicated_ip
            .then(|| book.dedicated_ip.price(book.rates()));

        let monthly_total = modules
            .as_ref()
            .map(|q| q.total + q.customer_add_ons)
            .unwrap_or_default()
            + bundle.as_ref().map(|b| b.total).unwrap_or_default()
            + email.as_ref().map(|e| e.breakdown.price).unwrap_or_default()
            + dedicated_ip.map(|d| d.monthly).unwrap_or_default();
        let setup_total = dedicated_ip.map(|d| d.setup).unwrap_or_default();

        tracing::debug!(%period, %monthly_total, %setup_total, "Estimate built");

        Ok(Estimate {
            period,
            modules,
            bundle,
            email,
            dedicated_ip,
            monthly_total,
            setup_total,
        })
    }
}
