use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole Rand, ties going up.
///
/// Amounts reaching this function are never negative, so away-from-zero
/// midpoint rounding is the same as round-half-up.
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as Rand with thousands separators, e.g. `R1,499`.
///
/// Whole amounts are printed without cents; anything else gets two decimals.
pub fn format_zar(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let amount = amount.abs();

    if amount.fract().is_zero() {
        format!("{}R{}", sign, group_thousands(&amount.trunc().to_string()))
    } else {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.2}", rounded);
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        format!("{}R{}.{}", sign, group_thousands(whole), cents)
    }
}

/// Format an amount as US dollars, e.g. `$0.75`.
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// Insert `,` between groups of three digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
