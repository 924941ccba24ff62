use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Tolerance used for every "is this settled" comparison (one cent).
pub const EPSILON: Decimal = dec!(0.01);

/// Rounds an amount to cents for display, midpoints away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Equal share of `amount` across `ways` beneficiaries.
///
/// Returns `None` when there is nobody to share with.
pub fn equal_share(amount: Decimal, ways: usize) -> Option<Decimal> {
    if ways == 0 {
        return None;
    }
    amount.checked_div(Decimal::from(ways))
}

/// Checks whether an amount is within `epsilon` of zero
pub fn is_settled(amount: Decimal, epsilon: Decimal) -> bool {
    amount.abs() <= epsilon
}

/// Formats an amount as `$12.50` / `-$12.50`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = round_cents(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Formats a net position with an explicit sign: `+$12.50` / `-$12.50`.
pub fn format_signed(amount: Decimal, symbol: &str) -> String {
    let rounded = round_cents(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("+{}{:.2}", symbol, rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_midpoint_away_from_zero() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_cents(dec!(33.333333)), dec!(33.33));
    }

    #[test]
    fn test_equal_share() {
        assert_eq!(equal_share(dec!(300), 3), Some(dec!(100)));
        assert_eq!(equal_share(dec!(100), 2), Some(dec!(50)));
    }

    #[test]
    fn test_equal_share_with_nobody_returns_none() {
        assert!(equal_share(dec!(100), 0).is_none());
    }

    #[test]
    fn test_thirds_sum_back_within_epsilon() {
        let share = equal_share(dec!(100), 3).unwrap();
        let total = share * dec!(3);
        assert!(is_settled(total - dec!(100), EPSILON));
    }

    #[test]
    fn test_is_settled_boundary() {
        assert!(is_settled(dec!(0.01), EPSILON));
        assert!(is_settled(dec!(-0.009), EPSILON));
        assert!(!is_settled(dec!(0.011), EPSILON));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_amount(dec!(12.5), "$"), "$12.50");
        assert_eq!(format_amount(dec!(-12.5), "$"), "-$12.50");
        assert_eq!(format_amount(dec!(-0.001), "$"), "$0.00");
        assert_eq!(format_signed(dec!(200), "₹"), "+₹200.00");
        assert_eq!(format_signed(dec!(-100), "$"), "-$100.00");
    }
}
