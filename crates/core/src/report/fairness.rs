use crate::math;
use rust_decimal::Decimal;

/// Heuristic payment-equality score in `[0, 100]`.
///
/// `100 - 10 * stddev(paid)`, clamped at zero, where `stddev` is the
/// population standard deviation of what each participant paid. With nobody
/// to compare the score is 100.
pub fn fairness_score(paid: &[Decimal]) -> f64 {
    let amounts: Vec<f64> = paid.iter().copied().map(math::to_f64).collect();
    (100.0 - math::std_deviation(&amounts) * 10.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_equal_payments_score_100() {
        assert_eq!(fairness_score(&[dec!(150), dec!(150)]), 100.0);
    }

    #[test]
    fn test_one_pays_everything_clamps_to_zero() {
        assert_eq!(fairness_score(&[dec!(500), Decimal::ZERO]), 0.0);
    }

    #[test]
    fn test_small_spread() {
        // stddev of [9, 11] is 1
        let score = fairness_score(&[dec!(9), dec!(11)]);
        assert!((score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_never_negative() {
        let score = fairness_score(&[dec!(1000000), dec!(0), dec!(3)]);
        assert!(score >= 0.0);
    }

    #[test]
    fn test_empty_is_perfect() {
        assert_eq!(fairness_score(&[]), 100.0);
    }
}
