use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Converts a decimal amount to `f64` for statistics
pub fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`, not `n - 1`)
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = mean(values);
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_deviation(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// `part` as a percentage of `whole`; zero when `whole` is zero
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }

    part / whole * Decimal::ONE_HUNDRED
}

/// Average of `total` over `count` items; zero when there are none
pub fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }

    total / Decimal::from(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 6.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_population_variance() {
        assert_eq!(population_variance(&[]), 0.0);
        assert_eq!(population_variance(&[5.0, 5.0, 5.0]), 0.0);
        // mean 5, squared deviations 9 + 1 + 1 + 9 = 20, / 4
        assert!((population_variance(&[2.0, 4.0, 6.0, 8.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_deviation() {
        assert!((std_deviation(&[0.0, 100.0]) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(dec!(25), dec!(200)), dec!(12.5));
        assert_eq!(percentage(dec!(25), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(dec!(90), 3), dec!(30));
        assert_eq!(average(dec!(90), 0), Decimal::ZERO);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(dec!(12.5)), 12.5);
    }
}
