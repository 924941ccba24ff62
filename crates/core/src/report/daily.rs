use crate::domain::Expense;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Spend on one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
    pub count: usize,
}

/// Per-day totals in chronological order
pub fn daily_totals(expenses: &[Expense]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();

    for expense in expenses {
        let day = days.entry(expense.date).or_insert_with(|| DailyTotal {
            date: expense.date,
            total: Decimal::ZERO,
            count: 0,
        });
        day.total += expense.amount;
        day.count += 1;
    }

    days.into_values().collect()
}

/// The `limit` most expensive days, largest first; equal days keep date order
pub fn top_days(expenses: &[Expense], limit: usize) -> Vec<DailyTotal> {
    let mut days = daily_totals(expenses);
    days.sort_by(|a, b| b.total.cmp(&a.total));
    days.truncate(limit);
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expense(id: &str, amount: Decimal, day: u32) -> Expense {
        Expense::new(
            id,
            id,
            amount,
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            "alice",
            vec!["alice".into()],
        )
    }

    fn ledger() -> Vec<Expense> {
        vec![
            expense("e1", dec!(10), 3),
            expense("e2", dec!(25), 1),
            expense("e3", dec!(15), 3),
            expense("e4", dec!(5), 2),
            expense("e5", dec!(25), 7),
        ]
    }

    #[test]
    fn test_daily_totals_chronological() {
        let days = daily_totals(&ledger());
        let summary: Vec<(u32, Decimal, usize)> = days
            .iter()
            .map(|d| (chrono::Datelike::day(&d.date), d.total, d.count))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, dec!(25), 1),
                (2, dec!(5), 1),
                (3, dec!(25), 2),
                (7, dec!(25), 1),
            ]
        );
    }

    #[test]
    fn test_top_days() {
        let top = top_days(&ledger(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(top[1].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }

    #[test]
    fn test_top_days_limit_larger_than_days() {
        assert_eq!(top_days(&ledger(), 10).len(), 4);
        assert!(top_days(&[], 5).is_empty());
    }
}
