use crate::domain::{Category, CategoryId, Expense};
use crate::math;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spend in one category over the period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub name: String,
    pub total: Decimal,
    /// Share of the period total, 0-100
    pub percentage: Decimal,
    pub count: usize,
}

/// Groups expenses by category, largest total first.
///
/// Every known category is listed, including empty ones. Categories that
/// expenses reference but `categories` does not know are listed under their
/// id. Uncategorized expenses count toward the period total only.
pub fn category_totals(categories: &[Category], expenses: &[Expense]) -> Vec<CategoryTotal> {
    let period_total: Decimal = expenses.iter().map(|e| e.amount).sum();

    let mut totals: Vec<CategoryTotal> = categories
        .iter()
        .map(|c| CategoryTotal {
            category_id: c.id.clone(),
            name: c.name.clone(),
            total: Decimal::ZERO,
            percentage: Decimal::ZERO,
            count: 0,
        })
        .collect();
    let mut index: HashMap<CategoryId, usize> = totals
        .iter()
        .enumerate()
        .map(|(slot, t)| (t.category_id.clone(), slot))
        .collect();

    for expense in expenses {
        let Some(category_id) = &expense.category_id else {
            continue;
        };

        let slot = *index.entry(category_id.clone()).or_insert_with(|| {
            totals.push(CategoryTotal {
                category_id: category_id.clone(),
                name: category_id.to_string(),
                total: Decimal::ZERO,
                percentage: Decimal::ZERO,
                count: 0,
            });
            totals.len() - 1
        });

        totals[slot].total += expense.amount;
        totals[slot].count += 1;
    }

    for total in &mut totals {
        total.percentage = math::percentage(total.total, period_total);
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Category with the largest non-zero total
pub fn most_expensive(totals: &[CategoryTotal]) -> Option<&CategoryTotal> {
    totals
        .iter()
        .filter(|t| t.total > Decimal::ZERO)
        .fold(None, |best: Option<&CategoryTotal>, t| match best {
            Some(b) if b.total >= t.total => Some(b),
            _ => Some(t),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(id: &str, amount: Decimal, category: Option<&str>) -> Expense {
        let mut expense = Expense::new(
            id,
            id,
            amount,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            "alice",
            vec!["alice".into()],
        );
        expense.category_id = category.map(CategoryId::new);
        expense
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new("food", "Food"),
            Category::new("fuel", "Fuel"),
            Category::new("rent", "Rent"),
        ]
    }

    #[test]
    fn test_category_totals() {
        let totals = category_totals(
            &categories(),
            &[
                expense("e1", dec!(30), Some("food")),
                expense("e2", dec!(50), Some("fuel")),
                expense("e3", dec!(20), Some("food")),
                expense("e4", dec!(100), None),
            ],
        );

        let names: Vec<&str> = totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Fuel", "Rent"]);

        assert_eq!(totals[0].total, dec!(50));
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[0].percentage, dec!(25));
        assert_eq!(totals[2].total, Decimal::ZERO);
        assert_eq!(totals[2].percentage, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_category_listed_by_id() {
        let totals = category_totals(&[], &[expense("e1", dec!(10), Some("misc"))]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].name, "misc");
        assert_eq!(totals[0].percentage, dec!(100));
    }

    #[test]
    fn test_empty_period() {
        let totals = category_totals(&categories(), &[]);
        assert_eq!(totals.len(), 3);
        assert!(totals.iter().all(|t| t.total.is_zero() && t.percentage.is_zero()));
        assert!(most_expensive(&totals).is_none());
    }

    #[test]
    fn test_most_expensive_first_wins_ties() {
        let totals = category_totals(
            &categories(),
            &[
                expense("e1", dec!(40), Some("fuel")),
                expense("e2", dec!(40), Some("food")),
            ],
        );
        assert_eq!(most_expensive(&totals).map(|t| t.name.as_str()), Some("Food"));
    }
}
