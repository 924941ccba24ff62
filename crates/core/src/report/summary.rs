use super::categories::{category_totals, most_expensive, CategoryTotal};
use super::fairness::fairness_score;
use super::people::person_totals;
use crate::domain::{Category, Expense, Participant};
use crate::ledger::DateRange;
use crate::math;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline numbers for an analytics period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSummary {
    pub total_spent: Decimal,
    pub expense_count: usize,
    pub average_per_day: Decimal,
    pub average_per_person: Decimal,
    pub most_expensive_category: Option<CategoryTotal>,
    pub fairness_score: f64,
}

impl AnalyticsSummary {
    /// Builds the summary for a period.
    ///
    /// The day span comes from `range` when given, otherwise from the first
    /// and last expense dates; it is never less than one day.
    pub fn build(
        participants: &[Participant],
        expenses: &[Expense],
        categories: &[Category],
        range: Option<&DateRange>,
    ) -> Self {
        let total_spent: Decimal = expenses.iter().map(|e| e.amount).sum();

        let span_days = match range {
            Some(range) => range.span_days(),
            None => {
                let first = expenses.iter().map(|e| e.date).min();
                let last = expenses.iter().map(|e| e.date).max();
                match (first, last) {
                    (Some(first), Some(last)) => (last - first).num_days().max(1),
                    _ => 1,
                }
            }
        };

        let paid: Vec<Decimal> = person_totals(participants, expenses)
            .into_iter()
            .map(|p| p.total_paid)
            .collect();

        let categories = category_totals(categories, expenses);

        Self {
            total_spent,
            expense_count: expenses.len(),
            average_per_day: total_spent / Decimal::from(span_days),
            average_per_person: math::average(total_spent, participants.len()),
            most_expensive_category: most_expensive(&categories).cloned(),
            fairness_score: fairness_score(&paid),
        }
    }
}
