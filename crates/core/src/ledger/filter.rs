use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::domain::{CategoryId, Expense, ParticipantId};
use crate::{Error, Result};

/// Filters on who paid for and who shares an expense
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PeopleFilter {
    /// Every listed participant must be a beneficiary
    pub exact_match: Vec<ParticipantId>,

    /// At least one listed participant must be a beneficiary
    pub any_match: Vec<ParticipantId>,

    /// No listed participant may be a beneficiary or the payer
    pub exclude: Vec<ParticipantId>,

    /// Payer must be one of the listed participants
    pub paid_by: Vec<ParticipantId>,
}

/// Filters on expense category
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CategoryFilter {
    /// Expense must carry one of these categories
    pub include: Vec<CategoryId>,

    /// Expense must not carry any of these categories; uncategorized expenses pass
    pub exclude: Vec<CategoryId>,
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Complete filter applied to an expense list before any computation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExpenseFilter {
    pub people: PeopleFilter,
    pub categories: CategoryFilter,
    pub date_range: Option<DateRange>,
}

impl PeopleFilter {
    pub fn is_empty(&self) -> bool {
        self.exact_match.is_empty()
            && self.any_match.is_empty()
            && self.exclude.is_empty()
            && self.paid_by.is_empty()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.exact_match.iter().all(|id| expense.is_split_with(id)) {
            return false;
        }

        if !self.any_match.is_empty() && !self.any_match.iter().any(|id| expense.is_split_with(id)) {
            return false;
        }

        if self
            .exclude
            .iter()
            .any(|id| expense.is_split_with(id) || &expense.paid_by == id)
        {
            return false;
        }

        self.paid_by.is_empty() || self.paid_by.contains(&expense.paid_by)
    }
}

impl CategoryFilter {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.include.is_empty() {
            match &expense.category_id {
                Some(category) if self.include.contains(category) => {}
                _ => return false,
            }
        }

        match &expense.category_id {
            Some(category) => !self.exclude.contains(category),
            None => true,
        }
    }
}

impl DateRange {
    /// Creates a range, rejecting `from` after `to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidDateRange(format!(
                "range starts on {} but ends on {}",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Days spanned by the range, never less than one
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days().max(1)
    }
}

impl ExpenseFilter {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.categories.is_empty() && self.date_range.is_none()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.people.matches(expense)
            && self.categories.matches(expense)
            && self
                .date_range
                .map_or(true, |range| range.contains(expense.date))
    }

    /// Returns the expenses passing every filter, in input order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|expense| self.matches(expense))
            .cloned()
            .collect()
    }
}
