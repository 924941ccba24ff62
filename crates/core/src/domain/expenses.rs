use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use super::money::equal_share;
use super::participants::{ParticipantId, WorkspaceId};
use super::string_id;
use crate::{Error, Result};

string_id!(
    /// Expense unique identifier
    ExpenseId
);

string_id!(
    /// Category unique identifier
    CategoryId
);

/// A single shared cost paid by one participant for one or more beneficiaries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    /// Unique expense identifier
    pub id: ExpenseId,

    /// Short description
    pub title: String,

    /// Amount paid, must be positive
    pub amount: Decimal,

    /// Day the expense happened
    pub date: NaiveDate,

    /// Participant who paid
    pub paid_by: ParticipantId,

    /// Optional category
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Beneficiaries sharing the cost equally
    pub split_between: Vec<ParticipantId>,

    /// Workspace the expense belongs to (`None` for legacy rows)
    #[serde(default)]
    pub workspace_id: Option<WorkspaceId>,
}

/// Expense category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Expense {
    /// Creates an uncategorized expense outside any workspace
    pub fn new(
        id: impl Into<ExpenseId>,
        title: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        paid_by: impl Into<ParticipantId>,
        split_between: Vec<ParticipantId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            date,
            paid_by: paid_by.into(),
            category_id: None,
            split_between,
            workspace_id: None,
        }
    }

    pub fn with_category(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn in_workspace(mut self, workspace_id: impl Into<WorkspaceId>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    /// Validates expense parameters
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidExpense(format!(
                "expense {} amount must be greater than zero, got {}",
                self.id, self.amount
            )));
        }

        if self.split_between.is_empty() {
            return Err(Error::InvalidExpense(format!(
                "expense {} must be split between at least one participant",
                self.id
            )));
        }

        let mut seen = HashSet::with_capacity(self.split_between.len());
        for participant in &self.split_between {
            if !seen.insert(participant) {
                return Err(Error::InvalidExpense(format!(
                    "expense {} lists {} more than once",
                    self.id, participant
                )));
            }
        }

        Ok(())
    }

    /// Number of beneficiaries
    pub fn split_count(&self) -> usize {
        self.split_between.len()
    }

    /// Each beneficiary's equal share, `None` when there are no beneficiaries
    pub fn share(&self) -> Option<Decimal> {
        equal_share(self.amount, self.split_count())
    }

    pub fn is_split_with(&self, participant: &ParticipantId) -> bool {
        self.split_between.contains(participant)
    }

    /// Unscoped expenses are visible from every workspace.
    pub fn belongs_to(&self, workspace_id: &WorkspaceId) -> bool {
        self.workspace_id
            .as_ref()
            .map_or(true, |own| own == workspace_id)
    }
}
