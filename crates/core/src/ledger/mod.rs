pub mod filter;

pub use filter::{CategoryFilter, DateRange, ExpenseFilter, PeopleFilter};

use crate::domain::{Category, CategoryId, Expense, Participant, ParticipantId, Workspace, WorkspaceId};
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Consistent snapshot of the ledger as loaded from storage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerSnapshot {
    /// Participants, in display order
    pub participants: Vec<Participant>,

    /// Expenses with their beneficiaries
    pub expenses: Vec<Expense>,

    /// Known categories
    pub categories: Vec<Category>,

    /// Known workspaces; empty when the data predates workspaces
    pub workspaces: Vec<Workspace>,
}

/// Explicit selection state a report is computed for
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportContext {
    /// Selected workspace, if any
    pub workspace: Option<WorkspaceId>,

    /// Filters applied to the expense list
    pub filter: ExpenseFilter,
}

impl ReportContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace(mut self, workspace: impl Into<WorkspaceId>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn with_filter(mut self, filter: ExpenseFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl LedgerSnapshot {
    pub fn new(participants: Vec<Participant>, expenses: Vec<Expense>) -> Self {
        Self {
            participants,
            expenses,
            categories: Vec::new(),
            workspaces: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_workspaces(mut self, workspaces: Vec<Workspace>) -> Self {
        self.workspaces = workspaces;
        self
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn workspace(&self, id: &WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| &w.id == id)
    }

    /// Sum of all expense amounts
    pub fn total_amount(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Expenses that pass validation, in input order.
    ///
    /// These are the expenses the balance calculator counts; reports built
    /// from them agree with the balance sheet.
    pub fn valid_expenses(&self) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| e.validate().is_ok())
            .cloned()
            .collect()
    }

    /// Narrows the snapshot to the selected workspace and filters.
    ///
    /// Rows without a workspace stay visible in every workspace. When the
    /// snapshot knows no workspaces at all, the workspace selection is ignored.
    pub fn scoped(&self, context: &ReportContext) -> Result<LedgerSnapshot> {
        let workspace = match &context.workspace {
            Some(id) if self.workspaces.is_empty() => {
                debug!("No workspaces known, ignoring selection of {}", id);
                None
            }
            Some(id) => {
                if self.workspace(id).is_none() {
                    return Err(Error::UnknownWorkspace(id.to_string()));
                }
                Some(id)
            }
            None => None,
        };

        let participants: Vec<Participant> = self
            .participants
            .iter()
            .filter(|p| workspace.map_or(true, |ws| p.belongs_to(ws)))
            .cloned()
            .collect();

        let in_workspace: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| workspace.map_or(true, |ws| e.belongs_to(ws)))
            .cloned()
            .collect();

        let expenses = context.filter.apply(&in_workspace);

        debug!(
            "Scoped ledger: {}/{} participants, {}/{} expenses",
            participants.len(),
            self.participants.len(),
            expenses.len(),
            self.expenses.len()
        );

        Ok(LedgerSnapshot {
            participants,
            expenses,
            categories: self.categories.clone(),
            workspaces: self.workspaces.clone(),
        })
    }
}
