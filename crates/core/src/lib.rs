pub mod domain;
pub mod ledger;
pub mod balance;
pub mod settlement;
pub mod report;
pub mod math;
pub mod engine;

pub use domain::{Category, CategoryId, Expense, ExpenseId, Participant, ParticipantId, Workspace, WorkspaceId};
pub use ledger::{CategoryFilter, DateRange, ExpenseFilter, LedgerSnapshot, PeopleFilter, ReportContext};
pub use balance::{Balance, BalanceCalculator, BalanceSheet, BalanceStatus};
pub use settlement::{GreedySettler, Settler, SettlementPlan, Transfer};
pub use engine::{LedgerEngine, LedgerReport, SettlementConfig};

/// Core result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),

    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("Unknown workspace: {0}")]
    UnknownWorkspace(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
