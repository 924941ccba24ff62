pub mod pipeline;

pub use pipeline::LedgerEngine;

use crate::balance::BalanceSheet;
use crate::domain::EPSILON;
use crate::report::{AnalyticsSummary, CategoryTotal, DailyTotal, Leaderboard, PersonCost};
use crate::settlement::SettlementPlan;
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SettlementConfig {
    /// Balances within this distance of zero count as settled
    pub epsilon: Decimal,

    /// Number of most expensive days to report
    pub top_days: usize,

    /// Number of payers shown on the leaderboard podium
    pub top_payers: usize,

    /// Symbol used when formatting amounts
    pub currency_symbol: String,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            top_days: 5,
            top_payers: 3,
            currency_symbol: "$".to_string(),
        }
    }
}

impl SettlementConfig {
    /// Validates configuration values
    pub fn validate(&self) -> Result<()> {
        if self.epsilon < Decimal::ZERO {
            return Err(Error::ConfigError(format!(
                "epsilon must not be negative, got {}",
                self.epsilon
            )));
        }

        if self.epsilon >= Decimal::ONE {
            return Err(Error::ConfigError(format!(
                "epsilon of {} would hide whole currency units",
                self.epsilon
            )));
        }

        Ok(())
    }
}

/// Everything computed for one ledger snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerReport {
    /// Per-participant balances
    pub balances: BalanceSheet,

    /// Transfers settling the balances
    pub settlement: SettlementPlan,

    /// Category breakdown, largest first
    pub categories: Vec<CategoryTotal>,

    /// Payer rankings
    pub leaderboard: Leaderboard,

    /// Consumption per participant, largest first
    pub costs: Vec<PersonCost>,

    /// Most expensive days
    pub top_days: Vec<DailyTotal>,

    /// Headline numbers
    pub summary: AnalyticsSummary,
}

impl LedgerReport {
    /// Checks if balances and settlement are free of data-integrity problems
    pub fn is_consistent(&self, epsilon: Decimal) -> bool {
        self.balances.is_consistent(epsilon)
            && self.balances.skipped_expenses.is_empty()
            && self.settlement.is_consistent(epsilon)
    }
}
