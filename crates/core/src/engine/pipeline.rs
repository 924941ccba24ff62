use super::{LedgerReport, SettlementConfig};
use crate::balance::{BalanceCalculator, BalanceSheet};
use crate::ledger::{LedgerSnapshot, ReportContext};
use crate::report::{self, AnalyticsSummary, Leaderboard, TrendBucket, TrendPeriod};
use crate::settlement::{GreedySettler, Settler, SettlementPlan};
use tracing::{info, warn};

/// Runs scoping, balances, settlement and reports over a ledger snapshot
pub struct LedgerEngine {
    config: SettlementConfig,
    calculator: BalanceCalculator,
    settler: Box<dyn Settler + Send + Sync>,
}

impl LedgerEngine {
    /// Creates an engine using the greedy settler
    pub fn new(config: SettlementConfig) -> crate::Result<Self> {
        config.validate()?;
        let settler = GreedySettler::new(config.epsilon);
        Ok(Self::with_settler(config, Box::new(settler)))
    }

    /// Creates an engine with a custom settlement strategy
    pub fn with_settler(config: SettlementConfig, settler: Box<dyn Settler + Send + Sync>) -> Self {
        Self {
            config,
            calculator: BalanceCalculator::new(),
            settler,
        }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    pub fn settler_name(&self) -> &str {
        self.settler.name()
    }

    /// Balances and settlement only
    pub fn settle(&self, ledger: &LedgerSnapshot) -> (BalanceSheet, SettlementPlan) {
        let balances = self.calculator.calculate(&ledger.participants, &ledger.expenses);
        let settlement = self.settler.settle(&balances.balances);
        (balances, settlement)
    }

    /// Computes the full report for the selection in `context`
    pub fn run(&self, ledger: &LedgerSnapshot, context: &ReportContext) -> crate::Result<LedgerReport> {
        let scoped = ledger.scoped(context)?;
        info!(
            "Computing report for {} participants and {} expenses",
            scoped.participants.len(),
            scoped.expenses.len()
        );

        let (balances, settlement) = self.settle(&scoped);

        if !balances.is_consistent(self.config.epsilon) {
            warn!(
                "Balances sum to {} instead of zero; settlement is partial",
                balances.net_total()
            );
        }

        // Reports only see expenses the balance sheet counted
        let expenses = scoped.valid_expenses();

        let report = LedgerReport {
            categories: report::category_totals(&scoped.categories, &expenses),
            leaderboard: Leaderboard::new(&scoped.participants, &expenses),
            costs: report::person_costs(&scoped.participants, &expenses),
            top_days: report::top_days(&expenses, self.config.top_days),
            summary: AnalyticsSummary::build(
                &scoped.participants,
                &expenses,
                &scoped.categories,
                context.filter.date_range.as_ref(),
            ),
            balances,
            settlement,
        };

        info!(
            "Report ready: {} transfers totalling {}",
            report.settlement.len(),
            report.settlement.total_amount()
        );
        Ok(report)
    }

    /// Spend-over-time buckets for the selection in `context`
    pub fn trend(
        &self,
        ledger: &LedgerSnapshot,
        context: &ReportContext,
        period: TrendPeriod,
    ) -> crate::Result<Vec<TrendBucket>> {
        let scoped = ledger.scoped(context)?;
        Ok(report::trend_buckets(&scoped.valid_expenses(), period))
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::with_settler(SettlementConfig::default(), Box::new(GreedySettler::default()))
    }
}
