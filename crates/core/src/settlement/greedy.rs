use super::{Residual, SettlementPlan, Settler, Transfer};
use crate::balance::Balance;
use crate::domain::{money, EPSILON};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Greedy largest-creditor / largest-debtor settlement.
///
/// Balances are sorted once, descending, and walked with two pointers: the
/// front pointer on the largest remaining creditor, the back pointer on the
/// largest remaining debtor. Each step moves `min(credit, |debt|)` and
/// advances past whichever side reached zero. Balances are not re-sorted
/// after a partial settlement.
///
/// This emits at most `n - 1` transfers for `n` unsettled participants but is
/// not guaranteed to use the fewest possible transfers.
#[derive(Debug, Clone)]
pub struct GreedySettler {
    epsilon: Decimal,
    name: String,
}

impl GreedySettler {
    /// Creates a settler treating anything within `epsilon` of zero as settled
    pub fn new(epsilon: Decimal) -> Self {
        Self {
            epsilon: epsilon.abs(),
            name: "GreedySettler".to_string(),
        }
    }

    pub fn epsilon(&self) -> Decimal {
        self.epsilon
    }
}

impl Default for GreedySettler {
    fn default() -> Self {
        Self::new(EPSILON)
    }
}

impl Settler for GreedySettler {
    fn settle(&self, balances: &[Balance]) -> SettlementPlan {
        let mut plan = SettlementPlan::new();
        plan.net_imbalance = balances.iter().map(|b| b.balance).sum();

        // Stable sort: ties keep participant order.
        let mut working: Vec<(&Balance, Decimal)> =
            balances.iter().map(|b| (b, b.balance)).collect();
        working.sort_by(|a, b| b.1.cmp(&a.1));

        if working.len() >= 2 {
            let mut i = 0;
            let mut j = working.len() - 1;

            while i < j {
                let credit = working[i].1;
                let debt = working[j].1;

                // Everything past the front pointer is no larger, everything
                // before the back pointer no smaller: one side is exhausted.
                if credit <= self.epsilon || debt >= -self.epsilon {
                    break;
                }

                let amount = credit.min(-debt);
                debug_assert!(amount > self.epsilon);

                debug!(
                    "Transfer {} -> {}: {}",
                    working[j].0.name, working[i].0.name, amount
                );
                plan.add_transfer(Transfer::between(working[j].0, working[i].0, amount));

                working[i].1 -= amount;
                working[j].1 += amount;

                if money::is_settled(working[j].1, self.epsilon) {
                    j -= 1;
                }
                if working[i].1 <= self.epsilon {
                    i += 1;
                }
            }
        }

        plan.unsettled = working
            .iter()
            .filter(|(_, remaining)| !money::is_settled(*remaining, self.epsilon))
            .map(|(balance, remaining)| Residual {
                participant_id: balance.participant_id.clone(),
                name: balance.name.clone(),
                amount: *remaining,
            })
            .collect();

        if !plan.is_consistent(self.epsilon) {
            warn!(
                "Balances sum to {} instead of zero; {} participant(s) left unmatched",
                plan.net_imbalance,
                plan.unsettled.len()
            );
        } else if !plan.is_complete() {
            // Counterparties for the leftover are all within epsilon
            info!(
                "{} participant(s) left unmatched against sub-cent counterparties",
                plan.unsettled.len()
            );
        }

        info!(
            "Settled {} balances with {} transfers",
            balances.len(),
            plan.len()
        );
        plan
    }

    fn name(&self) -> &str {
        &self.name
    }
}
