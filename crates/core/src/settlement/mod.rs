pub mod greedy;

pub use greedy::GreedySettler;

use crate::balance::Balance;
use crate::domain::{money, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Settlement plan that zeroes out a set of balances
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Transfers in emission order
    pub transfers: Vec<Transfer>,

    /// Balances left over after the last transfer
    pub unsettled: Vec<Residual>,

    /// Sum of the balances the plan was built from
    #[serde(default)]
    pub net_imbalance: Decimal,
}

/// Payment instruction: `from` should pay `to` the given amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transfer {
    /// Debtor identifier
    pub from_id: ParticipantId,

    /// Debtor display name
    pub from: String,

    /// Creditor identifier
    pub to_id: ParticipantId,

    /// Creditor display name
    pub to: String,

    /// Amount to transfer, unrounded
    pub amount: Decimal,
}

/// Balance that could not be matched against a counterparty
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Residual {
    pub participant_id: ParticipantId,
    pub name: String,
    pub amount: Decimal,
}

/// Strategy for turning balances into transfers
pub trait Settler {
    /// Produces transfers that bring every balance to zero
    fn settle(&self, balances: &[Balance]) -> SettlementPlan;

    /// Returns settler name
    fn name(&self) -> &str;
}

impl Transfer {
    /// Creates a transfer from `debtor` to `creditor`
    pub fn between(debtor: &Balance, creditor: &Balance, amount: Decimal) -> Self {
        Self {
            from_id: debtor.participant_id.clone(),
            from: debtor.name.clone(),
            to_id: creditor.participant_id.clone(),
            to: creditor.name.clone(),
            amount,
        }
    }

    pub fn involves(&self, participant: &ParticipantId) -> bool {
        &self.from_id == participant || &self.to_id == participant
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} owes {}: {:.2}",
            self.from,
            self.to,
            money::round_cents(self.amount)
        )
    }
}

impl SettlementPlan {
    /// Creates a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transfer to the plan
    pub fn add_transfer(&mut self, transfer: Transfer) {
        self.transfers.push(transfer);
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// Total money moved by the plan
    pub fn total_amount(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// True when the input balances summed to zero within `epsilon`.
    ///
    /// Residuals can remain on a consistent plan: a debtor whose remaining
    /// credit sits with participants already within epsilon is left unmatched.
    pub fn is_consistent(&self, epsilon: Decimal) -> bool {
        money::is_settled(self.net_imbalance, epsilon)
    }

    /// True when every participant was matched
    pub fn is_complete(&self) -> bool {
        self.unsettled.is_empty()
    }

    /// Transfers paid or received by one participant, in emission order
    pub fn involving(&self, participant: &ParticipantId) -> Vec<&Transfer> {
        self.transfers
            .iter()
            .filter(|t| t.involves(participant))
            .collect()
    }

    /// Applies the transfers to `balances` and returns what remains per
    /// participant: debtors are credited, creditors are debited.
    pub fn replay(&self, balances: &[Balance]) -> Vec<(ParticipantId, Decimal)> {
        let mut remaining: Vec<(ParticipantId, Decimal)> = balances
            .iter()
            .map(|b| (b.participant_id.clone(), b.balance))
            .collect();
        let index: HashMap<ParticipantId, usize> = remaining
            .iter()
            .enumerate()
            .map(|(slot, (id, _))| (id.clone(), slot))
            .collect();

        for transfer in &self.transfers {
            if let Some(&slot) = index.get(&transfer.from_id) {
                remaining[slot].1 += transfer.amount;
            }
            if let Some(&slot) = index.get(&transfer.to_id) {
                remaining[slot].1 -= transfer.amount;
            }
        }

        remaining
    }
}
