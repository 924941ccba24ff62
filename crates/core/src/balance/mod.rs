use crate::domain::{money, Expense, ExpenseId, Participant, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Net position of one participant over a set of expenses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    pub participant_id: ParticipantId,

    pub name: String,

    /// Sum of expenses this participant paid for
    pub total_paid: Decimal,

    /// Sum of this participant's equal shares, including expenses they paid
    pub total_owed: Decimal,

    /// `total_paid - total_owed`; positive means the participant is owed money
    pub balance: Decimal,
}

/// Which way a balance points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BalanceStatus {
    /// Others owe this participant
    Owed,
    /// This participant owes others
    Owes,
    /// Within tolerance of zero
    Settled,
}

impl Balance {
    fn opening(participant: &Participant) -> Self {
        Self {
            participant_id: participant.id.clone(),
            name: participant.name.clone(),
            total_paid: Decimal::ZERO,
            total_owed: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    pub fn status(&self, epsilon: Decimal) -> BalanceStatus {
        if money::is_settled(self.balance, epsilon) {
            BalanceStatus::Settled
        } else if self.balance.is_sign_positive() {
            BalanceStatus::Owed
        } else {
            BalanceStatus::Owes
        }
    }

    pub fn is_settled(&self, epsilon: Decimal) -> bool {
        self.status(epsilon) == BalanceStatus::Settled
    }
}

/// Output of the balance calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceSheet {
    /// One balance per participant, in participant order
    pub balances: Vec<Balance>,

    /// Expenses left out because they failed validation
    pub skipped_expenses: Vec<ExpenseId>,

    /// Payer or beneficiary references outside the participant set
    pub dangling_references: usize,
}

impl BalanceSheet {
    pub fn get(&self, participant: &ParticipantId) -> Option<&Balance> {
        self.balances.iter().find(|b| &b.participant_id == participant)
    }

    pub fn total_paid(&self) -> Decimal {
        self.balances.iter().map(|b| b.total_paid).sum()
    }

    pub fn total_owed(&self) -> Decimal {
        self.balances.iter().map(|b| b.total_owed).sum()
    }

    /// Sum of net balances; zero for a consistent ledger
    pub fn net_total(&self) -> Decimal {
        self.balances.iter().map(|b| b.balance).sum()
    }

    pub fn is_consistent(&self, epsilon: Decimal) -> bool {
        money::is_settled(self.net_total(), epsilon)
    }

    /// Participants whose balance is not within `epsilon` of zero
    pub fn unsettled_count(&self, epsilon: Decimal) -> usize {
        self.balances.iter().filter(|b| !b.is_settled(epsilon)).count()
    }
}

/// Reduces a ledger into one net balance per participant
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceCalculator;

impl BalanceCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes balances for every participant.
    ///
    /// Expenses that fail validation are skipped as a whole. References to
    /// participants outside `participants` are ignored and counted.
    pub fn calculate(&self, participants: &[Participant], expenses: &[Expense]) -> BalanceSheet {
        let mut sheet = BalanceSheet::default();
        let mut index: HashMap<&ParticipantId, usize> = HashMap::with_capacity(participants.len());

        for participant in participants {
            if index.contains_key(&participant.id) {
                warn!("Duplicate participant {} ignored", participant.id);
                continue;
            }
            index.insert(&participant.id, sheet.balances.len());
            sheet.balances.push(Balance::opening(participant));
        }

        for expense in expenses {
            if let Err(e) = expense.validate() {
                warn!("Skipping expense: {}", e);
                sheet.skipped_expenses.push(expense.id.clone());
                continue;
            }

            let share = match expense.share() {
                Some(share) => share,
                None => {
                    sheet.skipped_expenses.push(expense.id.clone());
                    continue;
                }
            };

            match index.get(&expense.paid_by) {
                Some(&slot) => sheet.balances[slot].total_paid += expense.amount,
                None => {
                    debug!("Expense {} paid by unknown participant {}", expense.id, expense.paid_by);
                    sheet.dangling_references += 1;
                }
            }

            for beneficiary in &expense.split_between {
                match index.get(beneficiary) {
                    Some(&slot) => sheet.balances[slot].total_owed += share,
                    None => {
                        debug!("Expense {} split with unknown participant {}", expense.id, beneficiary);
                        sheet.dangling_references += 1;
                    }
                }
            }
        }

        for balance in &mut sheet.balances {
            balance.balance = balance.total_paid - balance.total_owed;
        }

        if sheet.dangling_references > 0 {
            warn!(
                "{} expense references point outside the participant set; balances will not sum to zero",
                sheet.dangling_references
            );
        }

        sheet
    }
}
