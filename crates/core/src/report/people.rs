use crate::domain::{CategoryId, Expense, Participant, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// What one participant paid for over the period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonTotal {
    pub participant_id: ParticipantId,
    pub name: String,
    pub total_paid: Decimal,
    /// Number of expenses this participant paid
    pub expense_count: usize,
    /// Largest single expense this participant paid
    pub highest_expense: Decimal,
    /// Paid totals per category
    pub category_totals: BTreeMap<CategoryId, Decimal>,
}

/// What one participant consumed over the period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonCost {
    pub participant_id: ParticipantId,
    pub name: String,
    /// Sum of this participant's equal shares
    pub total_cost: Decimal,
    /// Number of expenses this participant shares in
    pub expense_count: usize,
}

/// Paid totals per participant, largest payer first (ties keep participant order)
pub fn person_totals(participants: &[Participant], expenses: &[Expense]) -> Vec<PersonTotal> {
    let mut totals: Vec<PersonTotal> = participants
        .iter()
        .map(|p| PersonTotal {
            participant_id: p.id.clone(),
            name: p.name.clone(),
            total_paid: Decimal::ZERO,
            expense_count: 0,
            highest_expense: Decimal::ZERO,
            category_totals: BTreeMap::new(),
        })
        .collect();
    let index = slots(participants);

    for expense in expenses {
        let Some(&slot) = index.get(&expense.paid_by) else {
            continue;
        };

        let person = &mut totals[slot];
        person.total_paid += expense.amount;
        person.expense_count += 1;
        person.highest_expense = person.highest_expense.max(expense.amount);
        if let Some(category) = &expense.category_id {
            *person
                .category_totals
                .entry(category.clone())
                .or_insert(Decimal::ZERO) += expense.amount;
        }
    }

    totals.sort_by(|a, b| b.total_paid.cmp(&a.total_paid));
    totals
}

/// Share totals per participant, largest cost first
pub fn person_costs(participants: &[Participant], expenses: &[Expense]) -> Vec<PersonCost> {
    let mut costs: Vec<PersonCost> = participants
        .iter()
        .map(|p| PersonCost {
            participant_id: p.id.clone(),
            name: p.name.clone(),
            total_cost: Decimal::ZERO,
            expense_count: 0,
        })
        .collect();
    let index = slots(participants);

    for expense in expenses {
        let Some(share) = expense.share() else {
            continue;
        };

        for beneficiary in &expense.split_between {
            if let Some(&slot) = index.get(beneficiary) {
                costs[slot].total_cost += share;
                costs[slot].expense_count += 1;
            }
        }
    }

    costs.sort_by(|a, b| b.total_cost.cmp(&a.total_cost));
    costs
}

// First occurrence wins for duplicate ids.
fn slots(participants: &[Participant]) -> HashMap<&ParticipantId, usize> {
    let mut index = HashMap::with_capacity(participants.len());
    for (slot, participant) in participants.iter().enumerate() {
        index.entry(&participant.id).or_insert(slot);
    }
    index
}
