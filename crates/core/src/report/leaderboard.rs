use super::people::{person_totals, PersonTotal};
use crate::domain::{CategoryId, Expense, Participant, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payer rankings and badges
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leaderboard {
    /// Participants ranked by total paid, largest first
    pub rankings: Vec<PersonTotal>,
}

impl Leaderboard {
    pub fn new(participants: &[Participant], expenses: &[Expense]) -> Self {
        Self {
            rankings: person_totals(participants, expenses),
        }
    }

    /// The first `n` ranked payers
    pub fn top_payers(&self, n: usize) -> &[PersonTotal] {
        &self.rankings[..n.min(self.rankings.len())]
    }

    /// 1-based rank of a participant
    pub fn rank_of(&self, participant: &ParticipantId) -> Option<usize> {
        self.rankings
            .iter()
            .position(|p| &p.participant_id == participant)
            .map(|i| i + 1)
    }

    /// Rank one, if they paid anything
    pub fn most_generous(&self) -> Option<&PersonTotal> {
        self.rankings.first().filter(|p| p.total_paid > Decimal::ZERO)
    }

    /// Smallest total among participants who paid at least once
    pub fn lowest_active_payer(&self) -> Option<&PersonTotal> {
        self.rankings
            .iter()
            .filter(|p| p.expense_count > 0)
            .fold(None, |lowest: Option<&PersonTotal>, p| match lowest {
                Some(l) if l.total_paid <= p.total_paid => Some(l),
                _ => Some(p),
            })
    }

    /// Participant who paid the largest single expense
    pub fn biggest_spender(&self) -> Option<&PersonTotal> {
        self.rankings
            .iter()
            .filter(|p| p.highest_expense > Decimal::ZERO)
            .fold(None, |best: Option<&PersonTotal>, p| match best {
                Some(b) if b.highest_expense >= p.highest_expense => Some(b),
                _ => Some(p),
            })
    }

    /// Largest payer within one category, with their category total
    pub fn category_leader(&self, category: &CategoryId) -> Option<(&PersonTotal, Decimal)> {
        self.rankings
            .iter()
            .filter_map(|p| p.category_totals.get(category).map(|total| (p, *total)))
            .filter(|(_, total)| *total > Decimal::ZERO)
            .fold(None, |best: Option<(&PersonTotal, Decimal)>, (p, total)| match best {
                Some((_, best_total)) if best_total >= total => best,
                _ => Some((p, total)),
            })
    }
}
