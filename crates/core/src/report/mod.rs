//! Derived statistics over a ledger snapshot.
//!
//! Every assembler is a pure reducer over the expense list (and, where
//! needed, participants and categories). None of them feed the settlement.

pub mod categories;
pub mod people;
pub mod daily;
pub mod fairness;
pub mod trend;
pub mod leaderboard;
pub mod summary;

pub use categories::{category_totals, most_expensive, CategoryTotal};
pub use people::{person_costs, person_totals, PersonCost, PersonTotal};
pub use daily::{daily_totals, top_days, DailyTotal};
pub use fairness::fairness_score;
pub use trend::{trend_buckets, TrendBucket, TrendPeriod};
pub use leaderboard::Leaderboard;
pub use summary::AnalyticsSummary;
