use crate::domain::{money, Expense};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Bucket width for spend-over-time charts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Day,
    /// Calendar weeks starting on Sunday
    Week,
    Month,
}

/// One chart point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendBucket {
    /// First day covered by the bucket; buckets are ordered by this
    pub start: NaiveDate,
    /// Display label, e.g. `Mar 04`, `Week of Mar 03`, `Mar 2024`
    pub label: String,
    /// Total spend, rounded to cents
    pub amount: Decimal,
}

impl TrendPeriod {
    /// First day of the bucket containing `date`
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TrendPeriod::Day => date,
            TrendPeriod::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
            }
            TrendPeriod::Month => date.with_day(1).unwrap_or(date),
        }
    }

    pub fn label(&self, start: NaiveDate) -> String {
        match self {
            TrendPeriod::Day => start.format("%b %d").to_string(),
            TrendPeriod::Week => format!("Week of {}", start.format("%b %d")),
            TrendPeriod::Month => start.format("%b %Y").to_string(),
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendPeriod::Day => "day",
            TrendPeriod::Week => "week",
            TrendPeriod::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for TrendPeriod {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(TrendPeriod::Day),
            "week" => Ok(TrendPeriod::Week),
            "month" => Ok(TrendPeriod::Month),
            other => Err(crate::Error::ConfigError(format!(
                "unknown trend period '{}', expected day, week or month",
                other
            ))),
        }
    }
}

/// Sums expense amounts per bucket in chronological order.
///
/// Buckets are keyed and sorted by their start date; the label is only
/// rendered at the end, so ordering holds across year boundaries.
pub fn trend_buckets(expenses: &[Expense], period: TrendPeriod) -> Vec<TrendBucket> {
    let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for expense in expenses {
        *buckets
            .entry(period.bucket_start(expense.date))
            .or_insert(Decimal::ZERO) += expense.amount;
    }

    buckets
        .into_iter()
        .map(|(start, amount)| TrendBucket {
            start,
            label: period.label(start),
            amount: money::round_cents(amount),
        })
        .collect()
}
