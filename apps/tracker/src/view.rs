//! Derived views over a snapshot of the records: counts, filtering, term list.
//! Everything here is a pure function of its inputs.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ApplicationRecord, ParseStatusError, Status};

/// Per-status tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl Stats {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Applied => self.applied,
            Status::Interview => self.interview,
            Status::Offer => self.offer,
            Status::Rejected => self.rejected,
        }
    }
}

pub fn stats(records: &[ApplicationRecord]) -> Stats {
    let mut stats = Stats::default();
    for record in records {
        stats.total += 1;
        match record.status {
            Status::Applied => stats.applied += 1,
            Status::Interview => stats.interview += 1,
            Status::Offer => stats.offer += 1,
            Status::Rejected => stats.rejected += 1,
        }
    }
    stats
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TermFilter {
    #[default]
    All,
    Only(String),
}

impl TermFilter {
    pub fn matches(&self, term: Option<&str>) -> bool {
        match self {
            TermFilter::All => true,
            TermFilter::Only(wanted) => term == Some(wanted.as_str()),
        }
    }
}

impl FromStr for TermFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TermFilter::All)
        } else {
            Ok(TermFilter::Only(s.to_string()))
        }
    }
}

/// Records passing both filters, in store order.
pub fn filter<'a>(
    records: &'a [ApplicationRecord],
    status: &StatusFilter,
    term: &TermFilter,
) -> Vec<&'a ApplicationRecord> {
    records
        .iter()
        .filter(|r| status.matches(r.status) && term.matches(r.term.as_deref()))
        .collect()
}

/// Distinct non-empty terms, sorted ascending.
pub fn unique_terms(records: &[ApplicationRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.term.as_deref())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Whole days between the application date and `today`.
pub fn days_since_applied(record: &ApplicationRecord, today: NaiveDate) -> i64 {
    (today - record.application_date).num_days()
}
