// Turns a set of bookable nights into the stays of a given length that fit
// inside them.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// A stay of consecutive bookable nights. `end` is the checkout day and is
/// not itself one of the nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReservableRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReservableRange {
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for ReservableRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Resolve the requested minimum stay against a window of `num_days` nights.
/// Anything outside `1..=num_days`, including no request at all, means the
/// whole window.
pub fn effective_nights(requested: Option<i64>, num_days: i64) -> usize {
    let num_days = num_days.max(0);
    match requested {
        Some(nights) if (1..=num_days).contains(&nights) => nights as usize,
        _ => {
            debug!("Setting number of nights to {}.", num_days);
            num_days as usize
        }
    }
}

/// Every stay of exactly `nights` consecutive nights drawn from `available`.
///
/// Input order and duplicates do not matter. Each maximal run of consecutive
/// days of length `L >= nights` yields `L - nights + 1` stays, one per
/// possible arrival day, in ascending order of arrival.
pub fn consecutive_nights<I>(available: I, nights: usize) -> Vec<ReservableRange>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut ranges = Vec::new();
    if nights == 0 {
        return ranges;
    }

    // Day ordinals are gap-free, so +1 is always the next calendar day.
    let ordinals: BTreeSet<i32> = available
        .into_iter()
        .map(|day| day.num_days_from_ce())
        .collect();

    let mut run: Vec<i32> = Vec::new();
    for ordinal in ordinals {
        if run.last().map_or(false, |&last| ordinal != last + 1) {
            push_stays(&run, nights, &mut ranges);
            run.clear();
        }
        run.push(ordinal);
    }
    push_stays(&run, nights, &mut ranges);

    ranges
}

fn push_stays(run: &[i32], nights: usize, ranges: &mut Vec<ReservableRange>) {
    // windows() yields nothing when the run is too short
    for stay in run.windows(nights) {
        let first = stay[0];
        let checkout = stay[nights - 1] + 1;
        if let (Some(start), Some(end)) = (from_ordinal(first), from_ordinal(checkout)) {
            ranges.push(ReservableRange { start, end });
        }
    }
}

fn from_ordinal(ordinal: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(ordinal)
}
