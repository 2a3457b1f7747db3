use crate::time_of_day::{minutes_to_label, MINUTES_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open `[start, end)` interval of day-local minutes.
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange {
    #[serde(rename = "startMin")]
    pub start: u32,
    #[serde(rename = "endMin")]
    pub end: u32,
}

impl TimeRange {
    pub const FULL_DAY: TimeRange = TimeRange {
        start: 0,
        end: MINUTES_PER_DAY,
    };

    pub fn new(start: u32, end: u32) -> Self {
        TimeRange { start, end }
    }

    fn clamped(&self) -> TimeRange {
        TimeRange {
            start: self.start.min(MINUTES_PER_DAY),
            end: self.end.min(MINUTES_PER_DAY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, minute: u32) -> bool {
        self.start <= minute && minute < self.end
    }

    pub fn intersection(&self, other: &TimeRange) -> Option<TimeRange> {
        let overlap = TimeRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        };
        if overlap.is_empty() {
            None
        } else {
            Some(overlap)
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            minutes_to_label(self.start),
            minutes_to_label(self.end)
        )
    }
}

/// Clamp, drop degenerate ranges, sort, and merge overlapping or touching
/// ranges. The output is sorted with a gap between every pair of members.
pub fn normalize_and_merge(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted: Vec<TimeRange> = ranges
        .iter()
        .map(TimeRange::clamped)
        .filter(|r| !r.is_empty())
        .collect();
    sorted.sort();

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}
