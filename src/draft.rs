//! In-memory state of an hours edit before it is committed to the week.
//!
//! A draft range may be *overnight*: `end < start` means the period runs past
//! midnight into the following day. That encoding never leaves the draft;
//! [`crate::merge::apply_draft_to_week`] splits it across the two days.

use crate::day::DayKey;
use crate::error::{DraftError, HoursError};
use crate::merge::expand_per_day;
use crate::range::{normalize_and_merge, TimeRange};
use crate::time_of_day::parse_time_of_day;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftMode {
    Ranges,
    Closed,
    Open24,
}

/// A time range as entered. `None` marks a time the user has not (validly)
/// entered yet.
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct DraftRange {
    #[serde(rename = "startMin")]
    pub start: Option<u32>,
    #[serde(rename = "endMin")]
    pub end: Option<u32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DraftRangeKind {
    /// At least one endpoint missing.
    Incomplete,
    /// Opens and closes at the same minute.
    Empty,
    Regular(TimeRange),
    /// Runs from `start` to midnight, then from midnight to `end` the next day.
    Overnight { start: u32, end: u32 },
}

impl DraftRange {
    pub fn new(start: u32, end: u32) -> Self {
        DraftRange {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Build from two `HH:MM` input fields; malformed fields become `None`.
    pub fn parse(start: &str, end: &str) -> Self {
        DraftRange {
            start: parse_time_of_day(start),
            end: parse_time_of_day(end),
        }
    }

    pub fn kind(&self) -> DraftRangeKind {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start < end => {
                DraftRangeKind::Regular(TimeRange::new(start, end))
            }
            (Some(start), Some(end)) if end < start => DraftRangeKind::Overnight { start, end },
            (Some(_), Some(_)) => DraftRangeKind::Empty,
            _ => DraftRangeKind::Incomplete,
        }
    }
}

impl From<TimeRange> for DraftRange {
    fn from(range: TimeRange) -> Self {
        DraftRange::new(range.start, range.end)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Draft {
    pub selected_days: BTreeSet<DayKey>,
    pub mode: DraftMode,
    #[serde(default)]
    pub ranges: Vec<DraftRange>,
}

impl Draft {
    pub fn new(selected_days: BTreeSet<DayKey>, mode: DraftMode, ranges: Vec<DraftRange>) -> Self {
        Draft {
            selected_days,
            mode,
            ranges,
        }
    }

    pub fn toggle_day(&mut self, day: DayKey) {
        if !self.selected_days.remove(&day) {
            self.selected_days.insert(day);
        }
    }

    pub fn select_days<I: IntoIterator<Item = DayKey>>(&mut self, days: I) {
        self.selected_days.extend(days);
    }

    pub fn set_mode(&mut self, mode: DraftMode) {
        self.mode = mode;
    }

    pub fn add_range(&mut self, range: DraftRange) {
        self.ranges.push(range);
    }

    pub fn update_range(&mut self, index: usize, range: DraftRange) -> Result<(), HoursError> {
        let len = self.ranges.len();
        let slot = self
            .ranges
            .get_mut(index)
            .ok_or(HoursError::RangeIndex { index, len })?;
        *slot = range;
        Ok(())
    }

    pub fn remove_range(&mut self, index: usize) -> Result<DraftRange, HoursError> {
        if index >= self.ranges.len() {
            return Err(HoursError::RangeIndex {
                index,
                len: self.ranges.len(),
            });
        }
        Ok(self.ranges.remove(index))
    }

    /// Merge the regular ranges in place. Overnight, empty and incomplete
    /// entries stay as typed, after the merged ranges, so the user can keep
    /// correcting them.
    pub fn merge_now(&mut self) {
        let mut regular = Vec::new();
        let mut pending = Vec::new();
        for range in &self.ranges {
            match range.kind() {
                DraftRangeKind::Regular(r) => regular.push(r),
                _ => pending.push(*range),
            }
        }

        self.ranges = normalize_and_merge(&regular)
            .into_iter()
            .map(DraftRange::from)
            .chain(pending)
            .collect();
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        validate_draft(self)
    }
}

/// Check whether `draft` may be saved. The first failing rule wins.
pub fn validate_draft(draft: &Draft) -> Result<(), DraftError> {
    if draft.selected_days.is_empty() {
        return Err(DraftError::NoDaysSelected);
    }
    if draft.mode != DraftMode::Ranges {
        return Ok(());
    }

    let kinds: Vec<DraftRangeKind> = draft.ranges.iter().map(DraftRange::kind).collect();
    if kinds.contains(&DraftRangeKind::Incomplete) {
        return Err(DraftError::InvalidTime);
    }
    if kinds.contains(&DraftRangeKind::Empty) {
        return Err(DraftError::ZeroLengthRange);
    }

    let per_day = expand_per_day(&draft.selected_days, &draft.ranges);
    if per_day
        .values()
        .all(|contributions| normalize_and_merge(contributions).is_empty())
    {
        return Err(DraftError::NoValidRanges);
    }
    Ok(())
}
