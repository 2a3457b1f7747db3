//! Boundary with the persistence layer.
//!
//! Hours are stored as one row per concrete range; a closed day has no rows.
//! An always-open day is a single row flagged `open24`, so a plain
//! `0..1440` range stays a range.

use crate::config::HoursConfig;
use crate::day::DayKey;
use crate::error::HoursError;
use crate::range::{normalize_and_merge, TimeRange};
use crate::week::{DayHours, WeekHours};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HoursRow {
    /// Monday = 0
    pub day_of_week: u8,
    pub start_min: u32,
    pub end_min: u32,
    #[serde(default)]
    pub open24: bool,
}

impl WeekHours {
    pub fn to_rows(&self) -> Vec<HoursRow> {
        let mut rows = Vec::new();
        for (day, hours) in self.iter() {
            let (ranges, open24) = match hours {
                DayHours::Closed => continue,
                DayHours::Open24 => (vec![TimeRange::FULL_DAY], true),
                DayHours::Ranges { ranges } => (normalize_and_merge(ranges), false),
            };
            rows.extend(ranges.into_iter().map(|r| HoursRow {
                day_of_week: day.index(),
                start_min: r.start,
                end_min: r.end,
                open24,
            }));
        }
        rows
    }

    pub fn from_rows(rows: &[HoursRow]) -> Result<WeekHours, HoursError> {
        let mut by_day: BTreeMap<DayKey, Vec<TimeRange>> = BTreeMap::new();
        let mut open24: BTreeSet<DayKey> = BTreeSet::new();
        for row in rows {
            let day = DayKey::from_index(row.day_of_week)
                .ok_or(HoursError::InvalidDay(row.day_of_week))?;
            if row.open24 {
                open24.insert(day);
                continue;
            }
            by_day
                .entry(day)
                .or_default()
                .push(TimeRange::new(row.start_min, row.end_min));
        }

        Ok(WeekHours::from_fn(|day| {
            let raw = by_day.remove(&day).unwrap_or_default();
            if open24.contains(&day) {
                if !raw.is_empty() {
                    warn!("{}: open24 row overrides {} range rows", day, raw.len());
                }
                return DayHours::Open24;
            }
            let merged = normalize_and_merge(&raw);
            if merged.len() < raw.len() {
                warn!(
                    "{}: {} stored rows reduced to {} ranges",
                    day,
                    raw.len(),
                    merged.len()
                );
            }
            DayHours::from_ranges(&merged)
        }))
    }
}

/// Loads and saves whole weeks. Implementations decide how concurrent saves
/// for one store resolve; callers always hand over a complete week.
pub trait HoursStore {
    fn load_week_hours(&self, store_id: &str) -> Result<WeekHours, HoursError>;
    fn save_week_hours(&mut self, store_id: &str, week: &WeekHours) -> Result<(), HoursError>;
}

/// Row-backed store kept in memory. Stores with nothing saved yet load the
/// configured default week. Last write wins.
#[derive(Default, Debug)]
pub struct MemoryHoursStore {
    config: HoursConfig,
    rows: HashMap<String, Vec<HoursRow>>,
}

impl MemoryHoursStore {
    pub fn new(config: HoursConfig) -> Self {
        MemoryHoursStore {
            config,
            rows: HashMap::new(),
        }
    }

    pub fn rows(&self, store_id: &str) -> Option<&[HoursRow]> {
        self.rows.get(store_id).map(Vec::as_slice)
    }
}

impl HoursStore for MemoryHoursStore {
    fn load_week_hours(&self, store_id: &str) -> Result<WeekHours, HoursError> {
        match self.rows.get(store_id) {
            Some(rows) => WeekHours::from_rows(rows),
            None => Ok(self.config.default_week()),
        }
    }

    fn save_week_hours(&mut self, store_id: &str, week: &WeekHours) -> Result<(), HoursError> {
        if store_id.is_empty() {
            return Err(HoursError::Storage {
                store_id: store_id.to_owned(),
                reason: "empty store id".to_owned(),
            });
        }
        self.rows.insert(store_id.to_owned(), week.to_rows());
        Ok(())
    }
}
