use crate::day::DayKey;
use crate::error::HoursError;
use crate::range::TimeRange;
use crate::time_of_day::hhmm;
use crate::week::{DayHours, WeekHours};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn default_open_days() -> BTreeSet<DayKey> {
    use DayKey::*;
    BTreeSet::from([Mon, Tue, Wed, Thu, Fri])
}

fn default_opens_at() -> u32 {
    9 * 60
}

fn default_closes_at() -> u32 {
    17 * 60 + 30
}

/// Policy defaults for stores with no saved hours and for seeding new
/// drafts. Loaded from JSON with times written as `"HH:MM"`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct HoursConfig {
    #[serde(default = "default_open_days")]
    pub open_days: BTreeSet<DayKey>,
    #[serde(default = "default_opens_at", with = "hhmm")]
    pub opens_at: u32,
    #[serde(default = "default_closes_at", with = "hhmm")]
    pub closes_at: u32,
}

impl Default for HoursConfig {
    fn default() -> Self {
        HoursConfig {
            open_days: default_open_days(),
            opens_at: default_opens_at(),
            closes_at: default_closes_at(),
        }
    }
}

impl HoursConfig {
    pub fn from_json(data: &str) -> Result<HoursConfig, HoursError> {
        Ok(serde_json::from_str(data)?)
    }

    /// The range a fresh or heterogeneous draft starts with.
    pub fn default_range(&self) -> TimeRange {
        TimeRange::new(self.opens_at, self.closes_at)
    }

    /// Seed week: open days get the default range, the rest are closed.
    pub fn default_week(&self) -> WeekHours {
        WeekHours::from_fn(|day| {
            if self.open_days.contains(&day) {
                DayHours::from_ranges(&[self.default_range()])
            } else {
                DayHours::Closed
            }
        })
    }
}
