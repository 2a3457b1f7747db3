use crate::config::HoursConfig;
use crate::day::DayKey;
use crate::error::HoursError;
use crate::range::{normalize_and_merge, TimeRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Hours for one day. `Closed` and `Open24` carry no ranges; a `Ranges` day
/// built through [`DayHours::from_ranges`] is never empty and never holds
/// overlapping or touching ranges.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DayHours {
    Closed,
    Open24,
    Ranges { ranges: Vec<TimeRange> },
}

impl DayHours {
    /// Normalize `ranges`; an empty result collapses to `Closed`.
    pub fn from_ranges(ranges: &[TimeRange]) -> DayHours {
        let ranges = normalize_and_merge(ranges);
        if ranges.is_empty() {
            DayHours::Closed
        } else {
            DayHours::Ranges { ranges }
        }
    }

    /// Ranges carried by this day; empty unless the day is `Ranges`.
    pub fn ranges(&self) -> &[TimeRange] {
        match self {
            DayHours::Ranges { ranges } => ranges,
            _ => &[],
        }
    }

    pub fn normalized(&self) -> DayHours {
        match self {
            DayHours::Ranges { ranges } => DayHours::from_ranges(ranges),
            other => other.clone(),
        }
    }

    pub fn is_open_at(&self, minute: u32) -> bool {
        match self {
            DayHours::Closed => false,
            DayHours::Open24 => true,
            DayHours::Ranges { ranges } => ranges.iter().any(|r| r.contains(minute)),
        }
    }
}

impl fmt::Display for DayHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayHours::Closed => f.write_str("Closed"),
            DayHours::Open24 => f.write_str("Open 24 hours"),
            DayHours::Ranges { ranges } => {
                let labels: Vec<String> = ranges.iter().map(|r| r.to_string()).collect();
                f.write_str(&labels.join(", "))
            }
        }
    }
}

/// Structural equality where two `Ranges` days compare by their normalized
/// ranges.
pub fn same_day_hours(a: &DayHours, b: &DayHours) -> bool {
    use DayHours::*;
    match (a, b) {
        (Closed, Closed) | (Open24, Open24) => true,
        (Ranges { ranges: ra }, Ranges { ranges: rb }) => {
            normalize_and_merge(ra) == normalize_and_merge(rb)
        }
        _ => false,
    }
}

/// A store's full weekly schedule. Every day is always present.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WeekHours {
    mon: DayHours,
    tue: DayHours,
    wed: DayHours,
    thu: DayHours,
    fri: DayHours,
    sat: DayHours,
    sun: DayHours,
}

impl WeekHours {
    pub fn from_fn<F: FnMut(DayKey) -> DayHours>(mut f: F) -> WeekHours {
        WeekHours {
            mon: f(DayKey::Mon),
            tue: f(DayKey::Tue),
            wed: f(DayKey::Wed),
            thu: f(DayKey::Thu),
            fri: f(DayKey::Fri),
            sat: f(DayKey::Sat),
            sun: f(DayKey::Sun),
        }
    }

    pub fn get(&self, day: DayKey) -> &DayHours {
        use DayKey::*;
        match day {
            Mon => &self.mon,
            Tue => &self.tue,
            Wed => &self.wed,
            Thu => &self.thu,
            Fri => &self.fri,
            Sat => &self.sat,
            Sun => &self.sun,
        }
    }

    fn get_mut(&mut self, day: DayKey) -> &mut DayHours {
        use DayKey::*;
        match day {
            Mon => &mut self.mon,
            Tue => &mut self.tue,
            Wed => &mut self.wed,
            Thu => &mut self.thu,
            Fri => &mut self.fri,
            Sat => &mut self.sat,
            Sun => &mut self.sun,
        }
    }

    pub(crate) fn set(&mut self, day: DayKey, hours: DayHours) {
        *self.get_mut(day) = hours;
    }

    /// A copy of this week with one day replaced.
    pub fn with_day(&self, day: DayKey, hours: DayHours) -> WeekHours {
        let mut week = self.clone();
        week.set(day, hours);
        week
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &DayHours)> + '_ {
        DayKey::Mon.week_from().map(move |day| (day, self.get(day)))
    }

    /// Same week with every `Ranges` day normalized.
    pub fn normalized(&self) -> WeekHours {
        WeekHours::from_fn(|day| self.get(day).normalized())
    }

    pub fn from_json(data: &str) -> Result<WeekHours, HoursError> {
        let week: WeekHours = serde_json::from_str(data)?;
        Ok(week.normalized())
    }

    pub fn to_json(&self) -> Result<String, HoursError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_open_at(&self, day: DayKey, minute: u32) -> bool {
        self.get(day).is_open_at(minute)
    }

    /// Storefront listing: consecutive days with equal hours share one line,
    /// e.g. `("Mon-Fri", "9:00 AM - 5:30 PM")`.
    pub fn summary(&self) -> Vec<(String, String)> {
        let mut lines = Vec::new();
        let mut run_start = DayKey::Mon;
        let mut run_end = DayKey::Mon;

        for day in DayKey::Mon.week_from().skip(1) {
            if same_day_hours(self.get(run_start), self.get(day)) {
                run_end = day;
                continue;
            }
            lines.push(self.summary_line(run_start, run_end));
            run_start = day;
            run_end = day;
        }
        lines.push(self.summary_line(run_start, run_end));
        lines
    }

    fn summary_line(&self, first: DayKey, last: DayKey) -> (String, String) {
        let label = if first == last {
            first.to_string()
        } else {
            format!("{}-{}", first, last)
        };
        (label, self.get(first).normalized().to_string())
    }
}

impl Index<DayKey> for WeekHours {
    type Output = DayHours;

    fn index(&self, day: DayKey) -> &DayHours {
        self.get(day)
    }
}

impl Default for WeekHours {
    fn default() -> Self {
        default_week_hours()
    }
}

/// Weekdays `09:00-17:30`, weekends closed.
pub fn default_week_hours() -> WeekHours {
    HoursConfig::default().default_week()
}
