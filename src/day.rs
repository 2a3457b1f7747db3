use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    /// Canonical order of the week.
    pub const ALL: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];

    /// Position in the canonical order, Monday = 0.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<DayKey> {
        DayKey::ALL.get(index as usize).copied()
    }

    pub fn next(self) -> DayKey {
        DayKey::ALL[(self.index() as usize + 1) % 7]
    }

    pub fn prev(self) -> DayKey {
        DayKey::ALL[(self.index() as usize + 6) % 7]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, DayKey::Sat | DayKey::Sun)
    }

    pub fn short_name(self) -> &'static str {
        use DayKey::*;
        match self {
            Mon => "Mon",
            Tue => "Tue",
            Wed => "Wed",
            Thu => "Thu",
            Fri => "Fri",
            Sat => "Sat",
            Sun => "Sun",
        }
    }

    /// All seven days in order, beginning with `self`.
    pub fn week_from(self) -> WeekIter {
        WeekIter {
            cur: self,
            remaining: 7,
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl From<Weekday> for DayKey {
    fn from(wd: Weekday) -> DayKey {
        DayKey::ALL[wd.num_days_from_monday() as usize]
    }
}

impl From<DayKey> for Weekday {
    fn from(day: DayKey) -> Weekday {
        use DayKey::*;
        match day {
            Mon => Weekday::Mon,
            Tue => Weekday::Tue,
            Wed => Weekday::Wed,
            Thu => Weekday::Thu,
            Fri => Weekday::Fri,
            Sat => Weekday::Sat,
            Sun => Weekday::Sun,
        }
    }
}

pub struct WeekIter {
    cur: DayKey,
    remaining: u8,
}

impl Iterator for WeekIter {
    type Item = DayKey;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let ret = self.cur;
            self.cur = self.cur.next();
            self.remaining -= 1;
            Some(ret)
        }
    }
}
