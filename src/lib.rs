//! Weekly business hours for storefronts.
//!
//! A [`WeekHours`] holds one [`DayHours`] per day. Edits go through a
//! [`Draft`]: seed it with [`build_draft`], let the user change it, check it
//! with [`validate_draft`], then produce the replacement week with
//! [`apply_draft_to_week`].

pub mod config;
pub mod day;
pub mod draft;
pub mod error;
pub mod merge;
pub mod range;
pub mod store;
pub mod time_of_day;
pub mod week;

pub use config::HoursConfig;
pub use day::DayKey;
pub use draft::{validate_draft, Draft, DraftMode, DraftRange, DraftRangeKind};
pub use error::{DraftError, HoursError};
pub use merge::{apply_draft_to_week, build_draft, build_draft_with, expand_per_day};
pub use range::{normalize_and_merge, TimeRange};
pub use store::{HoursRow, HoursStore, MemoryHoursStore};
pub use time_of_day::{
    clamp_minutes, minutes_to_label, minutes_to_time_of_day, parse_time_of_day, MINUTES_PER_DAY,
};
pub use week::{default_week_hours, same_day_hours, DayHours, WeekHours};
