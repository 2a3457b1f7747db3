//! Day-local minute offsets and their text forms.
//!
//! Every time in this crate is a count of minutes since local midnight in
//! `0..=1440`. `1440` is only ever an end-of-day sentinel.

use crate::error::HoursError;
use chrono::NaiveTime;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Clamp a raw (possibly fractional or NaN) minute value into `0..=1440`.
pub fn clamp_minutes(x: f64) -> u32 {
    if x.is_nan() {
        0
    } else {
        x.clamp(0.0, MINUTES_PER_DAY as f64) as u32
    }
}

/// Parse a 24-hour `H:MM` / `HH:MM` string. Returns `None` for anything
/// malformed or out of range.
pub fn parse_time_of_day(s: &str) -> Option<u32> {
    let (hh, mm) = s.split_once(':')?;
    if hh.is_empty() || hh.len() > 2 || mm.len() != 2 {
        return None;
    }
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u32 = hh.parse().ok()?;
    let minute: u32 = mm.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

pub fn try_parse_time_of_day(s: &str) -> Result<u32, HoursError> {
    parse_time_of_day(s).ok_or_else(|| HoursError::InvalidTime(s.to_owned()))
}

fn to_naive_time(minutes: u32) -> NaiveTime {
    let m = minutes.min(MINUTES_PER_DAY) % MINUTES_PER_DAY;
    // always in range after the modulo
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Zero-padded `HH:MM`. The end-of-day sentinel renders as `00:00`, which a
/// time input parses back to 0 and the draft then reads as "until midnight".
pub fn minutes_to_time_of_day(minutes: u32) -> String {
    to_naive_time(minutes).format("%H:%M").to_string()
}

/// 12-hour display label such as `9:00 AM`. `1440` shows as `12:00 AM`.
pub fn minutes_to_label(minutes: u32) -> String {
    to_naive_time(minutes).format("%-I:%M %p").to_string()
}

/// serde adapter for minute fields written as `"HH:MM"` in config files.
pub(crate) mod hhmm {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(minutes: &u32, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::minutes_to_time_of_day(*minutes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let raw = String::deserialize(d)?;
        super::try_parse_time_of_day(&raw).map_err(de::Error::custom)
    }
}
