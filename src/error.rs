use thiserror::Error;

#[derive(Debug, Error)]
pub enum HoursError {
    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),

    #[error("invalid day of week index {0}")]
    InvalidDay(u8),

    #[error("no time range at index {index} (draft has {len})")]
    RangeIndex { index: usize, len: usize },

    #[error("storage failure for store {store_id}: {reason}")]
    Storage { store_id: String, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reasons a pending edit cannot be saved yet. These are advisory and meant
/// to be shown to the user; the merge engine tolerates all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Select at least one day.")]
    NoDaysSelected,

    #[error("Enter valid times.")]
    InvalidTime,

    #[error("Open and close time cannot be the same.")]
    ZeroLengthRange,

    #[error("Add at least one valid time range.")]
    NoValidRanges,
}
