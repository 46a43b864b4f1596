//! Error types for the scheduler module

use std::fmt;

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler-specific errors
///
/// Allocation itself never fails; these errors describe working-hours or
/// business-day definitions that cannot produce a usable calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Time of day could not be parsed (expected HH:MM)
    InvalidTime {
        value: String,
    },

    /// Working day ends before it starts
    InvalidWorkingHours {
        start: String,
        end: String,
    },

    /// Slot interval must be between 1 minute and one day
    InvalidInterval {
        minutes: i64,
    },

    /// Zone label is empty or contains whitespace
    InvalidZoneLabel {
        label: String,
    },

    /// Weekday name could not be parsed
    InvalidWeekday {
        value: String,
    },

    /// Date could not be parsed (expected YYYY-MM-DD)
    InvalidDate {
        value: String,
    },

    /// Non-working-day rule excludes every day of the week
    NoBusinessDays,

    /// Lead time must not be negative
    InvalidLeadTime {
        days: i64,
    },

    /// UTC offset must be strictly within one day
    InvalidUtcOffset {
        minutes: i32,
    },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime { value } => {
                write!(f, "Invalid time '{}'. Expected HH:MM", value)
            }
            Self::InvalidWorkingHours { start, end } => {
                write!(f, "Working day end {} is before start {}", end, start)
            }
            Self::InvalidInterval { minutes } => {
                write!(
                    f,
                    "Invalid slot interval {} minutes. Must be 1-1440",
                    minutes
                )
            }
            Self::InvalidZoneLabel { label } => {
                write!(f, "Invalid zone label '{}'", label)
            }
            Self::InvalidWeekday { value } => {
                write!(f, "Invalid weekday '{}'", value)
            }
            Self::InvalidDate { value } => {
                write!(f, "Invalid date '{}'. Expected YYYY-MM-DD", value)
            }
            Self::NoBusinessDays => {
                write!(f, "Non-working-day rule excludes every day of the week")
            }
            Self::InvalidLeadTime { days } => {
                write!(f, "Invalid lead time {} days. Must not be negative", days)
            }
            Self::InvalidUtcOffset { minutes } => {
                write!(f, "Invalid UTC offset {} minutes", minutes)
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

impl SchedulerError {
    /// Create an invalid time error
    pub fn invalid_time(value: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create an invalid weekday error
    pub fn invalid_weekday(value: impl Into<String>) -> Self {
        Self::InvalidWeekday {
            value: value.into(),
        }
    }
}
