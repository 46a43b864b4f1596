//! Working-hours calendar generation
//!
//! A [`Calendar`] holds the interview slots of exactly one day, from the
//! start of the working day up to and including its end, evenly spaced by
//! the slot interval. Generation is pure: the same date always yields the
//! same slots.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{SchedulerError, SchedulerResult};

/// Format of the timestamp part of a slot label
pub const SLOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Zone label appended to every slot label
pub const DEFAULT_ZONE_LABEL: &str = "IST";

/// Default first slot of the day
pub const DEFAULT_DAY_START: &str = "09:00";

/// Default last slot of the day (inclusive)
pub const DEFAULT_DAY_END: &str = "17:00";

/// Default slot length in minutes
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse a `HH:MM` time of day
pub fn parse_time_of_day(value: &str) -> SchedulerResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| SchedulerError::invalid_time(value))
}

// ============================================================================
// Time Slot
// ============================================================================

/// A single interview slot
///
/// Slots have no identity beyond their value. The label is the wire format
/// shared with downstream consumers: `YYYY-MM-DD HH:MM <zone>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Local start time of the slot
    pub start: NaiveDateTime,

    /// Fixed zone label, no conversion is applied
    pub zone_label: String,
}

impl TimeSlot {
    /// Create a new slot
    pub fn new(start: NaiveDateTime, zone_label: impl Into<String>) -> Self {
        Self {
            start,
            zone_label: zone_label.into(),
        }
    }

    /// Date the slot falls on
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Time of day the slot starts
    pub fn time(&self) -> NaiveTime {
        self.start.time()
    }

    /// Render the slot label, e.g. `2024-06-03 09:00 IST`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.start.format(SLOT_TIME_FORMAT),
            self.zone_label
        )
    }
}

// ============================================================================
// Working Hours
// ============================================================================

/// Bounds and granularity of a working day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingHours {
    day_start: NaiveTime,
    day_end: NaiveTime,
    slot_minutes: i64,
    zone_label: String,
}

impl WorkingHours {
    /// Create validated working hours
    ///
    /// `day_end` is inclusive; `day_end == day_start` yields a single slot.
    pub fn new(
        day_start: NaiveTime,
        day_end: NaiveTime,
        slot_minutes: i64,
        zone_label: impl Into<String>,
    ) -> SchedulerResult<Self> {
        let zone_label = zone_label.into();

        if day_end < day_start {
            return Err(SchedulerError::InvalidWorkingHours {
                start: day_start.format("%H:%M").to_string(),
                end: day_end.format("%H:%M").to_string(),
            });
        }

        if slot_minutes <= 0 || slot_minutes > MINUTES_PER_DAY {
            return Err(SchedulerError::InvalidInterval {
                minutes: slot_minutes,
            });
        }

        if zone_label.is_empty() || zone_label.chars().any(char::is_whitespace) {
            return Err(SchedulerError::InvalidZoneLabel { label: zone_label });
        }

        Ok(Self {
            day_start,
            day_end,
            slot_minutes,
            zone_label,
        })
    }

    /// Create working hours from `HH:MM` strings
    pub fn parse(
        day_start: &str,
        day_end: &str,
        slot_minutes: i64,
        zone_label: impl Into<String>,
    ) -> SchedulerResult<Self> {
        Self::new(
            parse_time_of_day(day_start)?,
            parse_time_of_day(day_end)?,
            slot_minutes,
            zone_label,
        )
    }

    /// First slot of the day
    pub fn day_start(&self) -> NaiveTime {
        self.day_start
    }

    /// Last slot of the day
    pub fn day_end(&self) -> NaiveTime {
        self.day_end
    }

    /// Slot interval
    pub fn interval(&self) -> Duration {
        Duration::minutes(self.slot_minutes)
    }

    /// Zone label stamped on generated slots
    pub fn zone_label(&self) -> &str {
        &self.zone_label
    }

    /// Number of slots in every generated calendar
    ///
    /// `floor((end - start) / interval) + 1`
    pub fn slots_per_day(&self) -> usize {
        let span = (self.day_end - self.day_start).num_minutes();
        (span / self.slot_minutes) as usize + 1
    }

    /// Generate the calendar for a date
    pub fn generate(&self, date: NaiveDate) -> Calendar {
        let end = date.and_time(self.day_end);
        let interval = self.interval();

        let mut slots = Vec::with_capacity(self.slots_per_day());
        let mut current = date.and_time(self.day_start);
        while current <= end {
            slots.push(TimeSlot::new(current, self.zone_label.as_str()));
            current += interval;
        }

        Calendar { date, slots }
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            day_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            slot_minutes: DEFAULT_SLOT_MINUTES,
            zone_label: DEFAULT_ZONE_LABEL.to_string(),
        }
    }
}

// ============================================================================
// Calendar
// ============================================================================

/// Ordered slots of a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    date: NaiveDate,
    slots: Vec<TimeSlot>,
}

impl Calendar {
    /// Day this calendar covers
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// All slots in generated order
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Slot at a position
    pub fn get(&self, position: usize) -> Option<&TimeSlot> {
        self.slots.get(position)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the calendar has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over slots
    pub fn iter(&self) -> std::slice::Iter<'_, TimeSlot> {
        self.slots.iter()
    }

    /// Rendered labels of all slots
    pub fn labels(&self) -> Vec<String> {
        self.slots.iter().map(TimeSlot::label).collect()
    }
}

impl<'a> IntoIterator for &'a Calendar {
    type Item = &'a TimeSlot;
    type IntoIter = std::slice::Iter<'a, TimeSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
