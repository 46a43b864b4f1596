//! Invocation clock
//!
//! The allocator works on naive local times stamped with a fixed zone label.
//! "Now" is the current UTC instant shifted by a fixed offset; no further
//! timezone handling is done.

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

use super::error::{SchedulerError, SchedulerResult};

/// Offset of the default `IST` label (+05:30)
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Source of the invocation instant
pub trait Clock: Send + Sync {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock at a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    /// Create a clock `offset_minutes` east of UTC (must be under 24h)
    pub fn new(offset_minutes: i32) -> SchedulerResult<Self> {
        offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or(SchedulerError::InvalidUtcOffset {
                minutes: offset_minutes,
            })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for FixedOffsetClock {
    fn default() -> Self {
        Self::new(DEFAULT_UTC_OFFSET_MINUTES).unwrap_or(Self {
            offset: Utc.fix(),
        })
    }
}

impl Clock for FixedOffsetClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
