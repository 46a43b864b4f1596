//! Ranked slot allocation
//!
//! Candidates arrive sorted by rank and are handed slots strictly in that
//! order: rank N never receives an earlier slot than rank N-1. Slots come
//! from a [`SlotCursor`], a small state machine walking business-day
//! calendars:
//!
//! ```text
//!   Generating(day) ──generate──▶ Consuming(calendar, 0)
//!        ▲                              │ take slot, position += 1
//!        │                              ▼
//!   next_business_day ◀── Exhausted(day) when position == len
//! ```
//!
//! Calendars are produced lazily, so a run with zero candidates never
//! generates one, and a day is only rolled over when another candidate
//! actually needs a slot.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::business_day::BusinessDays;
use super::calendar::{Calendar, TimeSlot, WorkingHours};
use super::error::{SchedulerError, SchedulerResult};
use crate::models::{Assignment, Candidate};

/// Calendar days between invocation and the first possible interview day
pub const DEFAULT_LEAD_DAYS: i64 = 2;

// ============================================================================
// Slot Cursor
// ============================================================================

/// Position of a [`SlotCursor`] across days
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorState {
    /// The calendar for `day` has not been generated yet
    Generating { day: NaiveDate },

    /// Slots of `calendar` from `position` onwards are free
    Consuming { calendar: Calendar, position: usize },

    /// Every slot of `day` has been handed out
    Exhausted { day: NaiveDate },
}

/// Infinite, ordered supply of slots over consecutive business days
#[derive(Debug, Clone)]
pub struct SlotCursor<'a> {
    hours: &'a WorkingHours,
    business_days: &'a BusinessDays,
    state: CursorState,
}

impl<'a> SlotCursor<'a> {
    /// Start a cursor at `first_day`, which must already be a business day
    pub fn new(
        hours: &'a WorkingHours,
        business_days: &'a BusinessDays,
        first_day: NaiveDate,
    ) -> Self {
        Self {
            hours,
            business_days,
            state: CursorState::Generating { day: first_day },
        }
    }

    /// Current state
    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Move one step along the state machine without handing out a slot
    fn transition(&self, state: CursorState) -> CursorState {
        match state {
            CursorState::Generating { day } => CursorState::Consuming {
                calendar: self.hours.generate(day),
                position: 0,
            },
            CursorState::Consuming { calendar, position } if position >= calendar.len() => {
                CursorState::Exhausted {
                    day: calendar.date(),
                }
            }
            consuming @ CursorState::Consuming { .. } => consuming,
            CursorState::Exhausted { day } => CursorState::Generating {
                day: self.business_days.next_business_day(day),
            },
        }
    }

    /// Take the next free slot, rolling over to later business days as needed
    pub fn next_slot(&mut self) -> TimeSlot {
        loop {
            if let CursorState::Consuming { calendar, position } = &mut self.state {
                if let Some(slot) = calendar.get(*position) {
                    let slot = slot.clone();
                    *position += 1;
                    return slot;
                }
            }

            let placeholder = CursorState::Exhausted {
                day: NaiveDate::MIN,
            };
            let current = std::mem::replace(&mut self.state, placeholder);
            self.state = self.transition(current);
        }
    }
}

impl Iterator for SlotCursor<'_> {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_slot())
    }
}

// ============================================================================
// Slot Allocator
// ============================================================================

/// Assigns ranked candidates to slots across business days
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    hours: WorkingHours,
    business_days: BusinessDays,
    lead_time: Duration,
}

impl SlotAllocator {
    /// Create an allocator
    pub fn new(
        hours: WorkingHours,
        business_days: BusinessDays,
        lead_days: i64,
    ) -> SchedulerResult<Self> {
        if lead_days < 0 {
            return Err(SchedulerError::InvalidLeadTime { days: lead_days });
        }

        Ok(Self {
            hours,
            business_days,
            lead_time: Duration::days(lead_days),
        })
    }

    /// Working hours used for every generated calendar
    pub fn working_hours(&self) -> &WorkingHours {
        &self.hours
    }

    /// Business-day rule
    pub fn business_days(&self) -> &BusinessDays {
        &self.business_days
    }

    /// Lead time before the first interview day
    pub fn lead_time(&self) -> Duration {
        self.lead_time
    }

    /// Slots available on each business day
    pub fn capacity_per_day(&self) -> usize {
        self.hours.slots_per_day()
    }

    /// First business day on or after `now + lead time`
    pub fn first_day(&self, now: NaiveDateTime) -> NaiveDate {
        self.business_days
            .first_business_day((now + self.lead_time).date())
    }

    /// Calendar for an arbitrary date
    pub fn calendar_for(&self, date: NaiveDate) -> Calendar {
        self.hours.generate(date)
    }

    /// Slot cursor starting at the first day for `now`
    pub fn cursor(&self, now: NaiveDateTime) -> SlotCursor<'_> {
        SlotCursor::new(&self.hours, &self.business_days, self.first_day(now))
    }

    /// Assign one slot per candidate, in input order
    ///
    /// `candidates` must already be sorted by ascending rank.
    pub fn allocate(&self, candidates: &[Candidate], now: NaiveDateTime) -> Vec<Assignment> {
        candidates
            .iter()
            .cloned()
            .zip(self.cursor(now))
            .enumerate()
            .map(|(position, (candidate, slot))| Assignment {
                position,
                candidate,
                slot,
            })
            .collect()
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self {
            hours: WorkingHours::default(),
            business_days: BusinessDays::default(),
            lead_time: Duration::days(DEFAULT_LEAD_DAYS),
        }
    }
}
