//! Interview slot scheduling
//!
//! This module contains the core of talentsync: turning a rank-ordered list
//! of candidates into one interview slot each, spread over business-day
//! calendars.
//!
//! # Overview
//!
//! Every business day offers the same slots, from the start of the working
//! day up to and including its end (09:00 to 17:00 every 30 minutes by
//! default, 17 slots). The first interview day is the first business day on
//! or after `now + lead time` (two calendar days by default). Candidates are
//! handed slots in rank order; once a day is full, allocation rolls over to
//! the next business day, skipping weekends and configured holidays.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                   SlotAllocator                    │
//! │                                                    │
//! │  candidates ──zip── SlotCursor ──▶ Assignments     │
//! │                                │                   │
//! │                 ┌──────────────┴─────────┐         │
//! │                 ▼                        ▼         │
//! │          ┌──────────────┐        ┌──────────────┐  │
//! │          │ WorkingHours │        │ BusinessDays │  │
//! │          │  (Calendar)  │        │  (rule)      │  │
//! │          └──────────────┘        └──────────────┘  │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`calendar`] - Working hours, time slots and per-day calendars
//! - [`business_day`] - Non-working-day rules and day advancement
//! - [`allocator`] - Rank-ordered allocation and the day-rollover cursor
//! - [`clock`] - Fixed-offset source of the invocation instant
//! - [`error`] - Scheduler configuration errors
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use talentsync::models::Candidate;
//! use talentsync::scheduler::SlotAllocator;
//!
//! let allocator = SlotAllocator::default();
//! let now = NaiveDate::from_ymd_opt(2024, 6, 6)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let candidates = vec![
//!     Candidate::new("Asha", "asha@example.com", 1),
//!     Candidate::new("Ravi", "ravi@example.com", 2),
//! ];
//!
//! // Thursday + 2 days is a Saturday, so interviews start on Monday
//! let assignments = allocator.allocate(&candidates, now);
//! assert_eq!(assignments[0].slot_label(), "2024-06-10 09:00 IST");
//! assert_eq!(assignments[1].slot_label(), "2024-06-10 09:30 IST");
//! ```

pub mod allocator;
pub mod business_day;
pub mod calendar;
pub mod clock;
pub mod error;

// Re-export main types
pub use allocator::{CursorState, SlotAllocator, SlotCursor, DEFAULT_LEAD_DAYS};
pub use business_day::{BusinessDays, HolidayList, NonWorkingDays, WeekendRule, WorkWeek};
pub use calendar::{Calendar, TimeSlot, WorkingHours};
pub use clock::{Clock, FixedClock, FixedOffsetClock};
pub use error::{SchedulerError, SchedulerResult};
