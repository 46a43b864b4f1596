//! Business-day advancement
//!
//! Decides which dates may carry interviews. The rule is a pluggable
//! [`NonWorkingDays`] predicate; the default treats Saturday and Sunday as
//! non-working. [`BusinessDays`] exposes the two entry points used by the
//! allocator: [`BusinessDays::first_business_day`] accepts the given date if
//! it is already eligible, [`BusinessDays::next_business_day`] always moves
//! forward at least one day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::error::{SchedulerError, SchedulerResult};

/// Predicate classifying dates as non-working
///
/// A rule must leave infinitely many business days, otherwise advancing
/// never terminates. [`WeekendRule`] enforces this at construction.
pub trait NonWorkingDays: Send + Sync {
    /// Whether no interviews may be held on `date`
    fn is_non_working(&self, date: NaiveDate) -> bool;
}

impl<F> NonWorkingDays for F
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_non_working(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

// ============================================================================
// Weekend Rule
// ============================================================================

/// Recurring weekly days off
///
/// Only constructible through [`WeekendRule::new`] and [`WeekendRule::parse`],
/// which reject a rule covering all seven days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekendRule {
    days: Vec<Weekday>,
}

impl WeekendRule {
    /// Create a weekend rule, rejecting one that covers the whole week
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> SchedulerResult<Self> {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(Weekday::num_days_from_monday);
        days.dedup();

        if days.len() >= 7 {
            return Err(SchedulerError::NoBusinessDays);
        }

        Ok(Self { days })
    }

    /// Parse weekday names such as `Sat`, `sunday`
    pub fn parse<S: AsRef<str>>(names: &[S]) -> SchedulerResult<Self> {
        let days = names
            .iter()
            .map(|name| {
                name.as_ref()
                    .trim()
                    .parse::<Weekday>()
                    .map_err(|_| SchedulerError::invalid_weekday(name.as_ref()))
            })
            .collect::<SchedulerResult<Vec<_>>>()?;
        Self::new(days)
    }

    /// Saturday and Sunday
    pub fn saturday_sunday() -> Self {
        Self {
            days: vec![Weekday::Sat, Weekday::Sun],
        }
    }

    /// Weekdays treated as non-working
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }
}

impl Default for WeekendRule {
    fn default() -> Self {
        Self::saturday_sunday()
    }
}

impl NonWorkingDays for WeekendRule {
    fn is_non_working(&self, date: NaiveDate) -> bool {
        self.days.contains(&date.weekday())
    }
}

// ============================================================================
// Holidays
// ============================================================================

/// Explicit list of non-working dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayList {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayList {
    /// Parse `YYYY-MM-DD` dates
    pub fn parse<S: AsRef<str>>(values: &[S]) -> SchedulerResult<Self> {
        let dates = values
            .iter()
            .map(|v| {
                NaiveDate::parse_from_str(v.as_ref().trim(), "%Y-%m-%d")
                    .map_err(|_| SchedulerError::invalid_date(v.as_ref()))
            })
            .collect::<SchedulerResult<BTreeSet<_>>>()?;
        Ok(Self { dates })
    }

    /// Number of holidays
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl NonWorkingDays for HolidayList {
    fn is_non_working(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Weekend rule combined with holidays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkWeek {
    pub weekend: WeekendRule,
    pub holidays: HolidayList,
}

impl WorkWeek {
    pub fn new(weekend: WeekendRule, holidays: HolidayList) -> Self {
        Self { weekend, holidays }
    }
}

impl NonWorkingDays for WorkWeek {
    fn is_non_working(&self, date: NaiveDate) -> bool {
        self.weekend.is_non_working(date) || self.holidays.is_non_working(date)
    }
}

// ============================================================================
// Business Days
// ============================================================================

/// Business-day advancer over a non-working-day rule
#[derive(Clone)]
pub struct BusinessDays {
    rule: Arc<dyn NonWorkingDays>,
}

impl BusinessDays {
    /// Create an advancer from any rule
    pub fn new(rule: impl NonWorkingDays + 'static) -> Self {
        Self {
            rule: Arc::new(rule),
        }
    }

    /// Saturday/Sunday weekends, no holidays
    pub fn weekends() -> Self {
        Self::new(WeekendRule::saturday_sunday())
    }

    /// Whether interviews may be held on `date`
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.rule.is_non_working(date)
    }

    /// `date` itself if eligible, otherwise the next eligible date
    pub fn first_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_business_day(current) {
            current += Duration::days(1);
        }
        current
    }

    /// The first eligible date strictly after `date`
    pub fn next_business_day(&self, date: NaiveDate) -> NaiveDate {
        self.first_business_day(date + Duration::days(1))
    }
}

impl Default for BusinessDays {
    fn default() -> Self {
        Self::weekends()
    }
}

impl fmt::Debug for BusinessDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessDays").finish_non_exhaustive()
    }
}
