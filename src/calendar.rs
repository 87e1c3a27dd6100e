//! Bookable slots: every Friday of a Gregorian year.
//!
//! Dates are plain calendar days ([NaiveDate]); there is no time-of-day or timezone component, so
//! comparing a slot with "today" never suffers from an off-by-one around midnight.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Every Friday of `year`, ascending. Years outside the supported calendar range yield no slots.
pub fn fridays_of_year(year: i32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_weekday_of_month_opt(year, 1, Weekday::Fri, 1) else {
        return Vec::new();
    };
    std::iter::successors(Some(first), |date| date.checked_add_signed(Duration::weeks(1)))
        .take_while(|date| date.year() == year)
        .collect()
}

/// Week number of `date`: days since January 1st, shifted by January 1st's weekday (Sunday = 0),
/// ceiling-divided by seven.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let offset = date
        .with_ordinal(1)
        .map(|jan_first| jan_first.weekday().num_days_from_sunday())
        .unwrap_or(0);
    (date.ordinal0() + offset + 1).div_ceil(7)
}

/// The slot calendar of one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCalendar {
    year: i32,
    slots: Vec<NaiveDate>,
}

impl SlotCalendar {
    /// Generates the calendar for `year`.
    pub fn for_year(year: i32) -> Self {
        SlotCalendar {
            year,
            slots: fridays_of_year(year),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// All slots, ascending.
    pub fn slots(&self) -> &[NaiveDate] {
        &self.slots
    }

    /// Number of slots in the year (52 or 53).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the year has no slots (only outside the supported range).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `date` is a bookable slot of this year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.slots.binary_search(&date).is_ok()
    }

    /// Slots on or before `today`.
    pub fn on_or_before(&self, today: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.iter().copied().filter(move |slot| *slot <= today)
    }

    /// Slots on or after `today`.
    pub fn on_or_after(&self, today: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.iter().copied().filter(move |slot| *slot >= today)
    }
}

/// Whether `date` falls on a Friday.
pub fn is_slot(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Fri
}
