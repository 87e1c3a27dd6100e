//! Year-to-date booking statistics.
//!
//! Counting is a [View] over the resolved bookings of one year; the calendar-derived figures and
//! the rates are added when the tally is finished into a [StatsSnapshot]. Bookings without a status
//! label are skipped entirely. Status comparisons here
//! work on lowercased display labels and are deliberately literal: `active` excludes exactly
//! `"completed"` and `"cancelled by admin"`, so a booking cancelled by the devotee on a future date
//! still counts as active.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{week_of_year, SlotCalendar};
use crate::record::BookingRecord;
use crate::resolver::ResolvedBookings;
use crate::view::{View, ViewStateComputation};

const COMPLETED: &str = "completed";
const CANCELLED_BY_ADMIN: &str = "cancelled by admin";
const CANCELLED_BY_DEVOTEE: &str = "cancelled by devotee";

/// Booking counters accumulated by [statistics_view].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingTally {
    /// Resolved bookings counted (every booking with a status)
    pub total: usize,
    /// Status is `completed`
    pub completed: usize,
    /// Dated today or later, neither completed nor cancelled by admin
    pub active: usize,
    /// Dated today or earlier
    pub until_today: usize,
    /// Dated today or earlier and cancelled by either party
    pub cancelled: usize,
}

/// Counts resolved bookings relative to `today`.
pub fn statistics_view<'a>(today: NaiveDate) -> View<'a, BookingTally, BookingRecord> {
    View {
        evolve: Box::new(move |tally, booking| {
            let mut tally = *tally;
            let label = booking.status.label().to_lowercase();
            if label.is_empty() {
                return tally;
            }
            tally.total += 1;
            if label == COMPLETED {
                tally.completed += 1;
            }
            if booking.date >= today && label != COMPLETED && label != CANCELLED_BY_ADMIN {
                tally.active += 1;
            }
            if booking.date <= today {
                tally.until_today += 1;
                if label == CANCELLED_BY_ADMIN || label == CANCELLED_BY_DEVOTEE {
                    tally.cancelled += 1;
                }
            }
            tally
        }),
        initial_state: Box::new(BookingTally::default),
    }
}

/// Statistics of one year as of `today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Resolved bookings with a non-empty status
    pub total_bookings: usize,
    /// Fridays in the year (52 or 53)
    pub total_fridays_in_year: usize,
    /// Resolved bookings dated on or before today
    pub bookings_until_today: usize,
    /// Resolved bookings marked completed
    pub completed_bookings: usize,
    /// Fridays on or before today
    pub fridays_until_today: usize,
    /// Bookings on or before today cancelled by either party
    pub cancelled_bookings: usize,
    /// Bookings from today onward, neither completed nor cancelled by admin
    pub active_bookings: usize,
    /// Fridays on or after today
    pub remaining_fridays: usize,
    /// Week number of today
    pub current_week: u32,
    /// `completed_bookings / fridays_until_today`, as a percentage with one decimal
    pub completion_rate: f64,
    /// `bookings_until_today / fridays_until_today`, as a percentage with one decimal
    pub booking_rate: f64,
}

impl StatsSnapshot {
    /// Computes the statistics of `calendar`'s year from its resolved bookings.
    pub fn compute(resolved: &ResolvedBookings, calendar: &SlotCalendar, today: NaiveDate) -> Self {
        let bookings: Vec<&BookingRecord> = resolved.iter().collect();
        let tally = statistics_view(today).compute_new_state(None, &bookings);
        Self::from_tally(tally, calendar, today)
    }

    /// Finishes a tally with the calendar-derived figures.
    pub fn from_tally(tally: BookingTally, calendar: &SlotCalendar, today: NaiveDate) -> Self {
        let fridays_until_today = calendar.on_or_before(today).count();
        StatsSnapshot {
            total_bookings: tally.total,
            total_fridays_in_year: calendar.len(),
            bookings_until_today: tally.until_today,
            completed_bookings: tally.completed,
            fridays_until_today,
            cancelled_bookings: tally.cancelled,
            active_bookings: tally.active,
            remaining_fridays: calendar.on_or_after(today).count(),
            current_week: week_of_year(today),
            completion_rate: percentage(tally.completed, fridays_until_today),
            booking_rate: percentage(tally.until_today, fridays_until_today),
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let rate = part as f64 / whole as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}
