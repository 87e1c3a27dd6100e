use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::SlotCalendar;
use crate::record::BookingRecord;
use crate::resolver::ResolvedBookings;

/// Tabs of the administrator's booking board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingTab {
    /// Upcoming bookings that still need attention
    #[default]
    Active,
    /// Everything else: past dates and finished lifecycles
    Past,
}

impl BookingTab {
    /// Which tab `booking` is listed under as of `today`.
    pub fn of(booking: &BookingRecord, today: NaiveDate) -> Self {
        let label = booking.status.label();
        let finished = ["Completed", "Cancelled", "Refunded"]
            .iter()
            .any(|word| label.contains(word));
        if booking.date >= today && !finished {
            BookingTab::Active
        } else {
            BookingTab::Past
        }
    }
}

/// Resolved bookings listed under `tab`, ascending by date. Bookings without a status are on
/// neither tab.
pub fn admin_board(
    resolved: &ResolvedBookings,
    tab: BookingTab,
    today: NaiveDate,
) -> Vec<BookingRecord> {
    resolved
        .iter()
        .filter(|booking| !booking.status.label().is_empty())
        .filter(|booking| BookingTab::of(booking, today) == tab)
        .cloned()
        .collect()
}

/// One row of the devotee's slot picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotListing {
    /// The Friday
    pub date: NaiveDate,
    /// Name on the booking occupying the slot; `None` when the slot can be requested
    pub booked_by: Option<String>,
}

impl SlotListing {
    /// Whether the slot can be requested.
    pub fn is_available(&self) -> bool {
        self.booked_by.is_none()
    }
}

/// The slots from `today` onward with their availability.
pub fn slot_listing(
    calendar: &SlotCalendar,
    resolved: &ResolvedBookings,
    today: NaiveDate,
) -> Vec<SlotListing> {
    calendar
        .on_or_after(today)
        .map(|date| SlotListing {
            date,
            booked_by: resolved
                .get(date)
                .filter(|booking| booking.occupies_slot())
                .map(|booking| booking.name.clone()),
        })
        .collect()
}
