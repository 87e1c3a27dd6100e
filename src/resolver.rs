//! Per-date conflict resolution.
//!
//! The store lets independent writers insert records for the same Friday, so a date may carry a
//! cancelled booking next to its rebooking, or two racing requests. The resolver reduces the
//! year's records to at most one authoritative booking per date:
//!
//! 1. records are grouped by `date`;
//! 2. an active record always beats a cancelled one, whatever their timestamps;
//! 3. between records of the same class the most recent `created_at` wins;
//! 4. a remaining tie goes to the greater `id`, so the result never depends on delivery order.
//!
//! The reduction is a pure fold; running it twice, or on a shuffled input, yields the same map.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::record::{BookingId, BookingRecord};
use crate::view::{View, ViewStateComputation};

/// The authoritative booking of each date that has any record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBookings {
    by_date: BTreeMap<NaiveDate, BookingRecord>,
}

impl ResolvedBookings {
    /// The resolved booking of `date`, if any record targets it.
    pub fn get(&self, date: NaiveDate) -> Option<&BookingRecord> {
        self.by_date.get(&date)
    }

    /// Whether `date` is unavailable for new requests.
    pub fn is_booked(&self, date: NaiveDate) -> bool {
        self.get(date).is_some_and(BookingRecord::occupies_slot)
    }

    /// The resolved booking carrying `id`, if it won its date.
    pub fn find(&self, id: &BookingId) -> Option<&BookingRecord> {
        self.by_date.values().find(|booking| &booking.id == id)
    }

    /// Resolved bookings, ascending by date.
    pub fn iter(&self) -> impl Iterator<Item = &BookingRecord> {
        self.by_date.values()
    }

    /// Number of dates with a resolved booking.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    /// Whether no date has a booking.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

impl<'r> IntoIterator for &'r ResolvedBookings {
    type Item = &'r BookingRecord;
    type IntoIter = std::collections::btree_map::Values<'r, NaiveDate, BookingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_date.values()
    }
}

fn rank(record: &BookingRecord) -> (bool, DateTime<Utc>, &BookingId) {
    (
        !record.status.is_cancelled_variant(),
        record.created_at,
        &record.id,
    )
}

/// Whether `candidate` should replace `incumbent` as the booking of their shared date.
pub fn supersedes(candidate: &BookingRecord, incumbent: &BookingRecord) -> bool {
    rank(candidate) > rank(incumbent)
}

/// The resolver as a [View] folding raw records into [ResolvedBookings].
pub fn booking_resolver<'a>() -> View<'a, ResolvedBookings, BookingRecord> {
    View {
        evolve: Box::new(|state, record| {
            let mut new_state = state.clone();
            let replace = new_state
                .by_date
                .get(&record.date)
                .map_or(true, |incumbent| supersedes(record, incumbent));
            if replace {
                new_state.by_date.insert(record.date, record.clone());
            }
            new_state
        }),
        initial_state: Box::new(ResolvedBookings::default),
    }
}

/// Resolves a full snapshot of booking records.
pub fn resolve(records: &[BookingRecord]) -> ResolvedBookings {
    let records: Vec<&BookingRecord> = records.iter().collect();
    booking_resolver().compute_new_state(None, &records)
}
