//! Operations exposed to the presentation and administration layer.
//!
//! Reads always resolve the latest records from the store; writes go through the
//! [BookingAggregate]. Authorization is decided by the caller before any of these are invoked.

use chrono::NaiveDate;

use crate::aggregate::{BookingAggregate, BookingOutcome};
use crate::board::{admin_board, slot_listing, BookingTab, SlotListing};
use crate::booking::{booking_decider, BookingCommand, RequestBooking, TransitionBooking};
use crate::calendar::SlotCalendar;
use crate::clock::Clock;
use crate::error::Result;
use crate::live::LiveBookings;
use crate::record::{BookingId, BookingRecord};
use crate::resolver::{resolve, ResolvedBookings};
use crate::stats::StatsSnapshot;
use crate::status::BookingStatus;
use crate::store::BookingStore;

/// The booking application service.
///
/// Generic parameters:
///
/// - `S` - Booking record store
/// - `C` - Clock stamping new records
pub struct BookingService<'a, S, C>
where
    S: BookingStore,
{
    aggregate: BookingAggregate<'a, S>,
    clock: C,
}

impl<S, C> BookingService<'_, S, C>
where
    S: BookingStore + Sync,
    C: Clock,
{
    /// Creates a service over `store`, stamping new records with `clock`.
    pub fn new(store: S, clock: C) -> Self {
        BookingService {
            aggregate: BookingAggregate::new(store, booking_decider()),
            clock,
        }
    }

    /// The underlying record store.
    pub fn store(&self) -> &S {
        self.aggregate.store()
    }

    /// The authoritative booking of every date of `year` that has records.
    pub async fn resolved_bookings(&self, year: i32) -> Result<ResolvedBookings> {
        let records = self.store().fetch_year(year).await?;
        Ok(resolve(&records))
    }

    /// Requests `date` for a devotee. The slot must be a Friday, not before the clock's date, that
    /// is not currently booked.
    pub async fn request_booking(
        &self,
        date: NaiveDate,
        name: &str,
        phone: &str,
    ) -> Result<BookingOutcome> {
        let now = self.clock.now();
        let command = BookingCommand::Request(RequestBooking {
            date,
            name: name.to_string(),
            phone: phone.to_string(),
            requested_at: now,
            today: now.date_naive(),
        });
        self.aggregate.handle(&command).await
    }

    /// Moves the booking record `id` to `target`, if the transition table allows it.
    pub async fn transition(&self, id: &BookingId, target: BookingStatus) -> Result<BookingOutcome> {
        let command = BookingCommand::Transition(TransitionBooking {
            booking_id: id.clone(),
            target,
        });
        self.aggregate.handle(&command).await
    }

    /// Year-to-date statistics of `year` as of `today`.
    pub async fn statistics(&self, year: i32, today: NaiveDate) -> Result<StatsSnapshot> {
        let resolved = self.resolved_bookings(year).await?;
        Ok(StatsSnapshot::compute(
            &resolved,
            &SlotCalendar::for_year(year),
            today,
        ))
    }

    /// Live resolved bookings of `year`.
    pub fn watch(&self, year: i32) -> LiveBookings {
        LiveBookings::new(self.store().subscribe(year))
    }

    /// The Fridays of `year` from `today` onward, with who holds each.
    pub async fn slot_listing(&self, year: i32, today: NaiveDate) -> Result<Vec<SlotListing>> {
        let resolved = self.resolved_bookings(year).await?;
        Ok(slot_listing(&SlotCalendar::for_year(year), &resolved, today))
    }

    /// Resolved bookings of `year` listed under `tab` of the administrator's board.
    pub async fn admin_board(
        &self,
        year: i32,
        tab: BookingTab,
        today: NaiveDate,
    ) -> Result<Vec<BookingRecord>> {
        let resolved = self.resolved_bookings(year).await?;
        Ok(admin_board(&resolved, tab, today))
    }
}
