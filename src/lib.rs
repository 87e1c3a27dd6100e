#![warn(missing_docs)]
//! # Pooja Booking
//!
//! A community temple offers one pooja (ritual) slot every Friday. Devotees request a slot,
//! administrators walk each booking through its lifecycle, and the organization watches
//! year-to-date statistics.
//!
//! The record store behind the application allows independent inserts, so the same Friday can
//! carry several booking records at once (a cancelled booking and its rebooking, or two devotees
//! racing for the same slot). This crate reduces those records to a single source of truth per
//! date and guards every status change with an explicit transition table.
//!
//! ## Decider
//!
//! [decider::Decider] is the decision-making algorithm of the booking lifecycle. It belongs to the
//! Domain layer. It has the generic parameters `C`, `S`, `E` and `Error`:
//!
//! - `C` - Command ([booking::BookingCommand])
//! - `S` - State ([booking::BookingState])
//! - `E` - Event ([booking::BookingEvent])
//! - `Error` - rejection reason ([error::BookingError])
//!
//! ```rust
//! pub type DecideFunction<'a, C, S, E, Error> = Box<dyn Fn(&C, &S) -> Result<Vec<E>, Error> + 'a + Send + Sync>;
//! pub type EvolveFunction<'a, S, E> = Box<dyn Fn(&S, &E) -> S + 'a + Send + Sync>;
//! pub type InitialStateFunction<'a, S> = Box<dyn Fn() -> S + 'a + Send + Sync>;
//! ```
//!
//! The booking decider is built by [booking::booking_decider]. An illegal status change is
//! rejected by `decide` and never reaches the store.
//!
//! ## View
//!
//! [view::View] is an event handling algorithm folding a sequence of facts into denormalized state.
//! Two views live in this crate:
//!
//! - [resolver::booking_resolver] folds raw [record::BookingRecord]s into
//!   [resolver::ResolvedBookings], at most one authoritative booking per Friday.
//! - [stats::statistics_view] folds resolved bookings into a [stats::BookingTally], finished into a
//!   [stats::StatsSnapshot].
//!
//! ## Aggregate
//!
//! [aggregate::BookingAggregate] belongs to the Application layer. It fetches the current state from
//! a [store::BookingStore], delegates the command to the decider and persists the produced events.
//! Nothing is applied optimistically: the returned record reflects only confirmed writes.
//!
//! ## Live resolution
//!
//! [live::LiveBookings] listens to full-snapshot deliveries from a [store::Subscription] and
//! recomputes the resolved map on each one.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use pooja_booking::record::{BookingId, BookingRecord};
//! use pooja_booking::resolver::resolve;
//! use pooja_booking::status::BookingStatus;
//!
//! let friday = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
//! let cancelled = BookingRecord {
//!     id: BookingId::from("b-2"),
//!     date: friday,
//!     year: 2025,
//!     name: "Anjali".to_string(),
//!     phone: "98470 00000".to_string(),
//!     status: BookingStatus::CancelledByAdmin,
//!     created_at: Utc.with_ymd_and_hms(2024, 12, 20, 10, 0, 0).unwrap(),
//! };
//! let requested = BookingRecord {
//!     id: BookingId::from("b-1"),
//!     status: BookingStatus::Requested,
//!     created_at: Utc.with_ymd_and_hms(2024, 12, 19, 10, 0, 0).unwrap(),
//!     ..cancelled.clone()
//! };
//!
//! let resolved = resolve(&[cancelled, requested]);
//! assert_eq!(resolved.get(friday).map(|b| &b.status), Some(&BookingStatus::Requested));
//! assert!(resolved.is_booked(friday));
//! ```

/// Aggregate module - belongs to the `Application` layer - composes the booking decider and the store
pub mod aggregate;
/// Board module - belongs to the `Domain` layer - admin tabs and the devotee slot listing
pub mod board;
/// Booking module - belongs to the `Domain` layer - the booking lifecycle decider
pub mod booking;
/// Calendar module - belongs to the `Domain` layer - bookable Fridays of a year
pub mod calendar;
/// Clock module - source of writer-assigned timestamps
pub mod clock;
/// Config module - injected store configuration
pub mod config;
/// Decider module - belongs to the `Domain` layer - pure decision making component - pure logic
pub mod decider;
/// Error module - error taxonomy of the crate
pub mod error;
/// Ledger module - belongs to the `Domain` layer - member roster and monthly contributions
pub mod ledger;
/// Live module - belongs to the `Application` layer - subscription driven resolution
pub mod live;
/// Record module - belongs to the `Domain` layer - persisted booking records
pub mod record;
/// Resolver module - belongs to the `Domain` layer - per-date booking conflict resolution
pub mod resolver;
/// Service module - belongs to the `Application` layer - operations exposed to the presentation layer
pub mod service;
/// Specification module - given/when/then test DSL for the decider and the views
pub mod specification;
/// Stats module - belongs to the `Domain` layer - year-to-date booking statistics
pub mod stats;
/// Status module - belongs to the `Domain` layer - booking statuses and the transition table
pub mod status;
/// Store module - boundary to the booking record store
pub mod store;
/// View module - belongs to the `Domain` layer - pure event handling algorithm
pub mod view;

/// The [DecideFunction] function is used to decide which events to produce based on the command and the current state.
pub type DecideFunction<'a, C, S, E, Error> =
    Box<dyn Fn(&C, &S) -> Result<Vec<E>, Error> + 'a + Send + Sync>;
/// The [EvolveFunction] function is used to evolve the state based on the current state and the event.
pub type EvolveFunction<'a, S, E> = Box<dyn Fn(&S, &E) -> S + 'a + Send + Sync>;
/// The [InitialStateFunction] function is used to produce the initial state.
pub type InitialStateFunction<'a, S> = Box<dyn Fn() -> S + 'a + Send + Sync>;

/// Identifies the entity a command, event or record is about.
pub trait Identifier {
    /// Returns the identifier as a string.
    fn identifier(&self) -> String;
}
