//! The booking lifecycle as a [Decider].
//!
//! A devotee request creates a new record in `Requested`; every later step is an administrator
//! moving one record's status along the transition table of [BookingStatus::allowed_transitions].
//! `decide` rejects anything else before the store is touched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::is_slot;
use crate::decider::Decider;
use crate::error::BookingError;
use crate::record::{BookingId, BookingRecord, NewBooking};
use crate::status::BookingStatus;
use crate::Identifier;

/// Intent to change a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingCommand {
    /// A devotee asks for a Friday.
    Request(RequestBooking),
    /// An administrator moves a booking along its lifecycle.
    Transition(TransitionBooking),
}

/// A devotee asks for a Friday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBooking {
    /// The Friday being asked for
    pub date: NaiveDate,
    /// Devotee display name
    pub name: String,
    /// Contact number, free-form
    pub phone: String,
    /// Becomes the record's `created_at`
    pub requested_at: DateTime<Utc>,
    /// The requester's current date; earlier Fridays are rejected
    pub today: NaiveDate,
}

/// An administrator moves a booking along its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionBooking {
    /// Exact record being transitioned
    pub booking_id: BookingId,
    /// Status to move to
    pub target: BookingStatus,
}

impl BookingCommand {
    /// Notice shown when the command fails, kept apart from success confirmations.
    pub fn failure_notice(&self) -> &'static str {
        match self {
            BookingCommand::Request(_) => "Error saving booking. Please try again.",
            BookingCommand::Transition(cmd) => cmd.target.failure_notice(),
        }
    }
}

impl Identifier for BookingCommand {
    fn identifier(&self) -> String {
        match self {
            BookingCommand::Request(cmd) => cmd.date.to_string(),
            BookingCommand::Transition(cmd) => cmd.booking_id.to_string(),
        }
    }
}

/// Facts decided about a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingEvent {
    /// A new record is to be created.
    Requested(BookingRequested),
    /// An existing record's status is to be replaced.
    StatusChanged(BookingStatusChanged),
}

/// A new `Requested` record is to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequested {
    /// The Friday being booked
    pub date: NaiveDate,
    /// Devotee display name, trimmed
    pub name: String,
    /// Contact number
    pub phone: String,
    /// Becomes the record's `created_at`
    pub requested_at: DateTime<Utc>,
}

/// A record's status is to be replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatusChanged {
    /// Exact record being transitioned
    pub booking_id: BookingId,
    /// Devotee name, for the confirmation
    pub name: String,
    /// Status before the change
    pub from: BookingStatus,
    /// Status after the change
    pub to: BookingStatus,
}

impl BookingEvent {
    /// Confirmation shown once the event has been persisted.
    pub fn confirmation(&self) -> String {
        match self {
            BookingEvent::Requested(evt) => format!(
                "{} reserved pooja on {}",
                evt.name,
                evt.date.format("%a %b %d %Y")
            ),
            BookingEvent::StatusChanged(evt) => evt.to.confirmation(&evt.name),
        }
    }
}

impl From<BookingRequested> for NewBooking {
    fn from(evt: BookingRequested) -> Self {
        NewBooking::requested(evt.date, evt.name, evt.phone, evt.requested_at)
    }
}

/// What the decider knows about the targeted booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingState {
    /// Devotee name
    pub name: String,
    /// Current status; `None` when there is no booking
    pub status: Option<BookingStatus>,
}

impl BookingState {
    /// Whether the state describes a booking that occupies its slot.
    pub fn is_booked(&self) -> bool {
        self.status.as_ref().is_some_and(BookingStatus::occupies_slot)
    }
}

impl From<&BookingRecord> for BookingState {
    fn from(record: &BookingRecord) -> Self {
        BookingState {
            name: record.name.clone(),
            status: Some(record.status.clone()),
        }
    }
}

/// The booking lifecycle decider.
///
/// For a request the state is the resolved booking of the requested date; for a transition it is
/// the record being transitioned.
pub fn booking_decider<'a>() -> Decider<'a, BookingCommand, BookingState, BookingEvent, BookingError>
{
    Decider {
        decide: Box::new(|command, state| match command {
            BookingCommand::Request(cmd) => {
                let name = cmd.name.trim();
                if name.is_empty() {
                    return Err(BookingError::MissingName);
                }
                let phone = cmd.phone.trim();
                if phone.is_empty() {
                    return Err(BookingError::MissingPhone);
                }
                if !is_slot(cmd.date) {
                    return Err(BookingError::NotASlot(cmd.date));
                }
                if cmd.date < cmd.today {
                    return Err(BookingError::PastSlot(cmd.date));
                }
                if state.is_booked() {
                    return Err(BookingError::AlreadyBooked(cmd.date));
                }
                Ok(vec![BookingEvent::Requested(BookingRequested {
                    date: cmd.date,
                    name: name.to_string(),
                    phone: phone.to_string(),
                    requested_at: cmd.requested_at,
                })])
            }
            BookingCommand::Transition(cmd) => {
                let Some(current) = &state.status else {
                    return Err(BookingError::UnknownBooking(cmd.booking_id.clone()));
                };
                if !current.can_transition_to(&cmd.target) {
                    return Err(BookingError::IllegalTransition {
                        from: current.clone(),
                        to: cmd.target.clone(),
                    });
                }
                Ok(vec![BookingEvent::StatusChanged(BookingStatusChanged {
                    booking_id: cmd.booking_id.clone(),
                    name: state.name.clone(),
                    from: current.clone(),
                    to: cmd.target.clone(),
                })])
            }
        }),
        evolve: Box::new(|state, event| {
            let mut new_state = state.clone();
            match event {
                BookingEvent::Requested(evt) => {
                    new_state.name = evt.name.to_owned();
                    new_state.status = Some(BookingStatus::Requested);
                }
                BookingEvent::StatusChanged(evt) => {
                    new_state.status = Some(evt.to.to_owned());
                }
            }
            new_state
        }),
        initial_state: Box::new(BookingState::default),
    }
}
