//! Error types for booking operations.
//!
//! Validation and illegal-transition errors are detected locally, before any store call, and are
//! never retried. Store errors are surfaced as-is; retry and backoff belong to the caller.

use chrono::NaiveDate;
use thiserror::Error;

use crate::record::BookingId;
use crate::status::BookingStatus;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Coarse classification of a [BookingError], as reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing devotee fields, a past or non-Friday or booked slot, an unknown booking.
    Validation,
    /// The target status is not reachable from the current status.
    IllegalTransition,
    /// The record store failed.
    Store,
}

/// Failures of the booking record store collaborator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("booking store unavailable (collection `{collection}`)")]
    Unavailable {
        /// Collection the operation targeted
        collection: String,
    },

    /// The caller may not read or write the collection.
    #[error("permission denied on collection `{collection}`")]
    PermissionDenied {
        /// Collection the operation targeted
        collection: String,
    },

    /// Transport failure talking to the store.
    #[error("network failure: {0}")]
    Network(String),

    /// The record to mutate does not exist (anymore).
    #[error("booking `{0}` not found in store")]
    NotFound(BookingId),
}

/// Everything that can reject a booking command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookingError {
    /// The devotee name is missing or blank.
    #[error("devotee name is required")]
    MissingName,

    /// The contact number is missing or blank.
    #[error("contact number is required")]
    MissingPhone,

    /// The requested Friday is before today.
    #[error("{0} has already passed")]
    PastSlot(NaiveDate),

    /// The requested date is not a bookable Friday.
    #[error("{0} is not a bookable Friday")]
    NotASlot(NaiveDate),

    /// The slot is occupied by its resolved booking.
    #[error("slot {0} is already booked")]
    AlreadyBooked(NaiveDate),

    /// The status change is not in the transition table.
    #[error("cannot move booking from `{from}` to `{to}`")]
    IllegalTransition {
        /// Current status of the booking
        from: BookingStatus,
        /// Requested status
        to: BookingStatus,
    },

    /// No booking record carries this id.
    #[error("unknown booking `{0}`")]
    UnknownBooking(BookingId),

    /// The record store failed; nothing was applied.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BookingError {
    /// Maps the error onto the three-way taxonomy shown to callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            BookingError::MissingName
            | BookingError::MissingPhone
            | BookingError::PastSlot(_)
            | BookingError::NotASlot(_)
            | BookingError::AlreadyBooked(_)
            | BookingError::UnknownBooking(_) => ErrorKind::Validation,
            BookingError::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            BookingError::Store(_) => ErrorKind::Store,
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The deployment environment is neither `dev` nor `prod`.
    #[error("unknown environment `{0}` (expected `dev` or `prod`)")]
    UnknownEnvironment(String),
}
