use chrono::{DateTime, Datelike, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::status::BookingStatus;
use crate::Identifier;

/// Opaque, store-assigned identifier of a booking record.
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Borrows the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BookingId {
    fn from(id: String) -> Self {
        BookingId(id)
    }
}

impl From<&str> for BookingId {
    fn from(id: &str) -> Self {
        BookingId(id.to_string())
    }
}

/// One write attempt against a slot, as persisted by the store.
///
/// Several records may share a `date`: a cancel-and-rebook is a new record, while status
/// progression mutates `status` in place. Records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Store-assigned identifier
    pub id: BookingId,
    /// The Friday this record targets (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Year component of `date`, kept for range queries
    pub year: i32,
    /// Devotee display name
    pub name: String,
    /// Free-form contact number
    pub phone: String,
    /// Current lifecycle status
    pub status: BookingStatus,
    /// Writer-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// A booking record before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    /// The Friday being booked
    pub date: NaiveDate,
    /// Year component of `date`
    pub year: i32,
    /// Devotee display name
    pub name: String,
    /// Free-form contact number
    pub phone: String,
    /// Initial status, `Requested` for devotee requests
    pub status: BookingStatus,
    /// Writer-assigned creation time
    pub created_at: DateTime<Utc>,
}

impl NewBooking {
    /// A fresh `Requested` booking for `date`; `year` is derived from the date.
    pub fn requested(
        date: NaiveDate,
        name: impl Into<String>,
        phone: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        NewBooking {
            date,
            year: date.year(),
            name: name.into(),
            phone: phone.into(),
            status: BookingStatus::Requested,
            created_at,
        }
    }

    /// Attaches the id the store assigned.
    pub fn with_id(self, id: BookingId) -> BookingRecord {
        BookingRecord {
            id,
            date: self.date,
            year: self.year,
            name: self.name,
            phone: self.phone,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

impl BookingRecord {
    /// Whether the record occupies its slot, see [BookingStatus::occupies_slot].
    pub fn occupies_slot(&self) -> bool {
        self.status.occupies_slot()
    }
}

impl Identifier for BookingRecord {
    fn identifier(&self) -> String {
        self.id.to_string()
    }
}
