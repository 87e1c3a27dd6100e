#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pooja_booking::clock::Clock;
use pooja_booking::config::StoreConfig;
use pooja_booking::record::{BookingId, BookingRecord};
use pooja_booking::service::BookingService;
use pooja_booking::status::BookingStatus;
use pooja_booking::store::InMemoryBookingStore;
use tracing_subscriber::EnvFilter;

/// A clock that never moves - infrastructure
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// A record as another client might have written it.
pub fn record(
    id: &str,
    date: NaiveDate,
    status: BookingStatus,
    created_at: DateTime<Utc>,
) -> BookingRecord {
    BookingRecord {
        id: BookingId::from(id),
        date,
        year: chrono::Datelike::year(&date),
        name: format!("Devotee {id}"),
        phone: "98470 12345".to_string(),
        status,
        created_at,
    }
}

pub fn service() -> BookingService<'static, InMemoryBookingStore, FixedClock> {
    init_tracing();
    BookingService::new(
        InMemoryBookingStore::new(&StoreConfig::default()),
        FixedClock(at(2024, 12, 15, 9)),
    )
}
