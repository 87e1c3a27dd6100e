use std::time::Duration;

use futures::StreamExt;
use pooja_booking::status::BookingStatus;
use pretty_assertions::assert_eq;
use tokio::time::timeout;

use crate::fixtures::{at, date, record, service};

mod fixtures;

const DELIVERY: Duration = Duration::from_secs(1);

#[tokio::test]
async fn first_delivery_is_the_current_snapshot_test() {
    let service = service();
    service.store().insert_raw(record(
        "b-1",
        date(2025, 1, 3),
        BookingStatus::Scheduled,
        at(2024, 12, 1, 9),
    ));
    service.store().insert_raw(record(
        "b-2",
        date(2026, 1, 2),
        BookingStatus::Requested,
        at(2024, 12, 1, 9),
    ));

    let mut live = service.watch(2025);
    assert!(live.current().is_empty());

    let resolved = timeout(DELIVERY, live.next()).await.unwrap().unwrap();
    assert_eq!(resolved.len(), 1);
    assert!(resolved.is_booked(date(2025, 1, 3)));
    assert_eq!(live.year(), 2025);
}

#[tokio::test]
async fn confirmed_writes_are_delivered_test() {
    let service = service();
    let mut live = service.watch(2025);
    timeout(DELIVERY, live.next()).await.unwrap().unwrap();

    let booking = service
        .request_booking(date(2025, 1, 3), "Lakshmi", "98470 12345")
        .await
        .unwrap()
        .record()
        .cloned()
        .unwrap();
    let resolved = timeout(DELIVERY, live.next()).await.unwrap().unwrap();
    assert_eq!(resolved.get(date(2025, 1, 3)), Some(&booking));

    service
        .transition(&booking.id, BookingStatus::UnderReview)
        .await
        .unwrap();
    let resolved = timeout(DELIVERY, live.next()).await.unwrap().unwrap();
    assert_eq!(
        resolved.get(date(2025, 1, 3)).map(|b| &b.status),
        Some(&BookingStatus::UnderReview)
    );
}

#[tokio::test]
async fn failed_write_keeps_the_resolved_map_test() {
    let service = service();
    let mut live = service.watch(2025);
    service
        .request_booking(date(2025, 1, 3), "Lakshmi", "98470 12345")
        .await
        .unwrap();
    let before = timeout(DELIVERY, live.next()).await.unwrap().unwrap().clone();

    service.store().set_offline(true);
    let booking = before.get(date(2025, 1, 3)).unwrap().id.clone();
    assert!(service
        .transition(&booking, BookingStatus::Approved)
        .await
        .is_err());

    assert_eq!(live.current(), &before);
    assert!(timeout(Duration::from_millis(50), live.next()).await.is_err());
}

#[tokio::test]
async fn stream_of_resolved_maps_test() {
    let service = service();
    let mut stream = Box::pin(service.watch(2025).into_stream());

    let first = timeout(DELIVERY, stream.next()).await.unwrap().unwrap();
    assert!(first.is_empty());

    service
        .request_booking(date(2025, 2, 7), "Gopal", "94470 54321")
        .await
        .unwrap();
    let second = timeout(DELIVERY, stream.next()).await.unwrap().unwrap();
    assert!(second.is_booked(date(2025, 2, 7)));
}
