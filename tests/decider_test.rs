use chrono::NaiveDate;
use pooja_booking::booking::{
    booking_decider, BookingCommand, BookingEvent, BookingRequested, BookingState,
    BookingStatusChanged, RequestBooking, TransitionBooking,
};
use pooja_booking::error::BookingError;
use pooja_booking::record::BookingId;
use pooja_booking::specification::DeciderTestSpecification;
use pooja_booking::status::BookingStatus;

use crate::fixtures::{at, date};

mod fixtures;

fn request_on(day: NaiveDate, name: &str, phone: &str) -> BookingCommand {
    BookingCommand::Request(RequestBooking {
        date: day,
        name: name.to_string(),
        phone: phone.to_string(),
        requested_at: at(2024, 12, 20, 10),
        today: date(2024, 12, 20),
    })
}

fn request(name: &str) -> BookingCommand {
    request_on(date(2025, 1, 3), name, " 98470 12345 ")
}

fn transition(target: BookingStatus) -> BookingCommand {
    BookingCommand::Transition(TransitionBooking {
        booking_id: BookingId::from("bookings_dev-0001"),
        target,
    })
}

fn state(status: BookingStatus) -> BookingState {
    BookingState {
        name: "Lakshmi".to_string(),
        status: Some(status),
    }
}

fn requested_event() -> BookingEvent {
    BookingEvent::Requested(BookingRequested {
        date: date(2025, 1, 3),
        name: "Lakshmi".to_string(),
        phone: "98470 12345".to_string(),
        requested_at: at(2024, 12, 20, 10),
    })
}

#[test]
fn request_on_free_slot_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .given(vec![])
        .when(request("  Lakshmi "))
        .then(vec![requested_event()]);
}

#[test]
fn request_without_name_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .when(request("   "))
        .then_error(BookingError::MissingName);
}

#[test]
fn request_on_a_thursday_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .when(request_on(date(2025, 1, 2), "Lakshmi", "98470 12345"))
        .then_error(BookingError::NotASlot(date(2025, 1, 2)));
}

#[test]
fn request_without_phone_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .when(request_on(date(2025, 1, 3), "Lakshmi", " \t "))
        .then_error(BookingError::MissingPhone);
}

#[test]
fn request_on_a_past_friday_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .when(request_on(date(2024, 12, 13), "Lakshmi", "98470 12345"))
        .then_error(BookingError::PastSlot(date(2024, 12, 13)));
}

#[test]
fn request_for_today_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .when(request_on(date(2024, 12, 20), "Lakshmi", "98470 12345"))
        .then(vec![BookingEvent::Requested(BookingRequested {
            date: date(2024, 12, 20),
            name: "Lakshmi".to_string(),
            phone: "98470 12345".to_string(),
            requested_at: at(2024, 12, 20, 10),
        })]);
}

#[test]
fn request_on_booked_slot_test() {
    for status in [
        BookingStatus::Requested,
        BookingStatus::Scheduled,
        BookingStatus::Completed,
        // Devotee cancellations keep the slot occupied.
        BookingStatus::CancelledByDevotee,
    ] {
        DeciderTestSpecification::default()
            .for_decider(booking_decider())
            .given_state(state(status))
            .when(request("Lakshmi"))
            .then_error(BookingError::AlreadyBooked(date(2025, 1, 3)));
    }
}

#[test]
fn request_after_admin_cancellation_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .given_state(state(BookingStatus::CancelledByAdmin))
        .when(request("Lakshmi"))
        .then(vec![requested_event()]);
}

#[test]
fn approve_requested_booking_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .given(vec![requested_event()])
        .when(transition(BookingStatus::Approved))
        .then(vec![BookingEvent::StatusChanged(BookingStatusChanged {
            booking_id: BookingId::from("bookings_dev-0001"),
            name: "Lakshmi".to_string(),
            from: BookingStatus::Requested,
            to: BookingStatus::Approved,
        })]);
}

#[test]
fn payment_received_state_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .given_state(state(BookingStatus::PendingPayment))
        .when(transition(BookingStatus::PaymentReceived))
        .then_state(state(BookingStatus::PaymentReceived));
}

#[test]
fn retry_failed_payment_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .given_state(state(BookingStatus::FailedPayment))
        .when(transition(BookingStatus::PendingPayment))
        .then_state(state(BookingStatus::PendingPayment));
}

#[test]
fn transition_of_unknown_booking_test() {
    DeciderTestSpecification::default()
        .for_decider(booking_decider())
        .when(transition(BookingStatus::Approved))
        .then_error(BookingError::UnknownBooking(BookingId::from(
            "bookings_dev-0001",
        )));
}

#[test]
fn every_pair_outside_the_table_is_illegal_test() {
    let table: &[(BookingStatus, &[BookingStatus])] = &[
        (
            BookingStatus::Requested,
            &[
                BookingStatus::UnderReview,
                BookingStatus::Approved,
                BookingStatus::CancelledByAdmin,
            ],
        ),
        (
            BookingStatus::UnderReview,
            &[BookingStatus::Approved, BookingStatus::CancelledByAdmin],
        ),
        (
            BookingStatus::Approved,
            &[BookingStatus::PendingPayment, BookingStatus::CancelledByAdmin],
        ),
        (
            BookingStatus::PendingPayment,
            &[
                BookingStatus::PaymentReceived,
                BookingStatus::FailedPayment,
                BookingStatus::CancelledByAdmin,
            ],
        ),
        (
            BookingStatus::PaymentReceived,
            &[BookingStatus::Scheduled, BookingStatus::RefundInitiated],
        ),
        (
            BookingStatus::Scheduled,
            &[BookingStatus::Completed, BookingStatus::RefundInitiated],
        ),
        (
            BookingStatus::FailedPayment,
            &[BookingStatus::PendingPayment, BookingStatus::CancelledByAdmin],
        ),
        (BookingStatus::RefundInitiated, &[BookingStatus::Refunded]),
    ];

    for from in BookingStatus::ALL {
        let allowed = table
            .iter()
            .find(|(status, _)| *status == from)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[]);
        for to in BookingStatus::ALL {
            if allowed.contains(&to) {
                DeciderTestSpecification::default()
                    .for_decider(booking_decider())
                    .given_state(state(from.clone()))
                    .when(transition(to.clone()))
                    .then_state(state(to.clone()));
            } else {
                DeciderTestSpecification::default()
                    .for_decider(booking_decider())
                    .given_state(state(from.clone()))
                    .when(transition(to.clone()))
                    .then_error(BookingError::IllegalTransition {
                        from: from.clone(),
                        to: to.clone(),
                    });
            }
        }
    }
}
