//! Booking statuses, the administrator transition table and the display classification.

use std::fmt;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking record.
///
/// Statuses travel to and from the store as their display labels (`"Under Review"`,
/// `"Cancelled by Admin"`, ...). A label this crate does not know survives as
/// [BookingStatus::Unrecognized], so records written by other clients are never lost or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    /// Created by a devotee, waiting for an administrator.
    Requested,
    /// An administrator is looking at the request.
    UnderReview,
    /// Accepted, payment not yet requested.
    Approved,
    /// Waiting for the devotee's payment.
    PendingPayment,
    /// Payment confirmed by an administrator.
    PaymentReceived,
    /// The pooja is on the temple schedule.
    Scheduled,
    /// The pooja was performed. Terminal.
    Completed,
    /// Withdrawn by the devotee. Terminal.
    CancelledByDevotee,
    /// Cancelled by an administrator. Terminal, frees the slot.
    CancelledByAdmin,
    /// The payment did not go through.
    FailedPayment,
    /// Money is on its way back to the devotee.
    RefundInitiated,
    /// Refund completed. Terminal.
    Refunded,
    /// A label written by some other client (possibly empty).
    Unrecognized(String),
}

impl BookingStatus {
    /// Every named status, in lifecycle order.
    pub const ALL: [BookingStatus; 12] = [
        BookingStatus::Requested,
        BookingStatus::UnderReview,
        BookingStatus::Approved,
        BookingStatus::PendingPayment,
        BookingStatus::PaymentReceived,
        BookingStatus::Scheduled,
        BookingStatus::Completed,
        BookingStatus::CancelledByDevotee,
        BookingStatus::CancelledByAdmin,
        BookingStatus::FailedPayment,
        BookingStatus::RefundInitiated,
        BookingStatus::Refunded,
    ];

    /// The label stored in the record's `status` field.
    pub fn label(&self) -> &str {
        match self {
            BookingStatus::Requested => "Requested",
            BookingStatus::UnderReview => "Under Review",
            BookingStatus::Approved => "Approved",
            BookingStatus::PendingPayment => "Pending Payment",
            BookingStatus::PaymentReceived => "Payment Received",
            BookingStatus::Scheduled => "Scheduled",
            BookingStatus::Completed => "Completed",
            BookingStatus::CancelledByDevotee => "Cancelled by Devotee",
            BookingStatus::CancelledByAdmin => "Cancelled by Admin",
            BookingStatus::FailedPayment => "Failed Payment",
            BookingStatus::RefundInitiated => "Refund Initiated",
            BookingStatus::Refunded => "Refunded",
            BookingStatus::Unrecognized(label) => label,
        }
    }

    /// Parses a stored label. Matching is exact; anything else becomes [BookingStatus::Unrecognized].
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == label)
            .unwrap_or_else(|| BookingStatus::Unrecognized(label.to_string()))
    }

    /// Whether the record counts as cancelled when several records compete for one date.
    ///
    /// Named statuses are classified by this table; an unrecognized label is cancelled when it
    /// contains `"cancelled"`, ignoring case.
    pub fn is_cancelled_variant(&self) -> bool {
        match self {
            BookingStatus::CancelledByDevotee | BookingStatus::CancelledByAdmin => true,
            BookingStatus::Unrecognized(label) => label.to_lowercase().contains("cancelled"),
            _ => false,
        }
    }

    /// Whether a resolved booking in this status keeps its slot unavailable for new requests.
    ///
    /// Only an administrator cancellation (or a missing label) frees the slot. A
    /// `Cancelled by Devotee` booking still occupies it: whether devotee cancellations should free
    /// the slot is an open product question, and the observed behavior is kept.
    pub fn occupies_slot(&self) -> bool {
        !self.label().is_empty() && *self != BookingStatus::CancelledByAdmin
    }

    /// Whether the lifecycle has ended for this booking.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed
                | BookingStatus::CancelledByDevotee
                | BookingStatus::CancelledByAdmin
                | BookingStatus::Refunded
        )
    }

    /// Statuses an administrator may move a booking to from this one.
    ///
    /// `CancelledByDevotee` is never a target here; it is written by the devotee-facing path.
    pub fn allowed_transitions(&self) -> Vec<BookingStatus> {
        use BookingStatus::*;
        match self {
            Requested => vec![UnderReview, Approved, CancelledByAdmin],
            UnderReview => vec![Approved, CancelledByAdmin],
            Approved => vec![PendingPayment, CancelledByAdmin],
            PendingPayment => vec![PaymentReceived, FailedPayment, CancelledByAdmin],
            PaymentReceived => vec![Scheduled, RefundInitiated],
            Scheduled => vec![Completed, RefundInitiated],
            FailedPayment => vec![PendingPayment, CancelledByAdmin],
            RefundInitiated => vec![Refunded],
            Completed | CancelledByDevotee | CancelledByAdmin | Refunded | Unrecognized(_) => {
                vec![]
            }
        }
    }

    /// Whether `to` is listed in the transition table for this status.
    pub fn can_transition_to(&self, to: &BookingStatus) -> bool {
        self.allowed_transitions().contains(to)
    }

    /// The actions an administrator is offered for a booking in this status.
    pub fn admin_actions(&self) -> Vec<AdminAction> {
        self.allowed_transitions()
            .into_iter()
            .map(|target| AdminAction {
                label: action_label(self, &target),
                target,
            })
            .collect()
    }

    /// Badge class of the status.
    pub fn severity(&self) -> Severity {
        match self {
            BookingStatus::Requested => Severity::Info,
            BookingStatus::UnderReview
            | BookingStatus::PendingPayment
            | BookingStatus::RefundInitiated => Severity::Warning,
            BookingStatus::Approved => Severity::Primary,
            BookingStatus::PaymentReceived
            | BookingStatus::Scheduled
            | BookingStatus::Completed => Severity::Success,
            BookingStatus::CancelledByDevotee
            | BookingStatus::CancelledByAdmin
            | BookingStatus::FailedPayment => Severity::Danger,
            BookingStatus::Refunded | BookingStatus::Unrecognized(_) => Severity::Secondary,
        }
    }

    /// Confirmation shown once a booking has been moved to this status.
    pub fn confirmation(&self, name: &str) -> String {
        match self {
            BookingStatus::Approved => format!("Booking for {name} approved!"),
            BookingStatus::PaymentReceived => format!("Payment received for {name}"),
            BookingStatus::CancelledByAdmin => format!("Booking for {name} cancelled by admin"),
            BookingStatus::CancelledByDevotee => {
                format!("Booking for {name} cancelled by devotee")
            }
            BookingStatus::FailedPayment => format!("Payment failed for {name}"),
            BookingStatus::RefundInitiated => format!("Refund initiated for {name}"),
            BookingStatus::Refunded => format!("Refund completed for {name}"),
            other => format!("Booking for {name} marked as {}", other.label()),
        }
    }

    /// Failure notice shown when moving a booking to this status did not persist.
    pub fn failure_notice(&self) -> &'static str {
        match self {
            BookingStatus::Approved => "Error approving booking.",
            BookingStatus::PendingPayment
            | BookingStatus::PaymentReceived
            | BookingStatus::FailedPayment => "Error updating payment status.",
            BookingStatus::CancelledByAdmin | BookingStatus::CancelledByDevotee => {
                "Error cancelling booking."
            }
            BookingStatus::RefundInitiated | BookingStatus::Refunded => {
                "Error updating refund status."
            }
            _ => "Error updating booking status.",
        }
    }
}

fn action_label(from: &BookingStatus, to: &BookingStatus) -> &'static str {
    match (from, to) {
        (BookingStatus::FailedPayment, BookingStatus::PendingPayment) => "Retry Payment",
        (_, BookingStatus::UnderReview) => "Under Review",
        (_, BookingStatus::Approved) => "Approve",
        (_, BookingStatus::PendingPayment) => "Pending Payment",
        (_, BookingStatus::PaymentReceived) => "Payment Received",
        (_, BookingStatus::FailedPayment) => "Failed Payment",
        (_, BookingStatus::Scheduled) => "Mark Scheduled",
        (_, BookingStatus::Completed) => "Mark Completed",
        (_, BookingStatus::RefundInitiated) => "Initiate Refund",
        (_, BookingStatus::Refunded) => "Mark Refunded",
        (_, BookingStatus::CancelledByAdmin) => "Cancel",
        _ => "Update",
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for BookingStatus {
    fn from(label: String) -> Self {
        BookingStatus::from_label(&label)
    }
}

impl From<&str> for BookingStatus {
    fn from(label: &str) -> Self {
        BookingStatus::from_label(label)
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Unrecognized(label) => label,
            named => named.label().to_string(),
        }
    }
}

/// One button on the administrator's booking row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAction {
    /// Button caption
    pub label: &'static str,
    /// Status the booking moves to
    pub target: BookingStatus,
}

/// Visual class of a status badge.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Fresh request
    #[display("info")]
    Info,
    /// Waiting on someone
    #[display("warning")]
    Warning,
    /// Approved
    #[display("primary")]
    Primary,
    /// Paid, scheduled or done
    #[display("success")]
    Success,
    /// Cancelled or failed
    #[display("danger")]
    Danger,
    /// Refunded, or a label nobody knows
    #[display("secondary")]
    Secondary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parsing() {
        for status in BookingStatus::ALL {
            assert_eq!(BookingStatus::from_label(status.label()), status);
        }
        assert_eq!(
            BookingStatus::from_label("cancelled by admin"),
            BookingStatus::Unrecognized("cancelled by admin".to_string())
        );
    }

    #[test]
    fn unrecognized_labels_keep_substring_cancellation() {
        assert!(BookingStatus::from("CANCELLED (duplicate)").is_cancelled_variant());
        assert!(!BookingStatus::from("On hold").is_cancelled_variant());
        assert!(!BookingStatus::from("").is_cancelled_variant());
    }

    #[test]
    fn terminal_statuses_offer_no_actions() {
        for status in BookingStatus::ALL {
            assert_eq!(status.is_terminal(), status.admin_actions().is_empty());
        }
    }

    #[test]
    fn failed_payment_retries_into_pending_payment() {
        let actions = BookingStatus::FailedPayment.admin_actions();
        assert_eq!(
            actions,
            vec![
                AdminAction {
                    label: "Retry Payment",
                    target: BookingStatus::PendingPayment
                },
                AdminAction {
                    label: "Cancel",
                    target: BookingStatus::CancelledByAdmin
                },
            ]
        );
    }
}
