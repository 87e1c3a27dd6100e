use futures::{Stream, StreamExt};

use crate::resolver::{resolve, ResolvedBookings};
use crate::store::Subscription;

/// Resolved bookings of one year, kept current from a store [Subscription].
///
/// Every delivery is a full snapshot, so each one is resolved from scratch; nothing from the
/// previous map is carried over. Between deliveries [LiveBookings::current] keeps returning the
/// last resolved map, which is only ever built from records the store has confirmed.
#[derive(Debug)]
pub struct LiveBookings {
    subscription: Subscription,
    current: ResolvedBookings,
}

impl LiveBookings {
    /// Starts listening; nothing is resolved until the first delivery.
    pub fn new(subscription: Subscription) -> Self {
        LiveBookings {
            subscription,
            current: ResolvedBookings::default(),
        }
    }

    /// Year being watched.
    pub fn year(&self) -> i32 {
        self.subscription.year()
    }

    /// Waits for the next delivery and resolves it. `None` once the feed has ended.
    pub async fn next(&mut self) -> Option<&ResolvedBookings> {
        let records = self.subscription.next_snapshot().await?;
        self.current = resolve(&records);
        tracing::trace!(
            year = self.subscription.year(),
            records = records.len(),
            dates = self.current.len(),
            "Resolved booking snapshot"
        );
        Some(&self.current)
    }

    /// The latest resolved map; empty before the first delivery.
    pub fn current(&self) -> &ResolvedBookings {
        &self.current
    }

    /// Stops listening.
    pub fn cancel(self) {
        self.subscription.cancel();
    }

    /// Converts into a stream yielding one resolved map per delivery.
    pub fn into_stream(self) -> impl Stream<Item = ResolvedBookings> {
        self.subscription
            .into_stream()
            .map(|records| resolve(&records))
    }
}
