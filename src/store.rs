use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::Stream;
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record::{BookingId, BookingRecord, NewBooking};
use crate::status::BookingStatus;

/// Booking Record Store trait
///
/// The store is a loosely keyed document collection: inserts are independent (several records may
/// target the same date), status changes mutate one record in place, nothing is ever deleted.
pub trait BookingStore {
    /// Fetches every record of `year`, ascending by date.
    /// Desugared `async fn fetch_year(&self, year: i32) -> Result<Vec<BookingRecord>, StoreError>;` to a normal `fn` that returns `impl Future` with a `Send` bound.
    fn fetch_year(
        &self,
        year: i32,
    ) -> impl Future<Output = Result<Vec<BookingRecord>, StoreError>> + Send;
    /// Fetches one record by id.
    fn fetch(
        &self,
        id: &BookingId,
    ) -> impl Future<Output = Result<Option<BookingRecord>, StoreError>> + Send;
    /// Inserts a new record; the store assigns its id.
    fn create(
        &self,
        booking: &NewBooking,
    ) -> impl Future<Output = Result<BookingRecord, StoreError>> + Send;
    /// Replaces the status of exactly the record `id`.
    fn mutate_status(
        &self,
        id: &BookingId,
        status: &BookingStatus,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    /// Subscribes to full-snapshot deliveries of the records of `year`.
    fn subscribe(&self, year: i32) -> Subscription;
}

/// The full record collection as delivered to subscribers.
pub type Snapshot = Arc<Vec<BookingRecord>>;

/// A live feed of the records of one year.
///
/// Every delivery is the complete, date-ordered record set of the year; there are no deltas. The
/// first call to [Subscription::next_snapshot] yields the current set immediately. Dropping the
/// handle (or calling [Subscription::cancel]) ends the subscription.
#[derive(Debug)]
pub struct Subscription {
    year: i32,
    receiver: watch::Receiver<Snapshot>,
}

impl Subscription {
    /// Wraps a snapshot channel, filtering deliveries down to `year`.
    pub fn new(year: i32, mut receiver: watch::Receiver<Snapshot>) -> Self {
        receiver.mark_changed();
        Subscription { year, receiver }
    }

    /// Year the subscription is filtered on.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Waits for the next delivery. `None` once the store has gone away.
    pub async fn next_snapshot(&mut self) -> Option<Vec<BookingRecord>> {
        self.receiver.changed().await.ok()?;
        let snapshot = Arc::clone(&self.receiver.borrow_and_update());
        Some(select_year(&snapshot, self.year))
    }

    /// Ends the subscription.
    pub fn cancel(self) {
        drop(self.receiver);
    }

    /// Converts the subscription into a stream of deliveries.
    pub fn into_stream(self) -> impl Stream<Item = Vec<BookingRecord>> {
        futures::stream::unfold(self, |mut subscription| async move {
            let snapshot = subscription.next_snapshot().await?;
            Some((snapshot, subscription))
        })
    }
}

fn select_year(records: &[BookingRecord], year: i32) -> Vec<BookingRecord> {
    let mut selected: Vec<BookingRecord> = records
        .iter()
        .filter(|record| record.year == year)
        .cloned()
        .collect();
    selected.sort_by_key(|record| record.date);
    selected
}

/// In-memory booking store.
///
/// Serves embedding applications without a remote store and every test in this crate. It can be
/// switched offline, read-only or into a failing transport to exercise failure paths.
#[derive(Debug)]
pub struct InMemoryBookingStore {
    collection: String,
    records: watch::Sender<Snapshot>,
    next_id: AtomicU64,
    offline: AtomicBool,
    read_only: AtomicBool,
    network_fault: Mutex<Option<String>>,
}

impl InMemoryBookingStore {
    /// Creates an empty store for the configured collection.
    pub fn new(config: &StoreConfig) -> Self {
        let (records, _) = watch::channel(Arc::new(Vec::new()));
        InMemoryBookingStore {
            collection: config.collection(),
            records,
            next_id: AtomicU64::new(1),
            offline: AtomicBool::new(false),
            read_only: AtomicBool::new(false),
            network_fault: Mutex::new(None),
        }
    }

    /// Name of the collection backing this store.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Simulates losing (or regaining) connectivity; every operation fails while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Simulates revoked write permission; reads keep working.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Simulates a failing transport; every operation fails with `fault` until it is cleared.
    pub fn set_network_fault(&self, fault: Option<String>) {
        *self
            .network_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = fault;
    }

    /// Stores a record exactly as given, as written by some other client.
    pub fn insert_raw(&self, record: BookingRecord) {
        self.records
            .send_modify(|records| Arc::make_mut(records).push(record));
    }

    /// Every record of every year, in insertion order.
    pub fn all_records(&self) -> Vec<BookingRecord> {
        Vec::clone(&self.records.borrow())
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                collection: self.collection.clone(),
            });
        }
        let fault = self
            .network_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match fault {
            Some(message) => Err(StoreError::Network(message)),
            None => Ok(()),
        }
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        self.check_reachable()?;
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::PermissionDenied {
                collection: self.collection.clone(),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> BookingId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        BookingId::from(format!("{}-{n:04}", self.collection))
    }
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

impl BookingStore for InMemoryBookingStore {
    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    async fn fetch_year(&self, year: i32) -> Result<Vec<BookingRecord>, StoreError> {
        self.check_reachable()?;
        let snapshot = Arc::clone(&self.records.borrow());
        Ok(select_year(&snapshot, year))
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    async fn fetch(&self, id: &BookingId) -> Result<Option<BookingRecord>, StoreError> {
        self.check_reachable()?;
        let snapshot = Arc::clone(&self.records.borrow());
        Ok(snapshot.iter().find(|record| &record.id == id).cloned())
    }

    #[tracing::instrument(skip(self, booking), fields(collection = %self.collection, date = %booking.date))]
    async fn create(&self, booking: &NewBooking) -> Result<BookingRecord, StoreError> {
        self.check_writable()?;
        let record = booking.clone().with_id(self.next_id());
        self.records
            .send_modify(|records| Arc::make_mut(records).push(record.clone()));
        tracing::debug!(id = %record.id, "Booking record created");
        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    async fn mutate_status(&self, id: &BookingId, status: &BookingStatus) -> Result<(), StoreError> {
        self.check_writable()?;
        let updated = self.records.send_if_modified(|records| {
            let Some(index) = records.iter().position(|record| &record.id == id) else {
                return false;
            };
            Arc::make_mut(records)[index].status = status.clone();
            true
        });
        if updated {
            tracing::debug!("Booking status updated");
            Ok(())
        } else {
            Err(StoreError::NotFound(id.clone()))
        }
    }

    fn subscribe(&self, year: i32) -> Subscription {
        tracing::debug!(collection = %self.collection, year, "Subscribing to booking snapshots");
        Subscription::new(year, self.records.subscribe())
    }
}
