use chrono::Datelike;

use crate::booking::{BookingCommand, BookingEvent, BookingState};
use crate::decider::Decider;
use crate::error::{BookingError, Result};
use crate::record::{BookingRecord, NewBooking};
use crate::resolver::resolve;
use crate::store::BookingStore;
use crate::Identifier;

/// What a handled command changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    /// Events the decider produced, in persistence order
    pub events: Vec<BookingEvent>,
    /// Records as confirmed by the store, one per event
    pub records: Vec<BookingRecord>,
}

impl BookingOutcome {
    /// The last record written.
    pub fn record(&self) -> Option<&BookingRecord> {
        self.records.last()
    }

    /// Confirmation notices, one per persisted event.
    pub fn notices(&self) -> Vec<String> {
        self.events.iter().map(BookingEvent::confirmation).collect()
    }
}

/// State Stored Booking Aggregate.
///
/// It is using the booking [Decider] to decide which events a command produces, based on the state
/// fetched from a [BookingStore], and persists each event against the store.
///
/// Generic parameters:
///
/// - `S` - Booking record store
///
/// Nothing is applied optimistically. A rejected command never reaches the store, and a failed
/// write is returned as [BookingError::Store] with the store left as it was.
pub struct BookingAggregate<'a, S>
where
    S: BookingStore,
{
    store: S,
    decider: Decider<'a, BookingCommand, BookingState, BookingEvent, BookingError>,
}

impl<'a, S> BookingAggregate<'a, S>
where
    S: BookingStore + Sync,
{
    /// Creates a new instance of [BookingAggregate].
    pub fn new(
        store: S,
        decider: Decider<'a, BookingCommand, BookingState, BookingEvent, BookingError>,
    ) -> Self {
        BookingAggregate { store, decider }
    }

    /// The store the aggregate reads and writes.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches the state the command is decided against.
    ///
    /// A request looks at the resolved booking of its date; a transition at the exact record it
    /// targets, which need not be the one that won its date.
    async fn fetch_state(
        &self,
        command: &BookingCommand,
    ) -> Result<(BookingState, Option<BookingRecord>)> {
        match command {
            BookingCommand::Request(cmd) => {
                let records = self.store.fetch_year(cmd.date.year()).await?;
                let state = resolve(&records)
                    .get(cmd.date)
                    .map(BookingState::from)
                    .unwrap_or_default();
                Ok((state, None))
            }
            BookingCommand::Transition(cmd) => {
                let record = self.store.fetch(&cmd.booking_id).await?;
                let state = record
                    .as_ref()
                    .map(BookingState::from)
                    .unwrap_or_default();
                Ok((state, record))
            }
        }
    }

    /// Persists one event, returning the record as the store now holds it.
    async fn save(
        &self,
        event: &BookingEvent,
        current: Option<&BookingRecord>,
    ) -> Result<BookingRecord> {
        match event {
            BookingEvent::Requested(evt) => {
                let booking = NewBooking::from(evt.clone());
                Ok(self.store.create(&booking).await?)
            }
            BookingEvent::StatusChanged(evt) => {
                let mut record = current
                    .filter(|record| record.id == evt.booking_id)
                    .cloned()
                    .ok_or_else(|| BookingError::UnknownBooking(evt.booking_id.clone()))?;
                self.store.mutate_status(&evt.booking_id, &evt.to).await?;
                record.status = evt.to.clone();
                Ok(record)
            }
        }
    }

    /// Handles the command by fetching the current state from the store, deciding the new events
    /// and persisting them in order.
    #[tracing::instrument(skip_all, fields(booking = %command.identifier()))]
    pub async fn handle(&self, command: &BookingCommand) -> Result<BookingOutcome> {
        let result = self.try_handle(command).await;
        match &result {
            Ok(outcome) => tracing::info!(notices = ?outcome.notices(), "Booking command handled"),
            Err(error @ BookingError::Store(_)) => tracing::warn!(
                %error,
                notice = command.failure_notice(),
                "Booking command not persisted"
            ),
            Err(error) => tracing::debug!(%error, "Booking command rejected"),
        }
        result
    }

    async fn try_handle(&self, command: &BookingCommand) -> Result<BookingOutcome> {
        let (state, mut current) = self.fetch_state(command).await?;
        let events = (self.decider.decide)(command, &state)?;
        let mut records = Vec::with_capacity(events.len());
        for event in &events {
            let record = self.save(event, current.as_ref()).await?;
            current = Some(record.clone());
            records.push(record);
        }
        Ok(BookingOutcome { events, records })
    }
}
