//! ## Given-when-then specifications for the booking decider and the booking views.
//!
//! ```
//! use pooja_booking::booking::{booking_decider, BookingCommand, BookingState, TransitionBooking};
//! use pooja_booking::error::BookingError;
//! use pooja_booking::record::BookingId;
//! use pooja_booking::specification::DeciderTestSpecification;
//! use pooja_booking::status::BookingStatus;
//!
//! DeciderTestSpecification::default()
//!     .for_decider(booking_decider())
//!     .given_state(BookingState {
//!         name: "Hari".to_string(),
//!         status: Some(BookingStatus::Refunded),
//!     })
//!     .when(BookingCommand::Transition(TransitionBooking {
//!         booking_id: BookingId::from("b-1"),
//!         target: BookingStatus::Approved,
//!     }))
//!     .then_error(BookingError::IllegalTransition {
//!         from: BookingStatus::Refunded,
//!         to: BookingStatus::Approved,
//!     });
//! ```

use std::fmt::Debug;

use pretty_assertions::assert_eq;

use crate::decider::{Decider, StateComputation};
use crate::view::{View, ViewStateComputation};

/// What is known before the command arrives.
enum Given<S, E> {
    Nothing,
    Events(Vec<E>),
    State(S),
}

/// Specification of a decider: GIVEN a prior state (or the events that led to it), WHEN a
/// command arrives, THEN exactly these events, this new state, or this error.
pub struct DeciderTestSpecification<'a, C, S, E, Error> {
    given: Given<S, E>,
    command: Option<C>,
    decider: Option<Decider<'a, C, S, E, Error>>,
}

impl<C, S, E, Error> Default for DeciderTestSpecification<'_, C, S, E, Error> {
    fn default() -> Self {
        Self {
            given: Given::Nothing,
            command: None,
            decider: None,
        }
    }
}

impl<'a, C, S, E, Error> DeciderTestSpecification<'a, C, S, E, Error>
where
    C: Debug,
    S: PartialEq + Debug,
    E: PartialEq + Debug,
    Error: PartialEq + Debug,
{
    /// The decider under test.
    pub fn for_decider(mut self, decider: Decider<'a, C, S, E, Error>) -> Self {
        self.decider = Some(decider);
        self
    }

    /// Given the events that already happened to the entity.
    pub fn given(mut self, events: Vec<E>) -> Self {
        self.given = Given::Events(events);
        self
    }

    /// Given the entity's current state.
    pub fn given_state(mut self, state: S) -> Self {
        self.given = Given::State(state);
        self
    }

    /// When this command arrives.
    pub fn when(mut self, command: C) -> Self {
        self.command = Some(command);
        self
    }

    #[track_caller]
    fn arrange(self) -> (Decider<'a, C, S, E, Error>, S, C) {
        let Some(decider) = self.decider else {
            panic!("no decider under test, call `for_decider` first");
        };
        let Some(command) = self.command else {
            panic!("no command, call `when` first");
        };
        let state = match self.given {
            Given::Nothing => (decider.initial_state)(),
            Given::Events(events) => decider.fold_events(None, &events),
            Given::State(state) => state,
        };
        (decider, state, command)
    }

    /// Then the decider produces exactly these events.
    #[track_caller]
    pub fn then(self, expected_events: Vec<E>) {
        let (decider, state, command) = self.arrange();
        match (decider.decide)(&command, &state) {
            Ok(events) => assert_eq!(
                events, expected_events,
                "unexpected events\nstate: {state:?}\ncommand: {command:?}"
            ),
            Err(error) => panic!("expected events, the decider rejected {command:?}: {error:?}"),
        }
    }

    /// Then the entity ends up in this state.
    #[track_caller]
    pub fn then_state(self, expected_state: S) {
        let (decider, state, command) = self.arrange();
        match decider.compute_new_state(Some(state), &command) {
            Ok(new_state) => assert_eq!(
                new_state, expected_state,
                "unexpected state\ncommand: {command:?}"
            ),
            Err(error) => panic!("expected a state, the decider rejected {command:?}: {error:?}"),
        }
    }

    /// Then the decider rejects the command with this error and produces nothing.
    #[track_caller]
    pub fn then_error(self, expected_error: Error) {
        let (decider, state, command) = self.arrange();
        match (decider.decide)(&command, &state) {
            Ok(events) => panic!("expected {expected_error:?}, the decider produced {events:?}"),
            Err(error) => assert_eq!(
                error, expected_error,
                "unexpected error\nstate: {state:?}\ncommand: {command:?}"
            ),
        }
    }
}

/// Specification of a view: GIVEN these events (for the booking views, store records), THEN
/// this state.
pub struct ViewTestSpecification<'a, S, E> {
    events: Vec<E>,
    view: Option<View<'a, S, E>>,
}

impl<S, E> Default for ViewTestSpecification<'_, S, E> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            view: None,
        }
    }
}

impl<'a, S, E> ViewTestSpecification<'a, S, E>
where
    S: PartialEq + Debug,
    E: Debug,
{
    /// The view under test.
    pub fn for_view(mut self, view: View<'a, S, E>) -> Self {
        self.view = Some(view);
        self
    }

    /// Given these events, folded in order.
    pub fn given(mut self, events: Vec<E>) -> Self {
        self.events = events;
        self
    }

    /// Then the view's state is exactly this.
    #[track_caller]
    pub fn then(self, expected_state: S) {
        let Some(view) = self.view else {
            panic!("no view under test, call `for_view` first");
        };
        let events: Vec<&E> = self.events.iter().collect();
        let state = view.compute_new_state(None, &events);
        assert_eq!(
            state, expected_state,
            "unexpected view state\nevents: {:?}",
            self.events
        );
    }
}
