use crate::{DecideFunction, EvolveFunction, InitialStateFunction};

/// [Decider] represents the main decision-making algorithm.
/// It has four generic parameters `C`/`Command`, `S`/`State`, `E`/`Event` and `Error`, representing the type of the values that Decider may contain or use.
/// `'a` is used as a lifetime parameter, indicating that all references contained within the struct (e.g., references within the function closures) must have a lifetime that is at least as long as 'a.
///
/// ## Example
/// ```
/// use pooja_booking::booking::{booking_decider, BookingCommand, BookingState, TransitionBooking};
/// use pooja_booking::decider::StateComputation;
/// use pooja_booking::error::BookingError;
/// use pooja_booking::record::BookingId;
/// use pooja_booking::status::BookingStatus;
///
/// let decider = booking_decider();
/// let approved = BookingState {
///     name: "Hari".to_string(),
///     status: Some(BookingStatus::Approved),
/// };
///
/// let move_to_payment = BookingCommand::Transition(TransitionBooking {
///     booking_id: BookingId::from("b-7"),
///     target: BookingStatus::PendingPayment,
/// });
/// let new_state = decider.compute_new_state(Some(approved.clone()), &move_to_payment);
/// assert_eq!(new_state.map(|s| s.status), Ok(Some(BookingStatus::PendingPayment)));
///
/// let skip_to_completed = BookingCommand::Transition(TransitionBooking {
///     booking_id: BookingId::from("b-7"),
///     target: BookingStatus::Completed,
/// });
/// assert_eq!(
///     decider.compute_new_state(Some(approved), &skip_to_completed),
///     Err(BookingError::IllegalTransition {
///         from: BookingStatus::Approved,
///         to: BookingStatus::Completed,
///     })
/// );
/// ```
pub struct Decider<'a, C: 'a, S: 'a, E: 'a, Error: 'a = ()> {
    /// The `decide` function is used to decide which events to produce based on the command and the current state.
    pub decide: DecideFunction<'a, C, S, E, Error>,
    /// The `evolve` function is used to evolve the state based on the current state and the event.
    pub evolve: EvolveFunction<'a, S, E>,
    /// The `initial_state` function is used to produce the initial state of the decider.
    pub initial_state: InitialStateFunction<'a, S>,
}

impl<C, S, E, Error> Decider<'_, C, S, E, Error> {
    /// Folds the events onto the given state, or onto the initial state when there is none.
    pub fn fold_events<'e>(&self, state: Option<S>, events: impl IntoIterator<Item = &'e E>) -> S
    where
        E: 'e,
    {
        let effective_current_state = state.unwrap_or_else(|| (self.initial_state)());
        events
            .into_iter()
            .fold(effective_current_state, |state, event| {
                (self.evolve)(&state, event)
            })
    }
}

/// Formalizes the `State Computation` algorithm / state-stored system for the `decider` to handle commands based on the current state, and produce new state.
pub trait StateComputation<C, S, E, Error = ()> {
    /// Computes new state based on the current state and the command.
    fn compute_new_state(&self, current_state: Option<S>, command: &C) -> Result<S, Error>;
}

impl<C, S, E, Error> StateComputation<C, S, E, Error> for Decider<'_, C, S, E, Error> {
    /// Computes new state based on the current state and the command.
    fn compute_new_state(&self, current_state: Option<S>, command: &C) -> Result<S, Error> {
        let effective_current_state = current_state.unwrap_or_else(|| (self.initial_state)());
        let events = (self.decide)(command, &effective_current_state)?;
        Ok(self.fold_events(Some(effective_current_state), &events))
    }
}
