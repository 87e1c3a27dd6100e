use crate::{EvolveFunction, InitialStateFunction};

/// [View] represents the event handling algorithm, responsible for translating the events into denormalized state, which is more adequate for querying.
/// It has two generic parameters `S`/State, `E`/Event , representing the type of the values that View may contain or use.
/// `'a` is used as a lifetime parameter, indicating that all references contained within the struct (e.g., references within the function closures) must have a lifetime that is at least as long as 'a.
///
/// Both the booking resolver and the statistics tally are views: the "events" they fold are the
/// booking records delivered by the store.
///
/// ## Example
/// ```
/// use pooja_booking::view::{View, ViewStateComputation};
///
/// fn amount_view<'a>() -> View<'a, u64, u64> {
///     View {
///         evolve: Box::new(|total, amount| total + amount),
///         initial_state: Box::new(|| 0),
///     }
/// }
///
/// let view = amount_view();
/// assert_eq!(view.compute_new_state(None, &[&501, &1001]), 1502);
/// ```
pub struct View<'a, S: 'a, E: 'a> {
    /// The `evolve` function is the main state evolution algorithm.
    pub evolve: EvolveFunction<'a, S, E>,
    /// The `initial_state` function is the initial state.
    pub initial_state: InitialStateFunction<'a, S>,
}

impl<'a, S, E> View<'a, S, E> {
    /// Maps the View over the E/Event type parameter.
    /// Creates a new instance of [View]`<S, E2>`.
    pub fn map_event<E2, F>(self, f: F) -> View<'a, S, E2>
    where
        F: Fn(&E2) -> E + Send + Sync + 'a,
    {
        let new_evolve = Box::new(move |s: &S, e2: &E2| {
            let e = f(e2);
            (self.evolve)(s, &e)
        });

        let new_initial_state = Box::new(move || (self.initial_state)());

        View {
            evolve: new_evolve,
            initial_state: new_initial_state,
        }
    }
}

/// Formalizes the `State Computation` algorithm for the `view` to handle events based on the current state, and produce new state.
pub trait ViewStateComputation<E, S> {
    /// Computes new state based on the current state and the events.
    fn compute_new_state(&self, current_state: Option<S>, events: &[&E]) -> S;
}

impl<S, E> ViewStateComputation<E, S> for View<'_, S, E> {
    /// Computes new state based on the current state and the events.
    fn compute_new_state(&self, current_state: Option<S>, events: &[&E]) -> S {
        let effective_current_state = current_state.unwrap_or_else(|| (self.initial_state)());
        events.iter().fold(effective_current_state, |state, event| {
            (self.evolve)(&state, event)
        })
    }
}
