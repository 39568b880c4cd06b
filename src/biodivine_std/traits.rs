/// Basic traits which are carried over from lib-biodivine_std for now.
///
/// In the future, these will be replaced by a more stable variants.
use crate::biodivine_std::structs::{IdState, IdStateRange, Transition};

/// A coloured transition system with a finite set of consecutively indexed states.
///
/// This is the interface through which model checking algorithms explore the graph.
/// The transitions of a state are returned as a finite iterator which can be obtained
/// repeatedly, always yielding the same transitions in the same order.
///
/// The `time_flow` flag selects the sense of time: with `time_flow == false`, the system
/// behaves as if the vector field was reversed, i.e. successors in the past are the
/// predecessors in the future. This allows algorithms mixing past and future operators
/// to use the same code for both.
pub trait TransitionSystem {
    type Params;
    type Transitions: Iterator<Item = Transition<Self::Params>>;

    /// The number of states of this system. States are `0..state_count`.
    fn state_count(&self) -> usize;

    /// Iterate over all states of this system.
    fn states(&self) -> IdStateRange {
        IdStateRange::new(self.state_count())
    }

    /// Transitions leading from `state` to its successors.
    fn successors(&self, state: IdState, time_flow: bool) -> Self::Transitions;

    /// Transitions leading to `state` from its predecessors (the `target` of each
    /// returned transition is the predecessor).
    fn predecessors(&self, state: IdState, time_flow: bool) -> Self::Transitions;
}
