//! The parametrised rectangular abstraction of an `OdeModel`.
//!
//! The continuous state space is split by the variable thresholds into a grid of boxes
//! (states). For each box face (facet), we compute the set of parameter valuations for which
//! the vector field flows through it in a given direction, and from these we derive the
//! coloured successors and predecessors of each state.
//!
//! All intermediate results (vertex colors, facet colors and transitions) are computed lazily
//! and cached inside the `OdeTransitionSystem`. The caches are plain vectors of `OnceLock`
//! slots, hence the system can be explored from multiple threads at once.

use crate::biodivine_std::{IdState, IdStateRange, Transition, TransitionSystem};
use crate::node_encoder::NodeEncoder;
use crate::solver::Solver;
use crate::OdeModel;
use std::iter::Cloned;
use std::slice::Iter;
use std::sync::OnceLock;

mod _impl_facet_colors;
mod _impl_ode_transition_system;
mod _impl_propositions;
mod _impl_transitions;
mod _impl_vertex_colors;

/// A coloured transition system over the rectangular abstraction of an `OdeModel`.
///
/// The parameter sets are represented by the `Params` of the given `Solver`, which is also
/// used to perform all set operations. Use `with_rectangles` for models with any number of
/// parameters and `with_intervals` for a cheaper representation of single-parameter models.
pub struct OdeTransitionSystem<S: Solver> {
    model: OdeModel,
    encoder: NodeEncoder,
    solver: S,
    create_self_loops: bool,
    /// For each variable, a mask of the *other* dimensions its equation depends on.
    facet_masks: Vec<u32>,
    /// Indexed by `vertex * dimensions + dimension`.
    vertex_cache: Vec<OnceLock<VertexColors<S::Params>>>,
    /// Indexed by `(state * dimensions + dimension) * 4 + orientation`.
    facet_cache: Vec<OnceLock<S::Params>>,
    /// Indexed by `step_index(time_flow, successors)` and then by state.
    step_cache: [Vec<OnceLock<Vec<Transition<S::Params>>>>; 4],
}

/// The orientation of a facet: which side of the box it is on, and whether the flow
/// through it points into the box or out of it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Orientation {
    PositiveIn,
    PositiveOut,
    NegativeIn,
    NegativeOut,
}

/// **(internal)** Colors of a single vertex in one dimension: the parameters for which the
/// derivative is positive and the ones where it is not. The flags mark results that are
/// known to cover the whole parameter space.
#[derive(Clone, Debug)]
struct VertexColors<P> {
    positive: P,
    negative: P,
    positive_full: bool,
    negative_full: bool,
}

impl<'a, S: Solver> TransitionSystem for &'a OdeTransitionSystem<S> {
    type Params = S::Params;
    type Transitions = Cloned<Iter<'a, Transition<S::Params>>>;

    fn state_count(&self) -> usize {
        self.encoder.state_count()
    }

    fn states(&self) -> IdStateRange {
        self.encoder.states()
    }

    fn successors(&self, state: IdState, time_flow: bool) -> Self::Transitions {
        let system: &'a OdeTransitionSystem<S> = *self;
        system.successors(state, time_flow).iter().cloned()
    }

    fn predecessors(&self, state: IdState, time_flow: bool) -> Self::Transitions {
        let system: &'a OdeTransitionSystem<S> = *self;
        system.predecessors(state, time_flow).iter().cloned()
    }
}
