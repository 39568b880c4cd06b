use crate::biodivine_std::{DirectionAtom, IdState, IdStateRange};
use crate::interval_params::IntervalSolver;
use crate::node_encoder::NodeEncoder;
use crate::ode_graph::OdeTransitionSystem;
use crate::rect_params::RectangleSolver;
use crate::solver::Solver;
use crate::OdeModel;
use log::debug;
use std::sync::OnceLock;

impl OdeTransitionSystem<RectangleSolver> {
    /// Create a transition system which represents parameter sets as rectangle sets.
    pub fn with_rectangles(
        model: OdeModel,
        create_self_loops: bool,
    ) -> Result<OdeTransitionSystem<RectangleSolver>, String> {
        let solver = RectangleSolver::from_model(&model);
        OdeTransitionSystem::new(model, solver, create_self_loops)
    }
}

impl OdeTransitionSystem<IntervalSolver> {
    /// Create a transition system which represents parameter sets as interval lists.
    /// The model must have exactly one parameter.
    pub fn with_intervals(
        model: OdeModel,
        create_self_loops: bool,
    ) -> Result<OdeTransitionSystem<IntervalSolver>, String> {
        let solver = IntervalSolver::from_model(&model)?;
        OdeTransitionSystem::new(model, solver, create_self_loops)
    }
}

impl<S: Solver> OdeTransitionSystem<S> {
    /// Create a new transition system for the given `model` using the given `solver`.
    ///
    /// The `solver` must operate on the parameter space of the `model`. If
    /// `create_self_loops` is false, no `Loop` transitions are ever created.
    pub fn new(
        model: OdeModel,
        solver: S,
        create_self_loops: bool,
    ) -> Result<OdeTransitionSystem<S>, String> {
        let encoder = NodeEncoder::new(&model)?;
        let dimensions = encoder.dimensions();
        let too_big = || "Model is too big for the transition system caches.".to_string();
        let vertex_slots = encoder
            .vertex_count()
            .checked_mul(dimensions)
            .ok_or_else(too_big)?;
        let facet_slots = encoder
            .state_count()
            .checked_mul(dimensions * 4)
            .ok_or_else(too_big)?;
        let facet_masks = model
            .variables()
            .map(|var| {
                let dependencies = model
                    .dependencies(var)
                    .into_iter()
                    .fold(0u32, |mask, d| mask | (1 << d.to_index()));
                dependencies & !(1 << var.to_index())
            })
            .collect();
        let step_cache = [(); 4].map(|_| new_slots(encoder.state_count()));
        debug!(
            "Created transition system with {} states and {} dimensions (self-loops: {}).",
            encoder.state_count(),
            dimensions,
            create_self_loops
        );
        Ok(OdeTransitionSystem {
            vertex_cache: new_slots(vertex_slots),
            facet_cache: new_slots(facet_slots),
            step_cache,
            facet_masks,
            model,
            encoder,
            solver,
            create_self_loops,
        })
    }

    pub fn model(&self) -> &OdeModel {
        &self.model
    }

    pub fn encoder(&self) -> &NodeEncoder {
        &self.encoder
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn state_count(&self) -> usize {
        self.encoder.state_count()
    }

    pub fn states(&self) -> IdStateRange {
        self.encoder.states()
    }

    /// The box of `state` given as one `(low, high)` threshold interval per variable.
    pub fn state_box(&self, state: IdState) -> Vec<(f64, f64)> {
        self.model
            .variables()
            .map(|var| {
                let thresholds = self.model.thresholds(var);
                let lower = self.encoder.lower_threshold(state, var);
                (thresholds[lower], thresholds[lower + 1])
            })
            .collect()
    }

    /// The parameters for which `source` can move to `target` in one step (empty if there
    /// is no such transition).
    pub fn transition_params(&self, source: IdState, target: IdState) -> S::Params {
        self.successors(source, true)
            .iter()
            .find(|t| t.target == target)
            .map(|t| t.bound.clone())
            .unwrap_or_else(|| self.solver.empty())
    }

    /// The direction of the transition from `source` to `target`, if the two states are
    /// equal or adjacent.
    pub fn direction(&self, source: IdState, target: IdState) -> Option<DirectionAtom> {
        if source == target {
            return Some(DirectionAtom::Loop);
        }
        self.model.variables().find_map(|var| {
            if self.encoder.higher_node(source, var) == Some(target) {
                Some(DirectionAtom::Increase(var))
            } else if self.encoder.lower_node(source, var) == Some(target) {
                Some(DirectionAtom::Decrease(var))
            } else {
                None
            }
        })
    }
}

/// **(internal)** Allocate `count` empty cache slots.
fn new_slots<T>(count: usize) -> Vec<OnceLock<T>> {
    let mut slots = Vec::with_capacity(count);
    slots.resize_with(count, OnceLock::new);
    slots
}
