use crate::biodivine_std::{DirectionAtom, IdState, Transition};
use crate::ode_graph::{OdeTransitionSystem, Orientation};
use crate::solver::Solver;
use log::trace;

impl<S: Solver> OdeTransitionSystem<S> {
    /// Transitions leading from `state` to its successors. With `time_flow == false`,
    /// these are the successors in the system with reversed flow.
    pub fn successors(&self, state: IdState, time_flow: bool) -> &[Transition<S::Params>] {
        self.step(state, time_flow, true)
    }

    /// Transitions leading to `state` from its predecessors (the `target` is the predecessor).
    pub fn predecessors(&self, state: IdState, time_flow: bool) -> &[Transition<S::Params>] {
        self.step(state, time_flow, false)
    }

    /// **(internal)** Cached transitions of `state` in the given direction.
    fn step(&self, state: IdState, time_flow: bool, successors: bool) -> &[Transition<S::Params>] {
        let cache = match (time_flow, successors) {
            (true, true) => &self.step_cache[0],
            (true, false) => &self.step_cache[1],
            (false, true) => &self.step_cache[2],
            (false, false) => &self.step_cache[3],
        };
        let slot = &cache[state.to_index()];
        if let Some(transitions) = slot.get() {
            return transitions;
        }
        let transitions = self.compute_step(state, time_flow, successors);
        slot.get_or_init(move || transitions)
    }

    /// **(internal)** Compute transitions of `state` from its facet colors.
    ///
    /// A self-loop is possible for parameters where the flow is not strictly outward
    /// in any dimension. In dimension `d`, the flow is strictly outward through the upper
    /// facet if it enters through the lower facet and leaves through the upper facet, but
    /// never the other way around (and symmetrically for the lower facet).
    fn compute_step(
        &self,
        state: IdState,
        time_flow: bool,
        successors: bool,
    ) -> Vec<Transition<S::Params>> {
        let solver = &self.solver;
        let mut result = Vec::new();
        let mut outward = solver.empty();
        for var in self.model.variables() {
            let facet = |orientation: Orientation| {
                let orientation = if time_flow {
                    orientation
                } else {
                    orientation.reversed()
                };
                self.facet_colors(state, var, orientation)
            };

            if let Some(higher) = self.encoder.higher_node(state, var) {
                let colors = facet(if successors {
                    Orientation::PositiveOut
                } else {
                    Orientation::PositiveIn
                });
                if let Some(bound) = solver.is_satisfiable(colors) {
                    result.push(Transition {
                        target: higher,
                        direction: if successors {
                            DirectionAtom::Increase(var)
                        } else {
                            DirectionAtom::Decrease(var)
                        },
                        bound,
                    });
                }
                if self.create_self_loops {
                    let flow = solver.intersect(
                        facet(Orientation::NegativeIn),
                        facet(Orientation::PositiveOut),
                    );
                    let flow = solver.minus(&flow, facet(Orientation::NegativeOut));
                    let flow = solver.minus(&flow, facet(Orientation::PositiveIn));
                    outward = solver.union(&outward, &flow);
                }
            }

            if let Some(lower) = self.encoder.lower_node(state, var) {
                let colors = facet(if successors {
                    Orientation::NegativeOut
                } else {
                    Orientation::NegativeIn
                });
                if let Some(bound) = solver.is_satisfiable(colors) {
                    result.push(Transition {
                        target: lower,
                        direction: if successors {
                            DirectionAtom::Decrease(var)
                        } else {
                            DirectionAtom::Increase(var)
                        },
                        bound,
                    });
                }
                if self.create_self_loops {
                    let flow = solver.intersect(
                        facet(Orientation::NegativeOut),
                        facet(Orientation::PositiveIn),
                    );
                    let flow = solver.minus(&flow, facet(Orientation::NegativeIn));
                    let flow = solver.minus(&flow, facet(Orientation::PositiveOut));
                    outward = solver.union(&outward, &flow);
                }
            }
        }

        if self.create_self_loops {
            if let Some(bound) = solver.is_satisfiable(&solver.complement(&outward)) {
                result.push(Transition {
                    target: state,
                    direction: DirectionAtom::Loop,
                    bound,
                });
            }
        }

        trace!(
            "Computed {} {} of {} (time flow: {}).",
            result.len(),
            if successors { "successors" } else { "predecessors" },
            state,
            time_flow
        );
        result
    }
}
