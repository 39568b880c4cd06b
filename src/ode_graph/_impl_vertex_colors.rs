use crate::ode_graph::{OdeTransitionSystem, VertexColors};
use crate::solver::Solver;
use crate::VariableId;

impl<P> VertexColors<P> {
    pub(super) fn get(&self, positive: bool) -> &P {
        if positive {
            &self.positive
        } else {
            &self.negative
        }
    }

    pub(super) fn is_full(&self, positive: bool) -> bool {
        if positive {
            self.positive_full
        } else {
            self.negative_full
        }
    }
}

impl<S: Solver> OdeTransitionSystem<S> {
    /// The parameters for which the derivative of `dimension` at `vertex` is positive
    /// (or non-positive when `positive` is false).
    ///
    /// The two results are exact complements (up to the boundary point) and are computed
    /// together the first time either of them is requested.
    pub fn vertex_color(&self, vertex: usize, dimension: VariableId, positive: bool) -> &S::Params {
        self.vertex_colors(vertex, dimension).get(positive)
    }

    /// **(internal)** Cached colors of `vertex` in the given `dimension`.
    pub(super) fn vertex_colors(
        &self,
        vertex: usize,
        dimension: VariableId,
    ) -> &VertexColors<S::Params> {
        let slot = &self.vertex_cache[vertex * self.encoder.dimensions() + dimension.to_index()];
        if let Some(colors) = slot.get() {
            return colors;
        }
        let colors = self.compute_vertex_colors(vertex, dimension);
        slot.get_or_init(move || colors)
    }

    /// **(internal)** Evaluate the equation of `dimension` at the given `vertex`.
    ///
    /// The equation is split into `value + coeff * p` where `p` is its only parameter.
    /// Then the derivative is positive for `p > -value / coeff` if `coeff > 0`, and for
    /// `p < -value / coeff` if `coeff < 0`.
    fn compute_vertex_colors(
        &self,
        vertex: usize,
        dimension: VariableId,
    ) -> VertexColors<S::Params> {
        let value_of = |var: VariableId| {
            self.model.thresholds(var)[self.encoder.vertex_coordinate(vertex, var)]
        };
        let mut value = 0.0;
        let mut coeff = 0.0;
        for summand in self.model.equation(dimension) {
            let x = summand.eval(value_of);
            if summand.get_parameter().is_some() {
                coeff += x;
            } else {
                value += x;
            }
        }

        match self.model.equation_parameter(dimension) {
            Some(parameter) if coeff != 0.0 => {
                let (min, max) = self.model[parameter].get_range();
                let split = (-value / coeff).clamp(min, max);
                let upper = self.solver.mk_parameter_range(parameter, split, max);
                let lower = self.solver.mk_parameter_range(parameter, min, split);
                if coeff > 0.0 {
                    VertexColors {
                        positive: upper,
                        negative: lower,
                        positive_full: split <= min,
                        negative_full: split >= max,
                    }
                } else {
                    VertexColors {
                        positive: lower,
                        negative: upper,
                        positive_full: split >= max,
                        negative_full: split <= min,
                    }
                }
            }
            _ => {
                let positive = value > 0.0;
                let (full, empty) = (self.solver.full(), self.solver.empty());
                if positive {
                    VertexColors {
                        positive: full,
                        negative: empty,
                        positive_full: true,
                        negative_full: false,
                    }
                } else {
                    VertexColors {
                        positive: empty,
                        negative: full,
                        positive_full: false,
                        negative_full: true,
                    }
                }
            }
        }
    }
}
