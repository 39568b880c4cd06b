use crate::biodivine_std::IdState;
use crate::node_encoder::VertexMasks;
use crate::ode_graph::{OdeTransitionSystem, Orientation};
use crate::solver::Solver;
use crate::VariableId;

impl Orientation {
    /// True for facets on the upper side of the box.
    pub fn is_positive_facet(self) -> bool {
        matches!(self, Orientation::PositiveIn | Orientation::PositiveOut)
    }

    /// True if the flow through this facet means a positive derivative.
    pub fn is_positive_derivative(self) -> bool {
        matches!(self, Orientation::PositiveOut | Orientation::NegativeIn)
    }

    /// The same facet with the direction of the flow reversed.
    pub fn reversed(self) -> Orientation {
        match self {
            Orientation::PositiveIn => Orientation::PositiveOut,
            Orientation::PositiveOut => Orientation::PositiveIn,
            Orientation::NegativeIn => Orientation::NegativeOut,
            Orientation::NegativeOut => Orientation::NegativeIn,
        }
    }

    /// The orientation of the same facet when viewed from the neighbouring box.
    pub fn dual(self) -> Orientation {
        match self {
            Orientation::PositiveIn => Orientation::NegativeOut,
            Orientation::PositiveOut => Orientation::NegativeIn,
            Orientation::NegativeIn => Orientation::PositiveOut,
            Orientation::NegativeOut => Orientation::PositiveIn,
        }
    }

    fn index(self) -> usize {
        match self {
            Orientation::PositiveIn => 0,
            Orientation::PositiveOut => 1,
            Orientation::NegativeIn => 2,
            Orientation::NegativeOut => 3,
        }
    }
}

impl<S: Solver> OdeTransitionSystem<S> {
    /// The parameters for which the flow passes through the given facet of `state`.
    ///
    /// The result is canonical. Once computed, it is also stored as the color of the dual
    /// facet of the neighbouring state, since both describe the same face of the grid.
    pub fn facet_colors(
        &self,
        state: IdState,
        dimension: VariableId,
        orientation: Orientation,
    ) -> &S::Params {
        let slot = &self.facet_cache[self.facet_index(state, dimension, orientation)];
        if let Some(colors) = slot.get() {
            return colors;
        }
        let colors = self.compute_facet_colors(state, dimension, orientation);
        let neighbour = if orientation.is_positive_facet() {
            self.encoder.higher_node(state, dimension)
        } else {
            self.encoder.lower_node(state, dimension)
        };
        if let Some(neighbour) = neighbour {
            let dual = self.facet_index(neighbour, dimension, orientation.dual());
            // If the dual is already set, it holds the same value.
            let _ = self.facet_cache[dual].set(colors.clone());
        }
        slot.get_or_init(move || colors)
    }

    /// **(internal)** Union of vertex colors over all vertices of the facet.
    ///
    /// Only vertices which differ in dimensions the equation depends on are visited, since
    /// the remaining ones have identical colors.
    ///
    /// The enumeration stops early only when a single vertex has full colors. A union of
    /// partial vertex colors which covers the whole parameter space is recognised by the
    /// final canonicalization instead, since checking the running union would need a
    /// fullness test on every step.
    fn compute_facet_colors(
        &self,
        state: IdState,
        dimension: VariableId,
        orientation: Orientation,
    ) -> S::Params {
        let positive_derivative = orientation.is_positive_derivative();
        let fixed = if orientation.is_positive_facet() {
            1 << dimension.to_index()
        } else {
            0
        };
        let mut result = self.solver.empty();
        for mask in VertexMasks::new(self.facet_masks[dimension.to_index()], fixed) {
            let vertex = self.encoder.node_vertex(state, mask);
            let colors = self.vertex_colors(vertex, dimension);
            if colors.is_full(positive_derivative) {
                return self.solver.full();
            }
            result = self.solver.union(&result, colors.get(positive_derivative));
        }
        self.solver.canonicalize(&result)
    }

    fn facet_index(
        &self,
        state: IdState,
        dimension: VariableId,
        orientation: Orientation,
    ) -> usize {
        let facet = state.to_index() * self.encoder.dimensions() + dimension.to_index();
        facet * 4 + orientation.index()
    }
}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::IdState;
    use crate::node_encoder::VertexMasks;
    use crate::ode_graph::{OdeTransitionSystem, Orientation};
    use crate::solver::Solver;
    use crate::test_utils::{one_dim_model, two_dim_model};
    use crate::rect_params::RectParams;
    use crate::{OdeModel, OdeParameter, OdeVariable, ParameterId, Summand, VariableId};

    const ORIENTATIONS: [Orientation; 4] = [
        Orientation::PositiveIn,
        Orientation::PositiveOut,
        Orientation::NegativeIn,
        Orientation::NegativeOut,
    ];

    #[test]
    fn orientation_helpers() {
        for o in ORIENTATIONS {
            assert_eq!(o, o.reversed().reversed());
            assert_eq!(o, o.dual().dual());
            assert_ne!(o.is_positive_facet(), o.dual().is_positive_facet());
            assert_eq!(o.is_positive_derivative(), o.dual().is_positive_derivative());
        }
    }

    fn assert_dual_facets(model: OdeModel) {
        // Two separate systems, so that the dual write does not influence the comparison.
        let outgoing = OdeTransitionSystem::with_rectangles(model.clone(), true).unwrap();
        let incoming = OdeTransitionSystem::with_rectangles(model, true).unwrap();
        let solver = outgoing.solver();
        for state in outgoing.states() {
            for dimension in outgoing.model().variables() {
                if let Some(higher) = outgoing.encoder().higher_node(state, dimension) {
                    for o in [Orientation::PositiveOut, Orientation::PositiveIn] {
                        let here = outgoing.facet_colors(state, dimension, o);
                        let there = incoming.facet_colors(higher, dimension, o.dual());
                        assert!(solver.is_equivalent(here, there));
                    }
                }
            }
        }
    }

    #[test]
    fn dual_facets_are_equal() {
        assert_dual_facets(one_dim_model());
        assert_dual_facets(two_dim_model());
    }

    #[test]
    fn facet_colors_match_full_enumeration() {
        // The vertex enumeration restricted to dependencies gives the same result
        // as the enumeration of all facet vertices.
        let system = OdeTransitionSystem::with_rectangles(two_dim_model(), true).unwrap();
        let solver = system.solver();
        for state in system.states() {
            for dimension in system.model().variables() {
                for o in ORIENTATIONS {
                    let d = dimension.to_index();
                    let fixed = if o.is_positive_facet() { 1 << d } else { 0 };
                    let positive = o.is_positive_derivative();
                    let masks = VertexMasks::new(0b11 & !(1 << d), fixed);
                    let all = masks.fold(solver.empty(), |acc, mask| {
                        let vertex = system.encoder().node_vertex(state, mask);
                        solver.union(&acc, system.vertex_color(vertex, dimension, positive))
                    });
                    assert!(solver.is_equivalent(&all, system.facet_colors(state, dimension, o)));
                }
            }
        }
    }

    #[test]
    fn one_dim_facet_colors() {
        let system = OdeTransitionSystem::with_rectangles(one_dim_model(), true).unwrap();
        let solver = system.solver();
        let v1 = VariableId::from_index(0);
        let p = ParameterId::from_index(0);
        let s1 = IdState::from(1);
        let range = |low: f64, high: f64| solver.mk_parameter_range(p, low, high);
        let expected = [
            (Orientation::PositiveOut, range(1.0 / 3.0, 2.0)),
            (Orientation::PositiveIn, range(0.0, 1.0 / 3.0)),
            (Orientation::NegativeIn, range(0.5, 2.0)),
            (Orientation::NegativeOut, range(0.0, 0.5)),
        ];
        for (orientation, colors) in expected {
            assert_eq!(&colors, system.facet_colors(s1, v1, orientation));
            // Cached value is stable.
            assert_eq!(&colors, system.facet_colors(s1, v1, orientation));
        }
        // The dual facets were filled in by the computation above.
        assert_eq!(
            &range(0.5, 2.0),
            system.facet_colors(IdState::from(0), v1, Orientation::PositiveOut)
        );
        assert_eq!(
            &range(0.0, 1.0 / 3.0),
            system.facet_colors(IdState::from(2), v1, Orientation::NegativeOut)
        );
    }

    /// `dx = p * (1 - y)`, `dy = -1` with a single state `[0, 1] x [0, 2]` and `p in [-1, 1]`.
    fn opposite_vertices_model() -> OdeModel {
        let x = VariableId::from_index(0);
        let y = VariableId::from_index(1);
        let p = ParameterId::from_index(0);
        let dx = vec![
            Summand::constant(1.0).with_parameter(p),
            Summand::constant(-1.0).with_parameter(p).with_variable(y),
        ];
        let dy = vec![Summand::constant(-1.0)];
        OdeModel::new(
            vec![
                OdeVariable::new("x", (0.0, 1.0), vec![0.0, 1.0], dx),
                OdeVariable::new("y", (0.0, 2.0), vec![0.0, 2.0], dy),
            ],
            vec![OdeParameter::new("p", (-1.0, 1.0))],
        )
        .unwrap()
    }

    #[test]
    fn partial_vertex_colors_cover_facet() {
        // Neither vertex of the upper x facet is full, but together they cover [-1, 1].
        let x = VariableId::from_index(0);
        let s = IdState::from(0);
        let system =
            OdeTransitionSystem::with_rectangles(opposite_vertices_model(), true).unwrap();
        let solver = system.solver();
        let lower_vertex = system.encoder().node_vertex(s, 0b01);
        let upper_vertex = system.encoder().node_vertex(s, 0b11);
        assert!(!solver.is_full(system.vertex_color(lower_vertex, x, true)));
        assert!(!solver.is_full(system.vertex_color(upper_vertex, x, true)));
        assert_eq!(
            &RectParams::True,
            system.facet_colors(s, x, Orientation::PositiveOut)
        );
        assert_eq!(
            &RectParams::True,
            system.facet_colors(s, x, Orientation::PositiveIn)
        );

        let intervals =
            OdeTransitionSystem::with_intervals(opposite_vertices_model(), true).unwrap();
        let solver = intervals.solver();
        assert!(solver.is_full(intervals.facet_colors(s, x, Orientation::PositiveOut)));
        assert!(solver.is_full(intervals.facet_colors(s, x, Orientation::NegativeIn)));
    }
}
