use crate::biodivine_std::IdState;
use crate::ode_graph::{OdeTransitionSystem, Orientation};
use crate::solver::Solver;
use crate::state_map::{CutStateMap, LazyStateMap};
use crate::VariableId;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `left op right` where `op` is one of the comparison operators.
    static ref COMPARISON_REGEX: Regex =
        Regex::new(r"^\s*([^\s<>=!]+)\s*(<=|>=|==|!=|<|>)\s*([^\s<>=!]+)\s*$").unwrap();
}

impl<S: Solver> OdeTransitionSystem<S> {
    /// All states above (`gt`) or below (`!gt`) the threshold with the given index,
    /// for all parameters.
    pub fn threshold_proposition(
        &self,
        variable: VariableId,
        threshold: usize,
        gt: bool,
    ) -> CutStateMap<'_, S::Params> {
        CutStateMap::new(&self.encoder, variable, threshold, gt, self.solver.full())
    }

    /// Resolve a proposition such as `x > 2.5` or `2.5 < x`.
    ///
    /// The constant must be exactly one of the thresholds of the variable. Since the states
    /// are boxes, strict and non-strict comparisons are equivalent, and `==` or `!=` are
    /// not supported.
    pub fn float_proposition(
        &self,
        proposition: &str,
    ) -> Result<CutStateMap<'_, S::Params>, String> {
        let captures = COMPARISON_REGEX
            .captures(proposition)
            .ok_or_else(|| format!("Invalid proposition: `{}`.", proposition))?;
        let (left, operator, right) = (&captures[1], &captures[2], &captures[3]);
        let (name, constant, flipped) = if let Ok(value) = right.parse::<f64>() {
            (left, value, false)
        } else if let Ok(value) = left.parse::<f64>() {
            (right, value, true)
        } else {
            return Err(format!("Proposition is too complex: `{}`.", proposition));
        };
        let variable = self
            .model
            .find_variable(name)
            .ok_or_else(|| format!("Unknown variable `{}`.", name))?;
        let threshold = self.model[variable]
            .find_threshold(constant)
            .ok_or_else(|| format!("Unknown threshold {} of `{}`.", constant, name))?;
        let gt = match operator {
            ">" | ">=" => true,
            "<" | "<=" => false,
            _ => return Err(format!("Comparison `{}` is not supported.", operator)),
        };
        Ok(self.threshold_proposition(variable, threshold, gt != flipped))
    }

    /// States where the flow passes through the upper (`positive_facet`) or lower facet
    /// in the given dimension, inwards (`incoming`) or outwards. The facet must lead to
    /// an existing neighbour.
    pub fn facet_proposition(
        &self,
        variable: VariableId,
        positive_facet: bool,
        incoming: bool,
    ) -> LazyStateMap<S::Params, impl Fn(IdState) -> Option<S::Params> + '_> {
        let orientation = match (positive_facet, incoming) {
            (true, true) => Orientation::PositiveIn,
            (true, false) => Orientation::PositiveOut,
            (false, true) => Orientation::NegativeIn,
            (false, false) => Orientation::NegativeOut,
        };
        LazyStateMap::new(self.state_count(), move |state: IdState| {
            let neighbour = if positive_facet {
                self.encoder.higher_node(state, variable)
            } else {
                self.encoder.lower_node(state, variable)
            };
            neighbour?;
            self.solver
                .is_satisfiable(self.facet_colors(state, variable, orientation))
        })
    }
}
