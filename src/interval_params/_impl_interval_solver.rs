use crate::interval_params::{IntervalSet, IntervalSolver};
use crate::solver::Solver;
use crate::{OdeModel, ParameterId};

impl IntervalSolver {
    /// Create a solver for a single parameter with values in `[min, max]`.
    pub fn new(min: f64, max: f64) -> IntervalSolver {
        IntervalSolver { bounds: (min, max) }
    }

    /// Create a solver for the only parameter of the `model`. Fails if the model does
    /// not have exactly one parameter.
    pub fn from_model(model: &OdeModel) -> Result<IntervalSolver, String> {
        let bounds = model.parameter_bounds();
        if bounds.len() != 1 {
            return Err(format!(
                "Interval solver requires exactly one parameter, but the model has {}.",
                bounds.len()
            ));
        }
        let (min, max) = bounds[0];
        Ok(IntervalSolver::new(min, max))
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Build a set covering the union of the given intervals (clipped to bounds).
    pub fn mk_intervals(&self, intervals: Vec<(f64, f64)>) -> IntervalSet {
        let (min, max) = self.bounds;
        let clipped = intervals
            .into_iter()
            .map(|(low, high)| (low.max(min), high.min(max)))
            .collect();
        IntervalSet::normalize(clipped)
    }
}

impl Solver for IntervalSolver {
    type Params = IntervalSet;

    fn full(&self) -> IntervalSet {
        IntervalSet::normalize(vec![self.bounds])
    }

    fn empty(&self) -> IntervalSet {
        IntervalSet(Vec::new())
    }

    fn union(&self, a: &IntervalSet, b: &IntervalSet) -> IntervalSet {
        let all = a.0.iter().chain(b.0.iter()).cloned().collect();
        IntervalSet::normalize(all)
    }

    fn intersect(&self, a: &IntervalSet, b: &IntervalSet) -> IntervalSet {
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.0.len() && j < b.0.len() {
            let (l1, h1) = a.0[i];
            let (l2, h2) = b.0[j];
            let (low, high) = (l1.max(l2), h1.min(h2));
            if low < high {
                result.push((low, high));
            }
            if h1 < h2 {
                i += 1;
            } else {
                j += 1;
            }
        }
        IntervalSet(result)
    }

    fn complement(&self, a: &IntervalSet) -> IntervalSet {
        let (min, max) = self.bounds;
        let mut result = Vec::new();
        let mut current = min;
        for (low, high) in &a.0 {
            if *low > current {
                result.push((current, *low));
            }
            current = current.max(*high);
        }
        if current < max {
            result.push((current, max));
        }
        IntervalSet(result)
    }

    fn is_satisfiable(&self, a: &IntervalSet) -> Option<IntervalSet> {
        if a.is_empty() {
            None
        } else {
            Some(a.clone())
        }
    }

    fn canonicalize(&self, a: &IntervalSet) -> IntervalSet {
        a.clone()
    }

    /// Panics if `parameter` is not the first (and only) parameter.
    fn mk_parameter_range(&self, parameter: ParameterId, low: f64, high: f64) -> IntervalSet {
        assert_eq!(
            0,
            parameter.to_index(),
            "Interval solver supports only one parameter."
        );
        self.mk_intervals(vec![(low, high)])
    }
}
