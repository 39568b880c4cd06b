//! A lightweight parameter set representation for models with exactly one parameter.
//!
//! There is the `IntervalSet` struct which represents a set of parameter values as a sorted
//! list of disjoint intervals, and the `IntervalSolver` which implements the `Solver`
//! algebra for it. All operations are eager, so every `IntervalSet` is canonical.

mod _impl_interval_set;
mod _impl_interval_solver;

/// A set of values of a single parameter, represented as a sorted list of disjoint,
/// non-degenerate closed intervals. Intervals that touch are always merged.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalSet(Vec<(f64, f64)>);

/// Implements the `Solver` algebra for `IntervalSet` inside the `[min, max]` bounds.
#[derive(Clone, Debug)]
pub struct IntervalSolver {
    bounds: (f64, f64),
}
