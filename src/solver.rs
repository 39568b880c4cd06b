//! The parameter set algebra used to colour transitions.
//!
//! A `Solver` is a closed set of boolean operations over an opaque value (`Solver::Params`)
//! which represents a subset of the parameter space. Individual backends are
//! interchangeable: the transition system only ever talks to the parameter sets through
//! this trait.
//!
//! Unlike the basic `Set` trait of `lib-biodivine_std`, a solver knows its `unit`
//! (the whole parameter space), hence it can also provide `complement`.

use crate::ParameterId;
use std::fmt::Debug;

/// A backend implementing boolean operations on sets of parameter valuations.
///
/// The results of `union`, `intersect` and `complement` do not have to be in any normal
/// form, a solver can build them lazily. Use `is_satisfiable` or `canonicalize` to obtain
/// a value without internal redundancy.
pub trait Solver {
    type Params: Clone + Debug;

    /// The whole parameter space.
    fn full(&self) -> Self::Params;

    /// The empty set of parameters.
    fn empty(&self) -> Self::Params;

    fn union(&self, a: &Self::Params, b: &Self::Params) -> Self::Params;

    fn intersect(&self, a: &Self::Params, b: &Self::Params) -> Self::Params;

    /// Complement with respect to the whole parameter space.
    fn complement(&self, a: &Self::Params) -> Self::Params;

    /// If `a` is not empty, return it in canonical form. Otherwise return `None`.
    fn is_satisfiable(&self, a: &Self::Params) -> Option<Self::Params>;

    /// Return `a` in canonical form (no internal redundancy, deterministic layout).
    fn canonicalize(&self, a: &Self::Params) -> Self::Params;

    /// The set of valuations where the given `parameter` is within `[low, high]` and all
    /// other parameters are unrestricted. The set is empty when `low >= high`.
    fn mk_parameter_range(&self, parameter: ParameterId, low: f64, high: f64) -> Self::Params;

    fn minus(&self, a: &Self::Params, b: &Self::Params) -> Self::Params {
        self.intersect(a, &self.complement(b))
    }

    fn is_empty(&self, a: &Self::Params) -> bool {
        self.is_satisfiable(a).is_none()
    }

    fn is_full(&self, a: &Self::Params) -> bool {
        self.is_empty(&self.complement(a))
    }

    fn is_subset(&self, a: &Self::Params, b: &Self::Params) -> bool {
        self.is_empty(&self.minus(a, b))
    }

    /// True if `a` and `b` represent the same set of valuations (regardless of form).
    fn is_equivalent(&self, a: &Self::Params, b: &Self::Params) -> bool {
        self.is_subset(a, b) && self.is_subset(b, a)
    }
}
