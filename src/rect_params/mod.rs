//! Exact representation of parameter sets as unions of axis-aligned hyperrectangles.
//!
//! There is the `Rectangle` struct which represents one box in the parameter space,
//! the `RectParams` enum which is a (possibly lazy) boolean formula over rectangle sets,
//! and the `RectangleSolver` which implements the `Solver` algebra on top of them.
//!
//! The union of rectangle sets is simplified by merging pairs of rectangles that form
//! a single rectangle together. This is not a general polytope union: the resulting
//! cover is correct, but not necessarily minimal.

mod _impl_rect_params;
mod _impl_rectangle;
mod _impl_rectangle_solver;

/// A non-empty axis-aligned box in the parameter space.
///
/// The coordinates hold one interval per dimension, flattened as `[l0, h0, l1, h1, ...]`
/// (they are intervals, not corner points). Rectangles are treated as closed sets, but
/// any intersection that degenerates to zero width in some dimension is considered empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    coordinates: Vec<f64>,
}

/// A set of parameter valuations, represented as a boolean formula over rectangle sets.
///
/// The variants form a closed set. `True`, `False` and `Rectangles` are the canonical
/// forms (see `Solver::canonicalize`); `And`, `Or` and `Not` appear when operations are
/// combined lazily and disappear once the value is normalised.
#[derive(Clone, Debug, PartialEq)]
pub enum RectParams {
    True,
    False,
    Rectangles(Vec<Rectangle>),
    And(Vec<RectParams>),
    Or(Vec<RectParams>),
    Not(Box<RectParams>),
}

/// Implements the `Solver` algebra for `RectParams` inside the given `bounds`.
#[derive(Clone, Debug)]
pub struct RectangleSolver {
    bounds: Rectangle,
}
