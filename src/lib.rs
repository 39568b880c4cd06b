//! A library for building and exploring parametrised rectangular abstractions of
//! piecewise multi-affine ODE models.
//!
//! The continuous state space of an `OdeModel` is split by the thresholds of its variables
//! into a grid of boxes (states). For every box, we determine the parameter valuations for
//! which the vector field can leave or enter the box through each of its facets. The result
//! is an `OdeTransitionSystem` whose edges are labelled by sets of parameter valuations
//! (colors), represented by a pluggable `Solver` backend.
//!
//! The main entry points are:
//!  - `OdeModel`, which describes variables, thresholds, equations and parameters;
//!  - `node_encoder::NodeEncoder`, the bijection between states and grid coordinates;
//!  - `ode_graph::OdeTransitionSystem`, the coloured transition system itself;
//!  - `rect_params::RectangleSolver` and `interval_params::IntervalSolver`, the two
//!    exact parameter set representations.

use fxhash::FxBuildHasher;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::iter::Map;
use std::ops::Range;

pub mod biodivine_std;
pub mod interval_params;
pub mod node_encoder;
pub mod ode_graph;
pub mod rect_params;
pub mod solver;
pub mod state_map;

/// **(internal)** Evaluation and validation of `Evaluable` functions.
mod _impl_evaluable;
/// **(internal)** Replacement of nonlinear functions by piecewise linear ramps.
mod _impl_model_approximation;
/// **(internal)** Validated construction and utility methods for `OdeModel`.
mod _impl_ode_model;
/// **(internal)** Utility methods for `OdeVariable` and `OdeParameter`.
mod _impl_ode_variable;
/// **(internal)** Utility methods for `Summand`.
mod _impl_summand;
/// **(internal)** Utility methods for `VariableId` and `ParameterId`.
mod _impl_variable_id;

#[cfg(test)]
mod test_utils;

lazy_static! {
    /// A regex of an identifier which we currently allow as a variable or parameter name.
    static ref ID_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
}

/// A type-safe index of an `OdeVariable` inside an `OdeModel`.
///
/// Variables are also the dimensions of the discretised state space.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableId(usize);

/// A type-safe index of an `OdeParameter` inside an `OdeModel`.
///
/// Parameters are also the dimensions of the parameter space.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ParameterId(usize);

/// A nonlinear univariate function of a single model variable.
///
/// Evaluables are multiplied into a `Summand` and are evaluated at the threshold values
/// of the referenced variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluable {
    /// `a + (b - a) / (1 + (theta / x)^n)`; increasing when `a < b`.
    Hill {
        variable: VariableId,
        theta: f64,
        n: f64,
        a: f64,
        b: f64,
    },
    /// `a + (b - a) / (1 + e^(-2k(x - theta)))`; increasing when `a < b`.
    Sigmoid {
        variable: VariableId,
        k: f64,
        theta: f64,
        a: f64,
        b: f64,
    },
    /// `a` for `x < theta`, `b` otherwise.
    Step {
        variable: VariableId,
        theta: f64,
        a: f64,
        b: f64,
    },
    /// `x^degree`.
    Pow { variable: VariableId, degree: f64 },
    /// `x / (y * (theta + x))`.
    Monod {
        variable: VariableId,
        theta: f64,
        y: f64,
    },
    /// Haldane growth kinetics `x / (theta + x + x^2 / kappa)`.
    Haldane {
        variable: VariableId,
        theta: f64,
        kappa: f64,
    },
    /// Andrews growth kinetics `1 / ((1 + theta / x) * (1 + x / kappa))`.
    Andrews {
        variable: VariableId,
        theta: f64,
        kappa: f64,
    },
    /// Aiba-Edward growth kinetics `e^(-x / kappa) / (1 + theta / x)`.
    Aiba {
        variable: VariableId,
        theta: f64,
        kappa: f64,
    },
    /// Moser growth kinetics `1 / (1 + theta / x^n)`.
    Moser {
        variable: VariableId,
        theta: f64,
        n: f64,
    },
    /// Tessier growth kinetics `1 - e^(-x / theta)`.
    Tessier { variable: VariableId, theta: f64 },
    /// Tessier-type growth kinetics `e^(-x / kappa) - e^(-x / theta)`.
    TessierType {
        variable: VariableId,
        theta: f64,
        kappa: f64,
    },
    /// `sin(x)`.
    Sine { variable: VariableId },
    /// A piecewise linear function through the given points. The `thresholds` are sorted
    /// and the function is constant outside of them.
    Ramp {
        variable: VariableId,
        thresholds: Vec<f64>,
        values: Vec<f64>,
    },
}

/// One additive term of a variable equation.
///
/// The value of a summand is `constant * Π variables * Π evaluable`, evaluated at a point
/// of the state space. If `parameter` is set, the whole term is additionally multiplied by
/// that parameter, i.e. it contributes to the linear coefficient of the parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Summand {
    constant: f64,
    parameter: Option<ParameterId>,
    variables: Vec<VariableId>,
    evaluable: Vec<Evaluable>,
}

/// A variable of an `OdeModel`.
///
/// Each variable has a `name`, a value `range`, a strictly increasing list of `thresholds`
/// which discretise its axis, and an `equation` (a sum of `Summand`s) describing its
/// derivative.
///
/// Optionally, `var_points` gives the `(point_count, segment_count)` used when Hill and
/// Sigmoid functions of this variable are replaced by ramps (see `OdeModel::approximate`).
#[derive(Clone, Debug, PartialEq)]
pub struct OdeVariable {
    name: String,
    range: (f64, f64),
    thresholds: Vec<f64>,
    var_points: Option<(usize, usize)>,
    equation: Vec<Summand>,
}

/// A parameter of an `OdeModel` with a bounded range of admissible values.
#[derive(Clone, Debug, PartialEq)]
pub struct OdeParameter {
    name: String,
    range: (f64, f64),
}

/// A parametrised piecewise multi-affine ODE model.
///
/// An `OdeModel` can only be created through `OdeModel::new`, which validates that the
/// model can be safely discretised: thresholds are sorted, all referenced variables and
/// parameters exist, and every equation depends (linearly) on at most one parameter.
#[derive(Clone, Debug)]
pub struct OdeModel {
    variables: Vec<OdeVariable>,
    parameters: Vec<OdeParameter>,
    variable_to_index: HashMap<String, VariableId, FxBuildHasher>,
    parameter_to_index: HashMap<String, ParameterId, FxBuildHasher>,
}

/// An iterator over all `VariableId`s of an `OdeModel`.
pub type VariableIdIterator = Map<Range<usize>, fn(usize) -> VariableId>;

/// An iterator over all `ParameterId`s of an `OdeModel`.
pub type ParameterIdIterator = Map<Range<usize>, fn(usize) -> ParameterId>;
