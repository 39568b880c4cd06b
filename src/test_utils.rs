//! Shared fixtures for unit tests.

use crate::{OdeModel, OdeParameter, OdeVariable, ParameterId, Summand, VariableId};

/// Initialize `env_logger` for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// `dv1 = p * (v1/2 + 1) - 1` with thresholds `[0, 2, 4, 6]` and `p in [0, 2]`.
///
/// A one dimensional model which covers most of the interesting behaviour (transitions
/// in both directions and self-loops restricted by the parameter).
pub fn one_dim_model() -> OdeModel {
    let v1 = VariableId::from_index(0);
    let p = ParameterId::from_index(0);
    let equation = vec![
        Summand::constant(0.5).with_parameter(p).with_variable(v1),
        Summand::constant(1.0).with_parameter(p),
        Summand::constant(-1.0),
    ];
    OdeModel::new(
        vec![OdeVariable::new("v1", (0.0, 6.0), vec![0.0, 2.0, 4.0, 6.0], equation)],
        vec![OdeParameter::new("p1", (0.0, 2.0))],
    )
    .unwrap()
}

/// `dv1 = p * (v1/2 - 2) - 1` with thresholds `[0, 2, 4, 6]` and `p in [-2, 2]`.
///
/// Covers the remaining one dimensional cases: a stable state and a parameter that is
/// multiplied by zero on a threshold.
pub fn one_dim_model_zero() -> OdeModel {
    let v1 = VariableId::from_index(0);
    let p = ParameterId::from_index(0);
    let equation = vec![
        Summand::constant(0.5).with_parameter(p).with_variable(v1),
        Summand::constant(-2.0).with_parameter(p),
        Summand::constant(-1.0),
    ];
    OdeModel::new(
        vec![OdeVariable::new("v1", (0.0, 6.0), vec![0.0, 2.0, 4.0, 6.0], equation)],
        vec![OdeParameter::new("p2", (-2.0, 2.0))],
    )
    .unwrap()
}

/// A two dimensional model with two parameters:
///
/// ```text
/// dx = p * x - y
/// dy = 1 - k * y
/// ```
///
/// with thresholds `x: [0, 1, 2, 3]`, `y: [0, 1, 2]`, `p in [0, 2]` and `k in [0, 1]`.
pub fn two_dim_model() -> OdeModel {
    let x = VariableId::from_index(0);
    let y = VariableId::from_index(1);
    let p = ParameterId::from_index(0);
    let k = ParameterId::from_index(1);
    let dx = vec![
        Summand::constant(1.0).with_parameter(p).with_variable(x),
        Summand::constant(-1.0).with_variable(y),
    ];
    let dy = vec![
        Summand::constant(1.0),
        Summand::constant(-1.0).with_parameter(k).with_variable(y),
    ];
    OdeModel::new(
        vec![
            OdeVariable::new("x", (0.0, 3.0), vec![0.0, 1.0, 2.0, 3.0], dx),
            OdeVariable::new("y", (0.0, 2.0), vec![0.0, 1.0, 2.0], dy),
        ],
        vec![
            OdeParameter::new("p", (0.0, 2.0)),
            OdeParameter::new("k", (0.0, 1.0)),
        ],
    )
    .unwrap()
}

/// A two dimensional model without parameters (a rotation around `(1.5, 1.5)`):
///
/// ```text
/// dx = 1.5 - y
/// dy = x - 1.5
/// ```
pub fn rotation_model() -> OdeModel {
    let x = VariableId::from_index(0);
    let y = VariableId::from_index(1);
    let dx = vec![Summand::constant(1.5), Summand::constant(-1.0).with_variable(y)];
    let dy = vec![Summand::constant(1.0).with_variable(x), Summand::constant(-1.5)];
    OdeModel::new(
        vec![
            OdeVariable::new("x", (0.0, 3.0), vec![0.0, 1.0, 2.0, 3.0], dx),
            OdeVariable::new("y", (0.0, 3.0), vec![0.0, 1.0, 2.0, 3.0], dy),
        ],
        vec![],
    )
    .unwrap()
}
