use crate::{OdeParameter, OdeVariable, Summand};
use std::fmt::{Display, Formatter};

impl OdeVariable {
    /// Create a new variable. The thresholds are validated only once the variable is
    /// added to an `OdeModel`.
    pub fn new(
        name: &str,
        range: (f64, f64),
        thresholds: Vec<f64>,
        equation: Vec<Summand>,
    ) -> OdeVariable {
        OdeVariable {
            name: name.to_string(),
            range,
            thresholds,
            var_points: None,
            equation,
        }
    }

    /// Set the number of evaluation points and linear segments used to approximate
    /// nonlinear functions of this variable.
    pub fn with_var_points(mut self, point_count: usize, segment_count: usize) -> OdeVariable {
        self.var_points = Some((point_count, segment_count));
        self
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_range(&self) -> (f64, f64) {
        self.range
    }

    pub fn get_thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn get_var_points(&self) -> Option<(usize, usize)> {
        self.var_points
    }

    pub fn get_equation(&self) -> &[Summand] {
        &self.equation
    }

    /// Number of intervals (states) along the axis of this variable.
    pub fn num_intervals(&self) -> usize {
        self.thresholds.len() - 1
    }

    /// Index of a threshold with exactly the given value, if it exists.
    pub fn find_threshold(&self, value: f64) -> Option<usize> {
        self.thresholds.iter().position(|t| *t == value)
    }
}

impl OdeParameter {
    pub fn new(name: &str, range: (f64, f64)) -> OdeParameter {
        OdeParameter {
            name: name.to_string(),
            range,
        }
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_range(&self) -> (f64, f64) {
        self.range
    }
}

impl Display for OdeVariable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for OdeParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
