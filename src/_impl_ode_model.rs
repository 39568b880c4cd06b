use crate::{
    OdeModel, OdeParameter, OdeVariable, ParameterId, ParameterIdIterator, Summand, VariableId,
    VariableIdIterator, ID_REGEX,
};
use fxhash::FxBuildHasher;
use log::debug;
use std::collections::HashMap;
use std::ops::Index;

/// Methods for safely constructing new instances of `OdeModel`s.
impl OdeModel {
    /// Create a new `OdeModel` from the given variables and parameters.
    ///
    /// Returns `Err` if the model cannot be discretised:
    ///  - there are no variables, or some names are invalid or duplicated;
    ///  - some variable has less than two thresholds, or they are not strictly increasing;
    ///  - some parameter range is empty or not finite;
    ///  - `var_points` do not describe at least one segment between two points;
    ///  - an equation references a variable or parameter that does not exist;
    ///  - a nonlinear function has invalid constants;
    ///  - an equation depends on more than one parameter.
    pub fn new(
        variables: Vec<OdeVariable>,
        parameters: Vec<OdeParameter>,
    ) -> Result<OdeModel, String> {
        if variables.is_empty() {
            return Err("Model has no variables.".to_string());
        }

        let mut variable_to_index = HashMap::with_hasher(FxBuildHasher::default());
        for (i, var) in variables.iter().enumerate() {
            Self::assert_valid_name(&var.name)?;
            if variable_to_index.insert(var.name.clone(), VariableId(i)).is_some() {
                return Err(format!("Duplicate variable name {}.", var.name));
            }
        }
        let mut parameter_to_index = HashMap::with_hasher(FxBuildHasher::default());
        for (i, param) in parameters.iter().enumerate() {
            Self::assert_valid_name(&param.name)?;
            if variable_to_index.contains_key(&param.name)
                || parameter_to_index
                    .insert(param.name.clone(), ParameterId(i))
                    .is_some()
            {
                return Err(format!("Duplicate parameter name {}.", param.name));
            }
            let (low, high) = param.range;
            if !low.is_finite() || !high.is_finite() || low >= high {
                return Err(format!(
                    "Invalid range [{}, {}] of parameter {}.",
                    low, high, param.name
                ));
            }
        }

        let model = OdeModel {
            variables,
            parameters,
            variable_to_index,
            parameter_to_index,
        };
        for var in model.variables() {
            model.assert_valid_thresholds(var)?;
            model.assert_valid_equation(var)?;
        }

        debug!(
            "Created model with {} variables and {} parameters.",
            model.num_vars(),
            model.num_params()
        );
        Ok(model)
    }

    /// **(internal)** Utility method to ensure a variable or parameter name is an identifier.
    fn assert_valid_name(name: &str) -> Result<(), String> {
        if ID_REGEX.is_match(name) {
            Ok(())
        } else {
            Err(format!("Invalid name: {:?} is not an identifier.", name))
        }
    }

    /// **(internal)** Utility method to ensure the thresholds of a variable form a valid grid axis.
    fn assert_valid_thresholds(&self, id: VariableId) -> Result<(), String> {
        let var = &self[id];
        if var.thresholds.len() < 2 {
            return Err(format!(
                "Variable {} needs at least two thresholds, {} given.",
                var.name,
                var.thresholds.len()
            ));
        }
        if var.thresholds.iter().any(|t| !t.is_finite()) {
            return Err(format!("Variable {} has a non-finite threshold.", var.name));
        }
        if let Some(w) = var.thresholds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(format!(
                "Thresholds of variable {} are not strictly increasing ({} >= {}).",
                var.name, w[0], w[1]
            ));
        }
        if let Some((points, segments)) = var.var_points {
            if segments == 0 || points <= segments {
                return Err(format!(
                    "Variable {} needs more var points than segments, {} and {} given.",
                    var.name, points, segments
                ));
            }
        }
        Ok(())
    }

    /// **(internal)** Utility method to ensure an equation only references existing objects
    /// and is affine in at most one parameter.
    fn assert_valid_equation(&self, id: VariableId) -> Result<(), String> {
        let var = &self[id];
        let mut equation_parameter: Option<ParameterId> = None;
        for summand in &var.equation {
            let referenced = summand.variables.iter().cloned();
            let referenced = referenced.chain(summand.evaluable.iter().map(|e| e.variable()));
            for v in referenced {
                if v.0 >= self.num_vars() {
                    return Err(format!(
                        "Equation of {} references unknown variable {}.",
                        var.name, v
                    ));
                }
            }
            for function in &summand.evaluable {
                function
                    .assert_valid()
                    .map_err(|e| format!("Invalid equation of {}: {}", var.name, e))?;
            }
            if let Some(p) = summand.parameter {
                if p.0 >= self.num_params() {
                    return Err(format!(
                        "Equation of {} references unknown parameter {}.",
                        var.name, p
                    ));
                }
                match equation_parameter {
                    Some(q) if q != p => {
                        return Err(format!(
                            "Equation of {} depends on two parameters ({} and {}). \
                            At most one parameter per equation is supported.",
                            var.name, self[q].name, self[p].name
                        ));
                    }
                    _ => equation_parameter = Some(p),
                }
            }
        }
        Ok(())
    }
}

/// Some basic utility methods for inspecting the `OdeModel`.
impl OdeModel {
    /// The number of variables (dimensions) in this `OdeModel`.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// The number of parameters in this `OdeModel`.
    pub fn num_params(&self) -> usize {
        self.parameters.len()
    }

    /// Return an iterator over all variable ids of this model.
    pub fn variables(&self) -> VariableIdIterator {
        (0..self.variables.len()).map(VariableId)
    }

    /// Return an iterator over all parameter ids of this model.
    pub fn parameters(&self) -> ParameterIdIterator {
        (0..self.parameters.len()).map(ParameterId)
    }

    /// Find a `VariableId` for the given name, or `None` if the variable does not exist.
    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.variable_to_index.get(name).cloned()
    }

    /// Find a `ParameterId` for the given name, or `None` if the parameter does not exist.
    pub fn find_parameter(&self, name: &str) -> Option<ParameterId> {
        self.parameter_to_index.get(name).cloned()
    }

    pub fn get_variable(&self, id: VariableId) -> &OdeVariable {
        &self.variables[id.0]
    }

    pub fn get_parameter(&self, id: ParameterId) -> &OdeParameter {
        &self.parameters[id.0]
    }

    /// Shorthand for `self.get_variable(id).get_name()`.
    pub fn get_variable_name(&self, id: VariableId) -> &String {
        &self.variables[id.0].name
    }

    /// Shorthand for `self.get_variable(id).get_thresholds()`.
    pub fn thresholds(&self, id: VariableId) -> &[f64] {
        &self.variables[id.0].thresholds
    }

    /// Shorthand for `self.get_variable(id).get_equation()`.
    pub fn equation(&self, id: VariableId) -> &[Summand] {
        &self.variables[id.0].equation
    }

    /// The parameter which appears in the equation of the given variable, if any.
    pub fn equation_parameter(&self, id: VariableId) -> Option<ParameterId> {
        self.variables[id.0].equation.iter().find_map(|s| s.parameter)
    }

    /// Sorted list of variables whose value influences the equation of the given variable.
    pub fn dependencies(&self, id: VariableId) -> Vec<VariableId> {
        self.variables()
            .filter(|v| self.equation(id).iter().any(|s| s.depends_on(*v)))
            .collect()
    }

    /// The bounds of the parameter space as a list of `(min, max)` pairs.
    pub fn parameter_bounds(&self) -> Vec<(f64, f64)> {
        self.parameters.iter().map(|p| p.range).collect()
    }
}

impl Index<VariableId> for OdeModel {
    type Output = OdeVariable;

    fn index(&self, index: VariableId) -> &Self::Output {
        &self.variables[index.0]
    }
}

impl Index<ParameterId> for OdeModel {
    type Output = OdeParameter;

    fn index(&self, index: ParameterId) -> &Self::Output {
        &self.parameters[index.0]
    }
}
