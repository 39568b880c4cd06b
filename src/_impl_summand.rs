use crate::{Evaluable, ParameterId, Summand, VariableId};
use std::fmt::{Display, Formatter};

/// Methods for constructing `Summand`s.
impl Summand {
    /// A summand with the given constant factor and nothing else.
    pub fn constant(constant: f64) -> Summand {
        Summand {
            constant,
            parameter: None,
            variables: Vec::new(),
            evaluable: Vec::new(),
        }
    }

    /// Multiply this summand by the given parameter.
    ///
    /// Note that this replaces any parameter set previously. Use `Summand::times` if you need
    /// to detect summands with more than one parameter.
    pub fn with_parameter(mut self, parameter: ParameterId) -> Summand {
        self.parameter = Some(parameter);
        self
    }

    /// Multiply this summand by the value of the given variable.
    pub fn with_variable(mut self, variable: VariableId) -> Summand {
        self.variables.push(variable);
        self
    }

    /// Multiply this summand by the given nonlinear function.
    pub fn with_evaluable(mut self, evaluable: Evaluable) -> Summand {
        self.evaluable.push(evaluable);
        self
    }

    /// Multiply two summands.
    ///
    /// Returns `Err` if both summands contain a parameter, since the result would not be
    /// affine in a single parameter.
    pub fn times(&self, other: &Summand) -> Result<Summand, String> {
        let parameter = match (self.parameter, other.parameter) {
            (Some(a), Some(b)) => {
                return Err(format!(
                    "Cannot create summand with two parameters or squared parameter: {} and {}.",
                    a, b
                ));
            }
            (a, b) => a.or(b),
        };
        let mut variables = self.variables.clone();
        variables.extend(other.variables.iter().cloned());
        let mut evaluable = self.evaluable.clone();
        evaluable.extend(other.evaluable.iter().cloned());
        Ok(Summand {
            constant: self.constant * other.constant,
            parameter,
            variables,
            evaluable,
        })
    }

    /// Add two summands, but only if they differ in the constant factor. Otherwise
    /// the sum cannot be represented as a single summand and `None` is returned.
    pub fn try_add(&self, other: &Summand) -> Option<Summand> {
        if self.parameter != other.parameter
            || self.variables != other.variables
            || self.evaluable != other.evaluable
        {
            None
        } else {
            Some(Summand {
                constant: self.constant + other.constant,
                ..self.clone()
            })
        }
    }
}

/// Some basic utility methods for inspecting `Summand`s.
impl Summand {
    pub fn get_constant(&self) -> f64 {
        self.constant
    }

    pub fn get_parameter(&self) -> Option<ParameterId> {
        self.parameter
    }

    pub fn get_variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn get_evaluable(&self) -> &[Evaluable] {
        &self.evaluable
    }

    /// True if the value of this summand changes with the value of `variable`.
    pub fn depends_on(&self, variable: VariableId) -> bool {
        self.variables.contains(&variable)
            || self.evaluable.iter().any(|e| e.variable() == variable)
    }

    /// Evaluate this summand (without its parameter) at a point, where `value_of` gives
    /// the value of each variable.
    ///
    /// Nonlinear functions are skipped when the linear part is already zero.
    pub fn eval<F>(&self, value_of: F) -> f64
    where
        F: Fn(VariableId) -> f64,
    {
        let mut result = self.constant;
        for var in &self.variables {
            result *= value_of(*var);
        }
        if result != 0.0 {
            for function in &self.evaluable {
                result *= function.eval(value_of(function.variable()));
            }
        }
        result
    }
}

impl Display for Summand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.constant)?;
        if let Some(parameter) = self.parameter {
            write!(f, "*Param({})", parameter.0)?;
        }
        for var in &self.variables {
            write!(f, "*Var({})", var.0)?;
        }
        for function in &self.evaluable {
            write!(f, "*{}", function)?;
        }
        Ok(())
    }
}
