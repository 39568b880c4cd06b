use crate::{OdeModel, ParameterId, VariableId};
use std::fmt::{Display, Error, Formatter};

impl VariableId {
    /// Create a `VariableId` from a raw index. The index is not validated.
    pub fn from_index(index: usize) -> VariableId {
        VariableId(index)
    }

    /// The raw index of this variable (also the dimension of the state space).
    pub fn to_index(self) -> usize {
        self.0
    }

    /// Try to construct a `VariableId` which is valid in the given `OdeModel`.
    pub fn try_from_usize(context: &OdeModel, value: usize) -> Option<VariableId> {
        if value < context.num_vars() {
            Some(VariableId(value))
        } else {
            None
        }
    }
}

impl ParameterId {
    /// Create a `ParameterId` from a raw index. The index is not validated.
    pub fn from_index(index: usize) -> ParameterId {
        ParameterId(index)
    }

    /// The raw index of this parameter (also the dimension of the parameter space).
    pub fn to_index(self) -> usize {
        self.0
    }

    /// Try to construct a `ParameterId` which is valid in the given `OdeModel`.
    pub fn try_from_usize(context: &OdeModel, value: usize) -> Option<ParameterId> {
        if value < context.num_params() {
            Some(ParameterId(value))
        } else {
            None
        }
    }
}

impl From<usize> for VariableId {
    fn from(val: usize) -> Self {
        VariableId(val)
    }
}

impl From<VariableId> for usize {
    fn from(value: VariableId) -> Self {
        value.0
    }
}

impl From<usize> for ParameterId {
    fn from(val: usize) -> Self {
        ParameterId(val)
    }
}

impl From<ParameterId> for usize {
    fn from(value: ParameterId) -> Self {
        value.0
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "OdeVariable({})", self.0)
    }
}

impl Display for ParameterId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "OdeParameter({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::one_dim_model;
    use crate::{ParameterId, VariableId};

    #[test]
    fn id_conversion() {
        let model = one_dim_model();
        assert_eq!(
            Some(VariableId::from_index(0)),
            VariableId::try_from_usize(&model, 0)
        );
        assert_eq!(None, VariableId::try_from_usize(&model, 1));
        assert_eq!(
            Some(ParameterId::from(0)),
            ParameterId::try_from_usize(&model, 0)
        );
        assert_eq!(None, ParameterId::try_from_usize(&model, 1));
        assert_eq!(3, usize::from(VariableId::from(3)));
        assert_eq!("OdeVariable(2)", VariableId(2).to_string());
        assert_eq!("OdeParameter(1)", ParameterId(1).to_string());
    }
}
