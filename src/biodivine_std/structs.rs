/// Basic structs which are carried over from lib-biodivine_std for now.
///
/// In the future, these will be replaced by a more stable variants.
use crate::VariableId;
use std::fmt::{Display, Error, Formatter};

/// A graph state which simply stores a single `usize` index.
///
/// In an `OdeTransitionSystem`, the index is the mixed-radix encoding of the grid
/// coordinates of the state (see `NodeEncoder`).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IdState(usize);

/// A simple `IdState` iterator used for graphs where the states are consecutive integers.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IdStateRange {
    next: usize,
    remaining: usize,
}

/// The kind of change that a `Transition` represents.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DirectionAtom {
    /// The value of the variable increases (the target is the higher neighbour).
    Increase(VariableId),
    /// The value of the variable decreases (the target is the lower neighbour).
    Decrease(VariableId),
    /// The system stays in the same state.
    Loop,
}

/// A coloured edge of a transition system: the `target` state can be reached in one
/// step for all parameter valuations in `bound`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<P> {
    pub target: IdState,
    pub direction: DirectionAtom,
    pub bound: P,
}

impl From<usize> for IdState {
    fn from(val: usize) -> Self {
        IdState(val)
    }
}

impl From<IdState> for usize {
    fn from(state: IdState) -> Self {
        state.0
    }
}

impl Display for IdState {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "State({})", self.0)
    }
}

impl IdState {
    pub fn from_index(index: usize) -> IdState {
        IdState(index)
    }

    pub fn to_index(self) -> usize {
        self.0
    }
}

impl IdStateRange {
    pub fn new(state_count: usize) -> IdStateRange {
        IdStateRange {
            next: 0,
            remaining: state_count,
        }
    }
}

impl Iterator for IdStateRange {
    type Item = IdState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let result = self.next;
            self.remaining -= 1;
            self.next += 1;
            Some(IdState::from(result))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IdStateRange {}

impl Display for DirectionAtom {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            DirectionAtom::Increase(var) => write!(f, "{}+", var.to_index()),
            DirectionAtom::Decrease(var) => write!(f, "{}-", var.to_index()),
            DirectionAtom::Loop => write!(f, "loop"),
        }
    }
}
