//! Read-only views of state sets with parameter values, used to resolve atomic propositions.
//!
//! A `StateMap` assigns a parameter set to some of the states of a transition system.
//! There are two implementations: the `CutStateMap` which contains all states above or below
//! a threshold, and the `LazyStateMap` which evaluates a predicate on demand.

use crate::biodivine_std::{IdState, IdStateRange};
use crate::node_encoder::NodeEncoder;
use crate::VariableId;
use std::marker::PhantomData;

/// A partial mapping from states to parameter sets.
pub trait StateMap {
    type Params;

    /// The number of states of the underlying system (not the number of mapped states).
    fn state_count(&self) -> usize;

    /// True if `state` is mapped to some parameter set.
    fn contains(&self, state: IdState) -> bool;

    /// The parameter set of `state`, or `None` if the state is not in this map.
    fn get(&self, state: IdState) -> Option<Self::Params>;

    /// Iterate over all states in this map.
    fn states(&self) -> StateMapStates<'_, Self>
    where
        Self: Sized,
    {
        StateMapStates {
            map: self,
            range: IdStateRange::new(self.state_count()),
        }
    }

    /// Iterate over all states in this map together with their parameter sets.
    fn entries(&self) -> StateMapEntries<'_, Self>
    where
        Self: Sized,
    {
        StateMapEntries {
            map: self,
            range: IdStateRange::new(self.state_count()),
        }
    }
}

/// Iterator over the states of a `StateMap`.
pub struct StateMapStates<'a, M: StateMap> {
    map: &'a M,
    range: IdStateRange,
}

/// Iterator over the `(state, params)` entries of a `StateMap`.
pub struct StateMapEntries<'a, M: StateMap> {
    map: &'a M,
    range: IdStateRange,
}

/// Contains the states whose interval in `dimension` lies above (`gt`) or below (`!gt`)
/// the given threshold index. Every contained state maps to the same `value`.
#[derive(Clone, Debug)]
pub struct CutStateMap<'a, P> {
    encoder: &'a NodeEncoder,
    dimension: VariableId,
    threshold: usize,
    gt: bool,
    value: P,
}

/// Contains the states for which the `test` function returns a parameter set.
///
/// Nothing is cached, every query calls the function again.
pub struct LazyStateMap<P, F>
where
    F: Fn(IdState) -> Option<P>,
{
    state_count: usize,
    test: F,
    params: PhantomData<fn() -> P>,
}

impl<'a, M: StateMap> Iterator for StateMapStates<'a, M> {
    type Item = IdState;

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.range.find(|s| map.contains(*s))
    }
}

impl<'a, M: StateMap> Iterator for StateMapEntries<'a, M> {
    type Item = (IdState, M::Params);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.range.find_map(|s| map.get(s).map(|p| (s, p)))
    }
}

impl<'a, P> CutStateMap<'a, P> {
    pub fn new(
        encoder: &'a NodeEncoder,
        dimension: VariableId,
        threshold: usize,
        gt: bool,
        value: P,
    ) -> CutStateMap<'a, P> {
        CutStateMap {
            encoder,
            dimension,
            threshold,
            gt,
            value,
        }
    }
}

impl<'a, P: Clone> StateMap for CutStateMap<'a, P> {
    type Params = P;

    fn state_count(&self) -> usize {
        self.encoder.state_count()
    }

    fn contains(&self, state: IdState) -> bool {
        let coordinate = self.encoder.coordinate(state, self.dimension);
        if self.gt {
            coordinate >= self.threshold
        } else {
            coordinate < self.threshold
        }
    }

    fn get(&self, state: IdState) -> Option<P> {
        if self.contains(state) {
            Some(self.value.clone())
        } else {
            None
        }
    }
}

impl<P, F> LazyStateMap<P, F>
where
    F: Fn(IdState) -> Option<P>,
{
    pub fn new(state_count: usize, test: F) -> LazyStateMap<P, F> {
        LazyStateMap {
            state_count,
            test,
            params: PhantomData,
        }
    }
}

impl<P, F> StateMap for LazyStateMap<P, F>
where
    F: Fn(IdState) -> Option<P>,
{
    type Params = P;

    fn state_count(&self) -> usize {
        self.state_count
    }

    fn contains(&self, state: IdState) -> bool {
        (self.test)(state).is_some()
    }

    fn get(&self, state: IdState) -> Option<P> {
        (self.test)(state)
    }
}
