//! Mixed-radix encoding of the rectangular grid induced by the variable thresholds.
//!
//! A *state* is one box of the grid, identified by an `IdState` whose index is the
//! mixed-radix number formed by its per-dimension interval coordinates (the first variable
//! is the least significant digit). A *vertex* is a corner of some box, encoded the same way
//! using threshold indices. The corners of one box are addressed by a bit mask where bit `d`
//! selects the upper (`1`) or lower (`0`) threshold in dimension `d`.

use crate::biodivine_std::{IdState, IdStateRange};
use crate::{OdeModel, VariableId};
use log::debug;

/// The maximal number of dimensions, limited by the width of the vertex mask.
pub const MAX_DIMENSIONS: usize = 30;

/// Translates between state/vertex ids and grid coordinates.
#[derive(Clone, Debug)]
pub struct NodeEncoder {
    dimension_multipliers: Vec<usize>,
    dimension_state_counts: Vec<usize>,
    threshold_multipliers: Vec<usize>,
    threshold_counts: Vec<usize>,
    state_count: usize,
    vertex_count: usize,
}

/// Iterates over all vertex masks `fixed | sub` where `sub` ranges over the sub-masks of
/// `free` (in increasing order). The iterator is `Clone`, so it can be restarted.
#[derive(Clone, Debug)]
pub struct VertexMasks {
    free: u32,
    fixed: u32,
    next: Option<u32>,
}

impl NodeEncoder {
    /// Create an encoder for the grid of the given `model`.
    pub fn new(model: &OdeModel) -> Result<NodeEncoder, String> {
        let counts: Vec<usize> = model
            .variables()
            .map(|v| model.thresholds(v).len())
            .collect();
        NodeEncoder::from_threshold_counts(&counts)
    }

    /// Create an encoder for a grid where dimension `d` has `threshold_counts[d]` thresholds.
    pub fn from_threshold_counts(threshold_counts: &[usize]) -> Result<NodeEncoder, String> {
        if threshold_counts.len() > MAX_DIMENSIONS {
            return Err(format!(
                "At most {} dimensions supported, {} given.",
                MAX_DIMENSIONS,
                threshold_counts.len()
            ));
        }
        if let Some(d) = threshold_counts.iter().position(|c| *c < 2) {
            return Err(format!("Dimension {} needs at least two thresholds.", d));
        }
        let too_big = || "Model is too big for integer encoding.".to_string();
        let mut dimension_multipliers = Vec::with_capacity(threshold_counts.len());
        let mut threshold_multipliers = Vec::with_capacity(threshold_counts.len());
        let mut state_count: usize = 1;
        let mut vertex_count: usize = 1;
        for count in threshold_counts {
            dimension_multipliers.push(state_count);
            threshold_multipliers.push(vertex_count);
            state_count = state_count.checked_mul(count - 1).ok_or_else(too_big)?;
            vertex_count = vertex_count.checked_mul(*count).ok_or_else(too_big)?;
        }
        debug!(
            "Created encoder for {} dimensions: {} states, {} vertices.",
            threshold_counts.len(),
            state_count,
            vertex_count
        );
        Ok(NodeEncoder {
            dimension_multipliers,
            dimension_state_counts: threshold_counts.iter().map(|c| c - 1).collect(),
            threshold_multipliers,
            threshold_counts: threshold_counts.to_vec(),
            state_count,
            vertex_count,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimension_multipliers.len()
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of intervals (states) along the given dimension.
    pub fn interval_count(&self, dimension: VariableId) -> usize {
        self.dimension_state_counts[dimension.to_index()]
    }

    /// Iterate over all states of the grid.
    pub fn states(&self) -> IdStateRange {
        IdStateRange::new(self.state_count)
    }

    /// Encode interval coordinates into a state.
    pub fn encode_node(&self, coordinates: &[usize]) -> IdState {
        let index = coordinates
            .iter()
            .zip(&self.dimension_multipliers)
            .map(|(c, m)| c * m)
            .sum::<usize>();
        IdState::from(index)
    }

    /// Decode a state into its interval coordinates.
    pub fn decode_node(&self, state: IdState) -> Vec<usize> {
        (0..self.dimensions())
            .map(|d| self.coordinate_index(state, d))
            .collect()
    }

    /// Encode threshold coordinates into a vertex id.
    pub fn encode_vertex(&self, coordinates: &[usize]) -> usize {
        coordinates
            .iter()
            .zip(&self.threshold_multipliers)
            .map(|(c, m)| c * m)
            .sum()
    }

    /// Decode a vertex id into its threshold coordinates.
    pub fn decode_vertex(&self, vertex: usize) -> Vec<usize> {
        (0..self.dimensions())
            .map(|d| (vertex / self.threshold_multipliers[d]) % self.threshold_counts[d])
            .collect()
    }

    /// The interval coordinate of `state` in the given dimension.
    pub fn coordinate(&self, state: IdState, dimension: VariableId) -> usize {
        self.coordinate_index(state, dimension.to_index())
    }

    /// The threshold index of `vertex` in the given dimension.
    pub fn vertex_coordinate(&self, vertex: usize, dimension: VariableId) -> usize {
        let d = dimension.to_index();
        (vertex / self.threshold_multipliers[d]) % self.threshold_counts[d]
    }

    /// Index of the threshold below `state` in the given dimension.
    pub fn lower_threshold(&self, state: IdState, dimension: VariableId) -> usize {
        self.coordinate(state, dimension)
    }

    /// Index of the threshold above `state` in the given dimension.
    pub fn upper_threshold(&self, state: IdState, dimension: VariableId) -> usize {
        self.coordinate(state, dimension) + 1
    }

    pub fn threshold(&self, state: IdState, dimension: VariableId, upper: bool) -> usize {
        self.coordinate(state, dimension) + usize::from(upper)
    }

    /// The vertex of `state` selected by the corner `mask`.
    pub fn node_vertex(&self, state: IdState, mask: u32) -> usize {
        let mut vertex = 0;
        for d in 0..self.dimensions() {
            let coordinate = self.coordinate_index(state, d) + ((mask >> d) & 1) as usize;
            vertex += self.threshold_multipliers[d] * coordinate;
        }
        vertex
    }

    /// The neighbour of `state` above it in the given dimension, if it exists.
    pub fn higher_node(&self, state: IdState, dimension: VariableId) -> Option<IdState> {
        let d = dimension.to_index();
        if self.coordinate_index(state, d) + 1 == self.dimension_state_counts[d] {
            None
        } else {
            Some(IdState::from(state.to_index() + self.dimension_multipliers[d]))
        }
    }

    /// The neighbour of `state` below it in the given dimension, if it exists.
    pub fn lower_node(&self, state: IdState, dimension: VariableId) -> Option<IdState> {
        let d = dimension.to_index();
        if self.coordinate_index(state, d) == 0 {
            None
        } else {
            Some(IdState::from(state.to_index() - self.dimension_multipliers[d]))
        }
    }

    /// **(internal)** Coordinate of `state` in dimension `d` given as a raw index.
    fn coordinate_index(&self, state: IdState, d: usize) -> usize {
        (state.to_index() / self.dimension_multipliers[d]) % self.dimension_state_counts[d]
    }
}

impl VertexMasks {
    pub fn new(free: u32, fixed: u32) -> VertexMasks {
        VertexMasks {
            free,
            fixed: fixed & !free,
            next: Some(0),
        }
    }
}

impl Iterator for VertexMasks {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current == self.free {
            None
        } else {
            // Increment only within the free bits.
            Some((current | !self.free).wrapping_add(1) & self.free)
        };
        Some(current | self.fixed)
    }
}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::IdState;
    use crate::node_encoder::{NodeEncoder, VertexMasks, MAX_DIMENSIONS};
    use crate::test_utils::{one_dim_model, two_dim_model};
    use crate::VariableId;
    use pretty_assertions::assert_eq;

    fn complex_encoder() -> NodeEncoder {
        // 9, 6, 9, 1 and 2 states per dimension.
        NodeEncoder::from_threshold_counts(&[10, 7, 10, 2, 3]).unwrap()
    }

    fn v(index: usize) -> VariableId {
        VariableId::from_index(index)
    }

    #[test]
    fn simple_encoding() {
        let encoder = NodeEncoder::from_threshold_counts(&[10]).unwrap();
        assert_eq!(9, encoder.state_count());
        for i in 0..9 {
            let state = encoder.encode_node(&[i]);
            assert_eq!(IdState::from(i), state);
            assert_eq!(vec![i], encoder.decode_node(state));
        }
        assert_eq!(Some(IdState::from(1)), encoder.higher_node(IdState::from(0), v(0)));
        assert_eq!(None, encoder.higher_node(IdState::from(8), v(0)));
        assert_eq!(None, encoder.lower_node(IdState::from(0), v(0)));
        assert_eq!(Some(IdState::from(7)), encoder.lower_node(IdState::from(8), v(0)));
    }

    #[test]
    fn complex_encoding() {
        let encoder = complex_encoder();
        assert_eq!(9 * 6 * 9 * 2, encoder.state_count());
        assert_eq!(10 * 7 * 10 * 2 * 3, encoder.vertex_count());
        for v1 in 0..9 {
            for v2 in 0..6 {
                for v3 in 0..9 {
                    for v5 in 0..2 {
                        let coordinates = [v1, v2, v3, 0, v5];
                        let state = encoder.encode_node(&coordinates);
                        let expected = v1 + v2 * 9 + v3 * 9 * 6 + v5 * 9 * 6 * 9;
                        assert_eq!(expected, state.to_index());
                        assert_eq!(coordinates.to_vec(), encoder.decode_node(state));
                        assert_eq!(v3, encoder.coordinate(state, v(2)));
                    }
                }
            }
        }
    }

    #[test]
    fn complex_neighbours() {
        let encoder = complex_encoder();
        for state in encoder.states() {
            let coordinates = encoder.decode_node(state);
            for d in 0..5 {
                let higher = encoder.higher_node(state, v(d));
                if coordinates[d] + 1 == encoder.interval_count(v(d)) {
                    assert_eq!(None, higher);
                } else {
                    let mut expected = coordinates.clone();
                    expected[d] += 1;
                    assert_eq!(Some(encoder.encode_node(&expected)), higher);
                }
                let lower = encoder.lower_node(state, v(d));
                if coordinates[d] == 0 {
                    assert_eq!(None, lower);
                } else {
                    let mut expected = coordinates.clone();
                    expected[d] -= 1;
                    assert_eq!(Some(encoder.encode_node(&expected)), lower);
                }
            }
        }
    }

    #[test]
    fn vertex_encoding() {
        let encoder = complex_encoder();
        let state = encoder.encode_node(&[3, 5, 0, 0, 1]);
        assert_eq!(3, encoder.lower_threshold(state, v(0)));
        assert_eq!(4, encoder.upper_threshold(state, v(0)));
        assert_eq!(6, encoder.threshold(state, v(1), true));
        for mask in 0..32u32 {
            let vertex = encoder.node_vertex(state, mask);
            let coordinates = encoder.decode_vertex(vertex);
            for d in 0..5 {
                let expected = encoder.threshold(state, v(d), (mask >> d) & 1 == 1);
                assert_eq!(expected, coordinates[d]);
                assert_eq!(expected, encoder.vertex_coordinate(vertex, v(d)));
            }
            assert_eq!(vertex, encoder.encode_vertex(&coordinates));
        }
    }

    #[test]
    fn model_encoders() {
        let one = NodeEncoder::new(&one_dim_model()).unwrap();
        assert_eq!(3, one.state_count());
        assert_eq!(4, one.vertex_count());
        let two = NodeEncoder::new(&two_dim_model()).unwrap();
        assert_eq!(2, two.dimensions());
        assert_eq!(6, two.state_count());
        assert_eq!(12, two.vertex_count());
        assert_eq!(vec![1, 1], two.decode_node(IdState::from(4)));
    }

    #[test]
    fn invalid_encoders() {
        let too_many = vec![2; MAX_DIMENSIONS + 1];
        assert!(NodeEncoder::from_threshold_counts(&too_many).is_err());
        assert!(NodeEncoder::from_threshold_counts(&vec![2; MAX_DIMENSIONS]).is_ok());
        assert!(NodeEncoder::from_threshold_counts(&[3, 1]).is_err());
        let huge = vec![1 << 20; 8];
        let error = NodeEncoder::from_threshold_counts(&huge).unwrap_err();
        assert!(error.contains("too big"));
    }

    #[test]
    fn vertex_masks() {
        let all: Vec<u32> = VertexMasks::new(0b101, 0b010).collect();
        assert_eq!(vec![0b010, 0b011, 0b110, 0b111], all);
        let fixed_only: Vec<u32> = VertexMasks::new(0, 0b1).collect();
        assert_eq!(vec![0b1], fixed_only);
        let masks = VertexMasks::new(0b1111, 0);
        assert_eq!(16, masks.clone().count());
        assert_eq!(16, masks.count());
    }
}
