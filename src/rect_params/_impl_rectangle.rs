use crate::rect_params::Rectangle;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

impl Rectangle {
    /// Create a rectangle from flattened interval coordinates `[l0, h0, l1, h1, ...]`.
    ///
    /// Panics if the number of coordinates is odd.
    pub fn new(coordinates: Vec<f64>) -> Rectangle {
        assert_eq!(
            0,
            coordinates.len() % 2,
            "Rectangle coordinates must come in pairs."
        );
        Rectangle { coordinates }
    }

    /// Create a rectangle from a list of `(low, high)` intervals.
    pub fn from_intervals(intervals: &[(f64, f64)]) -> Rectangle {
        let coordinates = intervals.iter().flat_map(|(l, h)| [*l, *h]).collect();
        Rectangle { coordinates }
    }

    /// Create a rectangle defined by its lowest and highest corner point.
    pub fn from_points(low: &[f64], high: &[f64]) -> Rectangle {
        assert_eq!(low.len(), high.len(), "Corner points must have the same dimension.");
        let coordinates = low.iter().zip(high).flat_map(|(l, h)| [*l, *h]).collect();
        Rectangle { coordinates }
    }

    /// The number of dimensions of this rectangle.
    pub fn dimensions(&self) -> usize {
        self.coordinates.len() / 2
    }

    /// The `(low, high)` interval of this rectangle in the given dimension.
    pub fn interval(&self, dimension: usize) -> (f64, f64) {
        (
            self.coordinates[2 * dimension],
            self.coordinates[2 * dimension + 1],
        )
    }

    pub fn as_intervals(&self) -> Vec<(f64, f64)> {
        (0..self.dimensions()).map(|d| self.interval(d)).collect()
    }

    /// A copy of this rectangle with the interval in `dimension` replaced.
    pub fn with_interval(&self, dimension: usize, low: f64, high: f64) -> Rectangle {
        let mut coordinates = self.coordinates.clone();
        coordinates[2 * dimension] = low;
        coordinates[2 * dimension + 1] = high;
        Rectangle { coordinates }
    }

    /// True if the given point lies in this (closed) rectangle.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimensions()
            && point.iter().enumerate().all(|(d, x)| {
                let (low, high) = self.interval(d);
                low <= *x && *x <= high
            })
    }

    /// Intersect two rectangles. Returns `None` if the result is empty or degenerates
    /// to zero width in some dimension.
    pub fn intersect(&self, other: &Rectangle) -> Option<Rectangle> {
        let mut coordinates = Vec::with_capacity(self.coordinates.len());
        for d in 0..self.dimensions() {
            let (l1, h1) = self.interval(d);
            let (l2, h2) = other.interval(d);
            let low = l1.max(l2);
            let high = h1.min(h2);
            if low >= high {
                return None;
            }
            coordinates.push(low);
            coordinates.push(high);
        }
        Some(Rectangle { coordinates })
    }

    /// True if `other` is a subset of this rectangle.
    pub fn encloses(&self, other: &Rectangle) -> bool {
        (0..self.dimensions()).all(|d| {
            let (l1, h1) = self.interval(d);
            let (l2, h2) = other.interval(d);
            l1 <= l2 && h2 <= h1
        })
    }

    /// If possible, merge the two rectangles into one rectangle which covers exactly their
    /// union. Otherwise return `None`.
    ///
    /// A merge is possible if one rectangle encloses the other, or if the rectangles are
    /// identical in all dimensions except one, where their intervals touch or overlap.
    pub fn try_merge(&self, other: &Rectangle) -> Option<Rectangle> {
        if self.encloses(other) {
            return Some(self.clone());
        }
        if other.encloses(self) {
            return Some(other.clone());
        }
        let mut merge: Option<(usize, f64, f64)> = None;
        for d in 0..self.dimensions() {
            let (l1, h1) = self.interval(d);
            let (l2, h2) = other.interval(d);
            if l1 == l2 && h1 == h2 {
                continue;
            }
            if h2 < l1 || h1 < l2 {
                // The intervals are completely separate.
                return None;
            }
            if merge.is_some() {
                // More than one dimension would have to change.
                return None;
            }
            merge = Some((d, l1.min(l2), h1.max(h2)));
        }
        // Equal rectangles are handled by enclosure, so a merge dimension must exist.
        merge.map(|(d, low, high)| self.with_interval(d, low, high))
    }

    /// Subtract `other` from this rectangle. The result is a list of at most
    /// `2 * dimensions` disjoint rectangles.
    pub fn minus(&self, other: &Rectangle) -> Vec<Rectangle> {
        let mut working = self.clone();
        let mut result = Vec::new();
        for d in 0..self.dimensions() {
            let (l1, h1) = self.interval(d);
            let (l2, h2) = other.interval(d);
            if l1 >= l2 && h1 <= h2 {
                // Clean cut, nothing remains in this dimension.
                continue;
            }
            if h2 <= l1 || h1 <= l2 {
                // Separate rectangles, nothing is removed.
                return vec![self.clone()];
            }
            if l1 < l2 {
                // Overlap on the lower side: cut off the lower slab.
                result.push(working.with_interval(d, l1, l2));
                working.coordinates[2 * d] = l2;
            }
            if h1 > h2 {
                // Overlap on the upper side: cut off the upper slab.
                result.push(working.with_interval(d, h2, h1));
                working.coordinates[2 * d + 1] = h2;
            }
        }
        result
    }

    /// A total lexicographic order on the coordinates, used to sort canonical rectangle sets.
    pub fn total_cmp(&self, other: &Rectangle) -> Ordering {
        for (a, b) in self.coordinates.iter().zip(&other.coordinates) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                different => return different,
            }
        }
        self.coordinates.len().cmp(&other.coordinates.len())
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for d in 0..self.dimensions() {
            if d > 0 {
                write!(f, "x")?;
            }
            let (low, high) = self.interval(d);
            write!(f, "[{}, {}]", low, high)?;
        }
        Ok(())
    }
}
