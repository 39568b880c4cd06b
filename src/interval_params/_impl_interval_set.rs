use crate::interval_params::IntervalSet;
use std::fmt::{Display, Formatter};

impl IntervalSet {
    /// **(internal)** Sort the given intervals, drop degenerate ones and merge the ones
    /// that overlap or touch.
    pub(super) fn normalize(mut intervals: Vec<(f64, f64)>) -> IntervalSet {
        intervals.retain(|(low, high)| low < high);
        intervals.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut result: Vec<(f64, f64)> = Vec::with_capacity(intervals.len());
        for (low, high) in intervals {
            match result.last_mut() {
                Some(last) if low <= last.1 => last.1 = last.1.max(high),
                _ => result.push((low, high)),
            }
        }
        IntervalSet(result)
    }

    pub fn intervals(&self) -> &[(f64, f64)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the given parameter value belongs to this set.
    pub fn contains(&self, value: f64) -> bool {
        self.0
            .iter()
            .any(|(low, high)| *low <= value && value <= *high)
    }
}

impl Display for IntervalSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{{}}");
        }
        for (i, (low, high)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "[{}, {}]", low, high)?;
        }
        Ok(())
    }
}
