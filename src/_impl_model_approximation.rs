use crate::{Evaluable, OdeModel, OdeVariable, Summand};
use log::debug;

impl OdeModel {
    /// Create a multi-affine version of this model by replacing every Hill and Sigmoid
    /// function with a piecewise linear `Evaluable::Ramp`.
    ///
    /// For every variable read by such a function, the functions are sampled at
    /// `point_count` evenly spaced points starting at zero (see `OdeVariable::with_var_points`)
    /// and the samples are split into `segment_count` linear segments with the smallest
    /// total error. The segment endpoints are added to the thresholds of the variable and
    /// the ramps interpolate the original functions at every threshold.
    ///
    /// With `fast`, segment errors are computed from prefix sums instead of being summed
    /// point by point. With `cut_to_range`, thresholds outside of the range of the variable
    /// are dropped.
    ///
    /// Returns `Err` when a variable with approximated functions has no var points, or when
    /// the approximated model is not valid.
    pub fn approximate(&self, fast: bool, cut_to_range: bool) -> Result<OdeModel, String> {
        let mut thresholds: Vec<Vec<f64>> = Vec::with_capacity(self.num_vars());
        for var in self.variables() {
            let variable = &self[var];
            let functions: Vec<&Evaluable> = self
                .variables
                .iter()
                .flat_map(|v| v.equation.iter())
                .flat_map(|s| s.evaluable.iter())
                .filter(|f| f.variable() == var && is_approximated(f))
                .collect();
            if functions.is_empty() {
                thresholds.push(variable.thresholds.clone());
                continue;
            }
            let (point_count, segment_count) = variable.var_points.ok_or_else(|| {
                format!(
                    "Cannot approximate functions of {} without var points.",
                    variable.name
                )
            })?;
            let mut result =
                approximation_thresholds(point_count, segment_count, &functions, fast)?;
            result.extend_from_slice(&variable.thresholds);
            if cut_to_range {
                let (low, high) = variable.range;
                result.retain(|t| *t >= low && *t <= high);
            }
            result.sort_by(|a, b| a.total_cmp(b));
            result.dedup();
            debug!(
                "Approximated {} using {} thresholds.",
                variable.name,
                result.len()
            );
            thresholds.push(result);
        }

        let variables = self
            .variables
            .iter()
            .zip(thresholds.iter())
            .map(|(variable, var_thresholds)| {
                let equation = variable
                    .equation
                    .iter()
                    .map(|summand| Summand {
                        evaluable: summand
                            .evaluable
                            .iter()
                            .map(|f| approximate_function(f, &thresholds))
                            .collect(),
                        ..summand.clone()
                    })
                    .collect();
                OdeVariable {
                    thresholds: var_thresholds.clone(),
                    equation,
                    ..variable.clone()
                }
            })
            .collect();
        OdeModel::new(variables, self.parameters.clone())
    }
}

/// **(internal)** Functions replaced by ramps in `OdeModel::approximate`.
fn is_approximated(function: &Evaluable) -> bool {
    matches!(function, Evaluable::Hill { .. } | Evaluable::Sigmoid { .. })
}

/// **(internal)** Replace a Hill or Sigmoid function by a ramp through its values at the
/// thresholds of its variable. Other functions are copied.
fn approximate_function(function: &Evaluable, thresholds: &[Vec<f64>]) -> Evaluable {
    if !is_approximated(function) {
        return function.clone();
    }
    let variable = function.variable();
    let points = thresholds[variable.to_index()].clone();
    let values = points.iter().map(|x| function.eval(*x)).collect();
    Evaluable::Ramp {
        variable,
        thresholds: points,
        values,
    }
}

/// **(internal)** Compute the segment endpoints approximating all `functions` at once.
fn approximation_thresholds(
    point_count: usize,
    segment_count: usize,
    functions: &[&Evaluable],
    fast: bool,
) -> Result<Vec<f64>, String> {
    let points = evaluation_points(point_count, functions)?;
    let curves: Vec<Vec<f64>> = functions
        .iter()
        .map(|f| points.iter().map(|x| f.eval(*x)).collect())
        .collect();
    let indices = segmentation(&points, &curves, segment_count, fast);
    Ok(indices.into_iter().map(|i| points[i]).collect())
}

/// **(internal)** Evenly spaced points from zero to a value after which all the functions
/// are almost constant.
fn evaluation_points(point_count: usize, functions: &[&Evaluable]) -> Result<Vec<f64>, String> {
    let mut max = 0.0f64;
    for function in functions {
        let last = match function {
            Evaluable::Hill { theta, n, .. } => 2.0 * theta + (5.0 / n) * theta,
            Evaluable::Sigmoid { theta, k, .. } => theta + (2.0 / k) * 1.5,
            _ => return Err(format!("Function {} cannot be approximated.", function)),
        };
        max = max.max(last);
    }
    if !max.is_finite() || max <= 0.0 || point_count < 2 {
        return Err(format!(
            "Cannot sample {} points from the interval [0, {}].",
            point_count, max
        ));
    }
    let dx = max / (point_count - 1) as f64;
    Ok((0..point_count).map(|i| dx * i as f64).collect())
}

/// **(internal)** Indices of `segment_count + 1` points splitting the curves into linear
/// segments, found by dynamic programming over the largest error among the curves.
///
/// The first index is always zero and the last one is the last point. Indices may repeat
/// when fewer segments are sufficient.
fn segmentation(
    points: &[f64],
    curves: &[Vec<f64>],
    segment_count: usize,
    fast: bool,
) -> Vec<usize> {
    let worst = |first: usize, last: usize| {
        curves
            .iter()
            .map(|c| segment_error(points, c, first, last))
            .fold(f64::NEG_INFINITY, f64::max)
    };
    if fast {
        let sums: Vec<PrefixSums> = curves.iter().map(|c| PrefixSums::new(points, c)).collect();
        optimal_segments(points.len(), segment_count, |first, last| {
            sums.iter()
                .map(|s| s.segment_error(first, last))
                .fold(f64::NEG_INFINITY, f64::max)
        })
    } else {
        optimal_segments(points.len(), segment_count, worst)
    }
}

/// **(internal)** Minimise the total cost of consecutive segments covering `0..point_count`,
/// where `cost(first, last)` is the error of a single segment.
fn optimal_segments<F>(point_count: usize, segment_count: usize, cost: F) -> Vec<usize>
where
    F: Fn(usize, usize) -> f64,
{
    let last = point_count - 1;
    // best[n] is the lowest cost of covering points `0..=n` with the segments used so far.
    let mut best: Vec<f64> = (0..point_count)
        .map(|n| if n == 0 { 0.0 } else { cost(0, n) })
        .collect();
    let mut split = vec![vec![0usize; point_count]; segment_count];
    for m in 1..segment_count {
        // Going down, so that `best[i]` for `i < n` still refers to `m` segments.
        for n in (2..=last).rev() {
            let mut min_error = best[n - 1];
            let mut min_index = n - 1;
            for i in m..(n - 1) {
                let error = best[i] + cost(i, n);
                if error < min_error {
                    min_error = error;
                    min_index = i;
                }
            }
            best[n] = min_error;
            split[m][n] = min_index;
        }
    }

    let mut result = vec![0; segment_count + 1];
    let mut index = last;
    result[segment_count] = last;
    for m in (0..segment_count).rev() {
        index = split[m][index];
        result[m] = index;
    }
    result
}

/// **(internal)** Squared distance of the points `first..=last` from the line through
/// the first and the last of them.
fn segment_error(x: &[f64], y: &[f64], first: usize, last: usize) -> f64 {
    if first == last {
        return 0.0;
    }
    let (a, b) = line(x, y, first, last);
    let mut error = 0.0;
    for k in first..=last {
        let d = y[k] - a * x[k] - b;
        error += d * d;
    }
    error / (a * a + 1.0)
}

/// **(internal)** Slope and intercept of the line through points `first` and `last`.
fn line(x: &[f64], y: &[f64], first: usize, last: usize) -> (f64, f64) {
    let a = (y[last] - y[first]) / (x[last] - x[first]);
    let b = (y[first] * x[last] - y[last] * x[first]) / (x[last] - x[first]);
    (a, b)
}

/// **(internal)** Prefix sums of one curve, so that `segment_error` takes constant time.
///
/// Entry `k` of each vector is the sum over the first `k` points.
struct PrefixSums<'a> {
    x: &'a [f64],
    y: &'a [f64],
    sx: Vec<f64>,
    sx2: Vec<f64>,
    sy: Vec<f64>,
    sy2: Vec<f64>,
    sxy: Vec<f64>,
}

impl<'a> PrefixSums<'a> {
    fn new(x: &'a [f64], y: &'a [f64]) -> PrefixSums<'a> {
        let prefix = |f: &dyn Fn(usize) -> f64| {
            let mut sums = Vec::with_capacity(x.len() + 1);
            sums.push(0.0);
            for k in 0..x.len() {
                sums.push(sums[k] + f(k));
            }
            sums
        };
        PrefixSums {
            x,
            y,
            sx: prefix(&|k| x[k]),
            sx2: prefix(&|k| x[k] * x[k]),
            sy: prefix(&|k| y[k]),
            sy2: prefix(&|k| y[k] * y[k]),
            sxy: prefix(&|k| x[k] * y[k]),
        }
    }

    fn segment_error(&self, first: usize, last: usize) -> f64 {
        if first == last {
            return 0.0;
        }
        let (a, b) = line(self.x, self.y, first, last);
        let range = |sums: &[f64]| sums[last + 1] - sums[first];
        let count = (last - first + 1) as f64;
        // Expansion of the sum of (y - a*x - b)^2 over the segment.
        let error = range(&self.sy2) - 2.0 * a * range(&self.sxy) - 2.0 * b * range(&self.sy)
            + a * a * range(&self.sx2)
            + 2.0 * a * b * range(&self.sx)
            + b * b * count;
        error.max(0.0) / (a * a + 1.0)
    }
}
