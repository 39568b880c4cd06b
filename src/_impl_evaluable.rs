use crate::{Evaluable, VariableId};
use std::fmt::{Display, Formatter};

/// Constructors for the individual `Evaluable` function families.
///
/// The `positive`/`negative` variants follow the usual convention where the function
/// is increasing (resp. decreasing) in its variable: the bounds `a` and `b` are swapped
/// accordingly, so the caller can supply them in any order.
impl Evaluable {
    /// Hill function scaled to the image `<min(a,b), max(a,b))`.
    pub fn hill(variable: VariableId, theta: f64, n: f64, a: f64, b: f64, positive: bool) -> Self {
        let (a, b) = oriented(a, b, positive);
        Evaluable::Hill {
            variable,
            theta,
            n,
            a,
            b,
        }
    }

    /// Sigmoid function with steepness `k` scaled to the image `<min(a,b), max(a,b))`.
    pub fn sigmoid(
        variable: VariableId,
        k: f64,
        theta: f64,
        a: f64,
        b: f64,
        positive: bool,
    ) -> Self {
        let (a, b) = oriented(a, b, positive);
        Evaluable::Sigmoid {
            variable,
            k,
            theta,
            a,
            b,
        }
    }

    /// Inverse sigmoid, i.e. `1 / sigmoid`, expressed again as a sigmoid with shifted
    /// threshold and inverted bounds.
    ///
    /// Fails if one of the bounds is zero, since the inverse would be unbounded.
    pub fn sigmoid_inverse(
        variable: VariableId,
        k: f64,
        theta: f64,
        a: f64,
        b: f64,
        positive: bool,
    ) -> Result<Self, String> {
        let low = a.min(b);
        let high = a.max(b);
        if (1.0 / low).is_infinite() || (1.0 / high).is_infinite() {
            return Err(format!(
                "Cannot create inverse sigmoid with bounds {} and {}: upper limit would be \
                infinite.",
                a, b
            ));
        }
        Ok(if positive {
            Evaluable::Sigmoid {
                variable,
                k,
                theta: theta + (low / high).ln() / (2.0 * k),
                a: 1.0 / low,
                b: 1.0 / high,
            }
        } else {
            Evaluable::Sigmoid {
                variable,
                k,
                theta: theta + (high / low).ln() / (2.0 * k),
                a: 1.0 / high,
                b: 1.0 / low,
            }
        })
    }

    /// Step function switching from `a` to `b` at `theta`.
    pub fn step(variable: VariableId, theta: f64, a: f64, b: f64, positive: bool) -> Self {
        let (a, b) = oriented(a, b, positive);
        Evaluable::Step {
            variable,
            theta,
            a,
            b,
        }
    }

    pub fn pow(variable: VariableId, degree: f64) -> Self {
        Evaluable::Pow { variable, degree }
    }

    pub fn monod(variable: VariableId, theta: f64, y: f64) -> Self {
        Evaluable::Monod { variable, theta, y }
    }

    pub fn haldane(variable: VariableId, theta: f64, kappa: f64) -> Self {
        Evaluable::Haldane {
            variable,
            theta,
            kappa,
        }
    }

    pub fn andrews(variable: VariableId, theta: f64, kappa: f64) -> Self {
        Evaluable::Andrews {
            variable,
            theta,
            kappa,
        }
    }

    pub fn aiba(variable: VariableId, theta: f64, kappa: f64) -> Self {
        Evaluable::Aiba {
            variable,
            theta,
            kappa,
        }
    }

    pub fn moser(variable: VariableId, theta: f64, n: f64) -> Self {
        Evaluable::Moser { variable, theta, n }
    }

    pub fn tessier(variable: VariableId, theta: f64) -> Self {
        Evaluable::Tessier { variable, theta }
    }

    pub fn tessier_type(variable: VariableId, theta: f64, kappa: f64) -> Self {
        Evaluable::TessierType {
            variable,
            theta,
            kappa,
        }
    }

    pub fn sine(variable: VariableId) -> Self {
        Evaluable::Sine { variable }
    }

    /// Piecewise linear function through the points `(thresholds[i], values[i])`.
    ///
    /// The thresholds must be non-empty, strictly increasing and of the same length as `values`.
    pub fn ramp(
        variable: VariableId,
        thresholds: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, String> {
        assert_valid_ramp(&thresholds, &values)?;
        Ok(Evaluable::Ramp {
            variable,
            thresholds,
            values,
        })
    }
}

impl Evaluable {
    /// The variable this function is applied to.
    pub fn variable(&self) -> VariableId {
        match self {
            Evaluable::Hill { variable, .. }
            | Evaluable::Sigmoid { variable, .. }
            | Evaluable::Step { variable, .. }
            | Evaluable::Pow { variable, .. }
            | Evaluable::Monod { variable, .. }
            | Evaluable::Haldane { variable, .. }
            | Evaluable::Andrews { variable, .. }
            | Evaluable::Aiba { variable, .. }
            | Evaluable::Moser { variable, .. }
            | Evaluable::Tessier { variable, .. }
            | Evaluable::TessierType { variable, .. }
            | Evaluable::Sine { variable }
            | Evaluable::Ramp { variable, .. } => *variable,
        }
    }

    /// Evaluate the function for the given value of its variable.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Evaluable::Hill { theta, n, a, b, .. } => {
                a + (b - a) * (1.0 / (1.0 + (theta / x).powf(*n)))
            }
            Evaluable::Sigmoid { k, theta, a, b, .. } => {
                a + (b - a) / (1.0 + (-2.0 * k * (x - theta)).exp())
            }
            Evaluable::Step { theta, a, b, .. } => {
                if x < *theta {
                    *a
                } else {
                    *b
                }
            }
            Evaluable::Pow { degree, .. } => x.powf(*degree),
            Evaluable::Monod { theta, y, .. } => x / (y * (theta + x)),
            Evaluable::Haldane { theta, kappa, .. } => x / (theta + x + x * x / kappa),
            Evaluable::Andrews { theta, kappa, .. } => {
                1.0 / ((1.0 + theta / x) * (1.0 + x / kappa))
            }
            Evaluable::Aiba { theta, kappa, .. } => (-x / kappa).exp() / (1.0 + theta / x),
            Evaluable::Moser { theta, n, .. } => 1.0 / (1.0 + theta / x.powf(*n)),
            Evaluable::Tessier { theta, .. } => 1.0 - (-x / theta).exp(),
            Evaluable::TessierType { theta, kappa, .. } => {
                (-x / kappa).exp() - (-x / theta).exp()
            }
            Evaluable::Sine { .. } => x.sin(),
            Evaluable::Ramp {
                thresholds, values, ..
            } => eval_ramp(thresholds, values, x),
        }
    }

    /// **(internal)** Check that the function can be evaluated safely: every constant
    /// is finite and ramps have matching, strictly increasing points.
    ///
    /// The variants can be constructed directly, so this cannot rely on the
    /// validated constructors.
    pub(crate) fn assert_valid(&self) -> Result<(), String> {
        let constants: Vec<f64> = match self {
            Evaluable::Hill { theta, n, a, b, .. } => vec![*theta, *n, *a, *b],
            Evaluable::Sigmoid { k, theta, a, b, .. } => vec![*k, *theta, *a, *b],
            Evaluable::Step { theta, a, b, .. } => vec![*theta, *a, *b],
            Evaluable::Pow { degree, .. } => vec![*degree],
            Evaluable::Monod { theta, y, .. } => vec![*theta, *y],
            Evaluable::Haldane { theta, kappa, .. }
            | Evaluable::Andrews { theta, kappa, .. }
            | Evaluable::Aiba { theta, kappa, .. }
            | Evaluable::TessierType { theta, kappa, .. } => vec![*theta, *kappa],
            Evaluable::Moser { theta, n, .. } => vec![*theta, *n],
            Evaluable::Tessier { theta, .. } => vec![*theta],
            Evaluable::Sine { .. } => Vec::new(),
            Evaluable::Ramp {
                thresholds, values, ..
            } => {
                assert_valid_ramp(thresholds, values)?;
                Vec::new()
            }
        };
        if constants.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(format!("Function {} has a non-finite constant.", self))
        }
    }
}

/// **(internal)** Order the bounds such that the function is increasing (`positive`) or decreasing.
fn oriented(a: f64, b: f64, positive: bool) -> (f64, f64) {
    if positive {
        (a.min(b), a.max(b))
    } else {
        (a.max(b), a.min(b))
    }
}

/// **(internal)** Ramp points must be non-empty, finite, of equal length and sorted.
fn assert_valid_ramp(thresholds: &[f64], values: &[f64]) -> Result<(), String> {
    if thresholds.is_empty() || thresholds.len() != values.len() {
        return Err(format!(
            "Ramp approximation needs the same non-zero number of thresholds and values \
            (got {} and {}).",
            thresholds.len(),
            values.len()
        ));
    }
    if thresholds.iter().chain(values).any(|x| !x.is_finite()) {
        return Err("Ramp approximation points must be finite.".to_string());
    }
    if thresholds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(format!(
            "Ramp approximation thresholds must be strictly increasing: {:?}.",
            thresholds
        ));
    }
    Ok(())
}

/// **(internal)** Linear interpolation between the two closest ramp points.
fn eval_ramp(thresholds: &[f64], values: &[f64], x: f64) -> f64 {
    let last = thresholds.len() - 1;
    if x <= thresholds[0] {
        return values[0];
    }
    if x >= thresholds[last] {
        return values[last];
    }
    match thresholds.binary_search_by(|t| t.total_cmp(&x)) {
        Ok(position) => values[position],
        Err(high) => {
            // `x` is strictly inside the thresholds, so `high` is in `1..=last`.
            let low = high - 1;
            let ratio = (x - thresholds[low]) / (thresholds[high] - thresholds[low]);
            values[low] + ratio * (values[high] - values[low])
        }
    }
}

impl Display for Evaluable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = |a: &f64, b: &f64| if a <= b { '+' } else { '-' };
        match self {
            Evaluable::Hill {
                variable,
                theta,
                n,
                a,
                b,
            } => write!(
                f,
                "Hill({})({}, {}, {}, {}, {})",
                sign(a, b),
                variable.0,
                theta,
                n,
                a,
                b
            ),
            Evaluable::Sigmoid {
                variable,
                k,
                theta,
                a,
                b,
            } => write!(
                f,
                "S({})({}, {}, {}, {}, {})",
                sign(a, b),
                variable.0,
                k,
                theta,
                a,
                b
            ),
            Evaluable::Step {
                variable,
                theta,
                a,
                b,
            } => write!(
                f,
                "H({})({}, {}, {}, {})",
                sign(a, b),
                variable.0,
                theta,
                a,
                b
            ),
            Evaluable::Pow { variable, degree } => write!(f, "Pow({}, {})", variable.0, degree),
            Evaluable::Monod { variable, theta, y } => {
                write!(f, "Monod({}, {}, {})", variable.0, theta, y)
            }
            Evaluable::Haldane {
                variable,
                theta,
                kappa,
            } => write!(f, "Haldane({}, {}, {})", variable.0, theta, kappa),
            Evaluable::Andrews {
                variable,
                theta,
                kappa,
            } => write!(f, "Andrews({}, {}, {})", variable.0, theta, kappa),
            Evaluable::Aiba {
                variable,
                theta,
                kappa,
            } => write!(f, "Aiba({}, {}, {})", variable.0, theta, kappa),
            Evaluable::Moser { variable, theta, n } => {
                write!(f, "Moser({}, {}, {})", variable.0, theta, n)
            }
            Evaluable::Tessier { variable, theta } => {
                write!(f, "Tessier({}, {})", variable.0, theta)
            }
            Evaluable::TessierType {
                variable,
                theta,
                kappa,
            } => write!(f, "Tessier_type({}, {}, {})", variable.0, theta, kappa),
            Evaluable::Sine { variable } => write!(f, "Sin({})", variable.0),
            Evaluable::Ramp {
                variable,
                thresholds,
                values,
            } => write!(f, "Approx({})[{:?}]{{{:?}}}", variable.0, thresholds, values),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Evaluable, VariableId};

    fn x() -> VariableId {
        VariableId::from_index(0)
    }

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-9,
            "Expected {}, got {}.",
            expected,
            actual
        );
    }

    #[test]
    fn hill_bounds() {
        let up = Evaluable::hill(x(), 2.0, 2.0, 3.0, 1.0, true);
        assert_eq!(1.0 + 2.0 * 0.5, up.eval(2.0));
        assert!(up.eval(0.5) < up.eval(4.0));
        let down = Evaluable::hill(x(), 2.0, 2.0, 1.0, 3.0, false);
        assert!(down.eval(0.5) > down.eval(4.0));
    }

    #[test]
    fn sigmoid_midpoint_and_inverse() {
        let s = Evaluable::sigmoid(x(), 1.5, 2.0, 0.0, 4.0, true);
        assert_eq!(2.0, s.eval(2.0));
        assert!(Evaluable::sigmoid_inverse(x(), 1.0, 1.0, 0.0, 2.0, true).is_err());
        let inverse = Evaluable::sigmoid_inverse(x(), 1.0, 1.0, 1.0, 2.0, true).unwrap();
        // The inverse stays within the inverted bounds.
        for value in [0.0, 1.0, 5.0] {
            let y = inverse.eval(value);
            assert!((0.5..=1.0).contains(&y));
        }
    }

    #[test]
    fn step_and_pow() {
        let step = Evaluable::step(x(), 1.0, 5.0, 2.0, true);
        assert_eq!(2.0, step.eval(0.5));
        assert_eq!(5.0, step.eval(1.0));
        assert_eq!(8.0, Evaluable::pow(x(), 3.0).eval(2.0));
        assert_eq!(0.25, Evaluable::monod(x(), 2.0, 2.0).eval(2.0));
    }

    #[test]
    fn growth_kinetics() {
        // 2 / (2 + 2 + 4 / 4)
        assert_close(0.4, Evaluable::haldane(x(), 2.0, 4.0).eval(2.0));
        // 1 / ((1 + 1) * (1 + 0.5))
        assert_close(1.0 / 3.0, Evaluable::andrews(x(), 2.0, 4.0).eval(2.0));
        // e^-1 / (1 + 1)
        assert_close((-1.0f64).exp() / 2.0, Evaluable::aiba(x(), 2.0, 2.0).eval(2.0));
        // 1 / (1 + 2 / 4)
        assert_close(2.0 / 3.0, Evaluable::moser(x(), 2.0, 2.0).eval(2.0));
        assert_close(1.0 - (-1.0f64).exp(), Evaluable::tessier(x(), 2.0).eval(2.0));
        assert_close(
            (-0.5f64).exp() - (-1.0f64).exp(),
            Evaluable::tessier_type(x(), 2.0, 4.0).eval(2.0),
        );
        assert_close(1.0, Evaluable::sine(x()).eval(std::f64::consts::FRAC_PI_2));
        assert_eq!(0.0, Evaluable::tessier(x(), 2.0).eval(0.0));
    }

    #[test]
    fn growth_kinetics_display() {
        let y = VariableId::from_index(1);
        assert_eq!("Haldane(1, 2, 4)", Evaluable::haldane(y, 2.0, 4.0).to_string());
        assert_eq!("Andrews(1, 2, 4)", Evaluable::andrews(y, 2.0, 4.0).to_string());
        assert_eq!("Aiba(1, 2, 4)", Evaluable::aiba(y, 2.0, 4.0).to_string());
        assert_eq!("Moser(1, 2, 3)", Evaluable::moser(y, 2.0, 3.0).to_string());
        assert_eq!("Tessier(1, 0.5)", Evaluable::tessier(y, 0.5).to_string());
        assert_eq!(
            "Tessier_type(1, 2, 4)",
            Evaluable::tessier_type(y, 2.0, 4.0).to_string()
        );
        assert_eq!("Sin(1)", Evaluable::sine(y).to_string());
        assert_eq!(y, Evaluable::sine(y).variable());
        assert_eq!(y, Evaluable::tessier_type(y, 2.0, 4.0).variable());
    }

    #[test]
    fn ramp_interpolation() {
        assert!(Evaluable::ramp(x(), vec![1.0, 0.0], vec![0.0, 1.0]).is_err());
        assert!(Evaluable::ramp(x(), vec![0.0], vec![0.0, 1.0]).is_err());
        assert!(Evaluable::ramp(x(), vec![], vec![]).is_err());
        let ramp = Evaluable::ramp(x(), vec![0.0, 1.0, 3.0], vec![0.0, 2.0, 1.0]).unwrap();
        assert_eq!(0.0, ramp.eval(-1.0));
        assert_eq!(1.0, ramp.eval(0.5));
        assert_eq!(2.0, ramp.eval(1.0));
        assert_eq!(1.5, ramp.eval(2.0));
        assert_eq!(1.0, ramp.eval(10.0));
        assert_eq!(VariableId::from_index(0), ramp.variable());
    }

    /// Value of the line through `(x1, y1)` and `(x2, y2)`, clamped outside of `[x1, x2]`.
    fn linear_segment(x1: f64, x2: f64, y1: f64, y2: f64, t: f64) -> f64 {
        let t = t.clamp(x1, x2);
        y1 + (t - x1) / (x2 - x1) * (y2 - y1)
    }

    #[test]
    fn ramp_matches_linear_segments() {
        let single = Evaluable::ramp(x(), vec![1.0, 2.0], vec![3.5, 4.2]).unwrap();
        let double = Evaluable::ramp(x(), vec![1.0, 2.0, 3.0], vec![3.5, 4.2, 2.2]).unwrap();
        for i in 1..20 {
            let t = 0.2 * f64::from(i);
            assert_close(linear_segment(1.0, 2.0, 3.5, 4.2, t), single.eval(t));
            let expected = if t > 2.0 {
                linear_segment(2.0, 3.0, 4.2, 2.2, t)
            } else {
                linear_segment(1.0, 2.0, 3.5, 4.2, t)
            };
            assert_close(expected, double.eval(t));
        }
        assert_eq!(4.2, double.eval(2.0));
    }

    #[test]
    fn validation_of_raw_variants() {
        let empty = Evaluable::Ramp {
            variable: x(),
            thresholds: vec![],
            values: vec![],
        };
        assert!(empty.assert_valid().is_err());
        let short = Evaluable::Ramp {
            variable: x(),
            thresholds: vec![0.0, 1.0],
            values: vec![1.0],
        };
        assert!(short.assert_valid().is_err());
        let unsorted = Evaluable::Ramp {
            variable: x(),
            thresholds: vec![1.0, 1.0],
            values: vec![1.0, 2.0],
        };
        assert!(unsorted.assert_valid().is_err());
        let hill = Evaluable::Hill {
            variable: x(),
            theta: f64::NAN,
            n: 2.0,
            a: 0.0,
            b: 1.0,
        };
        assert!(hill.assert_valid().is_err());
        assert!(Evaluable::sigmoid(x(), 1.0, f64::INFINITY, 0.0, 1.0, true)
            .assert_valid()
            .is_err());
        assert!(Evaluable::hill(x(), 2.0, 2.0, 0.0, 1.0, true).assert_valid().is_ok());
        assert!(Evaluable::sine(x()).assert_valid().is_ok());
    }
}
