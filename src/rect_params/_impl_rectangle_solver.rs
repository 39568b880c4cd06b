use crate::rect_params::{RectParams, Rectangle, RectangleSolver};
use crate::solver::Solver;
use crate::{OdeModel, ParameterId};

impl RectangleSolver {
    /// Create a solver for the parameter space given by `bounds`.
    pub fn new(bounds: Rectangle) -> RectangleSolver {
        RectangleSolver { bounds }
    }

    /// Create a solver whose bounds are the parameter ranges declared by the `model`.
    ///
    /// A model without parameters yields a zero-dimensional space, where the only
    /// two sets are `True` and `False`.
    pub fn from_model(model: &OdeModel) -> RectangleSolver {
        RectangleSolver::new(Rectangle::from_intervals(&model.parameter_bounds()))
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    /// Build a canonical parameter set covering the union of the given `rectangles`.
    pub fn mk_rectangles(&self, rectangles: Vec<Rectangle>) -> RectParams {
        self.canonicalize(&RectParams::Rectangles(rectangles))
    }

    /// **(internal)** Normalise an arbitrary formula into a list of rectangles inside
    /// the bounds. The list is not sorted and may not be fully merged.
    fn to_rectangles(&self, params: &RectParams) -> Vec<Rectangle> {
        match params {
            RectParams::True => vec![self.bounds.clone()],
            RectParams::False => Vec::new(),
            RectParams::Rectangles(items) => items
                .iter()
                .filter_map(|r| r.intersect(&self.bounds))
                .collect(),
            RectParams::Or(items) => {
                let all = items.iter().flat_map(|it| self.to_rectangles(it)).collect();
                merge_rectangles(all)
            }
            RectParams::And(items) => {
                let mut result = vec![self.bounds.clone()];
                for item in items {
                    if result.is_empty() {
                        break;
                    }
                    let other = self.to_rectangles(item);
                    let mut intersection = Vec::new();
                    for a in &result {
                        for b in &other {
                            if let Some(r) = a.intersect(b) {
                                intersection.push(r);
                            }
                        }
                    }
                    result = merge_rectangles(intersection);
                }
                result
            }
            RectParams::Not(inner) => {
                // bounds - (r1 | r2 | ...) = (bounds - r1) & (bounds - r2) & ...
                let mut result = vec![self.bounds.clone()];
                for removed in self.to_rectangles(inner) {
                    if result.is_empty() {
                        break;
                    }
                    let remaining = result.iter().flat_map(|r| r.minus(&removed)).collect();
                    result = merge_rectangles(remaining);
                }
                result
            }
        }
    }
}

/// **(internal)** Merge pairs of rectangles until no two rectangles in the list can be
/// merged. Note that the result is not guaranteed to be the smallest possible cover.
fn merge_rectangles(mut items: Vec<Rectangle>) -> Vec<Rectangle> {
    'fixpoint: loop {
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if let Some(merged) = items[i].try_merge(&items[j]) {
                    items[i] = merged;
                    items.swap_remove(j);
                    continue 'fixpoint;
                }
            }
        }
        return items;
    }
}

/// **(internal)** Append `item` to `result`, flattening nested formulas of the same kind.
fn push_flat(result: &mut Vec<RectParams>, item: &RectParams, conjunction: bool) {
    match (item, conjunction) {
        (RectParams::And(items), true) | (RectParams::Or(items), false) => {
            result.extend(items.iter().cloned())
        }
        _ => result.push(item.clone()),
    }
}

impl Solver for RectangleSolver {
    type Params = RectParams;

    fn full(&self) -> RectParams {
        RectParams::True
    }

    fn empty(&self) -> RectParams {
        RectParams::False
    }

    fn union(&self, a: &RectParams, b: &RectParams) -> RectParams {
        match (a, b) {
            (RectParams::True, _) | (_, RectParams::True) => RectParams::True,
            (RectParams::False, x) | (x, RectParams::False) => x.clone(),
            _ => {
                let mut items = Vec::new();
                push_flat(&mut items, a, false);
                push_flat(&mut items, b, false);
                RectParams::Or(items)
            }
        }
    }

    fn intersect(&self, a: &RectParams, b: &RectParams) -> RectParams {
        match (a, b) {
            (RectParams::False, _) | (_, RectParams::False) => RectParams::False,
            (RectParams::True, x) | (x, RectParams::True) => x.clone(),
            _ => {
                let mut items = Vec::new();
                push_flat(&mut items, a, true);
                push_flat(&mut items, b, true);
                RectParams::And(items)
            }
        }
    }

    fn complement(&self, a: &RectParams) -> RectParams {
        match a {
            RectParams::True => RectParams::False,
            RectParams::False => RectParams::True,
            RectParams::Not(inner) => inner.as_ref().clone(),
            _ => RectParams::Not(Box::new(a.clone())),
        }
    }

    fn is_satisfiable(&self, a: &RectParams) -> Option<RectParams> {
        match self.canonicalize(a) {
            RectParams::False => None,
            canonical => Some(canonical),
        }
    }

    fn canonicalize(&self, a: &RectParams) -> RectParams {
        let mut rectangles = merge_rectangles(self.to_rectangles(a));
        if rectangles.is_empty() {
            RectParams::False
        } else if rectangles.len() == 1 && rectangles[0] == self.bounds {
            RectParams::True
        } else {
            rectangles.sort_by(|a, b| a.total_cmp(b));
            RectParams::Rectangles(rectangles)
        }
    }

    fn mk_parameter_range(&self, parameter: ParameterId, low: f64, high: f64) -> RectParams {
        let (min, max) = self.bounds.interval(parameter.to_index());
        let (low, high) = (low.max(min), high.min(max));
        if low >= high {
            RectParams::False
        } else if low == min && high == max {
            RectParams::True
        } else {
            let range = self.bounds.with_interval(parameter.to_index(), low, high);
            RectParams::Rectangles(vec![range])
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rect_params::{RectParams, Rectangle, RectangleSolver};
    use crate::solver::Solver;
    use crate::test_utils::{one_dim_model, two_dim_model};
    use crate::ParameterId;
    use pretty_assertions::assert_eq;

    fn unit_square() -> RectangleSolver {
        RectangleSolver::new(Rectangle::from_intervals(&[(0.0, 1.0), (0.0, 1.0)]))
    }

    fn rect(x: (f64, f64), y: (f64, f64)) -> RectParams {
        RectParams::Rectangles(vec![Rectangle::from_intervals(&[x, y])])
    }

    #[test]
    fn constant_folding() {
        let solver = unit_square();
        let r = rect((0.0, 0.5), (0.0, 0.5));
        assert_eq!(RectParams::True, solver.union(&r, &solver.full()));
        assert_eq!(r, solver.union(&solver.empty(), &r));
        assert_eq!(RectParams::False, solver.intersect(&r, &solver.empty()));
        assert_eq!(r, solver.intersect(&solver.full(), &r));
        assert_eq!(RectParams::False, solver.complement(&RectParams::True));
        assert_eq!(r, solver.complement(&solver.complement(&r)));
        // Nested formulas of the same kind are flattened.
        let s = rect((0.5, 1.0), (0.0, 0.5));
        let t = rect((0.0, 1.0), (0.5, 1.0));
        let union = solver.union(&solver.union(&r, &s), &t);
        assert_eq!(RectParams::Or(vec![r, s, t]), union);
        assert_eq!(RectParams::True, solver.canonicalize(&union));
    }

    #[test]
    fn canonical_forms() {
        let solver = unit_square();
        assert_eq!(RectParams::True, solver.canonicalize(&rect((-1.0, 2.0), (0.0, 3.0))));
        assert_eq!(RectParams::False, solver.canonicalize(&rect((2.0, 3.0), (0.0, 1.0))));
        assert_eq!(None, solver.is_satisfiable(&rect((0.5, 0.5), (0.0, 1.0))));
        // Clipped to bounds.
        assert_eq!(
            rect((0.5, 1.0), (0.0, 1.0)),
            solver.canonicalize(&rect((0.5, 7.0), (-1.0, 1.0)))
        );
        // Sorted and merged.
        let params = solver.mk_rectangles(vec![
            Rectangle::from_intervals(&[(0.5, 1.0), (0.0, 0.2)]),
            Rectangle::from_intervals(&[(0.0, 0.2), (0.0, 0.2)]),
            Rectangle::from_intervals(&[(0.2, 0.4), (0.0, 0.2)]),
        ]);
        assert_eq!(
            RectParams::Rectangles(vec![
                Rectangle::from_intervals(&[(0.0, 0.4), (0.0, 0.2)]),
                Rectangle::from_intervals(&[(0.5, 1.0), (0.0, 0.2)]),
            ]),
            params
        );
    }

    #[test]
    fn complement_and_minus() {
        let solver = unit_square();
        let center = rect((0.25, 0.75), (0.25, 0.75));
        let ring = solver.canonicalize(&solver.complement(&center));
        match &ring {
            RectParams::Rectangles(items) => assert_eq!(4, items.len()),
            other => panic!("Unexpected ring {}", other),
        }
        assert!(solver.is_empty(&solver.intersect(&ring, &center)));
        assert!(solver.is_full(&solver.union(&ring, &center)));
        assert_eq!(center, solver.canonicalize(&solver.complement(&ring)));
        assert!(solver.is_empty(&solver.minus(&center, &center)));
        assert!(solver.is_empty(&solver.minus(&ring, &ring)));
        assert!(solver.is_subset(&center, &solver.full()));
        assert!(!solver.is_subset(&solver.full(), &center));
    }

    #[test]
    fn union_laws() {
        let solver = unit_square();
        let a = rect((0.0, 0.6), (0.0, 0.6));
        let b = rect((0.4, 1.0), (0.2, 0.8));
        let c = rect((0.1, 0.3), (0.5, 1.0));
        let ab = solver.union(&a, &b);
        let ba = solver.union(&b, &a);
        assert!(solver.is_equivalent(&ab, &ba));
        let ab_c = solver.union(&ab, &c);
        let a_bc = solver.union(&a, &solver.union(&b, &c));
        assert!(solver.is_equivalent(&ab_c, &a_bc));
        let left = solver.intersect(&c, &ab);
        let right = solver.union(&solver.intersect(&c, &a), &solver.intersect(&c, &b));
        assert!(solver.is_equivalent(&left, &right));
        let double = solver.complement(&solver.complement(&ab_c));
        assert!(solver.is_equivalent(&double, &ab_c));
        let not_a = solver.complement(&a);
        assert!(solver.is_equivalent(&solver.complement(&solver.canonicalize(&not_a)), &a));
    }

    #[test]
    fn corners_distribute_over_center() {
        let solver = unit_square();
        let corners = [
            rect((0.0, 0.3), (0.0, 0.3)),
            rect((0.0, 0.3), (0.7, 1.0)),
            rect((0.7, 1.0), (0.0, 0.3)),
            rect((0.7, 1.0), (0.7, 1.0)),
        ];
        let center = rect((0.1, 0.9), (0.1, 0.9));
        let union = corners
            .iter()
            .fold(solver.empty(), |acc, c| solver.union(&acc, c));
        let left = solver.canonicalize(&solver.intersect(&center, &union));
        let right = corners.iter().fold(solver.empty(), |acc, c| {
            solver.union(&acc, &solver.intersect(&center, c))
        });
        let right = solver.canonicalize(&right);
        let expected = RectParams::Rectangles(vec![
            Rectangle::from_intervals(&[(0.1, 0.3), (0.1, 0.3)]),
            Rectangle::from_intervals(&[(0.1, 0.3), (0.7, 0.9)]),
            Rectangle::from_intervals(&[(0.7, 0.9), (0.1, 0.3)]),
            Rectangle::from_intervals(&[(0.7, 0.9), (0.7, 0.9)]),
        ]);
        assert_eq!(expected, left);
        assert_eq!(expected, right);
    }

    #[test]
    fn parameter_ranges() {
        let model = two_dim_model();
        let solver = RectangleSolver::from_model(&model);
        assert_eq!(
            &Rectangle::from_intervals(&[(0.0, 2.0), (0.0, 1.0)]),
            solver.bounds()
        );
        let p = ParameterId::from_index(0);
        let k = ParameterId::from_index(1);
        assert_eq!(
            rect((0.5, 2.0), (0.0, 1.0)),
            solver.mk_parameter_range(p, 0.5, 10.0)
        );
        assert_eq!(RectParams::True, solver.mk_parameter_range(k, -1.0, 1.0));
        assert_eq!(RectParams::False, solver.mk_parameter_range(k, 1.0, 2.0));
        assert_eq!(RectParams::False, solver.mk_parameter_range(p, 1.0, 1.0));

        let one_dim = RectangleSolver::from_model(&one_dim_model());
        assert_eq!(1, one_dim.bounds().dimensions());
    }

    #[test]
    fn parameter_free_space() {
        let solver = RectangleSolver::new(Rectangle::new(Vec::new()));
        assert!(solver.is_full(&solver.full()));
        assert!(solver.is_empty(&solver.complement(&solver.full())));
        assert_eq!(RectParams::True, solver.canonicalize(&solver.full()));
        assert_eq!(
            RectParams::False,
            solver.canonicalize(&RectParams::Not(Box::new(RectParams::True)))
        );
    }
}
