use std::fmt;

pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;
use serde::Deserialize;

use crate::math::{interp, interp_one};

/// Piecewise-linear membership function.
///
/// Control points are expected in order (`a <= b <= c <= d`) but this is not
/// checked. Coincident points turn a slope into a vertical edge, which is how
/// shoulders like `Triangular { a: 0., b: 0., c: 15. }` are written.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// (a, 0) -> (b, 1) -> (c, 0)
    Triangular { a: f64, b: f64, c: f64 },
    /// (a, 0) -> (b, 1) -> (c, 1) -> (d, 0)
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl Shape {
    pub fn triangular(a: f64, b: f64, c: f64) -> Self {
        Shape::Triangular { a, b, c }
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        Shape::Trapezoidal { a, b, c, d }
    }

    fn with_points<R>(&self, f: impl FnOnce(&[(f64, f64)]) -> R) -> R {
        match *self {
            Shape::Triangular { a, b, c } => f(&[(a, 0.), (b, 1.), (c, 0.)]),
            Shape::Trapezoidal { a, b, c, d } => f(&[(a, 0.), (b, 1.), (c, 1.), (d, 0.)]),
        }
    }

    /// Degree of membership of a single value
    pub fn membership(&self, x: f64) -> f64 {
        self.with_points(|points| interp_one(x, points)).clamp(0., 1.)
    }

    /// Degrees of membership for every value in `xs`, in order
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        let mut degrees = self.with_points(|points| interp(xs.iter().copied(), points));

        // Rounding on steep edges can overshoot by an ulp
        for m in &mut degrees {
            *m = m.clamp(0., 1.);
        }

        degrees
    }
}

/// The shapes of a variable's terms, keyed by term.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, Shape>);

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    /// Adds a term, returning the shape it replaced if the term was
    /// already defined.
    pub fn insert(&mut self, key: K, shape: Shape) -> Option<Shape> {
        self.0.insert(key, shape)
    }

    pub fn get(&self, key: K) -> Option<&Shape> {
        self.0.get(key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terms in declaration order of `K`
    pub fn iter(&self) -> impl Iterator<Item = (K, &Shape)> + '_ {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.0.keys()
    }
}

impl<K: Term + fmt::Debug> fmt::Debug for Terms<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[test]
fn test_triangular_basics() {
    let tri = Shape::triangular(10., 15., 20.);

    assert_eq!(tri.membership(5.), 0.);
    assert_eq!(tri.membership(10.), 0.);
    assert_eq!(tri.membership(15.), 1.);
    assert_eq!(tri.membership(17.5), 0.5);
    assert_eq!(tri.membership(20.), 0.);
    assert_eq!(tri.membership(25.), 0.);
}

#[test]
fn test_ramps() {
    let left = Shape::triangular(0., 0., 0.15);
    let right = Shape::triangular(15., 30., 30.);

    assert_eq!(left.membership(0.), 1.);
    assert_eq!(left.membership(0.2), 0.);
    assert!((left.membership(0.075) - 0.5).abs() < 1e-12);
    assert_eq!(right.membership(30.), 0.);
    assert!((right.membership(22.5) - 0.5).abs() < 1e-12);
    assert_eq!(right.membership(10.), 0.);
}

#[test]
fn test_trapezoidal_plateau() {
    let trap = Shape::trapezoidal(97., 105., 110., 115.);

    for x in [105., 106.5, 108., 110.] {
        assert_eq!(trap.membership(x), 1.);
    }

    assert_eq!(trap.membership(96.), 0.);
    assert_eq!(trap.membership(101.), 0.5);
    assert_eq!(trap.membership(115.), 0.);
}

#[test]
fn test_collapsed_trapezoid_is_finite() {
    let trap = Shape::trapezoidal(97., 115., 115., 115.);

    assert_eq!(trap.membership(115.), 0.);
    assert_eq!(trap.membership(200.), 0.);
    assert!((trap.membership(106.) - 0.5).abs() < 1e-12);
}

#[test]
fn test_out_of_order_points_are_accepted() {
    let tri = Shape::triangular(20., 15., 10.);

    for x in [0., 10., 12.5, 15., 17.5, 20., 30.] {
        let m = tri.membership(x);
        assert!(m.is_finite(), "membership({x}) = {m}");
    }
}

#[test]
fn test_derived_keys_are_terms() {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Key)]
    enum Side {
        Left,
        Right,
    }

    fn first_term<K: Term>(terms: &Terms<K>) -> Option<K> {
        terms.keys().next()
    }

    let mut terms = Terms::new();
    terms.insert(Side::Right, Shape::triangular(0., 1., 1.));
    terms.insert(Side::Left, Shape::triangular(0., 0., 1.));

    assert_eq!(first_term(&terms), Some(Side::Left));
}

#[test]
fn test_terms_iterate_in_declaration_order() {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Key)]
    enum Level {
        Low,
        High,
    }

    let mut terms = Terms::new();

    // Declaration order wins over insertion order
    assert_eq!(terms.insert(Level::High, Shape::triangular(5., 10., 10.)), None);
    assert_eq!(terms.insert(Level::Low, Shape::triangular(0., 0., 5.)), None);
    assert_eq!(
        terms.insert(Level::Low, Shape::triangular(0., 1., 2.)),
        Some(Shape::triangular(0., 0., 5.))
    );
    assert_eq!(terms.keys().collect::<Vec<_>>(), vec![Level::Low, Level::High]);
    assert_eq!(terms.get(Level::Low), Some(&Shape::triangular(0., 1., 2.)));
    assert!(terms.contains(Level::High));
    assert_eq!(terms.len(), 2);
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn triangle() -> impl Strategy<Value = (f64, f64, f64)> {
        (-100.0..100.0f64, 0.0..50.0f64, 0.0..50.0f64).prop_map(|(a, ab, bc)| (a, a + ab, a + ab + bc))
    }

    proptest! {
        /// Property: nothing left of the left foot belongs to a triangle
        #[test]
        fn test_zero_before_left_foot((a, b, c) in triangle(), offset in 1e-6..100.0f64) {
            prop_assert_eq!(Shape::triangular(a, b, c).membership(a - offset), 0.0);
        }

        /// Property: the peak is exactly one, unless the right foot collapses onto it
        #[test]
        fn test_peak_is_one((a, b, c) in triangle()) {
            prop_assume!(b < c);
            prop_assert_eq!(Shape::triangular(a, b, c).membership(b), 1.0);
        }

        /// Property: the plateau is exactly one
        #[test]
        fn test_trapezoid_plateau(
            (a, b, c) in triangle(),
            cd in 0.0..50.0f64,
            t in 0.0..=1.0f64,
        ) {
            let d = c + cd;
            prop_assume!(c < d);
            let x = b + (c - b) * t;
            prop_assert_eq!(Shape::trapezoidal(a, b, c, d).membership(x.min(c)), 1.0);
        }

        /// Property: degrees stay within [0, 1]
        #[test]
        fn test_membership_in_unit_interval((a, b, c) in triangle(), x in -200.0..200.0f64) {
            let m = Shape::triangular(a, b, c).membership(x);
            prop_assert!((0.0..=1.0).contains(&m));
        }

        /// Property: scalar and array evaluation agree exactly
        #[test]
        fn test_scalar_matches_array((a, b, c) in triangle(), xs in prop::collection::vec(-200.0..200.0f64, 1..32)) {
            let shape = Shape::triangular(a, b, c);
            let sampled = shape.sample(&xs);

            for (x, m) in xs.iter().zip(sampled) {
                prop_assert_eq!(shape.membership(*x), m);
            }
        }
    }
}
