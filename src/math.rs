use num::Float;

/// Similar to numpy.interp, for a single sample.
///
/// `coords` are the `(x, y)` control points. Below the first x the first y is
/// returned, at or beyond the last x the last y. In between, the rightmost
/// segment whose left x is `<= x` is interpolated, so a zero-width segment
/// (a repeated x-coordinate) acts as a step and never divides by zero.
///
/// Control points are not required to be sorted. Out of order x-coordinates
/// produce whatever the segment search lands on, mirroring numpy rather than
/// rejecting the input.
pub(crate) fn interp_one<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x < x_first {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }

    // coords.len() >= 2 here, otherwise x_first == x_last would have returned
    let j = coords
        .partition_point(|&(xp, _)| xp <= x)
        .saturating_sub(1)
        .min(coords.len() - 2);
    let (x1, y1) = coords[j];
    let (x2, y2) = coords[j + 1];
    let dx = x2 - x1;

    if dx == F::zero() {
        return y1;
    }

    let slope = (y2 - y1) / dx;

    slope * (x - x1) + y1
}

/// Similar to numpy.interp
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input.into_iter().map(|x| interp_one(x, coords)).collect()
}

/// Discrete center of gravity of `membership` over `universe`.
///
/// Returns zero when the membership is identically zero.
pub(crate) fn centroid<F: Float>(universe: &[F], membership: &[F]) -> F {
    let (num, den) = universe
        .iter()
        .zip(membership)
        .fold((F::zero(), F::zero()), |(num, den), (&u, &m)| (num + u * m, den + m));

    if den == F::zero() {
        F::zero()
    } else {
        num / den
    }
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 3., 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0., 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);

    let mid = interp_one(2.72, &[(1., 3.), (2., 2.), (3., 0.)]);

    assert!((mid - 0.56).abs() < 1e-12);
}

#[test]
fn test_interp_repeated_x() {
    // Left shoulder: (0, 0), (0, 1), (8, 0)
    let coords = [(0., 0.), (0., 1.), (8., 0.)];

    assert_eq!(interp_one(-1., &coords), 0.);
    assert_eq!(interp_one(0., &coords), 1.);
    assert_eq!(interp_one(4., &coords), 0.5);
    assert_eq!(interp_one(8., &coords), 0.);

    // Right shoulder collapsing onto a single point
    let coords = [(6., 0.), (10., 1.), (10., 1.), (10., 0.)];

    assert_eq!(interp_one(8., &coords), 0.5);
    assert_eq!(interp_one(10., &coords), 0.);
    assert!(interp_one(9.999, &coords).is_finite());
}

#[test]
fn test_interp_unsorted_points_do_not_panic() {
    let coords = [(10., 0.), (5., 1.), (0., 0.)];

    for x in [-5., 0., 2.5, 5., 7.5, 10., 15.] {
        assert!(interp_one(x, &coords).is_finite());
    }
}

#[test]
fn test_interp_empty_and_single() {
    assert_eq!(interp_one::<f64>(1., &[]), 0.);
    assert_eq!(interp_one(-1., &[(0., 0.7)]), 0.7);
    assert_eq!(interp_one(1., &[(0., 0.7)]), 0.7);
}

#[test]
fn test_centroid() {
    let universe = [0., 1., 2., 3., 4.];

    assert_eq!(centroid(&universe, &[0., 1., 1., 1., 0.]), 2.);
    assert_eq!(centroid(&universe, &[0., 0., 0., 0., 1.]), 4.);
    assert_eq!(centroid(&universe, &[0.; 5]), 0.);
}
