use num::Float;

/// Pointwise operators for combining membership curves.
///
/// `Min` is the AND of rule premises and the clipping of a consequent at its
/// activation strength. `Max` aggregates the clipped consequents of all rules.
#[derive(Clone, Copy, Debug)]
pub enum ProductionLink {
    Min,
    Max,
}

impl ProductionLink {
    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl IntoIterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| match self {
            Self::Min => F::min(u, v),
            Self::Max => F::max(u, v),
        })
    }
}

#[test]
fn test_production_link() {
    let u = [0.0, 0.25, 0.5, 1.0];
    let v = [0.5, 0.5, 0.5, 0.5];

    let min: Vec<f64> = ProductionLink::Min.call(u, v).into_iter().collect();
    let max: Vec<f64> = ProductionLink::Max.call(u, v).into_iter().collect();

    assert_eq!(min, vec![0.0, 0.25, 0.5, 0.5]);
    assert_eq!(max, vec![0.5, 0.5, 0.5, 1.0]);
}

#[test]
fn test_clip_with_constant() {
    let curve = [0.0, 0.4, 1.0, 0.4, 0.0];
    let clipped: Vec<f64> = ProductionLink::Min
        .call(curve, std::iter::repeat(0.3))
        .into_iter()
        .collect();

    assert_eq!(clipped, vec![0.0, 0.3, 0.3, 0.3, 0.0]);
}
