pub struct Linspace {
    start: f64,
    stop: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            stop: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;

            // numpy.linspace pins the endpoint rather than accumulating the step into it
            if i + 1 == self.len && self.len > 1 {
                return Some(self.stop);
            }

            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace_endpoints() {
    let xs: Vec<_> = Linspace::new(0., 115., 1000).collect();

    assert_eq!(xs.len(), 1000);
    assert_eq!(xs[0], 0.);
    assert_eq!(xs[999], 115.);
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_linspace_small() {
    assert_eq!(Linspace::new(0., 1., 5).collect::<Vec<_>>(), vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(3., 7., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(3., 7., 0).count(), 0);
}
