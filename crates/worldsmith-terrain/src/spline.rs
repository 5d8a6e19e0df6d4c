//! Piecewise-linear lookup tables keyed on a scalar.

use worldsmith_chunk::Color;

/// Interpolates between two control values at `t ∈ [0, 1]`.
pub type Lerp<T> = fn(f64, &T, &T) -> T;

/// A piecewise-linear spline over arbitrary values.
///
/// Points are kept sorted by key. Lookups outside the key range clamp to the
/// nearest end point.
#[derive(Clone, Debug)]
pub struct LinearSpline<T> {
    points: Vec<(f64, T)>,
    lerp: Lerp<T>,
}

impl<T: Clone> LinearSpline<T> {
    /// An empty spline using `lerp` between neighbouring points.
    pub fn new(lerp: Lerp<T>) -> Self {
        Self {
            points: Vec::new(),
            lerp,
        }
    }

    /// Insert a control point, keeping keys ordered. Equal keys keep insertion order.
    pub fn add_point(&mut self, key: f64, value: T) -> &mut Self {
        let at = self.points.partition_point(|(k, _)| *k <= key);
        self.points.insert(at, (key, value));
        self
    }

    /// Builder form of [`add_point`](Self::add_point).
    #[must_use]
    pub fn with_point(mut self, key: f64, value: T) -> Self {
        self.add_point(key, value);
        self
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the spline has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Evaluate at `key`. `None` only when the spline is empty.
    pub fn get(&self, key: f64) -> Option<T> {
        let (first, last) = (self.points.first()?, self.points.last()?);
        if key <= first.0 {
            return Some(first.1.clone());
        }
        if key >= last.0 {
            return Some(last.1.clone());
        }

        let upper = self.points.partition_point(|(k, _)| *k < key);
        let (k0, v0) = &self.points[upper - 1];
        let (k1, v1) = &self.points[upper];
        let span = k1 - k0;
        if span <= 0.0 {
            return Some(v1.clone());
        }
        Some((self.lerp)((key - k0) / span, v0, v1))
    }
}

impl LinearSpline<Color> {
    /// A colour ramp interpolating component-wise.
    pub fn colors() -> Self {
        Self::new(|t, a, b| a.lerp(*b, t as f32))
    }
}

impl LinearSpline<f64> {
    /// A scalar curve.
    pub fn scalar() -> Self {
        Self::new(|t, a, b| a + (b - a) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spline_has_no_value() {
        assert_eq!(LinearSpline::scalar().get(0.5), None);
    }

    #[test]
    fn test_interpolates_between_points() {
        let spline = LinearSpline::scalar()
            .with_point(0.0, 10.0)
            .with_point(1.0, 20.0)
            .with_point(3.0, 0.0);
        assert_eq!(spline.get(0.5), Some(15.0));
        assert_eq!(spline.get(2.0), Some(10.0));
        assert_eq!(spline.get(1.0), Some(20.0));
    }

    #[test]
    fn test_clamps_outside_range() {
        let spline = LinearSpline::scalar().with_point(0.0, 1.0).with_point(1.0, 2.0);
        assert_eq!(spline.get(-4.0), Some(1.0));
        assert_eq!(spline.get(9.0), Some(2.0));
    }

    #[test]
    fn test_points_sorted_on_insert() {
        let mut spline = LinearSpline::scalar();
        spline.add_point(1.0, 100.0).add_point(0.0, 0.0);
        assert_eq!(spline.len(), 2);
        assert_eq!(spline.get(0.25), Some(25.0));
    }

    #[test]
    fn test_color_spline_blends() {
        let spline = LinearSpline::colors()
            .with_point(0.0, Color::Rgb([0.0, 0.0, 0.0]))
            .with_point(1.0, Color::Rgb([1.0, 0.5, 0.0]));
        assert_eq!(spline.get(0.5), Some(Color::Rgb([0.5, 0.25, 0.0])));
    }
}
