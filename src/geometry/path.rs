//! Dense sampled paths built from chained cubic Bézier control points.

use glam::Vec2;
use log::warn;

/// Index of a path in the scene's geometry table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(pub usize);

/// Ordered samples approximating a curve. May be empty when the
/// geometry it was built from was malformed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<Vec2>,
}

/// Evaluate one cubic Bézier at `t` in `[0, 1]`.
///
/// Exact at both ends: `t = 0` gives `p0` and `t = 1` gives `p3`.
pub fn bezier_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    p0 * a + p1 * b + p2 * c + p3 * d
}

/// Chained cubic segments need `3k + 1` control points, `k >= 1`.
pub fn is_chainable(control_count: usize) -> bool {
    control_count >= 4 && control_count % 3 == 1
}

impl Path {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Sample chained cubic segments `(P0..P3), (P3..P6), ...`.
    ///
    /// Each segment is cut into `samples_per_segment` equal parameter steps with
    /// both ends included. A joint shared by two segments is emitted once, so
    /// `k` segments produce `k * samples_per_segment + 1` points. A control point
    /// count that is not `3k + 1`, or zero samples, produces an empty path.
    pub fn from_control_points(control_points: &[Vec2], samples_per_segment: usize) -> Self {
        if !is_chainable(control_points.len()) || samples_per_segment == 0 {
            warn!(
                "Cannot chain {} control points with {} samples per segment, path left empty",
                control_points.len(),
                samples_per_segment
            );
            return Self::default();
        }
        let segments = (control_points.len() - 1) / 3;
        let mut points = Vec::with_capacity(segments * samples_per_segment + 1);
        for (segment, window) in control_points.windows(4).step_by(3).enumerate() {
            let [p0, p1, p2, p3] = [window[0], window[1], window[2], window[3]];
            let first_step = if segment == 0 { 0 } else { 1 };
            for step in first_step..=samples_per_segment {
                let t = step as f32 / samples_per_segment as f32;
                points.push(bezier_point(p0, p1, p2, p3, t));
            }
        }
        Self { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enough samples to move a marker along
    pub fn is_traversable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn first(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// The sample at `floor(len * ratio)`, clamped into the path
    pub fn point_at_ratio(&self, ratio: f32) -> Option<Vec2> {
        if self.points.is_empty() {
            return None;
        }
        let last = self.points.len() - 1;
        let index = (self.points.len() as f32 * ratio).floor().max(0.0) as usize;
        Some(self.points[index.min(last)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(count: usize) -> Vec<Vec2> {
        (0..count)
            .map(|i| Vec2::new(i as f32 * 10.0, (i % 2) as f32 * 5.0))
            .collect()
    }

    #[test]
    fn test_malformed_counts_give_empty_path() {
        for count in [0, 1, 2, 3, 5, 6, 8, 9, 11] {
            assert!(
                Path::from_control_points(&control(count), 12).is_empty(),
                "{count} control points should not chain"
            );
        }
    }

    #[test]
    fn test_zero_samples_give_empty_path() {
        assert!(Path::from_control_points(&control(4), 0).is_empty());
    }

    #[test]
    fn test_point_count_per_segment() {
        for (count, segments) in [(4, 1), (7, 2), (10, 3)] {
            let path = Path::from_control_points(&control(count), 20);
            assert_eq!(path.len(), segments * 20 + 1);
        }
    }

    #[test]
    fn test_endpoints_are_exact() {
        let points = control(7);
        let path = Path::from_control_points(&points, 36);
        assert_eq!(path.first(), Some(points[0]));
        assert_eq!(path.last(), Some(points[6]));
        // the shared joint between the two segments
        assert_eq!(path.points()[36], points[3]);
    }

    #[test]
    fn test_segments_join_without_gap() {
        let path = Path::from_control_points(&control(10), 8);
        let max_step = path
            .points()
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .fold(0.0, f32::max);
        assert!(max_step < 10.0, "largest gap {max_step}");
    }

    #[test]
    fn test_bezier_midpoint() {
        let p = bezier_point(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 0.0),
            0.5,
        );
        assert!((p - Vec2::new(5.0, 7.5)).length() < 1e-5);
    }

    #[test]
    fn test_point_at_ratio_clamps() {
        let path = Path::new(vec![Vec2::ZERO, Vec2::X, Vec2::Y]);
        assert_eq!(path.point_at_ratio(0.0), Some(Vec2::ZERO));
        assert_eq!(path.point_at_ratio(0.5), Some(Vec2::X));
        assert_eq!(path.point_at_ratio(1.0), Some(Vec2::Y));
        assert_eq!(path.point_at_ratio(-3.0), Some(Vec2::ZERO));
        assert_eq!(Path::default().point_at_ratio(0.5), None);
    }
}
