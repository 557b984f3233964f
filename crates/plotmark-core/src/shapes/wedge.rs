//! Wedge (pie-slice / arc segment) primitive.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A circular wedge spanning `theta1`..`theta2` (degrees, counter-clockwise).
///
/// The only kind that cannot jump between domains: its sweep angles are
/// meaningless under the anisotropic data/axes scaling, so reassigning the
/// space remaps the center only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    /// Center point.
    pub center: Point,
    /// Outer radius.
    pub radius: f64,
    /// Start angle in degrees.
    pub theta1: f64,
    /// End angle in degrees.
    pub theta2: f64,
    /// Ring thickness (None = full slice down to the center).
    pub width: Option<f64>,
}

impl Wedge {
    /// Create a new wedge.
    pub fn new(center: Point, radius: f64, theta1: f64, theta2: f64, width: Option<f64>) -> Self {
        Self {
            center,
            radius,
            theta1,
            theta2,
            width,
        }
    }

    /// Rotate the sweep by an increment, keeping its extent.
    pub(crate) fn rotate_by(&mut self, delta_deg: f64) {
        self.theta1 += delta_deg;
        self.theta2 += delta_deg;
    }

    /// Angular extent of the sweep in degrees, normalized to (0, 360].
    pub fn sweep(&self) -> f64 {
        let sweep = (self.theta2 - self.theta1).rem_euclid(360.0);
        if sweep == 0.0 && self.theta1 != self.theta2 {
            360.0
        } else {
            sweep
        }
    }

    /// Check whether a point lies inside the wedge.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let v = point - self.center;
        let dist = v.hypot();
        if dist > self.radius + tolerance {
            return false;
        }
        let inner = self
            .width
            .map(|w| (self.radius - w - tolerance).max(0.0))
            .unwrap_or(0.0);
        if dist < inner {
            return false;
        }
        let angle = v.y.atan2(v.x).to_degrees();
        (angle - self.theta1).rem_euclid(360.0) <= self.sweep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_shifts_both_angles() {
        let mut wedge = Wedge::new(Point::ZERO, 1.0, -135.0, 135.0, None);
        wedge.rotate_by(45.0);
        assert!((wedge.theta1 + 90.0).abs() < f64::EPSILON);
        assert!((wedge.theta2 - 180.0).abs() < f64::EPSILON);
        assert!((wedge.sweep() - 270.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_test_respects_sweep() {
        let wedge = Wedge::new(Point::ZERO, 1.0, -45.0, 45.0, None);
        assert!(wedge.hit_test(Point::new(0.5, 0.0), 0.0));
        assert!(!wedge.hit_test(Point::new(-0.5, 0.0), 0.0)); // opposite side
        assert!(!wedge.hit_test(Point::new(1.5, 0.0), 0.0)); // too far
    }

    #[test]
    fn test_hit_test_ring_hole() {
        let wedge = Wedge::new(Point::ZERO, 1.0, 0.0, 360.0, Some(0.2));
        assert!(wedge.hit_test(Point::new(0.9, 0.0), 0.0));
        assert!(!wedge.hit_test(Point::new(0.1, 0.0), 0.0));
    }
}
