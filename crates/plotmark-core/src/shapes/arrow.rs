//! Arrow primitive with grab-point semantics.

use super::{point_to_segment_dist, rotate_vec};
use crate::error::Result;
use crate::space::{PlotView, Space};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Fraction of the shaft length within which a pick lands on an end anchor.
///
/// Compatibility value carried over from the original tool; tunable, not a
/// load-bearing invariant.
pub const GRAB_END_FRACTION: f64 = 0.3;

/// Which anchor the position accessor currently refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Grab {
    Head,
    #[default]
    Middle,
    Tail,
}

/// A straight arrow from `tail` to `head`.
///
/// Switching the grab mode is a pure reinterpretation of the stored
/// endpoints, never a geometry rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    /// Start point.
    pub tail: Point,
    /// End point (where the arrowhead points).
    pub head: Point,
    /// Active anchor mode.
    pub grab: Grab,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(tail: Point, head: Point) -> Self {
        Self {
            tail,
            head,
            grab: Grab::Middle,
        }
    }

    /// Length of the shaft.
    pub fn length(&self) -> f64 {
        (self.head - self.tail).hypot()
    }

    /// Normalized direction from tail to head.
    pub fn direction(&self) -> Vec2 {
        let d = self.head - self.tail;
        let len = d.hypot();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            d / len
        }
    }

    /// Midpoint of the shaft.
    pub fn midpoint(&self) -> Point {
        self.tail.midpoint(self.head)
    }

    /// The reference point under the active grab mode.
    pub fn position(&self) -> Point {
        match self.grab {
            Grab::Head => self.head,
            Grab::Middle => self.midpoint(),
            Grab::Tail => self.tail,
        }
    }

    /// Move the active anchor.
    ///
    /// Under `Tail` only the tail end moves (the head offset becomes
    /// head − new_tail); `Head` is symmetric; `Middle` translates the whole
    /// shape.
    pub fn set_position(&mut self, p: Point) {
        match self.grab {
            Grab::Head => self.head = p,
            Grab::Tail => self.tail = p,
            Grab::Middle => {
                let delta = p - self.midpoint();
                self.tail += delta;
                self.head += delta;
            }
        }
    }

    /// Infer the grab mode from where the pointer landed on the shaft.
    ///
    /// Within [`GRAB_END_FRACTION`] of the total length from an end selects
    /// that end; anywhere else selects the middle.
    pub fn grab_for(&self, point: Point) -> Grab {
        let len = self.length();
        if len < f64::EPSILON {
            return Grab::Middle;
        }
        if (point - self.tail).hypot() <= GRAB_END_FRACTION * len {
            Grab::Tail
        } else if (point - self.head).hypot() <= GRAB_END_FRACTION * len {
            Grab::Head
        } else {
            Grab::Middle
        }
    }

    /// Infer and apply the grab mode for a pick at `point`.
    pub fn grab_at(&mut self, point: Point) -> Grab {
        self.grab = self.grab_for(point);
        self.grab
    }

    /// Rotate the shaft by an increment around the active anchor.
    pub(crate) fn rotate_by(&mut self, delta_deg: f64) {
        let anchor = self.position();
        self.tail = anchor + rotate_vec(self.tail - anchor, delta_deg);
        self.head = anchor + rotate_vec(self.head - anchor, delta_deg);
    }

    /// Re-express both endpoints from `from` into `to`.
    pub(crate) fn jump(&mut self, view: &PlotView, from: Space, to: Space) -> Result<()> {
        self.tail = view.transform(self.tail, from, to)?;
        self.head = view.transform(self.head, from, to)?;
        Ok(())
    }

    /// Check whether a point lies on the shaft.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.tail, self.head) <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_inference() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(arrow.grab_for(Point::new(2.0, 0.0)), Grab::Tail);
        assert_eq!(arrow.grab_for(Point::new(8.0, 0.0)), Grab::Head);
        assert_eq!(arrow.grab_for(Point::new(5.0, 0.0)), Grab::Middle);
        // Exactly at the threshold still selects the end.
        assert_eq!(arrow.grab_for(Point::new(3.0, 0.0)), Grab::Tail);
    }

    #[test]
    fn test_tail_grab_moves_only_tail() {
        let mut arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        arrow.grab_at(Point::new(1.0, 0.0));
        assert_eq!(arrow.grab, Grab::Tail);
        arrow.set_position(Point::new(-2.0, 1.0));
        assert!((arrow.tail.x + 2.0).abs() < f64::EPSILON);
        assert!((arrow.tail.y - 1.0).abs() < f64::EPSILON);
        // Head stays; its offset from the tail is now head − new_tail.
        assert!((arrow.head.x - 10.0).abs() < f64::EPSILON);
        assert!((arrow.head.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_middle_grab_translates_both_ends() {
        let mut arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        arrow.grab_at(Point::new(5.0, 0.0));
        arrow.set_position(Point::new(6.0, 2.0));
        assert!((arrow.tail.x - 1.0).abs() < f64::EPSILON);
        assert!((arrow.tail.y - 2.0).abs() < f64::EPSILON);
        assert!((arrow.head.x - 11.0).abs() < f64::EPSILON);
        assert!((arrow.head.y - 2.0).abs() < f64::EPSILON);
        assert!((arrow.length() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_grab_switch_is_reinterpretation() {
        let mut arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        arrow.grab = Grab::Head;
        let head_pos = arrow.position();
        arrow.grab = Grab::Tail;
        let tail_pos = arrow.position();
        assert!((head_pos.x - 10.0).abs() < f64::EPSILON);
        assert!((tail_pos.x - 0.0).abs() < f64::EPSILON);
        // No geometry changed while switching.
        assert!((arrow.length() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rotate_around_anchor() {
        let mut arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        arrow.grab = Grab::Tail;
        arrow.rotate_by(90.0);
        assert!((arrow.tail.x - 0.0).abs() < 1e-9);
        assert!((arrow.head.x - 0.0).abs() < 1e-9);
        assert!((arrow.head.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_shaft() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(arrow.hit_test(Point::new(5.0, 0.0), 0.5));
        assert!(!arrow.hit_test(Point::new(5.0, 2.0), 0.5));
    }
}
