//! Rectangle primitive.

use crate::error::Result;
use crate::space::{PlotView, Space};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its first vertex.
///
/// The anchor is the reference point reported by the position accessor;
/// rotation is carried by the wrapper and applied by the renderer around
/// the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Anchor vertex (lower-left for positive extents).
    pub origin: Point,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Get the rectangle as a kurbo Rect (normalized corner order).
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.origin.x.min(self.origin.x + self.width),
            self.origin.y.min(self.origin.y + self.height),
            self.origin.x.max(self.origin.x + self.width),
            self.origin.y.max(self.origin.y + self.height),
        )
    }

    /// Re-express anchor and extents from `from` into `to`.
    pub(crate) fn jump(&mut self, view: &PlotView, from: Space, to: Space) -> Result<()> {
        let origin = view.transform(self.origin, from, to)?;
        let extent = view.transform(
            self.origin + Vec2::new(self.width, self.height),
            from,
            to,
        )?;
        self.width = extent.x - origin.x;
        self.height = extent.y - origin.y;
        self.origin = origin;
        Ok(())
    }

    /// Check whether a point lies inside the (filled) rectangle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_rect().inflate(tolerance, tolerance).contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn test_jump_scales_extents() {
        let view = PlotView::new(
            Rect::new(80.0, 60.0, 720.0, 540.0),
            Size::new(800.0, 600.0),
            (0.0, 4.0),
            (-5.0, 5.0),
        );
        let mut rect = Rectangle::new(Point::new(0.1, 0.5), 0.2, 1.0);
        rect.jump(&view, Space::Data, Space::Axes).unwrap();
        assert!((rect.origin.x - 0.025).abs() < 1e-12);
        assert!((rect.origin.y - 0.55).abs() < 1e-12);
        assert!((rect.width - 0.05).abs() < 1e-12);
        assert!((rect.height - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_hit_test() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 1.0, 0.5);
        assert!(rect.hit_test(Point::new(0.5, 0.25), 0.0));
        assert!(!rect.hit_test(Point::new(1.5, 0.25), 0.0));
        assert!(rect.hit_test(Point::new(1.05, 0.25), 0.1)); // within tolerance
    }
}
