//! Annulus (elliptical ring) primitive.

use crate::error::Result;
use crate::space::{PlotView, Space};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A ring with per-axis outer radii and a constant ring width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    /// Center point.
    pub center: Point,
    /// Outer radii along x and y.
    pub radii: (f64, f64),
    /// Ring thickness, measured inward from the outer edge.
    ///
    /// Not coordinate-scaled on jumps; only the radii follow the limits.
    pub ring_width: f64,
}

impl Annulus {
    /// Create a new annulus.
    pub fn new(center: Point, radii: (f64, f64), ring_width: f64) -> Self {
        Self {
            center,
            radii,
            ring_width,
        }
    }

    /// Re-express center and radii from `from` into `to`.
    pub(crate) fn jump(&mut self, view: &PlotView, from: Space, to: Space) -> Result<()> {
        let origin = view.transform(self.center, from, to)?;
        let rim = view.transform(
            self.center + Vec2::new(self.radii.0, self.radii.1),
            from,
            to,
        )?;
        self.radii = (rim.x - origin.x, rim.y - origin.y);
        self.center = origin;
        Ok(())
    }

    /// Check whether a point lies on the ring.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let (rx, ry) = (self.radii.0.abs(), self.radii.1.abs());
        let outer_rx = rx + tolerance;
        let outer_ry = ry + tolerance;
        if outer_rx < f64::EPSILON || outer_ry < f64::EPSILON {
            return false;
        }
        let dx = (point.x - self.center.x) / outer_rx;
        let dy = (point.y - self.center.y) / outer_ry;
        if dx * dx + dy * dy > 1.0 {
            return false;
        }
        let inner_rx = (rx - self.ring_width - tolerance).max(0.0);
        let inner_ry = (ry - self.ring_width - tolerance).max(0.0);
        if inner_rx < f64::EPSILON || inner_ry < f64::EPSILON {
            return true;
        }
        let dx = (point.x - self.center.x) / inner_rx;
        let dy = (point.y - self.center.y) / inner_ry;
        dx * dx + dy * dy >= 1.0
    }
}
