//! Ellipse and circle primitives.

use crate::error::Result;
use crate::space::{PlotView, Space};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// An ellipse described by its center and full extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center point.
    pub center: Point,
    /// Full width along x.
    pub width: f64,
    /// Full height along y.
    pub height: f64,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Re-express center and extents from `from` into `to`.
    ///
    /// The extents are carried as the offset point (center + (w, h)); its
    /// image minus the image of the center gives the new extents exactly
    /// under the linear limit mapping.
    pub(crate) fn jump(&mut self, view: &PlotView, from: Space, to: Space) -> Result<()> {
        let origin = view.transform(self.center, from, to)?;
        let extent = view.transform(
            self.center + Vec2::new(self.width, self.height),
            from,
            to,
        )?;
        self.width = extent.x - origin.x;
        self.height = extent.y - origin.y;
        self.center = origin;
        Ok(())
    }

    /// Check whether a point lies inside the (filled) ellipse.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rx = self.width.abs() / 2.0 + tolerance;
        let ry = self.height.abs() / 2.0 + tolerance;
        if rx < f64::EPSILON || ry < f64::EPSILON {
            return false;
        }
        let dx = (point.x - self.center.x) / rx;
        let dy = (point.y - self.center.y) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

/// A circle; closed under domain jumps by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Re-express center and radius from `from` into `to`.
    ///
    /// The radius follows the x-axis scale so the kind stays a circle and
    /// the jump round-trips.
    pub(crate) fn jump(&mut self, view: &PlotView, from: Space, to: Space) -> Result<()> {
        let origin = view.transform(self.center, from, to)?;
        let rim = view.transform(self.center + Vec2::new(self.radius, 0.0), from, to)?;
        self.radius = rim.x - origin.x;
        self.center = origin;
        Ok(())
    }

    /// Check whether a point lies inside the (filled) circle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.center).hypot() <= self.radius.abs() + tolerance
    }
}
