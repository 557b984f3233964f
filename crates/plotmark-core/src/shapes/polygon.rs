//! Polygon primitive.

use super::{point_to_polyline_dist, rotate_vec};
use crate::error::Result;
use crate::space::{PlotView, Space};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A closed polygon anchored at its first vertex.
///
/// The vertex deltas from the anchor are cached so position changes are pure
/// translations; the cache is recomputed after every rotation or jump, never
/// during a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
    offsets: Vec<Vec2>,
}

impl Polygon {
    /// Create a polygon from its vertices (first vertex is the anchor).
    pub fn new(vertices: Vec<Point>) -> Self {
        let offsets = Self::offsets_of(&vertices);
        Self { vertices, offsets }
    }

    fn offsets_of(vertices: &[Point]) -> Vec<Vec2> {
        let anchor = vertices.first().copied().unwrap_or(Point::ZERO);
        vertices.iter().map(|v| *v - anchor).collect()
    }

    /// The vertices in the polygon's current space.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Anchor vertex.
    pub fn position(&self) -> Point {
        self.vertices.first().copied().unwrap_or(Point::ZERO)
    }

    /// Translate the polygon so the anchor lands on `p`.
    pub fn set_position(&mut self, p: Point) {
        for (vertex, offset) in self.vertices.iter_mut().zip(&self.offsets) {
            *vertex = p + *offset;
        }
    }

    /// Replace the vertex list, re-deriving the offset cache.
    pub fn set_vertices(&mut self, vertices: Vec<Point>) {
        self.offsets = Self::offsets_of(&vertices);
        self.vertices = vertices;
    }

    /// Rotate the cached offsets by an increment around the anchor.
    pub(crate) fn rotate_by(&mut self, delta_deg: f64) {
        let anchor = self.position();
        for (vertex, offset) in self.vertices.iter_mut().zip(self.offsets.iter_mut()) {
            *offset = rotate_vec(*offset, delta_deg);
            *vertex = anchor + *offset;
        }
    }

    /// Re-express every vertex from `from` into `to` and rebuild the cache.
    pub(crate) fn jump(&mut self, view: &PlotView, from: Space, to: Space) -> Result<()> {
        for vertex in &mut self.vertices {
            *vertex = view.transform(*vertex, from, to)?;
        }
        self.offsets = Self::offsets_of(&self.vertices);
        Ok(())
    }

    /// Check whether a point lies inside or near the boundary.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.contains(point) {
            return true;
        }
        if self.vertices.len() < 2 || tolerance <= 0.0 {
            return false;
        }
        let mut ring = self.vertices.clone();
        ring.push(self.vertices[0]);
        point_to_polyline_dist(point, &ring) <= tolerance
    }

    /// Even-odd ray-casting containment test.
    fn contains(&self, point: Point) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[j]);
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Point::new(0.2, 0.4),
            Point::new(0.4, 0.4),
            Point::new(0.3, 0.6),
        ])
    }

    #[test]
    fn test_set_position_translates_all_vertices() {
        let mut tri = triangle();
        tri.set_position(Point::new(1.2, 1.4));
        let v = tri.vertices();
        assert!((v[0].x - 1.2).abs() < 1e-12);
        assert!((v[1].x - 1.4).abs() < 1e-12);
        assert!((v[2].y - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_offsets_survive_repeated_moves() {
        let mut tri = triangle();
        tri.set_position(Point::new(5.0, 5.0));
        tri.set_position(Point::new(0.2, 0.4));
        let original = triangle();
        for (a, b) in tri.vertices().iter().zip(original.vertices()) {
            assert!((a.x - b.x).abs() < 1e-12);
            assert!((a.y - b.y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rotation_keeps_anchor_fixed() {
        let mut tri = triangle();
        tri.rotate_by(90.0);
        let anchor = tri.position();
        assert!((anchor.x - 0.2).abs() < 1e-12);
        assert!((anchor.y - 0.4).abs() < 1e-12);
        // Second vertex was 0.2 to the right; after +90° it is 0.2 up.
        let v1 = tri.vertices()[1];
        assert!((v1.x - 0.2).abs() < 1e-9);
        assert!((v1.y - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_contains() {
        let tri = triangle();
        assert!(tri.hit_test(Point::new(0.3, 0.45), 0.0));
        assert!(!tri.hit_test(Point::new(0.1, 0.45), 0.0));
        // Near an edge, only with tolerance.
        assert!(!tri.hit_test(Point::new(0.3, 0.39), 0.0));
        assert!(tri.hit_test(Point::new(0.3, 0.39), 0.02));
    }
}
