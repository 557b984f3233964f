//! Movable annotation primitives.
//!
//! Each geometric kind lives in its own file and carries only the fields it
//! needs; [`Geometry`] wraps them as tagged variants and [`Movable`] adds the
//! shared interaction state: coordinate space tag, jump capability, absolute
//! rotation angle and visibility. All dispatch goes through the single
//! position/angle/jump interface rather than per-kind call sites.

mod annulus;
mod arrow;
mod ellipse;
mod polygon;
mod rectangle;
mod wedge;

pub use annulus::Annulus;
pub use arrow::{Arrow, Grab};
pub use ellipse::{Circle, Ellipse};
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use wedge::Wedge;

use crate::error::Result;
use crate::space::{PlotView, Space};
use kurbo::{Point, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Static style attributes, set by the property-edit dialogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
}

impl ShapeStyle {
    /// Get the stroke color with opacity applied.
    pub fn stroke_with_opacity(&self) -> Color {
        let color: Color = self.stroke_color.into();
        let rgba = color.to_rgba8();
        let alpha = (rgba.a as f64 * self.opacity) as u8;
        Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
    }

    /// Get the fill color with opacity applied.
    pub fn fill_with_opacity(&self) -> Option<Color> {
        self.fill_color.map(|c| {
            let color: Color = c.into();
            let rgba = color.to_rgba8();
            let alpha = (rgba.a as f64 * self.opacity) as u8;
            Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
        })
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Set the fill color from a peniko Color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(|c| c.into());
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
            opacity: 1.0,
        }
    }
}

/// Unique identifier for primitives.
pub type PrimitiveId = Uuid;

/// Rotate a vector by an angle in degrees.
pub(crate) fn rotate_vec(v: Vec2, deg: f64) -> Vec2 {
    let rad = deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Distance from a point to a line segment (a→b).
pub(crate) fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub(crate) fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Tagged geometry payload, one variant per primitive kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Ellipse(Ellipse),
    Circle(Circle),
    Annulus(Annulus),
    Wedge(Wedge),
    Rectangle(Rectangle),
    Polygon(Polygon),
    Arrow(Arrow),
}

impl Geometry {
    /// The reference point: center for ellipse/circle/annulus/wedge, first
    /// vertex for rectangle/polygon, grab-dependent anchor for arrows.
    pub fn position(&self) -> Point {
        match self {
            Geometry::Ellipse(s) => s.center,
            Geometry::Circle(s) => s.center,
            Geometry::Annulus(s) => s.center,
            Geometry::Wedge(s) => s.center,
            Geometry::Rectangle(s) => s.origin,
            Geometry::Polygon(s) => s.position(),
            Geometry::Arrow(s) => s.position(),
        }
    }

    /// Translate the primitive so the reference point lands on `p`.
    ///
    /// This is a translation only; cached offsets (polygon vertex deltas,
    /// arrow end offsets) are preserved, never re-derived.
    pub fn set_position(&mut self, p: Point) {
        match self {
            Geometry::Ellipse(s) => s.center = p,
            Geometry::Circle(s) => s.center = p,
            Geometry::Annulus(s) => s.center = p,
            Geometry::Wedge(s) => s.center = p,
            Geometry::Rectangle(s) => s.origin = p,
            Geometry::Polygon(s) => s.set_position(p),
            Geometry::Arrow(s) => s.set_position(p),
        }
    }

    /// Apply an incremental rotation (degrees) around the reference point.
    ///
    /// Parametric kinds keep their rotation in the wrapper's stored angle,
    /// which the renderer applies; only kinds whose coordinates encode the
    /// rotation mutate geometry here.
    fn rotate_by(&mut self, delta_deg: f64) {
        match self {
            Geometry::Ellipse(_)
            | Geometry::Circle(_)
            | Geometry::Annulus(_)
            | Geometry::Rectangle(_) => {}
            Geometry::Wedge(s) => s.rotate_by(delta_deg),
            Geometry::Polygon(s) => s.rotate_by(delta_deg),
            Geometry::Arrow(s) => s.rotate_by(delta_deg),
        }
    }

    /// Re-express every stored coordinate from `from` into `to`.
    fn jump(&mut self, view: &PlotView, from: Space, to: Space) -> Result<()> {
        match self {
            Geometry::Ellipse(s) => s.jump(view, from, to),
            Geometry::Circle(s) => s.jump(view, from, to),
            Geometry::Annulus(s) => s.jump(view, from, to),
            // Wedge is not jumpable; Movable::jump_to never dispatches here.
            Geometry::Wedge(_) => Ok(()),
            Geometry::Rectangle(s) => s.jump(view, from, to),
            Geometry::Polygon(s) => s.jump(view, from, to),
            Geometry::Arrow(s) => s.jump(view, from, to),
        }
    }

    /// Hit test in the primitive's own coordinate space.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Geometry::Ellipse(s) => s.hit_test(point, tolerance),
            Geometry::Circle(s) => s.hit_test(point, tolerance),
            Geometry::Annulus(s) => s.hit_test(point, tolerance),
            Geometry::Wedge(s) => s.hit_test(point, tolerance),
            Geometry::Rectangle(s) => s.hit_test(point, tolerance),
            Geometry::Polygon(s) => s.hit_test(point, tolerance),
            Geometry::Arrow(s) => s.hit_test(point, tolerance),
        }
    }

    /// Whether this kind can re-express its geometry in another space.
    ///
    /// Fixed per kind: the wedge's sweep angles have no meaning under the
    /// anisotropic data/axes scaling, so it only supports the value-only
    /// position substitution.
    fn jumper(&self) -> bool {
        !matches!(self, Geometry::Wedge(_))
    }
}

/// A positioned, rotatable primitive bound to one coordinate space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movable {
    id: PrimitiveId,
    /// Kind-specific geometry.
    pub geometry: Geometry,
    space: Space,
    jumper: bool,
    angle_deg: f64,
    visible: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Movable {
    /// Create a primitive in the given space.
    pub fn new(geometry: Geometry, space: Space) -> Self {
        let jumper = geometry.jumper();
        Self {
            id: Uuid::new_v4(),
            geometry,
            space,
            jumper,
            angle_deg: 0.0,
            visible: true,
            style: ShapeStyle::default(),
        }
    }

    /// Create a primitive with an initial rotation.
    pub fn with_angle(geometry: Geometry, space: Space, angle_deg: f64) -> Self {
        let mut movable = Self::new(geometry, space);
        movable.set_angle(angle_deg);
        movable
    }

    pub fn id(&self) -> PrimitiveId {
        self.id
    }

    /// The space the geometry is currently expressed in.
    pub fn space(&self) -> Space {
        self.space
    }

    /// Whether [`Movable::jump_to`] re-expresses the full geometry.
    pub fn can_jump(&self) -> bool {
        self.jumper
    }

    /// Reference point in the current space.
    pub fn position(&self) -> Point {
        self.geometry.position()
    }

    /// Move the reference point; translation only.
    pub fn set_position(&mut self, p: Point) {
        self.geometry.set_position(p);
    }

    /// Absolute rotation angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle_deg
    }

    /// Rotate to an absolute angle.
    ///
    /// Applies only the increment against the previously stored angle, so
    /// repeated calls do not compound drift.
    pub fn set_angle(&mut self, angle_deg: f64) {
        let delta = angle_deg - self.angle_deg;
        self.geometry.rotate_by(delta);
        self.angle_deg = angle_deg;
    }

    /// Re-express the stored geometry in `target` and retag the primitive.
    ///
    /// Non-jumpable kinds only remap the reference point (value-only
    /// substitution); the caller owns rebinding the render transform. A
    /// figure-space primitive is rejected, as is any jump to figure space.
    pub fn jump_to(&mut self, target: Space, view: &PlotView) -> Result<()> {
        if target == self.space {
            return Ok(());
        }
        if self.jumper {
            self.geometry.jump(view, self.space, target)?;
        } else {
            let p = view.transform(self.position(), self.space, target)?;
            self.geometry.set_position(p);
        }
        self.space = target;
        Ok(())
    }

    /// Hit test against the geometry in its own space.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.visible && self.geometry.hit_test(point, tolerance)
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Hide the primitive; this is the deletion policy and is irreversible
    /// from the user's point of view.
    ///
    /// Returns whether anything changed. Hiding an already-hidden primitive
    /// is reported and swallowed so the interaction loop stays alive.
    pub fn hide(&mut self) -> bool {
        if !self.visible {
            log::warn!("primitive {} already hidden; nothing to remove", self.id);
            return false;
        }
        self.visible = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};

    fn view() -> PlotView {
        PlotView::new(
            Rect::new(80.0, 60.0, 720.0, 540.0),
            Size::new(800.0, 600.0),
            (0.0, 4.0),
            (-5.0, 5.0),
        )
    }

    #[test]
    fn test_ellipse_jump_scenario() {
        // Center (2.2, 2.5), width 0.1, height 1.0, limits x∈[0,4], y∈[-5,5].
        let mut elli = Movable::new(
            Geometry::Ellipse(Ellipse::new(Point::new(2.2, 2.5), 0.1, 1.0)),
            Space::Data,
        );
        elli.jump_to(Space::Axes, &view()).unwrap();
        assert_eq!(elli.space(), Space::Axes);
        let p = elli.position();
        assert!((p.x - 0.55).abs() < 1e-12);
        assert!((p.y - 0.75).abs() < 1e-12);
        if let Geometry::Ellipse(e) = &elli.geometry {
            assert!((e.width - 0.025).abs() < 1e-12);
            assert!((e.height - 0.1).abs() < 1e-12);
        } else {
            panic!("expected Ellipse geometry");
        }
    }

    #[test]
    fn test_jump_roundtrip_all_kinds() {
        let v = view();
        let kinds = vec![
            Geometry::Ellipse(Ellipse::new(Point::new(1.0, 2.0), 0.4, 0.8)),
            Geometry::Circle(Circle::new(Point::new(0.5, -1.0), 0.3)),
            Geometry::Annulus(Annulus::new(Point::new(2.0, 0.0), (0.5, 0.7), 0.1)),
            Geometry::Rectangle(Rectangle::new(Point::new(0.4, 0.4), 1.0, 2.0)),
            Geometry::Polygon(Polygon::new(vec![
                Point::new(0.2, 0.4),
                Point::new(0.4, 0.4),
                Point::new(0.3, 0.6),
            ])),
            Geometry::Arrow(Arrow::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0))),
        ];
        for geometry in kinds {
            let original = geometry.clone();
            let mut movable = Movable::new(geometry, Space::Data);
            movable.jump_to(Space::Axes, &v).unwrap();
            movable.jump_to(Space::Data, &v).unwrap();
            assert_geometry_close(&original, &movable.geometry);
        }
    }

    fn assert_point_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9, "{a:?} vs {b:?}");
        assert!((a.y - b.y).abs() < 1e-9, "{a:?} vs {b:?}");
    }

    /// Full-geometry comparison: reference point and every size parameter.
    fn assert_geometry_close(a: &Geometry, b: &Geometry) {
        match (a, b) {
            (Geometry::Ellipse(a), Geometry::Ellipse(b)) => {
                assert_point_close(a.center, b.center);
                assert!((a.width - b.width).abs() < 1e-9);
                assert!((a.height - b.height).abs() < 1e-9);
            }
            (Geometry::Circle(a), Geometry::Circle(b)) => {
                assert_point_close(a.center, b.center);
                assert!((a.radius - b.radius).abs() < 1e-9);
            }
            (Geometry::Annulus(a), Geometry::Annulus(b)) => {
                assert_point_close(a.center, b.center);
                assert!((a.radii.0 - b.radii.0).abs() < 1e-9);
                assert!((a.radii.1 - b.radii.1).abs() < 1e-9);
                assert!((a.ring_width - b.ring_width).abs() < 1e-9);
            }
            (Geometry::Wedge(a), Geometry::Wedge(b)) => {
                assert_point_close(a.center, b.center);
                assert!((a.radius - b.radius).abs() < 1e-9);
                assert!((a.theta1 - b.theta1).abs() < 1e-9);
                assert!((a.theta2 - b.theta2).abs() < 1e-9);
            }
            (Geometry::Rectangle(a), Geometry::Rectangle(b)) => {
                assert_point_close(a.origin, b.origin);
                assert!((a.width - b.width).abs() < 1e-9);
                assert!((a.height - b.height).abs() < 1e-9);
            }
            (Geometry::Polygon(a), Geometry::Polygon(b)) => {
                assert_eq!(a.vertices().len(), b.vertices().len());
                for (va, vb) in a.vertices().iter().zip(b.vertices()) {
                    assert_point_close(*va, *vb);
                }
            }
            (Geometry::Arrow(a), Geometry::Arrow(b)) => {
                assert_point_close(a.tail, b.tail);
                assert_point_close(a.head, b.head);
            }
            (a, b) => panic!("kind changed: {a:?} vs {b:?}"),
        }
    }

    #[test]
    fn test_figure_primitive_cannot_jump() {
        let mut elli = Movable::new(
            Geometry::Ellipse(Ellipse::new(Point::new(0.1, 0.1), 0.15, 0.1)),
            Space::Figure,
        );
        let err = elli.jump_to(Space::Data, &view()).unwrap_err();
        assert_eq!(
            err,
            crate::error::Error::NoJumpPath {
                from: Space::Figure,
                to: Space::Data
            }
        );
        // The geometry is untouched after a rejected jump.
        assert_eq!(elli.space(), Space::Figure);
        assert!((elli.position().x - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wedge_jump_is_position_only() {
        let v = view();
        let mut wedge = Movable::new(
            Geometry::Wedge(Wedge::new(Point::new(2.0, 0.0), 0.1, -135.0, 135.0, Some(0.05))),
            Space::Data,
        );
        assert!(!wedge.can_jump());
        wedge.jump_to(Space::Axes, &v).unwrap();
        assert_eq!(wedge.space(), Space::Axes);
        let p = wedge.position();
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 0.5).abs() < 1e-12);
        if let Geometry::Wedge(w) = &wedge.geometry {
            // Secondary geometry untouched.
            assert!((w.radius - 0.1).abs() < f64::EPSILON);
            assert!((w.theta1 + 135.0).abs() < f64::EPSILON);
        } else {
            panic!("expected Wedge geometry");
        }
    }

    #[test]
    fn test_set_angle_applies_increment() {
        let base = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.5, 1.0),
        ]);
        let mut stepped = Movable::new(Geometry::Polygon(base.clone()), Space::Axes);
        stepped.set_angle(30.0);
        stepped.set_angle(90.0);

        let mut direct = Movable::new(Geometry::Polygon(base), Space::Axes);
        direct.set_angle(90.0);

        let (Geometry::Polygon(a), Geometry::Polygon(b)) = (&stepped.geometry, &direct.geometry)
        else {
            panic!("expected Polygon geometry");
        };
        for (pa, pb) in a.vertices().iter().zip(b.vertices()) {
            assert!((pa.x - pb.x).abs() < 1e-9);
            assert!((pa.y - pb.y).abs() < 1e-9);
        }
        assert!((stepped.angle() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parametric_angle_is_stored_only() {
        let mut elli = Movable::new(
            Geometry::Ellipse(Ellipse::new(Point::new(0.5, 0.5), 0.2, 0.1)),
            Space::Axes,
        );
        elli.set_angle(15.0);
        assert!((elli.angle() - 15.0).abs() < f64::EPSILON);
        // Center does not move.
        assert!((elli.position().x - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hide_is_terminal() {
        let mut rect = Movable::new(
            Geometry::Rectangle(Rectangle::new(Point::new(0.4, 0.4), 0.1, 0.1)),
            Space::Axes,
        );
        assert!(rect.hide());
        assert!(!rect.visible());
        assert!(!rect.hide());
        assert!(!rect.hit_test(Point::new(0.45, 0.45), 0.0));
    }

    #[test]
    fn test_movable_serde_roundtrip() {
        let arrow = Movable::new(
            Geometry::Arrow(Arrow::new(Point::new(0.0, 0.0), Point::new(1.0, 0.5))),
            Space::Data,
        );
        let json = serde_json::to_string(&arrow).unwrap();
        let back: Movable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), arrow.id());
        assert_eq!(back.space(), Space::Data);
        assert_eq!(back.geometry, arrow.geometry);
    }
}
