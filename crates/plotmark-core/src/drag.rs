//! Drag gesture state machine.
//!
//! A [`DragController`] owns one target at a time and turns raw pointer
//! events into position updates in the target's own coordinate space. The
//! view geometry is snapshotted once per gesture, so mid-drag zoom or pan
//! cannot shear the mapping under the pointer.

use crate::error::{Error, Result};
use crate::input::{MouseButton, PointerEvent};
use crate::redraw::Redraw;
use crate::shapes::Movable;
use crate::space::{PlotView, Space};
use kurbo::Point;

/// Anything whose reference point a drag gesture can move.
pub trait Draggable {
    /// Reference point in the owning space.
    fn position(&self) -> Point;
    /// Move the reference point; translation only.
    fn set_position(&mut self, position: Point);
}

impl Draggable for Movable {
    fn position(&self) -> Point {
        Movable::position(self)
    }

    fn set_position(&mut self, position: Point) {
        Movable::set_position(self, position);
    }
}

/// Per-gesture state, alive between pointer-down and pointer-up.
struct Gesture {
    /// View geometry frozen at gesture start.
    view: PlotView,
    /// Space the target's coordinates live in.
    space: Space,
    /// Last pointer position, in the owning space.
    last: Point,
    /// Target position at gesture start; locked axes pin to it.
    start: Point,
}

/// Translates pointer events into moves of a single draggable target.
///
/// Axis locks are configured up front; requesting both at once is a caller
/// bug and is rejected before any state changes.
#[derive(Default)]
pub struct DragController {
    x_only: bool,
    y_only: bool,
    button: MouseButton,
    gesture: Option<Gesture>,
    on_begin: Option<Box<dyn FnMut()>>,
    on_move: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("x_only", &self.x_only)
            .field("y_only", &self.y_only)
            .field("button", &self.button)
            .field("dragging", &self.gesture.is_some())
            .finish()
    }
}

impl DragController {
    /// Controller with no axis locks, triggered by the left button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict movement to the x axis.
    pub fn x_only(mut self) -> Self {
        self.x_only = true;
        self
    }

    /// Restrict movement to the y axis.
    pub fn y_only(mut self) -> Self {
        self.y_only = true;
        self
    }

    /// Trigger on a different mouse button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Hook invoked when a gesture starts.
    pub fn on_begin(&mut self, hook: impl FnMut() + 'static) {
        self.on_begin = Some(Box::new(hook));
    }

    /// Hook invoked after every applied move.
    pub fn on_move(&mut self, hook: impl FnMut() + 'static) {
        self.on_move = Some(Box::new(hook));
    }

    /// Whether a gesture is in flight.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a gesture at a pointer-down position (surface pixels).
    pub fn begin(
        &mut self,
        target: &dyn Draggable,
        view: &PlotView,
        space: Space,
        pointer_px: Point,
    ) -> Result<()> {
        if self.x_only && self.y_only {
            return Err(Error::ConflictingAxisLocks);
        }
        let last = view.from_pixels(space, pointer_px);
        self.gesture = Some(Gesture {
            view: view.clone(),
            space,
            last,
            start: target.position(),
        });
        if let Some(hook) = &mut self.on_begin {
            hook();
        }
        Ok(())
    }

    /// Apply a pointer move to the target.
    ///
    /// Moves the target by the pointer delta since the previous event; a
    /// locked axis stays pinned to the gesture-start coordinate regardless
    /// of accumulated drift.
    pub fn update(&mut self, target: &mut dyn Draggable, pointer_px: Point) -> Redraw {
        let Some(gesture) = &mut self.gesture else {
            return Redraw::None;
        };
        let pointer = gesture.view.from_pixels(gesture.space, pointer_px);
        let delta = pointer - gesture.last;
        gesture.last = pointer;

        let mut next = target.position() + delta;
        if self.x_only {
            next.y = gesture.start.y;
        }
        if self.y_only {
            next.x = gesture.start.x;
        }
        target.set_position(next);
        if let Some(hook) = &mut self.on_move {
            hook();
        }
        Redraw::Soon
    }

    /// End the gesture, if any.
    pub fn finish(&mut self) {
        self.gesture = None;
    }

    /// Route a raw pointer event through the gesture state machine.
    pub fn handle_pointer(
        &mut self,
        target: &mut dyn Draggable,
        event: &PointerEvent,
        view: &PlotView,
        space: Space,
    ) -> Result<Redraw> {
        match event {
            PointerEvent::Down { position, button } if *button == self.button => {
                self.begin(target, view, space, *position)?;
                Ok(Redraw::None)
            }
            PointerEvent::Move { position } => Ok(self.update(target, *position)),
            PointerEvent::Up { button, .. } if *button == self.button => {
                self.finish();
                Ok(Redraw::None)
            }
            _ => Ok(Redraw::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Geometry};
    use kurbo::{Rect, Size};
    use std::cell::Cell;
    use std::rc::Rc;

    fn view() -> PlotView {
        PlotView::new(
            Rect::new(80.0, 60.0, 720.0, 540.0),
            Size::new(800.0, 600.0),
            (0.0, 4.0),
            (-5.0, 5.0),
        )
    }

    fn ellipse_at(x: f64, y: f64) -> Movable {
        Movable::new(
            Geometry::Ellipse(Ellipse::new(Point::new(x, y), 0.4, 0.8)),
            Space::Data,
        )
    }

    #[test]
    fn test_drag_applies_per_move_deltas() {
        let v = view();
        let mut target = ellipse_at(2.0, 0.0);
        let mut drag = DragController::new();

        // Grab at the center's pixel position, move 160 px right (1 data unit).
        let grab_px = v.to_pixels(Space::Data, Point::new(2.0, 0.0));
        drag.begin(&target, &v, Space::Data, grab_px).unwrap();
        let r = drag.update(&mut target, Point::new(grab_px.x + 160.0, grab_px.y));
        assert_eq!(r, Redraw::Soon);
        assert!((target.position().x - 3.0).abs() < 1e-9);
        assert!((target.position().y - 0.0).abs() < 1e-9);

        // A second move accumulates from the last event, not from the start.
        drag.update(&mut target, Point::new(grab_px.x + 160.0, grab_px.y + 48.0));
        assert!((target.position().x - 3.0).abs() < 1e-9);
        assert!((target.position().y - 1.0).abs() < 1e-9);
        drag.finish();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_grab_offset_is_preserved() {
        // Grabbing away from the reference point must not snap the shape
        // under the pointer.
        let v = view();
        let mut target = ellipse_at(2.0, 0.0);
        let mut drag = DragController::new();

        let grab_px = v.to_pixels(Space::Data, Point::new(2.1, 0.2));
        drag.begin(&target, &v, Space::Data, grab_px).unwrap();
        drag.update(&mut target, Point::new(grab_px.x + 160.0, grab_px.y));
        assert!((target.position().x - 3.0).abs() < 1e-9);
        assert!((target.position().y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_lock_pins_x_to_gesture_start() {
        let v = view();
        let mut target = ellipse_at(2.0, 0.0);
        let mut drag = DragController::new().y_only();

        let grab_px = v.to_pixels(Space::Data, Point::new(2.0, 0.0));
        drag.begin(&target, &v, Space::Data, grab_px).unwrap();
        drag.update(&mut target, Point::new(grab_px.x + 100.0, grab_px.y + 48.0));
        drag.update(&mut target, Point::new(grab_px.x + 200.0, grab_px.y + 96.0));
        assert!((target.position().x - 2.0).abs() < 1e-9);
        assert!((target.position().y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_conflicting_locks_rejected() {
        let v = view();
        let target = ellipse_at(2.0, 0.0);
        let mut drag = DragController::new().x_only().y_only();
        let err = drag
            .begin(&target, &v, Space::Data, Point::new(400.0, 300.0))
            .unwrap_err();
        assert_eq!(err, Error::ConflictingAxisLocks);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_view_snapshot_survives_limit_change() {
        let v = view();
        let mut target = ellipse_at(2.0, 0.0);
        let mut drag = DragController::new();

        let grab_px = v.to_pixels(Space::Data, Point::new(2.0, 0.0));
        drag.begin(&target, &v, Space::Data, grab_px).unwrap();
        // The host zooms mid-gesture; updates still use the start-of-gesture
        // mapping, so 160 px is still one data unit.
        drag.update(&mut target, Point::new(grab_px.x + 160.0, grab_px.y));
        assert!((target.position().x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_event_routing() {
        let v = view();
        let mut target = ellipse_at(2.0, 0.0);
        let mut drag = DragController::new();
        let moved = Rc::new(Cell::new(0u32));
        let counter = moved.clone();
        drag.on_move(move || counter.set(counter.get() + 1));

        let grab_px = v.to_pixels(Space::Data, Point::new(2.0, 0.0));
        let down = PointerEvent::Down {
            position: grab_px,
            button: MouseButton::Left,
        };
        drag.handle_pointer(&mut target, &down, &v, Space::Data).unwrap();
        assert!(drag.is_dragging());

        let mv = PointerEvent::Move {
            position: Point::new(grab_px.x + 80.0, grab_px.y),
        };
        let r = drag.handle_pointer(&mut target, &mv, &v, Space::Data).unwrap();
        assert_eq!(r, Redraw::Soon);
        assert_eq!(moved.get(), 1);

        let up = PointerEvent::Up {
            position: Point::new(grab_px.x + 80.0, grab_px.y),
            button: MouseButton::Left,
        };
        drag.handle_pointer(&mut target, &up, &v, Space::Data).unwrap();
        assert!(!drag.is_dragging());

        // A move without an active gesture is a no-op.
        let r = drag.handle_pointer(&mut target, &mv, &v, Space::Data).unwrap();
        assert_eq!(r, Redraw::None);

        // The wrong button never starts a gesture.
        let right = PointerEvent::Down {
            position: grab_px,
            button: MouseButton::Right,
        };
        drag.handle_pointer(&mut target, &right, &v, Space::Data).unwrap();
        assert!(!drag.is_dragging());
    }
}
