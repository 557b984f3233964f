//! Paired measurement cursors with a live readout.
//!
//! A [`CursorPair`] is two parallel lines pinned to one axis. Dragging a
//! cursor updates the readout text; in locked mode the partner follows at a
//! fixed offset captured when the gesture starts. All cursor moves request
//! an immediate redraw so the readout never lags the line under the pointer.

use crate::drag::Draggable;
use crate::redraw::Redraw;
use crate::space::PlotView;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Fraction of the visible x range the recentered cursors spread from mid.
pub const X_CENTER_SPREAD: f64 = 0.05;
/// Fraction of the visible y range the recentered cursors spread from mid.
pub const Y_CENTER_SPREAD: f64 = 0.1;

/// Readout clicks in the lower half right of this split act on the icons.
const READOUT_ICON_SPLIT: f64 = 0.5;
/// Readout clicks right of this split recenter; between the splits they
/// toggle the lock. Compatibility values carried over from the original tool.
const READOUT_RECENTER_SPLIT: f64 = 0.75;

/// The axis a cursor measures along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Names the two cursors of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorId {
    First,
    Second,
}

impl CursorId {
    fn partner(self) -> CursorId {
        match self {
            CursorId::First => CursorId::Second,
            CursorId::Second => CursorId::First,
        }
    }
}

/// A single measurement line, vertical (x axis) or horizontal (y axis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Axis the cursor measures along.
    pub axis: Axis,
    /// Data coordinate on that axis.
    value: f64,
    /// Label drawn next to the line.
    pub label: String,
    visible: bool,
}

impl Cursor {
    /// Create a cursor at a data coordinate.
    pub fn new(axis: Axis, value: f64, label: impl Into<String>) -> Self {
        Self {
            axis,
            value,
            label: label.into(),
            visible: true,
        }
    }

    /// Current data coordinate.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move the cursor to a data coordinate.
    pub fn set_value(&mut self, value: f64) -> Redraw {
        if value == self.value {
            return Redraw::None;
        }
        self.value = value;
        Redraw::Now
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the cursor is shown and lies inside the visible data window.
    ///
    /// A hidden cursor is never in-window; collaborators use this to skip
    /// stats for cursors the user cannot see.
    pub fn in_window(&self, view: &PlotView) -> bool {
        if !self.visible {
            return false;
        }
        match self.axis {
            Axis::X => view.contains_x(self.value),
            Axis::Y => view.contains_y(self.value),
        }
    }
}

impl Draggable for Cursor {
    fn position(&self) -> Point {
        match self.axis {
            Axis::X => Point::new(self.value, 0.0),
            Axis::Y => Point::new(0.0, self.value),
        }
    }

    /// Only the measured axis is read; the cross coordinate is ignored.
    fn set_position(&mut self, position: Point) {
        self.value = match self.axis {
            Axis::X => position.x,
            Axis::Y => position.y,
        };
    }
}

/// The draggable text box carrying the readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadoutFrame {
    /// Anchor position in axes fractions.
    pub position: Point,
    /// Whether the box is drawn.
    pub visible: bool,
}

impl ReadoutFrame {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            visible: true,
        }
    }
}

impl Draggable for ReadoutFrame {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// Offset captured at gesture start for locked movement.
#[derive(Debug, Clone, Copy)]
struct PairGesture {
    active: CursorId,
    /// active value − partner value at pointer-down.
    offset: f64,
}

/// Two cursors on the same axis with a delta readout.
pub struct CursorPair {
    /// Axis both cursors measure along.
    pub axis: Axis,
    first: Cursor,
    second: Cursor,
    locked: bool,
    visible: bool,
    gesture: Option<PairGesture>,
    /// The readout text box.
    pub readout: ReadoutFrame,
}

impl std::fmt::Debug for CursorPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorPair")
            .field("axis", &self.axis)
            .field("first", &self.first.value)
            .field("second", &self.second.value)
            .field("locked", &self.locked)
            .field("visible", &self.visible)
            .finish()
    }
}

impl CursorPair {
    /// Create a pair at two data coordinates.
    pub fn new(axis: Axis, first: f64, second: f64) -> Self {
        let (lab1, lab2) = match axis {
            Axis::X => ("x1", "x2"),
            Axis::Y => ("y1", "y2"),
        };
        Self {
            axis,
            first: Cursor::new(axis, first, lab1),
            second: Cursor::new(axis, second, lab2),
            locked: false,
            visible: true,
            gesture: None,
            readout: ReadoutFrame::new(Point::new(0.02, 0.9)),
        }
    }

    /// Start locked: dragging either cursor carries the other along.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn cursor(&self, id: CursorId) -> &Cursor {
        match id {
            CursorId::First => &self.first,
            CursorId::Second => &self.second,
        }
    }

    fn cursor_mut(&mut self, id: CursorId) -> &mut Cursor {
        match id {
            CursorId::First => &mut self.first,
            CursorId::Second => &mut self.second,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Signed separation: second − first, sign flipped on the y axis so the
    /// readout grows downward like the original oscilloscope convention.
    pub fn delta(&self) -> f64 {
        let dt = self.second.value - self.first.value;
        match self.axis {
            Axis::X => dt,
            Axis::Y => -dt,
        }
    }

    /// Start dragging one cursor, capturing the partner offset.
    ///
    /// The offset is captured here, not at move time, so a locked pair keeps
    /// the separation it had at pointer-down for the whole gesture.
    pub fn begin_drag(&mut self, id: CursorId) {
        let offset = self.cursor(id).value() - self.cursor(id.partner()).value();
        self.gesture = Some(PairGesture { active: id, offset });
    }

    /// Move the active cursor to a data coordinate.
    ///
    /// A move landing on the current value changes nothing and requests
    /// nothing.
    pub fn drag_to(&mut self, value: f64) -> Redraw {
        let Some(gesture) = self.gesture else {
            return Redraw::None;
        };
        let mut redraw = self.cursor_mut(gesture.active).set_value(value);
        if self.locked {
            let partner = value - gesture.offset;
            redraw = redraw.merge(self.cursor_mut(gesture.active.partner()).set_value(partner));
        }
        redraw
    }

    /// End the gesture, if any.
    pub fn end_drag(&mut self) {
        self.gesture = None;
    }

    /// Two-line readout text, monospace-aligned by character count.
    pub fn readout_text(&self) -> String {
        let (axis_char, icon_center, icon_locked, icon_free) = match self.axis {
            Axis::X => ('x', ">‖<", "[‖]", "[|]"),
            Axis::Y => ('y', ">=<", "[=]", "[―]"),
        };
        let num1 = format!("{:.4}", self.first.value);
        let num2 = format!("{:.4}", self.second.value);
        let add_dt = format!("∆{axis_char} = {:.4}", self.delta());

        let lock = if self.locked { icon_locked } else { icon_free };
        let icons = pad_left(icon_center, char_len(&add_dt));
        let icons: String = lock.chars().chain(icons.chars().skip(3)).collect();

        let ln1 = format!("{axis_char}1 = {num1}");
        let ln2 = format!("{axis_char}2 = {num2}");
        let width = char_len(&ln1).max(char_len(&ln2)) + 2;
        format!("{}{add_dt}\n{}{icons}", pad_right(&ln1, width), pad_right(&ln2, width))
    }

    /// Handle a click inside the readout box.
    ///
    /// Coordinates are normalized to the box. The icon strip occupies the
    /// lower-right quadrant: the far right recenters both cursors, the strip
    /// left of it toggles the lock. Clicks elsewhere are ignored.
    pub fn handle_readout_click(&mut self, x_norm: f64, y_norm: f64, view: &PlotView) -> Redraw {
        if y_norm >= READOUT_ICON_SPLIT || x_norm <= READOUT_ICON_SPLIT {
            return Redraw::None;
        }
        if x_norm > READOUT_RECENTER_SPLIT {
            self.recenter(view);
        } else {
            self.locked = !self.locked;
        }
        Redraw::Now
    }

    /// Pull both cursors back to the middle of the visible window.
    ///
    /// The y pair comes back in swapped order so the first cursor sits above
    /// the second, matching how horizontal cursors read.
    pub fn recenter(&mut self, view: &PlotView) {
        let (spread, (lo, hi)) = match self.axis {
            Axis::X => (X_CENTER_SPREAD, view.x_range()),
            Axis::Y => (Y_CENTER_SPREAD, view.y_range()),
        };
        let range = hi - lo;
        let mid = lo + range / 2.0;
        let (a, b) = (mid - range * spread, mid + range * spread);
        match self.axis {
            Axis::X => {
                self.first.set_value(a);
                self.second.set_value(b);
            }
            Axis::Y => {
                self.first.set_value(b);
                self.second.set_value(a);
            }
        }
    }

    /// Whether the pair is shown and both cursors lie inside the visible
    /// data window.
    pub fn in_window(&self, view: &PlotView) -> bool {
        self.visible && self.first.in_window(view) && self.second.in_window(view)
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the pair (lines, labels and readout together).
    pub fn set_visible(&mut self, visible: bool) -> Redraw {
        if self.visible == visible {
            return Redraw::None;
        }
        self.visible = visible;
        self.first.set_visible(visible);
        self.second.set_visible(visible);
        self.readout.visible = visible;
        Redraw::Now
    }

    pub fn toggle_visible(&mut self) -> Redraw {
        self.set_visible(!self.visible)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, width: usize) -> String {
    let mut out = s.to_owned();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(char_len(s))));
    out
}

fn pad_left(s: &str, width: usize) -> String {
    let mut out = " ".repeat(width.saturating_sub(char_len(s)));
    out.push_str(s);
    out
}
