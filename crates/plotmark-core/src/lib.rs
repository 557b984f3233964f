//! Interactive annotation layer for 2-D plots.
//!
//! Provides the state machines behind draggable annotation primitives,
//! paired measurement cursors with a live readout, checkbox groups with
//! exclusive-choice semantics and an interactive legend. Everything here is
//! host-agnostic: the embedding surface feeds pointer and key events in,
//! reads positions and emphasis values out, and schedules redraws from the
//! returned [`Redraw`] requests.

pub mod checkbox;
pub mod cursor;
pub mod drag;
pub mod error;
pub mod input;
pub mod legend;
pub mod redraw;
pub mod shapes;
pub mod space;

pub use checkbox::{CheckboxEntry, CheckboxGroup};
pub use cursor::{Axis, Cursor, CursorId, CursorPair, ReadoutFrame};
pub use drag::{DragController, Draggable};
pub use error::{Error, Result};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use legend::{Emphasis, EmphasisTable, FocusState, LegendEntry, LegendFocus, Selector};
pub use redraw::Redraw;
pub use shapes::{
    Annulus, Arrow, Circle, Ellipse, Geometry, Grab, Movable, Polygon, PrimitiveId, Rectangle,
    ShapeStyle, Wedge,
};
pub use space::{PlotView, Space};
