//! Coordinate spaces and the host surface's transform service.
//!
//! Three spaces exist on the plotting surface:
//!
//! - **Data**: tied to plotted values; its pixel mapping changes with every
//!   zoom or pan.
//! - **Axes**: normalized view space, 0..1 across the axes rectangle,
//!   independent of zoom.
//! - **Figure**: 0..1 across the whole drawing surface, independent of any
//!   sub-plot.
//!
//! [`PlotView`] is read from the host at call time and never cached by
//! components, so mappings always reflect the current axis limits.

use crate::error::{Error, Result};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Tag identifying a coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Space {
    /// Whole drawing surface, 0..1 each axis.
    Figure,
    /// Normalized view space of the axes rectangle, 0..1 each axis.
    Axes,
    /// Plotted data values.
    Data,
}

/// The host surface's current geometry.
///
/// Surface pixel coordinates have their origin at the lower-left corner of
/// the figure with y increasing upward, matching the host's event
/// coordinates. `viewport` is the axes rectangle expressed in those pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotView {
    /// Axes rectangle in surface pixels.
    pub viewport: Rect,
    /// Full figure size in pixels.
    pub figure_size: Size,
    /// Current data limits along x.
    pub x_lim: (f64, f64),
    /// Current data limits along y.
    pub y_lim: (f64, f64),
}

impl PlotView {
    /// Create a view snapshot from the host's current state.
    pub fn new(viewport: Rect, figure_size: Size, x_lim: (f64, f64), y_lim: (f64, f64)) -> Self {
        Self {
            viewport,
            figure_size,
            x_lim,
            y_lim,
        }
    }

    /// Map a point between spaces using the current axis limits.
    ///
    /// Identity when `from == to`. Figure space has no relation to the data
    /// limits, so any figure ↔ other-space request is rejected.
    pub fn transform(&self, point: Point, from: Space, to: Space) -> Result<Point> {
        match (from, to) {
            (f, t) if f == t => Ok(point),
            (Space::Data, Space::Axes) => Ok(self.data_to_axes(point)),
            (Space::Axes, Space::Data) => Ok(self.axes_to_data(point)),
            (from, to) => Err(Error::NoJumpPath { from, to }),
        }
    }

    /// Data point to normalized axes fractions.
    pub fn data_to_axes(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.x_lim.0) / (self.x_lim.1 - self.x_lim.0),
            (p.y - self.y_lim.0) / (self.y_lim.1 - self.y_lim.0),
        )
    }

    /// Normalized axes fractions to a data point.
    pub fn axes_to_data(&self, p: Point) -> Point {
        Point::new(
            self.x_lim.0 + p.x * (self.x_lim.1 - self.x_lim.0),
            self.y_lim.0 + p.y * (self.y_lim.1 - self.y_lim.0),
        )
    }

    /// Map a point from `space` into surface pixels.
    ///
    /// Unlike [`PlotView::transform`] this covers figure space as well: drag
    /// gestures need pixel mappings for objects attached to the root surface.
    pub fn to_pixels(&self, space: Space, p: Point) -> Point {
        match space {
            Space::Figure => Point::new(
                p.x * self.figure_size.width,
                p.y * self.figure_size.height,
            ),
            Space::Axes => Point::new(
                self.viewport.x0 + p.x * self.viewport.width(),
                self.viewport.y0 + p.y * self.viewport.height(),
            ),
            Space::Data => self.to_pixels(Space::Axes, self.data_to_axes(p)),
        }
    }

    /// Map surface pixels into a point in `space`.
    pub fn from_pixels(&self, space: Space, px: Point) -> Point {
        match space {
            Space::Figure => Point::new(
                px.x / self.figure_size.width,
                px.y / self.figure_size.height,
            ),
            Space::Axes => Point::new(
                (px.x - self.viewport.x0) / self.viewport.width(),
                (px.y - self.viewport.y0) / self.viewport.height(),
            ),
            Space::Data => self.axes_to_data(self.from_pixels(Space::Axes, px)),
        }
    }

    /// Current visible x range, low to high.
    pub fn x_range(&self) -> (f64, f64) {
        let (a, b) = self.x_lim;
        (a.min(b), a.max(b))
    }

    /// Current visible y range, low to high.
    pub fn y_range(&self) -> (f64, f64) {
        let (a, b) = self.y_lim;
        (a.min(b), a.max(b))
    }

    /// Whether a data x coordinate lies inside the visible window.
    pub fn contains_x(&self, x: f64) -> bool {
        let (lo, hi) = self.x_range();
        lo <= x && x <= hi
    }

    /// Whether a data y coordinate lies inside the visible window.
    pub fn contains_y(&self, y: f64) -> bool {
        let (lo, hi) = self.y_range();
        lo <= y && y <= hi
    }
}
