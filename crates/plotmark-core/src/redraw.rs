//! Coalescable redraw requests.
//!
//! Components never repaint; they return a [`Redraw`] value and the host
//! schedules the actual draw. Requests from one event tick merge, with the
//! strongest winning.

use serde::{Deserialize, Serialize};

/// A redraw request returned by a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Redraw {
    /// Nothing visible changed.
    #[default]
    None,
    /// Draw on the host's next idle cycle.
    Soon,
    /// Draw before returning to the event loop.
    Now,
}

impl Redraw {
    /// Combine two requests; the stronger one wins.
    pub fn merge(self, other: Redraw) -> Redraw {
        self.max(other)
    }

    /// Whether the host has anything to do.
    pub fn is_needed(&self) -> bool {
        *self != Redraw::None
    }
}
