//! Error taxonomy for the annotation layer.
//!
//! Configuration errors propagate to the caller; best-effort interaction
//! failures are logged where they occur and never unwind the event loop.

use crate::space::Space;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the annotation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A drag gesture was armed with both axis locks set.
    #[error("'x_only' and 'y_only' cannot both be set")]
    ConflictingAxisLocks,

    /// No mapping exists between the two coordinate spaces.
    ///
    /// Figure space has no relation to data space, so a primitive pinned to
    /// the figure cannot jump.
    #[error("no jump path from {from:?} to {to:?}")]
    NoJumpPath { from: Space, to: Space },

    /// A legend selector referenced an entry that does not exist.
    #[error("unknown legend entry: {0}")]
    UnknownLegendEntry(String),
}
