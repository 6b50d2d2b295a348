//! Error type shared by every stage of the layout pipeline.

use thiserror::Error;

/// Failure raised by request validation, composition or placement.
///
/// Variants other than [`LayoutError::Invariant`] describe bad input and are
/// safe to echo back to a caller. `Invariant` means the engine produced a
/// layout that broke one of its own geometric guarantees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("floor count {0} is not supported (expected 1, 2 or 3)")]
    InvalidFloorCount(i64),

    #[error("total area must be a positive number, got {0}")]
    NonPositiveArea(f64),

    #[error("{field} cannot be negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("unknown room category '{0}'")]
    UnknownCategory(String),

    #[error("unknown zone '{0}'")]
    UnknownZone(String),

    #[error("room '{name}' has invalid weight {weight}")]
    InvalidWeight { name: String, weight: f64 },

    /// A room outside the corridor band tagged `mid`, or a corridor outside it.
    #[error("room '{0}' is in the wrong zone for its category")]
    MisplacedRoom(String),

    #[error("plot {width:.2} x {depth:.2} is too small to hold a corridor and two zones")]
    PlotTooSmall { width: f64, depth: f64 },

    #[error("layout invariant violated: {0}")]
    Invariant(String),
}

impl LayoutError {
    /// True for errors caused by the caller's input rather than the engine.
    pub fn is_validation(&self) -> bool {
        !matches!(self, LayoutError::Invariant(_))
    }
}
