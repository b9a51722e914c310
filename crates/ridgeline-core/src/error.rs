//! Errors raised while reading a heightmap.

use thiserror::Error;

use crate::elevation::Marker;
use crate::geom::Point;

/// Broad class of a [`GridError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text does not describe a rectangle.
    Format,
    /// A cell holds an unrecognised character.
    Parse,
    /// Start/end markers are missing or duplicated.
    Invariant,
}

/// Errors that can occur when parsing a heightmap.
///
/// Positions are grid coordinates (origin bottom-left), except for
/// [`Ragged`](Self::Ragged) which reports the 1-based text line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("heightmap is empty")]
    Empty,

    #[error("heightmap line {line} has width {found}, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("heightmap contains invalid cell {ch:?} at {pos}")]
    InvalidCell { ch: char, pos: Point },

    #[error("heightmap has no {0}")]
    MissingMarker(Marker),

    #[error("heightmap has a second {marker} at {second} (first at {first})")]
    DuplicateMarker {
        marker: Marker,
        first: Point,
        second: Point,
    },
}

impl GridError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty | Self::Ragged { .. } => ErrorKind::Format,
            Self::InvalidCell { .. } => ErrorKind::Parse,
            Self::MissingMarker(_) | Self::DuplicateMarker { .. } => ErrorKind::Invariant,
        }
    }
}
