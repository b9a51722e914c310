//! **ridgeline-core**: core types for heightmap pathfinding.
//!
//! This crate provides the foundational types used across the *ridgeline*
//! workspace: geometry primitives, decoded elevations, and the text
//! heightmap parser with its error type.

pub mod elevation;
pub mod error;
pub mod geom;
pub mod heightmap;

pub use elevation::{Elevation, Marker};
pub use error::{ErrorKind, GridError};
pub use geom::{Point, Range, RangeIter};
pub use heightmap::Heightmap;
