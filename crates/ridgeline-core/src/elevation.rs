//! Terrain height decoded from a heightmap character.

use std::fmt;

/// Height of a single heightmap cell, `0..=25`.
///
/// Lowercase letters map `a` → 0 through `z` → 25. The start marker `S`
/// sits at the lowest height and the end marker `E` at the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Elevation(pub i32);

impl Elevation {
    /// Lowest height (`a`, `S`).
    pub const LOWEST: Self = Self(0);
    /// Highest height (`z`, `E`).
    pub const HIGHEST: Self = Self(25);

    /// Create a new elevation from its integer value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Decode a heightmap character, or `None` if it is not one of
    /// `a..=z`, `S`, `E`.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' => Some(Self(ch as i32 - 'a' as i32)),
            'S' => Some(Self::LOWEST),
            'E' => Some(Self::HIGHEST),
            _ => None,
        }
    }

    /// The lowercase letter for this height.
    pub fn to_char(self) -> char {
        char::from(b'a' + self.0.clamp(0, 25) as u8)
    }

    /// Signed height change when stepping from `self` to `to`.
    #[inline]
    pub const fn rise_to(self, to: Elevation) -> i32 {
        to.0 - self.0
    }
}

impl From<i32> for Elevation {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<Elevation> for i32 {
    fn from(e: Elevation) -> Self {
        e.0
    }
}

impl fmt::Display for Elevation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The two special cells a heightmap must contain exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    Start,
    End,
}

impl Marker {
    /// Marker encoded by `ch`, if any.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }

    /// The character that encodes this marker.
    pub fn to_char(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start marker 'S'"),
            Self::End => write!(f, "end marker 'E'"),
        }
    }
}
