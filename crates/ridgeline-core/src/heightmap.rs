//! Rectangular elevation grids parsed from text.
//!
//! A [`Heightmap`] is the decoded form of a text grid such as
//!
//! ```text
//! Sabqponm
//! abcryxxl
//! accszExk
//! acctuvwj
//! abdefghi
//! ```
//!
//! Lines are rows. The last line is row 0, so `S` above sits at `(0, 4)` and
//! the bottom-left `a` at `(0, 0)`.

use std::fmt;
use std::str::FromStr;

use crate::elevation::{Elevation, Marker};
use crate::error::GridError;
use crate::geom::{Point, Range};

/// A decoded elevation grid with its start and end markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    range: Range,
    cells: Vec<Elevation>,
    start: Point,
    end: Point,
}

impl Heightmap {
    /// Parse a heightmap from text.
    ///
    /// Trailing line terminators of the whole string are ignored, and a
    /// trailing `'\r'` on each line is stripped. Every line must have the
    /// same width and every character must be one of `a..=z`, `S`, `E`, with
    /// exactly one `S` and one `E`. Stray spaces are not trimmed.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim_end_matches(['\n', '\r']);
        if s.is_empty() {
            return Err(GridError::Empty);
        }
        let lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();

        let width = lines[0].chars().count();
        for (i, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    line: i + 1,
                    expected: width,
                    found,
                });
            }
        }

        let height = lines.len();
        let range = Range::sized(width as i32, height as i32);
        let mut cells = vec![Elevation::default(); range.len()];
        let mut start: Option<Point> = None;
        let mut end: Option<Point> = None;

        for (i, line) in lines.iter().enumerate() {
            let y = (height - 1 - i) as i32;
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y);
                let Some(elevation) = Elevation::from_char(ch) else {
                    return Err(GridError::InvalidCell { ch, pos });
                };
                if let Some(marker) = Marker::from_char(ch) {
                    let slot = match marker {
                        Marker::Start => &mut start,
                        Marker::End => &mut end,
                    };
                    if let Some(first) = *slot {
                        return Err(GridError::DuplicateMarker {
                            marker,
                            first,
                            second: pos,
                        });
                    }
                    *slot = Some(pos);
                }
                // Range::index cannot fail here: pos is inside the grid.
                if let Some(idx) = range.index(pos) {
                    cells[idx] = elevation;
                }
            }
        }

        let start = start.ok_or(GridError::MissingMarker(Marker::Start))?;
        let end = end.ok_or(GridError::MissingMarker(Marker::End))?;
        Ok(Self {
            range,
            cells,
            start,
            end,
        })
    }

    /// The grid extent, anchored at the origin.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// Position of the `S` marker.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Position of the `E` marker.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Elevation at `p`, or `None` outside the grid.
    pub fn at(&self, p: Point) -> Option<Elevation> {
        self.range.index(p).map(|i| self.cells[i])
    }

    /// Iterate over `(position, elevation)` in row-major order from row 0.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Elevation)> + '_ {
        self.range.iter().zip(self.cells.iter().copied())
    }
}

impl FromStr for Heightmap {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Writes the grid back in its text form, top row first.
impl fmt::Display for Heightmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let p = Point::new(x, y);
                let ch = if p == self.start {
                    Marker::Start.to_char()
                } else if p == self.end {
                    Marker::End.to_char()
                } else {
                    self.at(p).unwrap_or_default().to_char()
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const HILL: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi
";

    #[test]
    fn parse_and_size() {
        let hm = Heightmap::parse(HILL).unwrap();
        assert_eq!(hm.width(), 8);
        assert_eq!(hm.height(), 5);
        assert_eq!(hm.start(), Point::new(0, 4));
        assert_eq!(hm.end(), Point::new(5, 2));
    }

    #[test]
    fn bottom_row_is_row_zero() {
        let hm = Heightmap::parse(HILL).unwrap();
        assert_eq!(hm.at(Point::new(0, 0)), Some(Elevation(0)));
        assert_eq!(hm.at(Point::new(1, 0)), Some(Elevation(1)));
        assert_eq!(hm.at(Point::new(7, 0)), Some(Elevation::from_char('i').unwrap()));
        assert_eq!(hm.at(Point::new(2, 4)), Some(Elevation::from_char('b').unwrap()));
        assert_eq!(hm.at(hm.start()), Some(Elevation::LOWEST));
        assert_eq!(hm.at(hm.end()), Some(Elevation::HIGHEST));
        assert_eq!(hm.at(Point::new(8, 0)), None);
    }

    #[test]
    fn display_reproduces_text() {
        let hm: Heightmap = HILL.parse().unwrap();
        assert_eq!(hm.to_string(), HILL);
    }

    #[test]
    fn crlf_lines_accepted() {
        let hm = Heightmap::parse("Sb\r\naE\r\n").unwrap();
        assert_eq!(hm.width(), 2);
        assert_eq!(hm.start(), Point::new(0, 1));
        assert_eq!(hm.end(), Point::new(1, 0));
    }

    #[test]
    fn empty_is_format_error() {
        let err = Heightmap::parse("").unwrap_err();
        assert_eq!(err, GridError::Empty);
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(Heightmap::parse("\r\n\n").unwrap_err(), GridError::Empty);
    }

    #[test]
    fn ragged_is_format_error() {
        let err = Heightmap::parse("Sab\naE").unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                line: 2,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn surrounding_spaces_are_not_trimmed() {
        let err = Heightmap::parse(" ab\nSE").unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                line: 2,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = Heightmap::parse("Sa\nbE ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = Heightmap::parse(" S\naE").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCell {
                ch: ' ',
                pos: Point::new(0, 1)
            }
        );
    }

    #[test]
    fn invalid_cell_is_parse_error() {
        let err = Heightmap::parse("Sa#\naEb").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCell {
                ch: '#',
                pos: Point::new(2, 1)
            }
        );
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn missing_markers_are_invariant_errors() {
        let err = Heightmap::parse("abc\nabE").unwrap_err();
        assert_eq!(err, GridError::MissingMarker(Marker::Start));
        assert_eq!(err.kind(), ErrorKind::Invariant);

        let err = Heightmap::parse("Sbc\nabc").unwrap_err();
        assert_eq!(err, GridError::MissingMarker(Marker::End));
    }

    #[test]
    fn duplicate_marker_is_invariant_error() {
        let err = Heightmap::parse("SbE\nSbc").unwrap_err();
        assert_eq!(
            err,
            GridError::DuplicateMarker {
                marker: Marker::Start,
                first: Point::new(0, 1),
                second: Point::new(0, 0),
            }
        );
        assert_eq!(err.kind(), ErrorKind::Invariant);
    }

    #[test]
    fn error_messages() {
        let err = Heightmap::parse("Sa#\naEb").unwrap_err();
        assert_eq!(
            err.to_string(),
            "heightmap contains invalid cell '#' at (2, 1)"
        );
        assert_eq!(
            GridError::MissingMarker(Marker::End).to_string(),
            "heightmap has no end marker 'E'"
        );
    }
}
