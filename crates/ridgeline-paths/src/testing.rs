//! Fixtures shared by the unit and property tests.

use proptest::prelude::*;
use ridgeline_core::Elevation;

/// The canonical 8×5 heightmap.
pub(crate) const HILL: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi";

const WALL: Elevation = Elevation::new(12);

/// Small-map rule: `m` cells are walls, otherwise climb at most one level,
/// and the summit can always be entered.
pub(crate) fn trail(from: Elevation, to: Elevation) -> bool {
    from != WALL && to != WALL && (from.rise_to(to) <= 1 || to == Elevation::HIGHEST)
}

/// Random heightmaps up to 4×4 over `a`, `b`, `c` and walls, with one `S`
/// and one `E`.
pub(crate) fn small_maps() -> impl Strategy<Value = String> {
    (2usize..=4, 2usize..=4).prop_flat_map(|(w, h)| {
        let n = w * h;
        (
            proptest::collection::vec(
                proptest::sample::select(vec!['a', 'a', 'b', 'b', 'c', 'm']),
                n,
            ),
            0..n,
            0..n - 1,
        )
            .prop_map(move |(mut cells, s, e)| {
                let e = if e >= s { e + 1 } else { e };
                cells[s] = 'S';
                cells[e] = 'E';
                cells
                    .chunks(w)
                    .map(|row| row.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
    })
}
