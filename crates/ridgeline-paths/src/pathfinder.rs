use ridgeline_core::{Point, Range};

/// A position with an associated cost, returned from Dijkstra map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Sentinel value meaning "unreachable" in distances and Dijkstra maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Outcome of a point-to-point query: total cost and the visited points,
/// both endpoints included.
///
/// An unreachable goal is represented by [`UNREACHABLE`] distance and an
/// empty path rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub distance: i32,
    pub path: Vec<Point>,
}

impl Route {
    pub fn new(distance: i32, path: Vec<Point>) -> Self {
        Self { distance, path }
    }

    /// The "no path" outcome.
    pub fn unreachable() -> Self {
        Self {
            distance: UNREACHABLE,
            path: Vec::new(),
        }
    }

    /// Whether the goal was reached.
    pub fn is_reachable(&self) -> bool {
        self.distance != UNREACHABLE
    }

    /// Number of moves along the path, `path.len() - 1`.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// First point of the path.
    pub fn origin(&self) -> Option<Point> {
        self.path.first().copied()
    }

    /// Last point of the path.
    pub fn goal(&self) -> Option<Point> {
        self.path.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Internal node for A*/Dijkstra priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
            closed: false,
        }
    }
}

/// Reference into the node array, ordered by `f` for use in `BinaryHeap`.
///
/// Equal costs pop in discovery order (`seq` ascending).
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Central coordinator for searches over a grid rectangle.
///
/// `Pathfinder` owns all internal caches (node arrays, the Dijkstra map,
/// flood-fill marks, neighbour scratch buffer) so that the many repeated
/// queries issued while pruning incur no allocations after the first use.
pub struct Pathfinder {
    pub(crate) rng: Range,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // Dijkstra caches
    pub(crate) dijkstra_nodes: Vec<Node>,
    pub(crate) dijkstra_generation: u32,
    pub(crate) dijkstra_results: Vec<PathNode>,
    pub(crate) dijkstra_map: Vec<i32>,
    // flood-fill caches
    pub(crate) cc_marks: Vec<u32>,
    pub(crate) cc_generation: u32,
    pub(crate) cc_stack: Vec<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl Pathfinder {
    /// Create a new `Pathfinder` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            dijkstra_nodes: vec![Node::default(); len],
            dijkstra_generation: 0,
            dijkstra_results: Vec::new(),
            dijkstra_map: vec![UNREACHABLE; len],
            cc_marks: vec![0; len],
            cc_generation: 0,
            cc_stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, reallocating caches as needed.
    ///
    /// If the new size fits within existing capacity, caches are preserved
    /// and only generation counters are bumped.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        let old_capacity = self.astar_nodes.len();
        self.rng = rng;

        if new_len <= old_capacity {
            self.astar_generation = self.astar_generation.wrapping_add(1);
            self.dijkstra_generation = self.dijkstra_generation.wrapping_add(1);
            self.cc_generation = self.cc_generation.wrapping_add(1);
            self.dijkstra_results.clear();
            return;
        }

        self.astar_nodes.clear();
        self.astar_nodes.resize(new_len, Node::default());
        self.astar_generation = 0;

        self.dijkstra_nodes.clear();
        self.dijkstra_nodes.resize(new_len, Node::default());
        self.dijkstra_generation = 0;
        self.dijkstra_results.clear();
        self.dijkstra_map.clear();
        self.dijkstra_map.resize(new_len, UNREACHABLE);

        self.cc_marks.clear();
        self.cc_marks.resize(new_len, 0);
        self.cc_generation = 0;
        self.cc_stack.clear();
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index(p)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.rng.point(idx)
    }

    /// Walk a parent chain back from `goal` and return it start-first.
    pub(crate) fn unwind(&self, nodes: &[Node], goal: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pf = Pathfinder::new(Range::sized(20, 20));
        let original_cap = pf.astar_nodes.len();

        let small = Range::sized(5, 5);
        pf.set_range(small);
        assert_eq!(pf.range(), small);
        assert_eq!(pf.astar_nodes.len(), original_cap);
        assert_eq!(pf.idx(Point::new(1, 1)), Some(6));
        assert!(pf.astar_generation > 0 && pf.dijkstra_generation > 0);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pf = Pathfinder::new(Range::sized(5, 5));
        let big = Range::sized(20, 20);
        pf.set_range(big);
        assert_eq!(pf.range(), big);
        assert_eq!(pf.astar_nodes.len(), 400);
        assert_eq!(pf.dijkstra_map.len(), 400);
        assert_eq!(pf.cc_marks.len(), 400);
    }

    #[test]
    fn node_refs_pop_cheapest_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 3, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 1, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 1, seq: 2 });
        heap.push(NodeRef { idx: 3, f: 2, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn route_helpers() {
        let r = Route::new(2, vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]);
        assert!(r.is_reachable());
        assert_eq!(r.steps(), 2);
        assert_eq!(r.origin(), Some(Point::new(0, 0)));
        assert_eq!(r.goal(), Some(Point::new(1, 1)));

        let none = Route::unreachable();
        assert!(!none.is_reachable());
        assert_eq!(none.steps(), 0);
        assert_eq!(none.goal(), None);
    }
}
