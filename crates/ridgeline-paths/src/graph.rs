//! Directed, unit-weight graph built from a heightmap.
//!
//! Nodes live in an arena indexed by coordinate and edges refer to their
//! target by coordinate, so the graph has no internal references and can be
//! cloned freely before a destructive operation such as
//! [`prune`](crate::prune()).

use log::debug;
use ridgeline_core::{Elevation, GridError, Heightmap, Point, Range};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

// ---------------------------------------------------------------------------
// Step rules
// ---------------------------------------------------------------------------

/// Decides whether a single move between adjacent cells is allowed.
///
/// Rules are evaluated once per direction, so `can_step(a, b)` and
/// `can_step(b, a)` may disagree.
pub trait StepRule {
    fn can_step(&self, from: Elevation, to: Elevation) -> bool;
}

impl<F: Fn(Elevation, Elevation) -> bool> StepRule for F {
    fn can_step(&self, from: Elevation, to: Elevation) -> bool {
        self(from, to)
    }
}

/// Climb at most one level, descend freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimbOne;

impl StepRule for ClimbOne {
    fn can_step(&self, from: Elevation, to: Elevation) -> bool {
        from.rise_to(to) <= 1
    }
}

/// [`ClimbOne`] walked backwards: drop at most one level, climb freely.
///
/// Searching with this rule from the summit answers "where could I have
/// come from" queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descend;

impl StepRule for Descend {
    fn can_step(&self, from: Elevation, to: Elevation) -> bool {
        ClimbOne.can_step(to, from)
    }
}

// ---------------------------------------------------------------------------
// Node / edge
// ---------------------------------------------------------------------------

/// A directed edge to an adjacent coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectedEdge {
    pub to: Point,
    pub weight: i32,
}

impl DirectedEdge {
    /// A unit-weight edge to `to`.
    pub const fn to(to: Point) -> Self {
        Self { to, weight: 1 }
    }
}

/// One heightmap cell together with its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    elevation: Elevation,
    pos: Point,
    edges: Vec<DirectedEdge>,
    pruned: bool,
}

impl Node {
    fn new(pos: Point, elevation: Elevation) -> Self {
        Self {
            elevation,
            pos,
            edges: Vec::new(),
            pruned: false,
        }
    }

    pub fn elevation(&self) -> Elevation {
        self.elevation
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }

    /// Whether [`prune`](crate::prune()) removed this node.
    pub fn is_pruned(&self) -> bool {
        self.pruned
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Coordinate-keyed node arena covering a rectangular heightmap.
///
/// Every coordinate in range has a node, even one with no edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    rng: Range,
    nodes: Vec<Node>,
    start: Point,
    end: Point,
}

impl Graph {
    /// Parse `text` and build its graph under `rule`.
    ///
    /// Fails with the [`GridError`] of the heightmap parser: a format error
    /// for ragged or empty text, a parse error for unknown characters, and
    /// an invariant error for a missing or duplicated `S`/`E`.
    pub fn build<R: StepRule>(text: &str, rule: R) -> Result<Self, GridError> {
        let hm = Heightmap::parse(text)?;
        Ok(Self::from_heightmap(&hm, &rule))
    }

    /// Build the graph of an already parsed heightmap.
    ///
    /// Cells are scanned row-major from the origin. For each cell the left
    /// neighbour and the one below have already been created, and the rule
    /// is checked for both directions of each pair.
    pub fn from_heightmap<R: StepRule>(hm: &Heightmap, rule: &R) -> Self {
        let rng = hm.range();
        let mut nodes: Vec<Node> = Vec::with_capacity(rng.len());

        for (p, elevation) in hm.iter() {
            let mut node = Node::new(p, elevation);
            for q in [p.shift(-1, 0), p.shift(0, -1)] {
                let Some(qi) = rng.index(q) else {
                    continue;
                };
                let neighbor = &mut nodes[qi];
                if rule.can_step(elevation, neighbor.elevation) {
                    node.edges.push(DirectedEdge::to(q));
                }
                if rule.can_step(neighbor.elevation, elevation) {
                    neighbor.edges.push(DirectedEdge::to(p));
                }
            }
            nodes.push(node);
        }

        let graph = Self {
            rng,
            nodes,
            start: hm.start(),
            end: hm.end(),
        };
        debug!(
            "built {}x{} graph with {} edges, start {} end {}",
            graph.width(),
            graph.height(),
            graph.edge_count(),
            graph.start,
            graph.end
        );
        graph
    }

    /// The grid rectangle covered by the graph.
    pub fn range(&self) -> Range {
        self.rng
    }

    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    pub fn height(&self) -> i32 {
        self.rng.height()
    }

    /// Coordinate of the `S` marker.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Coordinate of the `E` marker.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Node at `p`, or `None` outside the grid.
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.rng.index(p).map(|i| &self.nodes[i])
    }

    pub fn elevation(&self, p: Point) -> Option<Elevation> {
        self.node(p).map(Node::elevation)
    }

    /// Whether `p` is inside the grid and has not been pruned.
    pub fn is_live(&self, p: Point) -> bool {
        self.node(p).is_some_and(|n| !n.pruned)
    }

    /// Whether the directed edge `from → to` exists.
    pub fn has_edge(&self, from: Point, to: Point) -> bool {
        self.node(from)
            .is_some_and(|n| n.edges.iter().any(|e| e.to == to))
    }

    /// Out-degree of `p`, 0 outside the grid.
    pub fn out_degree(&self, p: Point) -> usize {
        self.node(p).map_or(0, Node::out_degree)
    }

    /// Adjacent coordinates with an edge into `p`.
    pub fn incoming(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&q| self.has_edge(q, p))
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::out_degree).sum()
    }

    /// Number of nodes not yet pruned.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.pruned).count()
    }

    /// All nodes in row-major order from the origin, pruned ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Flag `p` as pruned and drop every edge touching it.
    ///
    /// Returns `false` if `p` is outside the grid or already pruned.
    pub(crate) fn prune_node(&mut self, p: Point) -> bool {
        let Some(i) = self.rng.index(p) else {
            return false;
        };
        if self.nodes[i].pruned {
            return false;
        }
        self.nodes[i].pruned = true;
        self.nodes[i].edges.clear();
        for q in p.neighbors_4() {
            if let Some(qi) = self.rng.index(q) {
                self.nodes[qi].edges.retain(|e| e.to != p);
            }
        }
        true
    }
}

impl Pather for Graph {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if let Some(node) = self.node(p) {
            buf.extend(node.edges.iter().map(|e| e.to));
        }
    }
}

impl WeightedPather for Graph {
    fn cost(&self, from: Point, to: Point) -> i32 {
        self.node(from)
            .and_then(|n| n.edges.iter().find(|e| e.to == to))
            .map_or(1, |e| e.weight)
    }
}

impl AstarPather for Graph {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }

    fn climb(&self, from: Point, to: Point) -> i32 {
        match (self.elevation(from), self.elevation(to)) {
            (Some(a), Some(b)) => a.rise_to(b),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HILL, small_maps, trail};
    use proptest::prelude::*;
    use ridgeline_core::ErrorKind;

    #[test]
    fn build_canonical() {
        let g = Graph::build(HILL, ClimbOne).unwrap();
        assert_eq!(g.width(), 8);
        assert_eq!(g.height(), 5);
        assert_eq!(g.start(), Point::new(0, 4));
        assert_eq!(g.end(), Point::new(5, 2));
        assert_eq!(g.iter().count(), 40);
        assert_eq!(g.live_count(), 40);
        assert_eq!(g.elevation(g.start()), Some(Elevation::LOWEST));
        assert_eq!(g.elevation(g.end()), Some(Elevation::HIGHEST));
    }

    #[test]
    fn edges_are_asymmetric() {
        let g = Graph::build(HILL, ClimbOne).unwrap();
        // bottom row: a b d ... ; a → b allowed, b → d refused, d → b allowed.
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        let d = Point::new(2, 0);
        assert!(g.has_edge(a, b));
        assert!(g.has_edge(b, a));
        assert!(!g.has_edge(b, d));
        assert!(g.has_edge(d, b));
    }

    #[test]
    fn edges_match_rule_for_every_adjacent_pair() {
        let g = Graph::build(HILL, ClimbOne).unwrap();
        for p in g.range() {
            for q in p.neighbors_4() {
                let Some(eq) = g.elevation(q) else {
                    continue;
                };
                let ep = g.elevation(p).unwrap();
                assert_eq!(g.has_edge(p, q), ClimbOne.can_step(ep, eq), "{p} -> {q}");
            }
        }
    }

    #[test]
    fn edges_only_join_adjacent_cells() {
        let g = Graph::build(HILL, ClimbOne).unwrap();
        for n in g.iter() {
            for e in n.edges() {
                assert!(n.pos().is_adjacent(e.to));
                assert_eq!(e.weight, 1);
            }
        }
    }

    #[test]
    fn insertion_order_is_left_then_below() {
        let g = Graph::build("aaa\nSaE\naaa", |_: Elevation, _: Elevation| true).unwrap();
        let centre = g.node(Point::new(1, 1)).unwrap();
        let targets: Vec<Point> = centre.edges().iter().map(|e| e.to).collect();
        assert_eq!(
            targets,
            vec![
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn closure_rules() {
        let g = Graph::build("Sc\naE", |_: Elevation, _: Elevation| false).unwrap();
        assert_eq!(g.edge_count(), 0);

        let up = Graph::build("Sc\naE", ClimbOne).unwrap();
        let down = Graph::build("Sc\naE", Descend).unwrap();
        for p in up.range() {
            for q in p.neighbors_4() {
                if up.range().contains(q) {
                    assert_eq!(up.has_edge(p, q), down.has_edge(q, p));
                }
            }
        }
    }

    #[test]
    fn build_errors_propagate() {
        let err = Graph::build("Sab\nbE", ClimbOne).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        let err = Graph::build("Sa?\nabE", ClimbOne).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        let err = Graph::build("SaE\nSbc", ClimbOne).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invariant);
    }

    #[test]
    fn prune_node_drops_incident_edges() {
        let mut g = Graph::build("aaa\nSaE\naaa", |_: Elevation, _: Elevation| true).unwrap();
        let centre = Point::new(1, 1);
        assert_eq!(g.incoming(centre).count(), 4);
        assert!(g.prune_node(centre));
        assert!(!g.prune_node(centre));
        assert!(!g.is_live(centre));
        assert_eq!(g.out_degree(centre), 0);
        assert_eq!(g.incoming(centre).count(), 0);
        assert_eq!(g.live_count(), 8);
        assert!(!g.prune_node(Point::new(9, 9)));
    }

    #[test]
    fn pather_view() {
        let g = Graph::build(HILL, ClimbOne).unwrap();
        let mut buf = Vec::new();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 0), Point::new(0, 1)]);
        assert_eq!(g.cost(Point::new(0, 0), Point::new(1, 0)), 1);
        assert_eq!(g.estimate(Point::new(0, 0), g.end()), 7);
        assert_eq!(g.climb(Point::new(0, 0), Point::new(1, 0)), 1);
        assert_eq!(g.climb(Point::new(2, 0), Point::new(1, 0)), -2);
    }

    proptest! {
        #[test]
        fn prop_edges_follow_rule(text in small_maps()) {
            let g = Graph::build(&text, trail).unwrap();
            for p in g.range() {
                let ep = g.elevation(p).unwrap();
                for q in p.neighbors_4() {
                    match g.elevation(q) {
                        Some(eq) => {
                            prop_assert_eq!(g.has_edge(p, q), trail(ep, eq));
                        }
                        None => {
                            prop_assert!(!g.has_edge(p, q));
                        }
                    }
                }
            }
            prop_assert_eq!(
                g.edge_count(),
                g.iter().map(|n| g.incoming(n.pos()).count()).sum::<usize>()
            );
        }
    }
}
