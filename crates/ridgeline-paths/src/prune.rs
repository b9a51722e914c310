//! Destructive reduction of a graph to the part that matters for one
//! start → end query.
//!
//! Pruning runs in two phases:
//!
//! 1. Everything the start cannot reach is removed.
//! 2. Each remaining cell is asked whether it can still reach the end. If
//!    it can, its whole bidirectional component can too, so the component
//!    is settled in one go. If it cannot, neither can anything it reaches,
//!    and that whole region is removed.
//!
//! Optionally, dead-end spurs are trimmed as well. A spur is a cell other
//! than the start or the end whose only neighbour in either direction is a
//! single cell `w`. A simple path entering the spur would have to come from
//! `w` and leave to `w`, so it can never carry a start → end path.

use log::debug;
use ridgeline_core::Point;

use crate::graph::Graph;
use crate::pathfinder::Pathfinder;
use crate::traits::Bidirectional;

/// How many nodes each pruning step removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PruneStats {
    pub unreachable_from_start: usize,
    pub cannot_reach_end: usize,
    pub dead_ends: usize,
}

impl PruneStats {
    pub fn total(&self) -> usize {
        self.unreachable_from_start + self.cannot_reach_end + self.dead_ends
    }
}

/// Prune `graph` in place for the `start → end` query.
///
/// Pruning only removes nodes and edges and cannot be undone; clone the
/// graph first to keep the original. Running it a second time with the
/// same arguments removes nothing.
pub fn prune(graph: &mut Graph, start: Point, end: Point, prune_dead_ends: bool) -> PruneStats {
    Pathfinder::new(graph.range()).prune(graph, start, end, prune_dead_ends)
}

impl Pathfinder {
    /// Same as [`prune`], reusing this pathfinder's caches.
    pub fn prune(
        &mut self,
        graph: &mut Graph,
        start: Point,
        end: Point,
        prune_dead_ends: bool,
    ) -> PruneStats {
        if self.range() != graph.range() {
            self.set_range(graph.range());
        }
        let mut stats = PruneStats::default();

        for p in self.unreachable_from(&*graph, start) {
            if graph.prune_node(p) {
                stats.unreachable_from_start += 1;
            }
        }
        debug!(
            "prune: {} nodes unreachable from {start}",
            stats.unreachable_from_start
        );

        let len = graph.range().len();
        let mut classified = vec![false; len];
        for idx in 0..len {
            let c = self.point(idx);
            if classified[idx] || !graph.is_live(c) {
                continue;
            }

            if self.dijkstra_path(&*graph, c, end).is_reachable() {
                let component = self.cc_map(&Bidirectional::new(&*graph), c);
                for &p in &component {
                    if let Some(i) = self.idx(p) {
                        classified[i] = true;
                    }
                }
                if prune_dead_ends {
                    for p in component {
                        stats.dead_ends += trim_spur(graph, p, start, end);
                    }
                }
            } else {
                for p in self.cc_map(&*graph, c) {
                    if let Some(i) = self.idx(p) {
                        classified[i] = true;
                    }
                    if graph.prune_node(p) {
                        stats.cannot_reach_end += 1;
                    }
                }
            }
        }

        // Region removals above can turn already settled cells into spurs.
        if prune_dead_ends {
            for idx in 0..len {
                stats.dead_ends += trim_spur(graph, self.point(idx), start, end);
            }
        }

        debug!(
            "prune: {} cannot reach {end}, {} dead ends, {} nodes left",
            stats.cannot_reach_end,
            stats.dead_ends,
            graph.live_count()
        );
        stats
    }
}

/// The single cell a spur at `p` connects to, if `p` is a spur.
fn spur_exit(graph: &Graph, p: Point) -> Option<Point> {
    let node = graph.node(p)?;
    if node.is_pruned() || node.out_degree() != 1 {
        return None;
    }
    let exit = node.edges()[0].to;
    graph.incoming(p).all(|q| q == exit).then_some(exit)
}

/// Prune the spur chain starting at `p`, following each pruned cell's exit
/// until a cell is not a spur. Returns how many cells were pruned.
fn trim_spur(graph: &mut Graph, p: Point, start: Point, end: Point) -> usize {
    let mut cur = p;
    let mut trimmed = 0;
    while cur != start && cur != end {
        let Some(next) = spur_exit(graph, cur) else {
            break;
        };
        graph.prune_node(cur);
        trimmed += 1;
        cur = next;
    }
    trimmed
}
