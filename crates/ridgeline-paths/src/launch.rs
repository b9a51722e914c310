//! Choosing the best starting cell among many candidates.

use log::debug;
use ridgeline_core::{Elevation, Point};

use crate::graph::Graph;
use crate::pathfinder::{Pathfinder, Route};

/// Best start found by [`Pathfinder::best_launch`] and its route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Launch {
    pub start: Point,
    pub route: Route,
}

/// A lowest-level cell with at least one edge up onto the next level.
///
/// Lowest cells that can only step sideways or nowhere are never better
/// than the cell they would have to walk to.
pub fn viable_launch_point(graph: &Graph, p: Point) -> bool {
    let Some(node) = graph.node(p) else {
        return false;
    };
    node.elevation() == Elevation::LOWEST
        && node
            .edges()
            .iter()
            .any(|e| graph.elevation(e.to) == Some(Elevation::new(1)))
}

impl Pathfinder {
    /// Run A* from every live node accepted by `filter` to `end` and keep the
    /// shortest route. Candidates are tried in row-major order and the first
    /// of equally short routes wins.
    ///
    /// Returns `None` if no candidate reaches `end`.
    pub fn best_launch<F>(&mut self, graph: &Graph, end: Point, filter: F) -> Option<Launch>
    where
        F: Fn(&Graph, Point) -> bool,
    {
        let candidates: Vec<Point> = graph
            .iter()
            .filter(|n| !n.is_pruned() && filter(graph, n.pos()))
            .map(|n| n.pos())
            .collect();
        debug!("{} launch candidates for {end}", candidates.len());

        let mut best: Option<Launch> = None;
        for start in candidates {
            let Some(route) = self.astar_path(graph, start, end) else {
                continue;
            };
            if best.as_ref().is_none_or(|b| route.distance < b.route.distance) {
                best = Some(Launch { start, route });
            }
        }
        best
    }

    /// [`best_launch`](Self::best_launch) over [`viable_launch_point`]s.
    pub fn best_launch_from_low_points(&mut self, graph: &Graph, end: Point) -> Option<Launch> {
        self.best_launch(graph, end, viable_launch_point)
    }
}
