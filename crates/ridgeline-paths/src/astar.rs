use std::collections::BinaryHeap;

use log::trace;
use ridgeline_core::Point;

use crate::pathfinder::{Pathfinder, Route, UNREACHABLE};
use crate::strategy::{PriorityStrategy, Step, SumCost};
use crate::traits::AstarPather;

/// Knobs for [`Pathfinder::astar_path_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Re-open an already expanded node when a cheaper route to it turns up.
    ///
    /// Strategies other than [`SumCost`] do not expand nodes in cost order,
    /// so they need this to stay correct. Turning it off gives the strict
    /// closed-set variant, only meaningful with a consistent heuristic.
    pub revisit_expanded: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            revisit_expanded: true,
        }
    }
}

/// Frontier entry. Smallest key pops first; among equal keys the most
/// recently pushed entry wins.
struct Frontier<K> {
    key: K,
    seq: u64,
    idx: usize,
    g: i32,
}

impl<K: Ord> PartialEq for Frontier<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<K: Ord> Eq for Frontier<K> {}

impl<K: Ord> Ord for Frontier<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.key.cmp(&self.key).then(self.seq.cmp(&other.seq))
    }
}

impl<K: Ord> PartialOrd for Frontier<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Pathfinder {
    /// Compute the shortest path from `from` to `to` using A* with the
    /// `g + h` ordering and the pather's own heuristic.
    ///
    /// Returns the full route (including both endpoints) or `None` if no path
    /// exists within the current range.
    pub fn astar_path<P: AstarPather>(&mut self, pather: &P, from: Point, to: Point) -> Option<Route> {
        self.astar_path_with(pather, from, to, &SumCost, SearchConfig::default())
    }

    /// Best-first search ordered by `strategy`.
    ///
    /// The search stops when `to` is popped from the frontier, so only
    /// [`SumCost`] with an admissible heuristic is guaranteed to return a
    /// shortest route. The route's distance is the accumulated edge cost of
    /// the returned path.
    pub fn astar_path_with<P, S>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        strategy: &S,
        config: SearchConfig,
    ) -> Option<Route>
    where
        P: AstarPather,
        S: PriorityStrategy,
    {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(Route::new(0, vec![from]));
        }

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;

        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
            node.closed = false;
        }

        let first = Step {
            g: 0,
            h: pather.estimate(from, to),
            current: from,
            neighbor: from,
            start: from,
            goal: to,
            climb: 0,
        };
        let mut open: BinaryHeap<Frontier<S::Key>> = BinaryHeap::new();
        open.push(Frontier {
            key: strategy.priority(&first),
            seq: 0,
            idx: start_idx,
            g: 0,
        });
        let mut seq: u64 = 1;
        let mut expanded = 0usize;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            {
                let n = &self.astar_nodes[ci];
                if n.generation != cur_gen || !n.open || n.g != current.g {
                    continue;
                }
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.astar_nodes[ci].open = false;
            self.astar_nodes[ci].closed = true;
            expanded += 1;
            let current_g = self.astar_nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g.saturating_add(pather.cost(current_point, np));

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                    if n.closed && !config.revisit_expanded {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }

                n.g = tentative_g;
                n.parent = ci;
                n.open = true;
                n.closed = false;

                let step = Step {
                    g: tentative_g,
                    h: pather.estimate(np, to),
                    current: current_point,
                    neighbor: np,
                    start: from,
                    goal: to,
                    climb: pather.climb(current_point, np),
                };
                open.push(Frontier {
                    key: strategy.priority(&step),
                    seq,
                    idx: ni,
                    g: tentative_g,
                });
                seq += 1;
            }
        };

        self.nbuf = nbuf;
        trace!("astar {from} -> {to}: found={found}, expanded {expanded} nodes");

        if !found {
            return None;
        }

        let distance = self.astar_nodes[goal_idx].g;
        Some(Route::new(distance, self.unwind(&self.astar_nodes, goal_idx)))
    }
}
