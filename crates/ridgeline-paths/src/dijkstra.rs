use std::collections::BinaryHeap;

use ridgeline_core::Point;

use crate::pathfinder::{NodeRef, PathNode, Pathfinder, Route, UNREACHABLE};
use crate::traits::WeightedPather;

impl Pathfinder {
    /// Compute the shortest path from `from` to `to` with Dijkstra's
    /// algorithm, stopping as soon as `to` is settled.
    ///
    /// Returns [`Route::unreachable`] if `to` cannot be reached or either
    /// endpoint lies outside the range.
    pub fn dijkstra_path<P: WeightedPather>(&mut self, pather: &P, from: Point, to: Point) -> Route {
        let Some(goal_idx) = self.idx(to) else {
            return Route::unreachable();
        };
        if self.idx(from).is_none() {
            return Route::unreachable();
        }
        if from == to {
            return Route::new(0, vec![from]);
        }

        if !self.dijkstra_run(pather, &[from], UNREACHABLE, Some(goal_idx)) {
            return Route::unreachable();
        }
        let distance = self.dijkstra_nodes[goal_idx].g;
        Route::new(distance, self.unwind(&self.dijkstra_nodes, goal_idx))
    }

    /// Compute a multi-source Dijkstra distance map.
    ///
    /// Every source starts at cost 0. Expansion stops when the cumulative
    /// cost exceeds `max_cost`. Returns a slice of all settled nodes in
    /// settlement order.
    pub fn dijkstra_map<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_cost: i32,
    ) -> &[PathNode] {
        self.dijkstra_run(pather, sources, max_cost, None);
        &self.dijkstra_results
    }

    /// Query the Dijkstra cost at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last Dijkstra query.
    pub fn dijkstra_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.dijkstra_map[i],
            None => UNREACHABLE,
        }
    }

    /// Sweep outward from `from` until the frontier is exhausted and return
    /// every coordinate in range that was never reached, in row-major order.
    pub fn unreachable_from<P: WeightedPather>(&mut self, pather: &P, from: Point) -> Vec<Point> {
        self.dijkstra_run(pather, &[from], UNREACHABLE, None);
        (0..self.rng.len())
            .filter(|&i| self.dijkstra_map[i] == UNREACHABLE)
            .map(|i| self.point(i))
            .collect()
    }

    /// Shared Dijkstra loop. Returns `true` if `goal` was settled.
    fn dijkstra_run<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_cost: i32,
        goal: Option<usize>,
    ) -> bool {
        // Reset the flat cost map.
        for v in self.dijkstra_map.iter_mut() {
            *v = UNREACHABLE;
        }
        self.dijkstra_results.clear();

        self.dijkstra_generation = self.dijkstra_generation.wrapping_add(1);
        let cur_gen = self.dijkstra_generation;

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq: u64 = 0;

        // Seed sources.
        for &src in sources {
            if let Some(si) = self.idx(src) {
                let n = &mut self.dijkstra_nodes[si];
                n.g = 0;
                n.parent = usize::MAX;
                n.generation = cur_gen;
                n.open = true;
                self.dijkstra_map[si] = 0;
                open.push(NodeRef { idx: si, f: 0, seq });
                seq += 1;
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.dijkstra_nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.dijkstra_nodes[ci].open = false;

            let cp = self.point(ci);
            self.dijkstra_results.push(PathNode {
                pos: cp,
                cost: current_g,
            });

            if goal == Some(ci) {
                found = true;
                break;
            }

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g.saturating_add(pather.cost(cp, np));
                if tentative > max_cost {
                    continue;
                }

                let n = &mut self.dijkstra_nodes[ni];
                if n.generation == cur_gen {
                    // Settled nodes already hold their final cost.
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }

                n.g = tentative;
                n.parent = ci;
                n.open = true;
                self.dijkstra_map[ni] = tentative;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    seq,
                });
                seq += 1;
            }
        }

        self.nbuf = nbuf;
        found
    }
}
