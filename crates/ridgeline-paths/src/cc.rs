//! Flood fill along neighbour steps.

use ridgeline_core::Point;

use crate::Pathfinder;
use crate::traits::Pather;

impl Pathfinder {
    /// Flood-fill from a single point and return every cell reachable from it,
    /// `p` first, in discovery order.
    ///
    /// Steps follow `pather` exactly, so on a directed graph this is the
    /// forward-reachable set. Wrap the pather in
    /// [`Bidirectional`](crate::Bidirectional) to restrict the fill to moves
    /// that can be undone.
    pub fn cc_map<P: Pather>(&mut self, pather: &P, p: Point) -> Vec<Point> {
        let mut result = Vec::new();
        let Some(si) = self.idx(p) else {
            return result;
        };

        self.cc_generation = self.cc_generation.wrapping_add(1);
        let mark = self.cc_generation;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        // Iterative DFS from `p`.
        self.cc_stack.clear();
        self.cc_stack.push(si);
        self.cc_marks[si] = mark;
        result.push(p);

        while let Some(ci) = self.cc_stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if let Some(ni) = self.idx(np) {
                    if self.cc_marks[ni] != mark {
                        self.cc_marks[ni] = mark;
                        self.cc_stack.push(ni);
                        result.push(np);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        result
    }

    /// Whether `p` was reached by the last [`cc_map`](Self::cc_map) call.
    pub fn cc_contains(&self, p: Point) -> bool {
        self.idx(p)
            .is_some_and(|i| self.cc_marks[i] == self.cc_generation && self.cc_generation != 0)
    }
}
