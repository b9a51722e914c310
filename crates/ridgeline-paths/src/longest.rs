use log::trace;
use ridgeline_core::Point;

use crate::pathfinder::{Pathfinder, Route};
use crate::traits::Pather;

impl Pathfinder {
    /// Find the longest simple path from `from` to `to` by enumerating every
    /// one of them.
    ///
    /// Depth-first with an explicit stack of partial paths. A branch that
    /// reaches `to` is recorded and stops there; a branch that steps back onto
    /// its own path is dropped. Among equally long paths the first one found
    /// wins. The route's distance is its step count.
    ///
    /// The search is exponential in the size of the graph; run it on a graph
    /// reduced by [`prune`](crate::prune()).
    pub fn longest_path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<Route> {
        self.idx(from)?;
        self.idx(to)?;
        if from == to {
            return Some(Route::new(0, vec![from]));
        }

        let mut stack: Vec<Vec<Point>> = vec![vec![from]];
        let mut best: Option<Vec<Point>> = None;
        let mut candidates = 0usize;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(path) = stack.pop() {
            let Some(&tip) = path.last() else {
                continue;
            };
            nbuf.clear();
            pather.neighbors(tip, &mut nbuf);

            for &np in nbuf.iter() {
                if np == to {
                    candidates += 1;
                    if best.as_ref().is_none_or(|b| path.len() + 1 > b.len()) {
                        let mut done = path.clone();
                        done.push(np);
                        best = Some(done);
                    }
                    continue;
                }
                if path.contains(&np) {
                    continue;
                }
                let mut next = path.clone();
                next.push(np);
                stack.push(next);
            }
        }

        self.nbuf = nbuf;
        trace!("longest {from} -> {to}: {candidates} candidate paths");

        best.map(|path| Route::new(path.len() as i32 - 1, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ClimbOne, Graph};
    use crate::testing::{HILL, trail};

    #[test]
    fn picks_the_longer_branch() {
        // Two ways around the wall: straight along the top, or down and back
        // up through the bottom row.
        let g = Graph::build("SaaE\namaa\naaaa", trail).unwrap();
        let mut pf = Pathfinder::new(g.range());
        let shortest = pf.dijkstra_path(&g, g.start(), g.end());
        assert_eq!(shortest.distance, 3);
        let longest = pf.longest_path(&g, g.start(), g.end()).unwrap();
        // S starts the path, so only one of its two dead-end neighbours can
        // be passed through: 10 cells, 9 steps.
        assert_eq!(longest.distance, 9);
        assert_eq!(longest.path.len(), 10);
        assert_eq!(longest.origin(), Some(g.start()));
        assert_eq!(longest.goal(), Some(g.end()));
        let mut seen = longest.path.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), longest.path.len());
        for w in longest.path.windows(2) {
            assert!(g.has_edge(w[0], w[1]));
        }
    }

    #[test]
    fn no_candidate() {
        let g = Graph::build("SabE", ClimbOne).unwrap();
        let mut pf = Pathfinder::new(g.range());
        assert!(pf.longest_path(&g, g.start(), g.end()).is_none());
    }

    #[test]
    fn trivial_queries() {
        let g = Graph::build(HILL, ClimbOne).unwrap();
        let mut pf = Pathfinder::new(g.range());
        assert_eq!(
            pf.longest_path(&g, g.end(), g.end()),
            Some(Route::new(0, vec![g.end()]))
        );
        assert!(pf.longest_path(&g, g.start(), Point::new(-1, 0)).is_none());
    }

    #[test]
    fn single_corridor() {
        let g = Graph::build("SabcE", trail).unwrap();
        let mut pf = Pathfinder::new(g.range());
        let route = pf.longest_path(&g, g.start(), g.end()).unwrap();
        assert_eq!(route.distance, 4);
        assert_eq!(route, pf.dijkstra_path(&g, g.start(), g.end()));
    }
}
