use ridgeline_core::Point;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with a heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost for A* to stay optimal.
    fn estimate(&self, from: Point, to: Point) -> i32;

    /// Height gained when stepping from `from` to adjacent `to`.
    ///
    /// Only terrain-aware priority strategies look at this; flat pathers can
    /// keep the default.
    fn climb(&self, _from: Point, _to: Point) -> i32 {
        0
    }
}

impl<P: Pather + ?Sized> Pather for &P {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        (**self).neighbors(p, buf)
    }
}

impl<P: WeightedPather + ?Sized> WeightedPather for &P {
    fn cost(&self, from: Point, to: Point) -> i32 {
        (**self).cost(from, to)
    }
}

impl<P: AstarPather + ?Sized> AstarPather for &P {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        (**self).estimate(from, to)
    }

    fn climb(&self, from: Point, to: Point) -> i32 {
        (**self).climb(from, to)
    }
}

/// Wraps a pather and swaps its heuristic for `estimate`.
///
/// ```
/// use ridgeline_paths::{ClimbOne, Estimated, Graph, Pathfinder};
///
/// let graph = Graph::build("Sabcdefghijklm\nEzyxwvutsrqpon", ClimbOne).unwrap();
/// let mut pf = Pathfinder::new(graph.range());
///
/// // Dijkstra-like A*: a zero heuristic.
/// let flat = Estimated::new(&graph, |_, _| 0);
/// let route = pf.astar_path(&flat, graph.start(), graph.end()).unwrap();
/// let guided = pf.astar_path(&graph, graph.start(), graph.end()).unwrap();
/// assert_eq!(route.distance, 27);
/// assert_eq!(route.distance, guided.distance);
/// ```
pub struct Estimated<P, H> {
    inner: P,
    estimate: H,
}

impl<P, H> Estimated<P, H>
where
    P: WeightedPather,
    H: Fn(Point, Point) -> i32,
{
    pub fn new(inner: P, estimate: H) -> Self {
        Self { inner, estimate }
    }
}

impl<P: Pather, H> Pather for Estimated<P, H> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.inner.neighbors(p, buf)
    }
}

impl<P: WeightedPather, H> WeightedPather for Estimated<P, H> {
    fn cost(&self, from: Point, to: Point) -> i32 {
        self.inner.cost(from, to)
    }
}

impl<P, H> AstarPather for Estimated<P, H>
where
    P: WeightedPather,
    H: Fn(Point, Point) -> i32,
{
    fn estimate(&self, from: Point, to: Point) -> i32 {
        (self.estimate)(from, to)
    }
}

/// Restricts a pather to moves that can be undone: `p → q` is kept only if
/// `q → p` is also a neighbor step.
pub struct Bidirectional<P> {
    inner: P,
}

impl<P: Pather> Bidirectional<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Pather> Pather for Bidirectional<P> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let mut forward = Vec::with_capacity(4);
        self.inner.neighbors(p, &mut forward);
        let mut back = Vec::with_capacity(4);
        for q in forward {
            back.clear();
            self.inner.neighbors(q, &mut back);
            if back.contains(&p) {
                buf.push(q);
            }
        }
    }
}
