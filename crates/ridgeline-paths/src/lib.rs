//! Path queries over graphs derived from heightmaps.
//!
//! A [`Graph`] is built from heightmap text and a [`StepRule`] that decides
//! which moves between adjacent cells are allowed. On top of it this crate
//! provides:
//!
//! - **Dijkstra** shortest paths and distance maps ([`Pathfinder::dijkstra_path`],
//!   [`Pathfinder::dijkstra_map`])
//! - **A\*** with pluggable frontier ordering ([`Pathfinder::astar_path`],
//!   [`Pathfinder::astar_path_with`], [`PriorityStrategy`])
//! - **Pruning** of cells that cannot lie on a start → end path ([`prune()`])
//! - **Longest simple path** by exhaustive search ([`Pathfinder::longest_path`])
//! - **Launch selection**, the best of many starts ([`Pathfinder::best_launch`])
//! - **Flood fill** ([`Pathfinder::cc_map`])
//!
//! All searches run through [`Pathfinder`], which owns and reuses internal
//! caches so that repeated queries on the same grid size do not reallocate.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | flood fill, longest path |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! ```
//! use ridgeline_paths::{ClimbOne, Graph, Pathfinder};
//!
//! let graph = Graph::build("SabcdefghijklmnopqrstuvwxyzE", ClimbOne).unwrap();
//! let mut pf = Pathfinder::new(graph.range());
//! let route = pf.astar_path(&graph, graph.start(), graph.end()).unwrap();
//! assert_eq!(route.distance, 27);
//! assert!(Graph::build("SabE", ClimbOne).is_ok());
//! ```

mod astar;
mod cc;
mod dijkstra;
mod distance;
mod graph;
mod launch;
mod longest;
mod pathfinder;
mod prune;
mod strategy;
mod traits;

#[cfg(test)]
mod testing;

pub use astar::SearchConfig;
pub use distance::{euclidean, manhattan};
pub use graph::{ClimbOne, Descend, DirectedEdge, Graph, Node, StepRule};
pub use launch::{Launch, viable_launch_point};
pub use pathfinder::{PathNode, Pathfinder, Route, UNREACHABLE};
pub use prune::{PruneStats, prune};
pub use strategy::{Alignment, Bearing, ClimbFirst, PriorityStrategy, Score, Step, SumCost};
pub use traits::{AstarPather, Bidirectional, Estimated, Pather, WeightedPather};

pub use ridgeline_core::{Elevation, GridError, Heightmap, Point, Range};
