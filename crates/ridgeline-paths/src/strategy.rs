//! Frontier ordering for A*.
//!
//! A [`PriorityStrategy`] turns a candidate relaxation ([`Step`]) into a key;
//! the frontier pops the smallest key first. [`SumCost`] is the textbook
//! `g + h` ordering and the only one that guarantees a shortest path (with an
//! admissible heuristic). The others steer the search by terrain or heading
//! and are kept for experiments and benchmarks; they can return longer
//! routes.

use std::cmp::{Ordering, Reverse};
use std::f64::consts::PI;

use ridgeline_core::Point;

use crate::distance::euclidean;

/// Everything a strategy may look at when ranking `current → neighbor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Cost from the search origin to `neighbor` through `current`.
    pub g: i32,
    /// Heuristic estimate from `neighbor` to `goal`.
    pub h: i32,
    pub current: Point,
    pub neighbor: Point,
    pub start: Point,
    pub goal: Point,
    /// Height gained on this move (negative when descending).
    pub climb: i32,
}

impl Step {
    /// The classic A* score `g + h`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g + self.h
    }

    /// Cosine of the angle between the move and the straight line from
    /// `current` to `goal`, or 0 when either vector is null.
    pub fn alignment(&self) -> f64 {
        let heading = self.neighbor - self.current;
        let bearing = self.goal - self.current;
        let norm = euclidean(self.neighbor, self.current) * euclidean(self.goal, self.current);
        if norm == 0.0 {
            return 0.0;
        }
        f64::from(heading.dot(bearing)) / norm
    }
}

/// Ranks frontier entries. Smaller keys are expanded first.
pub trait PriorityStrategy {
    type Key: Ord;

    fn priority(&self, step: &Step) -> Self::Key;
}

impl<K: Ord, F: Fn(&Step) -> K> PriorityStrategy for F {
    type Key = K;

    fn priority(&self, step: &Step) -> K {
        self(step)
    }
}

/// `g + h`. Optimal with an admissible heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumCost;

impl PriorityStrategy for SumCost {
    type Key = i32;

    fn priority(&self, step: &Step) -> i32 {
        step.f()
    }
}

/// Steepest climb first, `g + h` among equal climbs. Not optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimbFirst;

impl PriorityStrategy for ClimbFirst {
    type Key = (Reverse<i32>, i32);

    fn priority(&self, step: &Step) -> Self::Key {
        (Reverse(step.climb), step.f())
    }
}

/// `g + h` minus the cosine between the move and the goal direction, so
/// moves pointing at the goal win among similar scores. Not optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alignment;

impl PriorityStrategy for Alignment {
    type Key = Score;

    fn priority(&self, step: &Step) -> Score {
        Score(f64::from(step.f()) - step.alignment())
    }
}

/// `g + h` plus the angle (as a fraction of π) between the move and the goal
/// direction. Not optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bearing;

impl PriorityStrategy for Bearing {
    type Key = Score;

    fn priority(&self, step: &Step) -> Score {
        let angle = step.alignment().clamp(-1.0, 1.0).acos();
        Score(f64::from(step.f()) + angle / PI)
    }
}

/// Totally ordered `f64` key.
#[derive(Debug, Clone, Copy)]
pub struct Score(pub f64);

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(current: Point, neighbor: Point, goal: Point) -> Step {
        Step {
            g: 3,
            h: 4,
            current,
            neighbor,
            start: Point::ZERO,
            goal,
            climb: 0,
        }
    }

    #[test]
    fn alignment_is_a_cosine() {
        let c = Point::new(0, 0);
        let goal = Point::new(5, 0);
        assert!((step(c, Point::new(1, 0), goal).alignment() - 1.0).abs() < 1e-9);
        assert!((step(c, Point::new(-1, 0), goal).alignment() + 1.0).abs() < 1e-9);
        assert!(step(c, Point::new(0, 1), goal).alignment().abs() < 1e-9);
        assert_eq!(step(c, c, goal).alignment(), 0.0);
        assert_eq!(step(goal, Point::new(6, 0), goal).alignment(), 0.0);
    }

    #[test]
    fn sum_cost_is_f() {
        let s = step(Point::ZERO, Point::new(1, 0), Point::new(4, 0));
        assert_eq!(SumCost.priority(&s), 7);
    }

    #[test]
    fn climb_first_prefers_steep_moves() {
        let mut flat = step(Point::ZERO, Point::new(1, 0), Point::new(4, 0));
        let mut steep = flat;
        steep.climb = 1;
        steep.g = 10;
        assert!(ClimbFirst.priority(&steep) < ClimbFirst.priority(&flat));
        flat.climb = 1;
        assert!(ClimbFirst.priority(&flat) < ClimbFirst.priority(&steep));
    }

    #[test]
    fn heading_strategies_break_f_ties() {
        let goal = Point::new(4, 0);
        let toward = step(Point::ZERO, Point::new(1, 0), goal);
        let sideways = step(Point::ZERO, Point::new(0, 1), goal);
        assert!(Alignment.priority(&toward) < Alignment.priority(&sideways));
        assert!(Bearing.priority(&toward) < Bearing.priority(&sideways));
        // Two units of f outweigh any heading term.
        let mut cheaper = sideways;
        cheaper.g -= 2;
        assert!(Alignment.priority(&cheaper) < Alignment.priority(&toward));
        assert!(Bearing.priority(&cheaper) < Bearing.priority(&toward));
    }

    #[test]
    fn closures_are_strategies() {
        let h_only = |s: &Step| s.h;
        let s = step(Point::ZERO, Point::new(1, 0), Point::new(4, 0));
        assert_eq!(h_only.priority(&s), 4);
    }

    #[test]
    fn scores_order_totally() {
        let mut v = vec![Score(2.5), Score(-1.0), Score(0.0)];
        v.sort();
        assert_eq!(v, vec![Score(-1.0), Score(0.0), Score(2.5)]);
    }
}
