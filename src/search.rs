//! Backtracking path search over a [FloorGrid].
//!
//! The search walks cell by cell like the shopper it models: from the cell
//! at the tip of the candidate path it steps to the most attractive free
//! neighbour, and when it runs out of options it marks the tip as a dead
//! end, pops it and resumes from the previous cell. Dead-end marks only
//! hold for the path prefix they were recorded under and are cleared once
//! the search backtracks past that prefix.
//!
//! A single depth-first descent has no notion of path length, so the search
//! is wrapped in iterative deepening: attempts run under a step budget that
//! starts at the Manhattan distance between the endpoints and grows by two
//! (step parity on a 4-connected grid) until a path fits. The first budget
//! that succeeds yields a shortest path; within a budget, the preference
//! for obstacle-adjacent cells decides which of the shortest paths is found.

use crate::floor_grid::{manhattan, FloorGrid};
use crate::PathError;
use fxhash::{FxBuildHasher, FxHashMap};
use grid_util::point::Point;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{info, warn};
use rand::prelude::*;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Finds a simple 4-connected path from `start` to `goal` that avoids every
/// occupied cell. The random source only breaks ties between equally ranked
/// neighbours, so the result is reproducible for a fixed seed.
///
/// Fails fast with [InvalidStart]/[InvalidGoal] for occupied or out-of-bounds
/// endpoints and answers [NoPathFound] from the component structure without
/// searching when the endpoints are disconnected.
///
/// [InvalidStart]: PathError::InvalidStart
/// [InvalidGoal]: PathError::InvalidGoal
/// [NoPathFound]: PathError::NoPathFound
pub fn find_path<R: Rng>(
    grid: &FloorGrid,
    start: Point,
    goal: Point,
    rng: &mut R,
) -> Result<Vec<Point>, PathError> {
    if !grid.is_free(start) {
        return Err(PathError::InvalidStart(start));
    }
    if !grid.is_free(goal) {
        return Err(PathError::InvalidGoal(goal));
    }
    if start == goal {
        return Ok(vec![start]);
    }
    if grid.unreachable(&start, &goal) {
        info!("{} is not reachable from {}", goal, start);
        return Err(PathError::NoPathFound);
    }
    // A simple path can never visit more cells than there are free cells.
    let max_steps = grid.free_cell_count() as i32 - 1;
    let mut budget = manhattan(&start, &goal);
    loop {
        if let Some(path) = attempt(grid, start, goal, budget, rng) {
            debug_assert!(path.iter().tuple_windows().all(|(a, b)| manhattan(a, b) == 1));
            return Ok(path);
        }
        budget += 2;
        if budget > max_steps {
            // The component check above makes this unreachable in practice.
            warn!(
                "search from {} to {} exhausted every step budget up to {}",
                start, goal, max_steps
            );
            return Err(PathError::NoPathFound);
        }
    }
}

/// One backtracking descent under a fixed step budget. Returns the path on
/// success, [None] once the start cell itself is exhausted.
fn attempt<R: Rng>(
    grid: &FloorGrid,
    start: Point,
    goal: Point,
    budget: i32,
    rng: &mut R,
) -> Option<Vec<Point>> {
    // The candidate path doubles as the on-path cell state: an IndexSet
    // keeps insertion order for the result while giving O(1) membership
    // checks and pops.
    let mut on_path: FxIndexSet<Point> = FxIndexSet::default();
    // Dead ends tagged with the path depth they were recorded under.
    let mut dead_ends: FxHashMap<Point, usize> = FxHashMap::default();
    on_path.insert(start);
    loop {
        let current = *on_path.last().unwrap();
        if current == goal {
            return Some(on_path.into_iter().collect());
        }
        let steps_taken = on_path.len() as i32 - 1;
        match pick_step(grid, &on_path, &dead_ends, current, goal, budget - steps_taken, rng) {
            Some(next) => {
                on_path.insert(next);
            }
            None => {
                let exhausted = on_path.pop().unwrap();
                if on_path.is_empty() {
                    return None;
                }
                // The mark only holds while the current prefix is intact;
                // marks recorded under a longer prefix are cleared so other
                // branches may try those cells again.
                dead_ends.insert(exhausted, on_path.len());
                dead_ends.retain(|_, depth| *depth <= on_path.len());
            }
        }
    }
}

/// Ranks and picks the next step. Acceptable neighbours are free, not on the
/// path, not dead-ended and still able to reach the goal within the budget.
fn pick_step<R: Rng>(
    grid: &FloorGrid,
    on_path: &FxIndexSet<Point>,
    dead_ends: &FxHashMap<Point, usize>,
    current: Point,
    goal: Point,
    budget_left: i32,
    rng: &mut R,
) -> Option<Point> {
    let mut candidates = grid
        .neighbours(current)
        .into_iter()
        .filter(|n| !on_path.contains(n) && !dead_ends.contains_key(n))
        .filter(|n| manhattan(n, &goal) + 1 <= budget_left)
        .collect::<Vec<Point>>();
    // A seeded shuffle followed by a stable sort leaves equally ranked
    // neighbours in a random relative order that a fixed seed reproduces.
    candidates.shuffle(rng);
    candidates.sort_by_key(|n| step_rank(grid, n, &goal));
    candidates.first().copied()
}

/// Neighbours hugging a furniture edge rank before open-floor neighbours,
/// which in turn rank by remaining Manhattan distance to the goal.
fn step_rank(grid: &FloorGrid, candidate: &Point, goal: &Point) -> (i32, i32) {
    match grid.edge_proximity(*candidate) {
        Some(distance) => (0, (distance * 100.0).round() as i32),
        None => (1, manhattan(candidate, goal)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::Obstacle;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn center_block() -> Obstacle {
        Obstacle {
            center_x: 1.5,
            center_z: 1.5,
            half_width: 0.5,
            half_depth: 0.5,
        }
    }

    /// A path is found on a 3x3 grid with shape
    ///  ___
    /// |S  |
    /// | # |
    /// |  E|
    ///  ___
    /// where # marks the blocked center cell.
    #[test]
    fn detours_around_a_blocked_center() {
        let floor = FloorGrid::from_layout(3, 3, &[center_block()]);
        let path = find_path(&floor, Point::new(0, 0), Point::new(2, 2), &mut seeded()).unwrap();
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(2, 2)));
        // Minimal detour length on the 4-grid.
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Point::new(1, 1)));
    }

    #[test]
    fn start_equals_goal_is_a_single_cell_path() {
        let floor = FloorGrid::from_layout(3, 3, &[]);
        let p = Point::new(1, 2);
        assert_eq!(find_path(&floor, p, p, &mut seeded()), Ok(vec![p]));
    }

    #[test]
    fn occupied_endpoints_fail_fast() {
        let floor = FloorGrid::from_layout(3, 3, &[center_block()]);
        let blocked = Point::new(1, 1);
        let free = Point::new(0, 0);
        assert_eq!(
            find_path(&floor, blocked, free, &mut seeded()),
            Err(PathError::InvalidStart(blocked))
        );
        assert_eq!(
            find_path(&floor, free, blocked, &mut seeded()),
            Err(PathError::InvalidGoal(blocked))
        );
        assert_eq!(
            find_path(&floor, free, Point::new(5, 0), &mut seeded()),
            Err(PathError::InvalidGoal(Point::new(5, 0)))
        );
    }

    #[test]
    fn disconnected_endpoints_report_no_path() {
        // A full-height wall through the middle column.
        let wall = Obstacle {
            center_x: 1.5,
            center_z: 1.5,
            half_width: 0.6,
            half_depth: 1.6,
        };
        let floor = FloorGrid::from_layout(3, 3, &[wall]);
        assert_eq!(
            find_path(&floor, Point::new(0, 1), Point::new(2, 1), &mut seeded()),
            Err(PathError::NoPathFound)
        );
    }

    #[test]
    fn same_seed_reproduces_the_same_path() {
        let floor = FloorGrid::from_layout(6, 6, &[center_block()]);
        let start = Point::new(0, 5);
        let goal = Point::new(5, 0);
        let first = find_path(&floor, start, goal, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = find_path(&floor, start, goal, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }
}
