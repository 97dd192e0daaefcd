//! Customer journey generators built on top of [find_path], plus the
//! projection of grid paths into continuous floor coordinates for the
//! animation layer.

use crate::floor_grid::{cell_center, manhattan, FloorGrid};
use crate::search::find_path;
use crate::PathError;
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use rand::prelude::*;

/// How often [browse_path] redraws a goal whose shortest path overshoots
/// the step budget before giving up.
const BROWSE_RETRIES: usize = 8;

/// Fixed endpoints of a store configuration: where customers enter and
/// where they pay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreRoute {
    pub entrance: Point,
    pub checkout: Point,
}

/// A continuous position on the floor, `y` up. The grid y axis maps to `z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// The full visit: entrance to checkout.
pub fn full_path<R: Rng>(
    grid: &FloorGrid,
    route: &StoreRoute,
    rng: &mut R,
) -> Result<Vec<Point>, PathError> {
    find_path(grid, route.entrance, route.checkout, rng)
}

/// A short visit that ends at a randomly drawn cell instead of the
/// checkout: the customer browses and leaves without buying. The goal is
/// drawn uniformly from the free cells reachable from the entrance whose
/// Manhattan distance fits the step budget; a draw whose actual path
/// overshoots the budget is retried a bounded number of times.
pub fn browse_path<R: Rng>(
    grid: &FloorGrid,
    route: &StoreRoute,
    budget: usize,
    rng: &mut R,
) -> Result<Vec<Point>, PathError> {
    if !grid.is_free(route.entrance) {
        return Err(PathError::InvalidStart(route.entrance));
    }
    let candidates = (0..grid.width() as i32)
        .cartesian_product(0..grid.height() as i32)
        .map(|(x, y)| Point::new(x, y))
        .filter(|p| *p != route.entrance && *p != route.checkout)
        .filter(|p| grid.is_free(*p) && grid.reachable(&route.entrance, p))
        .filter(|p| manhattan(&route.entrance, p) as usize <= budget)
        .collect::<Vec<Point>>();
    if candidates.is_empty() {
        info!("no browse goal within {} steps of {}", budget, route.entrance);
        return Err(PathError::NoPathFound);
    }
    for _ in 0..BROWSE_RETRIES {
        let goal = *candidates.choose(rng).unwrap();
        let path = find_path(grid, route.entrance, goal, rng)?;
        if path.len() - 1 <= budget {
            return Ok(path);
        }
        info!(
            "browse goal {} needs {} steps, over the budget of {}",
            goal,
            path.len() - 1,
            budget
        );
    }
    Err(PathError::NoPathFound)
}

/// Projects a grid path onto continuous floor coordinates at a fixed
/// height, one point per cell center. The animation layer interpolates
/// between these.
pub fn project(path: &[Point], height: f32) -> Vec<WorldPoint> {
    path.iter()
        .map(|p| {
            let (x, z) = cell_center(*p);
            WorldPoint { x, y: height, z }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_keeps_order_and_height() {
        let path = vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        let world = project(&path, 0.9);
        assert_eq!(world.len(), 3);
        assert_eq!(world[0], WorldPoint { x: 0.5, y: 0.9, z: 0.5 });
        assert_eq!(world[2], WorldPoint { x: 1.5, y: 0.9, z: 1.5 });
        assert!(world.iter().all(|w| w.y == 0.9));
    }

    #[test]
    fn browse_with_no_room_reports_no_path() {
        // Entrance and checkout next to each other on a 2x1 floor: there is
        // no third cell left to browse to.
        let floor = FloorGrid::from_layout(2, 1, &[]);
        let route = StoreRoute {
            entrance: Point::new(0, 0),
            checkout: Point::new(1, 0),
        };
        assert_eq!(
            browse_path(&floor, &route, 4, &mut StdRng::seed_from_u64(1)),
            Err(PathError::NoPathFound)
        );
    }

    #[test]
    fn browse_from_blocked_entrance_is_invalid() {
        let block = crate::obstacle::Obstacle {
            center_x: 0.5,
            center_z: 0.5,
            half_width: 0.4,
            half_depth: 0.4,
        };
        let floor = FloorGrid::from_layout(3, 3, &[block]);
        let route = StoreRoute {
            entrance: Point::new(0, 0),
            checkout: Point::new(2, 2),
        };
        assert_eq!(
            browse_path(&floor, &route, 4, &mut StdRng::seed_from_u64(1)),
            Err(PathError::InvalidStart(route.entrance))
        );
    }
}
