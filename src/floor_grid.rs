//! Occupancy grid over the store floor plan.
//!
//! [FloorGrid] rasterizes a static obstacle layout into a [BoolGrid] where
//! [true] marks an occupied cell, and maintains connected components in a
//! [UnionFind] structure so that unreachable start/goal pairs are answered
//! in near-constant time instead of exhausting the backtracking search.
//!
//! Cell `(x, y)` covers the unit square `[x, x + 1) x [y, y + 1)` in floor
//! units; the grid y axis corresponds to the floor plan's z axis.

use crate::obstacle::Obstacle;
use crate::PROXIMITY_RADIUS;
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;

/// Center of a grid cell in floor coordinates `(x, z)`.
pub fn cell_center(point: Point) -> (f32, f32) {
    (point.x as f32 + 0.5, point.y as f32 + 0.5)
}

pub(crate) fn manhattan(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Immutable walkability model for one store layout: raw occupancy in a
/// [BoolGrid], connected components in a [UnionFind] and the obstacle list
/// kept around for edge-distance queries.
#[derive(Clone, Debug)]
pub struct FloorGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    obstacles: Vec<Obstacle>,
}

impl FloorGrid {
    /// Rasterizes the obstacles onto a `width` x `height` grid: a cell is
    /// occupied when its center lies inside any obstacle footprint. The
    /// layout is static per store configuration, so this is done once and
    /// the result is immutable.
    pub fn from_layout(width: usize, height: usize, obstacles: &[Obstacle]) -> FloorGrid {
        let mut grid = BoolGrid::new(width, height, false);
        for (x, y) in (0..width).cartesian_product(0..height) {
            let (cx, cz) = cell_center(Point::new(x as i32, y as i32));
            if obstacles.iter().any(|ob| ob.contains(cx, cz)) {
                grid.set(x, y, true);
            }
        }
        let mut floor = FloorGrid {
            grid,
            components: UnionFind::new(width * height),
            obstacles: obstacles.to_vec(),
        };
        floor.generate_components();
        floor
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && self.grid.index_in_bounds(point.x as usize, point.y as usize)
    }

    /// Whether a cell is inside the floor and not occupied by furniture.
    pub fn is_free(&self, point: Point) -> bool {
        self.in_bounds(point) && !self.grid.get(point.x as usize, point.y as usize)
    }

    pub fn free_cell_count(&self) -> usize {
        (0..self.grid.width)
            .cartesian_product(0..self.grid.height)
            .filter(|&(x, y)| !self.grid.get(x, y))
            .count()
    }

    /// The four cardinal neighbours of a cell that are free. Diagonal moves
    /// are not part of the model: a shopper walks one aisle cell at a time.
    pub fn neighbours(&self, point: Point) -> Vec<Point> {
        [
            Point::new(point.x + 1, point.y),
            Point::new(point.x - 1, point.y),
            Point::new(point.x, point.y + 1),
            Point::new(point.x, point.y - 1),
        ]
        .into_iter()
        .filter(|p| self.is_free(*p))
        .collect()
    }

    /// Distance from the cell center to the nearest obstacle edge, if any
    /// obstacle is within [PROXIMITY_RADIUS]. [None] means the cell is in
    /// open floor and gets no proximity preference.
    pub fn edge_proximity(&self, point: Point) -> Option<f32> {
        let (cx, cz) = cell_center(point);
        let nearest = self
            .obstacles
            .iter()
            .map(|ob| ob.edge_distance(cx, cz))
            .fold(f32::INFINITY, f32::min);
        (nearest <= PROXIMITY_RADIUS).then_some(nearest)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components
            .find(self.grid.get_ix(point.x as usize, point.y as usize))
    }

    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are on different components (or outside the
    /// floor), in which case no search can succeed.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            let start_ix = self.grid.get_ix(start.x as usize, start.y as usize);
            let goal_ix = self.grid.get_ix(goal.x as usize, goal.y as usize);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid
    /// neighbours to the same components. Only the right and upper
    /// neighbour need to be linked while sweeping.
    fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        info!("generating connected components for a {}x{} floor", w, h);
        self.components = UnionFind::new(w * h);
        for (x, y) in (0..w).cartesian_product(0..h) {
            if self.grid.get(x, y) {
                continue;
            }
            let point = Point::new(x as i32, y as i32);
            let parent_ix = self.grid.get_ix(x, y);
            for n in [
                Point::new(point.x + 1, point.y),
                Point::new(point.x, point.y + 1),
            ] {
                if self.is_free(n) {
                    let ix = self.grid.get_ix(n.x as usize, n.y as usize);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for FloorGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Floor:")?;
        for y in 0..self.grid.height {
            let values = (0..self.grid.width)
                .map(|x| self.grid.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(center_x: f32, center_z: f32, half_width: f32, half_depth: f32) -> Obstacle {
        Obstacle {
            center_x,
            center_z,
            half_width,
            half_depth,
        }
    }

    #[test]
    fn rasterization_marks_covered_cell_centers() {
        // A 2x2 block centered on (2, 2) covers the four cells whose
        // centers fall strictly inside it.
        let floor = FloorGrid::from_layout(4, 4, &[block(2.0, 2.0, 1.0, 1.0)]);
        for (x, y) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert!(!floor.is_free(Point::new(x, y)));
        }
        assert_eq!(floor.free_cell_count(), 12);
    }

    #[test]
    fn component_generation_splits_on_a_wall() {
        // A wall through the middle column:
        //  ___
        // |.#.|
        // |.#.|
        //  ___
        let floor = FloorGrid::from_layout(3, 2, &[block(1.5, 1.0, 0.6, 1.2)]);
        let p1 = Point::new(0, 0);
        let p2 = Point::new(0, 1);
        let p3 = Point::new(2, 0);
        assert!(floor.reachable(&p1, &p2));
        assert!(floor.unreachable(&p1, &p3));
        assert_eq!(floor.get_component(&p1), floor.get_component(&p2));
    }

    #[test]
    fn out_of_bounds_is_never_free_or_reachable() {
        let floor = FloorGrid::from_layout(3, 3, &[]);
        assert!(!floor.is_free(Point::new(-1, 0)));
        assert!(!floor.is_free(Point::new(0, 3)));
        assert!(floor.unreachable(&Point::new(0, 0), &Point::new(3, 0)));
    }

    #[test]
    fn neighbours_are_cardinal_and_free() {
        let floor = FloorGrid::from_layout(3, 3, &[block(1.5, 0.5, 0.4, 0.4)]);
        let n = floor.neighbours(Point::new(0, 0));
        // (1, 0) is occupied, (0, -1) and (-1, 0) are out of bounds.
        assert_eq!(n, vec![Point::new(0, 1)]);
    }

    #[test]
    fn edge_proximity_bounded_by_radius() {
        let floor = FloorGrid::from_layout(8, 3, &[block(1.0, 1.0, 1.0, 1.0)]);
        // (2, 1) has its center half a unit from the block's right edge.
        let near = floor.edge_proximity(Point::new(2, 1)).unwrap();
        assert!((near - 0.5).abs() < 1e-6);
        // (6, 1) is far out on the open floor.
        assert_eq!(floor.edge_proximity(Point::new(6, 1)), None);
    }

    #[test]
    fn empty_layout_has_no_proximity() {
        let floor = FloorGrid::from_layout(3, 3, &[]);
        assert_eq!(floor.edge_proximity(Point::new(1, 1)), None);
    }
}
