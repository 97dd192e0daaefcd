//! # shopfloor_pathing
//!
//! Grid-based walking-path generation for retail floor plans. A static
//! furniture layout is rasterized into an occupancy grid over which simple
//! paths are found by a backtracking depth-first search with iterative
//! deepening, biased towards cells that lie close to furniture edges to
//! emulate a shopper browsing the displays. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to answer unreachable queries without exhausting the backtracker.
//!
//! Tie-breaking between equally attractive steps is driven by an injected
//! random source, so a fixed seed reproduces the exact same path.

pub mod floor_grid;
pub mod journey;
pub mod obstacle;
pub mod search;

pub use crate::floor_grid::FloorGrid;
pub use crate::journey::{browse_path, full_path, project, StoreRoute, WorldPoint};
pub use crate::obstacle::{build_obstacles, Dimensions, FurnitureItem, Obstacle, Rotation};
pub use crate::search::find_path;

use grid_util::point::Point;
use thiserror::Error;

/// Obstacle-edge distance (in floor units) within which a cell counts as
/// walking near furniture and is preferred during search.
pub const PROXIMITY_RADIUS: f32 = 1.5;

/// Errors raised while turning a furniture layout into obstacles.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Furniture may only be rotated in quarter turns; anything else is
    /// rejected rather than rounded so a bad layout fails loudly.
    #[error("furniture rotation of {degrees} degrees is not a quarter turn")]
    InvalidRotation { degrees: i32 },
}

/// Errors raised by the path search and the journey generators.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("start cell {0} is occupied or outside the floor")]
    InvalidStart(Point),
    #[error("goal cell {0} is occupied or outside the floor")]
    InvalidGoal(Point),
    #[error("no path exists between the requested cells")]
    NoPathFound,
}
