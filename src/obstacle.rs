//! Furniture footprints and the obstacle model built from them.
//!
//! A store layout is a list of furniture items placed on the floor plan.
//! Every item occupies an axis-aligned rectangle; rotation is quantized to
//! quarter turns, so a rotated item is still axis-aligned with its width and
//! depth swapped. Dimensions are carried as an explicit record per item
//! rather than being parsed out of an asset name.

use crate::LayoutError;

/// Footprint of a furniture category in floor units, before rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub depth: f32,
}

impl Dimensions {
    pub fn new(width: f32, depth: f32) -> Dimensions {
        Dimensions { width, depth }
    }
}

/// Quarter-turn rotation around the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Accepts any integer multiple of 90 degrees, including negative angles
    /// (-90 is equivalent to 270). Everything else is an [InvalidRotation]
    /// error; no rounding is done.
    ///
    /// [InvalidRotation]: LayoutError::InvalidRotation
    pub fn from_degrees(degrees: i32) -> Result<Rotation, LayoutError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            _ => Err(LayoutError::InvalidRotation { degrees }),
        }
    }

    /// A quarter or three-quarter turn swaps the footprint's width and depth.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

/// One placed furniture item. `x` and `z` are the footprint center in floor
/// units; the label is only carried for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct FurnitureItem {
    pub label: String,
    pub x: f32,
    pub z: f32,
    pub rotation: Rotation,
    pub dimensions: Dimensions,
}

/// Axis-aligned occupied rectangle on the floor, derived from one furniture
/// item. Immutable for the lifetime of a layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub center_x: f32,
    pub center_z: f32,
    pub half_width: f32,
    pub half_depth: f32,
}

impl Obstacle {
    pub fn from_item(item: &FurnitureItem) -> Obstacle {
        let Dimensions { width, depth } = item.dimensions;
        let (w, d) = if item.rotation.swaps_axes() {
            (depth, width)
        } else {
            (width, depth)
        };
        Obstacle {
            center_x: item.x,
            center_z: item.z,
            half_width: w / 2.0,
            half_depth: d / 2.0,
        }
    }

    /// Whether a floor point lies strictly inside the footprint. The
    /// comparison is plain `f32` ordering, so a point on the boundary
    /// counts as outside when the coordinates and extents are exactly
    /// representable; furniture flush against a cell center then leaves
    /// that cell walkable.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        (x - self.center_x).abs() < self.half_width && (z - self.center_z).abs() < self.half_depth
    }

    /// Distance from a floor point to the nearest edge of the footprint.
    /// Zero for points inside.
    pub fn edge_distance(&self, x: f32, z: f32) -> f32 {
        let dx = ((x - self.center_x).abs() - self.half_width).max(0.0);
        let dz = ((z - self.center_z).abs() - self.half_depth).max(0.0);
        (dx * dx + dz * dz).sqrt()
    }
}

/// Builds one [Obstacle] per furniture item, in input order. Overlapping
/// footprints are kept as-is; nothing is filtered or merged.
pub fn build_obstacles(items: &[FurnitureItem]) -> Vec<Obstacle> {
    items.iter().map(Obstacle::from_item).collect()
}
