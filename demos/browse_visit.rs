use grid_util::point::Point;
use rand::prelude::*;
use shopfloor_pathing::{
    browse_path, build_obstacles, project, Dimensions, FloorGrid, FurnitureItem, Rotation,
    StoreRoute,
};

// Generates a handful of short browse-only visits: each customer enters,
// wanders at most eight steps towards a random spot on the floor and leaves
// without reaching the checkout. The grid paths are projected to continuous
// floor coordinates at walking height, ready for animation.

fn main() {
    let shelf = |label: &str, x: f32, z: f32| FurnitureItem {
        label: label.to_owned(),
        x,
        z,
        rotation: Rotation::R90,
        dimensions: Dimensions::new(1.7, 0.5),
    };
    let items = vec![
        shelf("shelf_a", 3.5, 3.0),
        shelf("shelf_b", 3.5, 6.0),
        shelf("shelf_c", 10.5, 3.0),
        shelf("shelf_d", 10.5, 6.0),
    ];
    let floor = FloorGrid::from_layout(14, 13, &build_obstacles(&items));
    let route = StoreRoute {
        entrance: Point::new(6, 0),
        checkout: Point::new(6, 12),
    };
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        match browse_path(&floor, &route, 8, &mut rng) {
            Ok(path) => {
                let world = project(&path, 0.85);
                println!("customer {seed} browsed {} steps:", path.len() - 1);
                for w in world {
                    println!("  ({:.1}, {:.1}, {:.1})", w.x, w.y, w.z);
                }
            }
            Err(err) => println!("customer {seed} skipped: {err}"),
        }
    }
}
