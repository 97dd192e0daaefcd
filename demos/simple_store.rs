use grid_util::point::Point;
use rand::prelude::*;
use shopfloor_pathing::{
    build_obstacles, full_path, Dimensions, FloorGrid, FurnitureItem, Rotation, StoreRoute,
};

// In this demo a full entrance-to-checkout path is found on a 14x13 store
// floor with a 2x2 display table in the middle:
//
//   . . . . . . G . . . . . . .
//   . . . . . . . . . . . . . .
//   . . . . . . # # . . . . . .
//   . . . . . . # # . . . . . .
//   . . . . . . . . . . . . . .
//   . . . . . . S . . . . . . .
//
// where # marks the table, S the entrance and G the checkout. The walker
// sidesteps the table and hugs its edge on the way past.

fn main() {
    let table = FurnitureItem {
        label: "display_table".to_owned(),
        x: 7.0,
        z: 6.0,
        rotation: Rotation::R0,
        dimensions: Dimensions::new(2.0, 2.0),
    };
    let floor = FloorGrid::from_layout(14, 13, &build_obstacles(&[table]));
    println!("{}", floor);
    let route = StoreRoute {
        entrance: Point::new(6, 0),
        checkout: Point::new(6, 12),
    };
    let mut rng = StdRng::seed_from_u64(0);
    let path = full_path(&floor, &route, &mut rng).unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
