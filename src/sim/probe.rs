//! "What is in front of me" queries for the use key and the HUD prompt.

use crate::{
    sim::doors::DOOR_SHUT,
    world::{DoorStates, Pose, TileGrid},
};

/// How far ahead, in cells, the player can reach.
pub const REACH: f32 = 1.5;

/// Cell `reach` tiles ahead of the player along the heading.
pub fn cell_ahead(pose: &Pose, tile_size: f32, reach: f32) -> (i32, i32) {
    let p = (pose.grid_pos(tile_size) + pose.forward() * reach).floor();
    (p.x as i32, p.y as i32)
}

/// The in-bounds cell the use key targets, if any.
pub fn use_target(pose: &Pose, grid: &TileGrid, tile_size: f32) -> Option<(usize, usize)> {
    let (x, y) = cell_ahead(pose, tile_size, REACH);
    grid.in_bounds(x, y).then_some((x as usize, y as usize))
}

/// A shut door within reach, for the "press E" prompt.
pub fn door_ahead(
    pose: &Pose,
    grid: &TileGrid,
    doors: &DoorStates,
    tile_size: f32,
) -> Option<(usize, usize)> {
    let (x, y) = use_target(pose, grid, tile_size)?;
    let tile = grid.get(x as i32, y as i32)?;
    (tile.is_door() && doors.openness(x, y) < DOOR_SHUT).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Legend;
    use glam::Vec2;
    use std::f32::consts::PI;

    const T: f32 = 64.0;

    fn level() -> (TileGrid, DoorStates) {
        let grid = TileGrid::parse(
            "
            111111
            100401
            111111
            ",
            &Legend::default(),
        )
        .unwrap();
        let doors = DoorStates::for_grid(&grid);
        (grid, doors)
    }

    #[test]
    fn finds_shut_door_in_reach() {
        let (grid, mut doors) = level();
        let pose = Pose::new(Vec2::new(2.0 * T, 1.5 * T), 0.0, 0.0);
        assert_eq!(door_ahead(&pose, &grid, &doors, T), Some((3, 1)));

        doors.set_openness(3, 1, 0.5);
        assert_eq!(door_ahead(&pose, &grid, &doors, T), None);
    }

    #[test]
    fn door_out_of_reach_or_behind() {
        let (grid, doors) = level();
        let far = Pose::new(Vec2::new(1.2 * T, 1.5 * T), 0.0, 0.0);
        assert_eq!(cell_ahead(&far, T, REACH), (2, 1));
        assert_eq!(door_ahead(&far, &grid, &doors, T), None);

        let behind = Pose::new(Vec2::new(2.0 * T, 1.5 * T), PI, 0.0);
        assert_eq!(door_ahead(&behind, &grid, &doors, T), None);
    }

    #[test]
    fn use_target_stays_in_bounds() {
        let (grid, _) = level();
        let pose = Pose::new(Vec2::new(1.5 * T, 1.5 * T), PI / 2.0, 0.0);
        // 1.5 tiles south of row 1 is row 3, outside a 3-row map
        assert_eq!(use_target(&pose, &grid, T), None);
    }
}
