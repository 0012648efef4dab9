//! Axis-separated movement against the tile grid.
//!
//! ✔ walls and out-of-bounds cells block
//! ✔ doors block until they are mostly open
//! ✔ X is resolved before Y, so the player slides along walls

use glam::Vec2;

use crate::world::{DoorStates, Tile, TileGrid};

/// Doors with openness above this let the player through.
pub const DOOR_WALKABLE: f32 = 0.8;

/// What the caller gets back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,      // final XY, world units
    pub hit_wall: bool, // at least one axis was blocked
}

/// `true` if the player may not stand in cell `(x, y)`.
pub fn is_solid(grid: &TileGrid, doors: &DoorStates, x: i32, y: i32) -> bool {
    match grid.get(x, y) {
        None => true,
        Some(Tile::Empty) => false,
        Some(Tile::Wall(_)) => true,
        Some(Tile::Door { .. }) => doors.openness(x as usize, y as usize) <= DOOR_WALKABLE,
    }
}

#[inline]
fn cell_of(v: f32, tile_size: f32) -> i32 {
    (v / tile_size).floor() as i32
}

/// Move a circle of `radius` by `delta` (world units), one axis at a time.
/// An axis is rejected as a whole if its leading edge would enter a solid
/// cell; the other axis still applies.
pub fn slide_move(
    grid: &TileGrid,
    doors: &DoorStates,
    mut pos: Vec2,
    delta: Vec2,
    radius: f32,
    tile_size: f32,
) -> MoveResult {
    let mut hit_wall = false;

    /* ---- X ---------------------------------------------------------- */
    if delta.x != 0.0 {
        let edge = cell_of(pos.x + delta.x + radius.copysign(delta.x), tile_size);
        let top = cell_of(pos.y - radius, tile_size);
        let bottom = cell_of(pos.y + radius, tile_size);
        if is_solid(grid, doors, edge, top) || is_solid(grid, doors, edge, bottom) {
            hit_wall = true;
        } else {
            pos.x += delta.x;
        }
    }

    /* ---- Y, from the updated X --------------------------------------- */
    if delta.y != 0.0 {
        let edge = cell_of(pos.y + delta.y + radius.copysign(delta.y), tile_size);
        let left = cell_of(pos.x - radius, tile_size);
        let right = cell_of(pos.x + radius, tile_size);
        if is_solid(grid, doors, left, edge) || is_solid(grid, doors, right, edge) {
            hit_wall = true;
        } else {
            pos.y += delta.y;
        }
    }

    MoveResult { pos, hit_wall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Legend;

    const T: f32 = 64.0;

    fn level() -> (TileGrid, DoorStates) {
        let grid = TileGrid::parse(
            "
            11111
            10001
            10401
            10001
            11111
            ",
            &Legend::default(),
        )
        .unwrap();
        let doors = DoorStates::for_grid(&grid);
        (grid, doors)
    }

    #[test]
    fn solidity_by_tile() {
        let (grid, mut doors) = level();
        assert!(is_solid(&grid, &doors, 0, 0));
        assert!(!is_solid(&grid, &doors, 1, 1));
        assert!(is_solid(&grid, &doors, -1, 2));
        assert!(is_solid(&grid, &doors, 2, 5));

        assert!(is_solid(&grid, &doors, 2, 2));
        doors.set_openness(2, 2, 0.8);
        assert!(is_solid(&grid, &doors, 2, 2));
        doors.set_openness(2, 2, 0.81);
        assert!(!is_solid(&grid, &doors, 2, 2));
    }

    #[test]
    fn free_move_is_exact() {
        let (grid, doors) = level();
        let start = Vec2::new(1.5 * T, 1.5 * T);
        let r = slide_move(&grid, &doors, start, Vec2::new(10.0, 5.0), 8.0, T);
        assert_eq!(r.pos, start + Vec2::new(10.0, 5.0));
        assert!(!r.hit_wall);
    }

    #[test]
    fn slides_along_wall() {
        let (grid, doors) = level();
        // hugging the north wall, pushing north-east
        let start = Vec2::new(1.5 * T, T + 9.0);
        let r = slide_move(&grid, &doors, start, Vec2::new(6.0, -4.0), 8.0, T);
        assert!(r.hit_wall);
        assert_eq!(r.pos, Vec2::new(start.x + 6.0, start.y));
    }

    #[test]
    fn closed_door_blocks_open_door_passes() {
        let (grid, mut doors) = level();
        let start = Vec2::new(1.5 * T, 2.5 * T);
        let step = Vec2::new(30.0, 0.0);

        let r = slide_move(&grid, &doors, start, step, 8.0, T);
        assert_eq!(r.pos, start);

        doors.set_openness(2, 2, 1.0);
        let r = slide_move(&grid, &doors, start, step, 8.0, T);
        assert_eq!(r.pos, start + step);
    }
}
