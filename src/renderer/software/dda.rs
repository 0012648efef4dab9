//! Grid DDA: walk a ray cell by cell until it meets a wall or a door sliver.

use glam::Vec2;

use crate::world::{DoorStates, Tile, TileGrid, TextureId};

/// Added to a ray's direction components before inverting them, so an
/// axis-aligned ray gets a huge (finite) step instead of a division by zero.
pub const RAY_EPSILON: f32 = 1e-30;

/// Doors at least this open let every ray through.
pub const DOOR_PASSABLE: f32 = 0.98;

/// Grid axis crossed by the last DDA step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Stepped along X: the face hit is perpendicular to X.
    X,
    /// Stepped along Y.
    Y,
}

/// Where and what a ray struck.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    pub cell: (i32, i32),
    pub tex: TextureId,
    pub side: Side,
    /// Distance along the (unit) ray, in grid units. Not fisheye-corrected.
    pub distance: f32,
    /// Horizontal texture coordinate in `[0, 1)`, door slide included.
    pub wall_x: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RayHit {
    Wall(WallHit),
    /// Ray left the map without touching anything.
    OutOfBounds,
}

/// Texture coordinate of the visible door sliver hit at `hit_x`, or `None`
/// if the ray slips through the gap the door has opened.
///
/// The door slides along its own face: the visible part shrinks as
/// `openness` grows and its texture shifts by the same amount.
#[inline]
pub fn door_sliver(hit_x: f32, openness: f32) -> Option<f32> {
    if openness >= DOOR_PASSABLE || hit_x + openness >= 1.0 {
        None
    } else {
        Some(hit_x + openness)
    }
}

/// Trace one ray from `origin` (grid units) along the unit vector `dir`.
///
/// The starting cell is never tested, so a viewer standing inside a door
/// frame still sees out of it. Terminates because every iteration moves one
/// cell and leaving the grid returns [`RayHit::OutOfBounds`].
pub fn cast_ray(grid: &TileGrid, doors: &DoorStates, origin: Vec2, dir: Vec2) -> RayHit {
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    let delta_x = (1.0 / (dir.x + RAY_EPSILON)).abs();
    let delta_y = (1.0 / (dir.y + RAY_EPSILON)).abs();

    let (step_x, mut side_x) = if dir.x >= 0.0 {
        (1, (map_x as f32 + 1.0 - origin.x) * delta_x)
    } else {
        (-1, (origin.x - map_x as f32) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y >= 0.0 {
        (1, (map_y as f32 + 1.0 - origin.y) * delta_y)
    } else {
        (-1, (origin.y - map_y as f32) * delta_y)
    };

    loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            Side::X
        } else {
            side_y += delta_y;
            map_y += step_y;
            Side::Y
        };

        let Some(tile) = grid.get(map_x, map_y) else {
            return RayHit::OutOfBounds;
        };

        let (tex, is_door) = match tile {
            Tile::Empty => continue,
            Tile::Wall(tex) => (tex, false),
            Tile::Door { tex, .. } => (tex, true),
        };

        // distance along the ray to the face we just crossed
        let distance = match side {
            Side::X => (map_x as f32 - origin.x + (1 - step_x) as f32 * 0.5) / dir.x,
            Side::Y => (map_y as f32 - origin.y + (1 - step_y) as f32 * 0.5) / dir.y,
        };
        let along = match side {
            Side::X => origin.y + distance * dir.y,
            Side::Y => origin.x + distance * dir.x,
        };
        let hit_x = along - along.floor();

        let wall_x = if is_door {
            match door_sliver(hit_x, doors.openness(map_x as usize, map_y as usize)) {
                Some(u) => u,
                None => continue,
            }
        } else {
            hit_x
        };

        return RayHit::Wall(WallHit {
            cell: (map_x, map_y),
            tex,
            side,
            distance,
            wall_x,
        });
    }
}
