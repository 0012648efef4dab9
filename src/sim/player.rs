use glam::Vec2;

use super::collision::{MoveResult, slide_move};
use crate::world::{DoorStates, Pose, TileGrid};

/// One tic worth of player intent, filled from the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (left / right)
    pub look: f32,    // –1 … +1  (down / up)
    pub run: bool,    // Shift
    pub use_act: bool,
}

/// Movement tuning, per tic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walker {
    /// World units per tic at full forward input.
    pub speed: f32,
    /// Sideways speed relative to `speed`.
    pub strafe_factor: f32,
    pub run_factor: f32,
    /// Radians per tic.
    pub turn_speed: f32,
    /// Pitch rows per tic.
    pub look_speed: f32,
    /// Collision radius in world units.
    pub radius: f32,
}

impl Default for Walker {
    fn default() -> Self {
        Self {
            speed: 3.0,
            strafe_factor: 0.7,
            run_factor: 2.0,
            turn_speed: 0.05,
            look_speed: 6.0,
            radius: 10.0,
        }
    }
}

impl Walker {
    /// Apply `cmd` to `pose` for one tic. Heading and pitch change first,
    /// then the move is clipped against the grid.
    pub fn apply(
        &self,
        pose: &mut Pose,
        cmd: &InputCmd,
        grid: &TileGrid,
        doors: &DoorStates,
        tile_size: f32,
        pitch_limit: f32,
    ) -> MoveResult {
        pose.turn(cmd.turn * self.turn_speed);
        pose.look(cmd.look * self.look_speed, pitch_limit);

        let speed = if cmd.run {
            self.speed * self.run_factor
        } else {
            self.speed
        };
        let fwd = pose.forward();
        // +90° from the heading is to the right, since +Y points down-screen
        let right = fwd.perp();
        let delta: Vec2 =
            fwd * (cmd.forward * speed) + right * (cmd.strafe * speed * self.strafe_factor);

        let moved = slide_move(grid, doors, pose.pos, delta, self.radius, tile_size);
        pose.pos = moved.pos;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Tile, TileGrid};

    const T: f32 = 64.0;

    fn open_room() -> (TileGrid, DoorStates) {
        let grid = TileGrid::walled(6, 6, Tile::Wall(1)).unwrap();
        let doors = DoorStates::for_grid(&grid);
        (grid, doors)
    }

    #[test]
    fn forward_moves_along_heading() {
        let (grid, doors) = open_room();
        let mut pose = Pose::new(Vec2::splat(3.0 * T), 0.0, 0.0);
        let cmd = InputCmd {
            forward: 1.0,
            ..Default::default()
        };
        Walker::default().apply(&mut pose, &cmd, &grid, &doors, T, 100.0);
        assert!((pose.pos.x - (3.0 * T + 3.0)).abs() < 1e-4);
        assert!((pose.pos.y - 3.0 * T).abs() < 1e-4);
    }

    #[test]
    fn strafe_is_slower_and_sideways() {
        let (grid, doors) = open_room();
        let mut pose = Pose::new(Vec2::splat(3.0 * T), 0.0, 0.0);
        let cmd = InputCmd {
            strafe: 1.0,
            ..Default::default()
        };
        Walker::default().apply(&mut pose, &cmd, &grid, &doors, T, 100.0);
        assert!((pose.pos.x - 3.0 * T).abs() < 1e-4);
        assert!((pose.pos.y - (3.0 * T + 2.1)).abs() < 1e-4);
    }

    #[test]
    fn look_is_clamped() {
        let (grid, doors) = open_room();
        let mut pose = Pose::new(Vec2::splat(3.0 * T), 0.0, 0.0);
        let cmd = InputCmd {
            look: 1.0,
            ..Default::default()
        };
        let walker = Walker::default();
        for _ in 0..100 {
            walker.apply(&mut pose, &cmd, &grid, &doors, T, 50.0);
        }
        assert_eq!(pose.pitch, 50.0);
    }
}
