use super::doors::DoorController;
use crate::world::{DoorStates, TileGrid};
use glam::Vec2;
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 60;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Owns the door animations and drives them at a fixed rate, independent
/// of how fast frames are drawn.
pub struct TicRunner {
    doors: DoorController,
    clock: Duration,
    last: Instant,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            doors: DoorController::default(),
            clock: Duration::ZERO,
            last: Instant::now(),
        }
    }

    /// Simulation time elapsed so far.
    #[inline]
    pub fn now(&self) -> Duration {
        self.clock
    }

    #[inline]
    pub fn doors(&self) -> &DoorController {
        &self.doors
    }

    #[inline]
    pub fn doors_mut(&mut self) -> &mut DoorController {
        &mut self.doors
    }

    /// Advance enough tics to synchronise simulation with real time.
    /// Returns how many tics ran.
    pub fn pump(&mut self, grid: &TileGrid, doors: &mut DoorStates, player: Vec2) -> u32 {
        let mut ran = 0;
        while self.last.elapsed() >= TIC {
            self.tick(grid, doors, player);
            self.last += TIC;
            ran += 1;
        }
        ran
    }

    /// Run one fixed-rate tic. `player` is in grid units.
    pub fn tick(&mut self, grid: &TileGrid, doors: &mut DoorStates, player: Vec2) {
        self.clock += TIC;
        self.doors.tick(grid, doors, self.clock, player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::doors::DoorPhase;
    use crate::world::Legend;

    #[test]
    fn tics_advance_clock_and_doors() {
        let grid = TileGrid::parse("111\n141\n101\n101\n111", &Legend::default()).unwrap();
        let mut doors = DoorStates::for_grid(&grid);
        let mut sim = TicRunner::new();
        let player = Vec2::new(1.5, 3.5);

        let now = sim.now();
        assert!(sim.doors_mut().interact(&grid, &mut doors, (1, 1), now));
        for _ in 0..SIM_FPS {
            sim.tick(&grid, &mut doors, player);
        }
        assert_eq!(sim.now(), TIC * SIM_FPS);
        assert_eq!(doors.openness(1, 1), 1.0);
        assert!(matches!(sim.doors().phase((1, 1)), Some(DoorPhase::Open { .. })));
    }
}
