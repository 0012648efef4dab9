//! Sliding-door animation.
//!
//! The renderer only ever reads [`DoorStates`]; this controller is the one
//! place that writes openness, between frames.

use std::collections::BTreeMap;
use std::time::Duration;

use glam::Vec2;

use crate::world::{DoorFlags, DoorStates, Tile, TileGrid};

/// Doors below this openness count as shut for interaction.
pub const DOOR_SHUT: f32 = 0.1;

/// Animation state of one door that is not resting closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorPhase {
    /// Latch engaged, waiting to start moving.
    Unlocking { ready_at: Duration },
    Opening,
    /// Fully open; may start closing once `close_at` has passed.
    Open { close_at: Duration },
    Closing,
}

#[derive(Clone, Debug)]
pub struct DoorController {
    active: BTreeMap<(usize, usize), DoorPhase>,
    /// Openness change per tick.
    pub speed: f32,
    /// Wait between engaging a latch and the door moving.
    pub unlock_delay: Duration,
    /// How long a door stays fully open before it may close.
    pub hold_open: Duration,
}

impl Default for DoorController {
    fn default() -> Self {
        Self {
            active: BTreeMap::new(),
            speed: 0.03,
            unlock_delay: Duration::from_millis(1000),
            hold_open: Duration::from_millis(5000),
        }
    }
}

impl DoorController {
    pub fn phase(&self, cell: (usize, usize)) -> Option<DoorPhase> {
        self.active.get(&cell).copied()
    }

    /// Number of doors currently unlocking, moving or held open.
    pub fn active(&self) -> usize {
        self.active.len()
    }

    /// Player pressed "use" on `cell`. Returns `true` if a door reacted.
    ///
    /// * Latched door: engages the latch; it opens after `unlock_delay`.
    ///   Does nothing while the latch is already engaged.
    /// * Plain door: starts opening if it is (nearly) shut.
    pub fn interact(
        &mut self,
        grid: &TileGrid,
        doors: &mut DoorStates,
        cell: (usize, usize),
        now: Duration,
    ) -> bool {
        let (x, y) = cell;
        match grid.get(x as i32, y as i32) {
            Some(Tile::Door { latched: true, .. }) => {
                let flags = doors.flags(x, y);
                if flags.contains(DoorFlags::LATCH_ENGAGED) {
                    return false;
                }
                doors.set_flags(x, y, flags | DoorFlags::LATCH_ENGAGED);
                self.active.insert(
                    cell,
                    DoorPhase::Unlocking {
                        ready_at: now + self.unlock_delay,
                    },
                );
                true
            }
            Some(Tile::Door { latched: false, .. }) if doors.openness(x, y) < DOOR_SHUT => {
                self.active.insert(cell, DoorPhase::Opening);
                true
            }
            _ => false,
        }
    }

    /// Advance every active door by one tick.
    ///
    /// `player` is in grid units; an open door only starts closing once the
    /// player is more than one cell away from its centre.
    pub fn tick(&mut self, grid: &TileGrid, doors: &mut DoorStates, now: Duration, player: Vec2) {
        let speed = self.speed;
        let hold_open = self.hold_open;

        self.active.retain(|&(x, y), phase| {
            match *phase {
                DoorPhase::Unlocking { ready_at } => {
                    if now >= ready_at {
                        *phase = DoorPhase::Opening;
                    }
                }
                DoorPhase::Opening => {
                    let open = doors.openness(x, y) + speed;
                    doors.set_openness(x, y, open);
                    if open >= 1.0 {
                        *phase = DoorPhase::Open {
                            close_at: now + hold_open,
                        };
                    }
                }
                DoorPhase::Open { close_at } => {
                    let centre = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    if now >= close_at && player.distance(centre) > 1.0 {
                        *phase = DoorPhase::Closing;
                    }
                }
                DoorPhase::Closing => {
                    let open = doors.openness(x, y) - speed;
                    doors.set_openness(x, y, open);
                    if open <= 0.0 {
                        if matches!(grid.get(x as i32, y as i32), Some(Tile::Door { latched: true, .. })) {
                            let flags = doors.flags(x, y) - DoorFlags::LATCH_ENGAGED;
                            doors.set_flags(x, y, flags);
                        }
                        return false;
                    }
                }
            }
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Legend;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    fn level() -> (TileGrid, DoorStates) {
        let grid = TileGrid::parse(
            "
            11111
            10301
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

    /// Tick until `cond` holds or `limit` ticks pass; returns the tick count.
    fn run_until(
        ctl: &mut DoorController,
        grid: &TileGrid,
        doors: &mut DoorStates,
        t: &mut u64,
        player: Vec2,
        limit: usize,
        cond: impl Fn(&DoorController, &DoorStates) -> bool,
    ) -> usize {
        for n in 0..limit {
            if cond(ctl, doors) {
                return n;
            }
            *t += 16;
            ctl.tick(grid, doors, MS(*t), player);
        }
        panic!("condition not reached in {limit} ticks");
    }

    #[test]
    fn plain_door_opens_holds_and_closes() {
        let (grid, mut doors) = level();
        let mut ctl = DoorController::default();
        let mut t = 0;
        let far = Vec2::new(2.5, 3.5);

        assert!(ctl.interact(&grid, &mut doors, (2, 2), MS(t)));
        let n = run_until(&mut ctl, &grid, &mut doors, &mut t, far, 100, |c, _| {
            matches!(c.phase((2, 2)), Some(DoorPhase::Open { .. }))
        });
        assert_eq!(n, 34, "0.03 per tick reaches 1.0 on the 34th tick");
        assert_eq!(doors.openness(2, 2), 1.0);

        // held open for five seconds, then shuts
        let opened_at = t;
        let far = Vec2::new(3.5, 3.5);
        run_until(&mut ctl, &grid, &mut doors, &mut t, far, 1000, |c, _| {
            c.phase((2, 2)) == Some(DoorPhase::Closing)
        });
        assert!(t - opened_at >= 5000);
        run_until(&mut ctl, &grid, &mut doors, &mut t, far, 100, |c, _| {
            c.phase((2, 2)).is_none()
        });
        assert_eq!(doors.openness(2, 2), 0.0);
    }

    #[test]
    fn door_stays_open_while_player_is_near() {
        let (grid, mut doors) = level();
        let mut ctl = DoorController::default();
        let mut t = 0;
        let inside = Vec2::new(2.5, 2.5);
        ctl.interact(&grid, &mut doors, (2, 2), MS(t));
        for _ in 0..600 {
            t += 16;
            ctl.tick(&grid, &mut doors, MS(t), inside);
        }
        assert!(matches!(ctl.phase((2, 2)), Some(DoorPhase::Open { .. })));
    }

    #[test]
    fn latched_door_waits_then_resets() {
        let (grid, mut doors) = level();
        let mut ctl = DoorController::default();
        let mut t = 0;
        let far = Vec2::new(2.5, 3.5);

        assert!(ctl.interact(&grid, &mut doors, (2, 1), MS(t)));
        assert!(doors.flags(2, 1).contains(DoorFlags::LATCH_ENGAGED));
        // a second press while engaged does nothing
        assert!(!ctl.interact(&grid, &mut doors, (2, 1), MS(t)));

        run_until(&mut ctl, &grid, &mut doors, &mut t, far, 200, |_, d| {
            d.openness(2, 1) > 0.0
        });
        assert!(t > 1000);

        run_until(&mut ctl, &grid, &mut doors, &mut t, far, 2000, |c, _| {
            c.phase((2, 1)).is_none()
        });
        assert_eq!(doors.openness(2, 1), 0.0);
        assert!(!doors.flags(2, 1).contains(DoorFlags::LATCH_ENGAGED));
    }

    #[test]
    fn walls_and_open_doors_ignore_use() {
        let (grid, mut doors) = level();
        let mut ctl = DoorController::default();
        assert!(!ctl.interact(&grid, &mut doors, (0, 0), MS(0)));
        doors.set_openness(2, 2, 0.5);
        assert!(!ctl.interact(&grid, &mut doors, (2, 2), MS(0)));
        assert_eq!(ctl.active(), 0);
    }
}
