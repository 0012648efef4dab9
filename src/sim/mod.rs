//! Caller-side game state: door animation, player movement and the fixed
//! tic loop. Everything here runs between frames; the renderer only reads
//! its results.

pub mod collision;
pub mod doors;
pub mod player;
pub mod probe;
mod tic;

pub use collision::{DOOR_WALKABLE, MoveResult, is_solid, slide_move};
pub use doors::{DOOR_SHUT, DoorController, DoorPhase};
pub use player::{InputCmd, Walker};
pub use probe::{REACH, cell_ahead, door_ahead, use_target};
pub use tic::{SIM_FPS, TicRunner};
