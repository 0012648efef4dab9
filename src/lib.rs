//! Grid raycasting renderer.
//!
//! * [`world`] holds the level: tile grid, door states, textures, the pose.
//! * [`renderer`] turns a pose and a scene into a colour and depth frame.
//! * [`sim`] animates doors and moves the player between frames.

pub mod config;
pub mod renderer;
pub mod sim;
pub mod world;

pub use config::{ConfigError, RenderConfig, Shading};
pub use renderer::{Frame, Renderer, Scene, Software};
