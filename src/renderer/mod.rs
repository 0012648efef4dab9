//! Rendering entry points.
//!
//! *The kernel never allocates per frame.* The caller owns a [`Frame`] sized
//! once from the [`RenderConfig`], borrows the level through a [`Scene`], and
//! hands both to a [`Renderer`] every frame.
//!
//! * `render` overwrites every colour pixel and every depth slot.
//! * The depth buffer holds one corrected wall distance per screen column,
//!   for later sprite occlusion tests.
//! * Sprites and HUD go on top of the finished frame; they are not drawn here.

use crate::{
    config::RenderConfig,
    world::{DoorStates, Pose, Rgb, TextureAtlas, TileGrid},
};

/// Pixel format handed to the window back-end (0x00RRGGBB).
pub type Rgba = u32;

/// Read-only view of everything a frame looks at.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub grid: &'a TileGrid,
    pub doors: &'a DoorStates,
    pub atlas: &'a TextureAtlas,
}

impl<'a> Scene<'a> {
    pub fn new(grid: &'a TileGrid, doors: &'a DoorStates, atlas: &'a TextureAtlas) -> Self {
        debug_assert_eq!(doors.dims(), (grid.width(), grid.height()));
        debug_assert!((grid.max_texture() as usize) < atlas.len());
        Self { grid, doors, atlas }
    }
}

/// Caller-owned output buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    /// Row-major RGB, `y * width + x`.
    pub(crate) color: Vec<Rgb>,
    /// Corrected wall distance per column, in tiles.
    pub(crate) depth: Vec<f32>,
}

impl Frame {
    pub fn new(cfg: &RenderConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            color: vec![[0; 3]; cfg.width * cfg.height],
            depth: vec![cfg.far_distance; cfg.width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self) -> &[Rgb] {
        &self.color
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.color[y * self.width + x]
    }

    /// Mutable colour access for overlays drawn after the kernel.
    pub fn color_mut(&mut self) -> &mut [Rgb] {
        &mut self.color
    }

    /// Pack the colour buffer into `dst` for the window back-end.
    pub fn present(&self, dst: &mut [Rgba]) {
        debug_assert_eq!(dst.len(), self.color.len());
        for (out, &[r, g, b]) in dst.iter_mut().zip(&self.color) {
            *out = (r as u32) << 16 | (g as u32) << 8 | b as u32;
        }
    }
}

/// A frame producer. One call renders one complete frame.
pub trait Renderer {
    fn render(&self, pose: &Pose, scene: &Scene, frame: &mut Frame);
}

pub mod shading;
pub mod software;

pub use software::Software;
