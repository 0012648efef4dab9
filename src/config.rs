//! Frame and shading constants shared by every pass of the renderer.
//!
//! A [`RenderConfig`] is validated once when the kernel is built; after that
//! the per-frame path trusts it and never fails.

use thiserror::Error;

/// Aesthetic tuning knobs. None of these come from a physical model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    /// `1 / (1 + dist * falloff)` distance attenuation.
    pub falloff: f32,
    /// Brightness ceiling for floor and ceiling texels.
    pub floor_cap: f32,
    /// Multiplier applied to walls hit on the Y axis.
    pub side_dim: f32,
    /// How much the texture edge darkens at its strongest.
    pub ao_strength: f32,
    pub floor_ao_exp: i32,
    pub floor_ao_min: f32,
    pub wall_ao_exp: i32,
    pub wall_ao_min: f32,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            falloff: 0.15,
            floor_cap: 0.85,
            side_dim: 0.6,
            ao_strength: 0.8,
            floor_ao_exp: 4,
            floor_ao_min: 0.1,
            wall_ao_exp: 6,
            wall_ao_min: 0.2,
        }
    }
}

/// Everything the kernel needs to know about the screen and the world scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Half of the horizontal field of view, radians.
    pub half_fov: f32,
    /// Rays cast per frame. `num_rays * scale` must cover `width`.
    pub num_rays: usize,
    /// Adjacent screen columns sharing one ray.
    pub scale: usize,
    /// Texel edge length of every texture (power of two).
    pub tex_size: usize,
    /// World units per grid cell.
    pub tile_size: f32,
    /// Depth written for rays that leave the map.
    pub far_distance: f32,
    /// Lower clamp on corrected wall distance.
    pub min_distance: f32,
    pub shading: Shading,
}

/// Rejected configurations.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("screen size {width}x{height} has a zero dimension")]
    EmptyScreen { width: usize, height: usize },

    #[error("super-sampling factor must be at least 1")]
    ZeroScale,

    #[error("{num_rays} rays x scale {scale} do not cover {width} columns")]
    RaysDontCover {
        num_rays: usize,
        scale: usize,
        width: usize,
    },

    #[error("texture size {0} is not a power of two")]
    TextureSize(usize),

    #[error("tile size {0} must be positive and finite")]
    TileSize(f32),

    #[error("half field of view {0} rad must lie in (0, pi/2)")]
    HalfFov(f32),

    #[error("distance clamp {min} must lie in (0, {far}) and the far distance must be finite")]
    DistanceClamp { min: f32, far: f32 },
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(960, 600, 2)
    }
}

impl RenderConfig {
    /// Screen of `width x height` with one ray per `scale` columns.
    /// Other fields take the stock values; call [`validate`](Self::validate)
    /// before handing the result to the kernel.
    pub fn new(width: usize, height: usize, scale: usize) -> Self {
        Self {
            width,
            height,
            half_fov: 0.66_f32.atan(),
            num_rays: width.div_ceil(scale.max(1)),
            scale,
            tex_size: 64,
            tile_size: 64.0,
            far_distance: 1000.0,
            min_distance: 0.05,
            shading: Shading::default(),
        }
    }

    /// Replace the field of view (full angle, radians).
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.half_fov = fov * 0.5;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyScreen {
                width: self.width,
                height: self.height,
            });
        }
        if self.scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if self.num_rays * self.scale < self.width {
            return Err(ConfigError::RaysDontCover {
                num_rays: self.num_rays,
                scale: self.scale,
                width: self.width,
            });
        }
        if !self.tex_size.is_power_of_two() {
            return Err(ConfigError::TextureSize(self.tex_size));
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if !(self.half_fov > 0.0 && self.half_fov < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::HalfFov(self.half_fov));
        }
        if !(self.min_distance > 0.0
            && self.min_distance < self.far_distance
            && self.far_distance.is_finite())
        {
            return Err(ConfigError::DistanceClamp {
                min: self.min_distance,
                far: self.far_distance,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.half_fov * 2.0
    }

    /// Angle between two neighbouring rays.
    #[inline]
    pub fn delta_angle(&self) -> f32 {
        self.fov() / self.num_rays as f32
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height as f32 * 0.5
    }

    /// Half-width of the camera plane at unit distance (0.66 by default).
    #[inline]
    pub fn plane_scale(&self) -> f32 {
        self.half_fov.tan()
    }

    /// Screen row of the horizon for a given pitch.
    #[inline]
    pub fn horizon(&self, pitch: f32) -> i32 {
        (self.half_height() + pitch).floor() as i32
    }
}
