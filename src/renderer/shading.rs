//! Falloff terms shared by the plane and wall passes.
//!
//! Every function returns a multiplier in `[0, 1]`.

use crate::config::Shading;
use crate::renderer::software::Side;
use crate::world::Rgb;

/// `1 / (1 + dist * falloff)`.
#[inline(always)]
pub fn distance_shade(dist: f32, s: &Shading) -> f32 {
    (1.0 / (1.0 + dist.max(0.0) * s.falloff)).clamp(0.0, 1.0)
}

/// Distance attenuation capped at the floor brightness ceiling.
#[inline(always)]
pub fn floor_shade(row_dist: f32, s: &Shading) -> f32 {
    distance_shade(row_dist, s).min(s.floor_cap)
}

/// Flat dimming of Y-side walls.
#[inline(always)]
pub fn side_dim(side: Side, s: &Shading) -> f32 {
    match side {
        Side::X => 1.0,
        Side::Y => s.side_dim.clamp(0.0, 1.0),
    }
}

/// Normalised distance of texel `t` from the texture centre: 0 centre, 1 edge.
#[inline(always)]
pub fn edge_factor(t: usize, tex_size: usize) -> f32 {
    let half = tex_size as f32 * 0.5;
    ((t as f32 - half).abs() / half).min(1.0)
}

#[inline(always)]
fn ao(edge: f32, exp: i32, strength: f32, min: f32) -> f32 {
    (1.0 - edge.powi(exp) * strength).max(min).clamp(0.0, 1.0)
}

/// Fake ambient occlusion toward the edges of a floor/ceiling texel grid.
#[inline]
pub fn floor_ao(tx: usize, ty: usize, tex_size: usize, s: &Shading) -> f32 {
    let edge = edge_factor(tx, tex_size).max(edge_factor(ty, tex_size));
    ao(edge, s.floor_ao_exp, s.ao_strength, s.floor_ao_min)
}

/// Fake ambient occlusion toward the left/right edges of a wall texture.
/// Steeper than [`floor_ao`] so wall seams stand out.
#[inline]
pub fn wall_ao(tex_x: usize, tex_size: usize, s: &Shading) -> f32 {
    ao(
        edge_factor(tex_x, tex_size),
        s.wall_ao_exp,
        s.ao_strength,
        s.wall_ao_min,
    )
}

/// Scale a texel by `shade`, truncating like the integer frame-buffer does.
#[inline(always)]
pub fn apply(c: Rgb, shade: f32) -> Rgb {
    c.map(|v| (v as f32 * shade) as u8)
}

/// Precomputed AO factors, built once per kernel.
#[derive(Clone, Debug)]
pub struct AoTables {
    /// `tex_size * tex_size`, indexed `ty * tex_size + tx`.
    pub floor: Vec<f32>,
    /// One entry per texture column.
    pub wall: Vec<f32>,
}

impl AoTables {
    pub fn new(tex_size: usize, s: &Shading) -> Self {
        let mut floor = Vec::with_capacity(tex_size * tex_size);
        for ty in 0..tex_size {
            for tx in 0..tex_size {
                floor.push(floor_ao(tx, ty, tex_size, s));
            }
        }
        let wall = (0..tex_size).map(|tx| wall_ao(tx, tex_size, s)).collect();
        Self { floor, wall }
    }
}
