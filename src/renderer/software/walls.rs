use glam::Vec2;

use crate::{
    renderer::{
        Frame, Scene,
        shading::{self, apply},
        software::{
            Software,
            dda::{RayHit, Side, WallHit, cast_ray},
        },
    },
    world::Pose,
};

/// Vertical screen extent of one wall slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strip {
    /// Unclamped height in pixels (`screen_h / distance`).
    pub height: i32,
    /// Unclamped first and one-past-last rows.
    pub top: i32,
    pub bottom: i32,
    /// Rows actually drawn, clamped to the screen.
    pub start: i32,
    pub end: i32,
    /// Texture rows advanced per screen row.
    pub tex_step: f32,
    /// Texture row sampled at `start`.
    pub tex_start: f32,
}

/// Texture column for a hit, mirrored so a texture reads the same way from
/// either side of a wall.
#[inline]
pub fn tex_column(hit: &WallHit, dir: Vec2, tex_size: usize) -> usize {
    let tx = ((hit.wall_x * tex_size as f32) as usize).min(tex_size - 1);
    let flip = match hit.side {
        Side::X => dir.x > 0.0,
        Side::Y => dir.y < 0.0,
    };
    if flip { tex_size - 1 - tx } else { tx }
}

impl Software {
    /// Screen rows covered by a wall at corrected `distance`, centred on
    /// `horizon`.
    pub fn project_strip(&self, distance: f32, horizon: i32) -> Strip {
        let cfg = &self.cfg;
        let height = (cfg.height as f32 / distance) as i32;
        let top = (-height).div_euclid(2) + horizon;
        let bottom = height.div_euclid(2) + horizon;
        let start = top.max(0);
        let end = bottom.min(cfg.height as i32);

        let tex_step = cfg.tex_size as f32 / height.max(1) as f32;
        let tex_start = ((start - horizon) as f32 + height as f32 * 0.5) * tex_step;

        Strip {
            height,
            top,
            bottom,
            start,
            end,
            tex_step,
            tex_start,
        }
    }

    /// Cast every ray and rasterise its slice into `frame`.
    pub(super) fn draw_walls(&self, pose: &Pose, scene: &Scene, frame: &mut Frame) {
        let cfg = &self.cfg;
        let origin = pose.grid_pos(cfg.tile_size);
        let horizon = cfg.horizon(pose.pitch);
        let first_angle = pose.angle - cfg.half_fov;
        let delta = cfg.delta_angle();
        let mask = (cfg.tex_size - 1) as i32;

        for ray in 0..cfg.num_rays {
            let x0 = ray * cfg.scale;
            if x0 >= cfg.width {
                break;
            }
            let x1 = (x0 + cfg.scale).min(cfg.width);

            let angle = first_angle + ray as f32 * delta;
            let dir = Vec2::from_angle(angle);

            let hit = match cast_ray(scene.grid, scene.doors, origin, dir) {
                RayHit::Wall(hit) => hit,
                RayHit::OutOfBounds => {
                    frame.depth[x0..x1].fill(cfg.far_distance);
                    continue;
                }
            };

            // ray length -> distance along the view direction
            let dist = (hit.distance * (angle - pose.angle).cos()).max(cfg.min_distance);
            frame.depth[x0..x1].fill(dist);

            let strip = self.project_strip(dist, horizon);
            if strip.start >= strip.end {
                continue;
            }

            let tex = scene.atlas.wall(hit.tex);
            let tex_x = tex_column(&hit, dir, cfg.tex_size);
            let shade = shading::distance_shade(dist, &cfg.shading)
                * shading::side_dim(hit.side, &cfg.shading)
                * self.ao.wall[tex_x];

            let mut tex_pos = strip.tex_start;
            for y in strip.start..strip.end {
                let tex_y = ((tex_pos as i32) & mask) as usize;
                tex_pos += strip.tex_step;

                let colour = apply(tex.texel(tex_x, tex_y), shade);
                let row = y as usize * cfg.width;
                frame.color[row + x0..row + x1].fill(colour);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    fn kernel(h: usize) -> Software {
        Software::new(RenderConfig::new(64, h, 1)).unwrap()
    }

    #[test]
    fn strip_is_centred_on_horizon() {
        let sw = kernel(100);
        let s = sw.project_strip(2.0, 50);
        assert_eq!(s.height, 50);
        assert_eq!((s.top, s.bottom), (25, 75));
        assert_eq!((s.start, s.end), (25, 75));
        assert_eq!(s.tex_start, 0.0);
    }

    #[test]
    fn odd_height_rounds_top_up() {
        let sw = kernel(100);
        // 100 / 20 = 5 rows: three above the horizon row, two from it down
        let s = sw.project_strip(20.0, 50);
        assert_eq!(s.height, 5);
        assert_eq!((s.top, s.bottom), (47, 52));
    }

    #[test]
    fn close_wall_is_clamped_and_offset() {
        let sw = kernel(100);
        let s = sw.project_strip(0.5, 50);
        assert_eq!(s.height, 200);
        assert_eq!((s.start, s.end), (0, 100));
        // half of the texture lies above the screen: start sampling at row 16
        assert!((s.tex_start - 16.0).abs() < 1e-4);
        assert!((s.tex_step - 0.32).abs() < 1e-6);
    }

    #[test]
    fn pitch_moves_strip() {
        let sw = kernel(100);
        let s = sw.project_strip(2.0, 70);
        assert_eq!((s.start, s.end), (45, 95));
    }

    #[test]
    fn far_wall_has_empty_strip() {
        let sw = kernel(100);
        let s = sw.project_strip(1000.0, 50);
        assert_eq!(s.height, 0);
        assert!(s.start >= s.end);
    }

    #[test]
    fn texture_column_flips_by_side_and_direction() {
        let hit = WallHit {
            cell: (0, 0),
            tex: 1,
            side: Side::X,
            distance: 1.0,
            wall_x: 0.25,
        };
        assert_eq!(tex_column(&hit, Vec2::new(-1.0, 0.0), 64), 16);
        assert_eq!(tex_column(&hit, Vec2::new(1.0, 0.0), 64), 47);

        let hit = WallHit {
            side: Side::Y,
            ..hit
        };
        assert_eq!(tex_column(&hit, Vec2::new(0.0, 1.0), 64), 16);
        assert_eq!(tex_column(&hit, Vec2::new(0.0, -1.0), 64), 47);
    }
}
