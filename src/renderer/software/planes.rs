use crate::{
    renderer::{Frame, Scene, shading, software::Software},
    world::{Pose, Rgb},
};

/// Colour left on the horizon row, where neither plane is defined.
pub const HORIZON_FOG: Rgb = [0, 0, 0];

impl Software {
    /// Classic floor casting: every row below the horizon samples the floor
    /// texture, every row above it the ceiling, stepping a world-space point
    /// linearly from the leftmost to the rightmost view ray.
    pub(super) fn draw_planes(&self, pose: &Pose, scene: &Scene, frame: &mut Frame) {
        let cfg = &self.cfg;
        let width = cfg.width;
        let horizon = cfg.horizon(pose.pitch);

        let fwd = pose.forward();
        let plane = pose.plane(cfg.plane_scale());
        let ray_l = fwd - plane;
        let ray_r = fwd + plane;
        let origin = pose.grid_pos(cfg.tile_size);

        let tex_f = cfg.tex_size as f32;
        let mask = (cfg.tex_size - 1) as i32;

        for (y, row) in frame.color.chunks_exact_mut(width).enumerate() {
            let offset = y as i32 - horizon;
            if offset == 0 {
                row.fill(HORIZON_FOG);
                continue;
            }
            let tex = if offset > 0 {
                scene.atlas.floor()
            } else {
                scene.atlas.ceiling()
            };

            // distance to the floor point seen by this row
            let row_dist = cfg.half_height() / offset.unsigned_abs() as f32;
            let step = (ray_r - ray_l) * (row_dist / width as f32);
            let mut p = origin + ray_l * row_dist;
            let shade = shading::floor_shade(row_dist, &cfg.shading);

            for px in row.iter_mut() {
                let tx = (((p.x * tex_f) as i32) & mask) as usize;
                let ty = (((p.y * tex_f) as i32) & mask) as usize;
                let ao = self.ao.floor[ty * cfg.tex_size + tx];
                *px = shading::apply(tex.texel(tx, ty), shade * ao);
                p += step;
            }
        }
    }
}
