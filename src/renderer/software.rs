//! ---------------------------------------------------------------------------
//! CPU raycasting kernel
//!
//! * Floor/ceiling pass first, then one DDA ray per `scale` columns.
//! * Writes every pixel of the colour buffer and every slot of the depth
//!   buffer; nothing survives from the previous frame.
//! * Owns no per-frame state. The only allocations happen in [`Software::new`].
//! ---------------------------------------------------------------------------

mod dda;
mod planes;
mod walls;

pub use dda::{DOOR_PASSABLE, RAY_EPSILON, RayHit, Side, WallHit, cast_ray, door_sliver};
pub use planes::HORIZON_FOG;
pub use walls::{Strip, tex_column};

use tracing::debug;

use crate::{
    config::{ConfigError, RenderConfig},
    renderer::{Frame, Renderer, Scene, shading::AoTables},
    world::Pose,
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Grid raycaster bound to one validated [`RenderConfig`].
#[derive(Clone, Debug)]
pub struct Software {
    cfg: RenderConfig,
    ao: AoTables,
}

impl Software {
    pub fn new(cfg: RenderConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        debug!(
            width = cfg.width,
            height = cfg.height,
            rays = cfg.num_rays,
            scale = cfg.scale,
            fov_deg = cfg.fov().to_degrees(),
            tex = cfg.tex_size,
            "software raycaster ready"
        );
        Ok(Self {
            ao: AoTables::new(cfg.tex_size, &cfg.shading),
            cfg,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn render(&self, pose: &Pose, scene: &Scene, frame: &mut Frame) {
        debug_assert_eq!(frame.color.len(), self.cfg.width * self.cfg.height);
        debug_assert_eq!(frame.depth.len(), self.cfg.width);
        debug_assert_eq!(scene.atlas.size(), self.cfg.tex_size);

        self.draw_planes(pose, scene, frame);
        self.draw_walls(pose, scene, frame);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
