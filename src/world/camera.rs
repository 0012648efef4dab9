use glam::Vec2;

/// Player view-point in world space.
///
/// * `pos` is in world units; divide by the tile size to get grid space.
/// * `angle` is the heading in radians (0 = +X, increasing toward +Y).
/// * `pitch` shifts the horizon in screen rows; there is no real tilt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    pub angle: f32,
    pub pitch: f32,
}

impl Pose {
    pub fn new(pos: Vec2, angle: f32, pitch: f32) -> Self {
        Self { pos, angle, pitch }
    }

    /// Position in grid units (one unit per cell).
    #[inline]
    pub fn grid_pos(&self, tile_size: f32) -> Vec2 {
        self.pos / tile_size
    }

    /// Grid cell the player stands in.
    #[inline]
    pub fn cell(&self, tile_size: f32) -> (i32, i32) {
        let g = self.grid_pos(tile_size).floor();
        (g.x as i32, g.y as i32)
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector of the heading.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Camera plane half-vector, perpendicular to `forward`, of length `scale`.
    /// `forward - plane` is the leftmost ray, `forward + plane` the rightmost.
    #[inline(always)]
    pub fn plane(&self, scale: f32) -> Vec2 {
        self.forward().perp() * scale
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate the heading, keeping it in `[0, TAU)`.
    pub fn turn(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Add to pitch, clamped to `±limit` rows.
    pub fn look(&mut self, delta: f32, limit: f32) {
        self.pitch = (self.pitch + delta).clamp(-limit, limit);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
