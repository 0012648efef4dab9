// Format-agnostic store of the textures the renderer samples.
// Decoding image files is the asset loader's job; the generators below only
// exist so the viewer and the tests have something to look at.

/// One texel: red, green, blue.
pub type Rgb = [u8; 3];

/// Index into [`TextureAtlas::walls`]. Equal to the cell code it dresses.
pub type TextureId = u8;

/// Slot 0 of the wall list; [`TileGrid`](crate::world::TileGrid) refuses tiles that use it.
pub const NO_TEXTURE: TextureId = 0;

/// Square RGB texture, row-major: texel `(tx, ty)` lives at `ty * size + tx`.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub size: usize,
    pub pixels: Vec<Rgb>,
}

/// Things that can go wrong while assembling an atlas.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture `{name}` is {got} texels wide, atlas wants {expected}")]
    SizeMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("texture `{name}` holds {got} texels, expected {expected}")]
    PixelCount {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

/// Cheap integer hash used for texel noise.
#[inline]
fn hash2(x: usize, y: usize, seed: u32) -> u32 {
    let mut h = (x as u32).wrapping_mul(0x27d4_eb2d) ^ (y as u32).wrapping_mul(0x1656_67b1) ^ seed;
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h
}

#[inline]
fn tint(base: Rgb, amount: i32) -> Rgb {
    base.map(|c| (c as i32 + amount).clamp(0, 255) as u8)
}

impl Texture {
    pub fn from_fn(name: &str, size: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(size * size);
        for ty in 0..size {
            for tx in 0..size {
                pixels.push(f(tx, ty));
            }
        }
        Self {
            name: name.to_string(),
            size,
            pixels,
        }
    }

    /// One flat colour.
    pub fn solid(name: &str, size: usize, colour: Rgb) -> Self {
        Self::from_fn(name, size, |_, _| colour)
    }

    /// Two-colour checkerboard with 8 cells per side; the "missing" texture.
    pub fn checker(size: usize) -> Self {
        let cell = (size / 8).max(1);
        Self::from_fn("CHECKER", size, |x, y| {
            if ((x / cell) ^ (y / cell)) & 1 == 0 {
                [160, 160, 160]
            } else {
                [64, 64, 64]
            }
        })
    }

    /// Running-bond brickwork with dark mortar.
    pub fn bricks(name: &str, size: usize, brick: Rgb, seed: u32) -> Self {
        let row_h = (size / 4).max(2);
        let brick_w = (size / 2).max(2);
        Self::from_fn(name, size, |x, y| {
            let row = y / row_h;
            let shift = if row % 2 == 0 { 0 } else { brick_w / 2 };
            let bx = (x + shift) % brick_w;
            if y % row_h == 0 || bx == 0 {
                return [40, 36, 32];
            }
            let n = (hash2(x, y, seed) & 0x1f) as i32 - 16;
            let per_brick = (hash2((x + shift) / brick_w, row, seed ^ 0xabcd) & 0x0f) as i32 - 8;
            tint(brick, n + per_brick)
        })
    }

    /// Vertical planks with a metal band across the middle; used for doors.
    pub fn planks(name: &str, size: usize, wood: Rgb, seed: u32) -> Self {
        let plank_w = (size / 4).max(2);
        let band = size / 2;
        Self::from_fn(name, size, |x, y| {
            if y.abs_diff(band) <= size / 32 {
                return [90, 90, 100];
            }
            if x % plank_w == 0 {
                return [30, 20, 12];
            }
            let grain = ((hash2(x, y / 4, seed) & 0x0f) as i32) - 8;
            tint(wood, grain)
        })
    }

    /// Noisy stone slabs; used for floors.
    pub fn slabs(name: &str, size: usize, stone: Rgb, seed: u32) -> Self {
        let slab = (size / 2).max(2);
        Self::from_fn(name, size, |x, y| {
            if x % slab == 0 || y % slab == 0 {
                return tint(stone, -50);
            }
            tint(stone, (hash2(x, y, seed) & 0x1f) as i32 - 16)
        })
    }

    #[inline(always)]
    pub fn texel(&self, tx: usize, ty: usize) -> Rgb {
        self.pixels[ty * self.size + tx]
    }
}

/// Every texture a frame can touch.
///
/// * `walls[code]` dresses cells with that code; `walls[0]` is a sentinel.
/// * `floor` and `ceiling` are sampled by the plane pass.
/// * All textures share one power-of-two edge length.
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    walls: Vec<Texture>,
    floor: Texture,
    ceiling: Texture,
    size: usize,
}

impl TextureAtlas {
    /// Assemble an atlas. `walls[0]` is kept as the sentinel slot.
    pub fn new(
        size: usize,
        walls: Vec<Texture>,
        floor: Texture,
        ceiling: Texture,
    ) -> Result<Self, TextureError> {
        for tex in walls.iter().chain([&floor, &ceiling]) {
            if tex.size != size {
                return Err(TextureError::SizeMismatch {
                    name: tex.name.clone(),
                    expected: size,
                    got: tex.size,
                });
            }
            if tex.pixels.len() != size * size {
                return Err(TextureError::PixelCount {
                    name: tex.name.clone(),
                    expected: size * size,
                    got: tex.pixels.len(),
                });
            }
        }
        Ok(Self {
            walls,
            floor,
            ceiling,
            size,
        })
    }

    /// Stock set for codes 0..=9 built from the generators above.
    pub fn procedural(size: usize) -> Self {
        let walls = vec![
            Texture::checker(size),
            Texture::bricks("BRICK_RED", size, [150, 60, 45], 1),
            Texture::bricks("BRICK_GREY", size, [120, 120, 115], 2),
            Texture::planks("DOOR_IRON", size, [110, 70, 40], 3),
            Texture::planks("DOOR_WOOD", size, [140, 95, 55], 4),
            Texture::bricks("BRICK_MOSS", size, [80, 110, 60], 5),
            Texture::bricks("BRICK_BLUE", size, [70, 80, 120], 6),
            Texture::slabs("WALL_SLAB", size, [100, 95, 120], 7),
            Texture::bricks("BRICK_DARK", size, [70, 50, 50], 8),
            Texture::slabs("WALL_SAND", size, [170, 150, 100], 9),
        ];
        let floor = Texture::slabs("FLOOR", size, [90, 80, 70], 11);
        let ceiling = Texture::slabs("CEIL", size, [60, 60, 70], 12);
        Self {
            walls,
            floor,
            ceiling,
            size,
        }
    }

    /// Texel edge length shared by every texture.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of wall slots, sentinel included.
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.len() <= 1
    }

    /// Bounds-checked lookup, for callers verifying a grid against the atlas.
    pub fn get(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.walls.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Unchecked-by-contract lookup used in the hot path.
    #[inline(always)]
    pub fn wall(&self, id: TextureId) -> &Texture {
        &self.walls[id as usize]
    }

    #[inline(always)]
    pub fn floor(&self) -> &Texture {
        &self.floor
    }

    #[inline(always)]
    pub fn ceiling(&self) -> &Texture {
        &self.ceiling
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
