//! Tile grid and the per-cell door state that rides alongside it.
//!
//! Cell identity and door animation are two separate things here: a
//! [`Tile::Door`] stays a door for the whole level, while its openness lives
//! in [`DoorStates`] and is rewritten by the caller between frames.

use bitflags::bitflags;
use thiserror::Error;

use crate::world::texture::{NO_TEXTURE, TextureId};

/// What occupies one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tile {
    #[default]
    Empty,
    /// Solid wall dressed with the given texture.
    Wall(TextureId),
    /// Sliding door. `latched` doors wait for their latch before moving.
    Door { tex: TextureId, latched: bool },
}

impl Tile {
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        matches!(self, Tile::Empty)
    }

    #[inline(always)]
    pub fn is_door(self) -> bool {
        matches!(self, Tile::Door { .. })
    }
}

/// Maps the digit codes of a text map onto tiles.
#[derive(Clone, Debug)]
pub struct Legend {
    tiles: [Option<Tile>; 10],
}

impl Default for Legend {
    /// `0` empty, `3` latched door, `4` plain door, every other digit a wall
    /// wearing the texture of the same number.
    fn default() -> Self {
        let mut tiles = [None; 10];
        for (code, slot) in tiles.iter_mut().enumerate() {
            let tex = code as TextureId;
            *slot = Some(match code {
                0 => Tile::Empty,
                3 => Tile::Door { tex, latched: true },
                4 => Tile::Door {
                    tex,
                    latched: false,
                },
                _ => Tile::Wall(tex),
            });
        }
        Self { tiles }
    }
}

impl Legend {
    /// Legend with only `0` (empty) defined.
    pub fn empty() -> Self {
        let mut tiles = [None; 10];
        tiles[0] = Some(Tile::Empty);
        Self { tiles }
    }

    /// Bind `code` (a single digit) to `tile`.
    pub fn with(mut self, code: u8, tile: Tile) -> Result<Self, GridError> {
        let slot = self
            .tiles
            .get_mut(code as usize)
            .ok_or(GridError::CodeRange(code))?;
        *slot = Some(tile);
        Ok(self)
    }

    pub fn tile(&self, code: u8) -> Option<Tile> {
        self.tiles.get(code as usize).copied().flatten()
    }
}

/// Map parsing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    BadChar { row: usize, col: usize, ch: char },

    #[error("code {code} at row {row}, column {col} has no legend entry")]
    UnknownCode { row: usize, col: usize, code: u8 },

    #[error("legend code {0} is not a single digit")]
    CodeRange(u8),

    #[error("tile at ({x}, {y}) uses the reserved texture slot 0")]
    ReservedTexture { x: usize, y: usize },

    #[error("grid of {width}x{height} needs {expected} tiles, got {got}")]
    TileCount {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
}

/// Immutable 2-D map of tiles, row-major (`y * width + x`).
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if tiles.len() != width * height {
            return Err(GridError::TileCount {
                width,
                height,
                expected: width * height,
                got: tiles.len(),
            });
        }
        let reserved = tiles.iter().position(|t| match *t {
            Tile::Wall(tex) | Tile::Door { tex, .. } => tex == NO_TEXTURE,
            Tile::Empty => false,
        });
        if let Some(i) = reserved {
            return Err(GridError::ReservedTexture {
                x: i % width,
                y: i / width,
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Parse rows of digit codes. Blank lines and surrounding whitespace are
    /// ignored; every row must have the same length.
    pub fn parse(text: &str, legend: &Legend) -> Result<Self, GridError> {
        let mut tiles = Vec::new();
        let mut width = None;
        let mut height = 0;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = height;
            let mut count = 0;
            for (col, ch) in line.chars().enumerate() {
                let code = ch
                    .to_digit(10)
                    .ok_or(GridError::BadChar { row, col, ch })? as u8;
                let tile = legend
                    .tile(code)
                    .ok_or(GridError::UnknownCode { row, col, code })?;
                tiles.push(tile);
                count += 1;
            }
            match width {
                None => width = Some(count),
                Some(expected) if expected != count => {
                    return Err(GridError::RaggedRow {
                        row,
                        expected,
                        got: count,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or(GridError::Empty)?;
        Self::new(width, height, tiles)
    }

    /// Rectangular room of `width x height` cells ringed by `wall`.
    pub fn walled(width: usize, height: usize, wall: Tile) -> Result<Self, GridError> {
        let mut tiles = vec![Tile::Empty; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    tiles[y * width + x] = wall;
                }
            }
        }
        Self::new(width, height, tiles)
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Tile at `(x, y)`; `None` outside the map.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// Iterate `(x, y, tile)` over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &t)| (i % self.width, i / self.width, t))
    }

    /// Highest texture id referenced by any tile.
    pub fn max_texture(&self) -> TextureId {
        self.tiles
            .iter()
            .filter_map(|t| match *t {
                Tile::Empty => None,
                Tile::Wall(tex) | Tile::Door { tex, .. } => Some(tex),
            })
            .max()
            .unwrap_or(0)
    }
}

bitflags! {
    /// Door metadata the kernel carries but does not interpret.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DoorFlags: u8 {
        /// Latch has been triggered and the unlock delay is running or done.
        const LATCH_ENGAGED     = 1 << 0;
        /// Door sits in a corridor walled left and right.
        const SLIDES_HORIZONTAL = 1 << 1;
    }
}

/// Per-cell door openness and flags, same dimensions as the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DoorStates {
    width: usize,
    height: usize,
    openness: Vec<f32>,
    flags: Vec<DoorFlags>,
}

impl DoorStates {
    /// All doors closed; orientation detected from the neighbouring tiles.
    pub fn for_grid(grid: &TileGrid) -> Self {
        let (w, h) = (grid.width(), grid.height());
        let mut flags = vec![DoorFlags::empty(); w * h];
        for (x, y, tile) in grid.cells() {
            if !tile.is_door() {
                continue;
            }
            let solid = |dx: i32| {
                grid.get(x as i32 + dx, y as i32)
                    .is_some_and(|t| !t.is_empty())
            };
            if solid(-1) && solid(1) {
                flags[y * w + x] |= DoorFlags::SLIDES_HORIZONTAL;
            }
        }
        Self {
            width: w,
            height: h,
            openness: vec![0.0; w * h],
            flags,
        }
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Openness of the door at `(x, y)`, 0 closed .. 1 open.
    #[inline(always)]
    pub fn openness(&self, x: usize, y: usize) -> f32 {
        self.openness[self.idx(x, y)]
    }

    /// Store a new openness, clamped to [0, 1].
    pub fn set_openness(&mut self, x: usize, y: usize, value: f32) {
        let i = self.idx(x, y);
        self.openness[i] = value.clamp(0.0, 1.0);
    }

    pub fn flags(&self, x: usize, y: usize) -> DoorFlags {
        self.flags[self.idx(x, y)]
    }

    pub fn set_flags(&mut self, x: usize, y: usize, flags: DoorFlags) {
        let i = self.idx(x, y);
        self.flags[i] = flags;
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "
        11111
        10001
        11411
        10301
        11111
    ";

    #[test]
    fn parses_digit_map() {
        let grid = TileGrid::parse(MAP, &Legend::default()).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 5));
        assert_eq!(grid.get(0, 0), Some(Tile::Wall(1)));
        assert_eq!(grid.get(1, 1), Some(Tile::Empty));
        assert_eq!(
            grid.get(2, 2),
            Some(Tile::Door {
                tex: 4,
                latched: false
            })
        );
        assert_eq!(
            grid.get(2, 3),
            Some(Tile::Door {
                tex: 3,
                latched: true
            })
        );
        assert_eq!(grid.get(5, 0), None);
        assert_eq!(grid.get(-1, 2), None);
        assert_eq!(grid.max_texture(), 4);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = TileGrid::parse("111\n11\n", &Legend::default()).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn bad_characters_rejected() {
        let err = TileGrid::parse("1x1", &Legend::default()).unwrap_err();
        assert_eq!(
            err,
            GridError::BadChar {
                row: 0,
                col: 1,
                ch: 'x'
            }
        );
    }

    #[test]
    fn unknown_codes_rejected() {
        let legend = Legend::empty().with(1, Tile::Wall(1)).unwrap();
        let err = TileGrid::parse("12", &legend).unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownCode {
                row: 0,
                col: 1,
                code: 2
            }
        );
    }

    #[test]
    fn legend_codes_are_single_digits() {
        assert_eq!(
            Legend::empty().with(13, Tile::Wall(1)).unwrap_err(),
            GridError::CodeRange(13)
        );
        // a rejected two-digit code never lands on its last digit
        let legend = Legend::default();
        assert!(legend.clone().with(13, Tile::Wall(1)).is_err());
        assert_eq!(
            legend.tile(3),
            Some(Tile::Door {
                tex: 3,
                latched: true
            })
        );
        assert_eq!(Legend::empty().tile(13), None);
    }

    #[test]
    fn slot_zero_texture_rejected() {
        let legend = Legend::empty().with(1, Tile::Wall(NO_TEXTURE)).unwrap();
        assert_eq!(
            TileGrid::parse("01", &legend),
            Err(GridError::ReservedTexture { x: 1, y: 0 })
        );
    }

    #[test]
    fn empty_text_rejected() {
        assert_eq!(
            TileGrid::parse("  \n\n", &Legend::default()),
            Err(GridError::Empty)
        );
    }

    #[test]
    fn walled_room_has_hollow_middle() {
        let grid = TileGrid::walled(4, 3, Tile::Wall(2)).unwrap();
        assert_eq!(grid.get(1, 1), Some(Tile::Empty));
        assert_eq!(grid.get(2, 1), Some(Tile::Empty));
        assert_eq!(grid.get(3, 1), Some(Tile::Wall(2)));
        assert_eq!(grid.get(0, 2), Some(Tile::Wall(2)));
    }

    #[test]
    fn door_orientation_detected() {
        let grid = TileGrid::parse(MAP, &Legend::default()).unwrap();
        let doors = DoorStates::for_grid(&grid);
        // (2,2) sits between walls on both sides
        assert!(doors.flags(2, 2).contains(DoorFlags::SLIDES_HORIZONTAL));
        // (2,3) has open floor on both sides
        assert!(!doors.flags(2, 3).contains(DoorFlags::SLIDES_HORIZONTAL));
        assert_eq!(doors.openness(2, 2), 0.0);
    }

    #[test]
    fn openness_is_clamped() {
        let grid = TileGrid::parse(MAP, &Legend::default()).unwrap();
        let mut doors = DoorStates::for_grid(&grid);
        doors.set_openness(2, 2, 1.7);
        assert_eq!(doors.openness(2, 2), 1.0);
        doors.set_openness(2, 2, -0.2);
        assert_eq!(doors.openness(2, 2), 0.0);
    }
}
