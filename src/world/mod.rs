mod camera;
mod grid;
mod texture;

pub use camera::Pose;

pub use grid::{DoorFlags, DoorStates, GridError, Legend, Tile, TileGrid};

pub use texture::{NO_TEXTURE, Rgb, Texture, TextureAtlas, TextureError, TextureId};
