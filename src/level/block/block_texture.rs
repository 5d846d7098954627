//! # Block Texture Module
//!
//! This module defines the fixed palette of textures a block can carry.
//! The palette doubles as the editor's placeable-texture cycle: the editor
//! steps through it with prev/next commands, clamped at both ends.

use num_derive::FromPrimitive;

use super::BlockTextureSize;

/// Enumerates the fixed texture palette for level blocks.
///
/// Each variant is assigned a stable integer value used by the level file
/// format and by the renderer's atlas lookup. `FromPrimitive` gives the
/// reverse conversion when decoding saved levels.
///
/// `WATER` is the only fluid texture; every other entry produces solid
/// blocks when placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockTexture {
    /// A wooden plank texture.
    WOOD,

    /// A basic dirt texture.
    DIRT,

    /// A grass texture (green top over dirt).
    GRASS,

    /// A grey stone texture.
    STONE,

    /// A light sand texture.
    SAND,

    /// The water texture; placing it creates a fluid block.
    WATER,
}

/// Number of entries in the texture palette.
pub const PALETTE_LEN: usize = 6;

/// Maps each palette entry to its atlas tile indices, one per face in
/// [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT] order. Consumed by the external
/// renderer; kept next to the palette so the two stay in sync.
pub static BLOCK_TEXTURE_TO_ATLAS_INDICES: [[usize; 6]; PALETTE_LEN] = [
    [0, 0, 0, 0, 0, 0], // WOOD (all sides use tile 0)
    [1, 1, 1, 1, 1, 1], // DIRT
    [2, 2, 1, 3, 2, 2], // GRASS (top: 3, bottom: dirt, sides: 2)
    [4, 4, 4, 4, 4, 4], // STONE
    [5, 5, 5, 5, 5, 5], // SAND
    [6, 6, 6, 6, 6, 6], // WATER
];

impl BlockTexture {
    /// Converts a `BlockTextureSize` back to a `BlockTexture`.
    ///
    /// Used when decoding level files, where textures are stored in their
    /// compact integer form.
    ///
    /// # Arguments
    /// * `value` - The texture as a `BlockTextureSize`
    ///
    /// # Returns
    /// `Some(texture)` for a value inside the palette, `None` otherwise.
    pub fn from_int(value: BlockTextureSize) -> Option<Self> {
        num::FromPrimitive::from_u8(value)
    }

    /// The compact integer form of this texture, as stored in level files.
    pub fn to_int(self) -> BlockTextureSize {
        self as BlockTextureSize
    }

    /// Picks a random non-fluid texture, for generated levels.
    pub fn random_solid() -> Self {
        num::FromPrimitive::from_u8(fastrand::u8(0..(PALETTE_LEN as u8 - 1))).unwrap()
    }

    /// Whether placing this texture produces a fluid block.
    pub fn is_fluid(self) -> bool {
        self == BlockTexture::WATER
    }

    /// The previous palette entry, clamped at the first one.
    ///
    /// The palette does not wrap: stepping back from `WOOD` stays on `WOOD`.
    pub fn prev(self) -> Self {
        let value = self.to_int();
        if value == 0 {
            self
        } else {
            Self::from_int(value - 1).unwrap()
        }
    }

    /// The next palette entry, clamped at the last one.
    ///
    /// The palette does not wrap: stepping forward from `WATER` stays on
    /// `WATER`.
    pub fn next(self) -> Self {
        let value = self.to_int();
        if value as usize == PALETTE_LEN - 1 {
            self
        } else {
            Self::from_int(value + 1).unwrap()
        }
    }
}
