//! # Block Module
//!
//! This module provides the block data structures for the level editor:
//! the `Block` itself, its six faces, and the fixed texture palette.
//!
//! A block is a single placeable cuboid voxel. Blocks come in exactly one
//! of two kinds at any time: solid (buildable geometry the player collides
//! with) or fluid (water volumes with their own render pass). The kind is
//! fixed at creation from the texture the editor had selected.

use cgmath::{Point3, Vector3};

use crate::geometry::Aabb;

use block_texture::BlockTexture;

pub mod block_face;
pub mod block_texture;

/// The underlying integer type used to store texture ids in level files.
pub type BlockTextureSize = u8;

/// Full edge length of a block. All current blocks are uniform cubes of
/// this size; half-extents are carried per block so future non-uniform
/// sizes keep working through the same placement math.
pub const BLOCK_EXTENT: f32 = 2.0;

/// Distinguishes the two block kinds. A block is exactly one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Buildable geometry; participates in collision.
    Solid,
    /// Water volume; visual-only, re-meshed on every fluid mutation.
    Fluid,
}

/// Selection feedback attached to a block or placement candidate.
///
/// Holds the secondary texture/color pair the renderer blends over the
/// block while it is selected. Cleared on every deselect; never persisted
/// to level files.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Highlight {
    /// Overlay texture drawn on top of the block's own texture.
    pub texture: BlockTexture,
    /// RGBA tint for the overlay.
    pub color: [f32; 4],
}

impl Highlight {
    /// Red tint: the candidate cannot be placed where it is.
    pub const ILLEGAL: [f32; 4] = [1.0, 0.2, 0.2, 0.6];
    /// Green tint: a fresh ray-picked candidate that may be committed.
    pub const NEW: [f32; 4] = [0.2, 1.0, 0.2, 0.6];
    /// Blue tint: a legal candidate produced by adjacent placement.
    pub const ADJACENT: [f32; 4] = [0.2, 0.4, 1.0, 0.6];
    /// Yellow tint: the currently targeted existing block.
    pub const CURRENT: [f32; 4] = [1.0, 1.0, 0.2, 0.6];
}

/// A single placeable voxel cuboid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    /// Center position in world space.
    pub center: Point3<f32>,
    /// Half the extent along each axis.
    pub half_extents: Vector3<f32>,
    /// The block's texture.
    pub texture: BlockTexture,
    /// Solid or fluid; fixed for the life of the block.
    pub kind: BlockKind,
    /// Selection overlay, present only while the block is selected.
    pub highlight: Option<Highlight>,
}

impl Block {
    /// Creates a block of the standard cube size.
    ///
    /// The kind follows the texture: `WATER` produces a fluid block,
    /// everything else a solid one.
    ///
    /// # Arguments
    /// * `center` - Center position in world space
    /// * `texture` - Palette entry for the block
    pub fn new(center: Point3<f32>, texture: BlockTexture) -> Self {
        let kind = if texture.is_fluid() {
            BlockKind::Fluid
        } else {
            BlockKind::Solid
        };
        Self::with_kind(center, texture, kind)
    }

    /// Creates a block of the standard cube size with an explicit kind.
    ///
    /// Level files store the solidity flag separately from the texture, and
    /// the stored flag wins when the two disagree.
    pub fn with_kind(center: Point3<f32>, texture: BlockTexture, kind: BlockKind) -> Self {
        let half = BLOCK_EXTENT / 2.0;
        Self {
            center,
            half_extents: Vector3::new(half, half, half),
            texture,
            kind,
            highlight: None,
        }
    }

    /// The block's bounding box.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.center, self.half_extents)
    }

    /// The block's center rounded to the integer lattice.
    ///
    /// This is the key used by the occupancy map to reject a second block
    /// at the same position, independent of float noise in the center.
    pub fn quantized_position(&self) -> Point3<i32> {
        Point3::new(
            self.center.x.round() as i32,
            self.center.y.round() as i32,
            self.center.z.round() as i32,
        )
    }

    /// Tests whether a ray from `origin` along `dir` hits this block.
    pub fn ray_intersects(&self, origin: Point3<f32>, dir: Vector3<f32>) -> bool {
        self.aabb().ray_intersects(origin, dir)
    }

    /// Applies a selection overlay with the given tint.
    pub fn set_highlight(&mut self, color: [f32; 4]) {
        self.highlight = Some(Highlight {
            texture: self.texture,
            color,
        });
    }

    /// Removes any selection overlay.
    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_texture() {
        let solid = Block::new(Point3::new(0.0, 0.0, 0.0), BlockTexture::DIRT);
        let fluid = Block::new(Point3::new(0.0, 0.0, 0.0), BlockTexture::WATER);
        assert_eq!(solid.kind, BlockKind::Solid);
        assert_eq!(fluid.kind, BlockKind::Fluid);
    }

    #[test]
    fn quantized_position_rounds_float_noise_away() {
        let block = Block::new(Point3::new(3.9999998, -2.0000002, 0.0), BlockTexture::DIRT);
        assert_eq!(block.quantized_position(), Point3::new(4, -2, 0));
    }

    #[test]
    fn highlight_set_and_clear() {
        let mut block = Block::new(Point3::new(0.0, 0.0, 0.0), BlockTexture::GRASS);
        assert!(block.highlight.is_none());
        block.set_highlight(Highlight::CURRENT);
        assert_eq!(block.highlight.unwrap().color, Highlight::CURRENT);
        block.clear_highlight();
        assert!(block.highlight.is_none());
    }
}
