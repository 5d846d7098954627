//! # Block Face Module
//!
//! This module defines the six faces of a block. The editor uses a face to
//! compute where an adjacent block goes; the renderer uses the same order
//! for per-face atlas lookups.

use cgmath::Vector3;

/// Represents the six faces of a block.
///
/// Each variant carries a stable integer value matching the per-face atlas
/// index order: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT].
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockFace {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockFace {
    /// Returns all six faces in atlas order.
    pub fn all() -> [BlockFace; 6] {
        [
            BlockFace::FRONT,
            BlockFace::BACK,
            BlockFace::BOTTOM,
            BlockFace::TOP,
            BlockFace::LEFT,
            BlockFace::RIGHT,
        ]
    }

    /// The outward unit normal of this face.
    ///
    /// Adjacent placement walks along this normal: a new block flush against
    /// the face sits at the old center plus the normal scaled by the sum of
    /// both blocks' half-extents on that axis.
    pub fn normal(self) -> Vector3<f32> {
        match self {
            BlockFace::FRONT => Vector3::new(0.0, 0.0, 1.0),
            BlockFace::BACK => Vector3::new(0.0, 0.0, -1.0),
            BlockFace::BOTTOM => Vector3::new(0.0, -1.0, 0.0),
            BlockFace::TOP => Vector3::new(0.0, 1.0, 0.0),
            BlockFace::LEFT => Vector3::new(-1.0, 0.0, 0.0),
            BlockFace::RIGHT => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// The axis (0 = X, 1 = Y, 2 = Z) this face's normal lies on.
    pub fn axis(self) -> usize {
        match self {
            BlockFace::LEFT | BlockFace::RIGHT => 0,
            BlockFace::BOTTOM | BlockFace::TOP => 1,
            BlockFace::FRONT | BlockFace::BACK => 2,
        }
    }
}
