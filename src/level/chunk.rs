//! # Chunk Module
//!
//! This module provides the `Chunk` struct, a spatial bucket of blocks, and
//! the hashing function that assigns every world position to a chunk id.
//!
//! ## Spatial Partitioning
//!
//! The skybox volume is divided into a fixed grid of cubic cells of
//! `CHUNK_CELL` world units. A block belongs to the cell its center falls
//! into; the cell's 3D coordinates are folded into a single non-negative
//! integer id. Different positions may legitimately share an id; the id
//! only has to be deterministic and dense enough to key a sparse map.
//!
//! Boundary positions quantize with `floor`, so a center sitting exactly on
//! a cell face always lands in the higher cell and never oscillates between
//! neighbours.

use cgmath::{Point3, Vector3};

use super::block::Block;

/// Edge length of one chunk cell in world units (8 blocks per axis).
pub const CHUNK_CELL: f32 = 16.0;

/// Edge length of the skybox cube. Every legal block lies strictly inside
/// this volume, so the chunk grid only has to cover it.
pub const SKYBOX_WIDTH: f32 = 128.0;

/// Number of chunk cells along each axis of the skybox.
pub const CHUNKS_PER_AXIS: u32 = (SKYBOX_WIDTH / CHUNK_CELL) as u32;

/// Maps a world position to its chunk id.
///
/// Each coordinate is shifted into the skybox-local non-negative range,
/// floor-quantized to a cell index, clamped to the grid, and the three
/// indices are folded row-major into one integer.
///
/// # Arguments
/// * `position` - Any world-space position
///
/// # Returns
/// A non-negative chunk id, stable across calls for the same position.
pub fn chunk_id(position: Point3<f32>) -> u32 {
    let half = SKYBOX_WIDTH / 2.0;
    let cell = |coord: f32| -> u32 {
        let index = ((coord + half) / CHUNK_CELL).floor();
        (index.max(0.0) as u32).min(CHUNKS_PER_AXIS - 1)
    };
    let x = cell(position.x);
    let y = cell(position.y);
    let z = cell(position.z);
    x + CHUNKS_PER_AXIS * y + CHUNKS_PER_AXIS * CHUNKS_PER_AXIS * z
}

/// Maps a viewer position plus a forward direction to a chunk id.
///
/// The position is pushed half a cell along the view direction before
/// hashing. When the viewer stands near a cell boundary this biases the
/// result toward the cell they are looking into, which is the chunk the
/// selection scan should search.
///
/// # Arguments
/// * `position` - Viewer (camera) position
/// * `front` - Normalized forward direction of the viewer
pub fn chunk_id_towards(position: Point3<f32>, front: Vector3<f32>) -> u32 {
    chunk_id(position + front * (CHUNK_CELL / 2.0))
}

/// A spatial bucket holding the blocks whose centers hash to one chunk id.
///
/// Block order is insertion order and stays stable across removals of other
/// blocks, because selection refers to blocks by their index in this list
/// while a highlight is outstanding.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The id every block in this chunk hashes to.
    pub id: u32,
    /// The blocks of this chunk, in insertion order.
    pub blocks: Vec<Block>,
    /// Whether the render side's mesh buffer for this chunk is current.
    /// Cleared only after a mutation is fully committed, so a render pass
    /// that observes `false` always sees the mutated block list.
    pub buffered: bool,
}

impl Chunk {
    /// Creates an empty chunk for the given id.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            blocks: Vec::new(),
            buffered: false,
        }
    }

    /// Appends a block and invalidates the mesh buffer.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
        self.buffered = false;
    }

    /// Removes and returns the block at `index`, invalidating the mesh
    /// buffer. Returns `None` when the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Block> {
        if index >= self.blocks.len() {
            return None;
        }
        let block = self.blocks.remove(index);
        self.buffered = false;
        Some(block)
    }

    /// Number of blocks in this chunk.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether this chunk currently holds no blocks.
    ///
    /// Empty chunks are retained in their group rather than pruned, so a
    /// chunk that once existed always queries as present.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
