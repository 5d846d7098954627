//! # Chunk Group Module
//!
//! This module provides the `ChunkGroup` struct, the full set of chunks for
//! one block kind. A level owns two groups, one solid and one fluid; every
//! block of that kind lives in exactly one chunk of its group, keyed by the
//! chunk id its center hashes to.

use std::collections::HashMap;

use log::debug;

use super::block::{Block, BlockKind};
use super::chunk::{chunk_id, Chunk};

/// Partitions all blocks of one kind across chunks keyed by chunk id.
///
/// Chunks are created lazily when the first block hashing to their id is
/// inserted. A chunk whose last block is removed is retained empty rather
/// than pruned, so chunk lookups never flip between present and absent for
/// ids that have been used.
#[derive(Clone, Debug)]
pub struct ChunkGroup {
    /// The block kind this group holds.
    pub kind: BlockKind,
    chunks: HashMap<u32, Chunk>,
    len: usize,
    limit: usize,
}

impl ChunkGroup {
    /// Creates an empty group for one block kind.
    ///
    /// # Arguments
    /// * `kind` - The kind of block this group will hold
    /// * `limit` - Maximum number of blocks the group accepts
    pub fn new(kind: BlockKind, limit: usize) -> Self {
        Self {
            kind,
            chunks: HashMap::new(),
            len: 0,
            limit,
        }
    }

    /// Inserts a block into the chunk its center hashes to.
    ///
    /// The target chunk is created on first use and marked unbuffered after
    /// the push. Insertion is refused when the block's kind does not match
    /// the group or the group is at its limit; legality checking upstream
    /// normally prevents both, this is the last guard.
    ///
    /// # Returns
    /// `true` if the block was inserted.
    pub fn insert(&mut self, block: Block) -> bool {
        if block.kind != self.kind || self.at_limit() {
            return false;
        }
        let id = chunk_id(block.center);
        let chunk = self.chunks.entry(id).or_insert_with(|| Chunk::new(id));
        chunk.push(block);
        self.len += 1;
        debug!(
            "inserted {:?} block at {:?} into chunk {} ({} in group)",
            self.kind, block.center, id, self.len
        );
        true
    }

    /// Removes the block at `index` within the chunk `id`.
    ///
    /// The chunk is marked unbuffered and retained even when it becomes
    /// empty. Returns `None` when the chunk or index does not exist.
    pub fn remove_at(&mut self, id: u32, index: usize) -> Option<Block> {
        let chunk = self.chunks.get_mut(&id)?;
        let block = chunk.remove(index)?;
        self.len -= 1;
        debug!(
            "removed {:?} block at {:?} from chunk {} ({} in group)",
            self.kind, block.center, id, self.len
        );
        Some(block)
    }

    /// The chunk with the given id, if it has ever held a block.
    pub fn chunk(&self, id: u32) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    /// Mutable access to the chunk with the given id.
    pub fn chunk_mut(&mut self, id: u32) -> Option<&mut Chunk> {
        self.chunks.get_mut(&id)
    }

    /// The blocks currently in chunk `id`, or an empty slice for an unused id.
    pub fn blocks_in(&self, id: u32) -> &[Block] {
        self.chunks.get(&id).map(|c| c.blocks.as_slice()).unwrap_or(&[])
    }

    /// Iterates over every block in the group, chunk by chunk.
    pub fn iter_blocks(&self) -> impl Iterator<Item = &Block> {
        self.chunks.values().flat_map(|c| c.blocks.iter())
    }

    /// Iterates over every chunk in the group.
    pub fn iter_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Marks every chunk's mesh buffer stale.
    ///
    /// Fluid recomputation calls this so the render side re-buffers the
    /// whole group before the next pass.
    pub fn mark_all_unbuffered(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.buffered = false;
        }
    }

    /// Total number of blocks across all chunks.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the group holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the group has reached its maximum block count.
    pub fn at_limit(&self) -> bool {
        self.len >= self.limit
    }

    /// The group's maximum block count.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Removes every block and chunk. Used by new/load level.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.len = 0;
    }
}
