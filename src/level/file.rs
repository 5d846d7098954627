//! # Level File Module
//!
//! This module provides the level file format: a JSON document holding a
//! version tag and a flat list of block records. Position, texture and
//! solidity round-trip exactly; selection highlights and other transient
//! state are never persisted.
//!
//! A failed load never touches the caller's current level: records are
//! replayed into a fresh container and the container is only returned once
//! every record has been placed.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use cgmath::Point3;
use log::info;
use serde::{Deserialize, Serialize};

use super::block::block_texture::BlockTexture;
use super::block::{Block, BlockKind, BlockTextureSize};
use super::LevelContainer;

/// Format version written into every level file.
pub const LEVEL_FILE_VERSION: u32 = 1;

/// One persisted block: position, texture id and solidity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockRecord {
    /// The block's center position.
    pub position: [f32; 3],
    /// The block's texture in compact integer form.
    pub texture: BlockTextureSize,
    /// `true` for solid blocks, `false` for fluid.
    pub solid: bool,
}

/// The on-disk shape of a level file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LevelDocument {
    /// Format version, checked on load.
    pub version: u32,
    /// Every block of the level, both kinds, in no particular order.
    pub blocks: Vec<BlockRecord>,
}

impl BlockRecord {
    fn from_block(block: &Block) -> Self {
        Self {
            position: [block.center.x, block.center.y, block.center.z],
            texture: block.texture.to_int(),
            solid: block.kind == BlockKind::Solid,
        }
    }

    fn to_block(&self) -> Result<Block> {
        let texture = BlockTexture::from_int(self.texture)
            .with_context(|| format!("unknown texture id {}", self.texture))?;
        let kind = if self.solid {
            BlockKind::Solid
        } else {
            BlockKind::Fluid
        };
        let [x, y, z] = self.position;
        Ok(Block::with_kind(Point3::new(x, y, z), texture, kind))
    }
}

/// Captures a level as a serializable document.
pub fn document_from(level: &LevelContainer) -> LevelDocument {
    let blocks = level
        .solid
        .iter_blocks()
        .chain(level.fluid.iter_blocks())
        .map(BlockRecord::from_block)
        .collect();
    LevelDocument {
        version: LEVEL_FILE_VERSION,
        blocks,
    }
}

/// Rebuilds a level from a document.
///
/// Every record is replayed through the normal placement path, so a
/// document carrying duplicate positions, overlapping blocks or blocks
/// outside the skybox fails the whole load instead of silently dropping
/// records.
pub fn level_from(document: &LevelDocument) -> Result<LevelContainer> {
    if document.version != LEVEL_FILE_VERSION {
        bail!(
            "unsupported level file version {} (expected {})",
            document.version,
            LEVEL_FILE_VERSION
        );
    }
    let mut level = LevelContainer::new();
    for (index, record) in document.blocks.iter().enumerate() {
        let block = record
            .to_block()
            .with_context(|| format!("block record {index}"))?;
        if !level.add_block(block) {
            bail!(
                "block record {} at {:?} cannot be placed (occupied, overlapping, out of bounds or over limit)",
                index,
                record.position
            );
        }
    }
    Ok(level)
}

/// Saves a level to a file.
///
/// # Arguments
/// * `level` - The level to persist
/// * `path` - Destination file path
pub fn save_level<P: AsRef<Path>>(level: &LevelContainer, path: P) -> Result<()> {
    let path = path.as_ref();
    let document = document_from(level);
    let json = serde_json::to_string_pretty(&document).context("serializing level")?;
    fs::write(path, json).with_context(|| format!("writing level file {}", path.display()))?;
    info!(
        "saved level with {} blocks to {}",
        document.blocks.len(),
        path.display()
    );
    Ok(())
}

/// Loads a level from a file into a fresh container.
///
/// The caller swaps the returned container in only on success; on any
/// failure the current level stays untouched.
///
/// # Arguments
/// * `path` - Source file path
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelContainer> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading level file {}", path.display()))?;
    let document: LevelDocument = serde_json::from_str(&json)
        .with_context(|| format!("parsing level file {}", path.display()))?;
    let level = level_from(&document)
        .with_context(|| format!("rebuilding level from {}", path.display()))?;
    info!(
        "loaded level with {} blocks from {}",
        level.block_count(),
        path.display()
    );
    Ok(level)
}
