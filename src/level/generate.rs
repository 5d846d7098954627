//! # Level Generation Module
//!
//! This module builds levels procedurally: a scatter of random blocks for
//! quick editing sandboxes, and a Perlin-noise surface for terrain-like
//! starting levels. Both route every block through the normal placement
//! path, so generated levels obey the same legality rules as hand-edited
//! ones.

use cgmath::Point3;
use log::info;
use noise::{NoiseFn, Perlin};

use super::block::block_texture::BlockTexture;
use super::block::{Block, BLOCK_EXTENT};
use super::chunk::SKYBOX_WIDTH;
use super::LevelContainer;

/// Upper bound on the requested block count for any generator.
pub const MAX_GENERATED_BLOCKS: usize = 20000;

/// Largest lattice step index whose block still fits inside the skybox.
const LATTICE_RADIUS: i32 = (SKYBOX_WIDTH / BLOCK_EXTENT) as i32 / 2 - 1;

/// Scaling factor applied to lattice coordinates when sampling Perlin noise.
const PERLIN_SCALE_FACTOR: f64 = 0.05;

/// Height swing of the Perlin surface in lattice steps above and below zero.
const PERLIN_HEIGHT_STEPS: f64 = 10.0;

/// Generates a level of randomly scattered solid blocks.
///
/// Up to `count` blocks (clamped to `MAX_GENERATED_BLOCKS`) are placed at
/// random lattice positions inside the skybox. Positions that collide with
/// earlier blocks are rejected and retried; generation terminates early
/// once the attempt budget runs out, so the result may hold fewer blocks
/// than requested.
///
/// # Arguments
/// * `count` - Requested number of blocks
pub fn random_level(count: usize) -> LevelContainer {
    let count = count.min(MAX_GENERATED_BLOCKS);
    let mut level = LevelContainer::new();
    let mut attempts = count * 10;

    while level.solid.len() < count && attempts > 0 {
        attempts -= 1;
        let lattice = || fastrand::i32(-LATTICE_RADIUS..=LATTICE_RADIUS) as f32 * BLOCK_EXTENT;
        let center = Point3::new(lattice(), lattice(), lattice());
        let block = Block::new(center, BlockTexture::random_solid());
        if !level.cannot_place(&block) {
            level.add_block(block);
        }
    }

    info!(
        "generated random level with {} of {} requested blocks",
        level.solid.len(),
        count
    );
    level
}

/// Generates a terrain-like level from a Perlin heightfield.
///
/// Each (x, z) lattice column gets one surface block whose height follows
/// scaled 2D Perlin noise, walking outward from the center until `count`
/// blocks (clamped to `MAX_GENERATED_BLOCKS`) are placed or the skybox
/// footprint is exhausted.
///
/// # Arguments
/// * `count` - Requested number of blocks
/// * `seed` - Noise seed; the same seed reproduces the same terrain
pub fn surface_level(count: usize, seed: u32) -> LevelContainer {
    let count = count.min(MAX_GENERATED_BLOCKS);
    let perlin = Perlin::new(seed);
    let mut level = LevelContainer::new();

    'columns: for ix in -LATTICE_RADIUS..=LATTICE_RADIUS {
        for iz in -LATTICE_RADIUS..=LATTICE_RADIUS {
            if level.solid.len() >= count {
                break 'columns;
            }
            let sample = perlin.get([
                ix as f64 * PERLIN_SCALE_FACTOR,
                iz as f64 * PERLIN_SCALE_FACTOR,
            ]);
            let iy = ((sample * PERLIN_HEIGHT_STEPS).round() as i32)
                .clamp(-LATTICE_RADIUS, LATTICE_RADIUS);
            let center = Point3::new(
                ix as f32 * BLOCK_EXTENT,
                iy as f32 * BLOCK_EXTENT,
                iz as f32 * BLOCK_EXTENT,
            );
            let texture = if iy > 2 {
                BlockTexture::STONE
            } else if iy < -2 {
                BlockTexture::SAND
            } else {
                BlockTexture::GRASS
            };
            let block = Block::new(center, texture);
            if !level.cannot_place(&block) {
                level.add_block(block);
            }
        }
    }

    info!(
        "generated surface level with {} of {} requested blocks (seed {})",
        level.solid.len(),
        count,
        seed
    );
    level
}
