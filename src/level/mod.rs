//! # Level Module
//!
//! This module provides the `LevelContainer`, the owner of all level state:
//! the solid and fluid chunk groups, the occupancy index that keeps a
//! position from holding two blocks, and the skybox volume that bounds the
//! whole level. It validates placement, performs the actual block
//! mutations, and answers the selection scan's nearest-hit query.
//!
//! ## Mutation Discipline
//!
//! All mutation goes through `add_block` / `remove_block` / `clear` on the
//! game-update thread. The render side only reads chunk block lists and the
//! per-chunk `buffered` flag, which these operations clear after the block
//! list change is complete.

use cgmath::{MetricSpace, Point3, Vector3};
use log::debug;
use std::collections::HashMap;

use crate::geometry::Aabb;

use block::{Block, BlockKind};
use chunk::{chunk_id, chunk_id_towards, SKYBOX_WIDTH};
use chunk_group::ChunkGroup;

pub mod block;
pub mod chunk;
pub mod chunk_group;
pub mod file;
pub mod generate;

/// Maximum number of solid blocks a level may hold.
pub const MAX_SOLID_BLOCKS: usize = 20000;

/// Maximum number of fluid blocks a level may hold.
pub const MAX_FLUID_BLOCKS: usize = 4000;

/// Identifies one existing block: its kind, the chunk it lives in, its
/// index inside that chunk, and its distance from the viewer at selection
/// time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectionHit {
    /// Which group the block belongs to.
    pub kind: BlockKind,
    /// The chunk id the block lives under.
    pub chunk_id: u32,
    /// The block's index within its chunk's block list.
    pub index: usize,
    /// Euclidean distance from the viewer to the block center.
    pub distance: f32,
}

/// Owns the solid and fluid chunk groups, the occupancy index and the
/// skybox boundary of one level.
#[derive(Clone, Debug)]
pub struct LevelContainer {
    /// All solid blocks, partitioned into chunks.
    pub solid: ChunkGroup,
    /// All fluid blocks, partitioned into chunks.
    pub fluid: ChunkGroup,
    /// The cubic volume every block must lie strictly within.
    pub skybox: Aabb,
    occupancy: HashMap<Point3<i32>, BlockKind>,
}

impl Default for LevelContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelContainer {
    /// Creates an empty level with the standard skybox and block limits.
    pub fn new() -> Self {
        Self::with_limits(MAX_SOLID_BLOCKS, MAX_FLUID_BLOCKS)
    }

    /// Creates an empty level with explicit group limits.
    ///
    /// # Arguments
    /// * `solid_limit` - Maximum solid block count
    /// * `fluid_limit` - Maximum fluid block count
    pub fn with_limits(solid_limit: usize, fluid_limit: usize) -> Self {
        Self {
            solid: ChunkGroup::new(BlockKind::Solid, solid_limit),
            fluid: ChunkGroup::new(BlockKind::Fluid, fluid_limit),
            skybox: Aabb::cube(Point3::new(0.0, 0.0, 0.0), SKYBOX_WIDTH),
            occupancy: HashMap::new(),
        }
    }

    /// The kind occupying a quantized position, if any.
    ///
    /// At most one kind can occupy a position at a time; this map is the
    /// authority for that invariant.
    pub fn kind_at(&self, position: Point3<i32>) -> Option<BlockKind> {
        self.occupancy.get(&position).copied()
    }

    /// Total number of blocks across both groups.
    pub fn block_count(&self) -> usize {
        self.solid.len() + self.fluid.len()
    }

    /// Decides whether a candidate block may NOT be committed to the level.
    ///
    /// Placement is illegal when any of these holds:
    /// 1. the candidate's quantized position is already occupied by either
    ///    kind,
    /// 2. the candidate's box overlaps any block in the chunk it hashes to,
    ///    solid or fluid,
    /// 3. the candidate does not lie entirely within the skybox (both
    ///    containment and overlap with the skybox volume are required),
    /// 4. the group matching the candidate's kind is at its block limit.
    ///
    /// The check is pure: repeated calls on an unchanged candidate return
    /// the same answer.
    ///
    /// # Returns
    /// `true` when the candidate must be rejected; `false` means legal.
    pub fn cannot_place(&self, candidate: &Block) -> bool {
        if self.occupancy.contains_key(&candidate.quantized_position()) {
            return true;
        }

        let aabb = candidate.aabb();
        let id = chunk_id(candidate.center);
        for block in self
            .solid
            .blocks_in(id)
            .iter()
            .chain(self.fluid.blocks_in(id).iter())
        {
            if aabb.intersects(&block.aabb()) {
                return true;
            }
        }

        if !(self.skybox.contains(&aabb) && self.skybox.intersects(&aabb)) {
            return true;
        }

        let group = self.group(candidate.kind);
        if group.at_limit() {
            return true;
        }

        false
    }

    /// Commits a block to the level.
    ///
    /// Runs the full legality check, inserts the block into its group,
    /// records its position in the occupancy index, and triggers the fluid
    /// recompute when a fluid block was added.
    ///
    /// # Returns
    /// `true` if the block was placed; `false` leaves the level untouched.
    pub fn add_block(&mut self, block: Block) -> bool {
        if self.cannot_place(&block) {
            return false;
        }
        let position = block.quantized_position();
        let kind = block.kind;
        if !self.group_mut(kind).insert(block) {
            return false;
        }
        self.occupancy.insert(position, kind);
        if kind == BlockKind::Fluid {
            self.update_fluids();
        }
        true
    }

    /// Removes the block identified by a selection hit.
    ///
    /// The block leaves its group and the occupancy index; the fluid
    /// recompute runs when a fluid block was removed.
    ///
    /// # Returns
    /// The removed block, or `None` when the hit no longer refers to one.
    pub fn remove_block(&mut self, hit: SelectionHit) -> Option<Block> {
        let block = self.group_mut(hit.kind).remove_at(hit.chunk_id, hit.index)?;
        self.occupancy.remove(&block.quantized_position());
        if hit.kind == BlockKind::Fluid {
            self.update_fluids();
        }
        Some(block)
    }

    /// Recomputes derived fluid state after a fluid mutation.
    ///
    /// Every fluid chunk's mesh buffer is invalidated so the render side
    /// rebuilds fluid surfaces before the next pass. Must run after any
    /// fluid add or remove and before that pass.
    pub fn update_fluids(&mut self) {
        self.fluid.mark_all_unbuffered();
        debug!(
            "fluid state recomputed over {} blocks",
            self.fluid.len()
        );
    }

    /// Finds the block nearest to the viewer along the view ray.
    ///
    /// Scans both groups' blocks in the chunk the viewer is aimed at,
    /// keeps the ray hits, and ranks them by distance from the viewer to
    /// the block center.
    ///
    /// When the nearest solid and nearest fluid hit are ranked against each
    /// other, solid wins only at a strictly smaller distance; at equal
    /// distance the fluid block is selected. Deliberate, if arguable,
    /// policy; callers and tests rely on it.
    ///
    /// # Arguments
    /// * `eye` - Viewer position
    /// * `front` - Normalized view direction
    pub fn nearest_hit(&self, eye: Point3<f32>, front: Vector3<f32>) -> Option<SelectionHit> {
        let id = chunk_id_towards(eye, front);
        let solid = self.nearest_in_group(&self.solid, id, eye, front);
        let fluid = self.nearest_in_group(&self.fluid, id, eye, front);
        match (solid, fluid) {
            (Some(s), Some(f)) => {
                if s.distance < f.distance {
                    Some(s)
                } else {
                    Some(f)
                }
            }
            (hit, None) | (None, hit) => hit,
        }
    }

    fn nearest_in_group(
        &self,
        group: &ChunkGroup,
        id: u32,
        eye: Point3<f32>,
        front: Vector3<f32>,
    ) -> Option<SelectionHit> {
        let mut best: Option<SelectionHit> = None;
        for (index, block) in group.blocks_in(id).iter().enumerate() {
            if !block.ray_intersects(eye, front) {
                continue;
            }
            let distance = eye.distance(block.center);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(SelectionHit {
                    kind: group.kind,
                    chunk_id: id,
                    index,
                    distance,
                });
            }
        }
        best
    }

    /// A shared reference to the block a selection hit refers to.
    pub fn block(&self, hit: SelectionHit) -> Option<&Block> {
        self.group(hit.kind).blocks_in(hit.chunk_id).get(hit.index)
    }

    /// A mutable reference to the block a selection hit refers to.
    ///
    /// Used by the editor to apply and clear selection highlights in place.
    pub fn block_mut(&mut self, hit: SelectionHit) -> Option<&mut Block> {
        let group = self.group_mut(hit.kind);
        group
            .chunk_mut(hit.chunk_id)
            .and_then(|chunk| chunk.blocks.get_mut(hit.index))
    }

    /// Strips selection highlights from every block in the level.
    pub fn clear_highlights(&mut self) {
        for group in [&mut self.solid, &mut self.fluid] {
            for id in group.iter_chunks().map(|c| c.id).collect::<Vec<_>>() {
                if let Some(chunk) = group.chunk_mut(id) {
                    for block in chunk.blocks.iter_mut() {
                        block.clear_highlight();
                    }
                }
            }
        }
    }

    /// Empties both groups and the occupancy index (new or loaded level).
    pub fn clear(&mut self) {
        self.solid.clear();
        self.fluid.clear();
        self.occupancy.clear();
    }

    fn group(&self, kind: BlockKind) -> &ChunkGroup {
        match kind {
            BlockKind::Solid => &self.solid,
            BlockKind::Fluid => &self.fluid,
        }
    }

    fn group_mut(&mut self, kind: BlockKind) -> &mut ChunkGroup {
        match kind {
            BlockKind::Solid => &mut self.solid,
            BlockKind::Fluid => &mut self.fluid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::block::block_texture::BlockTexture;

    fn solid(x: f32, y: f32, z: f32) -> Block {
        Block::new(Point3::new(x, y, z), BlockTexture::STONE)
    }

    fn fluid(x: f32, y: f32, z: f32) -> Block {
        Block::new(Point3::new(x, y, z), BlockTexture::WATER)
    }

    #[test]
    fn occupied_position_excludes_the_other_kind() {
        let mut level = LevelContainer::new();
        assert!(level.add_block(solid(2.0, 2.0, 2.0)));
        // Same quantized position, other kind: rejected.
        assert!(!level.add_block(fluid(2.0, 2.0, 2.0)));
        assert_eq!(level.kind_at(Point3::new(2, 2, 2)), Some(BlockKind::Solid));
        assert_eq!(level.fluid.len(), 0);
    }

    #[test]
    fn overlap_in_target_chunk_rejects() {
        let mut level = LevelContainer::new();
        assert!(level.add_block(solid(2.0, 2.0, 2.0)));
        // Different quantized position but geometric overlap.
        let overlapping = solid(3.0, 2.0, 2.0);
        assert!(level.cannot_place(&overlapping));
        // Flush against a face is fine.
        let flush = solid(4.0, 2.0, 2.0);
        assert!(!level.cannot_place(&flush));
    }

    #[test]
    fn rejection_is_idempotent() {
        let mut level = LevelContainer::new();
        level.add_block(solid(0.0, 0.0, 0.0));
        let candidate = solid(1.0, 0.0, 0.0);
        let first = level.cannot_place(&candidate);
        let second = level.cannot_place(&candidate);
        assert!(first);
        assert_eq!(first, second);
    }

    #[test]
    fn partially_out_of_skybox_rejects() {
        let level = LevelContainer::new();
        let half = SKYBOX_WIDTH / 2.0;
        // Center inside, box poking out through the wall.
        let poking = solid(half - 0.5, 0.0, 0.0);
        assert!(level.cannot_place(&poking));
        // Fully inside, touching the wall from within.
        let inside = solid(half - 1.0, 0.0, 0.0);
        assert!(!level.cannot_place(&inside));
        // Entirely outside.
        let outside = solid(half + 10.0, 0.0, 0.0);
        assert!(level.cannot_place(&outside));
    }

    #[test]
    fn limit_reached_rejects_legal_looking_placement() {
        let mut level = LevelContainer::with_limits(2, MAX_FLUID_BLOCKS);
        assert!(level.add_block(solid(0.0, 0.0, 0.0)));
        assert!(level.add_block(solid(4.0, 0.0, 0.0)));
        let candidate = solid(8.0, 0.0, 0.0);
        assert!(level.cannot_place(&candidate));
        assert!(!level.add_block(candidate));
        // Fluid group is unaffected by the solid limit.
        assert!(level.add_block(fluid(12.0, 0.0, 0.0)));
    }

    #[test]
    fn remove_frees_the_position() {
        let mut level = LevelContainer::new();
        let eye = Point3::new(8.0, 8.0, 2.0);
        let front = Vector3::new(0.0, 0.0, 1.0);
        assert!(level.add_block(solid(8.0, 8.0, 10.0)));
        let hit = level.nearest_hit(eye, front).unwrap();
        let removed = level.remove_block(hit).unwrap();
        assert_eq!(removed.center, Point3::new(8.0, 8.0, 10.0));
        assert_eq!(level.kind_at(Point3::new(8, 8, 10)), None);
        // The spot is placeable again.
        assert!(!level.cannot_place(&solid(8.0, 8.0, 10.0)));
    }

    #[test]
    fn nearest_hit_picks_minimum_distance() {
        let mut level = LevelContainer::new();
        let eye = Point3::new(8.0, 8.0, 2.0);
        let front = Vector3::new(0.0, 0.0, 1.0);
        assert!(level.add_block(solid(8.0, 8.0, 12.0)));
        assert!(level.add_block(solid(8.0, 8.0, 8.0)));
        let hit = level.nearest_hit(eye, front).unwrap();
        let block = level.block(hit).unwrap();
        assert_eq!(block.center.z, 8.0);
        assert_eq!(hit.kind, BlockKind::Solid);
    }

    #[test]
    fn equidistant_solid_and_fluid_selects_fluid() {
        // Set the groups up directly: the tie geometry overlaps, which the
        // placement path would refuse, but the selection policy is what is
        // under test here.
        let mut level = LevelContainer::new();
        let eye = Point3::new(8.0, 8.0, 2.0);
        let front = Vector3::new(0.0, 0.0, 1.0);
        // 0.5 offsets are exactly representable, so the two distances tie
        // bit for bit.
        let s = solid(8.5, 8.0, 10.0);
        let f = fluid(7.5, 8.0, 10.0);
        assert!(level.solid.insert(s));
        assert!(level.fluid.insert(f));

        let hit = level.nearest_hit(eye, front).unwrap();
        assert_eq!(hit.kind, BlockKind::Fluid);
    }

    #[test]
    fn strictly_nearer_solid_beats_fluid() {
        let mut level = LevelContainer::new();
        let eye = Point3::new(8.0, 8.0, 2.0);
        let front = Vector3::new(0.0, 0.0, 1.0);
        assert!(level.add_block(solid(8.0, 8.0, 8.0)));
        assert!(level.add_block(fluid(8.0, 8.0, 12.0)));
        let hit = level.nearest_hit(eye, front).unwrap();
        assert_eq!(hit.kind, BlockKind::Solid);
    }

    #[test]
    fn fluid_mutation_marks_fluid_chunks_stale() {
        let mut level = LevelContainer::new();
        assert!(level.add_block(fluid(2.0, 2.0, 2.0)));
        // Pretend the render side buffered everything.
        level.fluid.mark_all_unbuffered();
        let id = chunk_id(Point3::new(2.0, 2.0, 2.0));
        level.fluid.chunk_mut(id).unwrap().buffered = true;
        assert!(level.add_block(fluid(6.0, 2.0, 2.0)));
        assert!(!level.fluid.chunk(id).unwrap().buffered);
    }

    #[test]
    fn clear_resets_everything() {
        let mut level = LevelContainer::new();
        level.add_block(solid(0.0, 0.0, 0.0));
        level.add_block(fluid(4.0, 0.0, 0.0));
        level.clear();
        assert_eq!(level.block_count(), 0);
        assert_eq!(level.kind_at(Point3::new(0, 0, 0)), None);
        assert!(!level.cannot_place(&solid(0.0, 0.0, 0.0)));
    }
}
