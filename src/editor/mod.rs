//! # Editor Module
//!
//! This module provides the `EditorSession`, the per-caller editing state
//! and the operations the UI layer drives: picking a placement candidate,
//! targeting an existing block, adjacent placement, commit, removal and
//! palette cycling.
//!
//! A session is an explicit object owned by the caller rather than static
//! editor state, so independent sessions (one per test, or several
//! concurrent editors) never see each other.
//!
//! Every operation is synchronous and never panics on a missing
//! precondition: an `add` or `remove` whose target selection is absent is
//! a no-op that still clears the selection.

use cgmath::{Point3, Vector3};
use log::debug;

use crate::level::block::block_texture::BlockTexture;
use crate::level::block::{Block, Highlight, BLOCK_EXTENT};
use crate::level::block::block_face::BlockFace;
use crate::level::{LevelContainer, SelectionHit};
use crate::movement::Mover;

/// Distance along the view ray at which a fresh candidate block appears.
pub const NEW_BLOCK_REACH: f32 = 8.0;

/// Per-caller editing state: the outstanding placement candidate, the
/// targeted existing block, and the palette cursor.
///
/// At most one candidate and one target are outstanding at a time; every
/// deselect clears both.
#[derive(Clone, Debug)]
pub struct EditorSession {
    /// The candidate block being placed, not yet committed.
    pub selected_new: Option<Block>,
    /// The currently targeted existing block.
    pub selected_curr: Option<SelectionHit>,
    /// The palette entry the next candidate will use.
    pub palette: BlockTexture,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Creates a session with nothing selected and the palette at its
    /// first entry.
    pub fn new() -> Self {
        Self {
            selected_new: None,
            selected_curr: None,
            palette: BlockTexture::WOOD,
        }
    }

    /// Picks a placement candidate along the view ray.
    ///
    /// The candidate appears `NEW_BLOCK_REACH` units ahead of the eye,
    /// snapped to the block lattice, carrying the session's palette
    /// texture. It is tinted red when the level rejects it and green when
    /// it may be committed; the tint is feedback for the renderer only and
    /// `add` re-checks legality regardless.
    ///
    /// # Arguments
    /// * `level` - The level the candidate is validated against
    /// * `eye` - Viewer position
    /// * `front` - Normalized view direction
    pub fn select_new(
        &mut self,
        level: &LevelContainer,
        eye: Point3<f32>,
        front: Vector3<f32>,
    ) {
        let center = snap_to_lattice(eye + front * NEW_BLOCK_REACH);
        let mut candidate = Block::new(center, self.palette);
        let tint = if level.cannot_place(&candidate) {
            Highlight::ILLEGAL
        } else {
            Highlight::NEW
        };
        candidate.set_highlight(tint);
        debug!("new candidate at {:?}", candidate.center);
        self.selected_new = Some(candidate);
    }

    /// Targets the existing block the viewer is aiming at.
    ///
    /// Runs the nearest-hit scan over the aimed chunk and highlights the
    /// winner in place. A previous target loses its highlight first; when
    /// nothing is hit the session ends up with no target.
    ///
    /// # Arguments
    /// * `level` - The level to scan
    /// * `eye` - Viewer position
    /// * `front` - Normalized view direction
    pub fn select_current(
        &mut self,
        level: &mut LevelContainer,
        eye: Point3<f32>,
        front: Vector3<f32>,
    ) {
        if let Some(previous) = self.selected_curr.take() {
            if let Some(block) = level.block_mut(previous) {
                block.clear_highlight();
            }
        }
        let hit = level.nearest_hit(eye, front);
        if let Some(hit) = hit {
            if let Some(block) = level.block_mut(hit) {
                block.set_highlight(Highlight::CURRENT);
            }
            debug!("targeting {:?} block {} in chunk {}", hit.kind, hit.index, hit.chunk_id);
        }
        self.selected_curr = hit;
    }

    /// Builds a candidate flush against a face of the targeted block.
    ///
    /// The offset along the face normal is the targeted block's half-extent
    /// on that axis plus the candidate's, which keeps the math correct for
    /// unequal block sizes. The candidate goes through the same legality
    /// tinting as a fresh one (blue instead of green when legal). No-op
    /// when no block is targeted.
    ///
    /// # Arguments
    /// * `level` - The level the candidate is validated against
    /// * `face` - The face of the targeted block to build against
    pub fn select_adjacent(&mut self, level: &LevelContainer, face: BlockFace) {
        let target = match self.selected_curr.and_then(|hit| level.block(hit)) {
            Some(block) => *block,
            None => return,
        };
        let new_half = BLOCK_EXTENT / 2.0;
        let axis = face.axis();
        let offset = face.normal() * (target.half_extents[axis] + new_half);
        let mut candidate = Block::new(target.center + offset, self.palette);
        let tint = if level.cannot_place(&candidate) {
            Highlight::ILLEGAL
        } else {
            Highlight::ADJACENT
        };
        candidate.set_highlight(tint);
        debug!("adjacent candidate on {:?} at {:?}", face, candidate.center);
        self.selected_new = Some(candidate);
    }

    /// Commits the outstanding candidate to the level.
    ///
    /// Requires a candidate that passes the legality check and does not
    /// intersect the mover's body volume. Whatever happens, the candidate
    /// selection is cleared.
    ///
    /// # Arguments
    /// * `level` - The level to mutate
    /// * `mover` - The entity whose body the block must not be placed inside
    ///
    /// # Returns
    /// `true` if a block was added.
    pub fn add(&mut self, level: &mut LevelContainer, mover: &Mover) -> bool {
        let candidate = match self.selected_new.take() {
            Some(mut block) => {
                block.clear_highlight();
                block
            }
            None => return false,
        };
        if candidate.aabb().intersects(&mover.body_aabb()) {
            debug!("refusing to place block inside the mover's body");
            return false;
        }
        level.add_block(candidate)
    }

    /// Removes the targeted block from the level.
    ///
    /// Whatever happens, the target selection is cleared.
    ///
    /// # Arguments
    /// * `level` - The level to mutate
    ///
    /// # Returns
    /// `true` if a block was removed.
    pub fn remove(&mut self, level: &mut LevelContainer) -> bool {
        let hit = match self.selected_curr.take() {
            Some(hit) => hit,
            None => return false,
        };
        level.remove_block(hit).is_some()
    }

    /// Clears both selections and strips highlights from the level.
    pub fn deselect(&mut self, level: &mut LevelContainer) {
        self.selected_new = None;
        self.selected_curr = None;
        level.clear_highlights();
    }

    /// Steps the palette to the previous texture, clamped at the first.
    pub fn select_prev_texture(&mut self) {
        self.palette = self.palette.prev();
    }

    /// Steps the palette to the next texture, clamped at the last.
    pub fn select_next_texture(&mut self) {
        self.palette = self.palette.next();
    }
}

/// Snaps a world position to the block lattice.
fn snap_to_lattice(position: Point3<f32>) -> Point3<f32> {
    let snap = |coord: f32| (coord / BLOCK_EXTENT).round() * BLOCK_EXTENT;
    Point3::new(snap(position.x), snap(position.y), snap(position.z))
}
