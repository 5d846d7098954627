//! # Movement Module
//!
//! This module provides the `Mover`, the single movement-capability struct
//! shared by the player camera and any roaming critter. It owns a position,
//! yaw/pitch orientation, the derived front/right/up basis, and the
//! "given control" flag that gates committed movement.
//!
//! ## Predictor Contract
//!
//! Every direction has two operations: `predict_move` computes the position
//! a step would land on without touching any state, and `apply_move`
//! commits it. An external collision checker evaluates the predicted
//! position against the level's solid geometry first and only then lets the
//! caller commit, so the mover itself never needs to know about collision
//! response.

use cgmath::{InnerSpace, Point3, Rad, Vector3};
use std::f32::consts::{PI, TAU};

use crate::geometry::Aabb;
use crate::level::block::BLOCK_EXTENT;
use crate::level::chunk::chunk_id;
use crate::level::LevelContainer;

/// Pitch never leaves `(-PITCH_LIMIT, PITCH_LIMIT)`; at roughly 85.7
/// degrees this keeps the basis vectors away from gimbal flip.
pub const PITCH_LIMIT: f32 = PI / 2.1;

/// Half-extents of the default body volume used for collision pre-checks
/// and for refusing block placement inside the player.
pub const BODY_HALF_EXTENTS: Vector3<f32> = Vector3::new(0.6, 1.7, 0.6);

/// The six movement directions a mover understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    /// Along the view front vector.
    FORWARD,
    /// Against the view front vector.
    BACKWARD,
    /// Against the right vector.
    LEFT,
    /// Along the right vector.
    RIGHT,
    /// Along the up vector.
    UP,
    /// Against the up vector.
    DOWN,
}

/// Position, orientation and movement capability of a camera or critter.
///
/// Composition replaces the old critter/observer/player class chain: an
/// entity that renders a model or carries the camera holds a `Mover` plus
/// whatever else it needs, instead of inheriting one.
#[derive(Clone, Debug)]
pub struct Mover {
    /// Position in world space.
    pub position: Point3<f32>,
    /// Horizontal rotation around Y, wrapped modulo a full turn.
    pub yaw: Rad<f32>,
    /// Vertical rotation, clamped inside `PITCH_LIMIT`.
    pub pitch: Rad<f32>,
    /// Normalized forward vector, derived from yaw and pitch.
    pub front: Vector3<f32>,
    /// Normalized right vector, horizontal.
    pub right: Vector3<f32>,
    /// Normalized up vector, orthogonal to front.
    pub up: Vector3<f32>,
    /// Whether this mover currently accepts committed movement.
    pub given_control: bool,
    /// Half-extents of the body volume for collision pre-checks.
    pub body_half_extents: Vector3<f32>,
}

impl Mover {
    /// Creates a mover at a position with the given orientation.
    ///
    /// # Arguments
    /// * `position` - Starting position in world space
    /// * `yaw` - Initial yaw in radians
    /// * `pitch` - Initial pitch in radians, clamped on the spot
    pub fn new<Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: Point3<f32>,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut mover = Self {
            position,
            yaw: yaw.into(),
            pitch: pitch.into(),
            front: Vector3::unit_x(),
            right: Vector3::unit_z(),
            up: Vector3::unit_y(),
            given_control: true,
            body_half_extents: BODY_HALF_EXTENTS,
        };
        mover.normalize_angles();
        mover.update_basis();
        mover
    }

    /// Applies a look delta and recomputes the basis vectors.
    ///
    /// Yaw wraps modulo a full turn; pitch clamps inside `PITCH_LIMIT`.
    ///
    /// # Arguments
    /// * `delta_yaw` - Yaw change in radians
    /// * `delta_pitch` - Pitch change in radians
    pub fn look(&mut self, delta_yaw: Rad<f32>, delta_pitch: Rad<f32>) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
        self.normalize_angles();
        self.update_basis();
    }

    /// The position a step of `distance` along `direction` would reach.
    ///
    /// Never mutates the mover; this is the half of the move the external
    /// collision checker consumes.
    pub fn predict_move(&self, direction: MoveDirection, distance: f32) -> Point3<f32> {
        self.position + self.displacement(direction) * distance
    }

    /// Commits a step of `distance` along `direction`.
    ///
    /// Refused while the mover has not been given control.
    ///
    /// # Returns
    /// `true` if the position changed.
    pub fn apply_move(&mut self, direction: MoveDirection, distance: f32) -> bool {
        if !self.given_control {
            return false;
        }
        self.position = self.predict_move(direction, distance);
        true
    }

    /// The mover's body volume at its current position.
    pub fn body_aabb(&self) -> Aabb {
        self.body_aabb_at(self.position)
    }

    /// The mover's body volume centered at an arbitrary position.
    ///
    /// Pairs with `predict_move`: the checker builds the body at the
    /// predicted position and tests it against solid geometry.
    pub fn body_aabb_at(&self, position: Point3<f32>) -> Aabb {
        Aabb::new(position, self.body_half_extents)
    }

    /// Tests whether the body volume at `position` would overlap any solid
    /// block.
    ///
    /// A block is bucketed by its center, so a block overlapping the body
    /// can have its center up to a block half-extent outside it, in a
    /// neighboring chunk cell. The sampled volume is therefore the body
    /// grown by a block half-extent per axis; the chunks its corners hash
    /// to cover every block the body could touch, since the grown volume
    /// is still smaller than a cell on each axis.
    ///
    /// # Arguments
    /// * `level` - The level whose solid geometry to test against
    /// * `position` - The (usually predicted) body center
    pub fn would_collide(&self, level: &LevelContainer, position: Point3<f32>) -> bool {
        let body = self.body_aabb_at(position);
        let block_half = BLOCK_EXTENT / 2.0;
        let reach = Aabb::new(
            position,
            self.body_half_extents + Vector3::new(block_half, block_half, block_half),
        );
        let min = reach.min();
        let max = reach.max();
        let mut ids = [0u32; 8];
        let mut id_count = 0;
        for &x in &[min.x, max.x] {
            for &y in &[min.y, max.y] {
                for &z in &[min.z, max.z] {
                    let id = chunk_id(Point3::new(x, y, z));
                    if !ids[..id_count].contains(&id) {
                        ids[id_count] = id;
                        id_count += 1;
                    }
                }
            }
        }
        ids[..id_count].iter().any(|&id| {
            level
                .solid
                .blocks_in(id)
                .iter()
                .any(|block| body.intersects(&block.aabb()))
        })
    }

    fn displacement(&self, direction: MoveDirection) -> Vector3<f32> {
        match direction {
            MoveDirection::FORWARD => self.front,
            MoveDirection::BACKWARD => -self.front,
            MoveDirection::LEFT => -self.right,
            MoveDirection::RIGHT => self.right,
            MoveDirection::UP => self.up,
            MoveDirection::DOWN => -self.up,
        }
    }

    fn normalize_angles(&mut self) {
        self.yaw = Rad(self.yaw.0.rem_euclid(TAU));
        self.pitch = Rad(self.pitch.0.clamp(-PITCH_LIMIT, PITCH_LIMIT));
    }

    fn update_basis(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();

        self.front = Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize();
        self.up =
            Vector3::new(-pitch_sin * yaw_cos, pitch_cos, -pitch_sin * yaw_sin).normalize();
        self.right = Vector3::new(-yaw_sin, 0.0, yaw_cos).normalize();
    }
}
