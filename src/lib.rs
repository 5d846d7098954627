#![warn(missing_docs)]

//! # Blockline
//!
//! The level-editing core of a first-person voxel builder: block storage
//! with spatial chunking, ray-based block selection, placement validation,
//! level file round-tripping, procedural level generation, and the
//! camera/critter movement model with its collision predictor.
//!
//! ## Key Modules
//!
//! * `geometry` - Ray/AABB math shared by selection and placement
//! * `level` - Blocks, chunks, chunk groups, the `LevelContainer`, level
//!   files and generators
//! * `editor` - The `EditorSession` driving select/place/remove operations
//! * `movement` - The `Mover` with its non-committing move predictors
//!
//! ## Architecture
//!
//! Rendering, windowing and audio are external collaborators. The contract
//! surface toward the renderer is deliberately small: it reads chunk block
//! lists and each chunk's `buffered` flag, rebuilding mesh buffers for
//! chunks whose flag is clear. All level mutation happens synchronously on
//! the game-update thread; `buffered` is cleared only after the mutation
//! that invalidated it is complete, so a renderer observing the flag always
//! sees the finished block list.
//!
//! ## Usage
//!
//! ```
//! use blockline::editor::EditorSession;
//! use blockline::level::LevelContainer;
//! use blockline::movement::Mover;
//! use cgmath::{Point3, Rad, Vector3};
//!
//! let mut level = LevelContainer::new();
//! let mut session = EditorSession::new();
//! let mover = Mover::new(Point3::new(0.0, 0.0, -20.0), Rad(0.0), Rad(0.0));
//!
//! session.select_new(&level, Point3::new(0.0, 0.0, 0.0), Vector3::unit_z());
//! assert!(session.add(&mut level, &mover));
//! assert_eq!(level.block_count(), 1);
//! ```

pub mod editor;
pub mod geometry;
pub mod level;
pub mod movement;
