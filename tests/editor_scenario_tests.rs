//! End-to-end editing scenarios driving the editor session against a live
//! level, the way the UI layer does.

use blockline::editor::{EditorSession, NEW_BLOCK_REACH};
use blockline::level::block::block_face::BlockFace;
use blockline::level::block::block_texture::BlockTexture;
use blockline::level::block::{Block, BlockKind};
use blockline::level::{generate, LevelContainer};
use blockline::movement::{MoveDirection, Mover};
use cgmath::{EuclideanSpace, MetricSpace, Point3, Rad, Vector3};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mover_far_away() -> Mover {
    Mover::new(Point3::new(50.0, 50.0, 50.0), Rad(0.0), Rad(0.0))
}

#[test]
fn place_one_block_from_empty_level() {
    init_logging();
    let mut level = LevelContainer::new();
    let mut session = EditorSession::new();
    let eye = Point3::origin();
    let front = Vector3::unit_z();

    session.select_new(&level, eye, front);
    let candidate = session.selected_new.expect("candidate should exist");
    assert!(eye.distance(candidate.center) <= NEW_BLOCK_REACH);
    assert!(candidate.center.z > 0.0);

    let before = level.solid.len() + level.fluid.len();
    assert!(session.add(&mut level, &mover_far_away()));
    let after = level.solid.len() + level.fluid.len();
    assert_eq!(after, before + 1);

    session.deselect(&mut level);
    assert!(session.selected_new.is_none());
    assert!(session.selected_curr.is_none());
}

#[test]
fn build_around_a_block_by_adjacent_placement() {
    init_logging();
    let mut level = LevelContainer::new();
    let mut session = EditorSession::new();
    let eye = Point3::new(8.0, 8.0, 2.0);
    let front = Vector3::unit_z();
    let mover = mover_far_away();

    session.select_new(&level, eye, front);
    assert!(session.add(&mut level, &mover));
    assert_eq!(level.solid.len(), 1);

    // One on top of the first block, one to its right.
    session.select_current(&mut level, eye, front);
    session.select_adjacent(&level, BlockFace::TOP);
    assert!(session.add(&mut level, &mover));

    session.select_current(&mut level, eye, front);
    session.select_adjacent(&level, BlockFace::RIGHT);
    assert!(session.add(&mut level, &mover));

    assert_eq!(level.solid.len(), 3);
    assert_eq!(level.kind_at(Point3::new(8, 10, 10)), Some(BlockKind::Solid));
    assert_eq!(level.kind_at(Point3::new(10, 8, 10)), Some(BlockKind::Solid));

    // The top spot is now taken; building there again is refused.
    session.select_current(&mut level, eye, front);
    session.select_adjacent(&level, BlockFace::TOP);
    assert!(!session.add(&mut level, &mover));
    assert_eq!(level.solid.len(), 3);
}

#[test]
fn removing_a_block_frees_its_spot() {
    init_logging();
    let mut level = LevelContainer::new();
    let mut session = EditorSession::new();
    let eye = Point3::new(8.0, 8.0, 2.0);
    let front = Vector3::unit_z();
    let mover = mover_far_away();

    session.select_new(&level, eye, front);
    assert!(session.add(&mut level, &mover));
    assert_eq!(level.block_count(), 1);

    session.select_current(&mut level, eye, front);
    assert!(session.remove(&mut level));
    assert_eq!(level.block_count(), 0);

    // Same spot accepts a block again.
    session.select_new(&level, eye, front);
    assert!(session.add(&mut level, &mover));
    assert_eq!(level.block_count(), 1);
}

#[test]
fn solid_and_fluid_never_share_a_position() {
    init_logging();
    let mut level = LevelContainer::new();
    let mut session = EditorSession::new();
    let eye = Point3::new(8.0, 8.0, 2.0);
    let front = Vector3::unit_z();
    let mover = mover_far_away();

    session.select_new(&level, eye, front);
    assert!(session.add(&mut level, &mover));

    // Aim the same ray with the water palette: same snapped spot, refused.
    session.palette = BlockTexture::WATER;
    session.select_new(&level, eye, front);
    assert!(!session.add(&mut level, &mover));
    assert_eq!(level.fluid.len(), 0);
    assert_eq!(level.kind_at(Point3::new(8, 8, 10)), Some(BlockKind::Solid));
}

#[test]
fn mover_predictor_gates_movement_through_walls() {
    init_logging();
    let mut level = LevelContainer::new();
    assert!(level.add_block(Block::new(Point3::new(8.0, 0.0, 0.0), BlockTexture::STONE)));

    // Walk straight at the wall in half-unit steps, committing only steps
    // whose predicted position stays clear.
    let mut mover = Mover::new(Point3::new(2.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
    let mut steps = 0;
    while steps < 20 {
        let predicted = mover.predict_move(MoveDirection::FORWARD, 0.5);
        if mover.would_collide(&level, predicted) {
            break;
        }
        assert!(mover.apply_move(MoveDirection::FORWARD, 0.5));
        steps += 1;
    }
    assert!(steps < 20, "collision pre-check never fired");
    // Stopped flush in front of the block, never inside it.
    assert!(!mover.would_collide(&level, mover.position));
    assert!(mover.position.x < 8.0 - 1.0 - mover.body_half_extents.x);

    // Removing the wall opens the path.
    level.clear();
    let predicted = mover.predict_move(MoveDirection::FORWARD, 0.5);
    assert!(!mover.would_collide(&level, predicted));
}

#[test]
fn generated_terrain_is_immediately_editable() {
    init_logging();
    let mut level = generate::surface_level(300, 11);
    let mut session = EditorSession::new();
    let placed = level.solid.len();
    assert!(placed > 0);

    // The surface stays well below y = 50, so a candidate up there is
    // always free.
    let eye = Point3::new(0.0, 50.0, 0.0);
    session.select_new(&level, eye, Vector3::unit_z());
    assert!(session.add(&mut level, &mover_far_away()));
    assert_eq!(level.solid.len(), placed + 1);
}
