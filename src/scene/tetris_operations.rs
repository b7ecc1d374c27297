//! Tetris scene operations
//!
//! Building the floor, dropping pieces, steering the active piece, and the
//! per-step tree report.

use super::tetris_data::{TetrisConfig, TetrisSceneData};
use super::tetromino::{cells, create_piece_generator, next_piece, parse_piece_selection};
use crate::constants::tetris::{GROUND_DENSITY, GROUND_FRICTION};
use crate::constants::text::TEXT_MARGIN_X;
use crate::debug_draw::{begin_frame, draw_string, new_line};
use crate::error::{TestbedError, TestbedResult};
use crate::input::{map_key, InputAction, KeyBindings, KeyCode};
use crate::physics::{
    body_count, body_is_settled, body_transform, broad_phase_tree_stats, contact_count,
    create_body, create_fixture, set_body_transform, stats_minimum_height, sync_query_tree,
    BodyDesc, BodyId, BodyKind, BodyTransform, BoxShape, FixtureDesc, PhysicsWorldData,
};
use crate::stats::StepStats;
use crate::testbed::{create_testbed, handle_testbed_action, step_testbed, Settings};
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Horizontal direction for piece moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Build the floor and drop the first piece
pub fn create_tetris_scene(
    config: &TetrisConfig,
    settings: &Settings,
) -> TestbedResult<TetrisSceneData> {
    let selection = parse_piece_selection(&config.piece, config.seed).map_err(|e| {
        TestbedError::InvalidConfig {
            field: "scene.piece".to_string(),
            value: config.piece.clone(),
            reason: e.to_string(),
        }
    })?;

    let mut testbed = create_testbed(settings)?;
    let (ground, ground_fixtures) = build_ground(&mut testbed.world, config)?;

    let mut scene = TetrisSceneData {
        config: config.clone(),
        testbed,
        ground,
        pieces: Vec::new(),
        active: None,
        generator: create_piece_generator(selection),
        fixture_count: ground_fixtures,
        settle_counter: 0,
        last_stats: StepStats::default(),
    };

    log::info!(
        "[tetris::create_tetris_scene] Floor of {}x{} tiles ready ({} fixtures)",
        config.ground_columns,
        config.ground_rows,
        ground_fixtures
    );

    spawn_piece(&mut scene)?;
    Ok(scene)
}

/// One static body at (0, -a) carrying `rows x columns` square tiles
fn build_ground(
    world: &mut PhysicsWorldData,
    config: &TetrisConfig,
) -> TestbedResult<(BodyId, usize)> {
    let a = config.ground_half_extent;
    let ground = create_body(
        world,
        &BodyDesc {
            kind: BodyKind::Static,
            position: Vec2::new(0.0, -a),
            angle: 0.0,
        },
    );

    let mut count = 0;
    let mut position = Vec2::ZERO;
    for _ in 0..config.ground_rows {
        position.x = -(config.ground_columns as f32) * a;
        for _ in 0..config.ground_columns {
            create_fixture(
                world,
                ground,
                &FixtureDesc {
                    shape: BoxShape {
                        half_width: a,
                        half_height: a,
                        center: position,
                        angle: 0.0,
                    },
                    density: GROUND_DENSITY,
                    friction: GROUND_FRICTION,
                    restitution: 0.0,
                },
            )?;
            count += 1;
            position.x += 2.0 * a;
        }
        position.y -= 2.0 * a;
    }

    Ok((ground, count))
}

/// Throw the scene away and build it again from its config
pub fn restart_tetris_scene(
    scene: &mut TetrisSceneData,
    settings: &Settings,
) -> TestbedResult<()> {
    let config = scene.config.clone();
    *scene = create_tetris_scene(&config, settings)?;
    log::info!("[tetris::restart_tetris_scene] Scene restarted");
    Ok(())
}

// ============================================================================
// PIECES
// ============================================================================

/// Drop a new piece at the spawn point and make it the active one.
/// Returns `None` once `max_pieces` pieces exist.
pub fn spawn_piece(scene: &mut TetrisSceneData) -> TestbedResult<Option<BodyId>> {
    if scene.pieces.len() >= scene.config.max_pieces {
        log::warn!(
            "[tetris::spawn_piece] Piece limit of {} reached, not spawning",
            scene.config.max_pieces
        );
        return Ok(None);
    }

    let kind = next_piece(&mut scene.generator);
    let block = scene.config.block_size;
    let world = &mut scene.testbed.world;

    let body = create_body(
        world,
        &BodyDesc {
            kind: BodyKind::Dynamic,
            position: Vec2::from(scene.config.spawn_position),
            angle: 0.0,
        },
    );

    for cell in cells(kind) {
        create_fixture(
            world,
            body,
            &FixtureDesc {
                shape: BoxShape {
                    half_width: block,
                    half_height: block,
                    center: cell * (2.0 * block),
                    angle: 0.0,
                },
                density: scene.config.density,
                friction: scene.config.friction,
                restitution: scene.config.restitution,
            },
        )?;
        scene.fixture_count += 1;
    }

    scene.pieces.push(body);
    scene.active = Some(body);
    scene.settle_counter = 0;

    log::info!(
        "[tetris::spawn_piece] Spawned {} piece #{}",
        kind,
        scene.pieces.len()
    );
    Ok(Some(body))
}

/// Shift the active piece one block width sideways.
/// Returns false when there is no active piece.
pub fn move_active_piece(
    scene: &mut TetrisSceneData,
    direction: MoveDirection,
) -> TestbedResult<bool> {
    let Some(active) = scene.active else {
        log::warn!("[tetris::move_active_piece] No active piece");
        return Ok(false);
    };

    let step = 2.0 * scene.config.block_size;
    let dx = match direction {
        MoveDirection::Left => -step,
        MoveDirection::Right => step,
    };

    let current = body_transform(&scene.testbed.world, active)?;
    let moved = BodyTransform {
        position: current.position + Vec2::new(dx, 0.0),
        angle: current.angle,
    };
    set_body_transform(&mut scene.testbed.world, active, &moved)?;
    Ok(true)
}

/// Turn the active piece a quarter turn counter-clockwise about its origin.
/// Returns false when there is no active piece.
pub fn rotate_active_piece(scene: &mut TetrisSceneData) -> TestbedResult<bool> {
    let Some(active) = scene.active else {
        log::warn!("[tetris::rotate_active_piece] No active piece");
        return Ok(false);
    };

    let current = body_transform(&scene.testbed.world, active)?;
    let rotated = BodyTransform {
        position: current.position,
        angle: current.angle + FRAC_PI_2,
    };
    set_body_transform(&mut scene.testbed.world, active, &rotated)?;
    Ok(true)
}

// ============================================================================
// INPUT
// ============================================================================

/// Route a key press to the host or the scene.
/// Returns the action the key was bound to, if any.
pub fn handle_key(
    scene: &mut TetrisSceneData,
    settings: &mut Settings,
    bindings: &KeyBindings,
    key: KeyCode,
) -> TestbedResult<Option<InputAction>> {
    let Some(action) = map_key(bindings, key) else {
        return Ok(None);
    };

    if handle_testbed_action(settings, action) {
        return Ok(Some(action));
    }

    match action {
        InputAction::MoveLeft => {
            move_active_piece(scene, MoveDirection::Left)?;
        }
        InputAction::MoveRight => {
            move_active_piece(scene, MoveDirection::Right)?;
        }
        InputAction::Rotate => {
            rotate_active_piece(scene)?;
        }
        InputAction::Spawn => {
            spawn_piece(scene)?;
        }
        InputAction::Restart => restart_tetris_scene(scene, settings)?,
        InputAction::TogglePause | InputAction::SingleStep => {}
    }
    Ok(Some(action))
}

// ============================================================================
// STEPPING
// ============================================================================

/// Report the tree, step the host, then drop the next piece if the active
/// one has come to rest
pub fn step_tetris_scene(
    scene: &mut TetrisSceneData,
    settings: &mut Settings,
) -> TestbedResult<StepStats> {
    begin_frame(&mut scene.testbed.draw);

    sync_query_tree(&mut scene.testbed.world);
    let tree = broad_phase_tree_stats(&scene.testbed.world);
    let minimum = stats_minimum_height(&tree);
    draw_string(
        &mut scene.testbed.draw,
        TEXT_MARGIN_X,
        format!("dynamic tree height = {}, min = {}", tree.height, minimum),
    );
    new_line(&mut scene.testbed.draw);

    let steps_before = scene.testbed.step_count;
    step_testbed(&mut scene.testbed, settings);
    new_line(&mut scene.testbed.draw);

    if scene.testbed.step_count > steps_before {
        update_auto_spawn(scene)?;
    }

    scene.last_stats = StepStats {
        step: scene.testbed.step_count,
        tree_height: tree.height,
        minimum_height: minimum,
        proxy_count: tree.proxy_count,
        body_count: body_count(&scene.testbed.world),
        contact_count: contact_count(&scene.testbed.world),
        piece_count: scene.pieces.len(),
    };
    Ok(scene.last_stats)
}

fn update_auto_spawn(scene: &mut TetrisSceneData) -> TestbedResult<()> {
    if !scene.config.auto_spawn || scene.pieces.len() >= scene.config.max_pieces {
        return Ok(());
    }

    let Some(active) = scene.active else {
        spawn_piece(scene)?;
        return Ok(());
    };

    if body_is_settled(&scene.testbed.world, active, scene.config.settle_speed)? {
        scene.settle_counter += 1;
    } else {
        scene.settle_counter = 0;
    }

    if scene.settle_counter >= scene.config.settle_steps {
        log::debug!(
            "[tetris::update_auto_spawn] Active piece settled for {} steps",
            scene.settle_counter
        );
        spawn_piece(scene)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{body_fixture_count, body_fixtures, fixture_count};

    fn small_config() -> TetrisConfig {
        TetrisConfig {
            ground_columns: 20,
            ground_rows: 2,
            piece: "I".to_string(),
            auto_spawn: false,
            ..Default::default()
        }
    }

    fn build_scene(config: &TetrisConfig) -> (TetrisSceneData, Settings) {
        let settings = Settings::default();
        let scene = create_tetris_scene(config, &settings).expect("valid scene config");
        (scene, settings)
    }

    #[test]
    fn test_floor_and_first_piece() {
        let (scene, _) = build_scene(&small_config());

        // 40 floor tiles + 4 blocks
        assert_eq!(scene.fixture_count, 44);
        assert_eq!(fixture_count(&scene.testbed.world), 44);
        assert_eq!(body_count(&scene.testbed.world), 2);
        assert_eq!(scene.pieces.len(), 1);
        assert_eq!(scene.active, scene.pieces.first().copied());

        let ground = body_transform(&scene.testbed.world, scene.ground).expect("ground");
        assert_eq!(ground.position, Vec2::new(0.0, -0.5));

        let piece = scene.active.expect("first piece");
        let at = body_transform(&scene.testbed.world, piece).expect("piece");
        assert_eq!(at.position, Vec2::new(0.0, 40.0));
        assert_eq!(body_fixture_count(&scene.testbed.world, piece).expect("piece"), 4);
    }

    #[test]
    fn test_floor_and_piece_geometry() {
        let (scene, _) = build_scene(&small_config());
        let world = &scene.testbed.world;

        // 20 columns of half extent 0.5: rows start at x = -10 and step by 1
        let tiles = body_fixtures(world, scene.ground).expect("ground");
        assert_eq!(tiles.len(), 40);
        let expected_tile = |row: usize, col: usize| {
            Vec2::new(-10.0 + col as f32, -(row as f32))
        };
        for (row, col) in [(0, 0), (0, 1), (0, 19), (1, 0), (1, 19)] {
            let tile = &tiles[row * 20 + col];
            assert!(
                (tile.shape.center - expected_tile(row, col)).length() < 1e-5,
                "tile ({}, {}) at {:?}",
                row,
                col,
                tile.shape.center
            );
        }
        for tile in &tiles {
            assert_eq!(tile.shape.half_width, 0.5);
            assert_eq!(tile.shape.half_height, 0.5);
            assert!((tile.friction - GROUND_FRICTION).abs() < 1e-6);
            assert_eq!(tile.density, 0.0);
        }

        let piece = scene.active.expect("first piece");
        let blocks = body_fixtures(world, piece).expect("piece");
        let centers: Vec<Vec2> = blocks.iter().map(|b| b.shape.center).collect();
        let expected = [
            Vec2::new(-2.0, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ];
        for (center, want) in centers.iter().zip(expected) {
            assert!((*center - want).length() < 1e-5, "block at {:?}", center);
        }
        for block in &blocks {
            assert!((block.density - 5.0).abs() < 1e-6);
            assert!((block.friction - 0.5).abs() < 1e-6);
            assert!((block.restitution - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn test_block_offsets_scale_with_block_size() {
        let config = TetrisConfig {
            block_size: 0.25,
            ..small_config()
        };
        let (scene, _) = build_scene(&config);
        let piece = scene.active.expect("first piece");
        let blocks = body_fixtures(&scene.testbed.world, piece).expect("piece");

        // I piece cells -2..=1, two half extents apart
        for (block, x) in blocks.iter().zip([-1.0, -0.5, 0.0, 0.5]) {
            assert!((block.shape.center - Vec2::new(x, 0.0)).length() < 1e-5);
            assert_eq!(block.shape.half_width, 0.25);
        }
    }

    #[test]
    fn test_default_floor_size() {
        let (scene, _) = build_scene(&TetrisConfig {
            auto_spawn: false,
            ..Default::default()
        });
        assert_eq!(scene.fixture_count, 2004);
    }

    #[test]
    fn test_unknown_piece_rejected() {
        let config = TetrisConfig {
            piece: "X".to_string(),
            ..small_config()
        };
        assert!(matches!(
            create_tetris_scene(&config, &Settings::default()),
            Err(TestbedError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_move_and_rotate_active_piece() {
        let (mut scene, _) = build_scene(&small_config());
        let piece = scene.active.expect("first piece");

        assert!(move_active_piece(&mut scene, MoveDirection::Left).expect("move"));
        assert!(move_active_piece(&mut scene, MoveDirection::Left).expect("move"));
        assert!(move_active_piece(&mut scene, MoveDirection::Right).expect("move"));
        let at = body_transform(&scene.testbed.world, piece).expect("piece");
        assert!((at.position.x + 1.0).abs() < 1e-5);

        assert!(rotate_active_piece(&mut scene).expect("rotate"));
        let at = body_transform(&scene.testbed.world, piece).expect("piece");
        assert!((at.angle - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_no_active_piece_is_ignored() {
        let (mut scene, _) = build_scene(&small_config());
        scene.active = None;
        assert!(!move_active_piece(&mut scene, MoveDirection::Right).expect("ignored"));
        assert!(!rotate_active_piece(&mut scene).expect("ignored"));
    }

    #[test]
    fn test_spawn_respects_piece_limit() {
        let config = TetrisConfig {
            max_pieces: 3,
            ..small_config()
        };
        let (mut scene, _) = build_scene(&config);

        assert!(spawn_piece(&mut scene).expect("spawn").is_some());
        assert!(spawn_piece(&mut scene).expect("spawn").is_some());
        assert!(spawn_piece(&mut scene).expect("spawn").is_none());
        assert_eq!(scene.pieces.len(), 3);
        assert_eq!(scene.active, scene.pieces.last().copied());
    }

    #[test]
    fn test_keys_drive_scene() {
        let (mut scene, mut settings) = build_scene(&small_config());
        let bindings = KeyBindings::default();
        let piece = scene.active.expect("first piece");

        let action = handle_key(&mut scene, &mut settings, &bindings, KeyCode::ArrowRight)
            .expect("handled");
        assert_eq!(action, Some(InputAction::MoveRight));
        let at = body_transform(&scene.testbed.world, piece).expect("piece");
        assert!((at.position.x - 1.0).abs() < 1e-5);

        handle_key(&mut scene, &mut settings, &bindings, KeyCode::Space).expect("handled");
        assert_eq!(scene.pieces.len(), 2);

        handle_key(&mut scene, &mut settings, &bindings, KeyCode::KeyP).expect("handled");
        assert!(settings.pause);

        let unbound =
            handle_key(&mut scene, &mut settings, &bindings, KeyCode::KeyZ).expect("handled");
        assert_eq!(unbound, None);
    }

    #[test]
    fn test_restart_rebuilds_scene() {
        let (mut scene, mut settings) = build_scene(&small_config());
        let bindings = KeyBindings::default();
        spawn_piece(&mut scene).expect("spawn");
        step_tetris_scene(&mut scene, &mut settings).expect("step");

        handle_key(&mut scene, &mut settings, &bindings, KeyCode::KeyR).expect("handled");
        assert_eq!(scene.pieces.len(), 1);
        assert_eq!(scene.testbed.step_count, 0);
        assert_eq!(fixture_count(&scene.testbed.world), 44);
    }

    #[test]
    fn test_step_reports_tree() {
        let (mut scene, mut settings) = build_scene(&small_config());
        let stats = step_tetris_scene(&mut scene, &mut settings).expect("step");

        assert_eq!(stats.step, 1);
        assert_eq!(stats.proxy_count, 44);
        assert_eq!(stats.minimum_height, 3);
        assert!(stats.tree_height >= stats.minimum_height);
        assert_eq!(stats.piece_count, 1);
        assert_eq!(scene.last_stats, stats);

        let first = &scene.testbed.draw.lines[0];
        assert_eq!(
            first.text,
            format!(
                "dynamic tree height = {}, min = {}",
                stats.tree_height, stats.minimum_height
            )
        );
    }

    #[test]
    fn test_paused_step_does_not_advance() {
        let (mut scene, mut settings) = build_scene(&small_config());
        settings.pause = true;
        let stats = step_tetris_scene(&mut scene, &mut settings).expect("step");
        assert_eq!(stats.step, 0);

        let piece = scene.active.expect("first piece");
        let at = body_transform(&scene.testbed.world, piece).expect("piece");
        assert_eq!(at.position, Vec2::new(0.0, 40.0));
    }

    #[test]
    fn test_auto_spawn_after_settling() {
        let config = TetrisConfig {
            auto_spawn: true,
            spawn_position: [0.0, 1.0],
            settle_steps: 5,
            // Anything counts as settled, so the next piece drops after 5 steps
            settle_speed: f32::MAX,
            max_pieces: 2,
            ..small_config()
        };
        let (mut scene, mut settings) = build_scene(&config);

        for _ in 0..4 {
            step_tetris_scene(&mut scene, &mut settings).expect("step");
        }
        assert_eq!(scene.pieces.len(), 1);

        step_tetris_scene(&mut scene, &mut settings).expect("step");
        assert_eq!(scene.pieces.len(), 2);

        // Capped: nothing more drops
        for _ in 0..10 {
            step_tetris_scene(&mut scene, &mut settings).expect("step");
        }
        assert_eq!(scene.pieces.len(), 2);
    }
}
