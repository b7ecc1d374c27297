//! Testbed operations
//!
//! Frame stepping shared by every scene: timing, pause and single-step
//! handling, and the optional counters overlay.

use super::testbed_data::{Settings, TestbedData};
use crate::constants::text::TEXT_MARGIN_X;
use crate::debug_draw::{draw_line, DebugDrawData};
use crate::error::TestbedResult;
use crate::input::InputAction;
use crate::physics::{
    body_count, contact_count, create_physics_world, fixture_count, step_physics_world,
};
use glam::Vec2;

/// Create a testbed with an empty world
pub fn create_testbed(settings: &Settings) -> TestbedResult<TestbedData> {
    let world = create_physics_world(
        Vec2::from(settings.gravity),
        settings.hz,
        settings.velocity_iterations,
    )?;

    Ok(TestbedData {
        world,
        draw: DebugDrawData::default(),
        step_count: 0,
    })
}

/// Time step for the next frame: zero while paused unless single-stepping
pub fn frame_time_step(settings: &Settings) -> f32 {
    if settings.pause && !settings.single_step {
        0.0
    } else if settings.hz > 0.0 {
        1.0 / settings.hz
    } else {
        0.0
    }
}

/// Advance the host by one frame and draw its overlay
pub fn step_testbed(testbed: &mut TestbedData, settings: &mut Settings) {
    let dt = frame_time_step(settings);

    if settings.pause {
        if settings.single_step {
            settings.single_step = false;
        } else {
            draw_line(&mut testbed.draw, TEXT_MARGIN_X, "****PAUSED****");
        }
    }

    if dt > 0.0 {
        step_physics_world(&mut testbed.world, dt);
        testbed.step_count += 1;
    }

    if settings.draw_stats {
        draw_line(
            &mut testbed.draw,
            TEXT_MARGIN_X,
            format!(
                "bodies/contacts = {}/{}",
                body_count(&testbed.world),
                contact_count(&testbed.world)
            ),
        );
        draw_line(
            &mut testbed.draw,
            TEXT_MARGIN_X,
            format!("proxies = {}", fixture_count(&testbed.world)),
        );
    }
}

/// Apply host-level actions. Returns false for actions the scene must handle.
pub fn handle_testbed_action(settings: &mut Settings, action: InputAction) -> bool {
    match action {
        InputAction::TogglePause => {
            settings.pause = !settings.pause;
            log::info!("[testbed::handle_testbed_action] pause = {}", settings.pause);
            true
        }
        InputAction::SingleStep => {
            settings.pause = true;
            settings.single_step = true;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{create_body, create_fixture, BodyDesc, BodyKind, BoxShape, FixtureDesc};

    fn testbed_with_falling_box(settings: &Settings) -> TestbedData {
        let mut testbed = create_testbed(settings).expect("default settings are valid");
        let body = create_body(
            &mut testbed.world,
            &BodyDesc {
                kind: BodyKind::Dynamic,
                position: Vec2::new(0.0, 10.0),
                angle: 0.0,
            },
        );
        create_fixture(
            &mut testbed.world,
            body,
            &FixtureDesc {
                shape: BoxShape {
                    half_width: 0.5,
                    half_height: 0.5,
                    center: Vec2::ZERO,
                    angle: 0.0,
                },
                density: 1.0,
                friction: 0.5,
                restitution: 0.0,
            },
        )
        .expect("fixture");
        testbed
    }

    #[test]
    fn test_frame_time_step() {
        let mut settings = Settings::default();
        assert!((frame_time_step(&settings) - 1.0 / 60.0).abs() < 1e-6);

        settings.pause = true;
        assert_eq!(frame_time_step(&settings), 0.0);

        settings.single_step = true;
        assert!(frame_time_step(&settings) > 0.0);
    }

    #[test]
    fn test_step_counts_only_simulated_frames() {
        let mut settings = Settings::default();
        let mut testbed = testbed_with_falling_box(&settings);

        step_testbed(&mut testbed, &mut settings);
        step_testbed(&mut testbed, &mut settings);
        assert_eq!(testbed.step_count, 2);

        settings.pause = true;
        step_testbed(&mut testbed, &mut settings);
        assert_eq!(testbed.step_count, 2);
        assert!(testbed
            .draw
            .lines
            .iter()
            .any(|line| line.text == "****PAUSED****"));
    }

    #[test]
    fn test_single_step_runs_once() {
        let mut settings = Settings::default();
        let mut testbed = testbed_with_falling_box(&settings);

        assert!(handle_testbed_action(&mut settings, InputAction::SingleStep));
        step_testbed(&mut testbed, &mut settings);
        step_testbed(&mut testbed, &mut settings);

        assert_eq!(testbed.step_count, 1);
        assert!(settings.pause);
        assert!(!settings.single_step);
    }

    #[test]
    fn test_draw_stats_overlay() {
        let mut settings = Settings {
            draw_stats: true,
            ..Default::default()
        };
        let mut testbed = testbed_with_falling_box(&settings);
        step_testbed(&mut testbed, &mut settings);

        let texts: Vec<&str> = testbed.draw.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["bodies/contacts = 1/0", "proxies = 1"]);
    }

    #[test]
    fn test_scene_actions_not_consumed() {
        let mut settings = Settings::default();
        assert!(!handle_testbed_action(&mut settings, InputAction::Spawn));
        assert!(handle_testbed_action(&mut settings, InputAction::TogglePause));
        assert!(settings.pause);
        assert!(handle_testbed_action(&mut settings, InputAction::TogglePause));
        assert!(!settings.pause);
    }
}
