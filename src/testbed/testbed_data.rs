//! Testbed data structures - Pure DOP
//!
//! The host every scene runs inside: simulation settings, the physics world,
//! the debug text buffer and the step counter.

use crate::constants::testbed::{DEFAULT_GRAVITY, DEFAULT_HZ, DEFAULT_VELOCITY_ITERATIONS};
use crate::debug_draw::DebugDrawData;
use crate::physics::PhysicsWorldData;
use serde::{Deserialize, Serialize};

/// Simulation and drawing switches, shared by the host and the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Steps per simulated second
    pub hz: f32,
    /// Constraint solver iterations per step
    pub velocity_iterations: usize,
    pub gravity: [f32; 2],
    /// Hold the simulation still
    pub pause: bool,
    /// Run exactly one step while paused
    pub single_step: bool,
    /// Draw body/contact/proxy counters each step
    pub draw_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hz: DEFAULT_HZ,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            gravity: DEFAULT_GRAVITY,
            pause: false,
            single_step: false,
            draw_stats: false,
        }
    }
}

/// Host state for one running scene
pub struct TestbedData {
    pub world: PhysicsWorldData,
    pub draw: DebugDrawData,
    /// Steps actually simulated (paused frames don't count)
    pub step_count: u64,
}
