//! Physics world data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in physics_world_operations.rs
//!
//! The simulation itself is owned by rapier2d; these types describe what the
//! testbed asks of it (bodies, box fixtures, transforms) and hold its state.

use glam::Vec2;
use rapier2d::parry::partitioning::{Qbvh, QbvhUpdateWorkspace};
use rapier2d::prelude::*;

/// How the engine treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves (floor)
    Static,
    /// Fully simulated (falling pieces)
    Dynamic,
}

/// Body creation parameters
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub kind: BodyKind,
    /// Body origin in world space
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            kind: BodyKind::Static,
            position: Vec2::ZERO,
            angle: 0.0,
        }
    }
}

/// Oriented box in body-local space
#[derive(Debug, Clone, Copy)]
pub struct BoxShape {
    pub half_width: f32,
    pub half_height: f32,
    /// Box center relative to the body origin
    pub center: Vec2,
    /// Box rotation relative to the body, radians
    pub angle: f32,
}

/// Fixture creation parameters: a shape plus material
#[derive(Debug, Clone, Copy)]
pub struct FixtureDesc {
    pub shape: BoxShape,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

/// Opaque handle to a body owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub(crate) RigidBodyHandle);

/// Opaque handle to a fixture owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureId(pub(crate) ColliderHandle);

/// World-space placement of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub position: Vec2,
    pub angle: f32,
}

/// Complete engine state for one world
pub struct PhysicsWorldData {
    pub(crate) gravity: Vector<Real>,
    pub(crate) integration_params: IntegrationParameters,
    pub(crate) pipeline: PhysicsPipeline,
    pub(crate) island_manager: IslandManager,
    pub(crate) broad_phase: DefaultBroadPhase,
    pub(crate) narrow_phase: NarrowPhase,
    pub(crate) rigid_body_set: RigidBodySet,
    pub(crate) collider_set: ColliderSet,
    pub(crate) impulse_joint_set: ImpulseJointSet,
    pub(crate) multibody_joint_set: MultibodyJointSet,
    pub(crate) ccd_solver: CCDSolver,
    /// Broad-phase tree over every collider AABB (4 children per node)
    pub(crate) proxy_tree: Qbvh<ColliderHandle>,
    pub(crate) proxy_tree_workspace: QbvhUpdateWorkspace,
    /// False until the first sync bulk-builds the tree; afterwards proxies
    /// are inserted, moved and removed incrementally
    pub(crate) proxy_tree_built: bool,
    /// Proxies were queued for insertion, refit or removal since the last sync
    pub(crate) proxy_tree_dirty: bool,
}
