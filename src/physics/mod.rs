//! Physics Module - DOP facade over the rapier2d engine
//!
//! - physics_world_data.rs: engine state and creation descriptors
//! - physics_world_operations.rs: functions that drive the engine
//! - tree_stats.rs: read-only broad-phase tree statistics

pub mod physics_world_data;
pub mod physics_world_operations;
pub mod tree_stats;

pub use physics_world_data::{
    BodyDesc, BodyId, BodyKind, BodyTransform, BoxShape, FixtureDesc, FixtureId,
    PhysicsWorldData,
};

pub use physics_world_operations::{
    // Initialization
    create_physics_world,

    // Bodies and fixtures
    create_body,
    create_fixture,
    destroy_body,
    contains_body,
    body_fixture_count,
    body_fixtures,
    body_mass,

    // Transforms
    body_transform,
    set_body_transform,
    body_is_settled,

    // Stepping
    step_physics_world,
    sync_query_tree,

    // Counters
    body_count,
    fixture_count,
    contact_count,
    broad_phase_tree_stats,
};

pub use tree_stats::{minimum_height, stats_minimum_height, TreeStats, ENGINE_TREE_ARITY};
