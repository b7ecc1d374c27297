//! Physics world operations - DOP functions over PhysicsWorldData
//!
//! Thin layer over rapier2d: build bodies and box fixtures, mutate
//! transforms, step, and read counters. Nothing here simulates anything.
//!
//! The broad-phase tree is a parry `Qbvh` owned by the world. It is built in
//! bulk on the first sync and then kept current incrementally: new fixtures
//! are inserted, moved ones refit, removed ones dropped, then rebalanced.

use super::physics_world_data::{
    BodyDesc, BodyId, BodyKind, BodyTransform, BoxShape, FixtureDesc, FixtureId,
    PhysicsWorldData,
};
use super::tree_stats::{tree_height, TreeStats, ENGINE_TREE_ARITY};
use crate::constants::testbed::PROXY_AABB_MARGIN;
use crate::error::{OptionExt, TestbedError, TestbedResult};
use glam::Vec2;
use rapier2d::parry::bounding_volume::Aabb;
use rapier2d::parry::partitioning::{Qbvh, QbvhUpdateWorkspace};
use rapier2d::prelude::*;
use std::num::NonZeroUsize;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Create an empty world
pub fn create_physics_world(
    gravity: Vec2,
    hz: f32,
    velocity_iterations: usize,
) -> TestbedResult<PhysicsWorldData> {
    if hz.is_nan() || hz <= 0.0 {
        return Err(TestbedError::InvalidConfig {
            field: "hz".to_string(),
            value: hz.to_string(),
            reason: "must be positive".to_string(),
        });
    }
    let iterations = NonZeroUsize::new(velocity_iterations).ok_or_testbed(|| {
        TestbedError::InvalidConfig {
            field: "velocity_iterations".to_string(),
            value: velocity_iterations.to_string(),
            reason: "must be at least 1".to_string(),
        }
    })?;

    let mut integration_params = IntegrationParameters::default();
    integration_params.dt = 1.0 / hz;
    integration_params.num_solver_iterations = iterations;

    log::debug!(
        "[physics::create_physics_world] gravity=({}, {}), hz={}, iterations={}",
        gravity.x,
        gravity.y,
        hz,
        velocity_iterations
    );

    Ok(PhysicsWorldData {
        gravity: vector![gravity.x, gravity.y],
        integration_params,
        pipeline: PhysicsPipeline::new(),
        island_manager: IslandManager::new(),
        broad_phase: DefaultBroadPhase::new(),
        narrow_phase: NarrowPhase::new(),
        rigid_body_set: RigidBodySet::new(),
        collider_set: ColliderSet::new(),
        impulse_joint_set: ImpulseJointSet::new(),
        multibody_joint_set: MultibodyJointSet::new(),
        ccd_solver: CCDSolver::new(),
        proxy_tree: Qbvh::new(),
        proxy_tree_workspace: QbvhUpdateWorkspace::default(),
        proxy_tree_built: false,
        proxy_tree_dirty: false,
    })
}

// ============================================================================
// BODIES AND FIXTURES
// ============================================================================

/// Create a body with no fixtures
pub fn create_body(world: &mut PhysicsWorldData, desc: &BodyDesc) -> BodyId {
    let builder = match desc.kind {
        BodyKind::Static => RigidBodyBuilder::fixed(),
        BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
    };
    let body = builder
        .translation(vector![desc.position.x, desc.position.y])
        .rotation(desc.angle)
        .build();

    BodyId(world.rigid_body_set.insert(body))
}

/// Attach a box fixture to an existing body
pub fn create_fixture(
    world: &mut PhysicsWorldData,
    body: BodyId,
    fixture: &FixtureDesc,
) -> TestbedResult<FixtureId> {
    if !world.rigid_body_set.contains(body.0) {
        return Err(body_not_found(body));
    }

    let shape = &fixture.shape;
    if !is_positive(shape.half_width) || !is_positive(shape.half_height) {
        return Err(TestbedError::InvalidShape {
            reason: format!(
                "box half extents must be positive, got {}x{}",
                shape.half_width, shape.half_height
            ),
        });
    }

    let collider = ColliderBuilder::cuboid(shape.half_width, shape.half_height)
        .translation(vector![shape.center.x, shape.center.y])
        .rotation(shape.angle)
        .density(fixture.density)
        .friction(fixture.friction)
        .restitution(fixture.restitution)
        .build();

    let handle =
        world
            .collider_set
            .insert_with_parent(collider, body.0, &mut world.rigid_body_set);
    if world.proxy_tree_built {
        world.proxy_tree.pre_update_or_insert(handle);
        world.proxy_tree_dirty = true;
    }

    Ok(FixtureId(handle))
}

/// Remove a body together with all of its fixtures
pub fn destroy_body(world: &mut PhysicsWorldData, body: BodyId) -> TestbedResult<()> {
    let attached = world
        .rigid_body_set
        .get(body.0)
        .map(|rb| rb.colliders().to_vec())
        .ok_or_testbed(|| body_not_found(body))?;

    world
        .rigid_body_set
        .remove(
            body.0,
            &mut world.island_manager,
            &mut world.collider_set,
            &mut world.impulse_joint_set,
            &mut world.multibody_joint_set,
            true,
        )
        .ok_or_testbed(|| body_not_found(body))?;

    if world.proxy_tree_built {
        for handle in attached {
            world.proxy_tree.remove(handle);
        }
        world.proxy_tree_dirty = true;
    }
    Ok(())
}

/// Whether the body still exists
pub fn contains_body(world: &PhysicsWorldData, body: BodyId) -> bool {
    world.rigid_body_set.contains(body.0)
}

/// Number of fixtures attached to a body
pub fn body_fixture_count(world: &PhysicsWorldData, body: BodyId) -> TestbedResult<usize> {
    world
        .rigid_body_set
        .get(body.0)
        .map(|rb| rb.colliders().len())
        .ok_or_testbed(|| body_not_found(body))
}

/// Total mass of a body as computed by the engine from fixture densities
pub fn body_mass(world: &PhysicsWorldData, body: BodyId) -> TestbedResult<f32> {
    world
        .rigid_body_set
        .get(body.0)
        .map(|rb| rb.mass())
        .ok_or_testbed(|| body_not_found(body))
}

/// Box fixtures attached to a body, in creation order, read back from the
/// engine (centers and angles in body-local space)
pub fn body_fixtures(world: &PhysicsWorldData, body: BodyId) -> TestbedResult<Vec<FixtureDesc>> {
    let rb = world
        .rigid_body_set
        .get(body.0)
        .ok_or_testbed(|| body_not_found(body))?;

    Ok(rb
        .colliders()
        .iter()
        .filter_map(|&handle| world.collider_set.get(handle))
        .filter_map(|collider| {
            let cuboid = collider.shape().as_cuboid()?;
            let local = collider.position_wrt_parent()?;
            Some(FixtureDesc {
                shape: BoxShape {
                    half_width: cuboid.half_extents.x,
                    half_height: cuboid.half_extents.y,
                    center: Vec2::new(local.translation.vector.x, local.translation.vector.y),
                    angle: local.rotation.angle(),
                },
                density: collider.density(),
                friction: collider.friction(),
                restitution: collider.restitution(),
            })
        })
        .collect())
}

// ============================================================================
// TRANSFORMS
// ============================================================================

/// Read a body's world transform
pub fn body_transform(world: &PhysicsWorldData, body: BodyId) -> TestbedResult<BodyTransform> {
    let rb = world
        .rigid_body_set
        .get(body.0)
        .ok_or_testbed(|| body_not_found(body))?;
    let position = rb.position();

    Ok(BodyTransform {
        position: Vec2::new(position.translation.vector.x, position.translation.vector.y),
        angle: position.rotation.angle(),
    })
}

/// Teleport a body. Velocities are kept and the body is woken up.
pub fn set_body_transform(
    world: &mut PhysicsWorldData,
    body: BodyId,
    transform: &BodyTransform,
) -> TestbedResult<()> {
    let rb = world
        .rigid_body_set
        .get_mut(body.0)
        .ok_or_testbed(|| body_not_found(body))?;

    rb.set_position(
        Isometry::new(
            vector![transform.position.x, transform.position.y],
            transform.angle,
        ),
        true,
    );
    if world.proxy_tree_built {
        for &handle in rb.colliders() {
            world.proxy_tree.pre_update_or_insert(handle);
        }
        world.proxy_tree_dirty = true;
    }
    Ok(())
}

/// Asleep, or moving slower than `speed_threshold` both linearly and
/// angularly
pub fn body_is_settled(
    world: &PhysicsWorldData,
    body: BodyId,
    speed_threshold: f32,
) -> TestbedResult<bool> {
    let rb = world
        .rigid_body_set
        .get(body.0)
        .ok_or_testbed(|| body_not_found(body))?;

    if rb.is_sleeping() {
        return Ok(true);
    }
    Ok(rb.linvel().norm() < speed_threshold && rb.angvel().abs() < speed_threshold)
}

// ============================================================================
// STEPPING
// ============================================================================

/// Advance the world by `dt` seconds. A zero or negative `dt` is a no-op.
pub fn step_physics_world(world: &mut PhysicsWorldData, dt: f32) {
    if !is_positive(dt) {
        return;
    }
    world.integration_params.dt = dt;

    world.pipeline.step(
        &world.gravity,
        &world.integration_params,
        &mut world.island_manager,
        &mut world.broad_phase,
        &mut world.narrow_phase,
        &mut world.rigid_body_set,
        &mut world.collider_set,
        &mut world.impulse_joint_set,
        &mut world.multibody_joint_set,
        &mut world.ccd_solver,
        None,
        &(),
        &(),
    );

    if world.proxy_tree_built {
        for (_, rb) in world.rigid_body_set.iter() {
            if rb.is_dynamic() {
                for &handle in rb.colliders() {
                    world.proxy_tree.pre_update_or_insert(handle);
                }
                world.proxy_tree_dirty = true;
            }
        }
    }
}

/// Bring the broad-phase tree up to date: build it on first use, then apply
/// queued inserts, moves and removals
pub fn sync_query_tree(world: &mut PhysicsWorldData) {
    let bodies = &world.rigid_body_set;
    let colliders = &world.collider_set;

    if !world.proxy_tree_built {
        let proxies: Vec<(ColliderHandle, Aabb)> = colliders
            .iter()
            .map(|(handle, _)| (handle, proxy_aabb(bodies, colliders, handle)))
            .collect();
        log::debug!(
            "[physics::sync_query_tree] Building tree over {} proxies",
            proxies.len()
        );
        world.proxy_tree.clear_and_rebuild(proxies.into_iter(), 0.0);
        world.proxy_tree_built = true;
        world.proxy_tree_dirty = false;
        return;
    }

    if world.proxy_tree_dirty {
        world.proxy_tree.refit(
            PROXY_AABB_MARGIN,
            &mut world.proxy_tree_workspace,
            |handle| proxy_aabb(bodies, colliders, *handle),
        );
        world
            .proxy_tree
            .rebalance(PROXY_AABB_MARGIN, &mut world.proxy_tree_workspace);
        world.proxy_tree_dirty = false;
    }
}

/// World AABB of a collider, taken from its parent's current pose so
/// teleports are seen before the next step
fn proxy_aabb(bodies: &RigidBodySet, colliders: &ColliderSet, handle: ColliderHandle) -> Aabb {
    let Some(collider) = colliders.get(handle) else {
        return Aabb::new_invalid();
    };
    let parent_pose = collider
        .parent()
        .and_then(|parent| bodies.get(parent))
        .zip(collider.position_wrt_parent());

    match parent_pose {
        Some((rb, local)) => collider.shape().compute_aabb(&(rb.position() * local)),
        None => collider.compute_aabb(),
    }
}

// ============================================================================
// COUNTERS
// ============================================================================

pub fn body_count(world: &PhysicsWorldData) -> usize {
    world.rigid_body_set.len()
}

pub fn fixture_count(world: &PhysicsWorldData) -> usize {
    world.collider_set.len()
}

/// Pairs whose shapes actually touch (not merely overlapping bounds)
pub fn contact_count(world: &PhysicsWorldData) -> usize {
    world
        .narrow_phase
        .contact_pairs()
        .filter(|pair| pair.has_any_active_contact)
        .count()
}

/// Shape of the broad-phase tree as of the last sync
pub fn broad_phase_tree_stats(world: &PhysicsWorldData) -> TreeStats {
    let proxy_count = fixture_count(world) as u32;
    let nodes = world.proxy_tree.raw_nodes();

    // The bulk builder puts a placeholder root above the real one; it holds
    // a single child and is not a level of the tree.
    let root = match nodes.first() {
        Some(first) if !first.is_leaf() => {
            let mut valid = first.children.iter().filter(|&&child| child != u32::MAX);
            match (valid.next(), valid.next()) {
                (Some(&only), None) => only as usize,
                _ => 0,
            }
        }
        _ => 0,
    };

    let height = if proxy_count == 0 {
        0
    } else {
        tree_height(nodes, root, |node| {
            if node.is_leaf() {
                None
            } else {
                Some(
                    node.children
                        .iter()
                        .filter(|&&child| child != u32::MAX)
                        .map(|&child| child as usize)
                        .collect::<Vec<_>>(),
                )
            }
        })
    };

    TreeStats {
        height,
        proxy_count,
        arity: ENGINE_TREE_ARITY,
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn body_not_found(body: BodyId) -> TestbedError {
    TestbedError::BodyNotFound {
        id: format!("{:?}", body.0),
    }
}
