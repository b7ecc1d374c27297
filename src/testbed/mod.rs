/// Testbed Module - the host scenes plug into
///
/// - testbed_data.rs: settings and host state
/// - testbed_operations.rs: per-frame stepping and host actions

pub mod testbed_data;
pub mod testbed_operations;

pub use testbed_data::{Settings, TestbedData};
pub use testbed_operations::{
    create_testbed, frame_time_step, handle_testbed_action, step_testbed,
};
