//! Skyflock library
//!
//! Octree-accelerated 3D boids flocking. The simulation core lives in
//! [`physics`]; [`plugins`] drive it from a bevy app.

pub mod cli;
pub mod config;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;

/// Crate version with the build date appended
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")");
