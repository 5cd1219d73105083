//! Flocking core: spatial index, agents and the simulation manager.
//!
//! Nothing in here depends on the ECS; the bevy plugins in
//! [`crate::plugins`] drive a [`flock::Flock`] resource each frame.

pub mod aabb3d;
pub mod boid;
pub mod flock;
pub mod formation;
pub mod math;
pub mod obstacle;
pub mod octree;
pub mod params;
