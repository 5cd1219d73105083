//! Skyflock prelude module
//!
//! Re-exports the types most plugins and tests reach for.

// External crate re-exports
pub use bevy::prelude::*;
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - States
pub use crate::states::AppState;

// Internal re-exports - Resources
pub use crate::resources::{SharedRng, TickLimit};

// Internal re-exports - Physics
pub use crate::physics::boid::Boid;
pub use crate::physics::flock::{Flock, TickOutcome};
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::params::Behavior;

// Internal re-exports - Events
pub use crate::events::FlockCommand;
