//! Centralized event definitions
//!
//! Every change to a running flock arrives as a [`FlockCommand`], so the
//! parameter broadcasts happen between ticks and never while one is in
//! flight.

use crate::physics::math::{Scalar, Vector};
use crate::physics::params::Behavior;
use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum FlockCommand {
    Reset,
    TogglePause,
    SetAgentCount(usize),
    SetWeight(Behavior, Scalar),
    SetMaxSpeed(Scalar),
    SetPerceptionRadius(Scalar),
    SetVisualScale(Scalar),
    AddObstacle {
        position: Vector,
        radius: Scalar,
    },
    AddObstacleLine {
        start: Vector,
        end: Vector,
        spacing: Scalar,
    },
    AddObstacleRing {
        center: Vector,
        radius: Scalar,
        count: usize,
    },
    ClearObstacles,
}
