//! Action handlers for flock commands

use crate::physics::params::ParameterError;
use crate::prelude::*;

pub fn handle_toggle_pause_event(
    mut commands_reader: EventReader<FlockCommand>,
    current_state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        if !matches!(command, FlockCommand::TogglePause) {
            continue;
        }
        match current_state.get() {
            AppState::Running => next_state.set(AppState::Paused),
            AppState::Paused => next_state.set(AppState::Running),
        }
    }
}

/// Applies parameter, population and obstacle changes. Rejected values are
/// already reported by the flock; the previous state is kept.
pub fn handle_flock_commands(
    mut commands_reader: EventReader<FlockCommand>,
    mut flock: ResMut<Flock>,
) {
    for command in commands_reader.read() {
        let result: Result<(), ParameterError> = match *command {
            FlockCommand::TogglePause => continue,
            FlockCommand::Reset => {
                flock.reset();
                Ok(())
            }
            FlockCommand::SetAgentCount(count) => {
                flock.set_agent_count(count);
                Ok(())
            }
            FlockCommand::SetWeight(behavior, value) => flock.set_weight(behavior, value),
            FlockCommand::SetMaxSpeed(value) => flock.set_max_speed(value),
            FlockCommand::SetPerceptionRadius(value) => flock.set_perception_radius(value),
            FlockCommand::SetVisualScale(value) => flock.set_visual_scale(value),
            FlockCommand::AddObstacle { position, radius } => {
                flock.add_obstacle(position, radius).map(drop)
            }
            FlockCommand::AddObstacleLine {
                start,
                end,
                spacing,
            } => flock.add_obstacle_line(start, end, spacing).map(drop),
            FlockCommand::AddObstacleRing {
                center,
                radius,
                count,
            } => flock.add_obstacle_ring(center, radius, count).map(drop),
            FlockCommand::ClearObstacles => {
                flock.clear_obstacles();
                Ok(())
            }
        };

        if let Err(e) = result {
            debug!("Ignored {:?}: {}", command, e);
        }
    }
}
