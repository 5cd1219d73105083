//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the [`Flock`] resource and drives it once per frame. Changes to the
//! flock arrive as [`FlockCommand`] events and are applied before the tick so
//! they never overlap one.

use crate::prelude::*;
use bevy::state::app::StatesPlugin;

mod actions;
mod physics;

pub use actions::{handle_flock_commands, handle_toggle_pause_event};
pub use physics::{exit_after_tick_limit, tick_flock};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlockSet {
    Commands,
    Tick,
}

pub struct FlockPlugin;

impl Plugin for FlockPlugin {
    fn build(&self, app: &mut App) {
        let config = match app.world().get_resource::<SimulationConfig>() {
            Some(config) => config.clone(),
            None => SimulationConfig::load_from_user_config(),
        };

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                info!("=== Current Configuration (TOML) ===\n{}", toml_string);
                info!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        if !app.is_plugin_added::<StatesPlugin>() {
            app.add_plugins(StatesPlugin);
        }

        app.insert_resource(Flock::new(&config));
        app.insert_resource(config);
        app.init_resource::<TickLimit>();
        app.init_state::<AppState>();
        app.add_event::<FlockCommand>();

        app.configure_sets(Update, (FlockSet::Commands, FlockSet::Tick).chain());

        app.add_systems(
            Update,
            (handle_toggle_pause_event, handle_flock_commands).in_set(FlockSet::Commands),
        );
        app.add_systems(
            Update,
            (
                tick_flock.run_if(in_state(AppState::Running)),
                exit_after_tick_limit,
            )
                .chain()
                .in_set(FlockSet::Tick),
        );
    }
}
