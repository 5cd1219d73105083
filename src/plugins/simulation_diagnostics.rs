//! Flock diagnostics.
//!
//! Publishes flock statistics through bevy's diagnostic store so they show up
//! in `LogDiagnosticsPlugin` output or any other diagnostics consumer:
//!
//! - mean, minimum and maximum boid speed
//! - mean neighbours considered per boid
//! - octree node count and depth
//!
//! # Usage
//!
//! ```rust,ignore
//! app.add_plugins(FlockDiagnosticsPlugin::default());
//! ```

use crate::physics::flock::Flock;
use crate::states::AppState;
use bevy::diagnostic::{
    DEFAULT_MAX_HISTORY_LENGTH, Diagnostic, DiagnosticPath, Diagnostics, DiagnosticsPlugin,
    RegisterDiagnostic,
};
use bevy::prelude::*;
use core::time::Duration;

#[derive(Resource)]
pub struct FlockDiagnosticsState {
    update_timer: Timer,
}

pub struct FlockDiagnosticsPlugin {
    max_history_length: usize,
    smoothing_factor: f64,
    update_interval: Duration,
}

impl Default for FlockDiagnosticsPlugin {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            smoothing_factor: 0.0,
            update_interval: Duration::from_secs_f64(1_f64 / 60_f64),
        }
    }
}

impl FlockDiagnosticsPlugin {
    pub const MEAN_SPEED: DiagnosticPath = DiagnosticPath::const_new("flock/mean_speed");
    pub const MIN_SPEED: DiagnosticPath = DiagnosticPath::const_new("flock/min_speed");
    pub const MAX_SPEED: DiagnosticPath = DiagnosticPath::const_new("flock/max_speed");
    pub const MEAN_NEIGHBORS: DiagnosticPath = DiagnosticPath::const_new("flock/mean_neighbors");
    pub const OCTREE_NODES: DiagnosticPath = DiagnosticPath::const_new("flock/octree_nodes");
    pub const OCTREE_DEPTH: DiagnosticPath = DiagnosticPath::const_new("flock/octree_depth");

    const DIAGNOSTIC_PATHS: &'static [DiagnosticPath] = &[
        Self::MEAN_SPEED,
        Self::MIN_SPEED,
        Self::MAX_SPEED,
        Self::MEAN_NEIGHBORS,
        Self::OCTREE_NODES,
        Self::OCTREE_DEPTH,
    ];

    pub fn with_update_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    fn register_diagnostics(&self, app: &mut App) {
        for path in Self::DIAGNOSTIC_PATHS {
            app.register_diagnostic(
                Diagnostic::new(path.clone())
                    .with_max_history_length(self.max_history_length)
                    .with_smoothing_factor(self.smoothing_factor),
            );
        }
    }

    fn update_timer_ticks(mut state: ResMut<FlockDiagnosticsState>, time: Res<Time>) {
        state.update_timer.tick(time.delta());
    }

    fn record_flock_stats(
        mut diagnostics: Diagnostics,
        state: Res<FlockDiagnosticsState>,
        flock: Res<Flock>,
    ) {
        if !state.update_timer.finished() {
            return;
        }

        let stats = flock.stats();
        diagnostics.add_measurement(&Self::MEAN_SPEED, || stats.mean_speed);
        diagnostics.add_measurement(&Self::MIN_SPEED, || stats.min_speed);
        diagnostics.add_measurement(&Self::MAX_SPEED, || stats.max_speed);
        diagnostics.add_measurement(&Self::MEAN_NEIGHBORS, || stats.mean_neighbors);
        diagnostics.add_measurement(&Self::OCTREE_NODES, || stats.octree.node_count as f64);
        diagnostics.add_measurement(&Self::OCTREE_DEPTH, || stats.octree.max_depth as f64);
    }
}

impl Plugin for FlockDiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<DiagnosticsPlugin>() {
            app.add_plugins(DiagnosticsPlugin);
        }

        app.insert_resource(FlockDiagnosticsState {
            update_timer: Timer::new(self.update_interval, TimerMode::Repeating),
        });

        self.register_diagnostics(app);

        app.add_systems(
            PostUpdate,
            (Self::update_timer_ticks, Self::record_flock_stats)
                .chain()
                .run_if(in_state(AppState::Running).and(resource_exists::<Flock>)),
        );
    }
}
