//! Test utilities for plugin testing

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use core::time::Duration;

/// Fixed frame length used by [`create_test_app`]
pub const TEST_FRAME: Duration = Duration::from_millis(16);

/// Creates a minimal test app with the core Bevy plugins the flock plugins need.
///
/// Time advances by [`TEST_FRAME`] on every `update()` so ticks are reproducible.
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_FRAME));

    app
}
