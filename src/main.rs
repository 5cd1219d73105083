use bevy::app::ScheduleRunnerPlugin;
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use core::time::Duration;
use skyflock::cli::{Args, load_and_apply_config};
use skyflock::plugins::{FlockDiagnosticsPlugin, FlockPlugin};
use skyflock::resources::TickLimit;
use skyflock::states::AppState;

const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

fn main() -> AppExit {
    let args = Args::parse();

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    if args.print_config {
        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                println!("{toml_string}");
                return AppExit::Success;
            }
            Err(e) => {
                eprintln!("Error: failed to serialize configuration: {e}");
                return AppExit::error();
            }
        }
    }

    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(FRAME_INTERVAL)),
        LogPlugin {
            level: if args.verbose {
                Level::DEBUG
            } else {
                Level::INFO
            },
            ..default()
        },
        LogDiagnosticsPlugin::default(),
    ));

    app.insert_resource(config);
    app.insert_resource(TickLimit(args.ticks));
    app.add_plugins((FlockPlugin, FlockDiagnosticsPlugin::default()));

    if args.paused {
        app.insert_resource(NextState::Pending(AppState::Paused));
    }

    app.run()
}
