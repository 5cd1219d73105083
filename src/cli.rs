//! Command line interface for Skyflock

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::SimulationConfig;
use crate::physics::params::Behavior;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// An override produced an invalid configuration
    InvalidOverride(String),
    /// Configuration could not be written
    ConfigSave(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidOverride(msg) => write!(f, "Invalid override: {msg}"),
            CliError::ConfigSave(msg) => write!(f, "Failed to save configuration: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Skyflock - headless 3D boids flocking simulation
#[derive(Parser, Debug, Default)]
#[command(version = crate::VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of boids to simulate (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub agents: Option<usize>,

    /// Random seed for the initial formation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Exit after this many simulation ticks
    #[arg(short = 't', long, value_name = "COUNT")]
    pub ticks: Option<u64>,

    /// Maximum boid speed (overrides config file)
    #[arg(long, value_name = "SPEED")]
    pub max_speed: Option<f64>,

    /// Widest interaction range; the other ranges keep their ratios
    #[arg(long, value_name = "RADIUS")]
    pub perception: Option<f64>,

    /// Switch off a steering behaviour (repeatable)
    #[arg(long, value_name = "BEHAVIOR", value_enum)]
    pub disable: Vec<Behavior>,

    /// Run the update on a single thread
    #[arg(long)]
    pub single_threaded: bool,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective configuration to FILE
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {}", config_path.display());
        if config_path.exists() {
            SimulationConfig::load(config_path).map_err(|e| CliError::ConfigLoad(e.to_string()))?
        } else {
            SimulationConfig::load_or_default(config_path)
        }
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(agent_count) = args.agents {
        println!("Overriding agent count to: {agent_count}");
        config.flock.agent_count = agent_count;
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.flock.initial_seed = Some(seed);
    }

    if let Some(max_speed) = args.max_speed {
        println!("Overriding max speed to: {max_speed}");
        config.boid.max_speed = max_speed;
    }

    if let Some(perception) = args.perception {
        println!("Overriding perception radius to: {perception}");
        config.boid.ranges = config
            .boid
            .ranges
            .with_perception_radius(perception)
            .map_err(|e| CliError::InvalidOverride(e.to_string()))?;
    }

    for &behavior in &args.disable {
        println!("Disabling {behavior}");
        config
            .boid
            .weights
            .set(behavior, 0.0)
            .map_err(|e| CliError::InvalidOverride(e.to_string()))?;
    }

    if args.single_threaded {
        config.flock.parallel = false;
    }

    config
        .validate()
        .map_err(|e| CliError::InvalidOverride(e.to_string()))?;

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .map_err(|e| CliError::ConfigSave(e.to_string()))?;
        println!("Saved configuration to: {}", path.display());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_config() -> Option<PathBuf> {
        Some(std::env::temp_dir().join("skyflock-cli-test-missing.toml"))
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "skyflock",
            "-n",
            "250",
            "--seed",
            "9",
            "--ticks",
            "100",
            "--max-speed",
            "3.5",
            "--disable",
            "cohesion",
            "--disable",
            "alignment",
            "-v",
        ]);

        assert_eq!(args.agents, Some(250));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.ticks, Some(100));
        assert_eq!(args.max_speed, Some(3.5));
        assert_eq!(args.disable, vec![Behavior::Cohesion, Behavior::Alignment]);
        assert!(args.verbose);
        assert!(!args.paused);
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args {
            config: missing_config(),
            agents: Some(12),
            seed: Some(4),
            max_speed: Some(3.0),
            perception: Some(50.0),
            disable: vec![Behavior::Avoidance],
            single_threaded: true,
            ..Default::default()
        };

        let config = load_and_apply_config(&args).unwrap();
        assert_eq!(config.flock.agent_count, 12);
        assert_eq!(config.flock.initial_seed, Some(4));
        assert_eq!(config.boid.max_speed, 3.0);
        assert!((config.boid.ranges.perception_radius() - 50.0).abs() < 1e-12);
        assert_eq!(config.boid.weights.avoidance, 0.0);
        assert!(!config.flock.parallel);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = Args {
            config: missing_config(),
            max_speed: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            load_and_apply_config(&args),
            Err(CliError::InvalidOverride(_))
        ));

        let args = Args {
            config: missing_config(),
            perception: Some(0.0),
            ..Default::default()
        };
        assert!(load_and_apply_config(&args).is_err());
    }
}
