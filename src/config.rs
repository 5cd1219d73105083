use crate::physics::math::Scalar;
use crate::physics::params::{
    BehaviorWeights, InteractionRanges, ParameterError, validate_non_negative, validate_positive,
};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading, validating or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    Serialize(toml::ser::Error),
    Io(std::io::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "failed to load configuration: {e}"),
            ConfigError::Serialize(e) => write!(f, "failed to serialize configuration: {e}"),
            ConfigError::Io(e) => write!(f, "configuration I/O error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Load(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ParameterError> for ConfigError {
    fn from(e: ParameterError) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub flock: FlockConfig,
    pub boid: BoidConfig,
    pub octree: OctreeConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FlockConfig {
    pub agent_count: usize,
    pub world_half_extent: Scalar,
    /// Maximum boids per initial formation cluster
    pub cluster_size: usize,
    /// Blend between a random heading (0.0) and heading at the world centre (1.0)
    pub initial_speed_bias: Scalar,
    /// Ticks with a longer elapsed time are skipped instead of integrated
    pub max_elapsed_ms: u64,
    /// Scale integration by elapsed time relative to a 60 Hz frame
    pub time_scaled: bool,
    pub parallel: bool,
    pub initial_seed: Option<u64>,
    /// Distance from each wall at which the boundary force starts to act
    pub boundary_margin: Scalar,
    /// Boundary force magnitude at the wall itself
    pub boundary_force: Scalar,
    /// Radius of obstacles placed by the line and ring helpers
    pub obstacle_radius: Scalar,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            agent_count: 500,
            world_half_extent: 100.0,
            cluster_size: 50,
            initial_speed_bias: 0.6,
            max_elapsed_ms: 100,
            time_scaled: true,
            parallel: true,
            initial_seed: None,
            boundary_margin: 15.0,
            boundary_force: 0.5,
            obstacle_radius: 5.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BoidConfig {
    pub weights: BehaviorWeights,
    pub ranges: InteractionRanges,
    pub max_speed: Scalar,
    /// Minimum speed as a fraction of `max_speed`
    pub min_speed_ratio: Scalar,
    pub max_steer_force: Scalar,
    /// Cosmetic only
    pub visual_scale: Scalar,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            weights: BehaviorWeights::default(),
            ranges: InteractionRanges::default(),
            max_speed: 2.0,
            min_speed_ratio: 0.5,
            max_steer_force: 0.05,
            visual_scale: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OctreeConfig {
    pub leaf_capacity: usize,
    pub min_node_size: Scalar,
    pub query_margin: Scalar,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            leaf_capacity: crate::physics::octree::DEFAULT_LEAF_CAPACITY,
            min_node_size: crate::physics::octree::DEFAULT_MIN_NODE_SIZE,
            query_margin: crate::physics::octree::DEFAULT_QUERY_MARGIN,
        }
    }
}

impl SimulationConfig {
    /// Location of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "skyflock").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Layer the file at `path` (if present) over the defaults and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path.as_ref()).required(false))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it can't be used
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file {} not found. Using defaults.", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config file {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(path),
            None => {
                info!("No user configuration directory available. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration to a file, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let header = format!(
            "# skyflock configuration, saved {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, header + &content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.boid.weights.validate()?;
        self.boid.ranges.validate()?;

        let positive = [
            ("boid.max_speed", self.boid.max_speed),
            ("boid.max_steer_force", self.boid.max_steer_force),
            ("boid.visual_scale", self.boid.visual_scale),
            ("flock.world_half_extent", self.flock.world_half_extent),
            ("flock.obstacle_radius", self.flock.obstacle_radius),
            ("octree.min_node_size", self.octree.min_node_size),
        ];
        for (name, value) in positive {
            validate_positive(name, value)?;
        }

        if !(0.0..1.0).contains(&self.boid.min_speed_ratio) {
            return Err(ConfigError::Invalid(format!(
                "boid.min_speed_ratio must lie in [0, 1), got {}",
                self.boid.min_speed_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.flock.initial_speed_bias) {
            return Err(ConfigError::Invalid(format!(
                "flock.initial_speed_bias must lie in [0, 1], got {}",
                self.flock.initial_speed_bias
            )));
        }
        if self.flock.cluster_size == 0 {
            return Err(ConfigError::Invalid(
                "flock.cluster_size must be at least 1".to_string(),
            ));
        }
        validate_non_negative("flock.boundary_margin", self.flock.boundary_margin)?;
        validate_non_negative("flock.boundary_force", self.flock.boundary_force)?;
        validate_positive("octree.query_margin", self.octree.query_margin)?;
        if self.octree.leaf_capacity == 0 || self.octree.query_margin < 1.0 {
            return Err(ConfigError::Invalid(
                "octree.leaf_capacity must be positive and octree.query_margin at least 1"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("skyflock-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            [flock]
            agent_count = 42

            [boid.weights]
            separation = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.flock.agent_count, 42);
        assert_eq!(config.boid.weights.separation, 3.0);
        assert_eq!(config.boid.weights.alignment, 1.0);
        assert_eq!(config.octree, OctreeConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("round_trip.toml");
        let mut config = SimulationConfig::default();
        config.flock.agent_count = 1234;
        config.flock.initial_seed = Some(77);
        config.boid.max_speed = 3.5;

        config.save(&path).unwrap();
        let loaded = SimulationConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = SimulationConfig::load_or_default(temp_path("does_not_exist.toml"));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let path = temp_path("invalid.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[boid]\nmax_speed = -1.0\n").unwrap();

        assert!(matches!(
            SimulationConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(
            SimulationConfig::load_or_default(&path),
            SimulationConfig::default()
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_bad_ratios() {
        let mut config = SimulationConfig::default();
        config.boid.min_speed_ratio = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.flock.cluster_size = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.boid.weights.cohesion = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_boundary_values_are_rejected() {
        let path = temp_path("non_finite_boundary.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        for body in [
            "[flock]\nboundary_force = inf\n",
            "[flock]\nboundary_margin = nan\n",
            "[flock]\nboundary_force = -inf\n",
            "[octree]\nquery_margin = inf\n",
        ] {
            std::fs::write(&path, body).unwrap();
            assert!(
                matches!(SimulationConfig::load(&path), Err(ConfigError::Invalid(_))),
                "accepted {body:?}"
            );
            assert_eq!(
                SimulationConfig::load_or_default(&path),
                SimulationConfig::default()
            );
        }
        let _ = std::fs::remove_file(&path);

        let mut config = SimulationConfig::default();
        config.flock.boundary_margin = Scalar::NAN;
        assert!(config.validate().is_err());
    }
}
