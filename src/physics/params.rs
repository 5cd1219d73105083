//! Per-boid tunable parameters and their validation.

use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four weighted steering behaviours.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Separation,
    Alignment,
    Cohesion,
    Avoidance,
}

impl Behavior {
    pub const ALL: [Behavior; 4] = [
        Behavior::Separation,
        Behavior::Alignment,
        Behavior::Cohesion,
        Behavior::Avoidance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Behavior::Separation => "separation",
            Behavior::Alignment => "alignment",
            Behavior::Cohesion => "cohesion",
            Behavior::Avoidance => "avoidance",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invalid value passed to a parameter setter. The previous value is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterError {
    NotFinite { name: &'static str, value: Scalar },
    Negative { name: &'static str, value: Scalar },
    NotPositive { name: &'static str, value: Scalar },
    NotFiniteVector { name: &'static str, value: Vector },
    TooMany { name: &'static str, requested: Scalar, max: usize },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NotFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            ParameterError::Negative { name, value } => {
                write!(f, "{name} must not be negative, got {value}")
            }
            ParameterError::NotPositive { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            ParameterError::NotFiniteVector { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            ParameterError::TooMany {
                name,
                requested,
                max,
            } => write!(f, "{name} asks for {requested} items, at most {max} allowed"),
        }
    }
}

impl std::error::Error for ParameterError {}

pub(crate) fn validate_non_negative(
    name: &'static str,
    value: Scalar,
) -> Result<Scalar, ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { name, value });
    }
    if value < 0.0 {
        return Err(ParameterError::Negative { name, value });
    }
    Ok(value)
}

pub(crate) fn validate_finite_vector(
    name: &'static str,
    value: Vector,
) -> Result<Vector, ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFiniteVector { name, value });
    }
    Ok(value)
}

pub(crate) fn validate_positive(
    name: &'static str,
    value: Scalar,
) -> Result<Scalar, ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ParameterError::NotPositive { name, value });
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorWeights {
    pub separation: Scalar,
    pub alignment: Scalar,
    pub cohesion: Scalar,
    pub avoidance: Scalar,
}

impl Default for BehaviorWeights {
    fn default() -> Self {
        Self {
            separation: 1.5,
            alignment: 1.0,
            cohesion: 1.0,
            avoidance: 2.0,
        }
    }
}

impl BehaviorWeights {
    pub fn get(&self, behavior: Behavior) -> Scalar {
        match behavior {
            Behavior::Separation => self.separation,
            Behavior::Alignment => self.alignment,
            Behavior::Cohesion => self.cohesion,
            Behavior::Avoidance => self.avoidance,
        }
    }

    pub fn set(&mut self, behavior: Behavior, value: Scalar) -> Result<(), ParameterError> {
        let value = validate_non_negative(behavior.name(), value)?;
        let slot = match behavior {
            Behavior::Separation => &mut self.separation,
            Behavior::Alignment => &mut self.alignment,
            Behavior::Cohesion => &mut self.cohesion,
            Behavior::Avoidance => &mut self.avoidance,
        };
        *slot = value;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        for behavior in Behavior::ALL {
            validate_non_negative(behavior.name(), self.get(behavior))?;
        }
        Ok(())
    }
}

/// Radii within which neighbours contribute to each flocking rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionRanges {
    pub separation: Scalar,
    pub alignment: Scalar,
    pub cohesion: Scalar,
}

impl Default for InteractionRanges {
    fn default() -> Self {
        Self {
            separation: 10.0,
            alignment: 20.0,
            cohesion: 25.0,
        }
    }
}

impl InteractionRanges {
    /// The widest range, i.e. how far a boid needs to look for neighbours.
    pub fn perception_radius(&self) -> Scalar {
        self.separation.max(self.alignment).max(self.cohesion)
    }

    /// Rescales all ranges so the widest equals `radius`, keeping their ratios.
    pub fn with_perception_radius(&self, radius: Scalar) -> Result<Self, ParameterError> {
        let radius = validate_positive("perception radius", radius)?;
        let factor = radius / self.perception_radius();

        Ok(Self {
            separation: self.separation * factor,
            alignment: self.alignment * factor,
            cohesion: self.cohesion * factor,
        })
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_positive("separation range", self.separation)?;
        validate_positive("alignment range", self.alignment)?;
        validate_positive("cohesion range", self.cohesion)?;
        Ok(())
    }
}
