use crate::physics::math::{Scalar, Vector};
use crate::physics::params::{
    ParameterError, validate_finite_vector, validate_non_negative, validate_positive,
};
use serde::{Deserialize, Serialize};

/// Most obstacles a single line or ring placement may create.
pub const MAX_PLACED_OBSTACLES: usize = 1024;

/// Static spherical repeller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vector,
    pub radius: Scalar,
}

impl Obstacle {
    pub fn new(position: Vector, radius: Scalar) -> Result<Self, ParameterError> {
        let position = validate_finite_vector("obstacle position", position)?;
        let radius = validate_non_negative("obstacle radius", radius)?;
        Ok(Self { position, radius })
    }

    /// Distance from `point` to the obstacle surface, zero when inside it.
    #[inline]
    pub fn surface_distance(&self, point: Vector) -> Scalar {
        (point.distance(self.position) - self.radius).max(0.0)
    }
}

/// Centres spaced every `spacing` units from `start` to `end` inclusive.
///
/// Fails when the line would need more than [`MAX_PLACED_OBSTACLES`] centres.
pub fn line_positions(
    start: Vector,
    end: Vector,
    spacing: Scalar,
) -> Result<Vec<Vector>, ParameterError> {
    let start = validate_finite_vector("obstacle line start", start)?;
    let end = validate_finite_vector("obstacle line end", end)?;
    let spacing = validate_positive("obstacle spacing", spacing)?;

    let length = start.distance(end);
    if length <= Scalar::EPSILON {
        return Ok(vec![start]);
    }

    let steps = libm::floor(length / spacing);
    if !steps.is_finite() || steps >= MAX_PLACED_OBSTACLES as Scalar {
        return Err(ParameterError::TooMany {
            name: "obstacle line",
            requested: steps + 1.0,
            max: MAX_PLACED_OBSTACLES,
        });
    }

    let direction = (end - start) / length;
    Ok((0..=steps as usize)
        .map(|step| start + direction * (step as Scalar * spacing))
        .collect())
}

/// `count` centres evenly spaced on a horizontal circle of `radius` around `center`.
pub fn ring_positions(
    center: Vector,
    radius: Scalar,
    count: usize,
) -> Result<Vec<Vector>, ParameterError> {
    let center = validate_finite_vector("obstacle ring center", center)?;
    let radius = validate_non_negative("obstacle ring radius", radius)?;
    if count > MAX_PLACED_OBSTACLES {
        return Err(ParameterError::TooMany {
            name: "obstacle ring",
            requested: count as Scalar,
            max: MAX_PLACED_OBSTACLES,
        });
    }

    Ok((0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as Scalar / count as Scalar;
            center + Vector::new(radius * libm::cos(angle), 0.0, radius * libm::sin(angle))
        })
        .collect())
}
