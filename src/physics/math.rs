use crate::resources::SharedRng;
use rand::Rng;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and forces
pub type Vector = bevy::math::DVec3;

/// Squared magnitude below which a vector is treated as zero
pub const ZERO_LENGTH_SQUARED: Scalar = 1e-12;

/// Golden angle in radians, `π (3 - √5)`
pub const GOLDEN_ANGLE: Scalar = 2.399_963_229_728_653;

/// Reynolds steering: desired velocity at `max_speed` along `direction`,
/// minus the current velocity, limited to `max_force`.
///
/// A zero-length direction yields a zero steering vector.
#[inline]
pub fn steer_towards(
    direction: Vector,
    velocity: Vector,
    max_speed: Scalar,
    max_force: Scalar,
) -> Vector {
    if direction.length_squared() <= ZERO_LENGTH_SQUARED {
        return Vector::ZERO;
    }

    let desired = direction.normalize() * max_speed;
    limit_length(desired - velocity, max_force)
}

/// Scales `vector` down so its magnitude does not exceed `max_length`.
#[inline]
pub fn limit_length(vector: Vector, max_length: Scalar) -> Vector {
    if max_length <= 0.0 {
        return Vector::ZERO;
    }

    let length_squared = vector.length_squared();
    if length_squared <= max_length * max_length {
        return vector;
    }

    vector * (max_length / length_squared.sqrt())
}

/// Rescales `velocity` so its magnitude lies within `[min_speed, max_speed]`.
///
/// Near-zero velocities are returned unchanged since they carry no direction.
#[inline]
pub fn clamp_speed(velocity: Vector, min_speed: Scalar, max_speed: Scalar) -> Vector {
    let speed_squared = velocity.length_squared();
    if speed_squared <= ZERO_LENGTH_SQUARED {
        return velocity;
    }

    let speed = speed_squared.sqrt();
    if speed > max_speed {
        velocity * (max_speed / speed)
    } else if speed < min_speed {
        velocity * (min_speed / speed)
    } else {
        velocity
    }
}

/// Point `index` of `count` on a Fermat (golden-angle) spiral disc of `radius`,
/// lying in the XZ plane with a small vertical wobble.
pub fn golden_spiral_offset(index: usize, count: usize, radius: Scalar) -> Vector {
    if count == 0 {
        return Vector::ZERO;
    }

    let t = (index as Scalar + 0.5) / count as Scalar;
    let r = radius * libm::sqrt(t);
    let theta = index as Scalar * GOLDEN_ANGLE;

    Vector::new(
        r * libm::cos(theta),
        radius * 0.25 * libm::sin(theta * 0.5) * (1.0 - t),
        r * libm::sin(theta),
    )
}

/// Point `index` of `count` spread evenly over a unit sphere (golden-angle
/// Fibonacci lattice).
pub fn fibonacci_sphere_point(index: usize, count: usize) -> Vector {
    if count <= 1 {
        return Vector::ZERO;
    }

    let y = 1.0 - 2.0 * (index as Scalar + 0.5) / count as Scalar;
    let ring_radius = libm::sqrt((1.0 - y * y).max(0.0));
    let theta = index as Scalar * GOLDEN_ANGLE;

    Vector::new(
        ring_radius * libm::cos(theta),
        y,
        ring_radius * libm::sin(theta),
    )
}

pub fn random_unit_vector(rng: &mut SharedRng) -> Vector {
    let theta = rng.random_range(0.0..=2.0 * std::f64::consts::PI);
    let phi = libm::acos(rng.random_range(-1.0..=1.0));

    Vector::new(
        libm::sin(phi) * libm::cos(theta),
        libm::sin(phi) * libm::sin(theta),
        libm::cos(phi),
    )
}
