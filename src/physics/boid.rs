//! A single flocking agent.
//!
//! Each tick a boid combines four Reynolds steering contributions
//! (separation, alignment, cohesion and obstacle avoidance) with a boundary
//! containment force, then integrates velocity and position with explicit
//! Euler. Neighbours are read from the previous tick's snapshot, so boids can
//! be updated in any order or in parallel.

use crate::config::BoidConfig;
use crate::physics::math::{
    Scalar, Vector, ZERO_LENGTH_SQUARED, clamp_speed, fibonacci_sphere_point, limit_length,
    steer_towards,
};
use crate::physics::obstacle::Obstacle;
use crate::physics::params::{
    Behavior, BehaviorWeights, InteractionRanges, ParameterError, validate_non_negative,
    validate_positive,
};

/// Obstacles are noticed within this multiple of the cohesion range.
pub const AVOIDANCE_RANGE_MULTIPLIER: Scalar = 2.0;

/// Cohesion weight fades out linearly inside this fraction of the separation
/// range, so cohesion does not pull against separation at contact distance.
pub const COHESION_CONTACT_RATIO: Scalar = 0.5;

/// A neighbour closer than this fraction of the separation range triggers an
/// emergency separation response.
pub const EMERGENCY_SEPARATION_RATIO: Scalar = 0.25;

/// Steering cap multiplier while an emergency separation is in progress.
pub const EMERGENCY_FORCE_MULTIPLIER: Scalar = 3.0;

/// Lower bound on the distance used for inverse-distance falloffs.
const MIN_FALLOFF_DISTANCE: Scalar = 0.05;

/// Number of distinct axes used to split coincident pairs.
const TIE_BREAK_AXES: usize = 64;

/// Previous-tick state of a neighbouring boid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborState {
    pub position: Vector,
    pub velocity: Vector,
    /// Unit direction to separate along when this neighbour shares the
    /// boid's position. Zero means the pair has no tie-break and is skipped.
    pub tie_break: Vector,
}

impl From<&Boid> for NeighborState {
    fn from(boid: &Boid) -> Self {
        Self {
            position: boid.position,
            velocity: boid.velocity,
            tie_break: Vector::ZERO,
        }
    }
}

/// Separation direction for boid `own` when it sits exactly on boid `other`.
///
/// The pair shares one axis picked from their indices; the lower index
/// moves along its negative side and the higher along its positive side, so
/// both boids always split apart the same way.
pub fn coincident_push(own: usize, other: usize) -> Vector {
    if own == other {
        return Vector::ZERO;
    }

    let (low, high) = (own.min(other), own.max(other));
    let axis = fibonacci_sphere_point(
        low.wrapping_mul(31).wrapping_add(high) % TIE_BREAK_AXES,
        TIE_BREAK_AXES,
    );
    if own < other { -axis } else { axis }
}

/// Cubic world region centred on the origin with a soft repelling margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub half_extent: Scalar,
    pub margin: Scalar,
    pub force: Scalar,
}

impl WorldBounds {
    pub fn new(half_extent: Scalar, margin: Scalar, force: Scalar) -> Self {
        Self {
            half_extent,
            margin: margin.min(half_extent),
            force,
        }
    }

    /// Smooth push back towards the interior, growing quadratically from zero
    /// at the inner edge of the margin to `force` at the wall.
    pub fn containment_force(&self, position: Vector) -> Vector {
        if self.margin <= 0.0 || self.force <= 0.0 {
            return Vector::ZERO;
        }

        let axis = |coordinate: Scalar| -> Scalar {
            let gap = self.half_extent - coordinate.abs();
            if gap >= self.margin {
                return 0.0;
            }
            let depth = (1.0 - gap.max(0.0) / self.margin).min(1.0);
            -coordinate.signum() * depth * depth * self.force
        };

        Vector::new(axis(position.x), axis(position.y), axis(position.z))
    }

    /// Hard clamp at the walls. The velocity component pointing out of the
    /// world is reflected, which preserves speed.
    pub fn confine(&self, position: &mut Vector, velocity: &mut Vector) {
        let h = self.half_extent;
        for axis in 0..3 {
            if position[axis] > h {
                position[axis] = h;
                if velocity[axis] > 0.0 {
                    velocity[axis] = -velocity[axis];
                }
            } else if position[axis] < -h {
                position[axis] = -h;
                if velocity[axis] < 0.0 {
                    velocity[axis] = -velocity[axis];
                }
            }
        }
    }

    pub fn contains(&self, position: Vector) -> bool {
        position.abs().max_element() <= self.half_extent
    }
}

/// Unweighted steering contributions from one update, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForces {
    pub separation: Vector,
    pub alignment: Vector,
    pub cohesion: Vector,
    pub avoidance: Vector,
    pub boundary: Vector,
    pub emergency: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    position: Vector,
    velocity: Vector,
    acceleration: Vector,
    heading: Vector,
    weights: BehaviorWeights,
    ranges: InteractionRanges,
    max_speed: Scalar,
    min_speed_ratio: Scalar,
    max_steer_force: Scalar,
    visual_scale: Scalar,
}

impl Default for Boid {
    fn default() -> Self {
        Self::new(Vector::ZERO, Vector::ZERO)
    }
}

impl Boid {
    pub fn new(position: Vector, velocity: Vector) -> Self {
        Self::from_config(position, velocity, &BoidConfig::default())
    }

    pub fn from_config(position: Vector, velocity: Vector, config: &BoidConfig) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector::ZERO,
            heading: velocity.normalize_or_zero(),
            weights: config.weights,
            ranges: config.ranges,
            max_speed: config.max_speed,
            min_speed_ratio: config.min_speed_ratio,
            max_steer_force: config.max_steer_force,
            visual_scale: config.visual_scale,
        }
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Acceleration applied during the last update
    #[inline]
    pub fn acceleration(&self) -> Vector {
        self.acceleration
    }

    /// Unit facing direction, kept for renderers
    #[inline]
    pub fn heading(&self) -> Vector {
        self.heading
    }

    #[inline]
    pub fn speed(&self) -> Scalar {
        self.velocity.length()
    }

    pub fn weights(&self) -> &BehaviorWeights {
        &self.weights
    }

    pub fn weight(&self, behavior: Behavior) -> Scalar {
        self.weights.get(behavior)
    }

    pub fn set_weight(&mut self, behavior: Behavior, value: Scalar) -> Result<(), ParameterError> {
        self.weights.set(behavior, value)
    }

    pub fn ranges(&self) -> &InteractionRanges {
        &self.ranges
    }

    pub fn perception_radius(&self) -> Scalar {
        self.ranges.perception_radius()
    }

    /// Rescales all three interaction ranges, keeping their ratios.
    pub fn set_perception_radius(&mut self, radius: Scalar) -> Result<(), ParameterError> {
        self.ranges = self.ranges.with_perception_radius(radius)?;
        Ok(())
    }

    pub fn max_speed(&self) -> Scalar {
        self.max_speed
    }

    pub fn min_speed(&self) -> Scalar {
        self.max_speed * self.min_speed_ratio
    }

    /// Sets the speed cap (the floor follows as a fixed fraction). A boid
    /// already faster than the new cap is slowed down immediately.
    pub fn set_max_speed(&mut self, max_speed: Scalar) -> Result<(), ParameterError> {
        self.max_speed = validate_positive("max speed", max_speed)?;

        let speed = self.velocity.length();
        if speed > self.max_speed {
            self.velocity *= self.max_speed / speed;
        }
        Ok(())
    }

    pub fn max_steer_force(&self) -> Scalar {
        self.max_steer_force
    }

    pub fn set_max_steer_force(&mut self, max_steer_force: Scalar) -> Result<(), ParameterError> {
        self.max_steer_force = validate_non_negative("max steer force", max_steer_force)?;
        Ok(())
    }

    pub fn visual_scale(&self) -> Scalar {
        self.visual_scale
    }

    pub fn set_visual_scale(&mut self, scale: Scalar) -> Result<(), ParameterError> {
        self.visual_scale = validate_positive("visual scale", scale)?;
        Ok(())
    }

    /// Advances the boid by one tick.
    ///
    /// `neighbors` should be ordered nearest first; `time_scale` is the elapsed
    /// time in nominal frames (1.0 for a fixed-step update).
    pub fn update(
        &mut self,
        neighbors: &[NeighborState],
        obstacles: &[Obstacle],
        world: &WorldBounds,
        time_scale: Scalar,
    ) -> SteeringForces {
        self.acceleration = Vector::ZERO;

        let (separation, emergency) = self.separation(neighbors);
        let forces = SteeringForces {
            separation,
            alignment: self.alignment(neighbors),
            cohesion: self.cohesion(neighbors),
            avoidance: self.avoidance(obstacles),
            boundary: world.containment_force(self.position),
            emergency,
        };

        let steering = forces.separation * self.weights.separation
            + forces.alignment * self.weights.alignment
            + forces.cohesion * self.weights.cohesion
            + forces.avoidance * self.weights.avoidance;

        let force_cap = if emergency {
            self.max_steer_force * EMERGENCY_FORCE_MULTIPLIER
        } else {
            self.max_steer_force
        };

        // Containment is layered on after the cap so walls always win
        self.acceleration = limit_length(steering, force_cap) + forces.boundary;

        self.velocity += self.acceleration * time_scale;
        self.velocity = clamp_speed(self.velocity, self.min_speed(), self.max_speed);
        self.position += self.velocity * time_scale;

        if self.velocity.length_squared() > ZERO_LENGTH_SQUARED {
            self.heading = self.velocity.normalize();
        }

        world.confine(&mut self.position, &mut self.velocity);

        forces
    }

    /// Inverse-square repulsion from neighbours inside the separation range.
    /// Coincident neighbours push along their tie-break direction, or are
    /// skipped when they have none.
    fn separation(&self, neighbors: &[NeighborState]) -> (Vector, bool) {
        let range = self.ranges.separation;
        let mut sum = Vector::ZERO;
        let mut count = 0usize;
        let mut nearest = Scalar::INFINITY;

        for neighbor in neighbors {
            let offset = self.position - neighbor.position;
            let distance_squared = offset.length_squared();
            if distance_squared >= range * range {
                continue;
            }

            let (direction, distance) = if distance_squared <= ZERO_LENGTH_SQUARED {
                if neighbor.tie_break == Vector::ZERO {
                    continue;
                }
                (neighbor.tie_break, 0.0)
            } else {
                let distance = distance_squared.sqrt();
                (offset / distance, distance)
            };

            let falloff = distance.max(MIN_FALLOFF_DISTANCE);
            sum += direction / (falloff * falloff);
            count += 1;
            nearest = nearest.min(distance);
        }

        if count == 0 {
            return (Vector::ZERO, false);
        }

        let average = sum / count as Scalar;
        let emergency = nearest < range * EMERGENCY_SEPARATION_RATIO;
        let limit = if emergency {
            self.max_steer_force * EMERGENCY_FORCE_MULTIPLIER
        } else {
            self.max_steer_force
        };

        (
            steer_towards(average, self.velocity, self.max_speed, limit),
            emergency,
        )
    }

    /// Distance-weighted mean heading of neighbours inside the alignment range.
    fn alignment(&self, neighbors: &[NeighborState]) -> Vector {
        let range = self.ranges.alignment;
        let mut sum = Vector::ZERO;
        let mut total_weight = 0.0;

        for neighbor in neighbors {
            let distance = self.position.distance(neighbor.position);
            if distance >= range {
                continue;
            }

            let weight = 1.0 - distance / range;
            sum += neighbor.velocity * weight;
            total_weight += weight;
        }

        if total_weight <= 0.0 {
            return Vector::ZERO;
        }

        steer_towards(
            sum / total_weight,
            self.velocity,
            self.max_speed,
            self.max_steer_force,
        )
    }

    /// Steer towards the weighted centre of neighbours inside the cohesion
    /// range, fading out neighbours already at contact distance.
    fn cohesion(&self, neighbors: &[NeighborState]) -> Vector {
        let range = self.ranges.cohesion;
        let contact = self.ranges.separation * COHESION_CONTACT_RATIO;
        let mut sum = Vector::ZERO;
        let mut total_weight = 0.0;

        for neighbor in neighbors {
            let distance = self.position.distance(neighbor.position);
            if distance >= range {
                continue;
            }

            let mut weight = 1.0 - distance / range;
            if contact > 0.0 && distance < contact {
                weight *= distance / contact;
            }
            sum += neighbor.position * weight;
            total_weight += weight;
        }

        if total_weight <= ZERO_LENGTH_SQUARED {
            return Vector::ZERO;
        }

        let center = sum / total_weight;
        steer_towards(
            center - self.position,
            self.velocity,
            self.max_speed,
            self.max_steer_force,
        )
    }

    /// Repulsion from obstacle surfaces, inversely scaled by distance.
    fn avoidance(&self, obstacles: &[Obstacle]) -> Vector {
        let range = self.ranges.cohesion * AVOIDANCE_RANGE_MULTIPLIER;
        let mut sum = Vector::ZERO;
        let mut count = 0usize;

        for obstacle in obstacles {
            let offset = self.position - obstacle.position;
            if offset.length_squared() <= ZERO_LENGTH_SQUARED {
                continue;
            }

            let surface_distance = obstacle.surface_distance(self.position);
            if surface_distance >= range {
                continue;
            }

            sum += offset.normalize() / surface_distance.max(MIN_FALLOFF_DISTANCE);
            count += 1;
        }

        if count == 0 {
            return Vector::ZERO;
        }

        steer_towards(
            sum / count as Scalar,
            self.velocity,
            self.max_speed,
            self.max_steer_force,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_world() -> WorldBounds {
        WorldBounds::new(1_000.0, 10.0, 0.5)
    }

    fn neighbor(x: Scalar, y: Scalar, z: Scalar) -> NeighborState {
        NeighborState {
            position: Vector::new(x, y, z),
            velocity: Vector::ZERO,
            tie_break: Vector::ZERO,
        }
    }

    #[test]
    fn test_speed_clamped_up_to_min_speed() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(0.1, 0.0, 0.0));
        let min_speed = boid.min_speed();

        boid.update(&[], &[], &open_world(), 1.0);

        assert!((boid.speed() - min_speed).abs() < 1e-12);
        assert!((boid.position().x - min_speed).abs() < 1e-12);
    }

    #[test]
    fn test_speed_clamped_down_to_max_speed() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(0.0, 0.0, 40.0));
        boid.update(&[], &[], &open_world(), 1.0);

        assert!((boid.speed() - boid.max_speed()).abs() < 1e-12);
    }

    #[test]
    fn test_stationary_boid_without_forces_stays_put() {
        let mut boid = Boid::new(Vector::new(1.0, 2.0, 3.0), Vector::ZERO);
        boid.update(&[], &[], &open_world(), 1.0);

        assert_eq!(boid.velocity(), Vector::ZERO);
        assert_eq!(boid.position(), Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_zero_neighbors_contribute_nothing() {
        let mut boid = Boid::new(Vector::new(0.0, 0.0, 0.0), Vector::new(1.5, 0.0, 0.0));
        let obstacle = Obstacle::new(Vector::new(8.0, 0.0, 0.0), 2.0).unwrap();

        let forces = boid.update(&[], &[obstacle], &open_world(), 1.0);

        assert_eq!(forces.separation, Vector::ZERO);
        assert_eq!(forces.alignment, Vector::ZERO);
        assert_eq!(forces.cohesion, Vector::ZERO);
        assert!(forces.avoidance.x < 0.0);
    }

    #[test]
    fn test_out_of_range_neighbors_contribute_nothing() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(1.5, 0.0, 0.0));
        let far = [neighbor(0.0, 0.0, 200.0)];

        let forces = boid.update(&far, &[], &open_world(), 1.0);

        assert_eq!(forces.separation, Vector::ZERO);
        assert_eq!(forces.alignment, Vector::ZERO);
        assert_eq!(forces.cohesion, Vector::ZERO);
    }

    #[test]
    fn test_separation_pushes_away_from_neighbor() {
        let mut boid = Boid::new(Vector::ZERO, Vector::ZERO);
        let forces = boid.update(&[neighbor(1.0, 0.0, 0.0)], &[], &open_world(), 1.0);

        assert!(forces.separation.x < 0.0);
        assert!(boid.velocity().x < 0.0);
    }

    #[test]
    fn test_symmetric_neighbors_cancel_separation() {
        let mut boid = Boid::new(Vector::ZERO, Vector::ZERO);
        let forces = boid.update(
            &[neighbor(-1.0, 0.0, 0.0), neighbor(1.0, 0.0, 0.0)],
            &[],
            &open_world(),
            1.0,
        );

        assert_eq!(forces.separation, Vector::ZERO);
    }

    #[test]
    fn test_coincident_neighbor_without_tie_break_is_skipped() {
        let mut boid = Boid::new(Vector::ONE, Vector::ZERO);
        let forces = boid.update(&[neighbor(1.0, 1.0, 1.0)], &[], &open_world(), 1.0);

        assert_eq!(forces.separation, Vector::ZERO);
        assert!(boid.position().is_finite());
        assert!(boid.velocity().is_finite());
    }

    #[test]
    fn test_coincident_push_is_opposite_per_pair() {
        for (a, b) in [(0, 1), (3, 17), (250, 4)] {
            let push_a = coincident_push(a, b);
            let push_b = coincident_push(b, a);
            assert!((push_a.length() - 1.0).abs() < 1e-12);
            assert!((push_a + push_b).length() < 1e-12);
            assert_eq!(push_a, coincident_push(a, b));
        }
        assert_eq!(coincident_push(5, 5), Vector::ZERO);
    }

    #[test]
    fn test_coincident_neighbor_with_tie_break_separates() {
        let mut boid = Boid::new(Vector::ONE, Vector::ZERO);
        let mut other = neighbor(1.0, 1.0, 1.0);
        other.tie_break = coincident_push(0, 1);

        let forces = boid.update(&[other], &[], &open_world(), 1.0);

        assert!(forces.emergency);
        assert!(forces.separation.dot(other.tie_break) > 0.0);
        assert!((boid.speed() - boid.min_speed()).abs() < 1e-12);
        assert!(boid.position() != Vector::ONE);
    }

    #[test]
    fn test_close_neighbor_triggers_emergency_cap() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(0.0, 1.5, 0.0));
        let forces = boid.update(&[neighbor(0.5, 0.0, 0.0)], &[], &open_world(), 1.0);

        assert!(forces.emergency);
        assert!(boid.acceleration().length() > boid.max_steer_force());
        assert!(
            boid.acceleration().length() <= boid.max_steer_force() * EMERGENCY_FORCE_MULTIPLIER + 1e-12
        );
    }

    #[test]
    fn test_acceleration_capped_without_emergency() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(0.0, 1.5, 0.0));
        let moving = NeighborState {
            position: Vector::new(8.0, 0.0, 0.0),
            velocity: Vector::new(-2.0, 0.0, 0.0),
            tie_break: Vector::ZERO,
        };

        let forces = boid.update(&[moving], &[], &open_world(), 1.0);

        assert!(!forces.emergency);
        assert!(boid.acceleration().length() <= boid.max_steer_force() + 1e-12);
    }

    #[test]
    fn test_alignment_turns_towards_neighbor_heading() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(1.5, 0.0, 0.0));
        boid.set_weight(Behavior::Separation, 0.0).unwrap();
        boid.set_weight(Behavior::Cohesion, 0.0).unwrap();
        let heading_up = NeighborState {
            position: Vector::new(0.0, 0.0, 15.0),
            velocity: Vector::new(0.0, 2.0, 0.0),
            tie_break: Vector::ZERO,
        };

        let forces = boid.update(&[heading_up], &[], &open_world(), 1.0);

        assert!(forces.alignment.y > 0.0);
        assert!(boid.velocity().y > 0.0);
    }

    #[test]
    fn test_cohesion_pulls_towards_group_center() {
        let mut boid = Boid::new(Vector::ZERO, Vector::ZERO);
        let group = [neighbor(20.0, 2.0, 0.0), neighbor(20.0, -2.0, 0.0)];

        let forces = boid.update(&group, &[], &open_world(), 1.0);

        assert!(forces.cohesion.x > 0.0);
        assert!(forces.cohesion.y.abs() < 1e-12);
    }

    #[test]
    fn test_cohesion_ignores_neighbor_at_contact() {
        let boid = Boid::new(Vector::ZERO, Vector::ZERO);
        assert_eq!(boid.cohesion(&[neighbor(0.0, 0.0, 0.0)]), Vector::ZERO);
    }

    #[test]
    fn test_boundary_force_and_containment() {
        let world = WorldBounds::new(50.0, 10.0, 0.5);
        let mut boid = Boid::new(Vector::new(49.5, 0.0, 0.0), Vector::new(2.0, 0.0, 0.0));

        let forces = boid.update(&[], &[], &world, 1.0);

        assert!(forces.boundary.x < 0.0);
        assert!(world.contains(boid.position()));
        assert!(boid.speed() <= boid.max_speed() + 1e-12);
        assert!(boid.speed() >= boid.min_speed() - 1e-12);
    }

    #[test]
    fn test_containment_force_profile() {
        let world = WorldBounds::new(50.0, 10.0, 0.5);

        assert_eq!(world.containment_force(Vector::new(30.0, 0.0, 0.0)), Vector::ZERO);
        let near = world.containment_force(Vector::new(0.0, -45.0, 0.0));
        let nearer = world.containment_force(Vector::new(0.0, -48.0, 0.0));
        assert!(near.y > 0.0);
        assert!(nearer.y > near.y);
        assert!((world.containment_force(Vector::new(0.0, 0.0, 50.0)).z + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_confine_reflects_outward_velocity() {
        let world = WorldBounds::new(10.0, 0.0, 0.0);
        let mut position = Vector::new(12.0, -11.0, 3.0);
        let mut velocity = Vector::new(1.0, -2.0, 0.5);

        world.confine(&mut position, &mut velocity);

        assert_eq!(position, Vector::new(10.0, -10.0, 3.0));
        assert_eq!(velocity, Vector::new(-1.0, 2.0, 0.5));
    }

    #[test]
    fn test_set_max_speed_rescales_velocity_down_only() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(0.0, 1.8, 0.0));

        boid.set_max_speed(1.0).unwrap();
        assert!((boid.speed() - 1.0).abs() < 1e-12);
        assert_eq!(boid.min_speed(), 0.5);

        boid.set_max_speed(4.0).unwrap();
        assert!((boid.speed() - 1.0).abs() < 1e-12);
        assert_eq!(boid.min_speed(), 2.0);
    }

    #[test]
    fn test_invalid_parameters_leave_state_unchanged() {
        let mut boid = Boid::default();
        let before = boid.clone();

        assert!(boid.set_max_speed(0.0).is_err());
        assert!(boid.set_max_speed(Scalar::NAN).is_err());
        assert!(boid.set_weight(Behavior::Alignment, -2.0).is_err());
        assert!(boid.set_perception_radius(-5.0).is_err());
        assert!(boid.set_visual_scale(0.0).is_err());
        assert!(boid.set_max_steer_force(Scalar::INFINITY).is_err());

        assert_eq!(boid, before);
    }

    #[test]
    fn test_visual_scale_does_not_affect_motion() {
        let mut a = Boid::new(Vector::ZERO, Vector::new(1.0, 0.5, 0.0));
        let mut b = a.clone();
        b.set_visual_scale(5.0).unwrap();

        let neighbors = [neighbor(3.0, 0.0, 0.0)];
        a.update(&neighbors, &[], &open_world(), 1.0);
        b.update(&neighbors, &[], &open_world(), 1.0);

        assert_eq!(a.position(), b.position());
        assert_eq!(a.velocity(), b.velocity());
    }

    #[test]
    fn test_heading_follows_velocity() {
        let mut boid = Boid::new(Vector::ZERO, Vector::new(0.0, 0.0, 1.5));
        boid.update(&[], &[], &open_world(), 1.0);

        assert!((boid.heading() - Vector::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }
}
