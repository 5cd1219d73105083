//! Initial placement of a new population.
//!
//! Boids are split into clusters of bounded size. Cluster centres are spread
//! over a sphere around the world origin and each cluster lays its members out
//! on a golden-angle spiral, which avoids the banding a grid would produce.

use crate::physics::math::{
    Scalar, Vector, fibonacci_sphere_point, golden_spiral_offset, random_unit_vector,
};
use crate::resources::SharedRng;
use rand::Rng;

/// Cluster centres sit at this fraction of the world half-extent.
const CLUSTER_ORBIT_RATIO: Scalar = 0.5;

/// Radius of a full cluster as a fraction of the world half-extent.
const CLUSTER_RADIUS_RATIO: Scalar = 0.2;

/// Spawned boids are kept this far inside the walls.
const SPAWN_EXTENT_RATIO: Scalar = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSettings {
    pub half_extent: Scalar,
    pub cluster_size: usize,
    /// Weight of the towards-centre heading against a random one, in `[0, 1]`
    pub center_bias: Scalar,
    pub min_speed: Scalar,
    pub max_speed: Scalar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub position: Vector,
    pub velocity: Vector,
}

pub fn cluster_count(count: usize, cluster_size: usize) -> usize {
    count.div_ceil(cluster_size.max(1))
}

/// Positions and initial velocities for `count` boids.
pub fn spawn_formation(
    count: usize,
    settings: &FormationSettings,
    rng: &mut SharedRng,
) -> Vec<Spawn> {
    let cluster_size = settings.cluster_size.max(1);
    let clusters = cluster_count(count, cluster_size);
    let orbit = settings.half_extent * CLUSTER_ORBIT_RATIO;
    let limit = settings.half_extent * SPAWN_EXTENT_RATIO;

    let mut spawns = Vec::with_capacity(count);
    for cluster in 0..clusters {
        let first = cluster * cluster_size;
        let members = cluster_size.min(count - first);
        let center = fibonacci_sphere_point(cluster, clusters) * orbit;
        let radius = settings.half_extent
            * CLUSTER_RADIUS_RATIO
            * libm::sqrt(members as Scalar / cluster_size as Scalar);

        for member in 0..members {
            let position = (center + golden_spiral_offset(member, members, radius))
                .clamp(Vector::splat(-limit), Vector::splat(limit));
            let velocity = initial_velocity(position, settings, rng);
            spawns.push(Spawn { position, velocity });
        }
    }

    spawns
}

fn initial_velocity(position: Vector, settings: &FormationSettings, rng: &mut SharedRng) -> Vector {
    let bias = settings.center_bias.clamp(0.0, 1.0);
    let random = random_unit_vector(rng);
    let inward = (-position).normalize_or_zero();

    let direction = (inward * bias + random * (1.0 - bias)).normalize_or(random);
    let speed = if settings.max_speed > settings.min_speed {
        rng.random_range(settings.min_speed..=settings.max_speed)
    } else {
        settings.max_speed
    };

    direction * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FormationSettings {
        FormationSettings {
            half_extent: 100.0,
            cluster_size: 50,
            center_bias: 0.6,
            min_speed: 1.0,
            max_speed: 2.0,
        }
    }

    #[test]
    fn test_cluster_count() {
        assert_eq!(cluster_count(0, 50), 0);
        assert_eq!(cluster_count(50, 50), 1);
        assert_eq!(cluster_count(51, 50), 2);
        assert_eq!(cluster_count(7, 0), 7);
    }

    #[test]
    fn test_spawn_count_and_bounds() {
        let mut rng = SharedRng::from_seed(3);
        let spawns = spawn_formation(437, &settings(), &mut rng);

        assert_eq!(spawns.len(), 437);
        for spawn in &spawns {
            assert!(spawn.position.abs().max_element() <= 90.0 + 1e-9);
            let speed = spawn.velocity.length();
            assert!((1.0 - 1e-9..=2.0 + 1e-9).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn test_spawn_positions_are_distinct() {
        let mut rng = SharedRng::from_seed(11);
        let spawns = spawn_formation(120, &settings(), &mut rng);

        for (i, a) in spawns.iter().enumerate() {
            for b in &spawns[i + 1..] {
                assert!(a.position.distance(b.position) > 1e-6);
            }
        }
    }

    #[test]
    fn test_full_bias_heads_to_center() {
        let mut rng = SharedRng::from_seed(5);
        let biased = FormationSettings {
            center_bias: 1.0,
            ..settings()
        };

        for spawn in spawn_formation(200, &biased, &mut rng) {
            if spawn.position.length() > 1e-6 {
                assert!(spawn.velocity.dot(-spawn.position) > 0.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_formation() {
        let a = spawn_formation(64, &settings(), &mut SharedRng::from_seed(99));
        let b = spawn_formation(64, &settings(), &mut SharedRng::from_seed(99));
        assert_eq!(a, b);
    }
}
