//! The simulation manager.
//!
//! A [`Flock`] owns every boid and obstacle plus the octree used for neighbour
//! lookup. Each tick rebuilds the octree from scratch, freezes a snapshot of
//! every boid's position and velocity, then updates boids independently
//! against that snapshot (in parallel for large populations).

use crate::config::{BoidConfig, FlockConfig, OctreeConfig, SimulationConfig};
use crate::physics::aabb3d::Aabb3d;
use crate::physics::boid::{Boid, NeighborState, WorldBounds, coincident_push};
use crate::physics::formation::{FormationSettings, cluster_count, spawn_formation};
use crate::physics::math::{Scalar, Vector, ZERO_LENGTH_SQUARED};
use crate::physics::obstacle::{Obstacle, line_positions, ring_positions};
use crate::physics::octree::{Neighbor, Octree, OctreeEntry, OctreeStats};
use crate::physics::params::{
    Behavior, ParameterError, validate_non_negative, validate_positive,
};
use crate::resources::SharedRng;
use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;
use bevy::tasks::{ComputeTaskPool, ParallelSliceMut, TaskPool};
use std::time::{Duration, Instant};

/// Integration is scaled relative to a frame at this rate.
pub const NOMINAL_FRAME_RATE: Scalar = 60.0;

/// Below this many boids the update runs on the calling thread.
pub const PARALLEL_MIN_AGENTS: usize = 256;

/// What happened during a call to [`Flock::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// First tick after the population was (re)built; nothing moved.
    Settling,
    /// Elapsed time exceeded the hitch threshold; nothing moved.
    SkippedHitch,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlockStats {
    pub agent_count: usize,
    pub obstacle_count: usize,
    pub ticks: u64,
    pub mean_speed: Scalar,
    pub min_speed: Scalar,
    pub max_speed: Scalar,
    pub centroid: Vector,
    /// Mean neighbours considered per boid during the last tick
    pub mean_neighbors: Scalar,
    pub octree: OctreeStats,
}

#[derive(Resource, Debug)]
pub struct Flock {
    boids: Vec<Boid>,
    obstacles: Vec<Obstacle>,
    octree: Octree,
    world: WorldBounds,
    rng: SharedRng,
    flock_config: FlockConfig,
    /// Parameters given to boids created by the next rebuild
    boid_template: BoidConfig,
    snapshot: Vec<NeighborState>,
    settling: bool,
    last_tick: Option<Instant>,
    ticks: u64,
    last_neighbor_total: usize,
}

/// Read-only state shared by every boid update within one tick.
struct TickContext<'a> {
    octree: &'a Octree,
    snapshot: &'a [NeighborState],
    obstacles: &'a [Obstacle],
    world: &'a WorldBounds,
    time_scale: Scalar,
}

impl TickContext<'_> {
    /// Updates one boid and returns how many neighbours it considered.
    fn update(
        &self,
        index: usize,
        boid: &mut Boid,
        found: &mut Vec<Neighbor>,
        neighbors: &mut Vec<NeighborState>,
    ) -> usize {
        self.octree
            .find_neighbors_into(index, boid.position(), boid.perception_radius(), found);

        neighbors.clear();
        neighbors.extend(found.iter().filter_map(|neighbor| {
            let mut state = self.snapshot.get(neighbor.index).copied()?;
            if neighbor.distance * neighbor.distance <= ZERO_LENGTH_SQUARED {
                state.tie_break = coincident_push(index, neighbor.index);
            }
            Some(state)
        }));

        boid.update(neighbors, self.obstacles, self.world, self.time_scale);
        neighbors.len()
    }

    fn update_all(&self, first_index: usize, boids: &mut [Boid]) -> usize {
        let mut found = Vec::new();
        let mut neighbors = Vec::new();
        boids
            .iter_mut()
            .enumerate()
            .map(|(offset, boid)| self.update(first_index + offset, boid, &mut found, &mut neighbors))
            .sum()
    }
}

fn build_octree(bounds: Aabb3d, config: &OctreeConfig) -> Octree {
    Octree::new(bounds)
        .with_leaf_capacity(config.leaf_capacity)
        .with_min_node_size(config.min_node_size)
        .with_query_margin(config.query_margin)
}

fn world_bounds(config: &FlockConfig) -> WorldBounds {
    WorldBounds::new(
        config.world_half_extent,
        config.boundary_margin,
        config.boundary_force,
    )
}

impl Flock {
    /// Builds a flock seeded from `config.flock.initial_seed` (random when unset).
    pub fn new(config: &SimulationConfig) -> Self {
        Self::with_rng(config, SharedRng::from_optional_seed(config.flock.initial_seed))
    }

    pub fn with_rng(config: &SimulationConfig, rng: SharedRng) -> Self {
        let mut flock = Self::empty(config, rng);
        flock.rebuild_population(config.flock.agent_count);
        flock
    }

    /// Builds a flock from explicitly placed boids instead of a formation.
    pub fn with_boids(config: &SimulationConfig, boids: Vec<Boid>) -> Self {
        let mut flock = Self::empty(config, SharedRng::from_optional_seed(config.flock.initial_seed));
        flock.flock_config.agent_count = boids.len();
        flock.boids = boids;
        flock
    }

    fn empty(config: &SimulationConfig, rng: SharedRng) -> Self {
        let bounds = Aabb3d::cube(Vector::ZERO, config.flock.world_half_extent);

        Self {
            boids: Vec::new(),
            obstacles: Vec::new(),
            octree: build_octree(bounds, &config.octree),
            world: world_bounds(&config.flock),
            rng,
            flock_config: config.flock.clone(),
            boid_template: config.boid.clone(),
            snapshot: Vec::new(),
            settling: true,
            last_tick: None,
            ticks: 0,
            last_neighbor_total: 0,
        }
    }

    /// Tears down every boid and spawns `count` new ones in formation.
    fn rebuild_population(&mut self, count: usize) {
        let template = &self.boid_template;
        let settings = FormationSettings {
            half_extent: self.flock_config.world_half_extent,
            cluster_size: self.flock_config.cluster_size,
            center_bias: self.flock_config.initial_speed_bias,
            min_speed: template.max_speed * template.min_speed_ratio,
            max_speed: template.max_speed,
        };

        self.boids = spawn_formation(count, &settings, &mut self.rng)
            .into_iter()
            .map(|spawn| Boid::from_config(spawn.position, spawn.velocity, template))
            .collect();
        self.flock_config.agent_count = count;
        self.octree.clear();
        self.snapshot.clear();
        self.settling = true;
        self.last_tick = None;
        self.last_neighbor_total = 0;

        info!(
            "Spawned {} boids in {} clusters",
            count,
            cluster_count(count, self.flock_config.cluster_size)
        );
    }

    /// Advances the flock using the wall-clock time since the previous call.
    pub fn tick(&mut self) -> TickOutcome {
        let now = Instant::now();
        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.advance(elapsed)
    }

    /// Advances the flock by `elapsed`, unless it is settling after a rebuild
    /// or `elapsed` is long enough to be a frame hitch.
    pub fn advance(&mut self, elapsed: Duration) -> TickOutcome {
        if self.settling {
            self.settling = false;
            debug!("Skipping settling tick");
            return TickOutcome::Settling;
        }

        let max_elapsed = Duration::from_millis(self.flock_config.max_elapsed_ms);
        if elapsed > max_elapsed {
            debug!("Skipping tick after {:?} hitch", elapsed);
            return TickOutcome::SkippedHitch;
        }

        let time_scale = if self.flock_config.time_scaled {
            elapsed.as_secs_f64() * NOMINAL_FRAME_RATE
        } else {
            1.0
        };
        self.step(time_scale);
        TickOutcome::Advanced
    }

    /// Runs one update pass with an explicit time scale (1.0 is one nominal
    /// frame), bypassing the settling and hitch checks.
    pub fn step(&mut self, time_scale: Scalar) {
        let rejected = self.octree.rebuild(
            self.boids
                .iter()
                .enumerate()
                .map(|(index, boid)| OctreeEntry {
                    index,
                    position: boid.position(),
                }),
        );
        if rejected > 0 {
            debug!("{} boids fell outside the octree bounds", rejected);
        }

        self.snapshot.clear();
        self.snapshot.extend(self.boids.iter().map(NeighborState::from));

        let context = TickContext {
            octree: &self.octree,
            snapshot: &self.snapshot,
            obstacles: &self.obstacles,
            world: &self.world,
            time_scale,
        };

        self.last_neighbor_total =
            if self.flock_config.parallel && self.boids.len() >= PARALLEL_MIN_AGENTS {
                let pool = ComputeTaskPool::get_or_init(TaskPool::default);
                let chunk_size = self.boids.len().div_ceil(pool.thread_num().max(1)).max(1);
                self.boids
                    .par_chunk_map_mut(pool, chunk_size, |chunk_index, chunk| {
                        context.update_all(chunk_index * chunk_size, chunk)
                    })
                    .into_iter()
                    .sum()
            } else {
                context.update_all(0, &mut self.boids)
            };

        self.ticks += 1;
    }

    pub fn agent_count(&self) -> usize {
        self.boids.len()
    }

    /// Replaces the whole population with `count` freshly spawned boids.
    pub fn set_agent_count(&mut self, count: usize) {
        self.rebuild_population(count);
    }

    /// Respawns the population at its current size.
    pub fn reset(&mut self) {
        self.rebuild_population(self.flock_config.agent_count);
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boid(&self, index: usize) -> Option<&Boid> {
        self.boids.get(index)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    pub fn world(&self) -> &WorldBounds {
        &self.world
    }

    pub fn config(&self) -> &FlockConfig {
        &self.flock_config
    }

    pub fn boid_template(&self) -> &BoidConfig {
        &self.boid_template
    }

    pub fn is_settling(&self) -> bool {
        self.settling
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_weight(&mut self, behavior: Behavior, value: Scalar) -> Result<(), ParameterError> {
        self.boid_template
            .weights
            .set(behavior, value)
            .inspect_err(|e| warn!("Rejected {} weight: {}", behavior, e))?;

        for boid in &mut self.boids {
            boid.set_weight(behavior, value)?;
        }
        Ok(())
    }

    pub fn set_max_speed(&mut self, max_speed: Scalar) -> Result<(), ParameterError> {
        self.boid_template.max_speed = validate_positive("max speed", max_speed)
            .inspect_err(|e| warn!("Rejected max speed: {}", e))?;

        for boid in &mut self.boids {
            boid.set_max_speed(max_speed)?;
        }
        Ok(())
    }

    pub fn set_perception_radius(&mut self, radius: Scalar) -> Result<(), ParameterError> {
        self.boid_template.ranges = self
            .boid_template
            .ranges
            .with_perception_radius(radius)
            .inspect_err(|e| warn!("Rejected perception radius: {}", e))?;

        for boid in &mut self.boids {
            boid.set_perception_radius(radius)?;
        }
        Ok(())
    }

    pub fn set_max_steer_force(&mut self, max_steer_force: Scalar) -> Result<(), ParameterError> {
        self.boid_template.max_steer_force =
            validate_non_negative("max steer force", max_steer_force)
                .inspect_err(|e| warn!("Rejected max steer force: {}", e))?;

        for boid in &mut self.boids {
            boid.set_max_steer_force(max_steer_force)?;
        }
        Ok(())
    }

    /// Cosmetic scale for renderers; has no effect on motion.
    pub fn set_visual_scale(&mut self, scale: Scalar) -> Result<(), ParameterError> {
        self.boid_template.visual_scale = validate_positive("visual scale", scale)
            .inspect_err(|e| warn!("Rejected visual scale: {}", e))?;

        for boid in &mut self.boids {
            boid.set_visual_scale(scale)?;
        }
        Ok(())
    }

    /// Moves the walls and respawns the population inside them.
    pub fn set_bounds(&mut self, half_extent: Scalar) -> Result<(), ParameterError> {
        let half_extent = validate_positive("world half extent", half_extent)
            .inspect_err(|e| warn!("Rejected world bounds: {}", e))?;

        self.flock_config.world_half_extent = half_extent;
        self.world = world_bounds(&self.flock_config);
        self.octree
            .set_bounds(Aabb3d::cube(Vector::ZERO, half_extent));
        self.reset();
        Ok(())
    }

    /// Adds an obstacle and returns its index.
    pub fn add_obstacle(&mut self, position: Vector, radius: Scalar) -> Result<usize, ParameterError> {
        let obstacle =
            Obstacle::new(position, radius).inspect_err(|e| warn!("Rejected obstacle: {}", e))?;
        self.obstacles.push(obstacle);
        Ok(self.obstacles.len() - 1)
    }

    /// Places obstacles every `spacing` units from `start` to `end`. Returns
    /// how many were added.
    pub fn add_obstacle_line(
        &mut self,
        start: Vector,
        end: Vector,
        spacing: Scalar,
    ) -> Result<usize, ParameterError> {
        let positions = line_positions(start, end, spacing)
            .inspect_err(|e| warn!("Rejected obstacle line: {}", e))?;
        self.add_obstacles(positions)
    }

    /// Places `count` obstacles evenly on a horizontal ring.
    pub fn add_obstacle_ring(
        &mut self,
        center: Vector,
        radius: Scalar,
        count: usize,
    ) -> Result<usize, ParameterError> {
        let positions = validate_positive("obstacle ring radius", radius)
            .and_then(|radius| ring_positions(center, radius, count))
            .inspect_err(|e| warn!("Rejected obstacle ring: {}", e))?;
        self.add_obstacles(positions)
    }

    fn add_obstacles(&mut self, positions: Vec<Vector>) -> Result<usize, ParameterError> {
        let radius = self.flock_config.obstacle_radius;
        let obstacles = positions
            .into_iter()
            .map(|position| Obstacle::new(position, radius))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!("Rejected obstacle: {}", e))?;

        let added = obstacles.len();
        self.obstacles.extend(obstacles);
        Ok(added)
    }

    pub fn remove_obstacle(&mut self, index: usize) -> Option<Obstacle> {
        (index < self.obstacles.len()).then(|| self.obstacles.remove(index))
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    pub fn stats(&self) -> FlockStats {
        let count = self.boids.len();
        let mut stats = FlockStats {
            agent_count: count,
            obstacle_count: self.obstacles.len(),
            ticks: self.ticks,
            octree: self.octree.stats(),
            ..Default::default()
        };
        if count == 0 {
            return stats;
        }

        let mut speed_sum = 0.0;
        let mut min_speed = Scalar::INFINITY;
        let mut max_speed: Scalar = 0.0;
        let mut position_sum = Vector::ZERO;
        for boid in &self.boids {
            let speed = boid.speed();
            speed_sum += speed;
            min_speed = min_speed.min(speed);
            max_speed = max_speed.max(speed);
            position_sum += boid.position();
        }

        stats.mean_speed = speed_sum / count as Scalar;
        stats.min_speed = min_speed;
        stats.max_speed = max_speed;
        stats.centroid = position_sum / count as Scalar;
        stats.mean_neighbors = self.last_neighbor_total as Scalar / count as Scalar;
        stats
    }
}
