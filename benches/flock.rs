use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use skyflock::config::SimulationConfig;
use skyflock::physics::flock::Flock;
use skyflock::physics::math::Vector;
use std::hint::black_box;

fn seeded_config(agent_count: usize, parallel: bool) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.flock.agent_count = agent_count;
    config.flock.initial_seed = Some(42);
    config.flock.parallel = parallel;
    config
}

// =============================================================================
// Tick Performance Benchmarks
// =============================================================================

fn bench_step_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_scaling");
    group.sample_size(30);

    for &count in &[100, 500, 1_000, 1_500] {
        for parallel in [false, true] {
            let mut flock = Flock::new(&seeded_config(count, parallel));
            let label = if parallel { "parallel" } else { "sequential" };

            group.throughput(Throughput::Elements(count as u64));
            group.bench_with_input(BenchmarkId::new(label, count), &count, |b, _| {
                b.iter(|| {
                    flock.step(black_box(1.0));
                });
            });
        }
    }

    group.finish();
}

fn bench_step_with_obstacles(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_with_obstacles");
    group.sample_size(30);

    for &obstacles in &[0, 16, 64] {
        let mut flock = Flock::new(&seeded_config(1_000, true));
        if obstacles > 0 {
            let _ = flock.add_obstacle_ring(Vector::ZERO, 50.0, obstacles);
        }

        group.bench_with_input(
            BenchmarkId::new("obstacles", obstacles),
            &obstacles,
            |b, _| {
                b.iter(|| {
                    flock.step(black_box(1.0));
                });
            },
        );
    }

    group.finish();
}

fn bench_population_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("population_rebuild");
    let mut flock = Flock::new(&seeded_config(0, true));

    for &count in &[500, 1_500] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("agents", count), &count, |b, &count| {
            b.iter(|| {
                flock.set_agent_count(black_box(count));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_step_scaling,
    bench_step_with_obstacles,
    bench_population_rebuild
);
criterion_main!(benches);
