use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crossing_sim::{
    config::SimulationConfig,
    policy::Policy,
    simulation::{Episode, Point, RadarArray, RasterMap, TrafficManager, Vehicle, VehicleId},
};

fn benchmark_traffic_step(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let mut traffic = TrafficManager::new(&config.intersection, config.vehicle.size, Some(42))
        .expect("Failed to build traffic manager");

    // Let background traffic build up before measuring
    for _ in 0..300 {
        traffic.update_spawning();
        traffic.step();
    }

    c.bench_function("traffic_step", |b| {
        b.iter(|| {
            traffic.update_spawning();
            black_box(traffic.step());
        })
    });
}

fn benchmark_episode_run(c: &mut Criterion) {
    let mut config = SimulationConfig::default();
    config.episode.seed = Some(42);
    config.episode.max_ticks = 600;
    let map = RasterMap::open(config.episode.width, config.episode.height)
        .expect("Failed to build map");

    c.bench_function("episode_run_600_ticks", |b| {
        b.iter(|| {
            let mut episode = Episode::new(config.clone(), map.clone()).unwrap();
            let mut policy = Policy::new_gap_follow(0.6);
            black_box(episode.run(&mut policy).unwrap());
        })
    });
}

fn benchmark_radar_scaling(c: &mut Criterion) {
    let map = RasterMap::open(683, 384).expect("Failed to build map");
    let mut group = c.benchmark_group("radar_scaling");

    for ray_count in [6usize, 12, 24].iter() {
        for range in [50.0f32, 100.0].iter() {
            let radar = RadarArray::new(*ray_count, *range);
            let vehicle = Vehicle::new(VehicleId(0), Point::new(340.0, 190.0), 30.0, *ray_count);

            group.bench_with_input(
                format!("{}_rays_{}_range", ray_count, range),
                ray_count,
                |b, _ray_count| {
                    b.iter(|| radar.scan(black_box(&vehicle), &map, &[]));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_traffic_step,
    benchmark_episode_run,
    benchmark_radar_scaling
);
criterion_main!(benches);
