use criterion::{black_box, criterion_group, criterion_main, Criterion};
use junction_lanes::{
    assign_lanes,
    config::JunctionLanesConfig,
    network::RoadNetwork,
    Handedness, LaneConnector, LaneDirectionCounts,
};

fn benchmark_network_update(c: &mut Criterion) {
    let config = JunctionLanesConfig::load_from_files("network.toml", "settings.toml")
        .expect("Failed to load configuration");

    let connector = LaneConnector::new(config.settings);
    let mut network = RoadNetwork::from_config(&config.network);

    c.bench_function("network_update_all", |b| {
        b.iter(|| {
            network.update_all(black_box(&connector)).unwrap();
        })
    });
}

fn benchmark_candidate_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_search");

    // 8 incoming lanes, the number of candidates peaks at C(8, 4)
    for outgoing in [11, 12, 13, 15].iter() {
        let counts = LaneDirectionCounts::new(0, outgoing / 4, outgoing - outgoing / 2, outgoing / 2 - outgoing / 4, 0);

        for traffic in [Handedness::RightHand, Handedness::LeftHand] {
            group.bench_with_input(
                format!("8_in_{}_out_{:?}", outgoing, traffic),
                outgoing,
                |b, _outgoing| {
                    b.iter(|| assign_lanes(black_box(8), black_box(&counts), traffic));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_candidate_search, benchmark_network_update);
criterion_main!(benches);
