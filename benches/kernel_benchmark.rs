use criterion::{Criterion, black_box, criterion_group, criterion_main};
use epiclock::kernel::estimate_age;
use epiclock::types::{BetaPanel, ClockModel, HORVATH_CPG_COUNT};
use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_panel() -> BetaPanel {
    let mut rng = StdRng::seed_from_u64(0x5EED_BE7A);
    let values = (0..HORVATH_CPG_COUNT).map(|_| rng.sample(Standard)).collect();
    BetaPanel::from_values(values).expect("panel length is fixed")
}

fn benchmark_estimate(c: &mut Criterion) {
    let panel = random_panel();

    let mut group = c.benchmark_group("estimate_age");
    group.bench_function("mean_seeded", |b| {
        b.iter(|| {
            let estimate = estimate_age(ClockModel::MeanSeeded, black_box(&panel));
            black_box(estimate);
        });
    });
    group.bench_function("key_sites", |b| {
        b.iter(|| {
            let estimate = estimate_age(ClockModel::KeySites, black_box(&panel));
            black_box(estimate);
        });
    });
    group.finish();
}

criterion_group!(estimate, benchmark_estimate);
criterion_main!(estimate);
