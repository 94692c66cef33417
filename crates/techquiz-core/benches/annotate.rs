use criterion::{black_box, criterion_group, criterion_main, Criterion};

use techquiz_core::glossary::Glossary;

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");
    let glossary = Glossary::builtin();

    let short = "The server has a bug.";

    let scenario = "Alex is checking the dashboard while the developer is fixing a bug \
                    on the production server. The forklift sensor in the warehouse is \
                    reporting a hazard, so maintenance is reviewing the supply chain \
                    workflow and the firewall logs.";

    let no_terms = "Laura arrived at the office at nine and didn't have coffee because \
                    the team was having a meeting about next week's schedule.";

    let long: String = std::iter::repeat(scenario).take(50).collect::<Vec<_>>().join(" ");

    group.bench_function("short", |b| b.iter(|| glossary.annotate(black_box(short))));
    group.bench_function("scenario", |b| {
        b.iter(|| glossary.annotate(black_box(scenario)))
    });
    group.bench_function("no_terms", |b| {
        b.iter(|| glossary.annotate(black_box(no_terms)))
    });
    group.bench_function("long", |b| {
        b.iter(|| glossary.annotate(black_box(long.as_str())))
    });

    group.finish();
}

criterion_group!(benches, bench_annotate);
criterion_main!(benches);
