use criterion::{black_box, criterion_group, criterion_main, Criterion};
use semver_lax::{max_satisfying, Range, Version};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("version parser", |b| {
        b.iter(|| {
            let _v = Version::parse(black_box("1.2.3-rc.4"));
        })
    });

    c.bench_function("range", |b| {
        b.iter(|| {
            let range = Range::parse(black_box(">=1.2.3-rc.4"));
            let version = Version::parse(black_box("1.2.3"));

            let _r = range.satisfies(black_box(&version));
        })
    });

    c.bench_function("max satisfying", |b| {
        let versions: Vec<_> = ["1.2.3", "1.2.4", "1.2.5", "1.2.6"]
            .iter()
            .map(Version::parse)
            .collect();
        let range = Range::parse("~>1.2.3");

        b.iter(|| {
            let _v = max_satisfying(black_box(&versions), black_box(&range));
        })
    });
}

criterion_group!(bench, criterion_benchmark);
criterion_main!(bench);
