use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jdl_benches::available_corpora;
use jdl_core::RenderConfig;

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    for corpus in available_corpora() {
        let dataset = corpus.load().expect("failed to load dataset");
        group.throughput(Throughput::Bytes(corpus.fixture_bytes() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(corpus.name()),
            &dataset,
            |b, dataset| {
                b.iter(|| {
                    let diff = dataset.compare();
                    black_box(diff);
                });
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let config = RenderConfig::default();

    {
        let mut text = c.benchmark_group("render-text");
        for corpus in available_corpora() {
            let dataset = corpus.load().expect("failed to load dataset");
            let diff = dataset.compare();
            text.throughput(Throughput::Elements(diff.len() as u64));
            text.bench_function(corpus.name(), move |b| {
                b.iter(|| {
                    let rendered = diff.render(&config);
                    black_box(rendered);
                });
            });
        }
        text.finish();
    }

    {
        let mut json = c.benchmark_group("render-json");
        for corpus in available_corpora() {
            let dataset = corpus.load().expect("failed to load dataset");
            let diff = dataset.compare();
            json.throughput(Throughput::Elements(diff.len() as u64));
            json.bench_function(corpus.name(), move |b| {
                b.iter(|| {
                    let rendered = diff.render_json().expect("json records");
                    black_box(rendered);
                });
            });
        }
        json.finish();
    }
}

criterion_group!(benches, bench_compare, bench_render);
criterion_main!(benches);
