use criterion::{Criterion, black_box, criterion_group, criterion_main};

use solummaa::grammar::Grammar;
use solummaa::parser::parse_report;
use solummaa::records::flatten_summary;
use solummaa::resolve_version;
use solummaa::summary::{BuildOptions, build_summary};

fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {}", path, e))
}

fn bench_stages(c: &mut Criterion, name: &str) {
    let text = load_fixture(name);
    let version = resolve_version(name).expect("fixture version");
    let grammar = Grammar::builtin(&version).expect("shipped grammar");
    let options = BuildOptions::default();

    c.bench_function(&format!("parse_{}", name), |b| {
        b.iter(|| {
            let raw = parse_report(black_box(&text), &grammar);
            black_box(raw)
        })
    });

    let raw = parse_report(&text, &grammar);
    c.bench_function(&format!("summary_{}", name), |b| {
        b.iter(|| {
            let summary = build_summary(black_box(&raw), &version, &options).expect("summary");
            black_box(summary.info.total_pile)
        })
    });

    let summary = build_summary(&raw, &version, &options).expect("summary");
    c.bench_function(&format!("flatten_{}", name), |b| {
        b.iter(|| {
            let records = flatten_summary(black_box(&summary)).expect("records");
            black_box(records.len())
        })
    });
}

fn bench_pipeline(c: &mut Criterion) {
    bench_stages(c, "pier4.gp12t");
    bench_stages(c, "abutment.gp8t");

    // Grammar compilation happens once per document
    c.bench_function("compile_grammar_v12", |b| {
        let version = resolve_version("x.gp12t").expect("version");
        b.iter(|| black_box(Grammar::builtin(&version).expect("shipped grammar")))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
