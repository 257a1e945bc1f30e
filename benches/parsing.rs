//! Benchmarks for chatpulse parsing and analysis.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- analyze`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatpulse::core::output::to_csv;
use chatpulse::core::{FilterConfig, apply_filters};
use chatpulse::parser::{ExportFormat, detect_format_in};
use chatpulse::parsers::ChatParser;
use chatpulse::session::Session;
use chatpulse::tokenizer::tokenize;

// =============================================================================
// Test Data Generators
// =============================================================================

const SENDERS: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

/// Legacy export spread over a year, with a continuation line every 7th message.
fn generate_legacy_txt(count: usize) -> String {
    let mut out = String::with_capacity(count * 48);
    for i in 0..count {
        let day = i % 28 + 1;
        let month = (i / 28) % 12 + 1;
        let sender = SENDERS[i % SENDERS.len()];
        out.push_str(&format!(
            "{:02}/{:02}/2021, {:02}:{:02} - {}: message number {} 😀\n",
            day,
            month,
            i % 24,
            i % 60,
            sender,
            i
        ));
        if i % 7 == 0 {
            out.push_str("and a second line\n");
        }
    }
    out
}

fn generate_bracketed_txt(count: usize) -> String {
    let mut out = String::with_capacity(count * 48);
    for i in 0..count {
        let sender = SENDERS[i % SENDERS.len()];
        out.push_str(&format!(
            "[{}/{}/21, {:02}:{:02}:{:02}] {}: message number {}\n",
            i % 28 + 1,
            (i / 28) % 12 + 1,
            i % 24,
            i % 60,
            i % 60,
            sender,
            i
        ));
    }
    out
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_detect_format(c: &mut Criterion) {
    let legacy = generate_legacy_txt(100);
    let bracketed = generate_bracketed_txt(100);

    c.bench_function("detect_format_legacy", |b| {
        b.iter(|| black_box(detect_format_in(black_box(&legacy))));
    });
    c.bench_function("detect_format_bracketed", |b| {
        b.iter(|| black_box(detect_format_in(black_box(&bracketed))));
    });
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_legacy_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| black_box(tokenize(black_box(txt), ExportFormat::Legacy)));
        });
    }
    group.finish();
}

fn bench_legacy_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("legacy_parsing");
    let parser = ChatParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_legacy_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let export = parser.parse_str(black_box(txt)).unwrap();
                black_box(export)
            });
        });
    }
    group.finish();
}

fn bench_bracketed_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bracketed_parsing");
    let parser = ChatParser::new();

    for size in [1_000_usize, 10_000] {
        let txt = generate_bracketed_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let export = parser.parse_str(black_box(txt)).unwrap();
                black_box(export)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Analysis Benchmarks
// =============================================================================

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let filter = FilterConfig::new()
        .with_date_from("2021-03-01")
        .unwrap()
        .with_date_to("2021-09-30")
        .unwrap()
        .with_senders(["Alice", "Carol"]);

    for size in [1_000_usize, 10_000, 50_000] {
        let records = ChatParser::new()
            .parse_str(&generate_legacy_txt(size))
            .unwrap()
            .records;
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(apply_filters(black_box(records), &filter)));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let filter = FilterConfig::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let mut session = Session::default();
        session.load_str(&generate_legacy_txt(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &session, |b, session| {
            b.iter(|| black_box(session.analyze(black_box(&filter)).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for size in [1_000_usize, 10_000] {
        let txt = generate_legacy_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                // Full pipeline: load -> analyze -> export table
                let mut session = Session::default();
                session.load_str(black_box(txt)).unwrap();
                let analysis = session.analyze(&FilterConfig::new()).unwrap();
                let csv = to_csv(session.records()).unwrap();
                black_box((analysis, csv))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_detect_format,
    bench_tokenize,
    bench_legacy_parsing,
    bench_bracketed_parsing,
    bench_filter,
    bench_analyze,
    bench_full_pipeline,
);

criterion_main!(benches);
