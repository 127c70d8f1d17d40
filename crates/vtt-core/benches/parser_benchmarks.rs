//! Benchmarks for WebVTT parsing
//!
//! Generates synthetic documents programmatically so the benchmarks need no
//! fixture files. Cue payload complexity is varied separately from document
//! size to isolate the cost of the cue-text tokenizer.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write;
use vtt_core::{parser::parse_timestamp, ParseMode, ParserConfig, WebVttParser};

/// Payload complexity levels
#[derive(Debug, Clone, Copy)]
enum Complexity {
    /// Plain text only
    Plain,
    /// Classes, voices and escapes
    Markup,
    /// Nested markup with in-cue timestamps
    Karaoke,
}

/// Build a document with `cues` cues of the given payload complexity
fn generate_document(cues: usize, complexity: Complexity) -> String {
    let mut doc = String::from("WEBVTT\n\nNOTE generated for benchmarking\n\n");

    for i in 0..cues {
        let start = i * 2_000;
        let end = start + 1_500;
        let _ = writeln!(doc, "{}", i + 1);
        let _ = writeln!(
            doc,
            "{} --> {} position:50%,center align:start size:80% line:-1",
            format_ms(start),
            format_ms(end)
        );
        match complexity {
            Complexity::Plain => {
                let _ = writeln!(doc, "Line number {i} of the benchmark document");
            }
            Complexity::Markup => {
                let _ = writeln!(
                    doc,
                    "<v Speaker {i}><c.yellow.bg_blue>Hello</c> &amp; <i>welcome</i> &lt;{i}&gt;</v>"
                );
            }
            Complexity::Karaoke => {
                let _ = writeln!(
                    doc,
                    "<c.k>One</c> <{}><b>two</b> <{}><ruby>三<rt>san</rt></ruby>",
                    format_ms(start + 500),
                    format_ms(start + 1_000)
                );
            }
        }
        doc.push('\n');
    }

    doc
}

fn format_ms(ms: usize) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        (ms / 60_000) % 60,
        (ms / 1_000) % 60,
        ms % 1_000
    )
}

fn bench_document_sizes(c: &mut Criterion) {
    let parser = WebVttParser::new();
    let mut group = c.benchmark_group("document_size");

    for cues in [10, 100, 1_000] {
        let doc = generate_document(cues, Complexity::Plain);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cues), &doc, |b, doc| {
            b.iter(|| parser.parse(black_box(doc)));
        });
    }

    group.finish();
}

fn bench_payload_complexity(c: &mut Criterion) {
    let parser = WebVttParser::new();
    let mut group = c.benchmark_group("payload_complexity");

    for complexity in [Complexity::Plain, Complexity::Markup, Complexity::Karaoke] {
        let doc = generate_document(200, complexity);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{complexity:?}")),
            &doc,
            |b, doc| b.iter(|| parser.parse(black_box(doc))),
        );
    }

    group.finish();
}

fn bench_metadata_mode(c: &mut Criterion) {
    let parser = WebVttParser::with_config(ParserConfig::new().with_mode(ParseMode::Metadata));
    let doc = generate_document(200, Complexity::Markup);
    c.bench_function("metadata_mode_200_cues", |b| {
        b.iter(|| parser.parse(black_box(&doc)));
    });
}

fn bench_timestamps(c: &mut Criterion) {
    c.bench_function("parse_timestamp", |b| {
        b.iter(|| parse_timestamp(black_box("01:23:45.678")));
    });
}

criterion_group!(
    benches,
    bench_document_sizes,
    bench_payload_complexity,
    bench_metadata_mode,
    bench_timestamps
);
criterion_main!(benches);
