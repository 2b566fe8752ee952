//! Benchmarks for sentence splitting and document parsing.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use segmark::{Origin, Parser, SentenceSplitter, SequentialIds};

fn sample_paragraph(i: usize) -> &'static str {
    const PARAGRAPHS: [&str; 4] = [
        "It was dark. {Trời tối.} Mr. Lee waited by the door. {Ông Lee đợi bên cửa.}",
        "\"Who is there?\" he asked. {\"Ai đó?\" ông hỏi.}",
        "The price was $99.99, which seemed fair. {Giá là 99,99 đô, có vẻ hợp lý.}",
        "Nobody answered... The rain kept falling. {Không ai trả lời... Mưa vẫn rơi.}",
    ];
    PARAGRAPHS[i % PARAGRAPHS.len()]
}

fn sample_document(size: usize) -> String {
    let mut doc = String::from("# The Lost Key / Chìa Khóa Bị Mất\n\n");
    let mut i = 0;
    while doc.len() < size {
        if i % 20 == 0 {
            doc.push_str(&format!("## Chapter {} / Chương {}\n", i / 20 + 1, i / 20 + 1));
        }
        doc.push_str(sample_paragraph(i));
        doc.push_str("\n\n");
        i += 1;
    }
    doc
}

fn bench_sentence_splitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentence_splitter");
    let splitter = SentenceSplitter::new();

    for size in [1_000, 10_000, 100_000] {
        let text = sample_document(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("split", size), &text, |b, text| {
            b.iter(|| splitter.split(black_box(text)));
        });
    }

    group.finish();
}

fn bench_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");
    let parser = Parser::new(Arc::new(SequentialIds::new("b")));

    for descriptor in ["en", "en-vi", "en-vi-ph"] {
        let origin: Origin = descriptor.parse().unwrap();
        for size in [10_000, 100_000] {
            let text = sample_document(size);
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(descriptor, size), &text, |b, text| {
                b.iter(|| parser.parse_document(black_box(text), &origin));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_sentence_splitter, bench_parse_document);
criterion_main!(benches);
