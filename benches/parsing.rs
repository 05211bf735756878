//! Benchmark of the message-parsing pipeline.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::tempdir;

use threema2html::index::FileIndex;
use threema2html::parser::ArchiveParser;

fn synthetic_archive(messages: usize) -> String {
    let mut out = String::new();
    for i in 0..messages {
        let sender = if i % 2 == 0 { "Me" } else { "Alice Muster" };
        out.push_str(&format!(
            "[2024-01-{:02}, 10:{:02}] {sender}: Message *number* {i} with a <file{i}.jpg> link\n",
            i % 28 + 1,
            i % 60,
        ));
        if i % 5 == 0 {
            out.push_str("a continuation line with _italics_ in it\n");
        }
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let index = FileIndex::build(dir.path()).unwrap();
    let parser = ArchiveParser::new();
    let input = synthetic_archive(1000);

    c.bench_function("parse_1000_messages", |b| {
        b.iter(|| parser.parse_str(black_box(&input), &index).unwrap());
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
