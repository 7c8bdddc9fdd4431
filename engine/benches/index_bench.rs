use std::io::Write;

use criterion::{criterion_group, criterion_main, Criterion};
use engine::tokenizer::{Tokenizer, WordTokenizer};
use engine::IndexStore;
use tempfile::NamedTempFile;

fn synthetic_corpus(docs: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..docs {
        writeln!(
            file,
            "Reference page {i} title words\u{3}The quick brown fox jumps over the lazy dog \
             while indexing weighted postings for page {i} in the document store\u{3}http://docs.example/{i}"
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "The engine folds repeated token occurrences into per-document weights \
                instead of repeated postings, so titles dominate body matches while \
                posting lists stay one entry per document.";
    c.bench_function("tokenize_paragraph", |b| {
        b.iter(|| WordTokenizer.tokenize(text))
    });
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus(500);
    c.bench_function("build_500_docs", |b| {
        b.iter(|| {
            let mut store = IndexStore::new();
            store.build_all(corpus.path()).unwrap()
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_build);
criterion_main!(benches);
