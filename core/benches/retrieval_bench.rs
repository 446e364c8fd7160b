use criterion::{criterion_group, criterion_main, Criterion};
use searchlite_core::{
    build_query_vector, retrieve, Analyzer, Document, InvertedIndex, MemoryCorpus,
    DEFAULT_MAX_PHRASES,
};

fn synthetic_corpus(docs: usize) -> MemoryCorpus {
    let analyzer = Analyzer::new(false);
    let words = [
        "solar", "panel", "battery", "water", "storage", "pump", "garden", "soil", "compost",
        "harvest", "winter", "shelter", "firewood", "stove", "tool", "repair",
    ];
    let documents = (0..docs)
        .map(|i| {
            let body: Vec<&str> = (0..120).map(|j| words[(i * 7 + j * 3) % words.len()]).collect();
            Document::new(format!("doc{i}"), analyzer.tokenize(&body.join(" ")))
        })
        .collect();
    MemoryCorpus::new(documents)
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus(200);
    c.bench_function("build_200_docs", |b| {
        b.iter(|| {
            let mut index = InvertedIndex::new();
            index.build(&corpus, DEFAULT_MAX_PHRASES).unwrap();
            index
        })
    });
}

fn bench_retrieve(c: &mut Criterion) {
    let mut index = InvertedIndex::new();
    index
        .build(&synthetic_corpus(200), DEFAULT_MAX_PHRASES)
        .unwrap();
    let (_, single) = build_query_vector("battery", Analyzer::new(false));
    let (_, phrase) = build_query_vector("water storage", Analyzer::new(false));
    c.bench_function("retrieve_single", |b| {
        b.iter(|| retrieve(&index, &single).unwrap())
    });
    c.bench_function("retrieve_phrase", |b| {
        b.iter(|| retrieve(&index, &phrase).unwrap())
    });
}

criterion_group!(benches, bench_build, bench_retrieve);
criterion_main!(benches);
