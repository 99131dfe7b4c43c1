use criterion::{criterion_group, criterion_main, Criterion};

use morfessor::{AlgorithmMode, Corpus, Trainer, Word};

fn synthetic_corpus() -> Corpus {
    let prefixes = ["re", "un", "over", "out", "pre"];
    let stems = ["open", "load", "play", "work", "turn", "look"];
    let suffixes = ["", "s", "ing", "ed"];

    let mut words = vec![];
    for (i, prefix) in prefixes.iter().enumerate() {
        for (j, stem) in stems.iter().enumerate() {
            for (k, suffix) in suffixes.iter().enumerate() {
                let frequency = 1 + (i + j + k) % 5;
                words.push(Word::new(format!("{prefix}{stem}{suffix}"), frequency));
            }
        }
    }
    Corpus::from_words(words)
}

fn bench_train(c: &mut Criterion) {
    let corpus = synthetic_corpus();

    c.bench_function("train/baseline", |b| {
        b.iter(|| {
            Trainer::new(AlgorithmMode::Baseline)
                .seed(42)
                .train(&corpus)
                .unwrap()
        });
    });

    c.bench_function("train/baseline-freq-length", |b| {
        b.iter(|| {
            Trainer::new(AlgorithmMode::BaselineFreqLength)
                .seed(42)
                .train(&corpus)
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_train);
criterion_main!(benches);
