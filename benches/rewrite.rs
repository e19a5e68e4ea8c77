//! Benchmarks for the rewrite loop and the chunked index.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use splicer::interpreter::engine::{Engine, EngineConfig};
use splicer::memory::feed::Feed;
use splicer::memory::index::ChunkedIndex;
use splicer::memory::symbol::{parse_symbols, Symbol};

fn nat(mut n: usize) -> String {
    let mut out = String::new();
    while n > 0 {
        out.push(if n % 2 == 1 { 'C' } else { 'I' });
        n /= 2;
    }
    out.push('P');
    out
}

fn long_feed(len: usize) -> Vec<Symbol> {
    (0..len).map(|i| Symbol::ALL[(i * 7 + i / 5) % 4]).collect()
}

/// Deep skips into a 1M-symbol feed, each followed by a capture copied back.
///
/// This measures the cost of:
/// - index lookups far from the front
/// - building a replacement from a long capture
/// - rebuilding the index after a front splice
fn bench_deep_skip_rewrites(c: &mut Criterion) {
    let data = long_feed(1_000_000);
    let mut text = String::new();
    for i in 0..20 {
        // (![k]) ; [0^0]
        text.push_str(&format!("IIPIP{}IICIIC", nat(400_000 + i * 1_000)));
        text.push_str("IFPPIIC");
    }
    let mut symbols = parse_symbols(&text).unwrap_or_default();
    symbols.extend_from_slice(&data);

    c.bench_function("deep_skip_rewrites_20", |b| {
        b.iter(|| {
            let mut engine = Engine::new(
                black_box(&symbols),
                std::io::sink(),
                std::io::sink(),
                EngineConfig::default(),
            )
            .unwrap();
            let steps = engine.run_steps(20).unwrap();
            assert_eq!(steps, 20);
        });
    });
}

/// Cold lookups spread over a 1M-symbol feed.
fn bench_index_locate(c: &mut Criterion) {
    let feed = Feed::from_symbols(&long_feed(1_000_000));
    let offsets: Vec<usize> = (0..1_000).map(|i| (i * 7_919) % 1_000_000).collect();

    c.bench_function("index_locate_1k_cold", |b| {
        b.iter(|| {
            let mut index = ChunkedIndex::new(5_000, 2_000_000);
            for &offset in &offsets {
                black_box(index.locate(&feed, offset).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_deep_skip_rewrites, bench_index_locate);
criterion_main!(benches);
