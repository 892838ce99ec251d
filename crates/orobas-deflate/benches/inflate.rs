//! Decompression throughput benchmarks.

use std::io::Write;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};

use orobas_deflate::decompress;

fn reference_deflate(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Text-like data with realistic match structure.
fn sample_text(len: usize) -> Vec<u8> {
    let phrase = b"the quick brown fox jumps over the lazy dog \
                   while the five boxing wizards jump quickly ";
    phrase.iter().cycle().copied().take(len).collect()
}

/// Data with no exploitable redundancy.
fn sample_noise(len: usize) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x0B0B_A5D0);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for (name, data) in [
        ("text", sample_text(1 << 16)),
        ("noise", sample_noise(1 << 16)),
        ("zeros", vec![0u8; 1 << 16]),
    ] {
        let compressed = reference_deflate(&data, 6);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &compressed,
            |b, compressed| {
                let mut dst = vec![0u8; data.len()];
                b.iter(|| decompress(compressed, &mut dst).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_table_construction(c: &mut Criterion) {
    use orobas_huffman::{SymbolRange, Table};

    c.bench_function("fixed_literal_table", |b| {
        b.iter(|| {
            let table: Table<u16, 288> = Table::from_bitsizes([
                (SymbolRange::new(0, 143), 8),
                (SymbolRange::new(144, 255), 9),
                (SymbolRange::new(256, 279), 7),
                (SymbolRange::new(280, 287), 8),
            ])
            .unwrap();
            table
        });
    });
}

criterion_group!(benches, bench_decompress, bench_table_construction);
criterion_main!(benches);
