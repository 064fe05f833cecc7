use blocklz::hash::config::{FAST, HIGH};
use blocklz::hash::matching::MatchEngine;
use blocklz::{Encoder, Level, decode, decode_to_buf, encode};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::fs;
use std::path::Path;

const LEVELS: [Level; 2] = [Level::Fast, Level::High];

fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    let mut s = seed;
    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        out.push((s >> 33) as u8);
    }
    out
}

/// Text-like data: random picks from a small vocabulary.
fn gen_text(size: usize, seed: u64) -> Vec<u8> {
    const WORDS: [&[u8]; 12] = [
        b"the ", b"quick ", b"brown ", b"fox ", b"jumps ", b"over ", b"lazy ", b"dog ",
        b"and ", b"runs ", b"away ", b"again\n",
    ];
    let mut s = seed;
    let mut out = Vec::with_capacity(size + 8);
    while out.len() < size {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        out.extend_from_slice(WORDS[(s >> 33) as usize % WORDS.len()]);
    }
    out.truncate(size);
    out
}

fn write_ratio_snapshot() {
    let inputs = [
        ("random", gen_data(1024 * 1024, 123)),
        ("text", gen_text(1024 * 1024, 123)),
        ("zeros", vec![0u8; 1024 * 1024]),
    ];
    let mut csv = String::from("input,level,encoded_bytes,input_bytes,ratio\n");
    for (name, input) in &inputs {
        for level in LEVELS {
            let packed = encode(input, level).unwrap();
            let ratio = packed.len() as f64 / input.len() as f64;
            csv.push_str(&format!(
                "{name},{level},{},{},{}\n",
                packed.len(),
                input.len(),
                ratio
            ));
        }
    }
    let out_dir = Path::new("target/criterion/custom_reports");
    let _ = fs::create_dir_all(out_dir);
    let _ = fs::write(out_dir.join("ratio_snapshot.csv"), csv);
}

fn bench_encoding_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("encoding_speed_mb_s");
    for size in [64 * 1024usize, 1024 * 1024, 8 * 1024 * 1024] {
        let input = gen_text(size, 1);
        g.throughput(Throughput::Bytes(size as u64));
        for level in LEVELS {
            g.bench_with_input(BenchmarkId::new(level.name(), size), &size, |b, _| {
                b.iter(|| {
                    let packed = encode(black_box(&input), level).unwrap();
                    black_box(packed);
                });
            });
        }
    }
    g.finish();
}

fn bench_decoding_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("decoding_speed_mb_s");
    for size in [64 * 1024usize, 1024 * 1024, 8 * 1024 * 1024] {
        let input = gen_text(size, 2);
        let packed = encode(&input, Level::High).unwrap();
        g.throughput(Throughput::Bytes(size as u64));
        g.bench_with_input(BenchmarkId::new("vec", size), &size, |b, _| {
            b.iter(|| {
                let out = decode(black_box(&packed), Some(size)).unwrap();
                black_box(out);
            });
        });
        let mut buf = vec![0u8; size];
        g.bench_with_input(BenchmarkId::new("slice", size), &size, |b, _| {
            b.iter(|| {
                let n = decode_to_buf(black_box(&packed), &mut buf).unwrap();
                black_box(n);
            });
        });
    }
    g.finish();
}

fn bench_ratio_vs_level(c: &mut Criterion) {
    write_ratio_snapshot();
    let mut g = c.benchmark_group("compression_ratio_vs_level");
    let input = gen_text(2 * 1024 * 1024, 3);
    for level in LEVELS {
        g.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, level| {
            b.iter(|| {
                let packed = encode(&input, *level).unwrap();
                let ratio = packed.len() as f64 / input.len() as f64;
                black_box(ratio);
            });
        });
    }
    g.finish();
}

fn bench_match_engine(c: &mut Criterion) {
    let mut g = c.benchmark_group("match_engine_tokens");
    let input = gen_text(1024 * 1024, 4);
    g.throughput(Throughput::Bytes(input.len() as u64));
    for config in [FAST, HIGH] {
        let mut engine = MatchEngine::new(config);
        g.bench_function(config.name, |b| {
            b.iter(|| {
                let mut tokens = 0usize;
                let stats = engine
                    .tokenize(black_box(&input), |_| {
                        tokens += 1;
                        Ok(())
                    })
                    .unwrap();
                black_box((tokens, stats));
            });
        });
    }
    g.finish();
}

fn bench_small_blocks(c: &mut Criterion) {
    // Many small blocks: table reuse versus a fresh table per call.
    let mut g = c.benchmark_group("small_blocks_4k");
    let blocks: Vec<Vec<u8>> = (0..256).map(|i| gen_text(4096, i)).collect();
    g.throughput(Throughput::Bytes((blocks.len() * 4096) as u64));
    for level in LEVELS {
        g.bench_function(BenchmarkId::new("fresh", level), |b| {
            b.iter(|| {
                for block in &blocks {
                    black_box(encode(block, level).unwrap());
                }
            });
        });
        let mut enc = Encoder::new();
        g.bench_function(BenchmarkId::new("reused", level), |b| {
            b.iter(|| {
                for block in &blocks {
                    black_box(enc.encode(block, level).unwrap());
                }
            });
        });
    }
    g.finish();
}

fn bench_real_world_scenarios(c: &mut Criterion) {
    let mut g = c.benchmark_group("real_world_scenarios");
    let scenarios = [
        ("log_text", gen_text(4 * 1024 * 1024, 5)),
        ("sparse_zeros", {
            let mut v = vec![0u8; 4 * 1024 * 1024];
            for i in (0..v.len()).step_by(4096) {
                v[i] = (i >> 12) as u8;
            }
            v
        }),
        ("incompressible", gen_data(2 * 1024 * 1024, 6)),
    ];

    for (name, input) in &scenarios {
        g.throughput(Throughput::Bytes(input.len() as u64));
        g.bench_function(*name, |b| {
            b.iter(|| {
                let level = Level::auto_for(input.len());
                let packed = encode(input, level).unwrap();
                let out = decode(&packed, Some(input.len())).unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_encoding_speed,
    bench_decoding_speed,
    bench_ratio_vs_level,
    bench_match_engine,
    bench_small_blocks,
    bench_real_world_scenarios
);
criterion_main!(benches);
