use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jpack_codec::{JsonToTlv, Limits, TlvToJson};
use jpack_test_utils::TestDataGenerator;
use std::io::Cursor;

fn ndjson(count: usize) -> Vec<u8> {
    let mut input = TestDataGenerator::large_record_set(count).join("\n");
    input.push('\n');
    input.into_bytes()
}

fn encode(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    JsonToTlv::new(Limits::default())
        .run(Cursor::new(input), &mut output)
        .unwrap();
    output
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for count in [100, 1000, 10000] {
        let input = ndjson(count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| black_box(encode(black_box(input))));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for count in [100, 1000, 10000] {
        let encoded = encode(&ndjson(count));
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &encoded, |b, encoded| {
            b.iter(|| {
                let mut output = Vec::new();
                TlvToJson::new(Limits::default())
                    .run(Cursor::new(black_box(encoded.as_slice())), &mut output)
                    .unwrap();
                black_box(output)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
