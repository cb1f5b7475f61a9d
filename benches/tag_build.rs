use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mp3tags::id3::header::DEFAULT_HEADER_PREFIX;
use mp3tags::id3::{id3v1, writer};
use mp3tags::{rewrite_data, Encoding, FrameId, FrameMap, WriteOptions};

fn frames() -> FrameMap {
    let mut frames = FrameMap::new();
    frames.insert(FrameId::Title, "Night Rehearsal");
    frames.insert(FrameId::Artist, "Ana Ruiz");
    frames.insert(FrameId::Band, "The Late Set");
    frames.insert(FrameId::Album, "Studio B Sessions");
    frames.insert(FrameId::Genre, "Jazz");
    frames.insert(FrameId::Track, "2/11");
    frames.insert(FrameId::Year, "2024");
    frames
}

fn bench_tags(c: &mut Criterion) {
    let frames = frames();

    let mut group = c.benchmark_group("build");
    group.bench_function("v2", |b| {
        b.iter(|| {
            writer::build_v2_tag(DEFAULT_HEADER_PREFIX, black_box(&frames), 1024, Encoding::Latin1).unwrap()
        })
    });
    group.bench_function("v1", |b| b.iter(|| id3v1::make_id3v1(black_box(&frames), "")));
    group.finish();

    // ~5 MB of fake audio between an old tag and a trailer.
    let mut file = vec![b'I', b'D', b'3', 3, 0, 0, 0, 0, 4, 0];
    file.resize(10 + 512, 0);
    file.extend(std::iter::repeat(0xAAu8).take(5 << 20));
    file.extend_from_slice(&id3v1::make_id3v1(&frames, ""));

    let opts = WriteOptions::default();
    c.bench_function("rewrite_5mb", |b| {
        b.iter(|| rewrite_data(black_box(&file), &frames, &opts).unwrap())
    });
}

criterion_group!(benches, bench_tags);
criterion_main!(benches);
