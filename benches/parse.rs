use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mp3tag::{load_tag_from_data, DecodeMode, KnownFrame, Syncsafe, TagView, ViewOptions};

/// Synthetic file: the six recognized frames, a batch of private frames,
/// padding, then some fake audio.
fn sample_file(extra_frames: usize) -> Vec<u8> {
    let mut body = Vec::new();
    let mut push = |id: &[u8; 4], payload: &[u8]| {
        body.extend_from_slice(id);
        body.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(payload);
    };
    push(b"TIT2", b"\x00A fairly ordinary song title");
    push(b"TPE1", &[0x01, 0xFF, 0xFE, b'B', 0, b'a', 0, b'n', 0, b'd', 0]);
    push(b"TALB", b"\x00Album");
    push(b"TYER", b"\x002024");
    push(b"TCON", b"\x00(17)Rock");
    push(b"COMM", b"\x00engdesc\x00A longer comment body");
    let blob = vec![0x5Au8; 512];
    for _ in 0..extra_frames {
        push(b"PRIV", &blob);
    }
    body.extend(std::iter::repeat(0u8).take(2048));

    let mut data = b"ID3\x03\x00\x00".to_vec();
    data.extend_from_slice(&Syncsafe::encode(body.len() as u32).unwrap());
    data.extend_from_slice(&body);
    data.extend(std::iter::repeat(0xFFu8).take(4096));
    data
}

fn bench_parse(c: &mut Criterion) {
    let small = sample_file(0);
    let large = sample_file(200);

    let mut group = c.benchmark_group("parse");
    group.bench_function("small", |b| {
        b.iter(|| load_tag_from_data(black_box(&small)).unwrap())
    });
    group.bench_function("large", |b| {
        b.iter(|| load_tag_from_data(black_box(&large)).unwrap())
    });
    group.finish();

    let tag = load_tag_from_data(&small).unwrap();
    let mut group = c.benchmark_group("decode");
    for (name, mode) in [("legacy", DecodeMode::Legacy), ("unicode", DecodeMode::Unicode)] {
        group.bench_function(name, |b| {
            b.iter(|| TagView::from_tag(black_box(&tag), ViewOptions { mode }))
        });
    }
    group.bench_function("comment_only", |b| {
        b.iter(|| tag.value(KnownFrame::Comment, DecodeMode::Legacy))
    });
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
