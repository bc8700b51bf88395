//! Benchmarks for data file parsing and rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use boardedit::block::Block;
use boardedit::records::{Contestant, Slide};

fn bench_parse_leaderboard(c: &mut Criterion) {
    let text = include_str!("../tests/fixtures/leaderboard-data.ts");
    c.bench_function("parse_leaderboard", |b| {
        b.iter(|| Block::<Contestant>::parse(black_box(text)).unwrap())
    });
}

fn bench_parse_slideshow(c: &mut Criterion) {
    let text = include_str!("../tests/fixtures/ImageSlideshow.tsx");
    c.bench_function("parse_slideshow", |b| {
        b.iter(|| Block::<Slide>::parse(black_box(text)).unwrap())
    });
}

fn bench_render_large_leaderboard(c: &mut Criterion) {
    let records = (0..500u64)
        .map(|i| Contestant::new(format!("Contestant {i}"), i % 97, i * 25, "https://cdn.example.com/p.png"))
        .collect();
    let block = Block::from_records("export const leaderboardData = [", records);
    c.bench_function("render_leaderboard_500", |b| {
        b.iter(|| black_box(&block).render())
    });
}

criterion_group!(
    benches,
    bench_parse_leaderboard,
    bench_parse_slideshow,
    bench_render_large_leaderboard
);
criterion_main!(benches);
