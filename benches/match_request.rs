//! Match request benchmark suite.
//!
//! Benchmarks packaging a checkpoint attempt at different image sizes:
//! - PNG encoding of the captured screenshot
//! - Metadata serialization and binary framing
//! - Parsing a framed body back
//!
//! Run with: cargo bench --bench match_request
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use visual_checkpoint::checkpoint::ImageMatchSettings;
use visual_checkpoint::geometry::{FloatingBounds, FloatingRegion};
use visual_checkpoint::protocol::{AppOutput, FramedBody, MatchData, MatchRequest};
use visual_checkpoint::{MatchLevel, Region, Screenshot};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const VIEWPORTS: &[(u32, u32)] = &[(800, 600), (1280, 800), (1920, 1080)];
const REGION_COUNTS: &[usize] = &[0, 10, 100];

// ============================================================================
// Helpers
// ============================================================================

fn screenshot(width: u32, height: u32) -> Screenshot {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    Screenshot::new(image)
}

fn match_data(regions: usize) -> MatchData {
    let ignore = (0..regions)
        .map(|i| Region::new(i as i32 * 10, 0, 10, 10))
        .collect();
    let floating = (0..regions)
        .map(|i| FloatingRegion {
            region: Region::new(0, i as i32 * 10, 10, 10),
            bounds: FloatingBounds::uniform(5),
        })
        .collect();

    MatchData::new("benchmark", AppOutput::new("Benchmark Page"), true)
        .with_match_settings(&ImageMatchSettings::new(MatchLevel::Strict), false)
        .with_regions(ignore, floating)
}

// ============================================================================
// Benchmark: PNG Encoding
// ============================================================================

fn bench_png_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encode");
    group.sample_size(20);

    for &(width, height) in VIEWPORTS {
        let shot = screenshot(width, height);
        group.throughput(Throughput::Elements(u64::from(width * height)));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &shot,
            |b, shot| b.iter(|| black_box(shot.to_png_bytes().expect("encode"))),
        );
    }

    group.finish();
}

// ============================================================================
// Benchmark: Framing
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let image = screenshot(1280, 800).to_png_bytes().expect("encode");

    let mut group = c.benchmark_group("encode");
    for &regions in REGION_COUNTS {
        let request = MatchRequest::new(match_data(regions), image.clone());
        group.bench_with_input(BenchmarkId::new("regions", regions), &request, |b, request| {
            b.iter(|| black_box(request.encode().expect("frame")));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let image = screenshot(1280, 800).to_png_bytes().expect("encode");

    let mut group = c.benchmark_group("parse");
    for &regions in REGION_COUNTS {
        let body = MatchRequest::new(match_data(regions), image.clone())
            .encode()
            .expect("frame");
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::new("regions", regions), &body, |b, body| {
            b.iter(|| {
                let framed = FramedBody::parse(black_box(body)).expect("parse");
                black_box(framed.match_data().expect("metadata"))
            });
        });
    }
    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_png_encode, bench_encode, bench_parse);
criterion_main!(benches);
