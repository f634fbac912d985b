//! Benchmarks for the pixstudio pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pixstudio::{
    Colour, PaletteIndex, Palette, PipelineOptions, PixelGrid, QuantizationStrategy, Raster,
    Stylizer,
};

/// A deterministic photo-like gradient with a hard diagonal edge.
fn gradient(width: usize, height: usize) -> Raster {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            let b = if x > y { 220 } else { 30 };
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    Raster::new(width, height, data).unwrap()
}

// -- Quantization benchmarks --

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    let palette = Palette::default_palette();

    group.bench_function("build_32", |b| {
        b.iter(|| PaletteIndex::build(black_box(&palette), 32).unwrap())
    });

    group.bench_function("build_64", |b| {
        b.iter(|| PaletteIndex::build(black_box(&palette), 64).unwrap())
    });

    let index = PaletteIndex::build(&palette, 32).unwrap();
    group.bench_function("lookup", |b| {
        b.iter(|| index.lookup(black_box(Colour::rgb(120, 40, 200))))
    });

    group.finish();
}

// -- Stylize benchmarks --

fn bench_stylize(c: &mut Criterion) {
    let mut group = c.benchmark_group("stylize");
    let palette = Palette::default_palette();
    let source = gradient(640, 480);

    let block = Stylizer::new(&palette, PipelineOptions::default()).unwrap();
    group.bench_function("block_64", |b| {
        b.iter(|| block.stylize(black_box(&source), 64).unwrap())
    });

    let dithered = Stylizer::new(
        &palette,
        PipelineOptions {
            enable_dithering: true,
            ..PipelineOptions::default()
        },
    )
    .unwrap();
    group.bench_function("block_64_dithered", |b| {
        b.iter(|| dithered.stylize(black_box(&source), 64).unwrap())
    });

    let edges = Stylizer::new(
        &palette,
        PipelineOptions {
            strategy: QuantizationStrategy::EdgeAware,
            enable_denoise: true,
            ..PipelineOptions::default()
        },
    )
    .unwrap();
    group.sample_size(20);
    group.bench_function("edge_aware", |b| {
        b.iter(|| edges.stylize(black_box(&source), 64).unwrap())
    });

    group.finish();
}

// -- Editor benchmarks --

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("editor");

    group.bench_function("flood_fill_512", |b| {
        b.iter_batched(
            || PixelGrid::new(512, Colour::BLACK).unwrap(),
            |mut grid| grid.flood_fill(black_box(256), black_box(256), Colour::WHITE),
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_index, bench_stylize, bench_flood_fill);
criterion_main!(benches);
