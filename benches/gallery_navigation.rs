// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery modal navigation.
//!
//! Measures the performance of:
//! - Opening a gallery (registry lookup + surface creation)
//! - Stepping through a gallery with next/previous
//! - Classifying media paths

use criterion::{criterion_group, criterion_main, Criterion};
use folio_gallery::application::gallery::{GalleryModalController, GalleryRegistry};
use folio_gallery::content::Portfolio;
use folio_gallery::domain::gallery::Position;
use folio_gallery::domain::media::MediaType;
use std::hint::black_box;

fn controller() -> GalleryModalController {
    let registry =
        GalleryRegistry::from_portfolio(&Portfolio::builtin()).expect("builtin portfolio");
    GalleryModalController::new(registry)
}

fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");
    let mut controller = controller();

    group.bench_function("open_thumbnail", |b| {
        b.iter(|| {
            let request = controller.open(black_box("devotion"), Position::Thumbnail(7));
            black_box(request.is_ok());
        });
    });

    group.finish();
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");
    let mut controller = controller();
    controller
        .open("orgconnect", Position::Cover)
        .expect("open builtin gallery");

    group.bench_function("next_full_cycle", |b| {
        b.iter(|| {
            for _ in 0..12 {
                black_box(controller.next());
            }
        });
    });

    group.bench_function("prev_full_cycle", |b| {
        b.iter(|| {
            for _ in 0..12 {
                black_box(controller.prev());
            }
        });
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let paths = Portfolio::builtin()
        .galleries
        .into_iter()
        .flat_map(|gallery| gallery.items)
        .collect::<Vec<_>>();

    c.bench_function("classify_media_paths", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(MediaType::classify(path));
            }
        });
    });
}

criterion_group!(benches, bench_open, bench_cycle, bench_classify);
criterion_main!(benches);
