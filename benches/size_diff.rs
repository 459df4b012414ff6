//! Size Comparison Benchmarks
//!
//! **Purpose:** Measure snapshot scanning, diffing and report rendering
//!
//! **Regression Threshold:** >15% slower than the saved baseline
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench size_diff
//! cargo bench --bench size_diff -- --save-baseline main
//! cargo bench --bench size_diff -- --baseline main
//! ```
//!
//! **What's Being Measured:**
//! 1. `inventory/N files` - Globbing, reading and gzip-sizing one snapshot
//! 2. `diff/N files` - Joining two in-memory inventories
//! 3. `render/N files` - Console and Markdown rendering of the records
//!
//! **Performance Tips:**
//! - Inventory building is I/O and gzip bound; disk speed affects results
//! - Diffing and rendering are pure and should scale linearly

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pr_bot::size::{
    diff, FileInventory, FileRecord, GlobOptions, Inventory, InventoryOptions, SizeReport,
};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;

const SIZES: [usize; 3] = [10, 100, 1000];

fn synthetic_inventory(files: usize, scale: u64) -> Inventory {
    (0..files)
        .map(|i| {
            let relative_path = format!("dist/chunk-{i:04}.js");
            let size_in_bytes = (i as u64 + 1) * scale;
            (
                relative_path.clone(),
                FileRecord {
                    relative_path,
                    size_in_bytes,
                    gzip_size_in_bytes: size_in_bytes / 3,
                },
            )
        })
        .collect()
}

fn create_snapshot(files: usize) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let dist = dir.path().join("dist");
    fs::create_dir_all(&dist).expect("Failed to create dist dir");
    for i in 0..files {
        let contents = format!("export const chunk{i} = {:?};\n", "x".repeat(i % 512));
        fs::write(dist.join(format!("chunk-{i:04}.js")), contents).expect("Failed to write file");
    }
    dir
}

fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory");
    let inventory = FileInventory::new(InventoryOptions {
        glob_pattern: "dist/**/*.js".to_string(),
        glob_options: GlobOptions::default(),
        path_transform: None,
    });

    for files in SIZES {
        let snapshot = create_snapshot(files);
        group.bench_with_input(BenchmarkId::new("files", files), &snapshot, |b, snapshot| {
            b.iter(|| black_box(inventory.build(snapshot.path())));
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    for files in SIZES {
        let before = synthetic_inventory(files, 100);
        let after = synthetic_inventory(files + files / 10, 110);
        group.bench_with_input(BenchmarkId::new("files", files), &files, |b, _| {
            b.iter(|| black_box(diff(black_box(&before), black_box(&after))));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for files in SIZES {
        let records = diff(
            &synthetic_inventory(files, 100),
            &synthetic_inventory(files + files / 10, 110),
        );
        group.bench_with_input(BenchmarkId::new("files", files), &records, |b, records| {
            b.iter(|| black_box(SizeReport::render(records)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_inventory, bench_diff, bench_render);
criterion_main!(benches);
