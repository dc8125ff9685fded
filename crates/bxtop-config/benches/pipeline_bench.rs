//! Criterion benchmarks for the config load pipeline and the file renderer.
//!
//! Loading runs once at startup and saving once at exit, so both only need to
//! stay well below a single screen refresh.  These benchmarks catch
//! regressions such as accidental quadratic lookups in the schema.
//!
//! Run with:
//! ```bash
//! cargo bench --package bxtop-config --bench pipeline_bench
//! ```

use bxtop_config::application::render::render_config;
use bxtop_config::application::validate::validate_text;
use bxtop_config::{ConfigService, ConfigSnapshot, Schema};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const VERSION: &str = "1.0.0";

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// The full default file, as bxtop writes it on first run.
fn default_file(schema: &Schema) -> String {
    render_config(schema, &ConfigSnapshot::defaults(schema), VERSION)
}

/// A hand-edited file where every validation rule has something to reject.
fn broken_file() -> String {
    [
        "#? Config file for bxtop v. 0.9.0",
        "proc_sorting=\"sideways\"",
        "log_level=\"LOUD\"",
        "update_ms=\"10\"",
        "net_download=\"fast\"",
        "cpu_sensor=\"nope:0\"",
        "shown_boxes=\"cpu gpu\"",
        "cpu_graph_upper=\"warp\"",
        "temp_scale=\"reaumur\"",
        "proc_tree=\"maybe\"",
        "proc_update_mult=\"two\"",
    ]
    .join("\n")
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_validate_text(c: &mut Criterion) {
    let schema = Schema::default();
    let mut group = c.benchmark_group("validate_text");

    for (name, text) in [("default", default_file(&schema)), ("broken", broken_file())] {
        group.bench_with_input(BenchmarkId::new("file", name), &text, |b, text| {
            b.iter(|| validate_text(black_box(text), &schema))
        });
    }

    group.finish();
}

fn bench_load_service(c: &mut Criterion) {
    let schema = Schema::default();
    let text = default_file(&schema);

    c.bench_function("config_service_from_text", |b| {
        b.iter(|| ConfigService::from_text(schema.clone(), Some(black_box(&text)), VERSION))
    });
}

fn bench_render_config(c: &mut Criterion) {
    let schema = Schema::default();
    let snapshot = ConfigSnapshot::defaults(&schema);

    c.bench_function("render_config", |b| {
        b.iter(|| render_config(&schema, black_box(&snapshot), VERSION))
    });
}

criterion_group!(
    benches,
    bench_validate_text,
    bench_load_service,
    bench_render_config,
);
criterion_main!(benches);
