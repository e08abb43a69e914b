//! Performance benchmarks for the heat-map and range filter
//!
//! Every render rebuilds its grid, so a full year view should stay well
//! under a frame budget.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mktboard_core::analytics::{compute_correlations, weekly_rollup};
use mktboard_core::{
    build_calendar, filter_by_range, generate_timeline, ActivityLookup, DateRange,
    GeneratorConfig, Granularity, HeatmapSelection,
};

fn end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 29).unwrap()
}

/// Benchmark 1: build_calendar for each granularity
fn calendar_benchmark(c: &mut Criterion) {
    let timeline = generate_timeline(end(), 365, &GeneratorConfig::seeded(1));
    let lookup = ActivityLookup::from_timeline(&timeline);
    let mut group = c.benchmark_group("build_calendar");

    for view in [Granularity::Month, Granularity::Quarter, Granularity::Year] {
        let selection = HeatmapSelection::new(2025, 7, view);
        group.bench_with_input(
            BenchmarkId::new("view", view.as_str()),
            &selection,
            |b, selection| {
                b.iter(|| black_box(build_calendar(selection, &lookup)));
            },
        );
    }

    group.finish();
}

/// Benchmark 2: filter_by_range with varying lookbacks
fn range_benchmark(c: &mut Criterion) {
    let timeline = generate_timeline(end(), 365, &GeneratorConfig::seeded(2));
    let mut group = c.benchmark_group("filter_by_range");

    for days in [7usize, 90, 365] {
        group.bench_with_input(BenchmarkId::new("lookback", days), &days, |b, &days| {
            b.iter(|| black_box(filter_by_range(&timeline, &DateRange::Lookback(days))));
        });
    }

    group.finish();
}

/// Benchmark 3: derived analytics over a year
fn analytics_benchmark(c: &mut Criterion) {
    let timeline = generate_timeline(end(), 365, &GeneratorConfig::seeded(3));

    c.bench_function("compute_correlations_365d", |b| {
        b.iter(|| black_box(compute_correlations(&timeline, 7)));
    });
    c.bench_function("weekly_rollup_365d", |b| {
        b.iter(|| black_box(weekly_rollup(&timeline)));
    });
}

criterion_group!(
    benches,
    calendar_benchmark,
    range_benchmark,
    analytics_benchmark
);
criterion_main!(benches);
