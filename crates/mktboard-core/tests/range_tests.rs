//! Integration tests for date-range filtering over generated timelines

use chrono::{Duration, NaiveDate};
use mktboard_core::view::RawDataView;
use mktboard_core::{filter_by_range, generate_timeline, CoreError, DateRange, GeneratorConfig};

fn end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 29).unwrap()
}

#[test]
fn test_lookback_sizes() {
    let timeline = generate_timeline(end(), 60, &GeneratorConfig::seeded(1));

    for n in [1usize, 7, 30, 59, 60, 61, 365] {
        let result = filter_by_range(&timeline, &DateRange::Lookback(n));
        assert_eq!(result.len(), n.min(timeline.len()), "lookback {}", n);
        assert_eq!(result[0].date, end());
        assert_eq!(
            result.last().unwrap().date,
            end() - Duration::days(n.min(60) as i64 - 1)
        );
    }
}

#[test]
fn test_filtering_leaves_timeline_ascending() {
    let timeline = generate_timeline(end(), 30, &GeneratorConfig::seeded(2));
    let before = timeline.clone();
    let _ = filter_by_range(&timeline, &DateRange::All);
    assert_eq!(timeline, before);
    assert!(timeline.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_custom_range_partially_outside_series() {
    let timeline = generate_timeline(end(), 10, &GeneratorConfig::seeded(3));
    let range = DateRange::custom(Some("2026-01-25"), Some("2026-02-15")).unwrap();

    let result = filter_by_range(&timeline, &range);
    assert_eq!(result.len(), 5);
    assert_eq!(range.window_days(), Some(22));
}

#[test]
fn test_incomplete_range_performs_no_filtering() {
    let result = DateRange::custom(None, Some("2026-01-10"));
    let err = result.unwrap_err();
    assert!(matches!(err, CoreError::IncompleteRange { .. }));
    assert!(err.is_validation());
    assert!(err.to_string().contains("start and end"));
}

#[test]
fn test_raw_view_follows_range() {
    let timeline = generate_timeline(end(), 60, &GeneratorConfig::seeded(6));
    let range = DateRange::custom(Some("2026-01-01"), Some("2026-01-10")).unwrap();
    let view = RawDataView::build(&timeline, &range);

    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.label, "2026-01-01 to 2026-01-10");
    let expected: f64 = timeline
        .iter()
        .filter(|d| d.date >= view.rows[9].date && d.date <= view.rows[0].date)
        .map(|d| d.revenue)
        .sum();
    assert!((view.total_revenue() - expected).abs() < 1e-6);
}
