//! Overview card numbers

use crate::models::{DayRecord, Summary};

/// Days compared against the window before them for the change figures
const CHANGE_WINDOW: usize = 30;

/// Percent change from `previous` to `current`; 0 when `previous` is not positive
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

fn sum(days: &[DayRecord], f: impl Fn(&DayRecord) -> f64) -> f64 {
    days.iter().map(f).sum()
}

/// Totals plus trailing-30-day changes
///
/// Changes compare the last 30 records with the 30 before them and stay 0
/// until the timeline holds both windows.
pub fn compute_summary(timeline: &[DayRecord]) -> Summary {
    let len = timeline.len();
    let recent = &timeline[len.saturating_sub(CHANGE_WINDOW)..];

    let (revenue_change, orders_change, visitors_change) = if len >= CHANGE_WINDOW * 2 {
        let prior = &timeline[len - CHANGE_WINDOW * 2..len - CHANGE_WINDOW];
        (
            percent_change(sum(prior, |d| d.revenue), sum(recent, |d| d.revenue)),
            percent_change(
                sum(prior, |d| d.orders as f64),
                sum(recent, |d| d.orders as f64),
            ),
            percent_change(
                sum(prior, |d| d.visitors as f64),
                sum(recent, |d| d.visitors as f64),
            ),
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    Summary {
        total_revenue: timeline.iter().map(|d| d.revenue).sum(),
        total_orders: timeline.iter().map(|d| d.orders).sum(),
        total_visitors: timeline.iter().map(|d| d.visitors).sum(),
        total_posts: timeline.iter().map(|d| d.posts as u64).sum(),
        total_campaigns: timeline.iter().map(|d| d.campaigns as u64).sum(),
        revenue_change,
        orders_change,
        visitors_change,
        posts_last_30_days: recent.iter().map(|d| d.posts as u64).sum(),
    }
}
