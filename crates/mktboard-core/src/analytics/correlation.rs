//! Rolling averages and post-event impact

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use super::{summary::percent_change, ROLLING_WINDOW};
use crate::models::{DayRecord, SocialPost};

/// Correlation metrics for one day of the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCorrelation {
    pub date: NaiveDate,
    /// Mean revenue of this day and up to six before it
    pub revenue_7day_avg: f64,
    pub traffic_7day_avg: f64,
    /// Day-over-day change; `None` on the first day or after a zero day
    pub revenue_change_pct: Option<f64>,
    pub traffic_change_pct: Option<f64>,
    pub has_event: bool,
    /// Mean revenue over the impact window starting on an event day (0 otherwise)
    pub post_event_revenue_avg: f64,
    pub post_event_traffic_avg: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn day_change(previous: f64, current: f64) -> Option<f64> {
    (previous > 0.0).then(|| percent_change(previous, current))
}

/// Per-day correlation metrics
///
/// For every event day the post-event averages cover `[day, day + window)`,
/// cut short at the end of the series. A zero window leaves them at 0.
pub fn compute_correlations(timeline: &[DayRecord], window: usize) -> Vec<DayCorrelation> {
    timeline
        .iter()
        .enumerate()
        .map(|(idx, day)| {
            let trailing = &timeline[(idx + 1).saturating_sub(ROLLING_WINDOW)..=idx];
            let previous = idx.checked_sub(1).map(|i| &timeline[i]);

            let (post_event_revenue_avg, post_event_traffic_avg) = if day.has_event() && window > 0
            {
                let ahead = &timeline[idx..(idx + window).min(timeline.len())];
                (
                    mean(ahead.iter().map(|d| d.revenue)),
                    mean(ahead.iter().map(|d| d.sessions as f64)),
                )
            } else {
                (0.0, 0.0)
            };

            DayCorrelation {
                date: day.date,
                revenue_7day_avg: mean(trailing.iter().map(|d| d.revenue)),
                traffic_7day_avg: mean(trailing.iter().map(|d| d.sessions as f64)),
                revenue_change_pct: previous.and_then(|p| day_change(p.revenue, day.revenue)),
                traffic_change_pct: previous
                    .and_then(|p| day_change(p.sessions as f64, day.sessions as f64)),
                has_event: day.has_event(),
                post_event_revenue_avg,
                post_event_traffic_avg,
            }
        })
        .collect()
}

/// Copy each post's day impact into its revenue/traffic impact fields
///
/// Posts dated outside the timeline get zero impact.
pub fn attribute_post_impact(posts: &mut [SocialPost], correlations: &[DayCorrelation]) {
    let by_date: HashMap<NaiveDate, &DayCorrelation> =
        correlations.iter().map(|c| (c.date, c)).collect();

    for post in posts.iter_mut() {
        let (revenue, traffic) = by_date
            .get(&post.date)
            .map(|c| (c.post_event_revenue_avg, c.post_event_traffic_avg))
            .unwrap_or((0.0, 0.0));
        post.revenue_impact = revenue;
        post.traffic_impact = traffic;
    }
}
