//! ISO-week rollups for the weekly activity chart

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::models::{DayRecord, WeeklyActivity, WeeklyLevel};

#[derive(Default)]
struct WeekAggregate {
    revenue: f64,
    sessions: u64,
    posts: u64,
    campaigns: u64,
}

/// Aggregate the timeline by ISO week, oldest week first
pub fn weekly_rollup(timeline: &[DayRecord]) -> Vec<WeeklyActivity> {
    let mut weeks: BTreeMap<(i32, u32), WeekAggregate> = BTreeMap::new();

    for day in timeline {
        let iso = day.date.iso_week();
        let agg = weeks.entry((iso.year(), iso.week())).or_default();
        agg.revenue += day.revenue;
        agg.sessions += day.sessions;
        agg.posts += day.posts as u64;
        agg.campaigns += day.campaigns as u64;
    }

    weeks
        .into_iter()
        .map(|((year, week), agg)| WeeklyActivity {
            year,
            week,
            revenue: agg.revenue,
            sessions: agg.sessions,
            posts: agg.posts,
            campaigns: agg.campaigns,
            level: WeeklyLevel::from_events(agg.posts + agg.campaigns),
        })
        .collect()
}
