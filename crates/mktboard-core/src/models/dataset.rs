//! Top-level dataset consumed by every dashboard panel

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CountryStat, DayRecord, SocialPost, TrafficSources};
use crate::analytics::{compute_summary, weekly_rollup};
use crate::error::CoreError;

/// Headline numbers shown on the overview cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub total_visitors: u64,
    pub total_posts: u64,
    pub total_campaigns: u64,
    /// Percent change of the trailing 30 days against the 30 days before
    pub revenue_change: f64,
    pub orders_change: f64,
    pub visitors_change: f64,
    pub posts_last_30_days: u64,
}

/// Marketing activity level of a whole ISO week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeeklyLevel {
    Low,
    Medium,
    High,
}

impl WeeklyLevel {
    /// High at 3+ events in the week, Medium at 1+
    pub fn from_events(events: u64) -> Self {
        if events >= 3 {
            WeeklyLevel::High
        } else if events >= 1 {
            WeeklyLevel::Medium
        } else {
            WeeklyLevel::Low
        }
    }
}

/// One ISO week of the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyActivity {
    pub year: i32,
    pub week: u32,
    pub revenue: f64,
    pub sessions: u64,
    pub posts: u64,
    pub campaigns: u64,
    pub level: WeeklyLevel,
}

/// Span covered by the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub last_updated: DateTime<Utc>,
}

/// The full `analyticsData` structure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub date_range: Option<DatasetRange>,
    pub summary: Summary,
    pub timeline: Vec<DayRecord>,
    pub social_posts: Vec<SocialPost>,
    pub weekly_data: Vec<WeeklyActivity>,
    pub countries: Vec<CountryStat>,
    pub traffic_sources: TrafficSources,
}

/// On-disk shape: everything except the timeline may be absent
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsFile {
    #[serde(default)]
    date_range: Option<DatasetRange>,
    #[serde(default)]
    summary: Option<Summary>,
    timeline: Vec<DayRecord>,
    #[serde(default)]
    social_posts: Vec<SocialPost>,
    #[serde(default)]
    weekly_data: Vec<WeeklyActivity>,
    #[serde(default)]
    countries: Vec<CountryStat>,
    #[serde(default)]
    traffic_sources: TrafficSources,
}

impl AnalyticsData {
    /// Assemble a dataset, deriving summary and weekly rollups from the timeline
    pub fn from_parts(
        timeline: Vec<DayRecord>,
        social_posts: Vec<SocialPost>,
        countries: Vec<CountryStat>,
        traffic_sources: TrafficSources,
    ) -> Self {
        let timeline = normalize_timeline(timeline);

        Self {
            date_range: timeline_range(&timeline),
            summary: compute_summary(&timeline),
            weekly_data: weekly_rollup(&timeline),
            timeline,
            social_posts,
            countries,
            traffic_sources,
        }
    }

    /// Load an exported dataset from a JSON file
    ///
    /// Missing `summary` and `weeklyData` are derived from the timeline.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| CoreError::JsonParse {
            path: path.to_path_buf(),
            message: source.to_string(),
            source,
        })
    }

    /// Parse the dataset from a JSON string
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let file: AnalyticsFile = serde_json::from_str(content)?;
        let timeline = normalize_timeline(file.timeline);

        let summary = file.summary.unwrap_or_else(|| compute_summary(&timeline));
        let weekly_data = if file.weekly_data.is_empty() {
            weekly_rollup(&timeline)
        } else {
            file.weekly_data
        };

        tracing::debug!(
            days = timeline.len(),
            posts = file.social_posts.len(),
            "Loaded analytics dataset"
        );

        Ok(Self {
            date_range: file.date_range.or_else(|| timeline_range(&timeline)),
            summary,
            timeline,
            social_posts: file.social_posts,
            weekly_data,
            countries: file.countries,
            traffic_sources: file.traffic_sources,
        })
    }

    /// Latest date in the timeline
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.timeline.last().map(|d| d.date)
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }
}

/// First and last timeline dates, stamped now
fn timeline_range(timeline: &[DayRecord]) -> Option<DatasetRange> {
    match (timeline.first(), timeline.last()) {
        (Some(first), Some(last)) => Some(DatasetRange {
            start: first.date,
            end: last.date,
            last_updated: Utc::now(),
        }),
        _ => None,
    }
}

/// Sort ascending and drop duplicate dates (first occurrence wins)
fn normalize_timeline(mut timeline: Vec<DayRecord>) -> Vec<DayRecord> {
    if !timeline.windows(2).all(|w| w[0].date < w[1].date) {
        tracing::warn!("Timeline not strictly ascending, sorting and de-duplicating");
        timeline.sort_by_key(|d| d.date);
        let before = timeline.len();
        timeline.dedup_by_key(|d| d.date);
        if timeline.len() != before {
            tracing::warn!(
                dropped = before - timeline.len(),
                "Dropped duplicate timeline dates"
            );
        }
    }
    timeline
}
