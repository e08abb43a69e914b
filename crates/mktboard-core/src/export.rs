//! Export of the raw-data table and the full dataset
//!
//! Provides simple, testable export with proper error handling.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{AnalyticsData, SocialPost};
use crate::view::RawDataView;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Export the raw-data table to CSV
///
/// CSV columns: Date, Revenue, Orders, Sessions, Visitors, Page Views,
/// Posts, Campaigns, Has Event, Tier. Rows keep the view's order (most
/// recent first).
///
/// # Errors
/// Returns error if file creation or write operations fail
///
/// # Examples
///
/// ```no_run
/// use mktboard_core::export::export_timeline_to_csv;
/// use mktboard_core::range::DateRange;
/// use mktboard_core::view::RawDataView;
/// use std::path::Path;
///
/// let view = RawDataView::build(&[], &DateRange::All);
/// export_timeline_to_csv(&view, Path::new("timeline.csv")).unwrap();
/// ```
pub fn export_timeline_to_csv(view: &RawDataView, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "Date,Revenue,Orders,Sessions,Visitors,Page Views,Posts,Campaigns,Has Event,Tier"
    )
    .context("Failed to write CSV header")?;

    for row in &view.rows {
        writeln!(
            writer,
            "{},{:.2},{},{},{},{},{},{},{},{}",
            row.date.format("%Y-%m-%d"),
            row.revenue,
            row.orders,
            row.sessions,
            row.visitors,
            row.page_views,
            row.posts,
            row.campaigns,
            row.has_event,
            row.tier
        )
        .with_context(|| format!("Failed to write row for {}", row.date))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export social posts to CSV (quoted text columns)
pub fn export_posts_to_csv(posts: &[&SocialPost], path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "Date,Platform,Influencer,Views,Reach,Engagement,Engagement Rate,Revenue Impact,Traffic Impact"
    )
    .context("Failed to write CSV header")?;

    for post in posts {
        writeln!(
            writer,
            "{},\"{}\",\"{}\",{},{},{},{:.4},{:.2},{:.0}",
            post.date.format("%Y-%m-%d"),
            post.platform.name().replace('"', "\"\""),
            post.influencer.replace('"', "\"\""),
            post.views,
            post.reach,
            post.engagement,
            post.engagement_rate(),
            post.revenue_impact,
            post.traffic_impact
        )
        .with_context(|| format!("Failed to write post row for {}", post.date))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export the full dataset as pretty-printed `analyticsData` JSON
pub fn export_analytics_to_json(data: &AnalyticsData, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let json =
        serde_json::to_string_pretty(data).context("Failed to serialize analytics data to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorConfig;
    use crate::range::DateRange;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn demo() -> AnalyticsData {
        AnalyticsData::demo(
            NaiveDate::from_ymd_opt(2026, 1, 29).unwrap(),
            30,
            &GeneratorConfig::seeded(21),
            7,
        )
    }

    #[test]
    fn test_export_timeline_csv() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("timeline.csv");
        let data = demo();
        let view = RawDataView::build(&data.timeline, &DateRange::Lookback(7));

        export_timeline_to_csv(&view, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("Date,Revenue"));
        assert!(lines[1].starts_with("2026-01-29,"));
    }

    #[test]
    fn test_export_posts_csv_quotes_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("posts.csv");
        let mut data = demo();
        if let Some(post) = data.social_posts.first_mut() {
            post.influencer = "@say \"hi\"".to_string();
        }
        let posts: Vec<&SocialPost> = data.social_posts.iter().collect();

        export_posts_to_csv(&posts, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), posts.len() + 1);
        if !posts.is_empty() {
            assert!(content.contains("\"@say \"\"hi\"\"\""));
        }
    }

    #[test]
    fn test_export_json_round_trips_timeline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        let data = demo();

        export_analytics_to_json(&data, &path).unwrap();

        let loaded = AnalyticsData::load(&path).unwrap();
        assert_eq!(loaded.timeline, data.timeline);
        assert_eq!(loaded.summary, data.summary);
        assert_eq!(loaded.social_posts.len(), data.social_posts.len());
    }
}
