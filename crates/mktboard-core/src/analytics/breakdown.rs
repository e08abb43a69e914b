//! Breakdowns for the social, traffic and geography panels

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{CountryStat, Platform, SocialPost, TrafficSources};

/// Aggregated numbers for one platform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTotals {
    pub platform: Platform,
    pub posts: usize,
    pub views: u64,
    pub engagement: u64,
    pub revenue_impact: f64,
}

/// Per-platform totals, most engaging platform first
pub fn platform_totals(posts: &[SocialPost]) -> Vec<PlatformTotals> {
    let mut totals: HashMap<&Platform, PlatformTotals> = HashMap::new();
    for post in posts {
        let entry = totals.entry(&post.platform).or_insert_with(|| PlatformTotals {
            platform: post.platform.clone(),
            posts: 0,
            views: 0,
            engagement: 0,
            revenue_impact: 0.0,
        });
        entry.posts += 1;
        entry.views += post.views;
        entry.engagement += post.engagement;
        entry.revenue_impact += post.revenue_impact;
    }

    let mut totals: Vec<PlatformTotals> = totals.into_values().collect();
    totals.sort_by(|a, b| {
        b.engagement
            .cmp(&a.engagement)
            .then_with(|| a.platform.name().cmp(b.platform.name()))
    });
    totals
}

/// The `n` countries with the highest revenue
pub fn top_countries(countries: &[CountryStat], n: usize) -> Vec<&CountryStat> {
    let mut sorted: Vec<&CountryStat> = countries.iter().collect();
    sorted.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    sorted.truncate(n);
    sorted
}

/// One traffic source with its share of all sessions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceShare {
    pub source: String,
    pub sessions: u64,
    /// Percentage of total sessions (0-100)
    pub share: f64,
}

/// Sources by descending sessions with their percentage share
pub fn traffic_shares(sources: &TrafficSources) -> Vec<SourceShare> {
    let total: u64 = sources.values().sum();
    let mut shares: Vec<SourceShare> = sources
        .iter()
        .map(|(source, &sessions)| SourceShare {
            source: source.clone(),
            sessions,
            share: if total == 0 {
                0.0
            } else {
                sessions as f64 / total as f64 * 100.0
            },
        })
        .collect();
    // BTreeMap order keeps ties alphabetical
    shares.sort_by(|a, b| b.sessions.cmp(&a.sessions));
    shares
}
