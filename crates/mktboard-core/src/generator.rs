//! Synthetic dataset generation
//!
//! Stands in for the export pipeline until real data is wired in. Every
//! consumer downstream works on any ordered, gap-free timeline, so nothing
//! relies on the shape of this data beyond that.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::analytics::{attribute_post_impact, compute_correlations};
use crate::models::{AnalyticsData, CountryStat, DayRecord, Platform, SocialPost, TrafficSources};

/// Knobs for the synthetic timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible output; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub weekday_revenue: f64,
    pub weekend_revenue: f64,
    /// Revenue varies uniformly within +/- this amount
    pub revenue_noise: f64,
    pub weekday_sessions: f64,
    pub weekend_sessions: f64,
    pub session_noise: f64,
    pub average_order_value: f64,
    /// Visitors per session
    pub visitor_ratio: f64,
    /// Page views per session
    pub pages_per_session: f64,
    pub post_probability: f64,
    pub campaign_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            weekday_revenue: 2800.0,
            weekend_revenue: 3800.0,
            revenue_noise: 1200.0,
            weekday_sessions: 850.0,
            weekend_sessions: 1150.0,
            session_noise: 250.0,
            average_order_value: 85.0,
            visitor_ratio: 0.7,
            pages_per_session: 2.5,
            post_probability: 0.15,
            campaign_probability: 0.05,
        }
    }
}

impl GeneratorConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Generate `days` records ending at `end` (inclusive), oldest first
///
/// Dates before the earliest representable `NaiveDate` are skipped.
pub fn generate_timeline(end: NaiveDate, days: usize, config: &GeneratorConfig) -> Vec<DayRecord> {
    let mut rng = config.rng();
    let aov = config.average_order_value.max(1.0);

    let timeline: Vec<DayRecord> = (0..days as i64)
        .rev()
        .filter_map(|offset| end.checked_sub_signed(Duration::days(offset)))
        .map(|date| {
            let (base_revenue, base_sessions) = if is_weekend(date) {
                (config.weekend_revenue, config.weekend_sessions)
            } else {
                (config.weekday_revenue, config.weekday_sessions)
            };

            let revenue_jitter: f64 = rng.gen_range(-1.0..=1.0);
            let session_jitter: f64 = rng.gen_range(-1.0..=1.0);
            let revenue = (base_revenue + revenue_jitter * config.revenue_noise).max(0.0);
            let revenue = (revenue * 100.0).round() / 100.0;
            let sessions = (base_sessions + session_jitter * config.session_noise).max(0.0) as u64;

            let posts = rng.gen_bool(config.post_probability.clamp(0.0, 1.0)) as u32;
            let campaigns = rng.gen_bool(config.campaign_probability.clamp(0.0, 1.0)) as u32;

            DayRecord {
                date,
                revenue,
                orders: (revenue / aov).floor() as u64,
                sessions,
                visitors: (sessions as f64 * config.visitor_ratio).floor() as u64,
                page_views: (sessions as f64 * config.pages_per_session).floor() as u64,
                posts,
                campaigns,
            }
        })
        .collect();

    tracing::debug!(days = timeline.len(), %end, "Generated synthetic timeline");
    timeline
}

const INFLUENCERS: [&str; 6] = [
    "@spicekitchen",
    "@dalmakhani_daily",
    "@modernmangal",
    "@chaiandchill",
    "@thaliqueen",
    "@grillmasterjay",
];

/// One synthetic post per posting day in `timeline`
pub fn generate_social_posts(timeline: &[DayRecord], seed: Option<u64>) -> Vec<SocialPost> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    timeline
        .iter()
        .flat_map(|day| std::iter::repeat(day.date).take(day.posts as usize))
        .map(|date| {
            let platform = Platform::KNOWN[rng.gen_range(0..Platform::KNOWN.len())].clone();
            let influencer = INFLUENCERS[rng.gen_range(0..INFLUENCERS.len())].to_string();
            let views: u64 = rng.gen_range(2_000..80_000);
            let reach = views * rng.gen_range(55..90) / 100;
            let likes = reach * rng.gen_range(3..9) / 100;
            let comments = likes / rng.gen_range(8..20);
            let shares = likes / rng.gen_range(10..30);
            let saves = likes / rng.gen_range(5..15);

            SocialPost {
                date,
                post_url: format!(
                    "https://{}.com/p/{}",
                    platform.name().to_lowercase(),
                    date.format("%Y%m%d")
                ),
                platform,
                influencer,
                views,
                reach,
                impressions: views + views / 4,
                likes,
                comments,
                shares,
                saves,
                engagement: likes + comments + shares + saves,
                revenue_impact: 0.0,
                traffic_impact: 0.0,
            }
        })
        .collect()
}

/// Static country table scaled to the timeline's totals
pub fn demo_countries(timeline: &[DayRecord]) -> Vec<CountryStat> {
    const SHARES: [(&str, (f64, f64), f64); 6] = [
        ("United States", (37.09, -95.71), 0.46),
        ("Canada", (56.13, -106.35), 0.17),
        ("United Kingdom", (55.38, -3.44), 0.13),
        ("India", (20.59, 78.96), 0.11),
        ("Australia", (-25.27, 133.78), 0.08),
        ("United Arab Emirates", (23.42, 53.85), 0.05),
    ];

    let sessions: u64 = timeline.iter().map(|d| d.sessions).sum();
    let revenue: f64 = timeline.iter().map(|d| d.revenue).sum();

    SHARES
        .iter()
        .map(|(name, coordinates, share)| CountryStat {
            name: name.to_string(),
            coordinates: *coordinates,
            sessions: (sessions as f64 * share).round() as u64,
            revenue: (revenue * share * 100.0).round() / 100.0,
        })
        .collect()
}

/// Traffic-source split of the timeline's sessions
///
/// Rounding leftovers go to the largest source so the totals match.
pub fn demo_traffic_sources(timeline: &[DayRecord]) -> TrafficSources {
    const SHARES: [(&str, f64); 6] = [
        ("Organic Search", 0.35),
        ("Instagram", 0.22),
        ("Direct", 0.18),
        ("TikTok", 0.10),
        ("Paid Ads", 0.09),
        ("Pinterest", 0.06),
    ];

    let total: u64 = timeline.iter().map(|d| d.sessions).sum();
    let mut sources: TrafficSources = SHARES
        .iter()
        .map(|(name, share)| (name.to_string(), (total as f64 * share).floor() as u64))
        .collect();

    let assigned: u64 = sources.values().sum();
    if let Some(top) = sources.get_mut(SHARES[0].0) {
        *top += total - assigned;
    }
    sources
}

impl AnalyticsData {
    /// Full synthetic dataset of `days` days ending at `end`
    pub fn demo(end: NaiveDate, days: usize, config: &GeneratorConfig, impact_window: usize) -> Self {
        let timeline = generate_timeline(end, days, config);
        let correlations = compute_correlations(&timeline, impact_window);
        let mut posts = generate_social_posts(&timeline, config.seed);
        attribute_post_impact(&mut posts, &correlations);
        // Most recent first, as the social table shows them
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        let countries = demo_countries(&timeline);
        let traffic = demo_traffic_sources(&timeline);
        AnalyticsData::from_parts(timeline, posts, countries, traffic)
    }
}
