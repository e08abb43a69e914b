//! Social media posts attributed to influencers and brand accounts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Social platform a post was published on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    TikTok,
    Pinterest,
    Facebook,
    YouTube,
    Other(String),
}

impl Platform {
    /// Platforms the dashboard offers as filter buttons
    pub const KNOWN: [Platform; 5] = [
        Platform::Instagram,
        Platform::TikTok,
        Platform::Pinterest,
        Platform::Facebook,
        Platform::YouTube,
    ];

    pub fn name(&self) -> &str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Pinterest => "Pinterest",
            Platform::Facebook => "Facebook",
            Platform::YouTube => "YouTube",
            Platform::Other(name) => name,
        }
    }

    /// Case-insensitive parse; unknown names are kept as `Other`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "instagram" | "ig" => Platform::Instagram,
            "tiktok" => Platform::TikTok,
            "pinterest" => Platform::Pinterest,
            "facebook" | "meta" => Platform::Facebook,
            "youtube" => Platform::YouTube,
            _ => Platform::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        Platform::parse(&s)
    }
}

impl From<Platform> for String {
    fn from(p: Platform) -> Self {
        p.name().to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single post with engagement counters and its attributed impact
///
/// `revenue_impact` / `traffic_impact` are the average daily revenue and
/// sessions over the window that starts on the post date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub date: NaiveDate,
    pub platform: Platform,
    pub influencer: String,
    #[serde(default)]
    pub post_url: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub engagement: u64,
    #[serde(default)]
    pub revenue_impact: f64,
    #[serde(default)]
    pub traffic_impact: f64,
}

impl SocialPost {
    /// Engagement as a share of reach (0.0 when reach is unknown)
    pub fn engagement_rate(&self) -> f64 {
        if self.reach == 0 {
            0.0
        } else {
            self.engagement as f64 / self.reach as f64
        }
    }

    /// Identity of the post within a dataset
    pub fn key(&self) -> (NaiveDate, &Platform, &str) {
        (self.date, &self.platform, self.influencer.as_str())
    }
}
