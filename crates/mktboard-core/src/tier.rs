//! Daily activity tiers for the heat-map
//!
//! A tier is never stored: it is recomputed from the day's counts on every
//! render.

use serde::{Deserialize, Serialize};

/// Revenue above which a day is always `High`
pub const HIGH_REVENUE: f64 = 5000.0;

/// Revenue above which a day is at least `Medium`
pub const MEDIUM_REVENUE: f64 = 2500.0;

/// Discrete activity classification of a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    None,
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::None, Tier::Low, Tier::Medium, Tier::High];

    /// Stable identifier, also used as the heat-map cell class
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::None => "none",
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::None => "No activity",
            Tier::Low => "Low activity",
            Tier::Medium => "Medium activity",
            Tier::High => "High activity",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a day from its marketing events and revenue
///
/// Days without a post or campaign are `None` whatever their revenue.
/// Otherwise 3+ events or revenue above 5000 is `High`, 2+ events or
/// revenue above 2500 is `Medium`, and anything else is `Low`.
pub fn classify(posts: u32, campaigns: u32, revenue: f64) -> Tier {
    let total_events = posts.saturating_add(campaigns);

    if total_events == 0 {
        Tier::None
    } else if total_events >= 3 || revenue > HIGH_REVENUE {
        Tier::High
    } else if total_events >= 2 || revenue > MEDIUM_REVENUE {
        Tier::Medium
    } else {
        Tier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_events_is_none_for_any_revenue() {
        for revenue in [0.0, 1.0, 2500.0, 5000.01, 1_000_000.0] {
            assert_eq!(classify(0, 0, revenue), Tier::None);
        }
    }

    #[test]
    fn test_boundary_table() {
        assert_eq!(classify(3, 0, 0.0), Tier::High);
        assert_eq!(classify(0, 1, 6000.0), Tier::High);
        assert_eq!(classify(1, 1, 0.0), Tier::Medium);
        assert_eq!(classify(1, 0, 0.0), Tier::Low);
    }

    #[test]
    fn test_revenue_thresholds_are_exclusive() {
        assert_eq!(classify(1, 0, 2500.0), Tier::Low);
        assert_eq!(classify(1, 0, 2500.01), Tier::Medium);
        assert_eq!(classify(1, 0, 5000.0), Tier::Medium);
        assert_eq!(classify(1, 0, 5000.01), Tier::High);
    }

    #[test]
    fn test_campaigns_count_like_posts() {
        assert_eq!(classify(0, 2, 0.0), Tier::Medium);
        assert_eq!(classify(1, 2, 0.0), Tier::High);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::None < Tier::Low);
        assert!(Tier::Medium < Tier::High);
        assert_eq!(serde_json::to_string(&Tier::Medium).unwrap(), "\"medium\"");
    }
}
