//! Daily timeline record

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// One row of the daily timeline
///
/// `hasEvent` is never read from input: it is always derived from
/// `posts` and `campaigns`, so a stale flag in an exported file cannot
/// disagree with the counts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: u64,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub visitors: u64,
    #[serde(default)]
    pub page_views: u64,
    #[serde(default)]
    pub posts: u32,
    #[serde(default)]
    pub campaigns: u32,
}

impl DayRecord {
    /// Empty day (zero activity) for `date`
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            revenue: 0.0,
            orders: 0,
            sessions: 0,
            visitors: 0,
            page_views: 0,
            posts: 0,
            campaigns: 0,
        }
    }

    /// A marketing event happened on this day (post or campaign launch)
    pub fn has_event(&self) -> bool {
        self.posts > 0 || self.campaigns > 0
    }

    /// Posts plus campaigns
    pub fn total_events(&self) -> u32 {
        self.posts.saturating_add(self.campaigns)
    }

    /// Revenue per session, 0 when there was no traffic
    pub fn conversion_value(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.revenue / self.sessions as f64
        }
    }
}

impl Serialize for DayRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DayRecord", 9)?;
        s.serialize_field("date", &self.date)?;
        s.serialize_field("revenue", &self.revenue)?;
        s.serialize_field("orders", &self.orders)?;
        s.serialize_field("sessions", &self.sessions)?;
        s.serialize_field("visitors", &self.visitors)?;
        s.serialize_field("pageViews", &self.page_views)?;
        s.serialize_field("posts", &self.posts)?;
        s.serialize_field("campaigns", &self.campaigns)?;
        s.serialize_field("hasEvent", &self.has_event())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(posts: u32, campaigns: u32) -> DayRecord {
        DayRecord {
            posts,
            campaigns,
            ..DayRecord::empty(NaiveDate::from_ymd_opt(2026, 1, 29).unwrap())
        }
    }

    #[test]
    fn test_has_event_tracks_counts() {
        assert!(!day(0, 0).has_event());
        assert!(day(1, 0).has_event());
        assert!(day(0, 1).has_event());
        assert!(day(2, 3).has_event());
    }

    #[test]
    fn test_stored_has_event_flag_is_ignored() {
        let json = r#"{"date":"2026-01-05","revenue":1200.5,"orders":14,
            "sessions":800,"visitors":560,"pageViews":2000,
            "posts":0,"campaigns":0,"hasEvent":true}"#;
        let record: DayRecord = serde_json::from_str(json).unwrap();
        assert!(!record.has_event());
        assert_eq!(record.page_views, 2000);
    }

    #[test]
    fn test_serialize_emits_camel_case_and_has_event() {
        let value = serde_json::to_value(day(1, 0)).unwrap();
        assert_eq!(value["date"], "2026-01-29");
        assert_eq!(value["hasEvent"], true);
        assert!(value.get("pageViews").is_some());
    }
}
