//! Date-range filtering for the raw-data table
//!
//! The stored timeline stays ascending; filtered views come back
//! most-recent-first, the order the table displays them in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, RangeBound};
use crate::models::DayRecord;

/// Lookback presets offered by the range selector
pub const PRESETS: [usize; 4] = [7, 30, 60, 90];

/// Window of the timeline to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RangeRepr")]
pub enum DateRange {
    /// Most recent N days of the series
    Lookback(usize),
    /// Explicit bounds, both inclusive
    Custom { start: NaiveDate, end: NaiveDate },
    /// Whole series
    All,
}

/// Unchecked wire form; custom bounds go through [`DateRange::between`]
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum RangeRepr {
    Lookback(usize),
    Custom { start: NaiveDate, end: NaiveDate },
    All,
}

impl TryFrom<RangeRepr> for DateRange {
    type Error = CoreError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        match repr {
            RangeRepr::Lookback(days) => Ok(DateRange::Lookback(days)),
            RangeRepr::Custom { start, end } => DateRange::between(start, end),
            RangeRepr::All => Ok(DateRange::All),
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::Lookback(30)
    }
}

impl DateRange {
    /// Validate a custom range from the two date inputs
    ///
    /// Blank inputs count as missing.
    pub fn custom(start: Option<&str>, end: Option<&str>) -> Result<Self, CoreError> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (None, Some(_)) => {
                return Err(CoreError::IncompleteRange {
                    missing: RangeBound::Start,
                })
            }
            (Some(_), None) => {
                return Err(CoreError::IncompleteRange {
                    missing: RangeBound::End,
                })
            }
            (None, None) => {
                return Err(CoreError::IncompleteRange {
                    missing: RangeBound::Both,
                })
            }
        };

        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::between(start, end)
    }

    /// Custom range from already-parsed dates
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(DateRange::Custom { start, end })
    }

    /// Parse a selector value: "7d", "30", "all"
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.trim().to_lowercase();
        if trimmed == "all" {
            return Ok(DateRange::All);
        }

        let digits = trimmed.strip_suffix('d').unwrap_or(&trimmed);
        match digits.parse::<usize>() {
            Ok(days) if days > 0 => Ok(DateRange::Lookback(days)),
            _ => Err(CoreError::InvalidRange {
                input: s.to_string(),
            }),
        }
    }

    /// Days the window spans; `None` for `All`
    ///
    /// A custom range counts both ends, so 2026-01-01..2026-01-10 is 10 days.
    pub fn window_days(&self) -> Option<usize> {
        match self {
            DateRange::Lookback(days) => Some(*days),
            DateRange::Custom { start, end } => {
                Some(usize::try_from((*end - *start).num_days() + 1).unwrap_or(0))
            }
            DateRange::All => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            DateRange::Lookback(days) => format!("Last {} days", days),
            DateRange::Custom { start, end } => format!("{} to {}", start, end),
            DateRange::All => "All time".to_string(),
        }
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        input: input.to_string(),
    })
}

/// Records of `timeline` inside `range`, newest first
///
/// `timeline` must be ascending by date.
pub fn filter_by_range<'a>(timeline: &'a [DayRecord], range: &DateRange) -> Vec<&'a DayRecord> {
    let selected: &[DayRecord] = match range {
        DateRange::Lookback(days) => {
            let skip = timeline.len().saturating_sub(*days);
            &timeline[skip..]
        }
        DateRange::Custom { start, end } => {
            let from = timeline.partition_point(|d| d.date < *start);
            let to = timeline.partition_point(|d| d.date <= *end);
            &timeline[from..to.max(from)]
        }
        DateRange::All => timeline,
    };

    selected.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(end: NaiveDate, days: i64) -> Vec<DayRecord> {
        (0..days)
            .rev()
            .map(|offset| DayRecord::empty(end - Duration::days(offset)))
            .collect()
    }

    #[test]
    fn test_lookback_returns_most_recent_descending() {
        let timeline = series(date(2026, 1, 29), 60);
        let result = filter_by_range(&timeline, &DateRange::Lookback(7));

        assert_eq!(result.len(), 7);
        assert_eq!(result[0].date, date(2026, 1, 29));
        assert_eq!(result[6].date, date(2026, 1, 23));
        assert!(result.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn test_lookback_longer_than_series() {
        let timeline = series(date(2026, 1, 29), 5);
        assert_eq!(filter_by_range(&timeline, &DateRange::Lookback(90)).len(), 5);
        assert!(filter_by_range(&[], &DateRange::Lookback(7)).is_empty());
    }

    #[test]
    fn test_custom_bounds_are_inclusive() {
        let timeline = series(date(2026, 1, 29), 60);
        let range = DateRange::custom(Some("2026-01-01"), Some("2026-01-10")).unwrap();

        assert_eq!(range.window_days(), Some(10));
        let result = filter_by_range(&timeline, &range);
        assert_eq!(result.len(), 10);
        assert_eq!(result[0].date, date(2026, 1, 10));
        assert_eq!(result[9].date, date(2026, 1, 1));
    }

    #[test]
    fn test_custom_outside_series_is_empty() {
        let timeline = series(date(2026, 1, 29), 10);
        let range = DateRange::between(date(2025, 1, 1), date(2025, 2, 1)).unwrap();
        assert!(filter_by_range(&timeline, &range).is_empty());
    }

    #[test]
    fn test_custom_requires_both_bounds() {
        let err = DateRange::custom(Some("2026-01-01"), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::IncompleteRange {
                missing: RangeBound::End
            }
        ));
        let err = DateRange::custom(Some("  "), Some("2026-01-01")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::IncompleteRange {
                missing: RangeBound::Start
            }
        ));
        assert!(DateRange::custom(None, None).is_err());
    }

    #[test]
    fn test_custom_rejects_bad_input() {
        assert!(matches!(
            DateRange::custom(Some("2026-02-30"), Some("2026-03-01")),
            Err(CoreError::InvalidDate { .. })
        ));
        assert!(matches!(
            DateRange::custom(Some("2026-03-01"), Some("2026-02-01")),
            Err(CoreError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates_custom_bounds() {
        let ok: DateRange =
            serde_json::from_str(r#"{"custom":{"start":"2026-01-01","end":"2026-01-10"}}"#).unwrap();
        assert_eq!(ok.window_days(), Some(10));

        let inverted =
            serde_json::from_str::<DateRange>(r#"{"custom":{"start":"2026-01-10","end":"2026-01-01"}}"#);
        assert!(inverted.is_err());

        let lookback = serde_json::to_string(&DateRange::Lookback(7)).unwrap();
        assert_eq!(serde_json::from_str::<DateRange>(&lookback).unwrap(), DateRange::Lookback(7));
        assert_eq!(serde_json::from_str::<DateRange>(r#""all""#).unwrap(), DateRange::All);
    }

    #[test]
    fn test_window_days_of_unchecked_inverted_range_is_zero() {
        let range = DateRange::Custom {
            start: date(2026, 1, 10),
            end: date(2026, 1, 1),
        };
        assert_eq!(range.window_days(), Some(0));
    }

    #[test]
    fn test_single_day_custom_range() {
        let range = DateRange::between(date(2026, 1, 5), date(2026, 1, 5)).unwrap();
        assert_eq!(range.window_days(), Some(1));
    }

    #[test]
    fn test_all_returns_everything_descending() {
        let timeline = series(date(2026, 1, 29), 12);
        let result = filter_by_range(&timeline, &DateRange::All);
        assert_eq!(result.len(), 12);
        assert_eq!(result[0].date, date(2026, 1, 29));
        assert_eq!(DateRange::All.window_days(), None);
    }

    #[test]
    fn test_parse_selector_values() {
        assert_eq!(DateRange::parse("7d").unwrap(), DateRange::Lookback(7));
        assert_eq!(DateRange::parse("90").unwrap(), DateRange::Lookback(90));
        assert_eq!(DateRange::parse("ALL").unwrap(), DateRange::All);
        assert!(DateRange::parse("0d").is_err());
        assert!(DateRange::parse("soon").is_err());
    }
}
