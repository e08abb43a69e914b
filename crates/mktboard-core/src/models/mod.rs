//! Data models for mktboard
//!
//! Mirrors the `analyticsData` structure produced by the export pipeline.

pub mod dataset;
pub mod day;
pub mod geo;
pub mod social;

pub use dataset::{AnalyticsData, DatasetRange, Summary, WeeklyActivity, WeeklyLevel};
pub use day::DayRecord;
pub use geo::{CountryStat, TrafficSources};
pub use social::{Platform, SocialPost};
