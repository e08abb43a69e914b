//! mktboard-core - Core library for mktboard
//!
//! Provides the dataset model, synthetic timeline generator, activity tier
//! classifier, heat-map calendar, date-range filter and derived analytics
//! behind the marketing dashboard panels.

pub mod analytics;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod models;
pub mod range;
pub mod state;
pub mod tier;
pub mod view;

pub use calendar::{build_calendar, ActivityLookup, CalendarView, Granularity, HeatmapSelection};
pub use config::DashboardConfig;
pub use error::CoreError;
pub use generator::{generate_timeline, GeneratorConfig};
pub use models::{AnalyticsData, DayRecord};
pub use range::{filter_by_range, DateRange};
pub use state::{Action, DashboardState, PlatformFilter, Tab};
pub use tier::{classify, Tier};
