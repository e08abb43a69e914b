//! Marketing analytics derived from the daily timeline
//!
//! Headline summary, ISO-week rollups, post-event impact, and the
//! breakdowns behind the social, traffic and geography panels.

pub mod breakdown;
pub mod correlation;
pub mod summary;
pub mod weekly;


pub use breakdown::{platform_totals, top_countries, traffic_shares, PlatformTotals, SourceShare};
pub use correlation::{attribute_post_impact, compute_correlations, DayCorrelation};
pub use summary::{compute_summary, percent_change};
pub use weekly::weekly_rollup;

/// Days after an event counted towards its impact
pub const DEFAULT_IMPACT_WINDOW: usize = 7;

/// Days in the trailing rolling averages
pub const ROLLING_WINDOW: usize = 7;
