//! Dashboard UI state
//!
//! The state that survives between events: active tab, social platform
//! filter, heat-map selection, and raw-data range. Render functions take
//! it by reference; only [`DashboardState::handle`] mutates it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{Granularity, HeatmapSelection};
use crate::models::{Platform, SocialPost};
use crate::range::DateRange;

/// Dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Social,
    Traffic,
    Geography,
    Heatmap,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Social,
        Tab::Traffic,
        Tab::Geography,
        Tab::Heatmap,
        Tab::Data,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Social => "Social Media",
            Tab::Traffic => "Traffic",
            Tab::Geography => "Geography",
            Tab::Heatmap => "Activity Heatmap",
            Tab::Data => "Raw Data",
        }
    }
}

/// Social panel filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    /// "all" or a platform name
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            PlatformFilter::All
        } else {
            PlatformFilter::Only(Platform::parse(s))
        }
    }

    pub fn matches(&self, post: &SocialPost) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(platform) => &post.platform == platform,
        }
    }

    /// Posts passing the filter, in input order
    pub fn apply<'a>(&self, posts: &'a [SocialPost]) -> Vec<&'a SocialPost> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }
}

/// User interactions the dashboard reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectTab(Tab),
    FilterPlatform(PlatformFilter),
    HeatmapNext,
    HeatmapPrevious,
    HeatmapView(Granularity),
    HeatmapYear(i32),
    HeatmapMonth(u32),
    /// Move several periods at once (negative: back)
    HeatmapShift(i32),
    /// Replace the whole heat-map selection
    HeatmapSelect(HeatmapSelection),
    SetRange(DateRange),
}

/// Everything the panels need besides the data itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub platform_filter: PlatformFilter,
    pub heatmap: HeatmapSelection,
    pub range: DateRange,
}

impl DashboardState {
    /// Initial state with the heat-map on the month containing `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            active_tab: Tab::default(),
            platform_filter: PlatformFilter::default(),
            heatmap: HeatmapSelection::containing(today, Granularity::Month),
            range: DateRange::default(),
        }
    }

    /// Apply `action`; returns `true` when the visible panel must re-render
    pub fn handle(&mut self, action: Action) -> bool {
        let before = self.clone();
        match action {
            Action::SelectTab(tab) => self.active_tab = tab,
            Action::FilterPlatform(filter) => self.platform_filter = filter,
            Action::HeatmapNext => self.heatmap.next(),
            Action::HeatmapPrevious => self.heatmap.previous(),
            Action::HeatmapView(view) => self.heatmap.set_view(view),
            Action::HeatmapYear(year) => self.heatmap.set_year(year),
            Action::HeatmapMonth(month) => self.heatmap.set_month(month),
            Action::HeatmapShift(periods) => self.heatmap.shift_by(periods),
            Action::HeatmapSelect(selection) => {
                self.heatmap = HeatmapSelection::new(selection.year, selection.month, selection.view)
            }
            Action::SetRange(range) => self.range = range,
        }

        let changed = *self != before;
        if changed {
            tracing::debug!(tab = ?self.active_tab, "Dashboard state changed");
        }
        changed
    }
}
