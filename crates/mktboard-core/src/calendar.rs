//! Heat-map calendar
//!
//! Lays out month grids (Sunday-first) of tier-annotated day cells for a
//! month, a quarter, or a whole year. Grids are rebuilt from scratch on every
//! call; the only state is the [`HeatmapSelection`].

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::DayRecord;
use crate::tier::{classify, Tier};

/// Earliest year the heat-map navigates to
pub const MIN_YEAR: i32 = 1970;
/// Latest year the heat-map navigates to
pub const MAX_YEAR: i32 = 9999;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar display scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" | "m" => Some(Granularity::Month),
            "quarter" | "q" => Some(Granularity::Quarter),
            "year" | "y" => Some(Granularity::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }
}

/// Event counts and revenue needed to classify one day
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayActivity {
    pub posts: u32,
    pub campaigns: u32,
    pub revenue: f64,
}

impl DayActivity {
    pub fn tier(&self) -> Tier {
        classify(self.posts, self.campaigns, self.revenue)
    }
}

impl From<&DayRecord> for DayActivity {
    fn from(day: &DayRecord) -> Self {
        Self {
            posts: day.posts,
            campaigns: day.campaigns,
            revenue: day.revenue,
        }
    }
}

/// Activity keyed by calendar date
#[derive(Debug, Clone, Default)]
pub struct ActivityLookup {
    days: HashMap<NaiveDate, DayActivity>,
}

impl ActivityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_timeline(timeline: &[DayRecord]) -> Self {
        Self {
            days: timeline
                .iter()
                .map(|day| (day.date, DayActivity::from(day)))
                .collect(),
        }
    }

    /// Build from `YYYY-MM-DD` keys; malformed keys are skipped
    pub fn from_iso_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, DayActivity)>,
    {
        let mut days = HashMap::new();
        for (key, activity) in pairs {
            match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Ok(date) => {
                    days.insert(date, activity);
                }
                Err(_) => tracing::warn!(key, "Skipping malformed activity date"),
            }
        }
        Self { days }
    }

    pub fn insert(&mut self, date: NaiveDate, activity: DayActivity) {
        self.days.insert(date, activity);
    }

    /// Activity for `date`, zero-filled when absent
    pub fn get(&self, date: NaiveDate) -> DayActivity {
        self.days.get(&date).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// One real day on the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub tier: Tier,
    pub posts: u32,
    pub campaigns: u32,
    pub revenue: f64,
}

/// A grid slot: leading padding or a day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell {
    Padding,
    Day(DayCell),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            CalendarCell::Day(cell) => Some(cell),
            CalendarCell::Padding => None,
        }
    }
}

/// Sunday-first grid of a single month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Compact grids are the small multiples of quarter and year views
    pub compact: bool,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Number of real (non-padding) cells
    pub fn day_count(&self) -> usize {
        self.cells.iter().filter(|c| c.as_day().is_some()).count()
    }

    /// Leading padding cells before day 1
    pub fn leading_padding(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, CalendarCell::Padding))
            .count()
    }

    /// Rows of seven cells; the last row may be short
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(CalendarCell::as_day)
    }
}

/// The grids of the current heat-map selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarView {
    pub selection: HeatmapSelection,
    pub months: Vec<MonthGrid>,
}

impl CalendarView {
    /// "January 2026", "Q1 2026" or "2026"
    pub fn title(&self) -> String {
        let s = &self.selection;
        match s.view {
            Granularity::Month => format!("{} {}", month_name(s.month), s.year),
            Granularity::Quarter => format!("Q{} {}", s.quarter(), s.year),
            Granularity::Year => s.year.to_string(),
        }
    }

    /// Days per tier across all grids, in `Tier::ALL` order
    pub fn legend(&self) -> [(Tier, usize); 4] {
        let mut counts = Tier::ALL.map(|tier| (tier, 0usize));
        for cell in self.months.iter().flat_map(|m| m.days()) {
            counts[cell.tier as usize].1 += 1;
        }
        counts
    }

    pub fn day_count(&self) -> usize {
        self.months.iter().map(MonthGrid::day_count).sum()
    }
}

/// Year, month and granularity the heat-map is showing
///
/// Always normalized: year within [`MIN_YEAR`]..=[`MAX_YEAR`], month within
/// 1..=12, and in quarter view the month is the quarter's first month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeatmapSelection {
    pub year: i32,
    pub month: u32,
    pub view: Granularity,
}

impl HeatmapSelection {
    pub fn new(year: i32, month: u32, view: Granularity) -> Self {
        let mut selection = Self {
            year: year.clamp(MIN_YEAR, MAX_YEAR),
            month: month.clamp(1, 12),
            view,
        };
        selection.normalize();
        selection
    }

    /// Selection whose period contains `date`
    pub fn containing(date: NaiveDate, view: Granularity) -> Self {
        Self::new(date.year(), date.month(), view)
    }

    /// Quarter (1..=4) of the selected month
    pub fn quarter(&self) -> u32 {
        (self.month - 1) / 3 + 1
    }

    pub fn set_view(&mut self, view: Granularity) {
        self.view = view;
        self.normalize();
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year.clamp(MIN_YEAR, MAX_YEAR);
    }

    pub fn set_month(&mut self, month: u32) {
        self.month = month.clamp(1, 12);
        self.normalize();
    }

    /// Move forward one period; stays put at [`MAX_YEAR`]'s last period
    pub fn next(&mut self) {
        self.shift_by(1);
    }

    /// Move back one period; stays put at [`MIN_YEAR`]'s first period
    pub fn previous(&mut self) {
        self.shift_by(-1);
    }

    /// Move `periods` periods (negative: back), stopping at the year bounds
    ///
    /// Same result as repeating [`next`](Self::next) or
    /// [`previous`](Self::previous), without stepping one at a time.
    pub fn shift_by(&mut self, periods: i32) {
        let step = self.step_months();
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let max_forward = (i64::from(MAX_YEAR) * 12 + 11 - index) / step;
        let max_back = (index - i64::from(MIN_YEAR) * 12) / step;
        let periods = i64::from(periods).clamp(-max_back, max_forward);
        if periods == 0 {
            return;
        }

        let index = index + periods * step;
        self.year = index.div_euclid(12) as i32;
        self.month = index.rem_euclid(12) as u32 + 1;
        self.normalize();
    }

    fn step_months(&self) -> i64 {
        match self.view {
            Granularity::Month => 1,
            Granularity::Quarter => 3,
            Granularity::Year => 12,
        }
    }

    fn normalize(&mut self) {
        if self.view == Granularity::Quarter {
            self.month = (self.quarter() - 1) * 3 + 1;
        }
    }

    /// Months covered by the selection, in display order
    pub fn months(&self) -> Vec<u32> {
        match self.view {
            Granularity::Month => vec![self.month],
            Granularity::Quarter => {
                let first = (self.quarter() - 1) * 3 + 1;
                (first..first + 3).collect()
            }
            Granularity::Year => (1..=12).collect(),
        }
    }
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Number of days in `month` of `year` (leap years included)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Grid for one month; out-of-range inputs are clamped first
pub fn build_month(year: i32, month: u32, lookup: &ActivityLookup, compact: bool) -> MonthGrid {
    let year = year.clamp(MIN_YEAR, MAX_YEAR);
    let month = month.clamp(1, 12);

    let mut cells = Vec::with_capacity(42);
    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        let leading = first.weekday().num_days_from_sunday() as usize;
        cells.extend(std::iter::repeat(CalendarCell::Padding).take(leading));

        for day in 1..=days_in_month(year, month) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let activity = lookup.get(date);
            cells.push(CalendarCell::Day(DayCell {
                date,
                day,
                tier: activity.tier(),
                posts: activity.posts,
                campaigns: activity.campaigns,
                revenue: activity.revenue,
            }));
        }
    }

    MonthGrid {
        year,
        month,
        compact,
        cells,
    }
}

/// Build every grid of the selected period
pub fn build_calendar(selection: &HeatmapSelection, lookup: &ActivityLookup) -> CalendarView {
    let compact = selection.view != Granularity::Month;
    let months = selection
        .months()
        .into_iter()
        .map(|month| build_month(selection.year, month, lookup, compact))
        .collect();

    tracing::debug!(
        year = selection.year,
        month = selection.month,
        view = selection.view.as_str(),
        "Built heat-map calendar"
    );

    CalendarView {
        selection: *selection,
        months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_february_day_counts() {
        let lookup = ActivityLookup::new();
        assert_eq!(build_month(2024, 2, &lookup, false).day_count(), 29);
        assert_eq!(build_month(2026, 2, &lookup, false).day_count(), 28);
        assert_eq!(build_month(2000, 2, &lookup, false).day_count(), 29);
        assert_eq!(build_month(2100, 2, &lookup, false).day_count(), 28);
    }

    #[test]
    fn test_leading_padding_is_sunday_first() {
        let lookup = ActivityLookup::new();
        // 2026-01-01 is a Thursday
        assert_eq!(build_month(2026, 1, &lookup, false).leading_padding(), 4);
        // 2026-02-01 is a Sunday
        assert_eq!(build_month(2026, 2, &lookup, false).leading_padding(), 0);
        // 2025-11-01 is a Saturday
        assert_eq!(build_month(2025, 11, &lookup, false).leading_padding(), 6);
    }

    #[test]
    fn test_missing_days_are_zero_filled() {
        let grid = build_month(2026, 3, &ActivityLookup::new(), false);
        assert!(grid.days().all(|c| c.tier == Tier::None && c.revenue == 0.0));
    }

    #[test]
    fn test_cells_carry_classified_tier() {
        let mut lookup = ActivityLookup::new();
        lookup.insert(
            date(2026, 1, 15),
            DayActivity {
                posts: 1,
                campaigns: 1,
                revenue: 100.0,
            },
        );
        let grid = build_month(2026, 1, &lookup, false);
        let cell = grid.days().find(|c| c.day == 15).unwrap();
        assert_eq!(cell.tier, Tier::Medium);
        assert_eq!(cell.date, date(2026, 1, 15));
    }

    #[test]
    fn test_iso_pairs_skip_malformed_keys() {
        let activity = DayActivity {
            posts: 1,
            ..Default::default()
        };
        let lookup = ActivityLookup::from_iso_pairs([
            ("2026-01-10", activity),
            ("2026-13-40", activity),
            ("yesterday", activity),
        ]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get(date(2026, 1, 10)).posts, 1);
    }

    #[test]
    fn test_views_nest() {
        let lookup = ActivityLookup::new();
        let month = build_calendar(&HeatmapSelection::new(2024, 5, Granularity::Month), &lookup);
        let quarter = build_calendar(&HeatmapSelection::new(2024, 5, Granularity::Quarter), &lookup);
        let year = build_calendar(&HeatmapSelection::new(2024, 5, Granularity::Year), &lookup);

        assert_eq!(month.months.len(), 1);
        assert!(!month.months[0].compact);
        assert_eq!(quarter.months.len(), 3);
        assert_eq!(
            quarter.months.iter().map(|g| g.month).collect::<Vec<_>>(),
            vec![4, 5, 6]
        );
        assert!(quarter.months.iter().all(|g| g.compact));
        assert_eq!(year.months.len(), 12);
        assert_eq!(year.day_count(), 366);

        // The month grid is the same layout as its compact counterpart
        assert_eq!(month.months[0].cells, quarter.months[1].cells);
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut lookup = ActivityLookup::new();
        lookup.insert(
            date(2026, 1, 3),
            DayActivity {
                posts: 3,
                campaigns: 0,
                revenue: 0.0,
            },
        );
        let selection = HeatmapSelection::new(2026, 1, Granularity::Quarter);
        assert_eq!(build_calendar(&selection, &lookup), build_calendar(&selection, &lookup));
    }

    #[test]
    fn test_titles() {
        let lookup = ActivityLookup::new();
        let title = |s: HeatmapSelection| build_calendar(&s, &lookup).title();
        assert_eq!(title(HeatmapSelection::new(2026, 1, Granularity::Month)), "January 2026");
        assert_eq!(title(HeatmapSelection::new(2026, 8, Granularity::Quarter)), "Q3 2026");
        assert_eq!(title(HeatmapSelection::new(2026, 8, Granularity::Year)), "2026");
    }

    #[test]
    fn test_legend_counts_every_day_once() {
        let lookup = ActivityLookup::new();
        let view = build_calendar(&HeatmapSelection::new(2026, 1, Granularity::Year), &lookup);
        let legend = view.legend();
        assert_eq!(legend[0], (Tier::None, 365));
        assert_eq!(legend.iter().map(|(_, n)| n).sum::<usize>(), 365);
    }

    #[test]
    fn test_selection_clamps_inputs() {
        let s = HeatmapSelection::new(20000, 0, Granularity::Month);
        assert_eq!((s.year, s.month), (MAX_YEAR, 1));
        let s = HeatmapSelection::new(1500, 13, Granularity::Month);
        assert_eq!((s.year, s.month), (MIN_YEAR, 12));
    }

    #[test]
    fn test_quarter_view_snaps_month() {
        let mut s = HeatmapSelection::new(2026, 11, Granularity::Month);
        s.set_view(Granularity::Quarter);
        assert_eq!(s.month, 10);
        assert_eq!(s.quarter(), 4);
        s.set_month(5);
        assert_eq!(s.month, 4);
    }

    #[test]
    fn test_navigation_wraps_years() {
        let mut s = HeatmapSelection::new(2025, 12, Granularity::Month);
        s.next();
        assert_eq!((s.year, s.month), (2026, 1));
        s.previous();
        assert_eq!((s.year, s.month), (2025, 12));

        let mut q = HeatmapSelection::new(2026, 1, Granularity::Quarter);
        q.previous();
        assert_eq!((q.year, q.month, q.quarter()), (2025, 10, 4));

        let mut y = HeatmapSelection::new(2026, 6, Granularity::Year);
        y.next();
        assert_eq!((y.year, y.month), (2027, 6));
    }

    #[test]
    fn test_navigation_stops_at_bounds() {
        let mut s = HeatmapSelection::new(MIN_YEAR, 1, Granularity::Month);
        s.previous();
        assert_eq!((s.year, s.month), (MIN_YEAR, 1));

        let mut y = HeatmapSelection::new(MAX_YEAR, 3, Granularity::Year);
        y.next();
        assert_eq!(y.year, MAX_YEAR);
    }

    #[test]
    fn test_shift_by_matches_repeated_steps() {
        for view in [Granularity::Month, Granularity::Quarter, Granularity::Year] {
            for periods in [-30i32, -7, 0, 5, 14] {
                let mut stepped = HeatmapSelection::new(2026, 5, view);
                for _ in 0..periods.unsigned_abs() {
                    if periods > 0 {
                        stepped.next();
                    } else {
                        stepped.previous();
                    }
                }
                let mut jumped = HeatmapSelection::new(2026, 5, view);
                jumped.shift_by(periods);
                assert_eq!(jumped, stepped, "{:?} by {}", view, periods);
            }
        }
    }

    #[test]
    fn test_shift_by_huge_values_pin_to_bounds() {
        let mut s = HeatmapSelection::new(2026, 5, Granularity::Month);
        s.shift_by(i32::MAX);
        assert_eq!((s.year, s.month), (MAX_YEAR, 12));
        s.shift_by(i32::MIN);
        assert_eq!((s.year, s.month), (MIN_YEAR, 1));

        let mut y = HeatmapSelection::new(2026, 5, Granularity::Year);
        y.shift_by(2_000_000_000);
        assert_eq!((y.year, y.month), (MAX_YEAR, 5));

        let mut q = HeatmapSelection::new(2026, 5, Granularity::Quarter);
        q.shift_by(-2_000_000_000);
        assert_eq!((q.year, q.month), (MIN_YEAR, 1));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 4), 30);
        assert_eq!(days_in_month(2026, 12), 31);
        assert_eq!(days_in_month(2026, 13), 0);
        assert_eq!(days_in_month(MAX_YEAR, 12), 31);
    }
}
