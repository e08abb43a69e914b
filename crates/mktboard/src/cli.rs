//! Terminal rendering of the dashboard panels
//!
//! Every formatter takes a view model from mktboard-core and returns either
//! a comfy-table rendering or pretty JSON.

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Row, Table};
use mktboard_core::analytics::{PlatformTotals, SourceShare};
use mktboard_core::calendar::{CalendarCell, CalendarView, MonthGrid};
use mktboard_core::models::{CountryStat, SocialPost, WeeklyActivity, WeeklyLevel};
use mktboard_core::view::{format_change, format_count, format_currency, RawDataView, SummaryCard};
use mktboard_core::Tier;
use serde::Serialize;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::None => Color::DarkGrey,
        Tier::Low => Color::DarkGreen,
        Tier::Medium => Color::Yellow,
        Tier::High => Color::Green,
    }
}

/// Single-character intensity marker
pub fn tier_glyph(tier: Tier) -> char {
    match tier {
        Tier::None => '·',
        Tier::Low => '░',
        Tier::Medium => '▒',
        Tier::High => '█',
    }
}

fn tier_cell(text: String, tier: Tier, no_color: bool) -> Cell {
    if no_color {
        Cell::new(text)
    } else {
        Cell::new(text).fg(tier_color(tier))
    }
}

// ============================================================================
// Overview
// ============================================================================

pub fn format_summary(cards: &[SummaryCard], json: bool, no_color: bool) -> String {
    if json {
        return to_json(cards, "[]");
    }

    let mut table = new_table(&["Metric", "Value", "Change"], no_color);
    for card in cards {
        let change = card.change.map(format_change).unwrap_or_else(|| "-".to_string());
        let change_cell = match card.change {
            Some(pct) if !no_color && pct > 0.0 => Cell::new(change).fg(Color::Green),
            Some(pct) if !no_color && pct < 0.0 => Cell::new(change).fg(Color::Red),
            _ => Cell::new(change),
        };
        table.add_row(vec![
            Cell::new(card.title),
            Cell::new(card.value.display()),
            change_cell,
        ]);
    }
    table.to_string()
}

// ============================================================================
// Raw data
// ============================================================================

pub fn format_raw_table(view: &RawDataView, json: bool, no_color: bool) -> String {
    if json {
        return to_json(&view.rows, "[]");
    }

    if view.is_empty() {
        return format!("No data for {}.", view.label);
    }

    let mut table = new_table(
        &[
            "Date", "Revenue", "Orders", "Sessions", "Visitors", "Page Views", "Posts",
            "Campaigns", "Activity",
        ],
        no_color,
    );
    for row in &view.rows {
        table.add_row(vec![
            Cell::new(row.date.format("%Y-%m-%d")),
            Cell::new(format_currency(row.revenue)),
            Cell::new(format_count(row.orders)),
            Cell::new(format_count(row.sessions)),
            Cell::new(format_count(row.visitors)),
            Cell::new(format_count(row.page_views)),
            Cell::new(row.posts),
            Cell::new(row.campaigns),
            tier_cell(row.tier.to_string(), row.tier, no_color),
        ]);
    }

    format!(
        "{} ({} days, {} revenue)\n{}",
        view.label,
        view.rows.len(),
        format_currency(view.total_revenue()),
        table
    )
}

// ============================================================================
// Heat-map
// ============================================================================

fn month_table(grid: &MonthGrid, no_color: bool) -> Table {
    let mut table = new_table(&WEEKDAYS, no_color);
    for week in grid.weeks() {
        let cells: Vec<Cell> = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Padding => Cell::new(""),
                CalendarCell::Day(day) => {
                    let text = if grid.compact {
                        tier_glyph(day.tier).to_string()
                    } else {
                        format!("{:>2} {}", day.day, tier_glyph(day.tier))
                    };
                    tier_cell(text, day.tier, no_color)
                }
            })
            .collect();
        table.add_row(Row::from(cells));
    }
    table
}

pub fn format_heatmap(view: &CalendarView, json: bool, no_color: bool) -> String {
    if json {
        return to_json(view, "{}");
    }

    let mut out = Vec::new();
    out.push(view.title());
    for grid in &view.months {
        if view.months.len() > 1 {
            out.push(String::new());
            out.push(format!("{} {}", grid.name(), grid.year));
        }
        out.push(month_table(grid, no_color).to_string());
    }

    let legend = view
        .legend()
        .iter()
        .map(|(tier, count)| format!("{} {} ({})", tier_glyph(*tier), tier.label(), count))
        .collect::<Vec<_>>()
        .join("   ");
    out.push(legend);
    out.join("\n")
}

// ============================================================================
// Social
// ============================================================================

pub fn format_posts(posts: &[&SocialPost], json: bool, no_color: bool) -> String {
    if json {
        return to_json(posts, "[]");
    }

    if posts.is_empty() {
        return "No posts found.".to_string();
    }

    let mut table = new_table(
        &[
            "Date", "Platform", "Influencer", "Views", "Reach", "Engagement", "Rate",
            "Revenue Impact", "Traffic Impact",
        ],
        no_color,
    );
    for post in posts {
        table.add_row(vec![
            Cell::new(post.date.format("%Y-%m-%d")),
            Cell::new(post.platform.name()),
            Cell::new(truncate(&post.influencer, 24)),
            Cell::new(format_count(post.views)),
            Cell::new(format_count(post.reach)),
            Cell::new(format_count(post.engagement)),
            Cell::new(format!("{:.1}%", post.engagement_rate() * 100.0)),
            Cell::new(format_currency(post.revenue_impact)),
            Cell::new(format_count(post.traffic_impact.round() as u64)),
        ]);
    }
    table.to_string()
}

pub fn format_platform_totals(totals: &[PlatformTotals], no_color: bool) -> String {
    let mut table = new_table(&["Platform", "Posts", "Views", "Engagement"], no_color);
    for total in totals {
        table.add_row(vec![
            Cell::new(total.platform.name()),
            Cell::new(total.posts),
            Cell::new(format_count(total.views)),
            Cell::new(format_count(total.engagement)),
        ]);
    }
    table.to_string()
}

// ============================================================================
// Weekly / traffic / geography
// ============================================================================

pub fn format_weekly(weeks: &[WeeklyActivity], json: bool, no_color: bool) -> String {
    if json {
        return to_json(weeks, "[]");
    }

    if weeks.is_empty() {
        return "No weekly data.".to_string();
    }

    let mut table = new_table(
        &["Year", "Week", "Revenue", "Sessions", "Posts", "Campaigns", "Level"],
        no_color,
    );
    for week in weeks {
        let level = format!("{:?}", week.level);
        let level_cell = if no_color {
            Cell::new(level)
        } else {
            match week.level {
                WeeklyLevel::High => Cell::new(level).fg(Color::Green).add_attribute(Attribute::Bold),
                WeeklyLevel::Medium => Cell::new(level).fg(Color::Yellow),
                WeeklyLevel::Low => Cell::new(level),
            }
        };
        table.add_row(vec![
            Cell::new(week.year),
            Cell::new(week.week),
            Cell::new(format_currency(week.revenue)),
            Cell::new(format_count(week.sessions)),
            Cell::new(week.posts),
            Cell::new(week.campaigns),
            level_cell,
        ]);
    }
    table.to_string()
}

pub fn format_traffic(shares: &[SourceShare], json: bool, no_color: bool) -> String {
    if json {
        return to_json(shares, "[]");
    }

    if shares.is_empty() {
        return "No traffic source data.".to_string();
    }

    let mut table = new_table(&["Source", "Sessions", "Share"], no_color);
    for share in shares {
        table.add_row(vec![
            Cell::new(&share.source),
            Cell::new(format_count(share.sessions)),
            Cell::new(format!("{:.1}%", share.share)),
        ]);
    }
    table.to_string()
}

pub fn format_countries(countries: &[&CountryStat], json: bool, no_color: bool) -> String {
    if json {
        return to_json(countries, "[]");
    }

    if countries.is_empty() {
        return "No geographic data.".to_string();
    }

    let mut table = new_table(&["Country", "Sessions", "Revenue", "Lat", "Lon"], no_color);
    for country in countries {
        table.add_row(vec![
            Cell::new(&country.name),
            Cell::new(format_count(country.sessions)),
            Cell::new(format_currency(country.revenue)),
            Cell::new(format!("{:.2}", country.coordinates.0)),
            Cell::new(format!("{:.2}", country.coordinates.1)),
        ]);
    }
    table.to_string()
}

// ============================================================================
// Helpers
// ============================================================================

/// Truncate to `max` characters, appending an ellipsis when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
