//! Typed view models for the dashboard panels
//!
//! Front ends render these; nothing here produces markup.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DayRecord, Summary};
use crate::range::{filter_by_range, DateRange};
use crate::tier::{classify, Tier};

/// Value shown on an overview card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CardValue {
    Currency(f64),
    Count(u64),
}

impl CardValue {
    pub fn display(&self) -> String {
        match self {
            CardValue::Currency(v) => format_currency(*v),
            CardValue::Count(v) => format_count(*v),
        }
    }
}

/// One overview card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: CardValue,
    /// Percent change against the previous period, when tracked
    pub change: Option<f64>,
}

pub fn summary_cards(summary: &Summary) -> Vec<SummaryCard> {
    vec![
        SummaryCard {
            title: "Total Revenue",
            value: CardValue::Currency(summary.total_revenue),
            change: Some(summary.revenue_change),
        },
        SummaryCard {
            title: "Total Orders",
            value: CardValue::Count(summary.total_orders),
            change: Some(summary.orders_change),
        },
        SummaryCard {
            title: "Website Visitors",
            value: CardValue::Count(summary.total_visitors),
            change: Some(summary.visitors_change),
        },
        SummaryCard {
            title: "Marketing Posts (30d)",
            value: CardValue::Count(summary.posts_last_30_days),
            change: None,
        },
        SummaryCard {
            title: "Campaigns",
            value: CardValue::Count(summary.total_campaigns),
            change: None,
        },
    ]
}

/// One row of the raw-data table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataRow {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: u64,
    pub sessions: u64,
    pub visitors: u64,
    pub page_views: u64,
    pub posts: u32,
    pub campaigns: u32,
    pub has_event: bool,
    pub tier: Tier,
}

impl From<&DayRecord> for RawDataRow {
    fn from(day: &DayRecord) -> Self {
        Self {
            date: day.date,
            revenue: day.revenue,
            orders: day.orders,
            sessions: day.sessions,
            visitors: day.visitors,
            page_views: day.page_views,
            posts: day.posts,
            campaigns: day.campaigns,
            has_event: day.has_event(),
            tier: classify(day.posts, day.campaigns, day.revenue),
        }
    }
}

/// Raw-data table for a range, newest row first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDataView {
    pub label: String,
    pub rows: Vec<RawDataRow>,
}

impl RawDataView {
    pub fn build(timeline: &[DayRecord], range: &DateRange) -> Self {
        Self {
            label: range.label(),
            rows: filter_by_range(timeline, range)
                .into_iter()
                .map(RawDataRow::from)
                .collect(),
        }
    }

    /// Nothing to show: the panel displays its "No data" state
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|r| r.revenue).sum()
    }
}

/// Thousands-separated integer: 1234567 -> "1,234,567"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Dollar amount with cents: 1234.5 -> "$1,234.50"
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_count(cents / 100), cents % 100)
}

/// Signed percentage with one decimal: 12.345 -> "+12.3%"
pub fn format_change(pct: f64) -> String {
    format!("{:+.1}%", pct)
}
