//! Geographic and traffic-source lookups

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sessions and revenue for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub name: String,
    /// (latitude, longitude) of the map marker
    pub coordinates: (f64, f64),
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub revenue: f64,
}

/// Sessions by traffic source ("Organic Search", "Instagram", ...)
pub type TrafficSources = BTreeMap<String, u64>;
