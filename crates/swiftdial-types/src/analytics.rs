//! Analytics and lead-generator types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-campaign aggregates computed by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_calls: u64,
    /// Total talk time in seconds.
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub hot_leads: u64,
    /// Call-termination reason histogram.
    #[serde(default)]
    pub end_reason_counts: HashMap<String, u64>,
}

/// A scraped property listing surfaced by the lead generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub list_price: String,
    #[serde(default, rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub sq_ft: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}
