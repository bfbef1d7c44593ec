//! Campaign types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named outbound-calling effort with a contact list and a permitted
/// daily calling window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Window bounds as "HH:MM" strings on the wire.
    pub call_window_start: String,
    pub call_window_end: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub call_window_start: String,
    pub call_window_end: String,
}

/// Editable campaign fields sent on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignPatch {
    pub name: String,
    pub description: String,
    pub call_window_start: String,
    pub call_window_end: String,
}

/// Aggregate counters as the backend reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignStats {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub voicemail_count: u64,
    #[serde(default)]
    pub hot_leads: u64,
    /// Total talk time as "HH:MM:SS".
    #[serde(default = "zero_duration")]
    pub total_duration: String,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub avg_cost_per_call: f64,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

fn zero_duration() -> String {
    "00:00:00".to_string()
}

impl Default for CampaignStats {
    fn default() -> Self {
        Self {
            id: None,
            campaign_id: None,
            total_calls: 0,
            voicemail_count: 0,
            hot_leads: 0,
            total_duration: zero_duration(),
            total_cost: 0.0,
            avg_cost_per_call: 0.0,
            created_date: None,
            last_updated: None,
        }
    }
}

/// Formatted counters held client-side for display.
///
/// Derived from [`CampaignStats`]; the average duration is the only field
/// the client computes itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_calls: u64,
    pub voicemails: u64,
    pub hot_leads: u64,
    pub total_duration: String,
    pub avg_duration: String,
    pub total_cost: f64,
    pub avg_cost: f64,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            total_calls: 0,
            voicemails: 0,
            hot_leads: 0,
            total_duration: zero_duration(),
            avg_duration: zero_duration(),
            total_cost: 0.0,
            avg_cost: 0.0,
        }
    }
}
