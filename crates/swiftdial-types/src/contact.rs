//! Contact types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A lead owned by the backend; the client keeps a read-through cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Free-form call status ("pending", "completed", ...).
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub last_called: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub call_summary: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    /// Flagged by backend evaluation as likely to convert.
    #[serde(default)]
    pub hot_lead: bool,
}

fn default_status() -> String {
    "pending".to_string()
}

impl Contact {
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}

/// Contact fields accepted by the bulk-import endpoint.
///
/// Columns beyond name/phone/email are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_extra_columns_flatten_onto_the_payload() {
        let mut draft = ContactDraft::new("Jane", "555-0100");
        draft.extra.insert("company".to_string(), "Acme".to_string());

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["name"], "Jane");
        assert_eq!(value["company"], "Acme");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn contact_defaults_fill_missing_wire_fields() {
        let contact: Contact =
            serde_json::from_str(r#"{"id":"c1","name":"Jane","phone":"555-0100"}"#).unwrap();
        assert_eq!(contact.status, "pending");
        assert_eq!(contact.total_calls, 0);
        assert!(!contact.hot_lead);
    }
}
