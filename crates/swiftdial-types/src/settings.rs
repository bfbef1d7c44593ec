//! Account settings, phone numbers, and the persisted session context

use serde::{Deserialize, Serialize};

/// Voice-agent configuration held by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountSettings {
    #[serde(default)]
    pub voice_api_key: Option<String>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    /// Outbound caller-id phone number.
    #[serde(default)]
    pub phone_number_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub first_message: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub voice_provider: Option<String>,
    #[serde(default)]
    pub stability: Option<f64>,
    #[serde(default)]
    pub similarity_boost: Option<f64>,
    #[serde(default)]
    pub filler_injection_enabled: bool,
    #[serde(default)]
    pub backchanneling_enabled: bool,
    #[serde(default)]
    pub background_denoising_enabled: bool,
}

/// Status of an outbound line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhoneStatus {
    Active,
    Inactive,
}

impl PhoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneStatus::Active => "ACTIVE",
            PhoneStatus::Inactive => "INACTIVE",
        }
    }
}

impl std::fmt::Display for PhoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An outbound line registered to the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub id: i64,
    pub number: String,
    #[serde(default)]
    pub label: Option<String>,
    pub status: PhoneStatus,
}

/// Client-side state persisted between console runs.
///
/// Loaded at startup and passed explicitly to the API client and the
/// session coordinator; nothing reads it ambiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub version: String,
    pub server_url: String,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub selected_campaign: Option<String>,
    /// Calling-window bounds as "HH:MM".
    #[serde(default = "default_window_start")]
    pub window_start: String,
    #[serde(default = "default_window_end")]
    pub window_end: String,
}

fn default_window_start() -> String {
    "09:00".to_string()
}

fn default_window_end() -> String {
    "17:00".to_string()
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            server_url: "http://127.0.0.1:5001".to_string(),
            token: None,
            user_id: None,
            email: None,
            selected_campaign: None,
            window_start: default_window_start(),
            window_end: default_window_end(),
        }
    }
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }

    /// Forget credentials, keeping server URL and window configuration.
    pub fn clear_credentials(&mut self) {
        self.token = None;
        self.user_id = None;
        self.email = None;
        self.selected_campaign = None;
    }
}
