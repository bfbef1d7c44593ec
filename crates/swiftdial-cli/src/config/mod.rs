//! Session context persistence
//!
//! The console keeps its client-side state (server URL, bearer token, user
//! identity, selected campaign, calling window) in a single JSON file with
//! an explicit load/save lifecycle. Nothing reads it ambiently; commands
//! load it once and pass it down.

use anyhow::{Context, Result};
use std::path::PathBuf;
use swiftdial_types::SessionContext;

pub struct SettingsManager;

impl SettingsManager {
    /// Get the swiftdial home directory (~/.swiftdial)
    pub fn swiftdial_home() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("SWIFTDIAL_HOME") {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".swiftdial"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Result<PathBuf> {
        Ok(Self::swiftdial_home()?.join("settings.json"))
    }

    /// Load the persisted context, creating defaults on first run.
    pub fn load() -> Result<SessionContext> {
        let path = Self::settings_path()?;

        if !path.exists() {
            let ctx = SessionContext::default();
            Self::save(&ctx)?;
            return Ok(ctx);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let ctx: SessionContext = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;
        Ok(ctx)
    }

    /// Save the context to disk
    pub fn save(ctx: &SessionContext) -> Result<()> {
        let path = Self::settings_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(ctx).context("Failed to serialize settings")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        // The file holds a bearer token; restrict to owner on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Drop stored credentials, e.g. after the server rejects the token.
    pub fn clear_credentials() -> Result<()> {
        let mut ctx = Self::load()?;
        ctx.clear_credentials();
        Self::save(&ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Serializes access to the SWIFTDIAL_HOME env var across tests.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn round_trips_context() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("SWIFTDIAL_HOME", dir.path());

        let mut ctx = SettingsManager::load().unwrap();
        assert!(!ctx.is_authenticated());

        ctx.token = Some("tok".to_string());
        ctx.user_id = Some("u1".to_string());
        ctx.selected_campaign = Some("c1".to_string());
        ctx.window_start = "08:30".to_string();
        SettingsManager::save(&ctx).unwrap();

        let reloaded = SettingsManager::load().unwrap();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.selected_campaign.as_deref(), Some("c1"));
        assert_eq!(reloaded.window_start, "08:30");

        std::env::remove_var("SWIFTDIAL_HOME");
    }

    #[test]
    fn clear_credentials_keeps_window() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("SWIFTDIAL_HOME", dir.path());

        let mut ctx = SessionContext::default();
        ctx.token = Some("tok".to_string());
        ctx.user_id = Some("u1".to_string());
        ctx.window_end = "18:00".to_string();
        SettingsManager::save(&ctx).unwrap();

        SettingsManager::clear_credentials().unwrap();
        let reloaded = SettingsManager::load().unwrap();
        assert!(!reloaded.is_authenticated());
        assert_eq!(reloaded.window_end, "18:00");

        std::env::remove_var("SWIFTDIAL_HOME");
    }
}
