//! Command implementations

pub mod analytics;
pub mod auth;
pub mod caller;
pub mod campaign;
pub mod contacts;
pub mod leads;
pub mod phone;
pub mod settings;

use crate::api::ApiError;
use crate::config::SettingsManager;
use anyhow::{anyhow, bail, Result};
use swiftdial_types::SessionContext;
use tracing::warn;

/// Load the persisted context and require a logged-in user.
pub fn require_auth() -> Result<SessionContext> {
    let ctx = SettingsManager::load()?;
    if !ctx.is_authenticated() {
        bail!("Not logged in - run `swiftdial auth login` first");
    }
    Ok(ctx)
}

/// Map an API failure into a user-facing error. A rejected token clears the
/// stored credentials so the next command starts from a clean slate.
pub fn surface(e: ApiError) -> anyhow::Error {
    if matches!(e, ApiError::Unauthorized) {
        if let Err(clear_err) = SettingsManager::clear_credentials() {
            warn!("failed to clear credentials: {}", clear_err);
        }
        return anyhow!("Session expired - credentials cleared, run `swiftdial auth login`");
    }
    anyhow!(e)
}
