//! Authentication commands

use crate::api::{ApiClient, ApiError};
use crate::config::SettingsManager;
use anyhow::Result;
use colored::Colorize;

pub async fn login_interactive() -> Result<()> {
    println!("{}", "🔹 Login to Swiftdial".blue().bold());
    println!();

    let email: String = dialoguer::Input::new()
        .with_prompt("Email")
        .interact_text()?;

    let password: String = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()?;

    println!();
    println!("{}", "🔐 Authenticating...".dimmed());

    do_login(&email, &password).await
}

pub async fn login_non_interactive(email: &str, password: &str) -> Result<()> {
    println!("{}", "🔹 Login to Swiftdial".blue().bold());
    println!();
    println!("   Email: {}", email.dimmed());
    println!();
    println!("{}", "🔐 Authenticating...".dimmed());

    do_login(email, password).await
}

async fn do_login(email: &str, password: &str) -> Result<()> {
    let mut ctx = SettingsManager::load()?;
    let client = ApiClient::new(&ctx);

    let session = match client.login(email, password).await {
        Ok(session) => session,
        Err(ApiError::Unauthorized) => anyhow::bail!("Invalid email or password"),
        Err(e) => return Err(super::surface(e)),
    };

    ctx.token = Some(session.token);
    ctx.user_id = Some(session.user_id);
    ctx.email = Some(session.email.clone());
    SettingsManager::save(&ctx)?;

    println!();
    println!("{}", "✅ Login successful!".green().bold());
    println!();
    println!("   Welcome, {}!", session.email.cyan());

    Ok(())
}

pub async fn logout() -> Result<()> {
    let ctx = SettingsManager::load()?;

    if ctx.token.is_none() {
        println!("{}", "⚠️  Not logged in".yellow());
        return Ok(());
    }

    // The backend holds no session state; forgetting the token is enough.
    SettingsManager::clear_credentials()?;

    println!("{}", "✅ Logged out successfully".green());
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let ctx = SettingsManager::load()?;

    if !ctx.is_authenticated() {
        println!("{}", "⚠️  Not logged in".yellow());
        return Ok(());
    }

    println!("{}", "👤 User Info".blue().bold());
    println!();
    if let Some(id) = &ctx.user_id {
        println!("   ID:    {}", id.dimmed());
    }
    if let Some(email) = &ctx.email {
        println!("   Email: {}", email.cyan());
    }
    println!("   Server: {}", ctx.server_url);

    Ok(())
}
