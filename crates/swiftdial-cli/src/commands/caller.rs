//! Calling-session commands
//!
//! `caller run` hosts the session coordinator: it selects a campaign,
//! streams log lines and notices to the terminal while the poll timers run,
//! and tears everything down on Ctrl-C.

use crate::api::ApiClient;
use crate::config::SettingsManager;
use crate::coordinator::{SessionCoordinator, SessionEvent, StopReason};
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use swiftdial_core::window::CallWindow;
use swiftdial_types::{Campaign, LogLevel};

pub async fn run(campaign_id: Option<String>, auto_start: bool) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = Arc::new(ApiClient::new(&ctx));

    let campaigns = client.list_campaigns().await.map_err(super::surface)?;
    if campaigns.is_empty() {
        println!(
            "{}",
            "⚠️  No campaigns - create one with `swiftdial campaign create`".yellow()
        );
        return Ok(());
    }

    let campaign = match campaign_id {
        Some(wanted) => campaigns
            .iter()
            .find(|c| c.id == wanted || c.name == wanted)
            .cloned()
            .with_context(|| format!("Campaign {} not found", wanted))?,
        None => {
            // A saved selection that no longer exists falls back to the picker.
            let saved = ctx
                .selected_campaign
                .as_deref()
                .and_then(|id| campaigns.iter().find(|c| c.id == id).cloned());
            match saved {
                Some(campaign) => campaign,
                None => pick_campaign(&campaigns)?,
            }
        }
    };
    let window = CallWindow::parse(&ctx.window_start, &ctx.window_end)
        .context("Invalid calling window - fix it with `swiftdial caller window`")?;

    // Remember the selection for the next run, like the page reload path.
    {
        let mut ctx = ctx.clone();
        ctx.selected_campaign = Some(campaign.id.clone());
        SettingsManager::save(&ctx)?;
    }

    println!(
        "{} {}  window {} ({})",
        "📞 Working campaign".blue().bold(),
        campaign.name.cyan(),
        window.to_string().bold(),
        swiftdial_core::window::ORG_TIMEZONE
    );
    println!("{}", "   Ctrl-C stops calling and exits".dimmed());
    println!();

    let (coordinator, mut events) = SessionCoordinator::new(client, window);
    coordinator.select(campaign).await;

    if auto_start && !coordinator.start().await {
        println!("{}", "⚠️  Calling not started".yellow());
    }

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => render(event),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("{}", "Shutting down...".dimmed());
                break;
            }
        }
    }

    coordinator.deselect().await;
    println!("{}", "✅ Session closed".green());
    Ok(())
}

fn render(event: SessionEvent) {
    match event {
        SessionEvent::Log(entry) => {
            let message = match entry.level {
                LogLevel::Error => entry.message.red().to_string(),
                LogLevel::Success => entry.message.green().to_string(),
                LogLevel::Info => entry.message,
            };
            println!("  {} {}", entry.timestamp.dimmed(), message);
        }
        SessionEvent::Notice(notice) => {
            println!("{} {}", "⚠️ ".yellow(), notice.yellow().bold());
        }
        SessionEvent::Stats(stats) => {
            println!(
                "  {} calls {}  voicemail {}  hot {}  talk {} (avg {})  cost ${:.3} (avg ${:.3})",
                "stats".dimmed(),
                stats.total_calls,
                stats.voicemails,
                stats.hot_leads,
                stats.total_duration,
                stats.avg_duration,
                stats.total_cost,
                stats.avg_cost,
            );
        }
        SessionEvent::Stopped(reason) => {
            let why = match reason {
                StopReason::UserRequested => "requested",
                StopReason::OutsideWindow => "outside calling window",
            };
            println!("  {} calling stopped ({})", "●".red(), why);
        }
    }
}

fn pick_campaign(campaigns: &[Campaign]) -> Result<Campaign> {
    let names: Vec<&str> = campaigns.iter().map(|c| c.name.as_str()).collect();
    let picked = dialoguer::Select::new()
        .with_prompt("Select a campaign")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(campaigns[picked].clone())
}

/// Validate and persist the calling window.
pub async fn window(start: String, end: String) -> Result<()> {
    let window = CallWindow::parse(&start, &end).context("Invalid calling window")?;

    let mut ctx = SettingsManager::load()?;
    ctx.window_start = window.start_hhmm();
    ctx.window_end = window.end_hhmm();
    SettingsManager::save(&ctx)?;

    println!(
        "{} Calling window set to {} ({})",
        "✅".green(),
        window.to_string().bold(),
        swiftdial_core::window::ORG_TIMEZONE
    );
    Ok(())
}

/// Persist the campaign selection without running a session.
pub async fn select(campaign_id: String) -> Result<()> {
    let mut ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);
    let campaign = super::campaign::find_campaign(&client, &campaign_id).await?;

    ctx.selected_campaign = Some(campaign.id.clone());
    SettingsManager::save(&ctx)?;

    println!("{} Selected campaign {}", "✅".green(), campaign.name.cyan());
    Ok(())
}

pub async fn deselect() -> Result<()> {
    let mut ctx = SettingsManager::load()?;
    ctx.selected_campaign = None;
    SettingsManager::save(&ctx)?;

    println!("{} Campaign deselected", "✅".green());
    Ok(())
}
