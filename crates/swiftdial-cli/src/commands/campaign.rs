//! Campaign management commands

use crate::api::ApiClient;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use swiftdial_core::window::CallWindow;
use swiftdial_types::{Campaign, CampaignDraft, CampaignPatch};

pub async fn list() -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let campaigns = client.list_campaigns().await.map_err(super::surface)?;

    println!("{}", "📞 Campaigns".blue().bold());
    println!();
    if campaigns.is_empty() {
        println!("   (No campaigns yet - create one with `swiftdial campaign create`)");
        return Ok(());
    }

    let selected = ctx.selected_campaign.as_deref();
    for campaign in &campaigns {
        let marker = if selected == Some(campaign.id.as_str()) {
            "▶".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            " {} {}  {}  {}",
            marker,
            campaign.id.dimmed(),
            campaign.name.cyan(),
            format!(
                "{}-{}",
                campaign.call_window_start, campaign.call_window_end
            )
            .dimmed(),
        );
        if !campaign.description.is_empty() {
            println!("      {}", campaign.description.dimmed());
        }
    }

    Ok(())
}

pub struct CreateOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    /// Contact ids to enroll; empty enrolls nobody.
    pub contacts: Vec<String>,
}

pub async fn create(options: CreateOptions) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let name = match options.name {
        Some(name) => name,
        None => dialoguer::Input::new()
            .with_prompt("Campaign name")
            .interact_text()?,
    };
    let description = match options.description {
        Some(description) => description,
        None => dialoguer::Input::new()
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()?,
    };
    let window_start = match options.window_start {
        Some(start) => start,
        None => dialoguer::Input::new()
            .with_prompt("Call window start (HH:MM)")
            .default("09:00".to_string())
            .interact_text()?,
    };
    let window_end = match options.window_end {
        Some(end) => end,
        None => dialoguer::Input::new()
            .with_prompt("Call window end (HH:MM)")
            .default("17:00".to_string())
            .interact_text()?,
    };

    // Reject bad windows before the backend sees them.
    CallWindow::parse(&window_start, &window_end)
        .context("Invalid calling window")?;

    let enrolled = if options.contacts.is_empty() {
        Vec::new()
    } else {
        let all = client.list_contacts().await.map_err(super::surface)?;
        let enrolled: Vec<_> = all
            .into_iter()
            .filter(|c| options.contacts.iter().any(|id| id == &c.id))
            .collect();
        if enrolled.len() != options.contacts.len() {
            bail!("One or more contact ids were not found");
        }
        enrolled
    };

    let draft = CampaignDraft {
        user_id: ctx.user_id.clone().unwrap_or_default(),
        name: name.clone(),
        description,
        call_window_start: window_start,
        call_window_end: window_end,
    };
    client
        .create_campaign(&draft, &enrolled)
        .await
        .map_err(super::surface)?;

    println!(
        "{} Campaign {} created with {} contact(s)",
        "✅".green(),
        name.cyan(),
        enrolled.len()
    );
    Ok(())
}

pub struct EditOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
}

pub async fn edit(campaign_id: &str, options: EditOptions) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let current = find_campaign(&client, campaign_id).await?;
    let patch = CampaignPatch {
        name: options.name.unwrap_or(current.name),
        description: options.description.unwrap_or(current.description),
        call_window_start: options.window_start.unwrap_or(current.call_window_start),
        call_window_end: options.window_end.unwrap_or(current.call_window_end),
    };
    CallWindow::parse(&patch.call_window_start, &patch.call_window_end)
        .context("Invalid calling window")?;

    client
        .update_campaign(campaign_id, &patch)
        .await
        .map_err(super::surface)?;

    println!("{} Campaign updated", "✅".green());
    Ok(())
}

pub async fn delete(campaign_id: &str, yes: bool) -> Result<()> {
    let mut ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete campaign {}?", campaign_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    client
        .delete_campaign(campaign_id)
        .await
        .map_err(super::surface)?;

    // A deleted campaign cannot stay selected.
    if ctx.selected_campaign.as_deref() == Some(campaign_id) {
        ctx.selected_campaign = None;
        crate::config::SettingsManager::save(&ctx)?;
    }

    println!("{} Campaign deleted", "✅".green());
    Ok(())
}

pub async fn find_campaign(client: &ApiClient, campaign_id: &str) -> Result<Campaign> {
    let campaigns = client.list_campaigns().await.map_err(super::surface)?;
    campaigns
        .into_iter()
        .find(|c| c.id == campaign_id)
        .with_context(|| format!("Campaign {} not found", campaign_id))
}
