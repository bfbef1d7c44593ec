//! Contact (CRM) commands

use crate::api::ApiClient;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use swiftdial_core::csv;
use swiftdial_types::{Contact, ContactDraft};

pub async fn list(search: Option<String>) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let mut contacts = client.list_contacts().await.map_err(super::surface)?;
    if let Some(query) = search {
        let query = query.to_lowercase();
        contacts.retain(|c| {
            c.name.to_lowercase().contains(&query)
                || c.phone.to_lowercase().contains(&query)
                || c.email.to_lowercase().contains(&query)
        });
    }

    println!("{}", "👥 Contacts".blue().bold());
    println!();
    if contacts.is_empty() {
        println!("   (No contacts)");
        return Ok(());
    }

    let completed = contacts.iter().filter(|c| c.is_completed()).count();
    for contact in &contacts {
        let flame = if contact.hot_lead { " 🔥" } else { "" };
        println!(
            "   {}  {}  {}  {} [{}]{}",
            contact.id.dimmed(),
            contact.name.cyan(),
            contact.phone,
            if contact.email.is_empty() {
                "-"
            } else {
                contact.email.as_str()
            },
            contact.status,
            flame,
        );
    }
    println!();
    println!(
        "   {} / {} contacted",
        completed.to_string().green(),
        contacts.len()
    );

    Ok(())
}

pub async fn add(name: String, phone: String, email: Option<String>) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let mut draft = ContactDraft::new(name.clone(), phone);
    draft.email = email;
    client.add_contacts(&[draft]).await.map_err(super::surface)?;

    println!("{} Contact {} added", "✅".green(), name.cyan());
    Ok(())
}

pub struct EditOptions {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

pub async fn edit(contact_id: &str, options: EditOptions) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let contacts = client.list_contacts().await.map_err(super::surface)?;
    let mut contact = contacts
        .into_iter()
        .find(|c| c.id == contact_id)
        .with_context(|| format!("Contact {} not found", contact_id))?;

    if let Some(name) = options.name {
        contact.name = name;
    }
    if let Some(phone) = options.phone {
        contact.phone = phone;
    }
    if let Some(email) = options.email {
        contact.email = email;
    }
    if let Some(status) = options.status {
        contact.status = status;
    }

    client.edit_contact(&contact).await.map_err(super::surface)?;
    println!("{} Contact updated", "✅".green());
    Ok(())
}

pub async fn delete(contact_id: &str, yes: bool) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete contact {}?", contact_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    client
        .delete_contact(contact_id)
        .await
        .map_err(super::surface)?;
    println!("{} Contact deleted", "✅".green());
    Ok(())
}

/// Trigger one call to a single contact.
pub async fn call(contact_id: &str) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    client.single_call(contact_id).await.map_err(super::surface)?;
    println!("{} Call initiated", "✅".green());
    Ok(())
}

/// Import contacts from a CSV file. Rows failing validation are reported
/// and skipped; valid rows are uploaded in one batch.
pub async fn import(path: &Path) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let import = csv::read_contacts_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    for notice in &import.skipped {
        println!("{} {}", "⚠️ ".yellow(), notice.message.yellow());
    }
    if import.contacts.is_empty() {
        println!("{}", "No importable rows found".yellow());
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Uploading {} contact(s)...", import.contacts.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.add_contacts(&import.contacts).await;
    spinner.finish_and_clear();
    result.map_err(super::surface)?;

    println!(
        "{} {} contact(s) imported, {} row(s) skipped",
        "✅".green(),
        import.contacts.len(),
        import.skipped.len()
    );
    Ok(())
}

/// Export a campaign's contacts (optionally hot leads only) to CSV.
pub async fn export(campaign_id: &str, hot_leads_only: bool, out: Option<&Path>) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let contacts = client
        .campaign_contacts(campaign_id, hot_leads_only)
        .await
        .map_err(super::surface)?;
    let contacts: Vec<Contact> = if hot_leads_only {
        contacts.into_iter().filter(|c| c.hot_lead).collect()
    } else {
        contacts
    };

    if contacts.is_empty() {
        println!("{}", "No contacts matched".yellow());
        return Ok(());
    }

    let default_name = if hot_leads_only {
        format!("campaign_{}_hot_leads.csv", campaign_id)
    } else {
        format!("campaign_{}_contacts.csv", campaign_id)
    };
    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_name.into());

    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    csv::write_contacts(file, &contacts)?;

    println!(
        "{} Wrote {} contact(s) to {}",
        "✅".green(),
        contacts.len(),
        path.display()
    );
    Ok(())
}
