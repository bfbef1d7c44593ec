//! Phone number management commands

use crate::api::ApiClient;
use anyhow::Result;
use colored::Colorize;
use swiftdial_types::PhoneStatus;

pub async fn list() -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let numbers = client.phone_numbers().await.map_err(super::surface)?;

    println!("{}", "☎️  Phone Numbers".blue().bold());
    println!();
    if numbers.is_empty() {
        println!("   (No numbers registered)");
        return Ok(());
    }

    for phone in &numbers {
        let status = match phone.status {
            PhoneStatus::Active => "ACTIVE".green().to_string(),
            PhoneStatus::Inactive => "INACTIVE".dimmed().to_string(),
        };
        println!(
            "   {}  {}  {}  {}",
            phone.id.to_string().dimmed(),
            phone.number.cyan(),
            phone.label.as_deref().unwrap_or("-"),
            status,
        );
    }

    Ok(())
}

pub async fn add(number: String, label: Option<String>) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let added = client
        .add_phone_number(&number, label.as_deref())
        .await
        .map_err(super::surface)?;

    println!("{} Added {} (id {})", "✅".green(), added.number.cyan(), added.id);
    Ok(())
}

pub async fn remove(id: i64, yes: bool) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete phone number {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    client.delete_phone_number(id).await.map_err(super::surface)?;
    println!("{} Phone number removed", "✅".green());
    Ok(())
}

pub async fn set_status(id: i64, status: PhoneStatus) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    client
        .set_phone_status(id, status)
        .await
        .map_err(super::surface)?;

    println!("{} Phone number {} set to {}", "✅".green(), id, status);
    Ok(())
}
