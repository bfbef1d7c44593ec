//! Lead-generator commands

use crate::api::ApiClient;
use anyhow::Result;
use colored::Colorize;

pub async fn list(query: Option<String>) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let mut properties = client.properties().await.map_err(super::surface)?;
    if let Some(query) = query {
        let query = query.to_lowercase();
        properties.retain(|p| {
            p.address.to_lowercase().contains(&query)
                || p.name.to_lowercase().contains(&query)
                || p.property_type.to_lowercase().contains(&query)
        });
    }

    println!("{}", "🏠 Property Leads".blue().bold());
    println!();
    if properties.is_empty() {
        println!("   (No matching properties)");
        return Ok(());
    }

    for property in &properties {
        println!(
            "   {}  {}  {}",
            property.id.to_string().dimmed(),
            property.address.cyan(),
            property.list_price.bold(),
        );
        println!(
            "      {} · {} · {}",
            property.name,
            property.phone_number,
            property.locality.as_str().dimmed(),
        );
    }
    println!();
    println!("   {} propert(ies)", properties.len());

    Ok(())
}
