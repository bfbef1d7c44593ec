//! Analytics commands

use crate::api::ApiClient;
use anyhow::Result;
use colored::Colorize;
use swiftdial_core::duration::format_hms;

pub async fn summary(campaign_id: &str) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let analytics = client.analytics(campaign_id).await.map_err(super::surface)?;

    println!("{}", "📊 Campaign Analytics".blue().bold());
    println!();
    println!("   Total calls:  {}", analytics.total_calls);
    println!(
        "   Talk time:    {}",
        format_hms(analytics.total_duration.round() as u64)
    );
    println!("   Total cost:   ${:.3}", analytics.total_cost);
    println!("   Hot leads:    {}", analytics.hot_leads.to_string().green());

    if !analytics.end_reason_counts.is_empty() {
        println!();
        println!("   {}", "End reasons".bold());
        let mut reasons: Vec<_> = analytics.end_reason_counts.iter().collect();
        reasons.sort_by(|a, b| b.1.cmp(a.1));
        for (reason, count) in reasons {
            println!("     {:>5}  {}", count, reason.dimmed());
        }
    }

    Ok(())
}

pub async fn hot_leads(campaign_id: &str) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let leads = client.hot_leads(campaign_id).await.map_err(super::surface)?;

    println!("{}", "🔥 Hot Leads".blue().bold());
    println!();
    if leads.is_empty() {
        println!("   (None yet)");
        return Ok(());
    }

    for lead in &leads {
        println!(
            "   {}  {}  {}",
            lead.name.cyan(),
            lead.phone,
            lead.email.as_str().dimmed()
        );
        if let Some(summary) = &lead.call_summary {
            println!("      {}", summary.dimmed());
        }
    }
    println!();
    println!("   {} lead(s)", leads.len());

    Ok(())
}
