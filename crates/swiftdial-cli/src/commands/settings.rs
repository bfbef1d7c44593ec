//! Account settings commands

use crate::api::ApiClient;
use anyhow::Result;
use colored::Colorize;

pub async fn show() -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let settings = client.get_settings().await.map_err(super::surface)?;

    println!("{}", "⚙️  Account Settings".blue().bold());
    println!();
    println!("   Provider:        {}", field(&settings.provider));
    println!("   Model:           {}", field(&settings.model));
    println!("   Assistant:       {}", field(&settings.assistant_id));
    println!("   Outbound number: {}", field(&settings.phone_number_id));
    println!("   Voice:           {} ({})", field(&settings.voice_id), field(&settings.voice_provider));
    if let Some(stability) = settings.stability {
        println!("   Stability:       {:.2}", stability);
    }
    if let Some(boost) = settings.similarity_boost {
        println!("   Similarity:      {:.2}", boost);
    }
    println!("   Filler words:    {}", toggle(settings.filler_injection_enabled));
    println!("   Backchanneling:  {}", toggle(settings.backchanneling_enabled));
    println!("   Denoising:       {}", toggle(settings.background_denoising_enabled));
    if let Some(message) = &settings.first_message {
        println!();
        println!("   First message: {}", message.dimmed());
    }

    Ok(())
}

fn field(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn toggle(on: bool) -> String {
    if on {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    }
}

pub struct EditOptions {
    pub voice_api_key: Option<String>,
    pub assistant_id: Option<String>,
    pub phone_number_id: Option<String>,
    pub model: Option<String>,
    pub provider: Option<String>,
    pub first_message: Option<String>,
    pub system_prompt: Option<String>,
    pub voice_id: Option<String>,
    pub voice_provider: Option<String>,
    pub stability: Option<f64>,
    pub similarity_boost: Option<f64>,
    pub filler_injection: Option<bool>,
    pub backchanneling: Option<bool>,
    pub background_denoising: Option<bool>,
}

/// Merge the provided fields into the current settings and save.
pub async fn edit(options: EditOptions) -> Result<()> {
    let ctx = super::require_auth()?;
    let client = ApiClient::new(&ctx);

    let mut settings = client.get_settings().await.map_err(super::surface)?;

    merge(&mut settings.voice_api_key, options.voice_api_key);
    merge(&mut settings.assistant_id, options.assistant_id);
    merge(&mut settings.phone_number_id, options.phone_number_id);
    merge(&mut settings.model, options.model);
    merge(&mut settings.provider, options.provider);
    merge(&mut settings.first_message, options.first_message);
    merge(&mut settings.system_prompt, options.system_prompt);
    merge(&mut settings.voice_id, options.voice_id);
    merge(&mut settings.voice_provider, options.voice_provider);
    if let Some(stability) = options.stability {
        settings.stability = Some(stability);
    }
    if let Some(boost) = options.similarity_boost {
        settings.similarity_boost = Some(boost);
    }
    if let Some(on) = options.filler_injection {
        settings.filler_injection_enabled = on;
    }
    if let Some(on) = options.backchanneling {
        settings.backchanneling_enabled = on;
    }
    if let Some(on) = options.background_denoising {
        settings.background_denoising_enabled = on;
    }

    client.edit_settings(&settings).await.map_err(super::surface)?;
    println!("{} Settings saved", "✅".green());
    Ok(())
}

fn merge(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *slot = Some(value);
    }
}
