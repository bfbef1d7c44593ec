//! Swiftdial CLI
//!
//! Console for the outbound-calling platform: campaign management, the
//! calling-session coordinator, CRM contacts, analytics, and account
//! settings, all against the remote calling backend.

mod api;
mod commands;
mod config;
mod coordinator;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "swiftdial")]
#[command(author, version, about = "Swiftdial - outbound-calling campaign console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Manage campaigns
    Campaign {
        #[command(subcommand)]
        action: CampaignAction,
    },

    /// Run and configure the calling session
    Caller {
        #[command(subcommand)]
        action: CallerAction,
    },

    /// Manage CRM contacts
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },

    /// Campaign analytics
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },

    /// Account settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage outbound phone numbers
    Phone {
        #[command(subcommand)]
        action: PhoneAction,
    },

    /// Browse property leads
    Leads {
        #[command(subcommand)]
        action: LeadsAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Login to the calling backend
    Login {
        /// Email address (optional - will prompt if not provided)
        #[arg(short, long)]
        email: Option<String>,
        /// Password (optional - will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Logout and forget stored credentials
    Logout,
    /// Show current user
    Whoami,
}

#[derive(Subcommand)]
enum CampaignAction {
    /// List campaigns
    List,
    /// Create a new campaign
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Call window start (HH:MM)
        #[arg(long)]
        window_start: Option<String>,
        /// Call window end (HH:MM)
        #[arg(long)]
        window_end: Option<String>,
        /// Contact ids to enroll (repeatable)
        #[arg(long = "contact")]
        contacts: Vec<String>,
    },
    /// Edit a campaign
    Edit {
        campaign_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        window_start: Option<String>,
        #[arg(long)]
        window_end: Option<String>,
    },
    /// Delete a campaign
    Delete {
        campaign_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CallerAction {
    /// Work a campaign: poll stats/logs/contacts and stream them here
    Run {
        /// Campaign id or name (defaults to the saved selection)
        #[arg(short, long)]
        campaign: Option<String>,
        /// Start calling immediately (subject to the calling window)
        #[arg(long)]
        start: bool,
    },
    /// Set the daily calling window (HH:MM, org timezone)
    Window { start: String, end: String },
    /// Save a campaign selection for later runs
    Select { campaign_id: String },
    /// Clear the saved campaign selection
    Deselect,
}

#[derive(Subcommand)]
enum ContactsAction {
    /// List contacts
    List {
        /// Filter by name, phone, or email
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a single contact
    Add {
        name: String,
        phone: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Edit a contact
    Edit {
        contact_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a contact
    Delete {
        contact_id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Trigger one call to a contact
    Call { contact_id: String },
    /// Import contacts from a CSV file (requires name and phone columns)
    Import { file: PathBuf },
    /// Export a campaign's contacts to CSV
    Export {
        campaign_id: String,
        /// Only export contacts flagged as hot leads
        #[arg(long)]
        hot_leads: bool,
        /// Output path (defaults to campaign_<id>_contacts.csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AnalyticsAction {
    /// Aggregate call metrics for a campaign
    Summary { campaign_id: String },
    /// Contacts flagged as hot leads
    HotLeads { campaign_id: String },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show account settings
    Show,
    /// Edit account settings
    Edit {
        #[arg(long)]
        voice_api_key: Option<String>,
        #[arg(long)]
        assistant_id: Option<String>,
        #[arg(long)]
        phone_number_id: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        first_message: Option<String>,
        #[arg(long)]
        system_prompt: Option<String>,
        #[arg(long)]
        voice_id: Option<String>,
        #[arg(long)]
        voice_provider: Option<String>,
        #[arg(long)]
        stability: Option<f64>,
        #[arg(long)]
        similarity_boost: Option<f64>,
        #[arg(long)]
        filler_injection: Option<bool>,
        #[arg(long)]
        backchanneling: Option<bool>,
        #[arg(long)]
        background_denoising: Option<bool>,
    },
}

#[derive(Subcommand)]
enum PhoneAction {
    /// List registered numbers
    List,
    /// Register a number
    Add {
        number: String,
        #[arg(long)]
        label: Option<String>,
    },
    /// Delete a number
    Remove {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Enable a number
    Enable { id: i64 },
    /// Disable a number
    Disable { id: i64 },
}

#[derive(Subcommand)]
enum LeadsAction {
    /// List scraped property leads
    List {
        /// Filter by address, name, or type
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "swiftdial_cli=debug,swiftdial_core=debug"
        } else {
            "swiftdial_cli=info"
        })
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let result = match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => match (email, password) {
                (Some(e), Some(p)) => commands::auth::login_non_interactive(&e, &p).await,
                _ => commands::auth::login_interactive().await,
            },
            AuthAction::Logout => commands::auth::logout().await,
            AuthAction::Whoami => commands::auth::whoami().await,
        },
        Commands::Campaign { action } => match action {
            CampaignAction::List => commands::campaign::list().await,
            CampaignAction::Create {
                name,
                description,
                window_start,
                window_end,
                contacts,
            } => {
                commands::campaign::create(commands::campaign::CreateOptions {
                    name,
                    description,
                    window_start,
                    window_end,
                    contacts,
                })
                .await
            }
            CampaignAction::Edit {
                campaign_id,
                name,
                description,
                window_start,
                window_end,
            } => {
                commands::campaign::edit(
                    &campaign_id,
                    commands::campaign::EditOptions {
                        name,
                        description,
                        window_start,
                        window_end,
                    },
                )
                .await
            }
            CampaignAction::Delete { campaign_id, yes } => {
                commands::campaign::delete(&campaign_id, yes).await
            }
        },
        Commands::Caller { action } => match action {
            CallerAction::Run { campaign, start } => commands::caller::run(campaign, start).await,
            CallerAction::Window { start, end } => commands::caller::window(start, end).await,
            CallerAction::Select { campaign_id } => commands::caller::select(campaign_id).await,
            CallerAction::Deselect => commands::caller::deselect().await,
        },
        Commands::Contacts { action } => match action {
            ContactsAction::List { search } => commands::contacts::list(search).await,
            ContactsAction::Add { name, phone, email } => {
                commands::contacts::add(name, phone, email).await
            }
            ContactsAction::Edit {
                contact_id,
                name,
                phone,
                email,
                status,
            } => {
                commands::contacts::edit(
                    &contact_id,
                    commands::contacts::EditOptions {
                        name,
                        phone,
                        email,
                        status,
                    },
                )
                .await
            }
            ContactsAction::Delete { contact_id, yes } => {
                commands::contacts::delete(&contact_id, yes).await
            }
            ContactsAction::Call { contact_id } => commands::contacts::call(&contact_id).await,
            ContactsAction::Import { file } => commands::contacts::import(&file).await,
            ContactsAction::Export {
                campaign_id,
                hot_leads,
                out,
            } => commands::contacts::export(&campaign_id, hot_leads, out.as_deref()).await,
        },
        Commands::Analytics { action } => match action {
            AnalyticsAction::Summary { campaign_id } => {
                commands::analytics::summary(&campaign_id).await
            }
            AnalyticsAction::HotLeads { campaign_id } => {
                commands::analytics::hot_leads(&campaign_id).await
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show().await,
            SettingsAction::Edit {
                voice_api_key,
                assistant_id,
                phone_number_id,
                model,
                provider,
                first_message,
                system_prompt,
                voice_id,
                voice_provider,
                stability,
                similarity_boost,
                filler_injection,
                backchanneling,
                background_denoising,
            } => {
                commands::settings::edit(commands::settings::EditOptions {
                    voice_api_key,
                    assistant_id,
                    phone_number_id,
                    model,
                    provider,
                    first_message,
                    system_prompt,
                    voice_id,
                    voice_provider,
                    stability,
                    similarity_boost,
                    filler_injection,
                    backchanneling,
                    background_denoising,
                })
                .await
            }
        },
        Commands::Phone { action } => match action {
            PhoneAction::List => commands::phone::list().await,
            PhoneAction::Add { number, label } => commands::phone::add(number, label).await,
            PhoneAction::Remove { id, yes } => commands::phone::remove(id, yes).await,
            PhoneAction::Enable { id } => {
                commands::phone::set_status(id, swiftdial_types::PhoneStatus::Active).await
            }
            PhoneAction::Disable { id } => {
                commands::phone::set_status(id, swiftdial_types::PhoneStatus::Inactive).await
            }
        },
        Commands::Leads { action } => match action {
            LeadsAction::List { query } => commands::leads::list(query).await,
        },
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(ref e) = result {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}
