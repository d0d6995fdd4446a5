//! CLI entry and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use memberdesk_domain::{Config, DiscountType, SortOrder, TierType};
use memberdesk_infra::{config, credential_store, ApiClient};

use crate::logging;
use crate::terminal::{TerminalNotifier, TerminalSessionListener};

mod commands;

#[derive(Parser)]
#[command(name = "memberdesk")]
#[command(version)]
#[command(about = "Memberdesk admin API client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: probe memberdesk.toml / config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API base URL from config
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the access/refresh tokens
    Login {
        #[arg(long, env = "MEMBERDESK_EMAIL")]
        email: String,
        #[arg(long, env = "MEMBERDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and forget stored tokens
    Logout,

    /// Show the logged-in admin
    Whoami,

    /// Report whether tokens are stored
    Status,

    /// Change the current admin's password
    ChangePassword {
        #[arg(long, env = "MEMBERDESK_CURRENT_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "MEMBERDESK_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },

    /// Manage pricing tiers
    Tiers {
        #[command(subcommand)]
        command: TierCommand,
    },

    /// Manage entry packages
    Packages {
        #[command(subcommand)]
        command: PackageCommand,
    },
}

/// Filters shared by list commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub(crate) struct ListArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    take: Option<u32>,
    #[arg(long)]
    skip: Option<u32>,
    #[arg(long, value_name = "FIELD")]
    sort_by: Option<String>,
    /// asc or desc
    #[arg(long)]
    order: Option<SortOrder>,
    /// Only active (true) or inactive (false) rows
    #[arg(long)]
    active: Option<bool>,
}

/// Editable tier fields.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct TierFields {
    #[arg(long)]
    name: String,
    /// MONTHLY or YEARLY
    #[arg(long = "type")]
    tier_type: TierType,
    /// PERCENT or WHOLE_NUMBER
    #[arg(long)]
    discount_type: DiscountType,
    #[arg(long)]
    price: f64,
    #[arg(long, default_value_t = 0.0)]
    discount: f64,
    #[arg(long, default_value = "")]
    summary: String,
    /// Repeat for each benefit
    #[arg(long = "benefit")]
    benefits: Vec<String>,
    #[arg(long)]
    entries: u32,
}

/// Editable package fields.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct PackageFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: f64,
    #[arg(long, default_value_t = 0.0)]
    discount: f64,
    #[arg(long)]
    entries: u32,
    #[arg(long)]
    summary: Option<String>,
}

#[derive(clap::Subcommand)]
pub(crate) enum TierCommand {
    /// List tiers
    List {
        /// MONTHLY or YEARLY
        #[arg(long = "type")]
        tier_type: Option<TierType>,
        #[arg(long)]
        recommended: Option<bool>,
        #[command(flatten)]
        filters: ListArgs,
    },
    /// Active tiers for one billing period
    Active {
        #[arg(long = "type")]
        tier_type: TierType,
    },
    /// Create a tier
    Create {
        #[command(flatten)]
        fields: TierFields,
    },
    /// Replace a tier's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: TierFields,
        #[arg(long)]
        recommended: bool,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Deactivate a tier
    Deactivate { id: String },
    /// Mark a tier as recommended
    Recommend { id: String },
    /// Swap two active tiers
    Reorder {
        first: String,
        second: String,
        #[arg(long = "type")]
        tier_type: TierType,
    },
    /// Delete a tier
    Delete { id: String },
}

#[derive(clap::Subcommand)]
pub(crate) enum PackageCommand {
    /// List packages
    List {
        #[command(flatten)]
        filters: ListArgs,
    },
    /// Active packages
    Active,
    /// Create a package
    Create {
        #[command(flatten)]
        fields: PackageFields,
    },
    /// Replace a package's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: PackageFields,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        position: Option<i32>,
    },
    /// Deactivate a package
    Deactivate { id: String },
    /// Mark a package as recommended
    Recommend { id: String },
    /// Swap two package positions
    Switch { first: String, second: String },
    /// Delete a package
    Delete { id: String },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("warning: could not load .env: {err}");
        }
    }
    logging::init(cli.verbose);

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    }
    .context("load config")?;

    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
        config::validate(&config).context("validate --base-url")?;
    }
    Ok(config)
}

fn build_client(config: &Config) -> Result<Arc<ApiClient>> {
    let store = credential_store(&config.storage).context("open credential store")?;
    let client = ApiClient::builder()
        .app_config(config)
        .store(store)
        .notifier(Arc::new(TerminalNotifier))
        .session_listener(Arc::new(TerminalSessionListener))
        .build()
        .context("build API client")?;
    Ok(Arc::new(client))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let client = build_client(&config)?;
    tracing::debug!(base_url = %client.base_url(), "client ready");

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(client, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(client).await,
        Commands::Whoami => commands::auth::whoami(client).await,
        Commands::Status => commands::auth::status(client).await,
        Commands::ChangePassword { current, new } => {
            commands::auth::change_password(client, &current, &new).await
        }
        Commands::Tiers { command } => commands::tiers::run(client, command).await,
        Commands::Packages { command } => commands::packages::run(client, command).await,
    }
}
