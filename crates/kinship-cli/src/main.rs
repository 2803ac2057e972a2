//! Kinship CLI - Family tree statistics and CSV export
//!
//! Fetches a tenant's family tree, prints the statistic cards, exports a
//! statistic's members as CSV, or keeps the statistics refreshed.

mod api;
mod config;
mod export;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use api::HttpMemberRepository;
use config::Config;
use export::DirectoryExportSink;
use kinship::adapters::JsonFileMemberRepository;
use kinship::{
    DomainError, Member, MemberRepository, RefreshConfig, Snapshot, StatKind, StatsReport,
    StatsService, StatsWidget, SystemClock, TenantScope, WidgetState,
};

/// Scope used when reading a saved snapshot from disk
const LOCAL_SCOPE: &str = "local";

#[derive(Parser)]
#[command(name = "kinship")]
#[command(about = "Kinship CLI - Family tree statistics and CSV export", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Manage tenant profiles (scope shortcuts)
    Tenant {
        #[command(subcommand)]
        action: TenantAction,
    },

    /// Print the statistic cards once
    Stats {
        /// Tenant profile or raw scope (defaults to the default profile)
        #[arg(short, long)]
        tenant: Option<String>,
        /// Read members from a saved JSON response instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the members behind one statistic as CSV
    Export {
        /// Statistic label or slug (e.g. "Living Members", no-photo, under_18)
        stat: String,
        #[arg(short, long)]
        tenant: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output directory (defaults to export_dir from config, then ".")
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Keep the statistics loaded and refreshed until Ctrl-C
    Watch {
        #[arg(short, long)]
        tenant: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Refresh interval in seconds (defaults to refresh_interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum TenantAction {
    /// Add a new tenant profile
    Add {
        /// Profile name (e.g., "hall")
        name: String,
        /// Tenant scope sent to the API
        #[arg(long)]
        scope: String,
        /// Display name (optional)
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List all tenant profiles
    List,
    /// Set default tenant profile
    Set {
        /// Profile name to set as default
        name: String,
    },
    /// Remove a tenant profile
    Remove {
        /// Profile name to remove
        name: String,
    },
}

/// Where members come from: the API or a saved response
enum MemberSource {
    Http(HttpMemberRepository),
    File(JsonFileMemberRepository),
}

#[async_trait]
impl MemberRepository for MemberSource {
    async fn fetch_members(&self, scope: &TenantScope) -> Result<Vec<Member>, DomainError> {
        match self {
            MemberSource::Http(repo) => repo.fetch_members(scope).await,
            MemberSource::File(repo) => repo.fetch_members(scope).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Tenant { action } => cmd_tenant(action),
        Commands::Stats { tenant, file, json } => cmd_stats(tenant, file, json).await,
        Commands::Export { stat, tenant, file, out } => cmd_export(stat, tenant, file, out).await,
        Commands::Watch { tenant, file, interval } => cmd_watch(tenant, file, interval).await,
        Commands::Config => cmd_config(),
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "kinship=debug,kinship_cli=debug"
    } else {
        "kinship=warn,kinship_cli=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Logs go to stderr so stdout stays clean for piping
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================
// Helpers
// ============================================

/// Build the member source and resolve the tenant scope
fn open_source(
    config: &Config,
    tenant: Option<&str>,
    file: Option<PathBuf>,
) -> Result<(MemberSource, TenantScope)> {
    if let Some(path) = file {
        let scope = config
            .resolve_tenant(tenant)
            .unwrap_or_else(|| LOCAL_SCOPE.to_string());
        return Ok((
            MemberSource::File(JsonFileMemberRepository::new(path)),
            TenantScope::new(scope),
        ));
    }

    let scope = config.resolve_tenant(tenant).context(
        "No tenant specified and no default tenant set. Use -t <tenant> or set a default.",
    )?;

    let repo = HttpMemberRepository::new(
        &config.base_url,
        &config.stats_path,
        config.api_key.as_deref(),
        config.request_timeout(),
    )?;

    Ok((MemberSource::Http(repo), TenantScope::new(scope)))
}

fn stats_service(source: MemberSource) -> StatsService<MemberSource> {
    StatsService::new(Arc::new(source), Arc::new(SystemClock))
}

/// Write a prompt with no trailing newline and flush it so it shows before
/// the work it announces
fn prompt(out: &mut impl Write, message: &str) -> std::io::Result<()> {
    write!(out, "{}", message)?;
    out.flush()
}

fn print_report(snapshot: &Snapshot, report: &StatsReport) {
    println!(
        "{} {} {}",
        "Family statistics for".bold(),
        snapshot.tenant.to_string().cyan().bold(),
        format!(
            "(snapshot v{}, fetched {})",
            snapshot.version,
            snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .dimmed()
    );

    for stat in &report.statistics {
        let value = stat.value.to_string();
        let value = if stat.kind.is_exportable() {
            value.green().bold()
        } else {
            value.yellow().bold()
        };
        println!("  {:<26} {}", stat.label, value);
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    config.set_api_key(api_key);

    // Test connection against the default tenant, if there is one
    if config.resolve_tenant(None).is_some() {
        let (source, scope) = open_source(&config, None, None)?;
        prompt(&mut std::io::stdout(), "Testing connection... ")?;

        match source.fetch_members(&scope).await {
            Ok(members) => println!("{} ({} members)", "OK".green(), members.len()),
            Err(e) => {
                println!("{}", "Failed".red());
                bail!("Could not load members for '{}': {}", scope, e);
            }
        }
    }

    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    if config.tenants.is_empty() {
        println!("\n{}", "Tip: Set up a tenant profile to avoid typing scopes:".yellow());
        println!("  kinship tenant add hall --scope <TENANT_SCOPE>");
        println!("  kinship tenant set hall");
    }

    Ok(())
}

fn cmd_tenant(action: TenantAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        TenantAction::Add { name, scope, display_name } => {
            config.add_tenant(name.clone(), scope.clone(), display_name);
            config.save()?;
            println!("{} Tenant '{}' added ({})", "✓".green(), name, scope);
        }

        TenantAction::List => {
            if config.tenants.is_empty() {
                println!("No tenant profiles configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  kinship tenant add <name> --scope <TENANT_SCOPE>");
                return Ok(());
            }

            println!("{}", "Tenants:".bold());
            for (name, profile) in &config.tenants {
                let is_default = config.default_tenant.as_ref() == Some(name);
                let default_marker = if is_default {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };
                let display_name = profile.name.as_deref().unwrap_or("-");

                println!(
                    "  {} {} ({}){}",
                    name.cyan(),
                    display_name.dimmed(),
                    profile.scope,
                    default_marker
                );
            }
        }

        TenantAction::Set { name } => {
            if config.set_default_tenant(name.clone()) {
                config.save()?;
                println!("{} Default tenant set to '{}'", "✓".green(), name);
            } else {
                bail!("Tenant '{}' not found", name);
            }
        }

        TenantAction::Remove { name } => {
            if config.remove_tenant(&name) {
                config.save()?;
                println!("{} Tenant '{}' removed", "✓".green(), name);
            } else {
                bail!("Tenant '{}' not found", name);
            }
        }
    }

    Ok(())
}

async fn cmd_stats(tenant: Option<String>, file: Option<PathBuf>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let (source, scope) = open_source(&config, tenant.as_deref(), file)?;

    let (snapshot, report) = stats_service(source)
        .report(&scope)
        .await
        .context("Failed to load family tree statistics")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print_report(&snapshot, &report);
    }

    Ok(())
}

async fn cmd_export(
    stat: String,
    tenant: Option<String>,
    file: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let kind: StatKind = stat.parse().map_err(|e: String| anyhow!(e))?;
    if !kind.is_exportable() {
        bail!("'{}' is not backed by a member list and cannot be exported", kind);
    }

    let config = Config::load()?;
    let (source, scope) = open_source(&config, tenant.as_deref(), file)?;

    let dir = out
        .or_else(|| config.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let sink = DirectoryExportSink::new(dir);

    let location = stats_service(source)
        .export(&scope, kind, &sink)
        .await
        .with_context(|| format!("Failed to export '{}'", kind))?;

    println!("{} {} exported to {}", "✓".green(), kind.label().cyan(), location);

    Ok(())
}

async fn cmd_watch(tenant: Option<String>, file: Option<PathBuf>, interval: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let (source, scope) = open_source(&config, tenant.as_deref(), file)?;

    let interval = interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| config.refresh_interval());

    let widget = StatsWidget::mount(
        stats_service(source),
        scope.clone(),
        RefreshConfig::default().with_interval(interval),
    );
    let mut updates = widget.subscribe();

    eprintln!(
        "{} {} every {:?} (Ctrl-C to stop)",
        "Watching".dimmed(),
        scope.to_string().cyan(),
        interval
    );

    loop {
        let state = updates.borrow_and_update().clone();
        match &state {
            WidgetState::Loading => eprintln!("{}", "Loading…".dimmed()),
            WidgetState::Error { message, cause } => {
                eprintln!("{} {}", message.red().bold(), format!("({})", cause).dimmed());
            }
            WidgetState::Ready(ready) => {
                if let Some(report) = widget.report() {
                    print_report(&ready.snapshot, &report);
                }
                if let Some(err) = &ready.last_refresh_error {
                    eprintln!("{} {}", "Refresh failed, showing previous snapshot:".yellow(), err);
                }
            }
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\n{}", "Stopping…".dimmed());
                break;
            }
        }
    }

    widget.unmount();
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!("  Stats path: {}", config.stats_path);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() { "Set".green() } else { "Not set".red() }
    );
    println!("  Refresh interval: {}s", config.refresh_interval_secs);
    println!("  Request timeout: {}s", config.request_timeout_secs);
    println!(
        "  Export dir: {}",
        config
            .export_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );
    println!(
        "  Default Tenant: {}",
        config.default_tenant.as_deref().unwrap_or("None").cyan()
    );
    println!("  Tenants: {}", config.tenants.len());

    Ok(())
}
