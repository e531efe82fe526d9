//! # Scout
//!
//! Checks which websites have an account registered under an email address.
//!
//! Every built-in provider is probed concurrently for each email. Results are
//! printed as they are, including a summary of providers whose answer was
//! inconclusive, so a missing account is never mistaken for proof of absence.

mod input;
mod output;

use anyhow::Context;
use clap::Parser;
use scout_core::{is_email, AppConfig};
use scout_registry::{ExclusionFilter, ProviderRegistry};
use scout_scanner::AccountLookupService;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(version)]
#[command(about = "Find the websites an email address is registered on", long_about = None)]
struct Args {
    /// Email addresses to look up
    emails: Vec<String>,

    /// Read email addresses from a file, one per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Leave out providers whose check may notify the account owner
    #[arg(long)]
    skip_password_recovery: bool,

    /// Configuration file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Overall deadline for one lookup in seconds
    #[arg(long)]
    deadline: Option<u64>,

    /// Print one JSON report per email instead of text
    #[arg(long)]
    json: bool,

    /// List the active providers and exit
    #[arg(long)]
    list_providers: bool,
}

impl Args {
    /// Resolve configuration: file, then environment, then flags.
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = AppConfig::load_from(path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                config.apply_env_overrides(|key| std::env::var(key).ok());
                config
            }
            None => AppConfig::load_with_env().context("failed to load configuration")?,
        };

        if self.skip_password_recovery {
            config.registry.skip_password_recovery = true;
        }
        if let Some(secs) = self.timeout {
            config.http.timeout_secs = secs;
        }
        if let Some(secs) = self.deadline {
            config.scan.run_deadline_secs = Some(secs);
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    fn collect_emails(&self) -> anyhow::Result<Vec<String>> {
        let mut emails = self.emails.clone();
        if let Some(path) = &self.input {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            emails.extend(input::parse_email_list(&contents));
        }
        Ok(emails)
    }
}

/// Initialize tracing subscriber for logging
///
/// The configured filter is the fallback when `RUST_LOG` is unset, so this
/// runs after configuration is resolved.
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn log_resolved_config(args: &Args, config: &AppConfig) {
    debug!(
        path = ?args.config,
        skip_password_recovery = config.registry.skip_password_recovery,
        disabled = ?config.registry.disabled_providers,
        timeout_secs = config.http.timeout_secs,
        run_deadline_secs = ?config.scan.run_deadline_secs,
        "resolved configuration"
    );
}

fn build_registry(config: &AppConfig) -> anyhow::Result<ProviderRegistry> {
    let providers = scout_probes::all_providers().context("invalid built-in provider")?;

    ProviderRegistry::builder()
        .register_all(providers)
        .exclude(ExclusionFilter::from_config(&config.registry))
        .build()
        .context("failed to build provider registry")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;
    init_tracing(&config.general.log_filter);
    log_resolved_config(&args, &config);

    let registry = build_registry(&config)?;

    if args.list_providers {
        print!("{}", output::render_providers(&registry));
        return Ok(());
    }

    let emails = args.collect_emails()?;
    if emails.is_empty() {
        anyhow::bail!("no email address given; pass one as an argument or use --input");
    }

    let service = AccountLookupService::from_config(&config, registry);
    info!(providers = service.registry().count(), emails = emails.len(), "starting lookups");

    for email in &emails {
        if !is_email(email) {
            warn!(%email, "skipping malformed email address");
            continue;
        }

        let report = service.lookup_report(email).await;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print!("{}", output::render_report(&report));
        }
    }

    Ok(())
}
