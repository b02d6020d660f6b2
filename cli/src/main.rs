//! DeathTax host driver
//!
//! Replays a script of death events against an in-memory ledger and prints
//! what each settlement moved.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use death_tax_core::bootstrap;
use death_tax_core::config::write_default;
use death_tax_core::{DeathEvent, DeathTaxSettings, InMemoryLedger, LedgerSnapshot, RecordingNotifier};
use report::{EventReport, RunReport};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "death-tax", about = "Settle death tax for a script of player deaths")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run death events through the settlement engine
    Run {
        /// Settings file (written with defaults if missing)
        #[arg(long, default_value = "death-tax.toml")]
        config: PathBuf,

        /// Ledger snapshot (JSON)
        #[arg(long)]
        ledger: PathBuf,

        /// Death events (JSON array)
        #[arg(long)]
        events: PathBuf,
    },

    /// Write the default settings file
    InitConfig {
        #[arg(default_value = "death-tax.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Run {
            config,
            ledger,
            events,
        } => {
            let report = run(&config, &ledger, &events)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
        Command::InitConfig { path } => {
            write_default(&path)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
        }
    }

    Ok(())
}

fn run(config_path: &Path, ledger_path: &Path, events_path: &Path) -> Result<RunReport> {
    let settings = DeathTaxSettings::load_or_init(config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let snapshot_text = fs::read_to_string(ledger_path)
        .with_context(|| format!("Failed to read ledger {}", ledger_path.display()))?;
    let snapshot = LedgerSnapshot::from_json_str(&snapshot_text).context("Failed to parse ledger JSON")?;

    let events_text = fs::read_to_string(events_path)
        .with_context(|| format!("Failed to read events {}", events_path.display()))?;
    let events: Vec<DeathEvent> =
        serde_json::from_str(&events_text).context("Failed to parse events JSON")?;

    let ledger = InMemoryLedger::from_snapshot(&snapshot);
    let notifier = RecordingNotifier::new();
    for entry in snapshot.accounts.iter().filter(|entry| entry.online) {
        notifier.set_online(&entry.account(), true);
    }

    let engine = bootstrap::enable(&settings, Some(&ledger), &notifier, |id| {
        snapshot.find(id).map(|entry| entry.name.clone())
    })?;

    log::info!("Replaying {} death event(s)", events.len());

    let results = events
        .iter()
        .map(|event| {
            let result = engine.on_death(event);
            log::debug!("{} died: {:?}", event.victim, result.outcome);
            EventReport::new(event, result)
        })
        .collect();

    Ok(RunReport {
        results,
        messages: notifier.take_delivered(),
        balances: ledger.snapshot().accounts,
    })
}
