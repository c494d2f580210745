use anyhow::{Context, Result};
use clap::Parser;
use golf_settle::args::{Cli, load_settings};
use golf_settle::model::ingest::{normalize_snapshot, parse_snapshot_json};
use golf_settle::model::{CourseCatalog, InMemoryCatalog};
use golf_settle::payout::compute_event_payouts;
use golf_settle::settlement::SettlementLedger;
use serde_json::json;
use std::fs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = load_settings(Cli::parse())?;

    let contents = fs::read_to_string(&settings.snapshot_json)
        .with_context(|| format!("read snapshot {}", settings.snapshot_json.display()))?;
    let raw = parse_snapshot_json(&contents)
        .with_context(|| format!("parse snapshot {}", settings.snapshot_json.display()))?;

    let catalog: Option<InMemoryCatalog> = match settings.catalog_json.as_ref() {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read catalog {}", path.display()))?;
            Some(
                serde_json::from_str(&contents)
                    .with_context(|| format!("parse catalog {}", path.display()))?,
            )
        }
        None => None,
    };
    let snapshot = normalize_snapshot(raw, catalog.as_ref().map(|c| c as &dyn CourseCatalog))?;

    let payouts = compute_event_payouts(&snapshot);
    log::info!(
        "event {}: {} games, {} scored",
        payouts.event_id,
        payouts.outcomes.len(),
        payouts.results().count()
    );
    let ledger = settings.settle.then(|| {
        SettlementLedger::settle(snapshot.event_id.clone(), &payouts.table.net(), settings.policy)
    });

    let report = serde_json::to_string_pretty(&json!({"payouts": payouts, "ledger": ledger}))?;
    match settings.output_json.as_ref() {
        Some(path) => {
            fs::write(path, report).with_context(|| format!("write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{report}"),
    }
    Ok(())
}
