use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::model::{Money, RoundingMode};
use crate::settlement::RoundingPolicy;

#[derive(Debug, Clone, Copy, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RoundingArg {
    Down,
    Nearest,
}

impl From<RoundingArg> for RoundingMode {
    fn from(value: RoundingArg) -> Self {
        match value {
            RoundingArg::Down => RoundingMode::Down,
            RoundingArg::Nearest => RoundingMode::Nearest,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Compute side-game payouts and settlements for a golf event snapshot.")]
pub struct Cli {
    #[arg(long)]
    pub snapshot_json: Option<PathBuf>,
    #[arg(long)]
    pub catalog_json: Option<PathBuf>,
    #[arg(long)]
    pub config_toml: Option<PathBuf>,
    /// Settlement rounding unit in dollars, e.g. 1 or 0.25.
    #[arg(long)]
    pub rounding_unit: Option<f64>,
    #[arg(long, value_enum)]
    pub rounding_mode: Option<RoundingArg>,
    #[arg(long)]
    pub output_json: Option<PathBuf>,
    /// Only compute payouts; skip settlement.
    #[arg(long)]
    pub no_settle: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileConfig {
    pub snapshot_json: Option<PathBuf>,
    pub catalog_json: Option<PathBuf>,
    pub rounding_unit: Option<f64>,
    pub rounding_mode: Option<RoundingArg>,
    pub output_json: Option<PathBuf>,
    pub no_settle: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub snapshot_json: PathBuf,
    pub catalog_json: Option<PathBuf>,
    pub policy: RoundingPolicy,
    pub output_json: Option<PathBuf>,
    pub settle: bool,
}

/// Merge CLI flags over an optional TOML file. CLI values win.
///
/// # Errors
/// Returns an error if the config file is unreadable or invalid, the
/// snapshot path is missing, or the rounding unit is not positive.
pub fn load_settings(cli: Cli) -> Result<Settings> {
    let file_config = match cli.config_toml.as_ref() {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read config toml {}", path.display()))?;
            toml::from_str::<FileConfig>(&contents)
                .with_context(|| format!("parse config toml {}", path.display()))?
        }
        None => FileConfig::default(),
    };

    let snapshot_json = cli
        .snapshot_json
        .or(file_config.snapshot_json)
        .ok_or_else(|| anyhow!("missing --snapshot-json"))?;

    let unit = cli.rounding_unit.or(file_config.rounding_unit).unwrap_or(1.0);
    if !unit.is_finite() || unit <= 0.0 {
        return Err(anyhow!("rounding unit must be positive, got {unit}"));
    }
    let mode = cli
        .rounding_mode
        .or(file_config.rounding_mode)
        .map_or(RoundingMode::Down, RoundingMode::from);

    Ok(Settings {
        snapshot_json,
        catalog_json: cli.catalog_json.or(file_config.catalog_json),
        policy: RoundingPolicy {
            unit: Money::from_dollars(unit),
            mode,
        },
        output_json: cli.output_json.or(file_config.output_json),
        settle: !(cli.no_settle || file_config.no_settle.unwrap_or(false)),
    })
}
