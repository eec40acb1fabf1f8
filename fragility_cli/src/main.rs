//! # Fragility CLI
//!
//! Command-line front end for the fire-fragility engine.
//!
//! - `fragility sweep` runs a full fragility sweep from a TOML config and
//!   writes one `results_{section}.csv` per section plus a `manifest.json`.
//! - `fragility evaluate` runs a single combination and writes the scalar
//!   `0`/`1` failure indicator artifact the external reliability driver
//!   consumes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fragility_core::capacity::LoadScenario;
use fragility_core::errors::{SimError, SimResult};
use fragility_core::fire::{CurveKind, FireExposure};
use fragility_core::sections::SectionDb;
use fragility_core::sweep::{evaluate_combination, evaluate_exposure, run_sweep, Combination};
use fragility_core::{RunManifest, SweepConfig};

#[derive(Parser)]
#[command(name = "fragility", about = "Steel-column fire-fragility analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full fragility sweep from a TOML config
    Sweep {
        /// Sweep configuration file (TOML)
        #[arg(long)]
        config: PathBuf,
        /// Directory receiving the result CSVs and manifest
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Evaluate one combination and write the 0/1 indicator artifact
    Evaluate {
        /// Sweep configuration file (TOML); supplies the compartment,
        /// material models, and section table
        #[arg(long)]
        config: PathBuf,
        /// Section key, e.g. W14X342
        #[arg(long)]
        section: String,
        /// Demand-to-capacity ratio at ambient temperature
        #[arg(long)]
        dcr: f64,
        /// Load eccentricity ratio
        #[arg(long, default_value_t = 0.0)]
        eccentricity: f64,
        /// Column length (in)
        #[arg(long)]
        length: f64,
        /// Fuel load energy density (MJ/m^2) for the parametric fire;
        /// ignored when --curve selects a standard exposure
        #[arg(long)]
        fire_load: Option<f64>,
        /// Standard curve override: iso834, astm_e119, external, hydrocarbon
        #[arg(long)]
        curve: Option<String>,
        /// Standard exposure duration (s)
        #[arg(long, default_value_t = 180.0 * 60.0)]
        duration: f64,
        /// Indicator artifact path
        #[arg(long, default_value = "results.out")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> SimResult<()> {
    match cli.command {
        Commands::Sweep { config, out_dir } => cmd_sweep(&config, &out_dir),
        Commands::Evaluate {
            config,
            section,
            dcr,
            eccentricity,
            length,
            fire_load,
            curve,
            duration,
            out,
        } => cmd_evaluate(
            &config,
            &section,
            dcr,
            eccentricity,
            length,
            fire_load,
            curve.as_deref(),
            duration,
            &out,
        ),
    }
}

fn load_config(path: &Path) -> SimResult<SweepConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SimError::io("read", path.display().to_string(), e.to_string()))?;
    toml::from_str(&text).map_err(|e| SimError::schema(format!("config parse error: {}", e)))
}

fn cmd_sweep(config_path: &Path, out_dir: &Path) -> SimResult<()> {
    let config = load_config(config_path)?;
    let db = SectionDb::load_from_csv(&config.section_table)?;

    let results = run_sweep(&db, &config)?;

    std::fs::create_dir_all(out_dir)
        .map_err(|e| SimError::io("mkdir", out_dir.display().to_string(), e.to_string()))?;

    for table in &results.tables {
        let path = out_dir.join(format!("results_{}.csv", table.section_id));
        table.write_csv(&path.display().to_string())?;
        println!("wrote {}", path.display());
    }

    write_manifest(&results.manifest, out_dir)?;

    if !results.skipped.is_empty() {
        println!("{} combination(s) skipped:", results.skipped.len());
        for skip in &results.skipped {
            println!("  {} ({}): {}", skip.section_id, skip.column_key, skip.error);
        }
    }
    Ok(())
}

fn write_manifest(manifest: &RunManifest, out_dir: &Path) -> SimResult<()> {
    let path = out_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| SimError::schema(format!("manifest serialization: {}", e)))?;
    std::fs::write(&path, json)
        .map_err(|e| SimError::io("write", path.display().to_string(), e.to_string()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn parse_standard_curve(name: &str) -> SimResult<CurveKind> {
    match name.trim().to_lowercase().replace('-', "_").as_str() {
        "iso834" => Ok(CurveKind::Iso834),
        "astm_e119" | "astme119" => Ok(CurveKind::AstmE119),
        "external" => Ok(CurveKind::External),
        "hydrocarbon" => Ok(CurveKind::Hydrocarbon),
        other => Err(SimError::precondition(
            "curve",
            format!("unknown standard curve '{}'", other),
        )),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_evaluate(
    config_path: &Path,
    section: &str,
    dcr: f64,
    eccentricity: f64,
    length: f64,
    fire_load: Option<f64>,
    curve: Option<&str>,
    duration: f64,
    out: &Path,
) -> SimResult<()> {
    let config = load_config(config_path)?;
    let db = SectionDb::load_from_csv(&config.section_table)?;
    let shape = db.lookup(section)?;

    let outcome = match curve {
        Some(name) => {
            let kind = parse_standard_curve(name)?;
            let exposure = FireExposure::standard(kind, duration, config.time_step_s)?;
            let factors = shape.factors()?;
            let scenario = LoadScenario::new(dcr, eccentricity, length);
            evaluate_exposure(
                &exposure,
                &factors,
                &config.thermal,
                &config.mechanical,
                shape.ix,
                &scenario,
            )?
        }
        None => {
            let fire_load = fire_load.ok_or_else(|| {
                SimError::precondition(
                    "fire_load",
                    "required unless --curve selects a standard exposure",
                )
            })?;
            let combination = Combination {
                section_id: section.to_string(),
                eccentricity,
                length_in: length,
                dcr,
                fire_load,
            };
            evaluate_combination(shape, &combination, &config)?
        }
    };

    let indicator = outcome.failure_indicator();
    std::fs::write(out, format!("{}\n", indicator))
        .map_err(|e| SimError::io("write", out.display().to_string(), e.to_string()))?;

    println!("indicator = {}", indicator);
    if let Ok(json) = serde_json::to_string_pretty(&outcome) {
        println!("{}", json);
    }
    Ok(())
}
