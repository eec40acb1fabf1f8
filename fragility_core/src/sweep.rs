//! # Fragility Sweep Driver
//!
//! Iterates section x eccentricity x length x DCR x fire-load combinations,
//! runs the fire -> thermal -> capacity chain for each, and aggregates the
//! failure indicators into one fragility table per section.
//!
//! The single-combination evaluation is a pure function of its inputs, so
//! sections are dispatched in parallel; nothing mutable is shared beyond the
//! read-only section database.
//!
//! Sweeping fire loads in decreasing order allows an early exit: once a
//! combination survives a given fire load, the remaining (milder) levels are
//! recorded as non-failures without evaluation. The `exhaustive` flag
//! disables the shortcut so the equivalence can be checked.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::capacity::{FailureRecord, LoadScenario, Outcome, critical_temperature};
use crate::config::{RunManifest, SweepConfig};
use crate::errors::{SimError, SimResult};
use crate::fire::FireExposure;
use crate::materials::{SteelMechanical, ThermalModel};
use crate::sections::{SectionDb, SectionFactors, SectionShape};
use crate::thermal::UnprotectedScheme;

/// One point of the sweep grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub section_id: String,
    pub eccentricity: f64,
    pub length_in: f64,
    pub dcr: f64,
    pub fire_load: f64,
}

impl Combination {
    /// Result column key: `{section}_{eccentricity:.3}_{length}_{dcr:.2}`.
    pub fn column_key(section_id: &str, eccentricity: f64, length_in: f64, dcr: f64) -> String {
        format!("{}_{:.3}_{}_{:.2}", section_id, eccentricity, length_in, dcr)
    }
}

/// Run the thermal-mechanical chain over an already-built exposure.
///
/// Pure function of its inputs; this is the unit the golden regression run
/// and the external reliability driver both exercise.
pub fn evaluate_exposure(
    exposure: &FireExposure,
    factors: &SectionFactors,
    thermal: &ThermalModel,
    mechanical: &SteelMechanical,
    moment_of_inertia_in4: f64,
    scenario: &LoadScenario,
) -> SimResult<Outcome> {
    let scheme = UnprotectedScheme::for_exposure(exposure.kind, *thermal);
    let state = scheme.integrate(exposure, factors)?;
    critical_temperature(&state, mechanical, moment_of_inertia_in4, scenario)
}

/// Evaluate one sweep combination: build the parametric exposure for its
/// fire load and run the chain.
pub fn evaluate_combination(
    shape: &SectionShape,
    combination: &Combination,
    config: &SweepConfig,
) -> SimResult<Outcome> {
    let factors = shape.factors()?;
    let exposure = config
        .compartment
        .fire(combination.fire_load, config.time_step_s)
        .exposure()?;
    let scenario = LoadScenario::new(
        combination.dcr,
        combination.eccentricity,
        combination.length_in,
    );
    evaluate_exposure(
        &exposure,
        &factors,
        &config.thermal,
        &config.mechanical,
        shape.ix,
        &scenario,
    )
}

/// One result column: failure probability per fire-load level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragilityColumn {
    pub key: String,
    pub probabilities: Vec<f64>,
}

/// Aggregated fragility table for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragilityTable {
    pub section_id: String,
    pub fire_loads: Vec<f64>,
    pub columns: Vec<FragilityColumn>,
}

impl FragilityTable {
    /// Render the table as CSV: a `fire_load` column followed by one column
    /// per (eccentricity, length, DCR) combination.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("fire_load");
        for column in &self.columns {
            out.push(',');
            out.push_str(&column.key);
        }
        out.push('\n');
        for (row, fire_load) in self.fire_loads.iter().enumerate() {
            out.push_str(&fire_load.to_string());
            for column in &self.columns {
                out.push(',');
                out.push_str(&column.probabilities[row].to_string());
            }
            out.push('\n');
        }
        out
    }

    /// Write the CSV next to the other run artifacts.
    pub fn write_csv(&self, path: &str) -> SimResult<()> {
        std::fs::write(path, self.to_csv())
            .map_err(|e| SimError::io("write", path, e.to_string()))
    }
}

/// A combination the sweep had to skip, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCombination {
    pub section_id: String,
    pub column_key: String,
    pub fire_load: f64,
    pub error: SimError,
}

/// Everything a sweep produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub manifest: RunManifest,
    pub tables: Vec<FragilityTable>,
    /// One record per evaluated combination (early-exited levels are not
    /// evaluated and produce no record)
    pub records: Vec<FailureRecord>,
    pub skipped: Vec<SkippedCombination>,
}

/// Run the full sweep. Sections evaluate in parallel; an unknown section is
/// skipped with a warning while the rest of the sweep continues.
pub fn run_sweep(db: &SectionDb, config: &SweepConfig) -> SimResult<SweepResults> {
    config.validate()?;
    let manifest = RunManifest::new(config);
    info!(
        run_id = %manifest.run_id,
        sections = config.sections.len(),
        "starting fragility sweep"
    );

    let per_section: Vec<SectionSweep> = config
        .sections
        .par_iter()
        .map(|section_id| sweep_section(db, config, section_id))
        .collect();

    let mut tables = Vec::new();
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for mut section in per_section {
        if let Some(table) = section.table {
            tables.push(table);
        }
        records.append(&mut section.records);
        skipped.append(&mut section.skipped);
    }

    info!(
        tables = tables.len(),
        records = records.len(),
        skipped = skipped.len(),
        "fragility sweep finished"
    );
    Ok(SweepResults { manifest, tables, records, skipped })
}

struct SectionSweep {
    table: Option<FragilityTable>,
    records: Vec<FailureRecord>,
    skipped: Vec<SkippedCombination>,
}

fn sweep_section(db: &SectionDb, config: &SweepConfig, section_id: &str) -> SectionSweep {
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let shape = match db.lookup(section_id) {
        Ok(shape) => shape,
        Err(error) => {
            warn!(section = section_id, %error, "skipping unknown section");
            skipped.push(SkippedCombination {
                section_id: section_id.to_string(),
                column_key: String::new(),
                fire_load: f64::NAN,
                error,
            });
            return SectionSweep { table: None, records, skipped };
        }
    };

    info!(section = section_id, "sweeping section");
    let mut columns = Vec::new();
    for &eccentricity in &config.eccentricities {
        for &length_in in &config.lengths_in {
            for &dcr in &config.dcrs {
                let key = Combination::column_key(section_id, eccentricity, length_in, dcr);
                let mut probabilities = vec![0.0; config.fire_loads.len()];
                for (row, &fire_load) in config.fire_loads.iter().enumerate() {
                    let combination = Combination {
                        section_id: section_id.to_string(),
                        eccentricity,
                        length_in,
                        dcr,
                        fire_load,
                    };
                    match evaluate_combination(shape, &combination, config) {
                        Ok(outcome) => {
                            let indicator = f64::from(outcome.failure_indicator());
                            probabilities[row] = indicator;
                            records.push(FailureRecord {
                                section_id: combination.section_id,
                                eccentricity,
                                length_in,
                                dcr,
                                fire_load,
                                outcome,
                            });
                            if indicator == 0.0 && !config.exhaustive {
                                // milder fire loads cannot fail this
                                // combination; leave the remaining rows zero
                                break;
                            }
                        }
                        Err(error) => {
                            warn!(
                                section = section_id,
                                column = %key,
                                fire_load,
                                %error,
                                "combination failed; skipping its remaining fire loads"
                            );
                            skipped.push(SkippedCombination {
                                section_id: section_id.to_string(),
                                column_key: key.clone(),
                                fire_load,
                                error,
                            });
                            break;
                        }
                    }
                }
                columns.push(FragilityColumn { key, probabilities });
            }
        }
    }

    SectionSweep {
        table: Some(FragilityTable {
            section_id: section_id.to_string(),
            fire_loads: config.fire_loads.clone(),
            columns,
        }),
        records,
        skipped,
    }
}
