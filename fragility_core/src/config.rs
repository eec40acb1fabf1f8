//! # Sweep Configuration and Run Metadata
//!
//! Explicit parameter structs for a fragility sweep. Everything a run needs
//! travels through [`SweepConfig`]; nothing is read from ambient state.
//! The structs deserialize from TOML or JSON, so the CLI config file maps
//! onto them field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SimError, SimResult};
use crate::fire::{Occupancy, ParametricFire};
use crate::materials::{SteelMechanical, ThermalModel};

/// Compartment definition shared by every parametric fire in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompartmentConfig {
    pub occupancy: Occupancy,
    /// Lining thermal conductivity (W/(m K))
    pub lining_conductivity: f64,
    /// Lining density (kg/m^3)
    pub lining_density: f64,
    /// Lining specific heat (J/(kg K))
    pub lining_specific_heat: f64,
    /// Window base (m)
    pub window_base: f64,
    /// Window height (m)
    pub window_height: f64,
    /// Room plan dimension 1 (m)
    pub room_length1: f64,
    /// Room plan dimension 2 (m)
    pub room_length2: f64,
    /// Room height (m)
    pub room_height: f64,
}

impl Default for CompartmentConfig {
    /// Gypsum-lined office, 6 x 4 x 3 m with a 4 x 1.5 m opening.
    fn default() -> Self {
        CompartmentConfig {
            occupancy: Occupancy::Office,
            lining_conductivity: 0.48,
            lining_density: 1440.0,
            lining_specific_heat: 840.0,
            window_base: 4.0,
            window_height: 1.5,
            room_length1: 6.0,
            room_length2: 4.0,
            room_height: 3.0,
        }
    }
}

impl CompartmentConfig {
    /// Instantiate the parametric fire for one fuel load level.
    pub fn fire(&self, fuel_load_energy_density: f64, time_step_seconds: f64) -> ParametricFire {
        let mut fire = ParametricFire::new(
            self.occupancy,
            self.lining_conductivity,
            self.lining_density,
            self.lining_specific_heat,
            self.window_base,
            self.window_height,
            self.room_length1,
            self.room_length2,
            self.room_height,
            fuel_load_energy_density,
        );
        fire.time_step_seconds = time_step_seconds;
        fire
    }
}

/// Full definition of a fragility sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Path to the section property CSV
    pub section_table: String,
    /// Section keys to sweep
    pub sections: Vec<String>,
    /// Eccentricity axis
    pub eccentricities: Vec<f64>,
    /// Column length axis (in)
    pub lengths_in: Vec<f64>,
    /// Demand-to-capacity ratio axis
    pub dcrs: Vec<f64>,
    /// Fuel load energy density axis (MJ/m^2), strictly decreasing
    pub fire_loads: Vec<f64>,
    /// Compartment driving the parametric fires
    #[serde(default)]
    pub compartment: CompartmentConfig,
    /// Exposure grid spacing (s); must respect the unprotected 5 s bound
    #[serde(default = "default_time_step")]
    pub time_step_s: f64,
    /// Mechanical property model
    #[serde(default)]
    pub mechanical: SteelMechanical,
    /// Thermal property model
    #[serde(default)]
    pub thermal: ThermalModel,
    /// Disable the descending fire-load early exit
    #[serde(default)]
    pub exhaustive: bool,
}

fn default_time_step() -> f64 {
    5.0
}

impl SweepConfig {
    /// Validate the sweep axes.
    pub fn validate(&self) -> SimResult<()> {
        if self.sections.is_empty() {
            return Err(SimError::precondition("sections", "at least one section"));
        }
        for (name, axis) in [
            ("eccentricities", &self.eccentricities),
            ("lengths_in", &self.lengths_in),
            ("dcrs", &self.dcrs),
            ("fire_loads", &self.fire_loads),
        ] {
            if axis.is_empty() {
                return Err(SimError::precondition(name, "axis is empty"));
            }
        }
        for i in 1..self.fire_loads.len() {
            if self.fire_loads[i] >= self.fire_loads[i - 1] {
                return Err(SimError::precondition(
                    "fire_loads",
                    "must be strictly decreasing for the severity sweep",
                ));
            }
        }
        if self.time_step_s <= 0.0 {
            return Err(SimError::precondition(
                "time_step_s",
                format!("must be positive, got {}", self.time_step_s),
            ));
        }
        Ok(())
    }
}

/// Metadata stamped onto one sweep run, written next to the result tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub created: DateTime<Utc>,
    pub sections: Vec<String>,
    /// Number of (section, eccentricity, length, DCR) columns
    pub columns: usize,
    pub fire_loads: Vec<f64>,
    pub exhaustive: bool,
}

impl RunManifest {
    pub fn new(config: &SweepConfig) -> Self {
        RunManifest {
            run_id: Uuid::new_v4(),
            created: Utc::now(),
            sections: config.sections.clone(),
            columns: config.sections.len()
                * config.eccentricities.len()
                * config.lengths_in.len()
                * config.dcrs.len(),
            fire_loads: config.fire_loads.clone(),
            exhaustive: config.exhaustive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SweepConfig {
        SweepConfig {
            section_table: "sections.csv".to_string(),
            sections: vec!["W14X342".to_string()],
            eccentricities: vec![0.0],
            lengths_in: vec![156.0],
            dcrs: vec![0.95, 0.85],
            fire_loads: vec![1000.0, 700.0, 400.0],
            compartment: CompartmentConfig::default(),
            time_step_s: 5.0,
            mechanical: SteelMechanical::default(),
            thermal: ThermalModel::Eurocode,
            exhaustive: false,
        }
    }

    #[test]
    fn test_validate_accepts_descending_fire_loads() {
        assert!(small_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unsorted_fire_loads() {
        let mut config = small_config();
        config.fire_loads = vec![400.0, 700.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_axes() {
        let mut config = small_config();
        config.dcrs.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_manifest_counts_columns() {
        let mut config = small_config();
        config.sections.push("W33X221".to_string());
        let manifest = RunManifest::new(&config);
        // 2 sections x 1 eccentricity x 1 length x 2 DCRs
        assert_eq!(manifest.columns, 4);
        assert_eq!(manifest.fire_loads.len(), 3);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = small_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: SweepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
