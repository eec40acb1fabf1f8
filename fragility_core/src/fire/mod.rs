//! # Fire Exposure Models
//!
//! Temperature-vs-time histories for the exposures a column can be designed
//! against: the four published standard curves and the compartment parametric
//! curve.
//!
//! ## Modules
//!
//! - [`standard`] - ISO 834, ASTM E119, external, and hydrocarbon curves
//! - [`parametric`] - compartment parametric curve from occupancy, lining,
//!   opening geometry, and fuel load
//!
//! ## Example
//!
//! ```rust
//! use fragility_core::fire::{CurveKind, FireExposure};
//!
//! // ISO 834 over 3 hours at the 5 s step the unprotected scheme needs
//! let exposure = FireExposure::standard(CurveKind::Iso834, 180.0 * 60.0, 5.0).unwrap();
//! assert_eq!(exposure.temp_c[0], 20.0);
//! assert!(exposure.temp_c.last().unwrap() > &1000.0);
//! ```

pub mod parametric;
pub mod standard;

use serde::{Deserialize, Serialize};

use crate::errors::{SimError, SimResult};

pub use parametric::{BurningRegime, GrowthRate, Occupancy, ParametricFire};

/// Ambient temperature shared by every exposure model (degC)
pub const AMBIENT_C: f64 = 20.0;

/// Fire exposure family.
///
/// Curve selections are terminal: one kind per run, no superposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// ISO 834 standard cellulosic curve
    Iso834,
    /// ASTM E119 standard curve
    AstmE119,
    /// External fire curve (members outside the facade)
    External,
    /// Hydrocarbon pool-fire curve
    Hydrocarbon,
    /// Compartment parametric curve
    Parametric,
}

impl CurveKind {
    /// Convective heat transfer coefficient for this exposure (W/(m^2 K)).
    ///
    /// 25 for the standard fires, 50 for hydrocarbon, 35 for any parametric
    /// fire. The thermal integrator does not guess; callers select via the
    /// exposure kind they built.
    pub fn convective_coefficient(self) -> f64 {
        match self {
            CurveKind::Iso834 | CurveKind::AstmE119 | CurveKind::External => 25.0,
            CurveKind::Hydrocarbon => 50.0,
            CurveKind::Parametric => 35.0,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Iso834 => "ISO 834",
            CurveKind::AstmE119 => "ASTM E119",
            CurveKind::External => "external",
            CurveKind::Hydrocarbon => "hydrocarbon",
            CurveKind::Parametric => "parametric",
        }
    }
}

/// A fire temperature-time history.
///
/// Invariants, enforced at construction:
/// - both sequences have the same length, at least two points
/// - time starts at 0 and is strictly increasing (seconds)
/// - temperature starts at ambient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireExposure {
    /// Which curve produced this history
    pub kind: CurveKind,
    /// Time points (s), strictly increasing from 0
    pub time_s: Vec<f64>,
    /// Gas temperature at each time point (degC)
    pub temp_c: Vec<f64>,
}

impl FireExposure {
    /// Build an exposure from explicit sequences, validating the invariants.
    pub fn new(kind: CurveKind, time_s: Vec<f64>, temp_c: Vec<f64>) -> SimResult<Self> {
        if time_s.len() != temp_c.len() {
            return Err(SimError::precondition(
                "fire_exposure",
                format!(
                    "time and temperature lengths differ ({} vs {})",
                    time_s.len(),
                    temp_c.len()
                ),
            ));
        }
        if time_s.len() < 2 {
            return Err(SimError::precondition(
                "fire_exposure",
                "at least two time points are required",
            ));
        }
        if time_s[0] != 0.0 {
            return Err(SimError::precondition(
                "fire_exposure",
                format!("time must start at 0, got {}", time_s[0]),
            ));
        }
        for i in 1..time_s.len() {
            if time_s[i] <= time_s[i - 1] {
                return Err(SimError::precondition(
                    "fire_exposure",
                    format!("time sequence not strictly increasing at index {}", i),
                ));
            }
        }
        Ok(FireExposure { kind, time_s, temp_c })
    }

    /// Build a standard-curve exposure on a uniform grid.
    ///
    /// `duration_s` is the exposure length and `step_s` the uniform spacing;
    /// the reference configuration is 180 minutes at 5 s steps. Parametric
    /// exposures carry their own grid - use [`ParametricFire::exposure`].
    pub fn standard(kind: CurveKind, duration_s: f64, step_s: f64) -> SimResult<Self> {
        if kind == CurveKind::Parametric {
            return Err(SimError::precondition(
                "fire_exposure",
                "parametric exposures are built from compartment parameters",
            ));
        }
        if duration_s <= 0.0 || step_s <= 0.0 {
            return Err(SimError::precondition(
                "fire_exposure",
                "duration and step must be positive",
            ));
        }
        let n = (duration_s / step_s).floor() as usize;
        let time_s: Vec<f64> = (0..=n).map(|i| i as f64 * step_s).collect();
        let temp_c = standard::temperatures(kind, &time_s);
        FireExposure::new(kind, time_s, temp_c)
    }

    /// Number of time points
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    /// True if the exposure has no points (never holds for a validated value)
    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    /// Time at which the rising branch of the curve first reaches (nearest
    /// to) `temperature_c`.
    ///
    /// Only the strictly-increasing prefix is searched, so a parametric
    /// curve's decay branch can never shadow an earlier crossing.
    pub fn time_from_temperature(&self, temperature_c: f64) -> f64 {
        let mut rising_end = self.temp_c.len();
        for i in 1..self.temp_c.len() {
            if self.temp_c[i] <= self.temp_c[i - 1] {
                rising_end = i;
                break;
            }
        }
        let mut best = 0usize;
        let mut best_diff = f64::INFINITY;
        for i in 0..rising_end {
            let diff = (self.temp_c[i] - temperature_c).abs();
            if diff < best_diff {
                best_diff = diff;
                best = i;
            }
        }
        self.time_s[best]
    }
}
