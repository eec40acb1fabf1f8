//! # fragility_core - Steel-Column Fire-Fragility Engine
//!
//! `fragility_core` evaluates fire-resistance failure of steel structural
//! columns: a fire temperature history drives a lumped-capacitance heat
//! transfer integration, temperature-dependent material models erode the
//! column's Euler buckling capacity, and the first time step at which
//! capacity no longer exceeds demand is the failure point. Sweeping that
//! chain across sections, load scenarios, and fire-load levels yields
//! fragility curves.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: each combination evaluates as a pure function of its
//!   inputs, so callers parallelize freely
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error variants, not just strings
//! - **Fail Loudly**: out-of-domain temperatures and unstable time steps
//!   abort the combination instead of propagating NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use fragility_core::capacity::LoadScenario;
//! use fragility_core::fire::{CurveKind, FireExposure};
//! use fragility_core::materials::{SteelMechanical, ThermalModel};
//! use fragility_core::sections::SectionDb;
//! use fragility_core::sweep::evaluate_exposure;
//!
//! let csv = "section size,weight,A,d,bf,tw,tf,Ix,Iy\n\
//!            W14X342,342,101,17.5,16.4,1.54,2.47,4900,1810\n";
//! let db = SectionDb::from_csv_str(csv).unwrap();
//! let factors = db.lookup("W14X342").unwrap().factors().unwrap();
//!
//! let exposure = FireExposure::standard(CurveKind::Iso834, 180.0 * 60.0, 5.0).unwrap();
//! let outcome = evaluate_exposure(
//!     &exposure,
//!     &factors,
//!     &ThermalModel::Eurocode,
//!     &SteelMechanical::default(),
//!     4900.0,
//!     &LoadScenario::new(0.5, 0.0, 156.0),
//! )
//! .unwrap();
//! println!("indicator = {}", outcome.failure_indicator());
//! ```
//!
//! ## Modules
//!
//! - [`fire`] - standard and parametric fire curves
//! - [`materials`] - temperature-dependent steel and insulation properties
//! - [`sections`] - section property database and derived section factors
//! - [`thermal`] - unprotected and protected heat transfer integration
//! - [`capacity`] - buckling capacity vs demand failure scan
//! - [`sweep`] - the fragility sweep driver
//! - [`config`] - run configuration and manifest types
//! - [`units`] - time unit conversions
//! - [`errors`] - structured error types

pub mod capacity;
pub mod config;
pub mod errors;
pub mod fire;
pub mod materials;
pub mod sections;
pub mod sweep;
pub mod thermal;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use capacity::{FailureRecord, LoadScenario, Outcome};
pub use config::{CompartmentConfig, RunManifest, SweepConfig};
pub use errors::{SimError, SimResult};
pub use fire::{CurveKind, FireExposure};
pub use materials::{SteelMechanical, ThermalModel};
pub use sections::{SectionDb, SectionFactors, SectionShape};
pub use sweep::{FragilityTable, SweepResults, run_sweep};
pub use thermal::{ProtectedScheme, ThermalState, UnprotectedScheme};
