//! # Material Property Models
//!
//! Temperature-dependent property models for the simulation chain.
//!
//! - [`steel`] - Eurocode piecewise thermal properties, the probabilistic
//!   regression forms, reduction-factor interpolation, and thermal strain
//! - [`insulation`] - property set for board-protected members
//!
//! Every property function rejects temperatures outside [20, 1200] degC with
//! a [`crate::errors::SimError::Domain`] error; nothing in the chain ever
//! sees a NaN from an out-of-range query.

pub mod insulation;
pub mod steel;

pub use insulation::InsulationProperties;
pub use steel::{SteelMechanical, ThermalModel, ThermalPerturbation};
