//! # Thermal Integration
//!
//! Advances the steel temperature through a fire exposure with the lumped
//! capacitance energy balance: the whole cross-section is one uniform
//! temperature per time step.
//!
//! Two schemes exist, chosen once per run:
//!
//! - [`unprotected::UnprotectedScheme`] - bare steel, convection plus
//!   radiation, 5 s stability bound
//! - [`protected::ProtectedScheme`] - board-insulated steel, conduction
//!   through the jacket, 30 s stability bound
//!
//! A time sequence violating the scheme's bound fails immediately with the
//! offending step index; the integrators never proceed with an unstable step.

pub mod protected;
pub mod unprotected;

use serde::{Deserialize, Serialize};

use crate::errors::{SimError, SimResult};

pub use protected::{PROTECTED_MAX_STEP_S, ProtectedScheme};
pub use unprotected::{UNPROTECTED_MAX_STEP_S, UnprotectedScheme};

/// Stefan-Boltzmann coefficient in the published unit convention of the
/// component temperature equations
pub const STEFAN_BOLTZMANN: f64 = 56.7e-12;

/// Fire emissivity (Eurocode value)
pub const FIRE_EMISSIVITY: f64 = 1.0;

/// Steel surface emissivity (Eurocode value)
pub const MATERIAL_EMISSIVITY: f64 = 0.7;

/// Steel temperature history, one entry per fire exposure time point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalState {
    /// Time points (s), copied from the driving exposure
    pub time_s: Vec<f64>,
    /// Steel temperature at each time point (degC)
    pub steel_c: Vec<f64>,
}

impl ThermalState {
    /// Number of time points
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    /// True if the state holds no points
    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    /// Iterate (time, steel temperature) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_s.iter().copied().zip(self.steel_c.iter().copied())
    }

    /// Peak steel temperature over the history (degC)
    pub fn max_temperature(&self) -> f64 {
        self.steel_c.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Verify every step of a time sequence against a stability bound before any
/// integration work happens.
///
/// The reported index is the later point of the offending interval.
pub(crate) fn check_steps(time_s: &[f64], bound_s: f64) -> SimResult<()> {
    for i in 1..time_s.len() {
        let dt = time_s[i] - time_s[i - 1];
        if dt > bound_s + 1e-9 {
            return Err(SimError::stability(i, dt, bound_s));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_steps_bound_is_inclusive() {
        assert!(check_steps(&[0.0, 5.0, 10.0], 5.0).is_ok());
        let err = check_steps(&[0.0, 5.0, 10.01], 5.0).unwrap_err();
        match err {
            SimError::Stability { step, dt_s, bound_s } => {
                assert_eq!(step, 2);
                assert!((dt_s - 5.01).abs() < 1e-9);
                assert_eq!(bound_s, 5.0);
            }
            other => panic!("expected Stability, got {other:?}"),
        }
    }

    #[test]
    fn test_thermal_state_accessors() {
        let state = ThermalState {
            time_s: vec![0.0, 5.0, 10.0],
            steel_c: vec![20.0, 25.0, 31.0],
        };
        assert_eq!(state.len(), 3);
        assert_eq!(state.max_temperature(), 31.0);
        let pairs: Vec<_> = state.iter().collect();
        assert_eq!(pairs[1], (5.0, 25.0));
    }
}
