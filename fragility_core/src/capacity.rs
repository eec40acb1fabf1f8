//! # Capacity vs Demand Evaluation
//!
//! Scans a steel temperature history for the first time step at which the
//! column's Euler buckling capacity no longer exceeds the applied demand.
//!
//! The demand is fixed at ambient: DCR times the ambient-temperature
//! capacity, amplified by the eccentricity factor `L / sqrt(L^2 - (e L)^2)`
//! (exactly 1.0 for a concentric load). Capacity decays with temperature
//! through the effective elastic modulus only - pinned-pinned Euler
//! buckling, no end-moment correction.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{SimError, SimResult};
use crate::fire::AMBIENT_C;
use crate::materials::SteelMechanical;
use crate::thermal::ThermalState;

/// Load scenario for one column evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadScenario {
    /// Demand-to-capacity ratio at ambient temperature
    pub dcr: f64,
    /// Load eccentricity ratio (dimensionless, 0 for concentric)
    pub eccentricity: f64,
    /// Unbraced column length (in)
    pub length_in: f64,
    /// Service dead load (kips), carried for reporting
    pub dead_load_kips: f64,
    /// Service live load (kips), carried for reporting
    pub live_load_kips: f64,
}

impl LoadScenario {
    /// Concentric scenario with no service loads attached.
    pub fn new(dcr: f64, eccentricity: f64, length_in: f64) -> Self {
        LoadScenario {
            dcr,
            eccentricity,
            length_in,
            dead_load_kips: 0.0,
            live_load_kips: 0.0,
        }
    }

    /// Validate the scenario parameters.
    pub fn validate(&self) -> SimResult<()> {
        if self.dcr < 0.0 {
            return Err(SimError::precondition(
                "dcr",
                format!("must be non-negative, got {}", self.dcr),
            ));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(SimError::precondition(
                "eccentricity",
                format!("must lie in [0, 1), got {}", self.eccentricity),
            ));
        }
        if self.length_in <= 0.0 {
            return Err(SimError::precondition(
                "length",
                format!("must be positive, got {}", self.length_in),
            ));
        }
        if self.dead_load_kips < 0.0 || self.live_load_kips < 0.0 {
            return Err(SimError::precondition(
                "service_loads",
                "dead and live loads cannot be negative",
            ));
        }
        Ok(())
    }

    /// Eccentricity amplification `L / sqrt(L^2 - (e L)^2)`; exactly 1.0 for
    /// a concentric load.
    pub fn amplification(&self) -> f64 {
        let l = self.length_in;
        l / (l.powi(2) - (self.eccentricity * l).powi(2)).sqrt()
    }

    /// Factored axial load `1.2 D + 1.6 L` (kips)
    pub fn factored_load(&self) -> f64 {
        1.2 * self.dead_load_kips + 1.6 * self.live_load_kips
    }
}

/// Result of scanning one temperature history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Capacity stayed above demand through the whole exposure
    NoFailure,
    /// Capacity dropped to (or below) demand
    Failure {
        time_s: f64,
        temperature_c: f64,
        demand_kips: f64,
        capacity_kips: f64,
    },
}

impl Outcome {
    /// The scalar 0/1 indicator the external reliability driver consumes.
    pub fn failure_indicator(&self) -> u8 {
        match self {
            Outcome::NoFailure => 0,
            Outcome::Failure { .. } => 1,
        }
    }
}

/// One sweep combination's immutable result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub section_id: String,
    pub eccentricity: f64,
    pub length_in: f64,
    pub dcr: f64,
    /// Fuel load energy density of the driving fire (MJ/m^2)
    pub fire_load: f64,
    pub outcome: Outcome,
}

/// Euler buckling capacity of a pinned-pinned column (kips):
/// `pi^2 E I / L^2` with E in ksi, I in in^4, L in in.
pub fn euler_capacity(modulus_ksi: f64, moment_of_inertia_in4: f64, length_in: f64) -> f64 {
    PI.powi(2) * modulus_ksi * moment_of_inertia_in4 / length_in.powi(2)
}

/// Scan a temperature history for first failure.
///
/// The demand `DCR * P_cr(ambient) * amplification` is held constant across
/// the run; only the capacity decays. A demand exceeding the ambient
/// capacity (DCR > 1 with concentric load) fails at the very first step -
/// a valid degenerate input, not an error.
pub fn critical_temperature(
    state: &ThermalState,
    mechanical: &SteelMechanical,
    moment_of_inertia_in4: f64,
    scenario: &LoadScenario,
) -> SimResult<Outcome> {
    scenario.validate()?;
    if moment_of_inertia_in4 <= 0.0 {
        return Err(SimError::precondition(
            "moment_of_inertia",
            format!("must be positive, got {}", moment_of_inertia_in4),
        ));
    }
    if state.is_empty() {
        return Err(SimError::precondition(
            "thermal_state",
            "temperature history is empty",
        ));
    }

    let ambient_modulus = mechanical.elastic_modulus(AMBIENT_C)?;
    let ambient_capacity =
        euler_capacity(ambient_modulus, moment_of_inertia_in4, scenario.length_in);
    let demand_kips = scenario.dcr * ambient_capacity * scenario.amplification();

    for (time_s, temperature_c) in state.iter() {
        let modulus = mechanical.elastic_modulus(temperature_c)?;
        let capacity_kips = euler_capacity(modulus, moment_of_inertia_in4, scenario.length_in);
        if capacity_kips <= demand_kips {
            return Ok(Outcome::Failure {
                time_s,
                temperature_c,
                demand_kips,
                capacity_kips,
            });
        }
    }
    Ok(Outcome::NoFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising_history() -> ThermalState {
        // 20 -> 1000 degC in 20-degree steps, 5 s apart
        let steel_c: Vec<f64> = (0..=49).map(|i| 20.0 + i as f64 * 20.0).collect();
        let time_s: Vec<f64> = (0..=49).map(|i| i as f64 * 5.0).collect();
        ThermalState { time_s, steel_c }
    }

    #[test]
    fn test_zero_dcr_never_fails() {
        let outcome = critical_temperature(
            &rising_history(),
            &SteelMechanical::default(),
            1150.0,
            &LoadScenario::new(0.0, 0.0, 156.0),
        )
        .unwrap();
        assert_eq!(outcome, Outcome::NoFailure);
        assert_eq!(outcome.failure_indicator(), 0);
    }

    #[test]
    fn test_unit_dcr_fails_at_first_step() {
        // demand equals ambient capacity bit-for-bit, so the very first
        // scanned step (ambient itself) already satisfies capacity <= demand
        let outcome = critical_temperature(
            &rising_history(),
            &SteelMechanical::default(),
            1150.0,
            &LoadScenario::new(1.0, 0.0, 156.0),
        )
        .unwrap();
        match outcome {
            Outcome::Failure { time_s, temperature_c, demand_kips, capacity_kips } => {
                assert_eq!(time_s, 0.0);
                assert_eq!(temperature_c, 20.0);
                assert_eq!(demand_kips, capacity_kips);
            }
            Outcome::NoFailure => panic!("DCR = 1 must fail immediately"),
        }
    }

    #[test]
    fn test_overloaded_column_fails_at_first_step() {
        // demand above ambient capacity: degenerate but valid
        let outcome = critical_temperature(
            &rising_history(),
            &SteelMechanical::default(),
            1150.0,
            &LoadScenario::new(1.5, 0.0, 156.0),
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Failure { time_s, .. } if time_s == 0.0));
    }

    #[test]
    fn test_moderate_dcr_fails_mid_history() {
        let outcome = critical_temperature(
            &rising_history(),
            &SteelMechanical::default(),
            1150.0,
            &LoadScenario::new(0.5, 0.0, 156.0),
        )
        .unwrap();
        match outcome {
            Outcome::Failure { time_s, temperature_c, demand_kips, capacity_kips } => {
                assert!(time_s > 0.0);
                // k_E drops through 0.5 of its ambient value between 550 and
                // 650 degC for the logistic model
                assert!(
                    (550.0..650.0).contains(&temperature_c),
                    "failed at {temperature_c}"
                );
                assert!(capacity_kips <= demand_kips);
            }
            Outcome::NoFailure => panic!("expected mid-history failure"),
        }
    }

    #[test]
    fn test_amplification_identity_at_zero_eccentricity() {
        let scenario = LoadScenario::new(0.5, 0.0, 156.0);
        assert_eq!(scenario.amplification(), 1.0);

        let eccentric = LoadScenario::new(0.5, 0.003, 156.0);
        let amp = eccentric.amplification();
        assert!(amp > 1.0 && amp < 1.0001, "amp = {amp}");
    }

    #[test]
    fn test_factored_load_combination() {
        let mut scenario = LoadScenario::new(0.5, 0.0, 156.0);
        scenario.dead_load_kips = 100.0;
        scenario.live_load_kips = 50.0;
        assert_eq!(scenario.factored_load(), 200.0);
    }

    #[test]
    fn test_invalid_scenarios_rejected() {
        let state = rising_history();
        let steel = SteelMechanical::default();
        for scenario in [
            LoadScenario::new(-0.1, 0.0, 156.0),
            LoadScenario::new(0.5, 1.0, 156.0),
            LoadScenario::new(0.5, 0.0, 0.0),
        ] {
            assert!(critical_temperature(&state, &steel, 1150.0, &scenario).is_err());
        }
        let ok = LoadScenario::new(0.5, 0.0, 156.0);
        assert!(critical_temperature(&state, &steel, -1.0, &ok).is_err());
    }

    #[test]
    fn test_euler_capacity_formula() {
        // pi^2 * 29000 * 1150 / 156^2 = 13525.3 kips
        let p = euler_capacity(29000.0, 1150.0, 156.0);
        assert!((p - 13525.3).abs() < 0.5, "P_cr = {p}");
    }
}
