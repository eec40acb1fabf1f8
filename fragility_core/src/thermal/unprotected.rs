//! Unprotected (bare steel) thermal scheme.
//!
//! Explicit finite-difference energy balance per time step:
//!
//! ```text
//! dT = dt * k_sh * (F/V) / (rho(T) * c_p(T))
//!         * [ h_c * (T_fire - T_steel) + sigma * eps_res * (T_fire^4 - T_steel^4) ]
//! ```
//!
//! The convective coefficient depends on the exposure kind (25 standard,
//! 50 hydrocarbon, 35 parametric); callers pick it through
//! [`UnprotectedScheme::for_exposure`].

use serde::{Deserialize, Serialize};

use crate::errors::SimResult;
use crate::fire::{CurveKind, FireExposure};
use crate::materials::ThermalModel;
use crate::sections::SectionFactors;

use super::{FIRE_EMISSIVITY, MATERIAL_EMISSIVITY, STEFAN_BOLTZMANN, ThermalState, check_steps};

/// Stability bound for the unprotected scheme (s)
pub const UNPROTECTED_MAX_STEP_S: f64 = 5.0;

/// Unprotected lumped-capacitance integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnprotectedScheme {
    /// Convective heat transfer coefficient h_c (W/(m^2 K))
    pub convective_coefficient: f64,
    /// Fire emissivity
    pub fire_emissivity: f64,
    /// Steel surface emissivity
    pub material_emissivity: f64,
    /// Steel thermal property model
    pub thermal: ThermalModel,
}

impl UnprotectedScheme {
    /// Scheme with the convective coefficient matching an exposure kind and
    /// the Eurocode emissivities.
    pub fn for_exposure(kind: CurveKind, thermal: ThermalModel) -> Self {
        UnprotectedScheme {
            convective_coefficient: kind.convective_coefficient(),
            fire_emissivity: FIRE_EMISSIVITY,
            material_emissivity: MATERIAL_EMISSIVITY,
            thermal,
        }
    }

    /// Resultant emissivity: fire emissivity times surface emissivity
    pub fn resultant_emissivity(&self) -> f64 {
        self.fire_emissivity * self.material_emissivity
    }

    /// Integrate the steel temperature through the exposure.
    ///
    /// The steel starts at the fire's initial (ambient) temperature. Any
    /// step above 5 s fails before integration begins; a material property
    /// query outside [20, 1200] degC aborts the run with a Domain error.
    pub fn integrate(
        &self,
        exposure: &FireExposure,
        factors: &SectionFactors,
    ) -> SimResult<ThermalState> {
        check_steps(&exposure.time_s, UNPROTECTED_MAX_STEP_S)?;

        let k_sh = factors.shadow_factor;
        let contour = factors.contour_factor;
        let eps_res = self.resultant_emissivity();

        let n = exposure.len();
        let mut steel_c = Vec::with_capacity(n);
        steel_c.push(exposure.temp_c[0]);

        for i in 1..n {
            let prev = steel_c[i - 1];
            let density = self.thermal.density(prev)?;
            let specific_heat = self.thermal.specific_heat(prev)?;

            let dt = exposure.time_s[i] - exposure.time_s[i - 1];
            let fire = exposure.temp_c[i];
            let convection = self.convective_coefficient * (fire - prev);
            let radiation = STEFAN_BOLTZMANN * eps_res * (fire.powi(4) - prev.powi(4));
            let delta = dt * k_sh * contour / (density * specific_heat) * (convection + radiation);
            steel_c.push(prev + delta);
        }

        Ok(ThermalState {
            time_s: exposure.time_s.clone(),
            steel_c,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimError;
    use crate::sections::{SectionDb, SectionFactors};

    fn w14x342_factors() -> SectionFactors {
        let csv = "section size,weight,A,d,bf,tw,tf,Ix,Iy\n\
                   W14X342,342,101,17.5,16.4,1.54,2.47,4900,1810\n";
        SectionDb::from_csv_str(csv)
            .unwrap()
            .lookup("W14X342")
            .unwrap()
            .factors()
            .unwrap()
    }

    fn scheme() -> UnprotectedScheme {
        UnprotectedScheme::for_exposure(CurveKind::Iso834, ThermalModel::Eurocode)
    }

    #[test]
    fn test_constant_ambient_fire_keeps_steel_constant() {
        let n = 100;
        let time_s: Vec<f64> = (0..n).map(|i| i as f64 * 5.0).collect();
        let temp_c = vec![20.0; n];
        let exposure = FireExposure::new(CurveKind::Iso834, time_s, temp_c).unwrap();

        let state = scheme().integrate(&exposure, &w14x342_factors()).unwrap();
        for &t in &state.steel_c {
            assert_eq!(t, 20.0);
        }
    }

    #[test]
    fn test_step_bound_is_exactly_five_seconds() {
        let factors = w14x342_factors();
        let ok = FireExposure::new(
            CurveKind::Iso834,
            vec![0.0, 5.0, 10.0],
            vec![20.0, 100.0, 200.0],
        )
        .unwrap();
        assert!(scheme().integrate(&ok, &factors).is_ok());

        let unstable = FireExposure::new(
            CurveKind::Iso834,
            vec![0.0, 5.0, 10.01],
            vec![20.0, 100.0, 200.0],
        )
        .unwrap();
        let err = scheme().integrate(&unstable, &factors).unwrap_err();
        assert!(matches!(err, SimError::Stability { step: 2, .. }));
    }

    #[test]
    fn test_steel_heats_monotonically_under_iso834() {
        let exposure = FireExposure::standard(CurveKind::Iso834, 1800.0, 5.0).unwrap();
        let state = scheme().integrate(&exposure, &w14x342_factors()).unwrap();

        assert_eq!(state.len(), exposure.len());
        assert_eq!(state.steel_c[0], 20.0);
        for i in 1..state.len() {
            assert!(state.steel_c[i] >= state.steel_c[i - 1]);
            // energy balance only adds heat while the fire is hotter
            assert!(state.steel_c[i] <= exposure.temp_c[i]);
        }
        // a heavy W14X342 with its small derived section factor warms slowly;
        // 30 minutes of ISO 834 adds roughly 20 degC
        let peak = state.max_temperature();
        assert!(peak > 35.0 && peak < 60.0, "peak {peak}");
    }

    #[test]
    fn test_resultant_emissivity() {
        assert!((scheme().resultant_emissivity() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_hydrocarbon_coefficient_heats_faster() {
        let factors = w14x342_factors();
        let exposure = FireExposure::standard(CurveKind::Iso834, 600.0, 5.0).unwrap();

        let standard = scheme().integrate(&exposure, &factors).unwrap();
        let hot = UnprotectedScheme {
            convective_coefficient: CurveKind::Hydrocarbon.convective_coefficient(),
            ..scheme()
        };
        let faster = hot.integrate(&exposure, &factors).unwrap();
        assert!(faster.max_temperature() > standard.max_temperature());
    }
}
