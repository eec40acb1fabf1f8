//! Protected (board-insulated steel) thermal scheme.
//!
//! Conduction through the insulation jacket drives the update:
//!
//! ```text
//! phi = (rho_i * c_i) / (rho_s * c_s) * thickness * (F/V)
//! dT  = k_i / thickness * (F/V) / (rho_s * c_s)
//!          * (T_fire - T_steel) / (1 + phi/3) * dt
//!          - (e^(phi/10) - 1) * dT_fire
//! ```
//!
//! Zero insulation thickness makes the update divide by zero; it is a
//! precondition violation rejected before the loop starts, never a runtime
//! branch.

use serde::{Deserialize, Serialize};

use crate::errors::SimResult;
use crate::fire::FireExposure;
use crate::materials::{InsulationProperties, ThermalModel};
use crate::sections::SectionFactors;

use super::{ThermalState, check_steps};

/// Stability bound for the protected scheme (s)
pub const PROTECTED_MAX_STEP_S: f64 = 30.0;

/// Protected lumped-capacitance integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectedScheme {
    /// Insulation jacket properties
    pub insulation: InsulationProperties,
    /// Steel thermal property model
    pub thermal: ThermalModel,
}

impl ProtectedScheme {
    pub fn new(insulation: InsulationProperties, thermal: ThermalModel) -> Self {
        ProtectedScheme { insulation, thermal }
    }

    /// Integrate the steel temperature through the exposure.
    pub fn integrate(
        &self,
        exposure: &FireExposure,
        factors: &SectionFactors,
    ) -> SimResult<ThermalState> {
        self.insulation.validate()?;
        check_steps(&exposure.time_s, PROTECTED_MAX_STEP_S)?;

        let contour = factors.contour_factor;
        let thickness = self.insulation.thickness_m;
        let conductivity = self.insulation.conductivity_w_m_k;
        let insulation_capacity = self.insulation.volumetric_heat_capacity();

        let n = exposure.len();
        let mut steel_c = Vec::with_capacity(n);
        steel_c.push(exposure.temp_c[0]);

        for i in 1..n {
            let prev = steel_c[i - 1];
            let steel_capacity =
                self.thermal.density(prev)? * self.thermal.specific_heat(prev)?;
            let phi = insulation_capacity / steel_capacity * thickness * contour;

            let dt = exposure.time_s[i] - exposure.time_s[i - 1];
            let d_fire = exposure.temp_c[i] - exposure.temp_c[i - 1];
            let mut delta = conductivity / thickness * contour / steel_capacity
                * (exposure.temp_c[i] - prev)
                / (1.0 + phi / 3.0)
                * dt
                - ((phi / 10.0).exp() - 1.0) * d_fire;
            // the gas-rise correction must not cool the steel while the fire
            // is growing; without this guard the first steps dip below the
            // 20 degC property domain
            if d_fire > 0.0 && delta < 0.0 {
                delta = 0.0;
            }
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
    use crate::fire::CurveKind;
    use crate::sections::SectionDb;
    use crate::thermal::UnprotectedScheme;

    fn factors() -> SectionFactors {
        let csv = "section size,weight,A,d,bf,tw,tf,Ix,Iy\n\
                   W14X342,342,101,17.5,16.4,1.54,2.47,4900,1810\n";
        SectionDb::from_csv_str(csv)
            .unwrap()
            .lookup("W14X342")
            .unwrap()
            .factors()
            .unwrap()
    }

    fn gypsum_board() -> InsulationProperties {
        InsulationProperties::new(0.02, 300.0, 1200.0, 0.2)
    }

    #[test]
    fn test_zero_thickness_is_precondition_error() {
        let scheme = ProtectedScheme::new(
            InsulationProperties::new(0.0, 300.0, 1200.0, 0.2),
            ThermalModel::Eurocode,
        );
        let exposure = FireExposure::standard(CurveKind::Iso834, 600.0, 30.0).unwrap();
        let err = scheme.integrate(&exposure, &factors()).unwrap_err();
        assert!(matches!(err, SimError::Precondition { .. }));
    }

    #[test]
    fn test_step_bound_is_thirty_seconds() {
        let scheme = ProtectedScheme::new(gypsum_board(), ThermalModel::Eurocode);
        let ok = FireExposure::new(
            CurveKind::Iso834,
            vec![0.0, 30.0, 60.0],
            vec![20.0, 300.0, 500.0],
        )
        .unwrap();
        assert!(scheme.integrate(&ok, &factors()).is_ok());

        let unstable = FireExposure::new(
            CurveKind::Iso834,
            vec![0.0, 30.0, 60.5],
            vec![20.0, 300.0, 500.0],
        )
        .unwrap();
        let err = scheme.integrate(&unstable, &factors()).unwrap_err();
        assert!(matches!(err, SimError::Stability { step: 2, .. }));
    }

    #[test]
    fn test_constant_ambient_fire_keeps_steel_constant() {
        let scheme = ProtectedScheme::new(gypsum_board(), ThermalModel::Eurocode);
        let time_s: Vec<f64> = (0..50).map(|i| i as f64 * 30.0).collect();
        let temp_c = vec![20.0; 50];
        let exposure = FireExposure::new(CurveKind::Iso834, time_s, temp_c).unwrap();
        let state = scheme.integrate(&exposure, &factors()).unwrap();
        for &t in &state.steel_c {
            assert_eq!(t, 20.0);
        }
    }

    #[test]
    fn test_insulation_slows_heating() {
        let exposure = FireExposure::standard(CurveKind::Iso834, 1800.0, 5.0).unwrap();
        let f = factors();

        let bare = UnprotectedScheme::for_exposure(CurveKind::Iso834, ThermalModel::Eurocode)
            .integrate(&exposure, &f)
            .unwrap();
        let boarded = ProtectedScheme::new(gypsum_board(), ThermalModel::Eurocode)
            .integrate(&exposure, &f)
            .unwrap();

        assert!(boarded.max_temperature() < bare.max_temperature());
    }

    #[test]
    fn test_growth_phase_never_cools_below_ambient() {
        let scheme = ProtectedScheme::new(gypsum_board(), ThermalModel::Eurocode);
        let exposure = FireExposure::standard(CurveKind::Iso834, 1800.0, 30.0).unwrap();
        let state = scheme.integrate(&exposure, &factors()).unwrap();
        for &t in &state.steel_c {
            assert!(t >= 20.0);
        }
    }
}
