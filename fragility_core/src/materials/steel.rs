//! Structural steel property models.
//!
//! Two families live here side by side:
//!
//! - the deterministic Eurocode models: piecewise specific heat and thermal
//!   conductivity, constant density, and the 13-point reduction-factor table
//!   for yield strength, proportional limit, and elastic modulus;
//! - the probabilistic regression models: logistic reduction curves for
//!   yield strength and elastic modulus plus exponential regressions for
//!   density, specific heat, and conductivity, each taking a model
//!   uncertainty perturbation epsilon (zero recovers the median model).
//!
//! All temperatures are degC. Every function is only defined on
//! [20, 1200] degC and returns a Domain error outside that range.

use serde::{Deserialize, Serialize};

use crate::errors::{SimError, SimResult};

/// Lower bound of the valid steel temperature range (degC)
pub const DOMAIN_MIN_C: f64 = 20.0;
/// Upper bound of the valid steel temperature range (degC)
pub const DOMAIN_MAX_C: f64 = 1200.0;

/// Room-temperature steel density (kg/m^3), the deterministic code value
pub const DENSITY_KG_M3: f64 = 7850.0;

fn check_domain(property: &str, t_c: f64) -> SimResult<()> {
    if !(DOMAIN_MIN_C..=DOMAIN_MAX_C).contains(&t_c) || t_c.is_nan() {
        return Err(SimError::domain(property, t_c));
    }
    Ok(())
}

// ============================================================================
// Deterministic Eurocode thermal properties
// ============================================================================

/// Specific heat of steel (J/(kg K)), four-band Eurocode polynomial.
pub fn specific_heat(t_c: f64) -> SimResult<f64> {
    check_domain("specific_heat", t_c)?;
    let c = if t_c < 600.0 {
        425.0 + 0.773 * t_c - 1.69e-3 * t_c.powi(2) + 2.22e-6 * t_c.powi(3)
    } else if t_c < 735.0 {
        666.0 + 13002.0 / (738.0 - t_c)
    } else if t_c < 900.0 {
        545.0 + 17820.0 / (t_c - 731.0)
    } else {
        650.0
    };
    Ok(c)
}

/// Thermal conductivity of steel (W/(m K)), two-band Eurocode form.
pub fn thermal_conductivity(t_c: f64) -> SimResult<f64> {
    check_domain("thermal_conductivity", t_c)?;
    let k = if t_c < 800.0 { 54.0 - 0.0333 * t_c } else { 27.3 };
    Ok(k)
}

// ============================================================================
// Probabilistic regression models
// ============================================================================

/// Regression density model: `exp(-2.028 + 7.83 T^(-0.0065) + 0.122 eps)`.
///
/// Reproduced as published; the deterministic [`DENSITY_KG_M3`] constant is
/// the conservative default when no uncertainty model is requested.
pub fn density_regression(t_c: f64, epsilon: f64) -> SimResult<f64> {
    check_domain("density", t_c)?;
    Ok((-2.028 + 7.83 * t_c.powf(-0.0065) + 0.122 * epsilon).exp())
}

/// Regression specific heat:
/// `1700 - exp(6.81 - 1.61e-3 T + 0.44e-6 T^2 + 0.213 eps)`.
pub fn specific_heat_regression(t_c: f64, epsilon: f64) -> SimResult<f64> {
    check_domain("specific_heat", t_c)?;
    Ok(1700.0 - (6.81 - 1.61e-3 * t_c + 0.44e-6 * t_c.powi(2) + 0.213 * epsilon).exp())
}

/// Regression thermal conductivity:
/// `exp(-2.72 + 1.89e-3 T - 0.195e-6 T^2 + 0.209 eps)`.
pub fn thermal_conductivity_regression(t_c: f64, epsilon: f64) -> SimResult<f64> {
    check_domain("thermal_conductivity", t_c)?;
    Ok((-2.72 + 1.89e-3 * t_c - 0.195e-6 * t_c.powi(2) + 0.209 * epsilon).exp())
}

/// Logistic yield-strength reduction factor:
/// `1.2 e^a / (e^a + 1)`, `a = 1.61 - 1.68e-3 T - 3.36e-6 T^2 + 0.35 eps`.
pub fn yield_strength_factor(t_c: f64, epsilon: f64) -> SimResult<f64> {
    check_domain("yield_strength", t_c)?;
    let a = 1.61 - 1.68e-3 * t_c - 3.36e-6 * t_c.powi(2) + 0.35 * epsilon;
    Ok(1.2 * a.exp() / (a.exp() + 1.0))
}

/// Logistic elastic-modulus reduction factor:
/// `1.1 e^b / (e^b + 1)`, `b = 2.54 - 2.69e-3 T - 2.83e-6 T^2 + 0.36 eps`.
///
/// The logistic form does not pass exactly through 1.0 at 20 degC; it sits
/// about 1.5 % high there. Known model characteristic, not a defect.
pub fn modulus_factor(t_c: f64, epsilon: f64) -> SimResult<f64> {
    check_domain("elastic_modulus", t_c)?;
    let b = 2.54 - 2.69e-3 * t_c - 2.83e-6 * t_c.powi(2) + 0.36 * epsilon;
    Ok(1.1 * b.exp() / (b.exp() + 1.0))
}

/// Thermal strain (dimensionless elongation), three bands.
///
/// The two outer bands are square-root forms over the squared Eurocode
/// elongation polynomial with the epsilon correction inside the radical
/// (floored at zero); the plateau band is the Eurocode constant plus a
/// linear correction.
pub fn thermal_strain(t_c: f64, epsilon: f64) -> SimResult<f64> {
    check_domain("thermal_strain", t_c)?;
    let strain = if t_c < 750.0 {
        let base = 1.2e-5 * t_c + 0.4e-8 * t_c.powi(2) - 2.416e-4;
        (base.powi(2) + 2.0e-8 * epsilon).max(0.0).sqrt()
    } else if t_c <= 860.0 {
        1.1e-2 + 1.0e-4 * epsilon
    } else {
        let base = 2.0e-5 * t_c - 6.2e-3;
        (base.powi(2) + 2.0e-8 * epsilon).max(0.0).sqrt()
    };
    Ok(strain)
}

// ============================================================================
// Eurocode reduction-factor table
// ============================================================================

/// Table temperatures (degC)
const TABLE_TEMPS: [f64; 13] = [
    20.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0, 1000.0, 1100.0, 1200.0,
];

/// Effective yield strength reduction factors k_y
const TABLE_KY: [f64; 13] = [
    1.000, 1.000, 1.000, 1.000, 1.000, 0.780, 0.470, 0.230, 0.110, 0.060, 0.040, 0.020, 0.000,
];

/// Proportional limit reduction factors k_p
const TABLE_KP: [f64; 13] = [
    1.000, 1.000, 0.807, 0.613, 0.420, 0.360, 0.180, 0.075, 0.050, 0.0375, 0.0250, 0.0125, 0.0000,
];

/// Elastic modulus reduction factors k_E
const TABLE_KE: [f64; 13] = [
    1.000, 1.000, 0.900, 0.800, 0.700, 0.600, 0.310, 0.130, 0.090, 0.0675, 0.0450, 0.0225, 0.0000,
];

/// Piecewise-linear interpolation over the table, clamped at the end points.
fn interp_table(t_c: f64, values: &[f64; 13]) -> f64 {
    if t_c <= TABLE_TEMPS[0] {
        return values[0];
    }
    if t_c >= TABLE_TEMPS[12] {
        return values[12];
    }
    for i in 1..TABLE_TEMPS.len() {
        if t_c <= TABLE_TEMPS[i] {
            let frac = (t_c - TABLE_TEMPS[i - 1]) / (TABLE_TEMPS[i] - TABLE_TEMPS[i - 1]);
            return values[i - 1] + frac * (values[i] - values[i - 1]);
        }
    }
    values[12]
}

/// Tabulated yield-strength reduction factor k_y
pub fn yield_strength_reduction(t_c: f64) -> SimResult<f64> {
    check_domain("yield_strength_reduction", t_c)?;
    Ok(interp_table(t_c, &TABLE_KY))
}

/// Tabulated proportional-limit reduction factor k_p
pub fn proportional_limit_reduction(t_c: f64) -> SimResult<f64> {
    check_domain("proportional_limit_reduction", t_c)?;
    Ok(interp_table(t_c, &TABLE_KP))
}

/// Tabulated elastic-modulus reduction factor k_E
pub fn modulus_reduction(t_c: f64) -> SimResult<f64> {
    check_domain("modulus_reduction", t_c)?;
    Ok(interp_table(t_c, &TABLE_KE))
}

// ============================================================================
// Run-scoped property models
// ============================================================================

/// Per-property uncertainty perturbations for the regression thermal model.
///
/// All zeros (the default) recovers the median regression.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermalPerturbation {
    pub density: f64,
    pub specific_heat: f64,
    pub conductivity: f64,
}

/// Thermal property model selected once per run.
///
/// `Eurocode` is the deterministic default: piecewise specific heat and
/// conductivity with constant density. `Regression` swaps in the
/// probabilistic forms with their perturbations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ThermalModel {
    Eurocode,
    Regression(ThermalPerturbation),
}

impl Default for ThermalModel {
    fn default() -> Self {
        ThermalModel::Eurocode
    }
}

impl ThermalModel {
    /// Specific heat (J/(kg K)) at a steel temperature
    pub fn specific_heat(&self, t_c: f64) -> SimResult<f64> {
        match self {
            ThermalModel::Eurocode => specific_heat(t_c),
            ThermalModel::Regression(eps) => specific_heat_regression(t_c, eps.specific_heat),
        }
    }

    /// Thermal conductivity (W/(m K)) at a steel temperature
    pub fn thermal_conductivity(&self, t_c: f64) -> SimResult<f64> {
        match self {
            ThermalModel::Eurocode => thermal_conductivity(t_c),
            ThermalModel::Regression(eps) => {
                thermal_conductivity_regression(t_c, eps.conductivity)
            }
        }
    }

    /// Density (kg/m^3) at a steel temperature
    pub fn density(&self, t_c: f64) -> SimResult<f64> {
        match self {
            ThermalModel::Eurocode => {
                check_domain("density", t_c)?;
                Ok(DENSITY_KG_M3)
            }
            ThermalModel::Regression(eps) => density_regression(t_c, eps.density),
        }
    }
}

/// Mechanical property model anchored at room temperature.
///
/// Defaults carry the reference column stock: F_y = 50 ksi,
/// E = 29 000 ksi, proportional limit 65 ksi, no perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelMechanical {
    /// Room-temperature yield strength (ksi)
    pub yield_strength_ksi: f64,
    /// Room-temperature elastic modulus (ksi)
    pub elastic_modulus_ksi: f64,
    /// Room-temperature proportional limit (ksi)
    pub proportional_limit_ksi: f64,
    /// Yield-strength model perturbation
    pub epsilon_yield: f64,
    /// Elastic-modulus model perturbation
    pub epsilon_modulus: f64,
    /// Thermal-strain model perturbation
    pub epsilon_strain: f64,
}

impl Default for SteelMechanical {
    fn default() -> Self {
        SteelMechanical {
            yield_strength_ksi: 50.0,
            elastic_modulus_ksi: 29000.0,
            proportional_limit_ksi: 65.0,
            epsilon_yield: 0.0,
            epsilon_modulus: 0.0,
            epsilon_strain: 0.0,
        }
    }
}

impl SteelMechanical {
    /// Effective yield strength (ksi) at a steel temperature
    pub fn yield_strength(&self, t_c: f64) -> SimResult<f64> {
        Ok(yield_strength_factor(t_c, self.epsilon_yield)? * self.yield_strength_ksi)
    }

    /// Effective elastic modulus (ksi) at a steel temperature
    pub fn elastic_modulus(&self, t_c: f64) -> SimResult<f64> {
        Ok(modulus_factor(t_c, self.epsilon_modulus)? * self.elastic_modulus_ksi)
    }

    /// Effective proportional limit (ksi), from the tabulated k_p
    pub fn proportional_limit(&self, t_c: f64) -> SimResult<f64> {
        Ok(proportional_limit_reduction(t_c)? * self.proportional_limit_ksi)
    }

    /// Thermal strain at a steel temperature
    pub fn thermal_strain(&self, t_c: f64) -> SimResult<f64> {
        thermal_strain(t_c, self.epsilon_strain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_rejected_everywhere() {
        for t in [19.99, 1200.01, -40.0, f64::NAN] {
            assert!(specific_heat(t).is_err());
            assert!(thermal_conductivity(t).is_err());
            assert!(density_regression(t, 0.0).is_err());
            assert!(yield_strength_factor(t, 0.0).is_err());
            assert!(modulus_factor(t, 0.0).is_err());
            assert!(proportional_limit_reduction(t).is_err());
            assert!(thermal_strain(t, 0.0).is_err());
        }
        // the closed boundaries are valid
        assert!(specific_heat(20.0).is_ok());
        assert!(specific_heat(1200.0).is_ok());
    }

    #[test]
    fn test_specific_heat_bands() {
        // Band values straight from the polynomial
        let c20 = specific_heat(20.0).unwrap();
        assert!((c20 - 439.8).abs() < 0.5, "c(20) = {c20}");
        assert_eq!(specific_heat(1000.0).unwrap(), 650.0);

        // Peak near the 735 degC phase transition
        let c734 = specific_heat(734.9).unwrap();
        assert!(c734 > 4000.0, "c(734.9) = {c734}");
    }

    #[test]
    fn test_specific_heat_continuity_at_600() {
        let below = specific_heat(600.0 - 1e-9).unwrap();
        let at = specific_heat(600.0).unwrap();
        // The published bands meet within 0.1 % at 600 degC
        assert!(
            ((below - at) / at).abs() < 1e-3,
            "jump at 600 degC: {below} vs {at}"
        );
    }

    #[test]
    fn test_specific_heat_continuity_at_735() {
        let below = specific_heat(735.0 - 1e-6).unwrap();
        let at = specific_heat(735.0).unwrap();
        assert!(((below - at) / at).abs() < 1e-3);
    }

    #[test]
    fn test_thermal_conductivity_bands() {
        assert!((thermal_conductivity(20.0).unwrap() - 53.334).abs() < 1e-3);
        let below = thermal_conductivity(800.0 - 1e-9).unwrap();
        assert!((below - 27.36).abs() < 0.01);
        assert_eq!(thermal_conductivity(800.0).unwrap(), 27.3);
        assert_eq!(thermal_conductivity(1200.0).unwrap(), 27.3);
    }

    #[test]
    fn test_density_models() {
        let det = ThermalModel::Eurocode;
        assert_eq!(det.density(400.0).unwrap(), 7850.0);
        assert!(det.density(1500.0).is_err());

        let reg = density_regression(20.0, 0.0).unwrap();
        assert!((reg - 284.6).abs() < 0.5, "regression density {reg}");
        // positive epsilon shifts the regression up
        assert!(density_regression(20.0, 1.0).unwrap() > reg);
    }

    #[test]
    fn test_regression_thermal_values() {
        let c = specific_heat_regression(20.0, 0.0).unwrap();
        assert!((c - 821.7).abs() < 1.0, "c = {c}");
        let k = thermal_conductivity_regression(20.0, 0.0).unwrap();
        assert!(k > 0.0 && k < 1.0, "k = {k}");
    }

    #[test]
    fn test_modulus_factor_near_unity_at_ambient() {
        // The logistic form sits ~1.5 % above 1.0 at 20 degC; the 2 %
        // tolerance documents that characteristic.
        let f = modulus_factor(20.0, 0.0).unwrap();
        assert!((f - 1.0).abs() < 0.02, "k_E(20) = {f}");

        let fy = yield_strength_factor(20.0, 0.0).unwrap();
        assert!((fy - 1.0).abs() < 0.02, "k_y(20) = {fy}");
    }

    #[test]
    fn test_reduction_factors_decrease() {
        let mut prev = f64::INFINITY;
        for t in [20.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0] {
            let f = modulus_factor(t, 0.0).unwrap();
            assert!(f < prev);
            prev = f;
        }
        assert!(modulus_factor(1200.0, 0.0).unwrap() < 0.05);
    }

    #[test]
    fn test_table_interpolation() {
        // exact nodes
        assert_eq!(proportional_limit_reduction(20.0).unwrap(), 1.0);
        assert_eq!(proportional_limit_reduction(200.0).unwrap(), 0.807);
        assert_eq!(proportional_limit_reduction(1200.0).unwrap(), 0.0);
        // midpoint between 200 and 300
        let kp = proportional_limit_reduction(250.0).unwrap();
        assert!((kp - 0.710).abs() < 1e-9);
        // the other two columns interpolate the same way
        let ky = yield_strength_reduction(550.0).unwrap();
        assert!((ky - 0.625).abs() < 1e-9);
        let ke = modulus_reduction(450.0).unwrap();
        assert!((ke - 0.650).abs() < 1e-9);
    }

    #[test]
    fn test_thermal_strain_bands() {
        // near-zero at ambient
        let s = thermal_strain(20.0, 0.0).unwrap();
        assert!(s.abs() < 1e-5, "strain(20) = {s}");
        // plateau band
        assert!((thermal_strain(800.0, 0.0).unwrap() - 1.1e-2).abs() < 1e-12);
        // upper band
        let s = thermal_strain(900.0, 0.0).unwrap();
        assert!((s - 0.0118).abs() < 1e-6);
        // bands meet at their boundaries
        let low = thermal_strain(750.0 - 1e-6, 0.0).unwrap();
        assert!((low - 1.1e-2).abs() < 1e-4);
        let high = thermal_strain(860.0 + 1e-6, 0.0).unwrap();
        assert!((high - 1.1e-2).abs() < 1e-4);
        // epsilon enters inside the radical without going negative
        assert!(thermal_strain(100.0, -5.0).unwrap() >= 0.0);
        assert!(thermal_strain(400.0, 1.0).unwrap() > thermal_strain(400.0, 0.0).unwrap());
    }

    #[test]
    fn test_mechanical_model_anchors() {
        let steel = SteelMechanical::default();
        let e20 = steel.elastic_modulus(20.0).unwrap();
        assert!((e20 / 29000.0 - 1.0).abs() < 0.02);
        let fy20 = steel.yield_strength(20.0).unwrap();
        assert!((fy20 / 50.0 - 1.0).abs() < 0.02);
        assert_eq!(steel.proportional_limit(20.0).unwrap(), 65.0);
        // modulus at 600 degC has dropped to roughly half
        let e600 = steel.elastic_modulus(600.0).unwrap();
        assert!(e600 < 16000.0 && e600 > 13000.0, "E(600) = {e600}");
    }
}
