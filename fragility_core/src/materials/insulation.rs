//! Insulation (board protection) properties.
//!
//! The protected thermal scheme treats the insulation jacket as a constant
//! property set; temperature dependence of the board is outside the lumped
//! model.

use serde::{Deserialize, Serialize};

use crate::errors::{SimError, SimResult};

/// Property set for a board-protection jacket.
///
/// SI units: thickness in m, density in kg/m^3, specific heat in J/(kg K),
/// conductivity in W/(m K).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsulationProperties {
    pub thickness_m: f64,
    pub density_kg_m3: f64,
    pub specific_heat_j_kg_k: f64,
    pub conductivity_w_m_k: f64,
}

impl InsulationProperties {
    pub fn new(
        thickness_m: f64,
        density_kg_m3: f64,
        specific_heat_j_kg_k: f64,
        conductivity_w_m_k: f64,
    ) -> Self {
        InsulationProperties {
            thickness_m,
            density_kg_m3,
            specific_heat_j_kg_k,
            conductivity_w_m_k,
        }
    }

    /// Validate the property set for the protected scheme.
    ///
    /// Zero thickness divides the protected update by zero; it is rejected
    /// here as a precondition, never branched around at run time.
    pub fn validate(&self) -> SimResult<()> {
        if self.thickness_m <= 0.0 {
            return Err(SimError::precondition(
                "insulation_thickness",
                format!(
                    "protected scheme requires positive thickness, got {}",
                    self.thickness_m
                ),
            ));
        }
        let positive = [
            ("insulation_density", self.density_kg_m3),
            ("insulation_specific_heat", self.specific_heat_j_kg_k),
            ("insulation_conductivity", self.conductivity_w_m_k),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(SimError::precondition(
                    name,
                    format!("must be positive, got {}", value),
                ));
            }
        }
        Ok(())
    }

    /// Volumetric heat capacity rho * c_p (J/(m^3 K))
    pub fn volumetric_heat_capacity(&self) -> f64 {
        self.density_kg_m3 * self.specific_heat_j_kg_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_thickness_rejected() {
        let board = InsulationProperties::new(0.0, 300.0, 1200.0, 0.2);
        assert!(board.validate().is_err());
        let board = InsulationProperties::new(0.02, 300.0, 1200.0, 0.2);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_volumetric_heat_capacity() {
        let board = InsulationProperties::new(0.02, 300.0, 1200.0, 0.2);
        assert_eq!(board.volumetric_heat_capacity(), 360000.0);
    }
}
