//! # Error Types
//!
//! Structured error types for fragility_core. Every failure mode of the
//! simulation chain gets its own variant with enough context to identify
//! the offending combination without re-running it.
//!
//! ## Example
//!
//! ```rust
//! use fragility_core::errors::{SimError, SimResult};
//!
//! fn check_temperature(t_c: f64) -> SimResult<()> {
//!     if !(20.0..=1200.0).contains(&t_c) {
//!         return Err(SimError::domain("specific_heat", t_c));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fragility_core operations
pub type SimResult<T> = Result<T, SimError>;

/// Structured error type for the simulation chain.
///
/// A `Domain`, `Stability`, or `Precondition` error is fatal to the single
/// combination being evaluated. Lookup errors (`SectionNotFound`,
/// `UnknownOccupancy`) are recoverable at the sweep level: the driver skips
/// the combination and continues.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SimError {
    /// A material property was queried outside its valid temperature range
    /// of [20, 1200] degrees Celsius.
    #[error("Temperature {temperature_c} degC is outside [20, 1200] for '{property}'")]
    Domain { property: String, temperature_c: f64 },

    /// A time step exceeds the integration scheme's stability bound.
    #[error("Time step {dt_s} s at index {step} exceeds the {bound_s} s stability bound")]
    Stability { step: usize, dt_s: f64, bound_s: f64 },

    /// Section id not present in the section property table.
    #[error("Section '{section_id}' not found in the section database")]
    SectionNotFound { section_id: String },

    /// Occupancy key not present in the parametric fire occupancy table.
    #[error("Unknown occupancy '{occupancy}'")]
    UnknownOccupancy { occupancy: String },

    /// An input violated a hard precondition (zero insulation thickness,
    /// non-positive geometry, malformed time sequence, ...).
    #[error("Precondition violated for '{what}': {reason}")]
    Precondition { what: String, reason: String },

    /// The section table failed schema validation at load time.
    #[error("Section table schema error: {reason}")]
    Schema { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    Io {
        operation: String,
        path: String,
        reason: String,
    },
}

impl SimError {
    /// Create a Domain error
    pub fn domain(property: impl Into<String>, temperature_c: f64) -> Self {
        SimError::Domain {
            property: property.into(),
            temperature_c,
        }
    }

    /// Create a Stability error
    pub fn stability(step: usize, dt_s: f64, bound_s: f64) -> Self {
        SimError::Stability { step, dt_s, bound_s }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(section_id: impl Into<String>) -> Self {
        SimError::SectionNotFound {
            section_id: section_id.into(),
        }
    }

    /// Create an UnknownOccupancy error
    pub fn unknown_occupancy(occupancy: impl Into<String>) -> Self {
        SimError::UnknownOccupancy {
            occupancy: occupancy.into(),
        }
    }

    /// Create a Precondition error
    pub fn precondition(what: impl Into<String>, reason: impl Into<String>) -> Self {
        SimError::Precondition {
            what: what.into(),
            reason: reason.into(),
        }
    }

    /// Create a Schema error
    pub fn schema(reason: impl Into<String>) -> Self {
        SimError::Schema {
            reason: reason.into(),
        }
    }

    /// Create an Io error
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SimError::Io {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the sweep driver may recover from by skipping the
    /// combination (unknown section or occupancy key).
    pub fn is_recoverable_lookup(&self) -> bool {
        matches!(
            self,
            SimError::SectionNotFound { .. } | SimError::UnknownOccupancy { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::domain("yield_strength", 1500.0);
        let msg = err.to_string();
        assert!(msg.contains("1500"));
        assert!(msg.contains("yield_strength"));

        let err = SimError::stability(12, 5.01, 5.0);
        assert!(err.to_string().contains("index 12"));
    }

    #[test]
    fn test_error_serialization() {
        let err = SimError::section_not_found("W99X999");
        let json = serde_json::to_string(&err).unwrap();
        let back: SimError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(SimError::section_not_found("W14X90").is_recoverable_lookup());
        assert!(SimError::unknown_occupancy("bunker").is_recoverable_lookup());
        assert!(!SimError::domain("density", 0.0).is_recoverable_lookup());
        assert!(!SimError::stability(0, 6.0, 5.0).is_recoverable_lookup());
    }
}
