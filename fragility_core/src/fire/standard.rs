//! Published standard fire curves.
//!
//! Each function maps a time array in seconds to gas temperatures in degC.
//! The published equations are written in minutes (ISO 834, ASTM E119) or
//! hours (external, hydrocarbon); conversion happens here, at the formula
//! boundary, never in the caller.

use crate::units::{Hours, Minutes, Seconds};

use super::{AMBIENT_C, CurveKind};

/// ISO 834 cellulosic curve: `20 + 345 log10(8 t + 1)`, t in minutes.
pub fn iso834(time_s: &[f64]) -> Vec<f64> {
    time_s
        .iter()
        .map(|&t| {
            let t_min = Minutes::from(Seconds(t)).0;
            AMBIENT_C + 345.0 * (8.0 * t_min + 1.0).log10()
        })
        .collect()
}

/// ASTM E119 curve: `20 + 750 (1 - e^(-3.79553 sqrt(t_h))) + 170.41 sqrt(t_h)`,
/// t_h in hours (the published form divides minutes by 60).
pub fn astm_e119(time_s: &[f64]) -> Vec<f64> {
    time_s
        .iter()
        .map(|&t| {
            let t_h = Minutes::from(Seconds(t)).0 / 60.0;
            AMBIENT_C + 750.0 * (1.0 - (-3.79553 * t_h.sqrt()).exp()) + 170.41 * t_h.sqrt()
        })
        .collect()
}

/// External fire curve: `20 + 660 (1 - 0.687 e^(-0.32 t_h) - 0.313 e^(-3.8 t_h))`.
///
/// The exponential coefficients sum to one, so the expression is evaluated
/// in the factored `sum c_i (1 - e^...)` form that starts exactly at ambient.
pub fn external(time_s: &[f64]) -> Vec<f64> {
    time_s
        .iter()
        .map(|&t| {
            let t_h = Hours::from(Seconds(t)).0;
            AMBIENT_C
                + 660.0
                    * (0.687 * (1.0 - (-0.32 * t_h).exp()) + 0.313 * (1.0 - (-3.8 * t_h).exp()))
        })
        .collect()
}

/// Hydrocarbon curve: `20 + 1080 (1 - 0.325 e^(-0.167 t_h) - 0.675 e^(-2.5 t_h))`,
/// evaluated in the same factored form.
pub fn hydrocarbon(time_s: &[f64]) -> Vec<f64> {
    time_s
        .iter()
        .map(|&t| {
            let t_h = Hours::from(Seconds(t)).0;
            AMBIENT_C
                + 1080.0
                    * (0.325 * (1.0 - (-0.167 * t_h).exp())
                        + 0.675 * (1.0 - (-2.5 * t_h).exp()))
        })
        .collect()
}

/// Dispatch a standard curve kind over a time array.
///
/// Panics on `Parametric` - callers reach this only through
/// [`super::FireExposure::standard`], which rejects that kind first.
pub(crate) fn temperatures(kind: CurveKind, time_s: &[f64]) -> Vec<f64> {
    match kind {
        CurveKind::Iso834 => iso834(time_s),
        CurveKind::AstmE119 => astm_e119(time_s),
        CurveKind::External => external(time_s),
        CurveKind::Hydrocarbon => hydrocarbon(time_s),
        CurveKind::Parametric => unreachable!("parametric curves are not standard curves"),
    }
}
