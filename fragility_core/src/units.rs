//! # Unit Types
//!
//! Type-safe wrappers for the time units the fire-curve formulas mix.
//!
//! Everything in the public API runs on seconds (`_s` fields); the published
//! curve equations are written in minutes or hours. These newtypes keep the
//! conversion at the formula boundary instead of scattering `/ 60.0` through
//! the equations.
//!
//! ## Example
//!
//! ```rust
//! use fragility_core::units::{Hours, Minutes, Seconds};
//!
//! let t = Seconds(300.0);
//! let t_min: Minutes = t.into();
//! assert_eq!(t_min.0, 5.0);
//!
//! let t_h: Hours = t.into();
//! assert!((t_h.0 - 300.0 / 3600.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Time in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

/// Time in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

/// Time in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl From<Seconds> for Minutes {
    fn from(s: Seconds) -> Self {
        Minutes(s.0 / 60.0)
    }
}

impl From<Seconds> for Hours {
    fn from(s: Seconds) -> Self {
        Hours(s.0 / 3600.0)
    }
}

impl From<Minutes> for Seconds {
    fn from(m: Minutes) -> Self {
        Seconds(m.0 * 60.0)
    }
}

impl From<Minutes> for Hours {
    fn from(m: Minutes) -> Self {
        Hours(m.0 / 60.0)
    }
}

impl From<Hours> for Seconds {
    fn from(h: Hours) -> Self {
        Seconds(h.0 * 3600.0)
    }
}

impl From<Hours> for Minutes {
    fn from(h: Hours) -> Self {
        Minutes(h.0 * 60.0)
    }
}
