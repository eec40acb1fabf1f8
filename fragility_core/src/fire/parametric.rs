//! Compartment parametric fire curve.
//!
//! Builds a full growth-and-decay gas temperature history from compartment
//! geometry, lining thermal inertia, opening geometry, occupancy class, and
//! fuel load energy density. The growth phase follows the published
//! exponential-sum expression against the fictitious (ventilation- and
//! inertia-normalized) time scale; the decay phase is linear with a slope
//! keyed on the rounded fictitious duration.
//!
//! Where the reference formulation compares floating-point durations with
//! `==`, this implementation uses a relative tolerance.

use serde::{Deserialize, Serialize};

use crate::errors::{SimError, SimResult};

use super::{AMBIENT_C, CurveKind, FireExposure};

/// Relative tolerance for the duration comparisons that decide the burning
/// regime and the decay offset.
const DURATION_TOL: f64 = 1e-9;

/// Fire growth rate class from the occupancy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthRate {
    Slow,
    Medium,
    Fast,
}

/// Whether the burning duration was governed by the fuel available or by the
/// ventilation-controlled duration formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurningRegime {
    FuelControlled,
    VentilationControlled,
}

/// Occupancy class, keying the growth rate and the minimum burning duration.
///
/// The table has exactly nine entries; any other occupancy string is an
/// input error, not a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Dwelling,
    Hospital,
    Hotel,
    Library,
    Office,
    Classroom,
    ShoppingCenter,
    Theatre,
    Transport,
}

impl Occupancy {
    /// All occupancy classes for iteration
    pub const ALL: [Occupancy; 9] = [
        Occupancy::Dwelling,
        Occupancy::Hospital,
        Occupancy::Hotel,
        Occupancy::Library,
        Occupancy::Office,
        Occupancy::Classroom,
        Occupancy::ShoppingCenter,
        Occupancy::Theatre,
        Occupancy::Transport,
    ];

    /// Fire growth rate class
    pub fn growth_rate(self) -> GrowthRate {
        match self {
            Occupancy::Library | Occupancy::ShoppingCenter | Occupancy::Theatre => GrowthRate::Fast,
            Occupancy::Transport => GrowthRate::Slow,
            _ => GrowthRate::Medium,
        }
    }

    /// Minimum burning duration (h): 15/60 for fast, 20/60 for medium,
    /// 25/60 for slow growth occupancies.
    pub fn duration_limit_h(self) -> f64 {
        match self.growth_rate() {
            GrowthRate::Fast => 15.0 / 60.0,
            GrowthRate::Medium => 20.0 / 60.0,
            GrowthRate::Slow => 25.0 / 60.0,
        }
    }

    /// Parse an occupancy key as it appears in config files ("office",
    /// "shopping center", "shopping_center", any case).
    pub fn parse(s: &str) -> SimResult<Self> {
        let key = s.trim().to_lowercase().replace(' ', "_");
        match key.as_str() {
            "dwelling" => Ok(Occupancy::Dwelling),
            "hospital" => Ok(Occupancy::Hospital),
            "hotel" => Ok(Occupancy::Hotel),
            "library" => Ok(Occupancy::Library),
            "office" => Ok(Occupancy::Office),
            "classroom" => Ok(Occupancy::Classroom),
            "shopping_center" => Ok(Occupancy::ShoppingCenter),
            "theatre" => Ok(Occupancy::Theatre),
            "transport" => Ok(Occupancy::Transport),
            _ => Err(SimError::unknown_occupancy(s)),
        }
    }
}

/// Compartment parametric fire definition.
///
/// Lengths in meters, lining properties in SI (W/(m K), kg/m^3, J/(kg K)),
/// fuel load energy density in MJ per m^2 of floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametricFire {
    pub occupancy: Occupancy,
    pub lining_conductivity: f64,
    pub lining_density: f64,
    pub lining_specific_heat: f64,
    pub window_base: f64,
    pub window_height: f64,
    pub room_length1: f64,
    pub room_length2: f64,
    pub room_height: f64,
    pub fuel_load_energy_density: f64,
    /// Reference ventilation factor (m^0.5), 0.04 in the reference formulation
    pub reference_ventilation_factor: f64,
    /// Reference sqrt of thermal inertia (W s^0.5 / (m^2 K)), 1160
    pub reference_sqrt_thermal_inertia: f64,
    /// Grid spacing for the generated history (s)
    pub time_step_seconds: f64,
}

impl ParametricFire {
    /// Parametric fire with the reference normalization constants and a 30 s
    /// grid.
    pub fn new(
        occupancy: Occupancy,
        lining_conductivity: f64,
        lining_density: f64,
        lining_specific_heat: f64,
        window_base: f64,
        window_height: f64,
        room_length1: f64,
        room_length2: f64,
        room_height: f64,
        fuel_load_energy_density: f64,
    ) -> Self {
        ParametricFire {
            occupancy,
            lining_conductivity,
            lining_density,
            lining_specific_heat,
            window_base,
            window_height,
            room_length1,
            room_length2,
            room_height,
            fuel_load_energy_density,
            reference_ventilation_factor: 0.04,
            reference_sqrt_thermal_inertia: 1160.0,
            time_step_seconds: 30.0,
        }
    }

    /// Validate all compartment inputs.
    pub fn validate(&self) -> SimResult<()> {
        let positive = [
            ("lining_conductivity", self.lining_conductivity),
            ("lining_density", self.lining_density),
            ("lining_specific_heat", self.lining_specific_heat),
            ("window_base", self.window_base),
            ("window_height", self.window_height),
            ("room_length1", self.room_length1),
            ("room_length2", self.room_length2),
            ("room_height", self.room_height),
            ("fuel_load_energy_density", self.fuel_load_energy_density),
            ("reference_ventilation_factor", self.reference_ventilation_factor),
            (
                "reference_sqrt_thermal_inertia",
                self.reference_sqrt_thermal_inertia,
            ),
            ("time_step_seconds", self.time_step_seconds),
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

    /// sqrt(k rho c_p) of the lining (W s^0.5 / (m^2 K))
    pub fn sqrt_thermal_inertia(&self) -> f64 {
        (self.lining_conductivity * self.lining_density * self.lining_specific_heat).sqrt()
    }

    /// Floor area (m^2)
    pub fn room_floor_area(&self) -> f64 {
        self.room_length1 * self.room_length2
    }

    /// Window opening area (m^2)
    pub fn window_area(&self) -> f64 {
        self.window_base * self.window_height
    }

    /// Weighted opening height (m)
    pub fn window_opening_height(&self) -> f64 {
        self.window_base * self.window_height.powi(2) / self.window_area()
    }

    /// Total internal surface area of the compartment boundary (m^2)
    pub fn room_total_internal_surface_area(&self) -> f64 {
        2.0 * (self.room_length1 * self.room_length2
            + self.room_length1 * self.room_height
            + self.room_length2 * self.room_height)
    }

    /// Ventilation factor F_v = A_v sqrt(H_v) / A_t (m^0.5)
    pub fn ventilation_factor(&self) -> f64 {
        self.window_area() * self.window_opening_height().sqrt()
            / self.room_total_internal_surface_area()
    }

    /// Fuel load energy density per unit internal surface area (MJ/m^2)
    pub fn fuel_load_per_internal_surface(&self) -> f64 {
        self.fuel_load_energy_density * self.room_floor_area()
            / self.room_total_internal_surface_area()
    }

    /// Burning duration (h): the larger of the ventilation-governed duration
    /// and the occupancy's minimum duration.
    pub fn burning_duration_h(&self) -> f64 {
        let ventilation_governed =
            0.2e-3 * self.fuel_load_per_internal_surface() / self.ventilation_factor();
        ventilation_governed.max(self.occupancy.duration_limit_h())
    }

    /// Which term governed the burning duration.
    pub fn regime(&self) -> BurningRegime {
        if approx_eq(self.burning_duration_h(), self.occupancy.duration_limit_h()) {
            BurningRegime::FuelControlled
        } else {
            BurningRegime::VentilationControlled
        }
    }

    /// Fictitious time ratio normalizing ventilation and thermal inertia
    /// against the reference compartment.
    pub fn fictitious_ratio(&self) -> f64 {
        (self.ventilation_factor() / self.reference_ventilation_factor).powi(2)
            / (self.sqrt_thermal_inertia() / self.reference_sqrt_thermal_inertia).powi(2)
    }

    /// Fictitious burning duration t* (h)
    pub fn fictitious_duration_h(&self) -> f64 {
        self.fictitious_ratio() * self.burning_duration_h()
    }

    /// Grid steps per hour
    fn steps_per_hour(&self) -> f64 {
        3600.0 / self.time_step_seconds
    }

    /// Ceiling of an hour value to the grid spacing
    fn round_up_to_grid(&self, hours: f64) -> f64 {
        (hours * self.steps_per_hour()).ceil() / self.steps_per_hour()
    }

    /// Fictitious duration rounded up to the grid (h). The temperature peak
    /// lands exactly on this boundary.
    pub fn rounded_fictitious_duration_h(&self) -> f64 {
        self.round_up_to_grid(self.fictitious_duration_h())
    }

    /// Decay reference offset x: 1.0 when the ventilation-governed term
    /// exceeds the occupancy limit, otherwise the limit ratio correction.
    pub fn decay_offset(&self) -> f64 {
        let limit = self.occupancy.duration_limit_h();
        let duration = self.burning_duration_h();
        if duration > limit && !approx_eq(duration, limit) {
            1.0
        } else {
            limit * self.fictitious_ratio() / self.fictitious_duration_h()
        }
    }

    /// Growth-phase temperature at fictitious time t* (h).
    ///
    /// The coefficients sum to one; the factored form starts exactly at
    /// ambient.
    fn growth_temperature(t_star_h: f64) -> f64 {
        AMBIENT_C
            + 1325.0
                * (0.324 * (1.0 - (-0.2 * t_star_h).exp())
                    + 0.204 * (1.0 - (-1.7 * t_star_h).exp())
                    + 0.472 * (1.0 - (-19.0 * t_star_h).exp()))
    }

    /// Peak gas temperature (degC), reached at the rounded fictitious
    /// duration.
    pub fn peak_temperature(&self) -> f64 {
        Self::growth_temperature(self.rounded_fictitious_duration_h())
    }

    /// Linear decay slope (degC per fictitious hour) for a rounded
    /// fictitious duration.
    pub fn decay_slope(t_star_r_h: f64) -> f64 {
        if t_star_r_h <= 0.5 {
            625.0
        } else if t_star_r_h <= 2.0 {
            250.0 * (3.0 - t_star_r_h)
        } else {
            250.0
        }
    }

    /// Total fictitious duration until the decay branch returns to ambient (h)
    pub fn total_duration_h(&self) -> f64 {
        let t_star_r = self.rounded_fictitious_duration_h();
        (self.peak_temperature() - AMBIENT_C) / Self::decay_slope(t_star_r)
            + t_star_r * self.decay_offset()
    }

    /// Total duration rounded up to the grid (h)
    pub fn rounded_total_duration_h(&self) -> f64 {
        self.round_up_to_grid(self.total_duration_h())
    }

    /// Build the full exposure history.
    ///
    /// The grid is exact multiples of `time_step_seconds` from zero through
    /// the rounded total duration, so the peak sits exactly on the rounded
    /// fictitious-duration boundary and every step obeys the integrators'
    /// spacing assumptions. The decay branch is clamped at ambient: the raw
    /// linear decay undershoots 20 degC by construction.
    pub fn exposure(&self) -> SimResult<FireExposure> {
        self.validate()?;
        let t_star_r = self.rounded_fictitious_duration_h();
        let peak = self.peak_temperature();
        let slope = Self::decay_slope(t_star_r);
        let x = self.decay_offset();
        let step_h = self.time_step_seconds / 3600.0;
        let n_steps = (self.rounded_total_duration_h() * self.steps_per_hour()).round() as usize;

        let mut time_s = Vec::with_capacity(n_steps + 1);
        let mut temp_c = Vec::with_capacity(n_steps + 1);
        for i in 0..=n_steps {
            let t_h = i as f64 * step_h;
            let temp = if t_h <= t_star_r + DURATION_TOL {
                Self::growth_temperature(t_h)
            } else {
                (peak - slope * (t_h - t_star_r * x)).max(AMBIENT_C)
            };
            time_s.push(i as f64 * self.time_step_seconds);
            temp_c.push(temp);
        }
        FireExposure::new(CurveKind::Parametric, time_s, temp_c)
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= DURATION_TOL * a.abs().max(b.abs()).max(1.0)
}
