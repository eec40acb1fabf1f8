//! # Section Property Database
//!
//! Cross-section geometry for the column catalog, loaded from a CSV table
//! keyed by section size, plus the derived section factors the thermal
//! model consumes.
//!
//! ## CSV format
//!
//! Header columns (case-insensitive, any order): `section size`, `weight`,
//! `A`, `d`, `bf`, `tw`, `tf`, `Ix`, `Iy`. A missing column or a duplicate
//! section key is a load-time schema error; the simulation core never sees a
//! malformed table.
//!
//! ## Example
//!
//! ```rust
//! use fragility_core::sections::SectionDb;
//!
//! let csv = "section size,weight,A,d,bf,tw,tf,Ix,Iy\n\
//!            W14X342,342,101,17.5,16.4,1.54,2.47,4900,1810\n";
//! let db = SectionDb::from_csv_str(csv).unwrap();
//! let shape = db.lookup("w14x342").unwrap();
//! let factors = shape.factors().unwrap();
//! assert!(factors.shadow_factor < 1.0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SimError, SimResult};

/// Conversion applied to the tabulated inch dimensions when forming the
/// exposed perimeter and volume per unit length, as in the reference
/// section-factor derivation.
pub const UNIT_CONVERSION: f64 = 0.254;

/// One row of the section property table (inch units as tabulated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionShape {
    /// Section size key, e.g. "W14X342"
    pub section_size: String,
    /// Nominal weight (plf)
    pub weight: f64,
    /// Cross-sectional area (in^2)
    pub area: f64,
    /// Depth (in)
    pub depth: f64,
    /// Flange width (in)
    pub flange_width: f64,
    /// Web thickness (in)
    pub web_thickness: f64,
    /// Flange thickness (in)
    pub flange_thickness: f64,
    /// Strong-axis moment of inertia (in^4)
    pub ix: f64,
    /// Weak-axis moment of inertia (in^4)
    pub iy: f64,
}

/// Section factors derived from a [`SectionShape`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionFactors {
    /// Exposed perimeter per unit length F
    pub perimeter: f64,
    /// Volume per unit length V
    pub volume: f64,
    /// Board-protection perimeter F_b
    pub board_perimeter: f64,
    /// Board-protection volume V_b (equal to V: the board wraps the member
    /// tightly)
    pub board_volume: f64,
    /// Contour section factor F/V
    pub contour_factor: f64,
    /// Board section factor F_b/V_b
    pub board_factor: f64,
    /// Shadow correction factor k_sh
    pub shadow_factor: f64,
}

impl SectionShape {
    /// True for I-shaped members (W, M, S, HP families), which take the 0.9
    /// shadow correction.
    pub fn is_i_section(&self) -> bool {
        let prefix: String = self
            .section_size
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_uppercase();
        matches!(prefix.as_str(), "W" | "M" | "S" | "HP")
    }

    /// Derive the section factors used by the thermal model.
    ///
    /// All geometric quantities must be strictly positive.
    pub fn factors(&self) -> SimResult<SectionFactors> {
        let positive = [
            ("area", self.area),
            ("depth", self.depth),
            ("flange_width", self.flange_width),
            ("web_thickness", self.web_thickness),
            ("flange_thickness", self.flange_thickness),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(SimError::precondition(
                    name,
                    format!("section '{}': must be positive, got {}", self.section_size, value),
                ));
            }
        }

        let perimeter =
            (2.0 * self.depth + 4.0 * self.flange_width - 2.0 * self.web_thickness)
                * UNIT_CONVERSION;
        if perimeter <= 0.0 {
            return Err(SimError::precondition(
                "perimeter",
                format!("section '{}': derived perimeter is not positive", self.section_size),
            ));
        }
        let volume = self.area * UNIT_CONVERSION.powi(2);
        let board_perimeter = 2.0 * (self.flange_width + self.depth) * UNIT_CONVERSION;
        let board_volume = volume;

        let contour_factor = perimeter / volume;
        let board_factor = board_perimeter / board_volume;
        let shadow_factor = if self.is_i_section() {
            0.9 * board_factor / contour_factor
        } else {
            board_factor / contour_factor
        };

        Ok(SectionFactors {
            perimeter,
            volume,
            board_perimeter,
            board_volume,
            contour_factor,
            board_factor,
            shadow_factor,
        })
    }
}

/// Section database loaded from the property CSV.
///
/// Read-only after loading; shared by reference across every sweep
/// combination that names the same section.
#[derive(Debug, Clone, Default)]
pub struct SectionDb {
    sections: HashMap<String, SectionShape>,
}

impl SectionDb {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shape, rejecting duplicate keys.
    pub fn insert(&mut self, shape: SectionShape) -> SimResult<()> {
        let key = shape.section_size.to_uppercase();
        if self.sections.contains_key(&key) {
            return Err(SimError::schema(format!(
                "duplicate section key '{}'",
                shape.section_size
            )));
        }
        self.sections.insert(key, shape);
        Ok(())
    }

    /// Look up a section by its size key (case-insensitive).
    pub fn lookup(&self, section_id: &str) -> SimResult<&SectionShape> {
        self.sections
            .get(&section_id.to_uppercase())
            .ok_or_else(|| SimError::section_not_found(section_id))
    }

    /// All section keys in the database
    pub fn labels(&self) -> Vec<&str> {
        self.sections.keys().map(|s| s.as_str()).collect()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when no sections are loaded
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Load the database from a CSV file on disk.
    pub fn load_from_csv(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::io("read", path, e.to_string()))?;
        Self::from_csv_str(&content)
    }

    /// Parse the database from CSV text.
    pub fn from_csv_str(content: &str) -> SimResult<Self> {
        let mut lines = content.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| SimError::schema("section table is empty"))?;
        let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
        let col_index = |name: &str| -> SimResult<usize> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| SimError::schema(format!("missing '{}' column", name)))
        };

        let key_idx = col_index("section size")?;
        let weight_idx = col_index("weight")?;
        let a_idx = col_index("A")?;
        let d_idx = col_index("d")?;
        let bf_idx = col_index("bf")?;
        let tw_idx = col_index("tw")?;
        let tf_idx = col_index("tf")?;
        let ix_idx = col_index("Ix")?;
        let iy_idx = col_index("Iy")?;

        let mut db = SectionDb::new();
        for (line_offset, line) in lines.enumerate() {
            let line_num = line_offset + 2;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let get = |idx: usize, name: &str| -> SimResult<f64> {
                fields
                    .get(idx)
                    .and_then(|v| v.parse::<f64>().ok())
                    .ok_or_else(|| {
                        SimError::schema(format!(
                            "line {}: bad '{}' value",
                            line_num, name
                        ))
                    })
            };
            let section_size = fields
                .get(key_idx)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    SimError::schema(format!("line {}: missing section key", line_num))
                })?
                .to_string();

            db.insert(SectionShape {
                section_size,
                weight: get(weight_idx, "weight")?,
                area: get(a_idx, "A")?,
                depth: get(d_idx, "d")?,
                flange_width: get(bf_idx, "bf")?,
                web_thickness: get(tw_idx, "tw")?,
                flange_thickness: get(tf_idx, "tf")?,
                ix: get(ix_idx, "Ix")?,
                iy: get(iy_idx, "Iy")?,
            })?;
        }
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
section size,weight,A,d,bf,tw,tf,Ix,Iy
W14X342,342,101,17.5,16.4,1.54,2.47,4900,1810
W33X221,221,65.3,33.9,11.8,0.775,1.28,9160,359
HSS8X8X1/2,48.85,13.5,8.0,8.0,0.465,0.465,125,125
";

    #[test]
    fn test_load_and_lookup() {
        let db = SectionDb::from_csv_str(CSV).unwrap();
        assert_eq!(db.len(), 3);

        let shape = db.lookup("W14X342").unwrap();
        assert_eq!(shape.area, 101.0);
        assert_eq!(shape.ix, 4900.0);

        // case-insensitive key
        let lower = db.lookup("w33x221").unwrap();
        assert_eq!(lower.depth, 33.9);

        let err = db.lookup("W99X999").unwrap_err();
        assert!(matches!(err, SimError::SectionNotFound { .. }));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let bad = "section size,weight,A,d,bf,tw,tf,Ix\nW14X342,342,101,17.5,16.4,1.54,2.47,4900\n";
        let err = SectionDb::from_csv_str(bad).unwrap_err();
        assert!(matches!(err, SimError::Schema { .. }));
    }

    #[test]
    fn test_duplicate_key_is_schema_error() {
        let dup = "section size,weight,A,d,bf,tw,tf,Ix,Iy\n\
                   W14X342,342,101,17.5,16.4,1.54,2.47,4900,1810\n\
                   w14x342,342,101,17.5,16.4,1.54,2.47,4900,1810\n";
        let err = SectionDb::from_csv_str(dup).unwrap_err();
        assert!(matches!(err, SimError::Schema { .. }));
    }

    #[test]
    fn test_bad_value_reports_line() {
        let bad = "section size,weight,A,d,bf,tw,tf,Ix,Iy\n\
                   W14X342,342,abc,17.5,16.4,1.54,2.47,4900,1810\n";
        let err = SectionDb::from_csv_str(bad).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_section_factors() {
        let db = SectionDb::from_csv_str(CSV).unwrap();
        let factors = db.lookup("W14X342").unwrap().factors().unwrap();

        // F = (2*17.5 + 4*16.4 - 2*1.54) * 0.254 = 24.770
        assert!((factors.perimeter - 24.770).abs() < 1e-3);
        // V = 101 * 0.254^2 = 6.5161
        assert!((factors.volume - 6.5161).abs() < 1e-3);
        assert_eq!(factors.board_volume, factors.volume);
        assert!((factors.contour_factor - 3.8014).abs() < 1e-3);
        // board/contour collapses to Fb/F = 67.8/97.52
        assert!((factors.board_factor / factors.contour_factor - 0.695242).abs() < 1e-5);
        // I-section takes the 0.9 shadow correction
        assert!((factors.shadow_factor - 0.625718).abs() < 1e-5);
    }

    #[test]
    fn test_shadow_factor_non_i_section() {
        let db = SectionDb::from_csv_str(CSV).unwrap();
        let hss = db.lookup("HSS8X8X1/2").unwrap();
        assert!(!hss.is_i_section());
        let factors = hss.factors().unwrap();
        assert!(
            (factors.shadow_factor - factors.board_factor / factors.contour_factor).abs() < 1e-12
        );
    }

    #[test]
    fn test_non_positive_geometry_rejected() {
        let mut shape = SectionDb::from_csv_str(CSV)
            .unwrap()
            .lookup("W14X342")
            .unwrap()
            .clone();
        shape.area = 0.0;
        assert!(matches!(
            shape.factors().unwrap_err(),
            SimError::Precondition { .. }
        ));
    }
}
