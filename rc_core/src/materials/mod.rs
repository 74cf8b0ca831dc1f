//! # Materials
//!
//! Concrete and reinforcing steel definitions with code-dependent design
//! strengths.
//!
//! A single [`Material`] may describe concrete only (`fck`), steel only
//! (`fyk`), or both. Design strengths are derived once at construction and the
//! value is immutable afterwards.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::{Material, DesignCode};
//!
//! let concrete = Material::concrete("C30/37", 30.0, DesignCode::Eurocode).unwrap();
//! let steel = Material::steel("B500B", 500.0, DesignCode::Eurocode).unwrap();
//!
//! assert!((concrete.fcd_mpa().unwrap() - 20.0).abs() < 1e-9);
//! assert!(concrete.fyd_mpa().is_none());
//! assert!((steel.fyd_mpa().unwrap() - 434.78).abs() < 0.01);
//! ```

pub mod design_code;

pub use design_code::{derive_design_strengths, DesignCode, DesignStrengths, SafetyFactors};

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Material descriptor as supplied by a form, file, or command line.
///
/// ## JSON Example
///
/// ```json
/// { "name": "C30/37", "fck_mpa": 30.0, "unit_weight_kn_m3": 25.0, "code": "EUROCODE" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Label (e.g. "C30/37", "B500B")
    pub name: String,
    /// Characteristic concrete compressive strength (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fck_mpa: Option<f64>,
    /// Characteristic steel yield strength (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fyk_mpa: Option<f64>,
    /// Unit weight (kN/m³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_weight_kn_m3: Option<f64>,
    /// Design code selecting the safety factors
    #[serde(default)]
    pub code: DesignCode,
}

/// Validated material with derived design strengths.
///
/// Serializes as its [`MaterialSpec`]; deserialization re-runs validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaterialSpec", into = "MaterialSpec")]
pub struct Material {
    spec: MaterialSpec,
    strengths: DesignStrengths,
}

impl Material {
    /// Build a material from a descriptor, validating every present value.
    pub fn new(spec: MaterialSpec) -> CalcResult<Self> {
        if spec.name.trim().is_empty() {
            return Err(CalcError::missing_field("name"));
        }
        if let Some(fck) = spec.fck_mpa {
            require_positive("fck_mpa", fck)?;
        }
        if let Some(fyk) = spec.fyk_mpa {
            require_positive("fyk_mpa", fyk)?;
        }
        if let Some(w) = spec.unit_weight_kn_m3 {
            require_positive("unit_weight_kn_m3", w)?;
        }

        let strengths = derive_design_strengths(spec.fck_mpa, spec.fyk_mpa, spec.code)?;
        Ok(Material { spec, strengths })
    }

    /// Concrete-only material
    pub fn concrete(name: impl Into<String>, fck_mpa: f64, code: DesignCode) -> CalcResult<Self> {
        Self::new(MaterialSpec {
            name: name.into(),
            fck_mpa: Some(fck_mpa),
            fyk_mpa: None,
            unit_weight_kn_m3: None,
            code,
        })
    }

    /// Steel-only material
    pub fn steel(name: impl Into<String>, fyk_mpa: f64, code: DesignCode) -> CalcResult<Self> {
        Self::new(MaterialSpec {
            name: name.into(),
            fck_mpa: None,
            fyk_mpa: Some(fyk_mpa),
            unit_weight_kn_m3: None,
            code,
        })
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn code(&self) -> DesignCode {
        self.spec.code
    }

    pub fn fck_mpa(&self) -> Option<f64> {
        self.spec.fck_mpa
    }

    pub fn fyk_mpa(&self) -> Option<f64> {
        self.spec.fyk_mpa
    }

    pub fn unit_weight_kn_m3(&self) -> Option<f64> {
        self.spec.unit_weight_kn_m3
    }

    /// Design concrete strength fcd, if this material has an fck
    pub fn fcd_mpa(&self) -> Option<f64> {
        self.strengths.fcd_mpa
    }

    /// Design steel strength fyd, if this material has an fyk
    pub fn fyd_mpa(&self) -> Option<f64> {
        self.strengths.fyd_mpa
    }

    /// fcd, or an error naming this material when it has no fck
    pub fn require_fcd(&self) -> CalcResult<f64> {
        self.fcd_mpa().ok_or_else(|| {
            tracing::warn!(material = self.name(), "material has no fck");
            CalcError::undefined_design_strength(self.name(), "fck (concrete strength)")
        })
    }

    /// fyd, or an error naming this material when it has no fyk
    pub fn require_fyd(&self) -> CalcResult<f64> {
        self.fyd_mpa().ok_or_else(|| {
            tracing::warn!(material = self.name(), "material has no fyk");
            CalcError::undefined_design_strength(self.name(), "fyk (steel yield strength)")
        })
    }

    /// The descriptor this material was built from
    pub fn spec(&self) -> &MaterialSpec {
        &self.spec
    }

    /// One-line description, e.g. `C30/37 | fck=30 MPa -> fcd=20.00 MPa (EUROCODE)`
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.spec.name.clone()];
        if let (Some(fck), Some(fcd)) = (self.spec.fck_mpa, self.strengths.fcd_mpa) {
            parts.push(format!("fck={} MPa -> fcd={:.2} MPa ({})", fck, fcd, self.spec.code));
        }
        if let (Some(fyk), Some(fyd)) = (self.spec.fyk_mpa, self.strengths.fyd_mpa) {
            parts.push(format!("fyk={} MPa -> fyd={:.2} MPa ({})", fyk, fyd, self.spec.code));
        }
        parts.join(" | ")
    }

    /// Flat summary including the derived strengths, for reports
    pub fn summary(&self) -> MaterialSummary {
        MaterialSummary {
            name: self.spec.name.clone(),
            fck_mpa: self.spec.fck_mpa,
            fcd_mpa: self.strengths.fcd_mpa,
            fyk_mpa: self.spec.fyk_mpa,
            fyd_mpa: self.strengths.fyd_mpa,
            unit_weight_kn_m3: self.spec.unit_weight_kn_m3,
            code: self.spec.code,
        }
    }
}

impl TryFrom<MaterialSpec> for Material {
    type Error = CalcError;

    fn try_from(spec: MaterialSpec) -> Result<Self, Self::Error> {
        Material::new(spec)
    }
}

impl From<Material> for MaterialSpec {
    fn from(mat: Material) -> Self {
        mat.spec
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Report form of a material with characteristic and design strengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub name: String,
    pub fck_mpa: Option<f64>,
    pub fcd_mpa: Option<f64>,
    pub fyk_mpa: Option<f64>,
    pub fyd_mpa: Option<f64>,
    pub unit_weight_kn_m3: Option<f64>,
    pub code: DesignCode,
}
