//! Design codes and their material partial safety factors.
//!
//! The factor table is static configuration: one entry per supported code,
//! looked up by tag. Lookups for codes without an entry fail loudly instead of
//! falling back to a default.
//!
//! | Code     | γc   | γs   |
//! |----------|------|------|
//! | EUROCODE | 1.50 | 1.15 |
//! | ACI      | 1.00 | 1.00 |
//!
//! The ACI row is an approximate placeholder (no strength reduction applied
//! here), not the normative φ-factor approach.

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Design code selecting the partial safety factors.
///
/// # Example
/// ```
/// use rc_core::materials::DesignCode;
///
/// let code: DesignCode = "eurocode".parse().unwrap();
/// assert_eq!(code, DesignCode::Eurocode);
/// assert!("BS8110".parse::<DesignCode>().is_err());
/// ```
///
/// Files carry the tag as a string and go through the same parser, so an
/// unknown tag surfaces as [`CalcError::UnsupportedDesignCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum DesignCode {
    /// EN 1992-1-1
    #[default]
    Eurocode,
    /// ACI 318 (placeholder factors)
    Aci,
}

impl DesignCode {
    /// All design codes for UI selection
    pub const ALL: [DesignCode; 2] = [DesignCode::Eurocode, DesignCode::Aci];

    /// Tag used in files and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            DesignCode::Eurocode => "EUROCODE",
            DesignCode::Aci => "ACI",
        }
    }

    /// Partial safety factors for this code
    pub fn safety_factors(&self) -> CalcResult<SafetyFactors> {
        SafetyFactors::for_code(*self)
    }
}

impl FromStr for DesignCode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUROCODE" | "EC2" => Ok(DesignCode::Eurocode),
            "ACI" => Ok(DesignCode::Aci),
            _ => Err(CalcError::unsupported_design_code(s)),
        }
    }
}

impl TryFrom<String> for DesignCode {
    type Error = CalcError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<DesignCode> for String {
    fn from(code: DesignCode) -> Self {
        code.tag().to_string()
    }
}

impl std::fmt::Display for DesignCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Material partial safety factors for one design code
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyFactors {
    /// Concrete factor γc
    pub gamma_c: f64,
    /// Reinforcing steel factor γs
    pub gamma_s: f64,
}

static DESIGN_CODE_FACTORS: Lazy<HashMap<DesignCode, SafetyFactors>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        DesignCode::Eurocode,
        SafetyFactors {
            gamma_c: 1.5,
            gamma_s: 1.15,
        },
    );
    table.insert(
        DesignCode::Aci,
        SafetyFactors {
            gamma_c: 1.0,
            gamma_s: 1.0,
        },
    );
    table
});

impl SafetyFactors {
    /// Look up the factors for a design code
    pub fn for_code(code: DesignCode) -> CalcResult<Self> {
        DESIGN_CODE_FACTORS
            .get(&code)
            .copied()
            .ok_or_else(|| CalcError::unsupported_design_code(code.tag()))
    }

    /// Look up the factors for a raw code tag (e.g. from a form or file)
    pub fn for_tag(tag: &str) -> CalcResult<Self> {
        Self::for_code(tag.parse()?)
    }
}

/// Design strengths derived from characteristic values.
///
/// A `None` strength means the characteristic value was absent and the
/// strength must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignStrengths {
    /// Design concrete compressive strength fcd (MPa)
    pub fcd_mpa: Option<f64>,
    /// Design steel yield strength fyd (MPa)
    pub fyd_mpa: Option<f64>,
}

/// Derive fcd = fck / γc and fyd = fyk / γs for a design code.
///
/// # Example
/// ```
/// use rc_core::materials::{derive_design_strengths, DesignCode};
///
/// let s = derive_design_strengths(Some(30.0), None, DesignCode::Eurocode).unwrap();
/// assert!((s.fcd_mpa.unwrap() - 20.0).abs() < 1e-9);
/// assert!(s.fyd_mpa.is_none());
/// ```
pub fn derive_design_strengths(
    fck_mpa: Option<f64>,
    fyk_mpa: Option<f64>,
    code: DesignCode,
) -> CalcResult<DesignStrengths> {
    let factors = SafetyFactors::for_code(code)?;
    Ok(DesignStrengths {
        fcd_mpa: fck_mpa.map(|fck| fck / factors.gamma_c),
        fyd_mpa: fyk_mpa.map(|fyk| fyk / factors.gamma_s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_table() {
        let ec = SafetyFactors::for_code(DesignCode::Eurocode).unwrap();
        assert_eq!(ec.gamma_c, 1.5);
        assert_eq!(ec.gamma_s, 1.15);

        let aci = SafetyFactors::for_code(DesignCode::Aci).unwrap();
        assert_eq!(aci.gamma_c, 1.0);
        assert_eq!(aci.gamma_s, 1.0);
    }

    #[test]
    fn test_every_code_has_factors() {
        for code in DesignCode::ALL {
            assert!(code.safety_factors().is_ok());
        }
    }

    #[test]
    fn test_unknown_tag_is_explicit_error() {
        let err = SafetyFactors::for_tag("BS8110").unwrap_err();
        assert_eq!(err, CalcError::unsupported_design_code("BS8110"));
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!("ACI".parse::<DesignCode>().unwrap(), DesignCode::Aci);
        assert_eq!(" Eurocode ".parse::<DesignCode>().unwrap(), DesignCode::Eurocode);
        assert!("".parse::<DesignCode>().is_err());
    }

    #[test]
    fn test_derive_eurocode() {
        let s = derive_design_strengths(Some(30.0), Some(500.0), DesignCode::Eurocode).unwrap();
        assert!((s.fcd_mpa.unwrap() - 20.0).abs() < 1e-9);
        assert!((s.fyd_mpa.unwrap() - 434.78).abs() < 0.01);
    }

    #[test]
    fn test_derive_absent_is_none_not_zero() {
        let s = derive_design_strengths(None, None, DesignCode::Aci).unwrap();
        assert_eq!(s.fcd_mpa, None);
        assert_eq!(s.fyd_mpa, None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&DesignCode::Eurocode).unwrap();
        assert_eq!(json, "\"EUROCODE\"");
        let parsed: DesignCode = serde_json::from_str("\"aci\"").unwrap();
        assert_eq!(parsed, DesignCode::Aci);
        let parsed: DesignCode = serde_json::from_str("\"EC2\"").unwrap();
        assert_eq!(parsed, DesignCode::Eurocode);
    }

    #[test]
    fn test_unknown_tag_from_file_is_unsupported() {
        let err = DesignCode::try_from("BS8110".to_string()).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_DESIGN_CODE");

        let err = serde_json::from_str::<DesignCode>("\"BS8110\"").unwrap_err();
        assert!(err.to_string().contains("Unsupported design code: 'BS8110'"));
    }
}
