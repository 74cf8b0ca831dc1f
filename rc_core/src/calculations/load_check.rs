//! # Load Check
//!
//! Compares an applied axial force and moment against caller-supplied
//! resistances and classifies the accompanying strain state.
//!
//! The resistances are inputs: this check does not search the interaction
//! diagram for the capacity at the applied axial load.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::calculations::load_check::{check_load, LoadCheckInput};
//! use rc_core::failure_mode::{FailureMode, StrainLimits};
//!
//! let input = LoadCheckInput {
//!     label: "C-1 ULS".to_string(),
//!     applied_axial_n: 800_000.0,
//!     applied_moment_nmm: 90.0e6,
//!     resisting_axial_n: 1_020_000.0,
//!     resisting_moment_nmm: 102.0e6,
//!     strain_top: 0.0035,
//!     strain_bottom: 0.004,
//!     neutral_axis_depth_mm: 250.0,
//!     section_depth_mm: 500.0,
//!     limits: StrainLimits::default(),
//! };
//!
//! let result = check_load(&input).unwrap();
//! assert!(result.is_safe);
//! assert_eq!(result.failure_mode, FailureMode::CompressionControlled);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, require_positive, CalcResult};
use crate::failure_mode::{FailureMode, StrainLimits};

/// Input parameters for a load check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCheckInput {
    /// User label (e.g. "C-1 ULS")
    #[serde(default)]
    pub label: String,
    /// Applied axial force, compression positive (N)
    pub applied_axial_n: f64,
    /// Applied bending moment (N·mm)
    pub applied_moment_nmm: f64,
    /// Axial resistance (N)
    pub resisting_axial_n: f64,
    /// Moment resistance (N·mm)
    pub resisting_moment_nmm: f64,
    /// Top fibre strain, compression positive
    pub strain_top: f64,
    /// Bottom fibre strain, tension positive
    pub strain_bottom: f64,
    /// Neutral axis depth (mm)
    pub neutral_axis_depth_mm: f64,
    /// Overall section depth (mm)
    pub section_depth_mm: f64,
    /// Ultimate strain limits
    #[serde(default)]
    pub limits: StrainLimits,
}

impl LoadCheckInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("applied_axial_n", self.applied_axial_n)?;
        require_finite("applied_moment_nmm", self.applied_moment_nmm)?;
        require_finite("resisting_axial_n", self.resisting_axial_n)?;
        require_finite("resisting_moment_nmm", self.resisting_moment_nmm)?;
        require_finite("strain_top", self.strain_top)?;
        require_finite("strain_bottom", self.strain_bottom)?;
        require_finite("neutral_axis_depth_mm", self.neutral_axis_depth_mm)?;
        require_positive("section_depth_mm", self.section_depth_mm)?;
        self.limits.validate()
    }
}

/// Results from a load check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "is_safe": true,
///   "applied_axial_n": 800000.0,
///   "applied_moment_nmm": 90000000.0,
///   "resisting_axial_n": 1020000.0,
///   "resisting_moment_nmm": 102000000.0,
///   "axial_unity": 0.78,
///   "moment_unity": 0.88,
///   "failure_mode": "COMPRESSION_CONTROLLED"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadCheckResult {
    /// Both applied actions within their resistances
    pub is_safe: bool,
    pub applied_axial_n: f64,
    pub applied_moment_nmm: f64,
    pub resisting_axial_n: f64,
    pub resisting_moment_nmm: f64,
    /// applied / resisting axial force (None when the resistance is zero)
    pub axial_unity: Option<f64>,
    /// applied / resisting moment (None when the resistance is zero)
    pub moment_unity: Option<f64>,
    /// Strain-threshold classification of the given strain state
    pub failure_mode: FailureMode,
}

impl LoadCheckResult {
    /// Name of the check closest to failing
    pub fn governing_condition(&self) -> &'static str {
        match (self.axial_unity, self.moment_unity) {
            (Some(a), Some(m)) if a >= m => "Axial",
            (Some(_), Some(_)) => "Moment",
            (Some(_), None) => "Moment",
            (None, Some(_)) => "Axial",
            (None, None) => "Axial",
        }
    }
}

fn unity(applied: f64, resisting: f64) -> Option<f64> {
    if resisting == 0.0 {
        None
    } else {
        Some(applied / resisting)
    }
}

/// Check applied actions against resistances.
///
/// `is_safe` holds when applied N ≤ resisting N and applied M ≤ resisting M.
pub fn check_load(input: &LoadCheckInput) -> CalcResult<LoadCheckResult> {
    input.validate()?;

    let is_safe = input.applied_axial_n <= input.resisting_axial_n
        && input.applied_moment_nmm <= input.resisting_moment_nmm;

    let failure_mode = input.limits.classify(input.strain_top, input.strain_bottom);

    if !is_safe {
        tracing::debug!(
            applied_axial_n = input.applied_axial_n,
            applied_moment_nmm = input.applied_moment_nmm,
            "load check exceeded resistance"
        );
    }

    Ok(LoadCheckResult {
        is_safe,
        applied_axial_n: input.applied_axial_n,
        applied_moment_nmm: input.applied_moment_nmm,
        resisting_axial_n: input.resisting_axial_n,
        resisting_moment_nmm: input.resisting_moment_nmm,
        axial_unity: unity(input.applied_axial_n, input.resisting_axial_n),
        moment_unity: unity(input.applied_moment_nmm, input.resisting_moment_nmm),
        failure_mode,
    })
}
