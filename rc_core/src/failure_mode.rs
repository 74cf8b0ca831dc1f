//! # Failure Mode Classification
//!
//! Maps the state of a section at one neutral axis position to the material
//! that governs its limit state.
//!
//! Two policies are available and must be chosen explicitly:
//!
//! - [`StrainLimits`]: compares the extreme fibre strains against the ultimate
//!   concrete strain εcu and the ultimate steel strain εsu.
//! - [`GeometricThreshold`]: legacy position heuristic comparing the neutral
//!   axis with the mean depths of the compression-side and tension-side bars.
//!   It has no "no failure" outcome. Kept for compatibility with existing
//!   diagrams until the strain policy replaces it.
//!
//! Neither policy can fail for in-range inputs; every outcome is a valid
//! classification.

use serde::{Deserialize, Serialize};

use crate::equations::strain::strain_at;
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};

/// EN 1992-1-1 ultimate concrete compressive strain
pub const DEFAULT_EPS_CU: f64 = 0.0035;

/// Ultimate steel tensile strain
pub const DEFAULT_EPS_SU: f64 = 0.010;

/// Default distance threshold for the geometric heuristic (mm)
pub const DEFAULT_GEOMETRIC_THRESHOLD_MM: f64 = 30.0;

/// Governing failure mode of a section state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureMode {
    /// Concrete crushes before the steel reaches its limit
    CompressionControlled,
    /// Steel reaches its limit before the concrete crushes
    TensionControlled,
    /// Both limits reached together
    Balanced,
    /// Neither limit reached
    NoFailure,
}

impl FailureMode {
    pub const ALL: [FailureMode; 4] = [
        FailureMode::CompressionControlled,
        FailureMode::TensionControlled,
        FailureMode::Balanced,
        FailureMode::NoFailure,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FailureMode::CompressionControlled => "Compression-Controlled",
            FailureMode::TensionControlled => "Tension-Controlled",
            FailureMode::Balanced => "Balanced",
            FailureMode::NoFailure => "No Failure",
        }
    }

    /// Short machine tag, as written to CSV
    pub fn code(&self) -> &'static str {
        match self {
            FailureMode::CompressionControlled => "COMPRESSION_CONTROLLED",
            FailureMode::TensionControlled => "TENSION_CONTROLLED",
            FailureMode::Balanced => "BALANCED",
            FailureMode::NoFailure => "NO_FAILURE",
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// STRAIN-THRESHOLD POLICY
// =============================================================================

/// Ultimate strain limits for the strain-threshold policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainLimits {
    /// Ultimate concrete strain εcu
    pub eps_cu: f64,
    /// Ultimate steel strain εsu
    pub eps_su: f64,
}

impl Default for StrainLimits {
    fn default() -> Self {
        StrainLimits {
            eps_cu: DEFAULT_EPS_CU,
            eps_su: DEFAULT_EPS_SU,
        }
    }
}

impl StrainLimits {
    /// Both limits must be finite and positive.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("limits.eps_cu", self.eps_cu)?;
        require_positive("limits.eps_su", self.eps_su)?;
        Ok(())
    }

    /// Classify from the top fibre strain (compression positive) and the
    /// bottom fibre strain (tension positive).
    ///
    /// Evaluated in this order: compression-controlled, tension-controlled,
    /// balanced, no failure.
    ///
    /// # Example
    /// ```
    /// use rc_core::failure_mode::{FailureMode, StrainLimits};
    ///
    /// let limits = StrainLimits::default();
    /// assert_eq!(limits.classify(0.0035, 0.010), FailureMode::Balanced);
    /// assert_eq!(limits.classify(0.0040, 0.002), FailureMode::CompressionControlled);
    /// ```
    pub fn classify(&self, strain_top: f64, strain_bottom: f64) -> FailureMode {
        let concrete_limit = strain_top >= self.eps_cu;
        let steel_limit = strain_bottom >= self.eps_su;

        if concrete_limit && !steel_limit {
            FailureMode::CompressionControlled
        } else if steel_limit && !concrete_limit {
            FailureMode::TensionControlled
        } else if concrete_limit && steel_limit {
            FailureMode::Balanced
        } else {
            FailureMode::NoFailure
        }
    }
}

/// Strain-threshold classification with the default limits
pub fn classify_by_strain(strain_top: f64, strain_bottom: f64) -> FailureMode {
    StrainLimits::default().classify(strain_top, strain_bottom)
}

// =============================================================================
// GEOMETRIC-THRESHOLD POLICY (legacy heuristic)
// =============================================================================

/// Position-based heuristic parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricThreshold {
    /// Minimum distance between the neutral axis and a bar level (mm)
    pub threshold_mm: f64,
}

impl Default for GeometricThreshold {
    fn default() -> Self {
        GeometricThreshold {
            threshold_mm: DEFAULT_GEOMETRIC_THRESHOLD_MM,
        }
    }
}

impl GeometricThreshold {
    /// The threshold must be finite and not negative.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("policy.threshold_mm", self.threshold_mm)?;
        if self.threshold_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "policy.threshold_mm",
                self.threshold_mm.to_string(),
                "Threshold cannot be negative",
            ));
        }
        Ok(())
    }

    /// Classify from the neutral axis depth and the representative depths of
    /// the compression-side (top) and tension-side (bottom) bars.
    ///
    /// # Example
    /// ```
    /// use rc_core::failure_mode::{FailureMode, GeometricThreshold};
    ///
    /// let heuristic = GeometricThreshold::default();
    /// assert_eq!(heuristic.classify(100.0, 50.0, 450.0), FailureMode::TensionControlled);
    /// assert_eq!(heuristic.classify(400.0, 50.0, 450.0), FailureMode::CompressionControlled);
    /// assert_eq!(heuristic.classify(250.0, 50.0, 450.0), FailureMode::Balanced);
    /// ```
    pub fn classify(&self, x_mm: f64, top_bar_depth_mm: f64, bottom_bar_depth_mm: f64) -> FailureMode {
        let dist_to_tension = (x_mm - bottom_bar_depth_mm).abs();
        let dist_to_compression = (x_mm - top_bar_depth_mm).abs();
        let mid_depth = (top_bar_depth_mm + bottom_bar_depth_mm) / 2.0;

        if dist_to_tension > self.threshold_mm && x_mm < mid_depth {
            FailureMode::TensionControlled
        } else if dist_to_compression > self.threshold_mm && x_mm > mid_depth {
            FailureMode::CompressionControlled
        } else {
            FailureMode::Balanced
        }
    }
}

/// Geometric classification with the default 30 mm threshold
pub fn classify_by_position(x_mm: f64, top_bar_depth_mm: f64, bottom_bar_depth_mm: f64) -> FailureMode {
    GeometricThreshold::default().classify(x_mm, top_bar_depth_mm, bottom_bar_depth_mm)
}

// =============================================================================
// POLICY SELECTION
// =============================================================================

/// Classification policy applied by the interaction sweep.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "Geometric", "threshold_mm": 30.0 }
/// { "kind": "StrainLimits", "eps_cu": 0.0035, "eps_su": 0.01 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClassificationPolicy {
    /// Legacy neutral-axis position heuristic (default)
    Geometric(GeometricThreshold),
    /// Extreme fibre strains against ultimate limits
    StrainLimits(StrainLimits),
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        ClassificationPolicy::Geometric(GeometricThreshold::default())
    }
}

impl ClassificationPolicy {
    /// Short name for logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            ClassificationPolicy::Geometric(_) => "geometric",
            ClassificationPolicy::StrainLimits(_) => "strain",
        }
    }

    /// Check the parameters of the selected policy
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            ClassificationPolicy::Geometric(heuristic) => heuristic.validate(),
            ClassificationPolicy::StrainLimits(limits) => limits.validate(),
        }
    }

    /// Classify one sweep sample.
    ///
    /// The strain policy reads the profile at the top fibre (depth 0) and the
    /// bottom fibre (depth h), flipping the bottom sign so tension is positive.
    pub fn classify_sample(
        &self,
        x_mm: f64,
        section_depth_mm: f64,
        top_bar_depth_mm: f64,
        bottom_bar_depth_mm: f64,
    ) -> CalcResult<FailureMode> {
        match self {
            ClassificationPolicy::Geometric(heuristic) => {
                Ok(heuristic.classify(x_mm, top_bar_depth_mm, bottom_bar_depth_mm))
            }
            ClassificationPolicy::StrainLimits(limits) => {
                let strain_top = strain_at(x_mm, 0.0)?;
                let strain_bottom = -strain_at(x_mm, section_depth_mm)?;
                Ok(limits.classify(strain_top, strain_bottom))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strain_boundary_is_balanced() {
        assert_eq!(classify_by_strain(DEFAULT_EPS_CU, DEFAULT_EPS_SU), FailureMode::Balanced);
    }

    #[test]
    fn test_strain_branches() {
        assert_eq!(classify_by_strain(0.004, 0.005), FailureMode::CompressionControlled);
        assert_eq!(classify_by_strain(0.002, 0.012), FailureMode::TensionControlled);
        assert_eq!(classify_by_strain(0.004, 0.012), FailureMode::Balanced);
        assert_eq!(classify_by_strain(0.002, 0.005), FailureMode::NoFailure);
    }

    #[test]
    fn test_strain_policy_exhaustive_and_exclusive() {
        let limits = StrainLimits::default();
        let strains = [-1.0, 0.0, 0.001, 0.0035, 0.005, 0.0099, 0.010, 0.02, 1.0];
        for &top in &strains {
            for &bottom in &strains {
                let concrete = top >= limits.eps_cu;
                let steel = bottom >= limits.eps_su;
                // Exactly one predicate holds for each pair
                let matches = [
                    concrete && !steel,
                    steel && !concrete,
                    concrete && steel,
                    !concrete && !steel,
                ];
                assert_eq!(matches.iter().filter(|m| **m).count(), 1);

                let expected = FailureMode::ALL[matches.iter().position(|m| *m).unwrap()];
                assert_eq!(limits.classify(top, bottom), expected, "top={top}, bottom={bottom}");
            }
        }
    }

    #[test]
    fn test_geometric_branches() {
        // bars at 50 and 450, mid-depth 250
        assert_eq!(classify_by_position(100.0, 50.0, 450.0), FailureMode::TensionControlled);
        assert_eq!(classify_by_position(400.0, 50.0, 450.0), FailureMode::CompressionControlled);
        assert_eq!(classify_by_position(250.0, 50.0, 450.0), FailureMode::Balanced);
    }

    #[test]
    fn test_geometric_threshold_band() {
        // Within 30 mm of the tension bars but above mid-depth is still compression side
        assert_eq!(classify_by_position(440.0, 50.0, 450.0), FailureMode::CompressionControlled);
        // Tight bars: both distances under threshold
        assert_eq!(classify_by_position(105.0, 100.0, 120.0), FailureMode::Balanced);
    }

    #[test]
    fn test_geometric_never_no_failure() {
        for i in 1..500 {
            let mode = classify_by_position(i as f64, 50.0, 450.0);
            assert_ne!(mode, FailureMode::NoFailure);
        }
    }

    #[test]
    fn test_policy_default_is_geometric() {
        assert_eq!(
            ClassificationPolicy::default(),
            ClassificationPolicy::Geometric(GeometricThreshold { threshold_mm: 30.0 })
        );
    }

    #[test]
    fn test_strain_policy_sample() {
        let policy = ClassificationPolicy::StrainLimits(StrainLimits::default());
        // x = 100, h = 500: top = 1.0, bottom = 4.0 -> both limits exceeded
        let mode = policy.classify_sample(100.0, 500.0, 50.0, 450.0).unwrap();
        assert_eq!(mode, FailureMode::Balanced);
        assert!(policy.classify_sample(0.0, 500.0, 50.0, 450.0).is_err());
    }

    #[test]
    fn test_policy_validation() {
        assert!(ClassificationPolicy::default().validate().is_ok());
        assert!(ClassificationPolicy::StrainLimits(StrainLimits::default()).validate().is_ok());

        let negative = ClassificationPolicy::Geometric(GeometricThreshold { threshold_mm: -5.0 });
        assert_eq!(negative.validate().unwrap_err().error_code(), "INVALID_INPUT");
        let zero = ClassificationPolicy::Geometric(GeometricThreshold { threshold_mm: 0.0 });
        assert!(zero.validate().is_ok());

        let no_cu = ClassificationPolicy::StrainLimits(StrainLimits { eps_cu: 0.0, eps_su: 0.01 });
        assert!(no_cu.validate().is_err());
        let nan_su = StrainLimits { eps_cu: 0.0035, eps_su: f64::NAN };
        assert!(nan_su.validate().is_err());
    }

    #[test]
    fn test_policy_serialization() {
        let policy = ClassificationPolicy::StrainLimits(StrainLimits::default());
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("\"kind\":\"StrainLimits\""));
        let parsed: ClassificationPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, policy);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(FailureMode::NoFailure.label(), "No Failure");
        assert_eq!(FailureMode::TensionControlled.code(), "TENSION_CONTROLLED");
        let json = serde_json::to_string(&FailureMode::CompressionControlled).unwrap();
        assert_eq!(json, "\"COMPRESSION_CONTROLLED\"");
    }
}
