//! # Constitutive Laws
//!
//! Material stress laws used by the section sweep:
//!
//! - Concrete: equivalent rectangular stress block
//! - Reinforcing steel: bilinear elastic / perfectly-plastic law
//!
//! ## Sign Conventions
//!
//! - **Force**: compression positive (N)
//! - **Strain/stress**: positive on the compression side of the neutral axis
//! - **Concrete block moment**: taken about the extreme compression fibre
//!
//! Units are mm and MPa throughout, so stress × area is N directly.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};

/// Default stress reduction factor α (EN 1992-1-1 3.1.7)
pub const DEFAULT_ALPHA: f64 = 0.85;

/// Default block depth ratio (λ in EN 1992-1-1, γ here)
pub const DEFAULT_GAMMA: f64 = 0.8;

/// Lever arm of the block resultant as a fraction of x, from the top fibre
pub const BLOCK_CENTROID_RATIO: f64 = 0.4;

/// Default steel yield strain
pub const DEFAULT_YIELD_STRAIN: f64 = 0.002;

// =============================================================================
// CONCRETE STRESS BLOCK
// =============================================================================

/// Equivalent rectangular stress block parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressBlock {
    /// Stress reduction factor applied to fcd
    pub alpha: f64,
    /// Block depth as a fraction of the neutral axis depth
    pub gamma: f64,
}

impl Default for StressBlock {
    fn default() -> Self {
        StressBlock {
            alpha: DEFAULT_ALPHA,
            gamma: DEFAULT_GAMMA,
        }
    }
}

/// Resultant of the concrete compression zone
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcreteBlock {
    /// Compressive force (N)
    pub force_n: f64,
    /// Moment about the extreme compression fibre (N·mm)
    pub moment_nmm: f64,
}

impl StressBlock {
    /// α and γ must be finite and positive.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("stress_block.alpha", self.alpha)?;
        require_positive("stress_block.gamma", self.gamma)?;
        Ok(())
    }

    /// Force and moment of the compression block for neutral axis depth `x_mm`.
    ///
    /// ```text
    ///   ┌─────────────┐ ─┬─ top fibre
    ///   │▓▓▓▓▓▓▓▓▓▓▓▓▓│  │ γx   stress = α·fcd
    ///   │─────────────│ ─┴─
    ///   │             │       resultant at 0.4x
    ///   │- - - - - - -│ ─── neutral axis (x)
    ///   └─────────────┘
    /// ```
    ///
    /// # Formula
    /// F = α·fcd · b · γx,  M = F · 0.4x
    ///
    /// Returns zero force and moment for `x_mm <= 0`.
    pub fn resultant(&self, x_mm: f64, width_mm: f64, fcd_mpa: f64) -> ConcreteBlock {
        if x_mm <= 0.0 {
            return ConcreteBlock::default();
        }

        let block_depth = self.gamma * x_mm;
        let stress = self.alpha * fcd_mpa;
        let force_n = stress * width_mm * block_depth;
        let moment_nmm = force_n * (x_mm * BLOCK_CENTROID_RATIO);

        ConcreteBlock { force_n, moment_nmm }
    }
}

/// Concrete block resultant with the default α = 0.85, γ = 0.8.
///
/// # Example
/// ```rust
/// use rc_core::equations::constitutive::concrete_block;
///
/// // 300 mm wide, fcd = 20 MPa, x = 250 mm
/// let block = concrete_block(250.0, 300.0, 20.0);
/// assert!((block.force_n - 1_020_000.0).abs() < 1e-6);
/// assert!((block.moment_nmm - 102_000_000.0).abs() < 1e-3);
/// ```
pub fn concrete_block(x_mm: f64, width_mm: f64, fcd_mpa: f64) -> ConcreteBlock {
    StressBlock::default().resultant(x_mm, width_mm, fcd_mpa)
}

// =============================================================================
// REINFORCING STEEL
// =============================================================================

/// Bilinear elastic / perfectly-plastic steel law
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelLaw {
    /// Strain at first yield
    pub yield_strain: f64,
}

impl Default for SteelLaw {
    fn default() -> Self {
        SteelLaw {
            yield_strain: DEFAULT_YIELD_STRAIN,
        }
    }
}

impl SteelLaw {
    /// The yield strain must be finite and positive.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("steel_law.yield_strain", self.yield_strain)
    }

    /// Stress (MPa) for a given strain, saturating at ±fyd.
    ///
    /// ```text
    ///  σ
    ///  fyd ┤      ┌──────────
    ///      │     /
    ///    ──┼────/──────────── ε
    ///      │   /  εy
    /// -fyd ┤──┘
    /// ```
    pub fn stress(&self, strain: f64, fyd_mpa: f64) -> f64 {
        if strain.abs() <= self.yield_strain {
            strain / self.yield_strain * fyd_mpa
        } else {
            sign(strain) * fyd_mpa
        }
    }
}

/// Steel stress with the default yield strain of 0.002.
///
/// # Example
/// ```rust
/// use rc_core::equations::constitutive::steel_stress;
///
/// let fyd = 500.0 / 1.15;
/// assert!((steel_stress(0.001, fyd) - fyd / 2.0).abs() < 1e-9);
/// assert_eq!(steel_stress(-0.005, fyd), -fyd);
/// ```
pub fn steel_stress(strain: f64, fyd_mpa: f64) -> f64 {
    SteelLaw::default().stress(strain, fyd_mpa)
}

/// sign(0) = 0, unlike `f64::signum`
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_block_reference_case() {
        // b = 300, fck = 30 -> fcd = 20, x = 250
        // block depth 200, stress 17, area 60000 -> F = 1020 kN, arm 100 -> M = 102 kNm
        let block = concrete_block(250.0, 300.0, 20.0);
        assert!((block.force_n - 1_020_000.0).abs() < 1e-6);
        assert!((block.moment_nmm - 102_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_concrete_block_nonpositive_x_is_zero() {
        for x in [0.0, -1.0, -250.0] {
            let block = concrete_block(x, 300.0, 20.0);
            assert_eq!(block.force_n, 0.0);
            assert_eq!(block.moment_nmm, 0.0);
        }
    }

    #[test]
    fn test_concrete_block_monotonic() {
        let mut prev = concrete_block(1.0, 300.0, 20.0);
        for i in 2..=500 {
            let block = concrete_block(i as f64, 300.0, 20.0);
            assert!(block.force_n > prev.force_n);
            assert!(block.moment_nmm > prev.moment_nmm);
            prev = block;
        }
    }

    #[test]
    fn test_custom_stress_block() {
        let block = StressBlock {
            alpha: 1.0,
            gamma: 1.0,
        }
        .resultant(100.0, 200.0, 10.0);
        assert!((block.force_n - 200_000.0).abs() < 1e-9);
        assert!((block.moment_nmm - 8_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_steel_stress_reference_case() {
        let fyd = 434.8;
        assert!((steel_stress(0.001, fyd) - 217.4).abs() < 1e-9);
        assert_eq!(steel_stress(0.005, fyd), 434.8);
        assert_eq!(steel_stress(-0.005, fyd), -434.8);
    }

    #[test]
    fn test_steel_stress_continuous_at_yield() {
        for fyd in [200.0, 434.78, 1000.0] {
            let law = SteelLaw::default();
            let at = law.stress(law.yield_strain, fyd);
            let above = law.stress(law.yield_strain + 1e-12, fyd);
            assert!((at - fyd).abs() < 1e-9);
            assert!((above - at).abs() < 1e-6);

            let at_neg = law.stress(-law.yield_strain, fyd);
            assert!((at_neg + fyd).abs() < 1e-9);
        }
    }

    #[test]
    fn test_steel_stress_saturates() {
        let fyd = 434.78;
        for strain in [0.0021, 0.01, 0.5, 1.0] {
            assert_eq!(steel_stress(strain, fyd), fyd);
            assert_eq!(steel_stress(-strain, fyd), -fyd);
        }
    }

    #[test]
    fn test_law_validation() {
        assert!(StressBlock::default().validate().is_ok());
        assert!(SteelLaw::default().validate().is_ok());

        let flat = StressBlock { alpha: 0.85, gamma: 0.0 };
        assert_eq!(flat.validate().unwrap_err().error_code(), "INVALID_INPUT");
        let nan = StressBlock { alpha: f64::NAN, gamma: 0.8 };
        assert!(nan.validate().is_err());

        let rigid = SteelLaw { yield_strain: 0.0 };
        assert_eq!(rigid.validate().unwrap_err().error_code(), "INVALID_INPUT");
        assert!(SteelLaw { yield_strain: -0.002 }.validate().is_err());
    }

    #[test]
    fn test_steel_stress_zero_strain() {
        assert_eq!(steel_stress(0.0, 434.78), 0.0);
        assert_eq!(sign(0.0), 0.0);
    }
}
