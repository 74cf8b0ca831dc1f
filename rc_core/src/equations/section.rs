//! # Cross-Section Property Formulas
//!
//! Geometric properties of the rectangular concrete section and of circular
//! reinforcing bars. All lengths in mm.
//!
//! ## Notation
//!
//! - `b` = Width of section
//! - `h` = Overall depth of section
//! - `A` = Cross-sectional area
//! - `I` = Second moment of area about the centroidal axis
//! - `φ` = Bar diameter

use std::f64::consts::PI;

// =============================================================================
// RECTANGULAR SECTION PROPERTIES
// =============================================================================

/// Gross area of a rectangular section
///
/// ```text
///     ┌─────────┐
///     │         │
///   h │         │
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// A = b × h
///
/// # Example
/// ```rust
/// use rc_core::equations::section::rectangular_area;
///
/// let area = rectangular_area(300.0, 500.0);
/// assert_eq!(area, 150_000.0);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Second moment of area about the centroidal axis (strong axis)
///
/// # Formula
/// I = bh³/12
///
/// # Example
/// ```rust
/// use rc_core::equations::section::rectangular_moment_of_inertia;
///
/// // 300 x 500: I = 300 × 500³ / 12 = 3.125e9 mm⁴
/// let i = rectangular_moment_of_inertia(300.0, 500.0);
/// assert!((i - 3.125e9).abs() < 1.0);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, h: f64) -> f64 {
    b * h.powi(3) / 12.0
}

/// Depth of the centroid below the top fibre
#[inline]
pub fn rectangular_centroid(h: f64) -> f64 {
    h / 2.0
}

/// Effective depth d = h - cover
#[inline]
pub fn effective_depth(h: f64, cover: f64) -> f64 {
    h - cover
}

// =============================================================================
// REINFORCING BARS
// =============================================================================

/// Area of one circular bar
///
/// # Formula
/// A = π (φ/2)²
#[inline]
pub fn bar_area(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}

/// Area of a group of identical bars
///
/// # Example
/// ```rust
/// use rc_core::equations::section::bar_group_area;
///
/// // 4ø16 = 4 × π × 8² = 804.25 mm²
/// let area = bar_group_area(16.0, 4);
/// assert!((area - 804.25).abs() < 0.01);
/// ```
#[inline]
pub fn bar_group_area(diameter: f64, count: u32) -> f64 {
    f64::from(count) * bar_area(diameter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.01;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 0.001
    }

    #[test]
    fn test_rectangular_area() {
        let a = rectangular_area(300.0, 500.0);
        assert!(approx_eq(a, 150_000.0), "A = {} (expected 150000)", a);
    }

    #[test]
    fn test_rectangular_moment_of_inertia() {
        let i = rectangular_moment_of_inertia(300.0, 500.0);
        assert!(approx_eq(i, 3.125e9), "I = {} (expected 3.125e9)", i);
    }

    #[test]
    fn test_centroid_and_effective_depth() {
        assert_eq!(rectangular_centroid(500.0), 250.0);
        assert_eq!(effective_depth(500.0, 30.0), 470.0);
    }

    #[test]
    fn test_bar_areas() {
        // ø20 = 314.16 mm²
        assert!(approx_eq(bar_area(20.0), 314.16), "A = {}", bar_area(20.0));
        // 4ø16 = 804.25 mm²
        let a = bar_group_area(16.0, 4);
        assert!((a - 804.25).abs() < 0.01, "A = {} (expected 804.25)", a);
    }
}
