//! # Strain Profile
//!
//! Normalized strain at a depth below the top fibre for a given neutral axis
//! depth `x`:
//!
//! ```text
//!   ε(depth) = (x - depth) / x
//!
//!   depth = 0  -> ε = 1   (extreme compression fibre)
//!   depth = x  -> ε = 0   (neutral axis)
//!   depth > x  -> ε < 0   (tension side)
//! ```
//!
//! This is a proportional profile, not a plane-sections profile scaled by the
//! ultimate concrete strain. The steel stresses of the interaction sweep are
//! evaluated against it as-is.

use crate::errors::{require_finite, CalcError, CalcResult};

/// Normalized strain at `depth_mm` for neutral axis depth `x_mm`.
///
/// Fails with `UndefinedNeutralAxis` when `x_mm` is exactly zero.
///
/// # Example
/// ```rust
/// use rc_core::equations::strain::strain_at;
///
/// assert_eq!(strain_at(200.0, 0.0).unwrap(), 1.0);
/// assert_eq!(strain_at(200.0, 200.0).unwrap(), 0.0);
/// assert_eq!(strain_at(200.0, 400.0).unwrap(), -1.0);
/// assert!(strain_at(0.0, 50.0).is_err());
/// ```
pub fn strain_at(x_mm: f64, depth_mm: f64) -> CalcResult<f64> {
    if x_mm == 0.0 {
        return Err(CalcError::UndefinedNeutralAxis { x_mm });
    }
    require_finite("x_mm", x_mm)?;
    require_finite("depth_mm", depth_mm)?;
    Ok((x_mm - depth_mm) / x_mm)
}
