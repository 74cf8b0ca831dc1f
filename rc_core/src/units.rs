//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the section engine. These are
//! plain f64 newtypes that serialize as bare numbers.
//!
//! ## Canonical Units
//!
//! The engine computes in a single consistent set so no conversion is needed
//! inside the core:
//! - Length: millimetres (mm)
//! - Stress: megapascals (MPa = N/mm²)
//! - Force: newtons (N)
//! - Moment: newton-millimetres (N·mm)
//!
//! Reporting units (kN, kNm) are produced only at the export boundary.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::units::{Newtons, Kilonewtons, NewtonMillimeters, KilonewtonMeters};
//!
//! let force: Kilonewtons = Newtons(1_020_000.0).into();
//! assert_eq!(force.0, 1020.0);
//!
//! let moment: KilonewtonMeters = NewtonMillimeters(102_000_000.0).into();
//! assert_eq!(moment.0, 102.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMillimeters> for KilonewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KilonewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Stress times area gives force: MPa × mm² = N
impl Mul<f64> for Megapascals {
    type Output = Newtons;
    fn mul(self, area_mm2: f64) -> Newtons {
        Newtons(self.0 * area_mm2)
    }
}

/// Force times lever arm gives moment: N × mm = N·mm
impl Mul<Millimeters> for Newtons {
    type Output = NewtonMillimeters;
    fn mul(self, arm: Millimeters) -> NewtonMillimeters {
        NewtonMillimeters(self.0 * arm.0)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

// Forces and moments accumulate over bar groups
macro_rules! impl_add {
    ($($t:ident),*) => {
        $(
            impl Add for $t {
                type Output = $t;
                fn add(self, rhs: $t) -> $t {
                    $t(self.0 + rhs.0)
                }
            }
        )*
    };
}

impl_add!(Newtons, NewtonMillimeters);
