//! # Section Mechanics Equations
//!
//! The fundamental formulas used by the section calculations, kept in one place
//! so they can be checked against the code references independently of the
//! sweep that combines them.
//!
//! ## Modules
//!
//! - [`section`] - Rectangular section and bar geometry (A, I, centroid)
//! - [`constitutive`] - Concrete stress block and bilinear steel law
//! - [`strain`] - Normalized strain profile through the depth
//!
//! ## Sign Conventions
//!
//! - **Depths**: measured downward from the extreme compression (top) fibre
//! - **Axial force**: compression positive
//! - **Strain/stress**: compression positive, tension negative
//!
//! ## References
//!
//! - EN 1992-1-1:2004 Section 3.1.7 (stress block) and 3.2.7 (steel law)
//! - ACI 318-19 Section 22.2

pub mod constitutive;
pub mod section;
pub mod strain;

pub use constitutive::{
    concrete_block,
    steel_stress,
    ConcreteBlock,
    SteelLaw,
    StressBlock,
};

pub use section::{
    bar_area,
    bar_group_area,
    effective_depth,
    rectangular_area,
    rectangular_centroid,
    rectangular_moment_of_inertia,
};

pub use strain::strain_at;
