//! # rc_core - Reinforced Concrete Section Engine
//!
//! `rc_core` computes axial force / bending moment (P-M) interaction diagrams
//! for rectangular reinforced-concrete sections. All inputs and outputs are
//! JSON-serializable so the engine can sit behind a CLI, a form, or a script.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Validated at construction**: Materials, sections, and bar groups cannot
//!   exist in an invalid state
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use rc_core::calculations::interaction::generate;
//! use rc_core::materials::{DesignCode, Material};
//! use rc_core::rebar::RebarLayout;
//! use rc_core::section::SectionGeometry;
//!
//! let concrete = Material::concrete("C30/37", 30.0, DesignCode::Eurocode)?;
//! let steel = Material::steel("B500B", 500.0, DesignCode::Eurocode)?;
//! let section = SectionGeometry::new(300.0, 500.0, Some(30.0))?;
//! let layout = RebarLayout::builder()
//!     .add_group(16.0, 4, 50.0)?
//!     .add_group(20.0, 4, 450.0)?
//!     .build();
//!
//! let points = generate(&layout, &section, &concrete, &steel, 50)?;
//! assert_eq!(points.len(), 50);
//! # Ok::<(), rc_core::errors::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Concrete/steel materials and design code safety factors
//! - [`section`] - Rectangular section geometry
//! - [`rebar`] - Bar groups and layouts
//! - [`equations`] - Section formulas, constitutive laws, strain profile
//! - [`failure_mode`] - Failure mode classification policies
//! - [`calculations`] - Interaction diagram and load check
//! - [`project`] - Project container, metadata, and settings
//! - [`file_io`] - Project files and diagram exports with atomic saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod failure_mode;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod rebar;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, InteractionDiagram, InteractionInput, InteractionPoint};
pub use errors::{CalcError, CalcResult};
pub use failure_mode::{ClassificationPolicy, FailureMode};
pub use file_io::{load_project, save_project};
pub use materials::{DesignCode, Material};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use rebar::{RebarGroup, RebarLayout};
pub use section::SectionGeometry;
