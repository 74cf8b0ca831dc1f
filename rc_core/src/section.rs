//! # Section Geometry
//!
//! Rectangular reinforced-concrete cross-section. Depths are measured down
//! from the extreme compression fibre.
//!
//! ```text
//!   top fibre ┌───────────┐ ─┬─
//!             │  o  o  o  │  │
//!             │           │  │ depth (h)
//!             │  o  o  o  │  │
//!             └───────────┘ ─┴─
//!                 width (b)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rc_core::section::SectionGeometry;
//!
//! let section = SectionGeometry::new(300.0, 500.0, Some(30.0)).unwrap();
//! assert_eq!(section.effective_depth_mm(), Some(470.0));
//! assert_eq!(section.area_mm2(), 150_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section::{
    effective_depth, rectangular_area, rectangular_centroid, rectangular_moment_of_inertia,
};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};

/// Section descriptor as supplied by a caller.
///
/// ## JSON Example
///
/// ```json
/// { "width_mm": 300.0, "depth_mm": 500.0, "cover_mm": 30.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Section width b (mm)
    pub width_mm: f64,
    /// Overall section depth h (mm)
    pub depth_mm: f64,
    /// Concrete cover to reinforcement (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_mm: Option<f64>,
}

/// Validated, immutable rectangular section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionSpec", into = "SectionSpec")]
pub struct SectionGeometry {
    width_mm: f64,
    depth_mm: f64,
    cover_mm: Option<f64>,
}

impl SectionGeometry {
    /// Build a section, rejecting non-positive dimensions and covers outside [0, depth).
    pub fn new(width_mm: f64, depth_mm: f64, cover_mm: Option<f64>) -> CalcResult<Self> {
        require_positive("width_mm", width_mm)?;
        require_positive("depth_mm", depth_mm)?;
        if let Some(cover) = cover_mm {
            require_finite("cover_mm", cover)?;
            if cover < 0.0 {
                return Err(CalcError::invalid_input(
                    "cover_mm",
                    cover.to_string(),
                    "Cover cannot be negative",
                ));
            }
            if cover >= depth_mm {
                return Err(CalcError::invalid_input(
                    "cover_mm",
                    cover.to_string(),
                    format!("Cover must be less than the section depth ({} mm)", depth_mm),
                ));
            }
        }

        Ok(SectionGeometry {
            width_mm,
            depth_mm,
            cover_mm,
        })
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn depth_mm(&self) -> f64 {
        self.depth_mm
    }

    pub fn cover_mm(&self) -> Option<f64> {
        self.cover_mm
    }

    /// d = h - cover, when a cover was given
    pub fn effective_depth_mm(&self) -> Option<f64> {
        self.cover_mm.map(|c| effective_depth(self.depth_mm, c))
    }

    /// Gross concrete area b·h (mm²)
    pub fn area_mm2(&self) -> f64 {
        rectangular_area(self.width_mm, self.depth_mm)
    }

    /// Centroid depth below the top fibre, h/2 (mm)
    pub fn centroid_mm(&self) -> f64 {
        rectangular_centroid(self.depth_mm)
    }

    /// Gross second moment of area b·h³/12 (mm⁴)
    pub fn inertia_mm4(&self) -> f64 {
        rectangular_moment_of_inertia(self.width_mm, self.depth_mm)
    }

    /// Report form with the derived properties
    pub fn summary(&self) -> SectionSummary {
        SectionSummary {
            width_mm: self.width_mm,
            depth_mm: self.depth_mm,
            cover_mm: self.cover_mm,
            effective_depth_mm: self.effective_depth_mm(),
            area_mm2: self.area_mm2(),
            centroid_mm: self.centroid_mm(),
            inertia_mm4: self.inertia_mm4(),
        }
    }
}

impl TryFrom<SectionSpec> for SectionGeometry {
    type Error = CalcError;

    fn try_from(spec: SectionSpec) -> Result<Self, Self::Error> {
        SectionGeometry::new(spec.width_mm, spec.depth_mm, spec.cover_mm)
    }
}

impl From<SectionGeometry> for SectionSpec {
    fn from(section: SectionGeometry) -> Self {
        SectionSpec {
            width_mm: section.width_mm,
            depth_mm: section.depth_mm,
            cover_mm: section.cover_mm,
        }
    }
}

impl std::fmt::Display for SectionGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Section: {}mm x {}mm", self.width_mm, self.depth_mm)?;
        if let (Some(cover), Some(d)) = (self.cover_mm, self.effective_depth_mm()) {
            write!(f, " | Cover: {}mm | d = {:.1}mm", cover, d)?;
        }
        Ok(())
    }
}

/// Section dimensions and derived properties for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub width_mm: f64,
    pub depth_mm: f64,
    pub cover_mm: Option<f64>,
    pub effective_depth_mm: Option<f64>,
    pub area_mm2: f64,
    pub centroid_mm: f64,
    pub inertia_mm4: f64,
}
