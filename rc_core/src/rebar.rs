//! # Reinforcement Layout
//!
//! Bar groups (n bars of one diameter at one depth) and the ordered layout
//! that collects them.
//!
//! A layout is assembled through [`RebarLayoutBuilder`] and is read-only once
//! built, so nothing can change it while a sweep is running.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::rebar::RebarLayout;
//!
//! let layout = RebarLayout::builder()
//!     .add_group(16.0, 4, 50.0)?   // top layer
//!     .add_group(20.0, 4, 450.0)?  // bottom layer
//!     .build();
//!
//! assert_eq!(layout.len(), 2);
//! assert!((layout.total_area_mm2() - 2060.88).abs() < 0.01);
//! # Ok::<(), rc_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section::bar_group_area;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::section::SectionGeometry;

/// Bar group descriptor as supplied by a caller.
///
/// ## JSON Example
///
/// ```json
/// { "diameter_mm": 16.0, "count": 4, "depth_mm": 50.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarGroupSpec {
    /// Bar diameter (mm)
    #[serde(alias = "diameter")]
    pub diameter_mm: f64,
    /// Number of bars
    pub count: u32,
    /// Depth of the bar centres below the top fibre (mm)
    #[serde(alias = "depth")]
    pub depth_mm: f64,
}

/// A validated group of identical bars at one depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RebarGroupSpec", into = "RebarGroupSpec")]
pub struct RebarGroup {
    diameter_mm: f64,
    count: u32,
    depth_mm: f64,
}

impl RebarGroup {
    /// Create a bar group; diameter, count, and depth must all be positive.
    pub fn new(diameter_mm: f64, count: u32, depth_mm: f64) -> CalcResult<Self> {
        require_positive("diameter_mm", diameter_mm)?;
        if count == 0 {
            return Err(CalcError::invalid_input(
                "count",
                "0",
                "Bar count must be a positive integer",
            ));
        }
        require_positive("depth_mm", depth_mm)?;

        Ok(RebarGroup {
            diameter_mm,
            count,
            depth_mm,
        })
    }

    pub fn diameter_mm(&self) -> f64 {
        self.diameter_mm
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn depth_mm(&self) -> f64 {
        self.depth_mm
    }

    /// Total steel area of the group, n·π(φ/2)² (mm²)
    pub fn area_mm2(&self) -> f64 {
        bar_group_area(self.diameter_mm, self.count)
    }
}

impl TryFrom<RebarGroupSpec> for RebarGroup {
    type Error = CalcError;

    fn try_from(spec: RebarGroupSpec) -> Result<Self, Self::Error> {
        RebarGroup::new(spec.diameter_mm, spec.count, spec.depth_mm)
    }
}

impl From<RebarGroup> for RebarGroupSpec {
    fn from(group: RebarGroup) -> Self {
        RebarGroupSpec {
            diameter_mm: group.diameter_mm,
            count: group.count,
            depth_mm: group.depth_mm,
        }
    }
}

impl std::fmt::Display for RebarGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ø{} @ {}mm", self.count, self.diameter_mm, self.depth_mm)
    }
}

/// Ordered, immutable collection of bar groups.
///
/// Serializes as a plain JSON array of groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RebarLayout {
    groups: Vec<RebarGroup>,
}

impl RebarLayout {
    /// Start building a layout
    pub fn builder() -> RebarLayoutBuilder {
        RebarLayoutBuilder::default()
    }

    /// Bulk-load from descriptors, failing on the first invalid group.
    ///
    /// The error names the offending group by index, e.g. `groups[1].count`.
    pub fn from_groups(specs: &[RebarGroupSpec]) -> CalcResult<Self> {
        let mut builder = RebarLayout::builder();
        for (index, spec) in specs.iter().enumerate() {
            let group = RebarGroup::try_from(*spec).map_err(|e| with_group_index(e, index))?;
            builder.push(group);
        }
        Ok(builder.build())
    }

    /// Groups in insertion order
    pub fn groups(&self) -> &[RebarGroup] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RebarGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Σ group areas (mm²)
    pub fn total_area_mm2(&self) -> f64 {
        self.groups.iter().map(RebarGroup::area_mm2).sum()
    }

    /// Check every bar lies within the section depth: 0 < depth ≤ h.
    pub fn validate_within(&self, section: &SectionGeometry) -> CalcResult<()> {
        let h = section.depth_mm();
        for (index, group) in self.groups.iter().enumerate() {
            if group.depth_mm > h {
                return Err(CalcError::invalid_input(
                    format!("groups[{}].depth_mm", index),
                    group.depth_mm.to_string(),
                    format!("Bar depth exceeds the section depth ({} mm)", h),
                ));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RebarLayout {
    type Item = &'a RebarGroup;
    type IntoIter = std::slice::Iter<'a, RebarGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl std::fmt::Display for RebarLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.groups.is_empty() {
            return write!(f, "No rebar groups defined");
        }
        write!(f, "Rebar Layout:")?;
        for group in &self.groups {
            write!(f, "\n  {}", group)?;
        }
        Ok(())
    }
}

/// Mutable build phase for a [`RebarLayout`]
#[derive(Debug, Clone, Default)]
pub struct RebarLayoutBuilder {
    groups: Vec<RebarGroup>,
}

impl RebarLayoutBuilder {
    /// Validate and append a group (builder pattern)
    pub fn add_group(mut self, diameter_mm: f64, count: u32, depth_mm: f64) -> CalcResult<Self> {
        self.groups.push(RebarGroup::new(diameter_mm, count, depth_mm)?);
        Ok(self)
    }

    /// Append an already-validated group
    pub fn push(&mut self, group: RebarGroup) -> &mut Self {
        self.groups.push(group);
        self
    }

    /// Freeze into an immutable layout
    pub fn build(self) -> RebarLayout {
        RebarLayout {
            groups: self.groups,
        }
    }
}

/// Prefix the field of a validation error with the group index
fn with_group_index(error: CalcError, index: usize) -> CalcError {
    match error {
        CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
            field: format!("groups[{}].{}", index, field),
            value,
            reason,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_area() {
        let group = RebarGroup::new(16.0, 4, 50.0).unwrap();
        assert!((group.area_mm2() - 804.25).abs() < 0.01);
    }

    #[test]
    fn test_invalid_groups() {
        assert!(RebarGroup::new(0.0, 4, 50.0).is_err());
        assert!(RebarGroup::new(16.0, 0, 50.0).is_err());
        assert!(RebarGroup::new(16.0, 4, 0.0).is_err());
        assert!(RebarGroup::new(16.0, 4, -10.0).is_err());
    }

    #[test]
    fn test_total_area_independent_of_order() {
        let a = RebarLayout::builder()
            .add_group(16.0, 4, 50.0)
            .and_then(|b| b.add_group(20.0, 4, 450.0))
            .and_then(|b| b.add_group(12.0, 2, 250.0))
            .unwrap()
            .build();
        let b = RebarLayout::builder()
            .add_group(12.0, 2, 250.0)
            .and_then(|b| b.add_group(20.0, 4, 450.0))
            .and_then(|b| b.add_group(16.0, 4, 50.0))
            .unwrap()
            .build();

        let expected: f64 = a.iter().map(RebarGroup::area_mm2).sum();
        assert!((a.total_area_mm2() - expected).abs() < 1e-9);
        assert!((a.total_area_mm2() - b.total_area_mm2()).abs() < 1e-9);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let layout = RebarLayout::builder()
            .add_group(20.0, 4, 450.0)
            .and_then(|b| b.add_group(16.0, 4, 50.0))
            .unwrap()
            .build();
        assert_eq!(layout.groups()[0].depth_mm(), 450.0);
        assert_eq!(layout.groups()[1].depth_mm(), 50.0);
    }

    #[test]
    fn test_from_groups_reports_index() {
        let specs = [
            RebarGroupSpec { diameter_mm: 16.0, count: 4, depth_mm: 50.0 },
            RebarGroupSpec { diameter_mm: 20.0, count: 0, depth_mm: 450.0 },
        ];
        let err = RebarLayout::from_groups(&specs).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "groups[1].count"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_within_section() {
        let section = SectionGeometry::new(300.0, 500.0, None).unwrap();
        let ok = RebarLayout::builder().add_group(16.0, 4, 500.0).unwrap().build();
        assert!(ok.validate_within(&section).is_ok());

        let bad = RebarLayout::builder().add_group(16.0, 4, 520.0).unwrap().build();
        assert!(bad.validate_within(&section).is_err());
    }

    #[test]
    fn test_display() {
        let layout = RebarLayout::builder().add_group(16.0, 4, 50.0).unwrap().build();
        assert_eq!(layout.to_string(), "Rebar Layout:\n  4ø16 @ 50mm");
        assert_eq!(RebarLayout::default().to_string(), "No rebar groups defined");
    }

    #[test]
    fn test_serialization() {
        let json = r#"[{ "diameter": 16.0, "count": 4, "depth": 50.0 }]"#;
        let layout: RebarLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.len(), 1);
        assert!((layout.total_area_mm2() - 804.25).abs() < 0.01);

        let bad = r#"[{ "diameter_mm": -16.0, "count": 4, "depth_mm": 50.0 }]"#;
        assert!(serde_json::from_str::<RebarLayout>(bad).is_err());
    }
}
