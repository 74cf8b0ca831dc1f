//! # P-M Interaction Diagram
//!
//! Sweeps the neutral axis depth `x` through a rectangular RC section and, at
//! each position, sums the concrete stress block and the bar group forces into
//! one (axial force, bending moment) point tagged with a failure mode.
//!
//! ## Assumptions
//!
//! - Rectangular section, single concrete and single steel grade
//! - Equivalent rectangular stress block (α = 0.85, γ = 0.8 by default)
//! - Bilinear steel law with εy = 0.002 by default
//! - Proportional strain profile ε = (x - depth) / x (see [`strain_at`])
//! - Concrete block moment is taken about the top fibre while bar moments are
//!   taken about mid-depth; both are summed into one total. This is a known
//!   approximation of the engine, not a plane-sections result.
//! - Each `x` is evaluated independently. The sweep is a parametric trace, not a
//!   capacity envelope solved for an applied axial load.
//!
//! ## Example
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
//! let points = generate(&layout, &section, &concrete, &steel, 100)?;
//! assert_eq!(points.len(), 100);
//! assert!(points.iter().all(|p| p.neutral_axis_depth_mm > 0.0 && p.neutral_axis_depth_mm < 500.0));
//! # Ok::<(), rc_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::constitutive::{SteelLaw, StressBlock};
use crate::equations::strain::strain_at;
use crate::errors::{CalcError, CalcResult};
use crate::failure_mode::{ClassificationPolicy, FailureMode};
use crate::materials::Material;
use crate::rebar::RebarLayout;
use crate::section::SectionGeometry;
use crate::units::{KilonewtonMeters, Kilonewtons, Megapascals, Millimeters, NewtonMillimeters, Newtons};

/// Default number of neutral axis positions
pub const DEFAULT_SAMPLES: usize = 100;

/// Distance kept between the sweep and the section faces (mm)
pub const SWEEP_OFFSET_MM: f64 = 10.0;

/// Input parameters for an interaction diagram.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1 300x500",
///   "section": { "width_mm": 300.0, "depth_mm": 500.0, "cover_mm": 30.0 },
///   "layout": [
///     { "diameter_mm": 16.0, "count": 4, "depth_mm": 50.0 },
///     { "diameter_mm": 20.0, "count": 4, "depth_mm": 450.0 }
///   ],
///   "concrete": { "name": "C30/37", "fck_mpa": 30.0, "code": "EUROCODE" },
///   "steel": { "name": "B500B", "fyk_mpa": 500.0, "code": "EUROCODE" },
///   "samples": 100,
///   "policy": { "kind": "Geometric", "threshold_mm": 30.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionInput {
    /// User label (e.g. "C-1", "Pier wall at grid B")
    pub label: String,

    /// Concrete section
    pub section: SectionGeometry,

    /// Reinforcement bar groups
    #[serde(default)]
    pub layout: RebarLayout,

    /// Concrete material (must carry fck)
    pub concrete: Material,

    /// Reinforcing steel (must carry fyk)
    pub steel: Material,

    /// Number of neutral axis positions. When absent the project setting
    /// applies, then [`DEFAULT_SAMPLES`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,

    /// Failure mode policy
    #[serde(default)]
    pub policy: ClassificationPolicy,

    /// Concrete stress block parameters
    #[serde(default)]
    pub stress_block: StressBlock,

    /// Steel stress-strain law
    #[serde(default)]
    pub steel_law: SteelLaw,
}

impl InteractionInput {
    /// Sweep settings carried by this input
    pub fn options(&self) -> SweepOptions {
        SweepOptions {
            samples: self.samples.unwrap_or(DEFAULT_SAMPLES),
            policy: self.policy,
            stress_block: self.stress_block,
            steel_law: self.steel_law,
        }
    }
}

/// Sweep resolution and the laws applied at every sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepOptions {
    pub samples: usize,
    pub policy: ClassificationPolicy,
    pub stress_block: StressBlock,
    pub steel_law: SteelLaw,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            samples: DEFAULT_SAMPLES,
            policy: ClassificationPolicy::default(),
            stress_block: StressBlock::default(),
            steel_law: SteelLaw::default(),
        }
    }
}

impl SweepOptions {
    /// Default laws with a custom sample count
    pub fn with_samples(samples: usize) -> Self {
        SweepOptions {
            samples,
            ..SweepOptions::default()
        }
    }

    /// Check the law and policy parameters before a sweep
    pub fn validate(&self) -> CalcResult<()> {
        self.stress_block.validate()?;
        self.steel_law.validate()?;
        self.policy.validate()
    }
}

/// One point of the interaction diagram.
///
/// Canonical units are N and N·mm; use [`axial_kn`](Self::axial_kn) and
/// [`moment_knm`](Self::moment_knm) for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionPoint {
    /// Neutral axis depth below the top fibre (mm)
    pub neutral_axis_depth_mm: f64,
    /// Axial force, compression positive (N)
    pub axial_force_n: f64,
    /// Bending moment (N·mm)
    pub bending_moment_nmm: f64,
    /// Governing failure mode
    pub failure_mode: FailureMode,
}

impl InteractionPoint {
    pub fn axial_kn(&self) -> Kilonewtons {
        Newtons(self.axial_force_n).into()
    }

    pub fn moment_knm(&self) -> KilonewtonMeters {
        NewtonMillimeters(self.bending_moment_nmm).into()
    }
}

/// Result of a diagram calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDiagram {
    /// Label of the input that produced this diagram
    pub label: String,
    /// Policy used to tag the points
    pub policy: ClassificationPolicy,
    /// Points in increasing neutral axis depth
    pub points: Vec<InteractionPoint>,
}

/// Count of points in one failure mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeCount {
    pub mode: FailureMode,
    pub count: usize,
}

/// Key figures of a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSummary {
    pub point_count: usize,
    /// Largest axial force over the diagram (kN)
    pub max_axial_kn: f64,
    /// Largest bending moment over the diagram (kNm)
    pub max_moment_knm: f64,
    /// Points per failure mode, in [`FailureMode::ALL`] order
    pub mode_counts: Vec<ModeCount>,
}

impl InteractionDiagram {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maxima and mode distribution. `None` for an empty diagram.
    pub fn summary(&self) -> Option<DiagramSummary> {
        if self.points.is_empty() {
            return None;
        }

        let max_axial_n = self
            .points
            .iter()
            .map(|p| p.axial_force_n)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_moment_nmm = self
            .points
            .iter()
            .map(|p| p.bending_moment_nmm)
            .fold(f64::NEG_INFINITY, f64::max);

        let mode_counts = FailureMode::ALL
            .iter()
            .map(|&mode| ModeCount {
                mode,
                count: self.points.iter().filter(|p| p.failure_mode == mode).count(),
            })
            .collect();

        Some(DiagramSummary {
            point_count: self.points.len(),
            max_axial_kn: Kilonewtons::from(Newtons(max_axial_n)).0,
            max_moment_knm: KilonewtonMeters::from(NewtonMillimeters(max_moment_nmm)).0,
            mode_counts,
        })
    }
}

/// Neutral axis positions for a sweep: `samples` evenly spaced depths strictly
/// inside (0, depth).
///
/// The sweep runs from 10 mm to depth - 10 mm. Sections shallower than 40 mm
/// use a quarter of the depth as the offset instead so both ends stay inside.
///
/// # Example
/// ```rust
/// use rc_core::calculations::interaction::neutral_axis_samples;
///
/// let xs = neutral_axis_samples(500.0, 5).unwrap();
/// assert_eq!(xs, vec![10.0, 130.0, 250.0, 370.0, 490.0]);
/// ```
pub fn neutral_axis_samples(depth_mm: f64, samples: usize) -> CalcResult<Vec<f64>> {
    if samples == 0 {
        return Err(CalcError::invalid_input(
            "samples",
            "0",
            "At least one neutral axis position is required",
        ));
    }
    if !(depth_mm.is_finite() && depth_mm > 0.0) {
        return Err(CalcError::invalid_input(
            "depth_mm",
            depth_mm.to_string(),
            "Section depth must be positive",
        ));
    }

    let offset = SWEEP_OFFSET_MM.min(depth_mm / 4.0);
    let start = offset;
    let end = depth_mm - offset;

    if samples == 1 {
        return Ok(vec![start]);
    }

    let step = (end - start) / (samples - 1) as f64;
    Ok((0..samples)
        .map(|i| if i == samples - 1 { end } else { start + step * i as f64 })
        .collect())
}

/// Representative depths of the compression-side and tension-side bars.
///
/// Bars above mid-depth count as compression side, the rest as tension side.
/// An empty side falls back to the top fibre (0) or the bottom fibre (h).
fn bar_side_depths(layout: &RebarLayout, section_depth_mm: f64) -> (f64, f64) {
    let mid = section_depth_mm / 2.0;
    let (top, bottom): (Vec<f64>, Vec<f64>) = layout
        .iter()
        .map(|g| g.depth_mm())
        .partition(|&depth| depth < mid);

    (mean_or(&top, 0.0), mean_or(&bottom, section_depth_mm))
}

fn mean_or(values: &[f64], fallback: f64) -> f64 {
    if values.is_empty() {
        fallback
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Generate the diagram with the default laws and the geometric policy.
pub fn generate(
    layout: &RebarLayout,
    section: &SectionGeometry,
    concrete: &Material,
    steel: &Material,
    samples: usize,
) -> CalcResult<Vec<InteractionPoint>> {
    generate_with(layout, section, concrete, steel, &SweepOptions::with_samples(samples))
}

/// Generate the diagram with explicit sweep options.
///
/// Output is ordered by increasing neutral axis depth and is a pure function of
/// the inputs.
pub fn generate_with(
    layout: &RebarLayout,
    section: &SectionGeometry,
    concrete: &Material,
    steel: &Material,
    options: &SweepOptions,
) -> CalcResult<Vec<InteractionPoint>> {
    options.validate()?;
    let fcd = concrete.require_fcd()?;
    let fyd = steel.require_fyd()?;
    layout.validate_within(section)?;

    let width = section.width_mm();
    let h = section.depth_mm();
    let xs = neutral_axis_samples(h, options.samples)?;
    let (top_depth, bottom_depth) = bar_side_depths(layout, h);

    tracing::debug!(
        width_mm = width,
        depth_mm = h,
        bar_groups = layout.len(),
        samples = options.samples,
        policy = options.policy.name(),
        "starting interaction sweep"
    );

    let points = xs
        .into_iter()
        .map(|x| {
            let block = options.stress_block.resultant(x, width, fcd);

            let mut steel_force = Newtons(0.0);
            let mut steel_moment = NewtonMillimeters(0.0);
            for group in layout {
                let strain = strain_at(x, group.depth_mm())?;
                let stress = Megapascals(options.steel_law.stress(strain, fyd));
                let force = stress * group.area_mm2();
                steel_force = steel_force + force;
                steel_moment = steel_moment + force * Millimeters(h / 2.0 - group.depth_mm());
            }

            let failure_mode = options.policy.classify_sample(x, h, top_depth, bottom_depth)?;

            Ok(InteractionPoint {
                neutral_axis_depth_mm: x,
                axial_force_n: block.force_n + steel_force.0,
                bending_moment_nmm: block.moment_nmm + steel_moment.0,
                failure_mode,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    tracing::debug!(points = points.len(), "interaction sweep complete");

    Ok(points)
}

/// Calculate the interaction diagram for an input record.
///
/// # Returns
///
/// * `Ok(InteractionDiagram)` - Points ordered by neutral axis depth
/// * `Err(CalcError)` - If a material lacks the needed strength, a bar lies
///   outside the section, a law or policy parameter is out of range, or the
///   sample count is zero
pub fn calculate(input: &InteractionInput) -> CalcResult<InteractionDiagram> {
    let options = input.options();
    let points = generate_with(
        &input.layout,
        &input.section,
        &input.concrete,
        &input.steel,
        &options,
    )?;

    Ok(InteractionDiagram {
        label: input.label.clone(),
        policy: options.policy,
        points,
    })
}
