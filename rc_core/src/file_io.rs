//! # File I/O Module
//!
//! Handles project files and diagram exports with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//!
//! ## File Formats
//!
//! - `.rcp` projects: JSON [`Project`]
//! - Diagram CSV: `neutral_axis_mm,axial_kN,moment_kNm,failure_mode`
//! - Summary JSON: [`SummaryReport`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use rc_core::file_io::{load_project, save_project};
//! use rc_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("columns.rcp");
//!
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), rc_core::errors::CalcError>(())
//! ```

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{DiagramSummary, InteractionDiagram, InteractionInput};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialSummary;
use crate::project::{Project, SCHEMA_VERSION};
use crate::section::SectionSummary;

/// CSV header row for diagram exports
pub const CSV_HEADER: &str = "neutral_axis_mm,axial_kN,moment_kNm,failure_mode";

/// Temporary sibling path used during an atomic write, e.g. `a.rcp` -> `a.rcp.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write bytes to `path` atomically.
///
/// 1. Write to a temporary file next to `path`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn to_json_pretty<T: Serialize>(value: &T) -> CalcResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Save a project to a file with atomic write semantics.
///
/// # Example
///
/// ```rust,no_run
/// use rc_core::file_io::save_project;
/// use rc_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::new("Engineer", "25-001", "Client");
/// save_project(&project, Path::new("columns.rcp"))?;
/// # Ok::<(), rc_core::errors::CalcError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = to_json_pretty(project)?;
    write_atomic(path, json.as_bytes())?;

    tracing::info!(
        path = %path.display(),
        items = project.item_count(),
        "project saved"
    );
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON or invalid item data
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    tracing::info!(
        path = %path.display(),
        version = %project.meta.version,
        items = project.item_count(),
        "project loaded"
    );
    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

/// Render a diagram as CSV text, forces in kN and moments in kNm.
///
/// # Example
///
/// ```rust
/// use rc_core::calculations::{InteractionDiagram, InteractionPoint};
/// use rc_core::failure_mode::{ClassificationPolicy, FailureMode};
/// use rc_core::file_io::diagram_csv;
///
/// let diagram = InteractionDiagram {
///     label: "C-1".to_string(),
///     policy: ClassificationPolicy::default(),
///     points: vec![InteractionPoint {
///         neutral_axis_depth_mm: 250.0,
///         axial_force_n: 1_020_000.0,
///         bending_moment_nmm: 102.0e6,
///         failure_mode: FailureMode::NoFailure,
///     }],
/// };
///
/// let csv = diagram_csv(&diagram);
/// assert_eq!(
///     csv,
///     "neutral_axis_mm,axial_kN,moment_kNm,failure_mode\n250.000,1020.000,102.000,NO_FAILURE\n"
/// );
/// ```
pub fn diagram_csv(diagram: &InteractionDiagram) -> String {
    let mut out = String::with_capacity(48 * (diagram.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for point in &diagram.points {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{:.3},{:.3},{:.3},{}",
            point.neutral_axis_depth_mm,
            point.axial_kn().0,
            point.moment_knm().0,
            point.failure_mode.code()
        );
    }
    out
}

/// Write a diagram to a CSV file atomically.
pub fn export_csv(diagram: &InteractionDiagram, path: &Path) -> CalcResult<()> {
    write_atomic(path, diagram_csv(diagram).as_bytes())?;

    tracing::info!(path = %path.display(), points = diagram.len(), "diagram exported");
    Ok(())
}

/// Key results of one diagram calculation, for archiving next to the CSV.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "generated_at": "2026-01-15T09:30:00Z",
///   "concrete": { "name": "C30/37", "fck_mpa": 30.0, "fcd_mpa": 20.0, ... },
///   "steel": { "name": "B500B", "fyk_mpa": 500.0, "fyd_mpa": 434.78, ... },
///   "section": { "width_mm": 300.0, "depth_mm": 500.0, ... },
///   "policy": "geometric",
///   "diagram": { "point_count": 100, "max_axial_kn": 3251.6, "max_moment_knm": 180.2, ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub label: String,
    pub generated_at: DateTime<Utc>,
    pub concrete: MaterialSummary,
    pub steel: MaterialSummary,
    pub section: SectionSummary,
    /// Bar groups as "4ø16 @ 50mm"
    pub rebar: Vec<String>,
    pub total_steel_area_mm2: f64,
    /// Name of the failure mode policy
    pub policy: String,
    /// `None` when the diagram has no points
    pub diagram: Option<DiagramSummary>,
}

impl SummaryReport {
    /// Assemble a report from an input and the diagram it produced
    pub fn new(input: &InteractionInput, diagram: &InteractionDiagram) -> Self {
        SummaryReport {
            label: input.label.clone(),
            generated_at: Utc::now(),
            concrete: input.concrete.summary(),
            steel: input.steel.summary(),
            section: input.section.summary(),
            rebar: input.layout.iter().map(|g| g.to_string()).collect(),
            total_steel_area_mm2: input.layout.total_area_mm2(),
            policy: diagram.policy.name().to_string(),
            diagram: diagram.summary(),
        }
    }
}

/// Write a summary report as pretty JSON, atomically.
pub fn save_summary(report: &SummaryReport, path: &Path) -> CalcResult<()> {
    let json = to_json_pretty(report)?;
    write_atomic(path, json.as_bytes())?;

    tracing::info!(path = %path.display(), label = %report.label, "summary saved");
    Ok(())
}
