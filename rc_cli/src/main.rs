//! # RC Section CLI
//!
//! Computes P-M interaction diagrams from command-line flags or from the
//! items of a `.rcp` project file.
//!
//! ```text
//! rc_cli --width-mm 300 --depth-mm 500 --cover-mm 30 --fck 30 --fyk 500 \
//!        --bar 16,4,50 --bar 20,4,450 --samples 20 --save-csv c1.csv
//! rc_cli --project columns.rcp --json
//! ```
//!
//! Tables and JSON go to stdout; logs go to stderr (filter with `RUST_LOG`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rc_core::calculations::{
    self, check_load, CalculationItem, InteractionDiagram, InteractionInput, LoadCheckResult,
};
use rc_core::failure_mode::{ClassificationPolicy, GeometricThreshold, StrainLimits};
use rc_core::file_io::{self, SummaryReport};
use rc_core::materials::{DesignCode, Material};
use rc_core::project::Project;
use rc_core::rebar::{RebarGroupSpec, RebarLayout};
use rc_core::section::SectionGeometry;

#[derive(Parser, Debug)]
#[command(name = "rc_cli")]
#[command(version)]
#[command(about = "P-M interaction diagrams for rectangular reinforced concrete sections")]
struct Cli {
    /// Project file (.rcp) whose items are calculated instead of the flags below
    #[arg(long, conflicts_with_all = ["width_mm", "depth_mm", "fck", "fyk", "bars"])]
    project: Option<PathBuf>,

    /// Only calculate project items with this label
    #[arg(long, requires = "project")]
    item: Option<String>,

    /// Label for a section given by flags
    #[arg(long, default_value = "Section")]
    label: String,

    /// Design code selecting the safety factors (EUROCODE, ACI)
    #[arg(long, default_value = "EUROCODE")]
    code: DesignCode,

    /// Section width (mm)
    #[arg(long, required_unless_present = "project")]
    width_mm: Option<f64>,

    /// Section depth (mm)
    #[arg(long, required_unless_present = "project")]
    depth_mm: Option<f64>,

    /// Concrete cover (mm)
    #[arg(long)]
    cover_mm: Option<f64>,

    /// Characteristic concrete strength fck (MPa)
    #[arg(long, required_unless_present = "project")]
    fck: Option<f64>,

    /// Characteristic steel yield strength fyk (MPa)
    #[arg(long, required_unless_present = "project")]
    fyk: Option<f64>,

    /// Bar group as diameter_mm,count,depth_mm (repeatable)
    #[arg(long = "bar", value_parser = parse_bar)]
    bars: Vec<RebarGroupSpec>,

    /// Number of neutral axis positions
    #[arg(long)]
    samples: Option<usize>,

    /// Failure mode policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Geometric)]
    policy: PolicyArg,

    /// Write the diagram points to CSV
    #[arg(long)]
    save_csv: Option<PathBuf>,

    /// Write a JSON summary of the results
    #[arg(long)]
    save_summary: Option<PathBuf>,

    /// Store the section given by flags in a new project file
    #[arg(long, conflicts_with = "project")]
    save_project: Option<PathBuf>,

    /// Print the diagram(s) as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Neutral axis position against the bar depths (legacy heuristic)
    Geometric,
    /// Extreme fibre strains against εcu / εsu
    Strain,
}

impl From<PolicyArg> for ClassificationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Geometric => ClassificationPolicy::Geometric(GeometricThreshold::default()),
            PolicyArg::Strain => ClassificationPolicy::StrainLimits(StrainLimits::default()),
        }
    }
}

/// Parse `diameter_mm,count,depth_mm`, e.g. `16,4,50`.
fn parse_bar(s: &str) -> Result<RebarGroupSpec, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected diameter,count,depth but got '{}'", s));
    }

    let diameter_mm = parts[0]
        .parse::<f64>()
        .map_err(|e| format!("invalid diameter '{}': {}", parts[0], e))?;
    let count = parts[1]
        .parse::<u32>()
        .map_err(|e| format!("invalid count '{}': {}", parts[1], e))?;
    let depth_mm = parts[2]
        .parse::<f64>()
        .map_err(|e| format!("invalid depth '{}': {}", parts[2], e))?;

    Ok(RebarGroupSpec {
        diameter_mm,
        count,
        depth_mm,
    })
}

/// Initialize tracing with output to stderr so stdout stays clean for results
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "rc_cli=info,rc_core=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build an input record from the direct flags
fn input_from_flags(cli: &Cli) -> anyhow::Result<InteractionInput> {
    let (Some(width_mm), Some(depth_mm), Some(fck), Some(fyk)) =
        (cli.width_mm, cli.depth_mm, cli.fck, cli.fyk)
    else {
        bail!("--width-mm, --depth-mm, --fck and --fyk are required without --project");
    };

    let section = SectionGeometry::new(width_mm, depth_mm, cli.cover_mm).context("invalid section")?;
    let layout = RebarLayout::from_groups(&cli.bars).context("invalid bar group")?;
    let concrete = Material::concrete(format!("fck={}", fck), fck, cli.code).context("invalid concrete")?;
    let steel = Material::steel(format!("fyk={}", fyk), fyk, cli.code).context("invalid steel")?;

    Ok(InteractionInput {
        label: cli.label.clone(),
        section,
        layout,
        concrete,
        steel,
        samples: cli.samples,
        policy: cli.policy.into(),
        stress_block: Default::default(),
        steel_law: Default::default(),
    })
}

/// Load check result tagged with its item label
#[derive(Debug, Serialize)]
struct LoadCheckOutput {
    label: String,
    #[serde(flatten)]
    result: LoadCheckResult,
}

/// Everything `--project --json` prints, as one document
#[derive(Debug, Default, Serialize)]
struct ProjectOutput {
    diagrams: Vec<InteractionDiagram>,
    load_checks: Vec<LoadCheckOutput>,
}

/// Output path for one of several diagrams: `out.csv` -> `out_C-1.csv`
fn per_item_path(base: &Path, label: &str, many: bool) -> PathBuf {
    if !many {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let mut name = format!("{}_{}", stem, slug);
    if let Some(ext) = base.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    base.with_file_name(name)
}

fn print_table(input: &InteractionInput, diagram: &InteractionDiagram) {
    println!("═══════════════════════════════════════════════════════════");
    println!("  {}", input.label);
    println!("═══════════════════════════════════════════════════════════");
    println!("  {}", input.section);
    println!("  Concrete: {}", input.concrete.display_name());
    println!("  Steel:    {}", input.steel.display_name());
    println!("  {}", input.layout);
    println!("  Policy:   {}", diagram.policy.name());
    println!();
    println!("  {:>10}  {:>12}  {:>12}  {}", "x [mm]", "N [kN]", "M [kNm]", "Mode");
    for point in &diagram.points {
        println!(
            "  {:>10.1}  {:>12.1}  {:>12.1}  {}",
            point.neutral_axis_depth_mm,
            point.axial_kn().0,
            point.moment_knm().0,
            point.failure_mode
        );
    }

    if let Some(summary) = diagram.summary() {
        println!();
        println!("  Points:    {}", summary.point_count);
        println!("  Max N:     {:.1} kN", summary.max_axial_kn);
        println!("  Max M:     {:.1} kNm", summary.max_moment_knm);
        for entry in summary.mode_counts.iter().filter(|c| c.count > 0) {
            println!("  {:<24} {}", entry.mode.label(), entry.count);
        }
    }
    println!();
}

/// Calculate one input and write the requested outputs
fn run_interaction(
    cli: &Cli,
    input: &InteractionInput,
    many: bool,
) -> anyhow::Result<InteractionDiagram> {
    let diagram = calculations::calculate(input)
        .with_context(|| format!("calculation failed for '{}'", input.label))?;
    tracing::info!(label = %input.label, points = diagram.len(), "diagram calculated");

    if let Some(base) = &cli.save_csv {
        let path = per_item_path(base, &input.label, many);
        file_io::export_csv(&diagram, &path)
            .with_context(|| format!("could not write {}", path.display()))?;
    }

    if let Some(base) = &cli.save_summary {
        let path = per_item_path(base, &input.label, many);
        file_io::save_summary(&SummaryReport::new(input, &diagram), &path)
            .with_context(|| format!("could not write {}", path.display()))?;
    }

    if !cli.json {
        print_table(input, &diagram);
    }

    Ok(diagram)
}

fn run_project(cli: &Cli, path: &Path) -> anyhow::Result<()> {
    let project = file_io::load_project(path)
        .with_context(|| format!("could not load project {}", path.display()))?;

    let mut items: Vec<&CalculationItem> = project
        .items
        .values()
        .filter(|item| cli.item.as_deref().map_or(true, |label| item.label() == label))
        .collect();
    items.sort_by(|a, b| a.label().cmp(b.label()));

    if items.is_empty() {
        bail!("no matching items in {}", path.display());
    }

    let interaction_count = items
        .iter()
        .filter(|item| matches!(item, CalculationItem::Interaction(_)))
        .count();
    let many = interaction_count > 1;

    let mut output = ProjectOutput::default();
    for item in items {
        match item {
            CalculationItem::Interaction(input) => {
                let mut input = project.with_defaults(input);
                if cli.samples.is_some() {
                    input.samples = cli.samples;
                }
                output.diagrams.push(run_interaction(cli, &input, many)?);
            }
            CalculationItem::LoadCheck(input) => {
                let result = check_load(input)
                    .with_context(|| format!("load check failed for '{}'", input.label))?;
                if cli.json {
                    output.load_checks.push(LoadCheckOutput {
                        label: input.label.clone(),
                        result,
                    });
                } else {
                    println!(
                        "{}: {} | {} | governed by {}",
                        input.label,
                        if result.is_safe { "OK" } else { "NOT OK" },
                        result.failure_mode,
                        result.governing_condition()
                    );
                }
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn run_flags(cli: &Cli) -> anyhow::Result<()> {
    let input = input_from_flags(cli)?;

    if let Some(path) = &cli.save_project {
        let mut project = Project::default();
        project.settings.samples = input.options().samples;
        project.add_item(CalculationItem::Interaction(input.clone()));
        file_io::save_project(&project, path)
            .with_context(|| format!("could not save project {}", path.display()))?;
    }

    let diagram = run_interaction(cli, &input, false)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&diagram)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.project {
        Some(path) => run_project(&cli, path),
        None => run_flags(&cli),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bar() {
        let bar = parse_bar("16,4,50").unwrap();
        assert_eq!(bar.diameter_mm, 16.0);
        assert_eq!(bar.count, 4);
        assert_eq!(bar.depth_mm, 50.0);

        assert!(parse_bar(" 20 , 2 , 450.5 ").is_ok());
        assert!(parse_bar("16,4").is_err());
        assert!(parse_bar("16,four,50").is_err());
        assert!(parse_bar("16,-4,50").is_err());
    }

    #[test]
    fn test_per_item_path() {
        let base = Path::new("/tmp/out.csv");
        assert_eq!(per_item_path(base, "C-1", false), Path::new("/tmp/out.csv"));
        assert_eq!(per_item_path(base, "C-1 grid B", true), Path::new("/tmp/out_C-1_grid_B.csv"));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "rc_cli", "--width-mm", "300", "--depth-mm", "500", "--fck", "30", "--fyk", "500",
            "--bar", "16,4,50", "--bar", "20,4,450", "--code", "aci", "--policy", "strain",
            "--samples", "12",
        ])
        .unwrap();

        let input = input_from_flags(&cli).unwrap();
        assert_eq!(input.layout.len(), 2);
        assert_eq!(input.samples, Some(12));
        assert_eq!(input.concrete.code(), DesignCode::Aci);
        assert_eq!(input.policy.name(), "strain");
    }

    #[test]
    fn test_cli_flags_leave_samples_unset() {
        let cli = Cli::try_parse_from([
            "rc_cli", "--width-mm", "300", "--depth-mm", "500", "--fck", "30", "--fyk", "500",
        ])
        .unwrap();

        let input = input_from_flags(&cli).unwrap();
        assert_eq!(input.samples, None);
        assert_eq!(input.options().samples, calculations::interaction::DEFAULT_SAMPLES);
    }

    #[test]
    fn test_project_json_is_one_document() {
        let cli = Cli::try_parse_from([
            "rc_cli", "--width-mm", "300", "--depth-mm", "500", "--fck", "30", "--fyk", "500",
            "--bar", "20,4,450", "--samples", "5",
        ])
        .unwrap();
        let diagram = calculations::calculate(&input_from_flags(&cli).unwrap()).unwrap();

        let check: calculations::LoadCheckInput = serde_json::from_str(
            r#"{
                "label": "LC-1",
                "applied_axial_n": 500000.0,
                "applied_moment_nmm": 80000000.0,
                "resisting_axial_n": 1000000.0,
                "resisting_moment_nmm": 100000000.0,
                "strain_top": 0.002,
                "strain_bottom": 0.001,
                "neutral_axis_depth_mm": 200.0,
                "section_depth_mm": 500.0
            }"#,
        )
        .unwrap();
        let output = ProjectOutput {
            diagrams: vec![diagram],
            load_checks: vec![LoadCheckOutput {
                label: check.label.clone(),
                result: check_load(&check).unwrap(),
            }],
        };

        let json = serde_json::to_string_pretty(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["diagrams"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["diagrams"][0]["points"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["load_checks"][0]["label"], "LC-1");
        assert_eq!(value["load_checks"][0]["is_safe"], true);
    }

    #[test]
    fn test_cli_requires_section_without_project() {
        assert!(Cli::try_parse_from(["rc_cli", "--fck", "30"]).is_err());
        assert!(Cli::try_parse_from(["rc_cli", "--project", "a.rcp"]).is_ok());
    }
}
