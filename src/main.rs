// Quakescan CLI
// Runs detection over seismometer exports and persists the artifacts

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use quakescan::catalog::{
    calculate_sha256, store_report, write_events, CatalogRecord, CatalogWriter, DetectionReport,
    ReportParams, Workspace,
};
use quakescan::events::{AnchorRule, DetectorConfig};
use quakescan::pipeline::{run_detection, PipelineConfig};
use quakescan::profiles;
use quakescan::series::{effective_window, parse_series, SmootherConfig};

#[derive(Parser)]
#[command(name = "quakescan")]
#[command(about = "Seismic event detection for planetary seismometer data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect events in a seismometer CSV export
    Detect(DetectArgs),

    /// List the available dataset profiles
    Profiles,
}

#[derive(Args)]
struct DetectArgs {
    /// Input CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Dataset profile: mars or lunar
    #[arg(short, long, default_value = "mars")]
    profile: String,

    /// Workspace root for catalogs and reports
    #[arg(short, long, default_value = "out")]
    out: PathBuf,

    /// Smoothing window in samples (even values round up)
    #[arg(long, default_value = "10")]
    window: usize,

    /// Polynomial order of the smoothing fit
    #[arg(long, default_value = "2")]
    order: usize,

    /// Neighbor radius in seconds (defaults to the profile's radius)
    #[arg(long)]
    radius: Option<f64>,

    /// Cap on the event set size, anchor included
    #[arg(long, default_value = "4")]
    max_points: usize,

    /// Anchor rule: velocity_over_mean_slope or local_slope_over_mean_slope
    #[arg(long, default_value = "velocity_over_mean_slope")]
    anchor_rule: String,

    /// Skip writing catalog, CSV, and report artifacts
    #[arg(long)]
    no_artifacts: bool,
}

/// Error surface of the CLI
/// Any library error converts via Display, keeping command fns on `?`
#[derive(Debug)]
struct CliError {
    message: String,
}

impl<E: std::fmt::Display> From<E> for CliError {
    fn from(err: E) -> Self {
        CliError {
            message: err.to_string(),
        }
    }
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Detect(args) => run_detect(args),
        Commands::Profiles => {
            print_profiles();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err.message);
            eprintln!("error: {}", err.message);
            ExitCode::FAILURE
        }
    }
}

fn run_detect(args: DetectArgs) -> CliResult<()> {
    let profile = profiles::get_profile(&args.profile).ok_or_else(|| {
        CliError::from(format!(
            "Unknown dataset profile: {} (expected mars or lunar)",
            args.profile
        ))
    })?;
    let anchor_rule = AnchorRule::from_string(&args.anchor_rule).ok_or_else(|| {
        CliError::from(format!(
            "Unknown anchor rule: {} (expected velocity_over_mean_slope or local_slope_over_mean_slope)",
            args.anchor_rule
        ))
    })?;

    let bytes = fs::read(&args.input)?;
    log::info!("Read {} bytes from {}", bytes.len(), args.input.display());

    let series = parse_series(bytes.as_slice(), &profile)?;

    let smoother = SmootherConfig {
        window: args.window,
        order: args.order,
    };
    let detector = DetectorConfig {
        radius: args.radius.unwrap_or(profile.radius),
        max_points: args.max_points,
        anchor_rule,
    };
    let config = PipelineConfig {
        smoother: smoother.clone(),
        detector: Some(detector),
    };

    let outcome = run_detection(&series, &profile, &config)?;

    let source_name = args
        .input
        .file_name()
        .unwrap_or(args.input.as_os_str())
        .to_string_lossy()
        .into_owned();

    if outcome.events.is_empty() {
        println!("No event detected in {source_name}");
        return Ok(());
    }

    println!(
        "Detected an event with {} point(s) in {source_name}:",
        outcome.events.len()
    );
    for point in outcome.events.iter() {
        println!("  velocity {:>12.6} at t={:.3} s", point.velocity, point.time);
    }

    if args.no_artifacts {
        return Ok(());
    }

    let workspace = Workspace::create(&args.out)?;

    let writer = CatalogWriter::new(workspace.catalog_path(&profile.catalog_file));
    let records: Vec<CatalogRecord> = outcome
        .events
        .iter()
        .map(|point| CatalogRecord::new(source_name.clone(), point.time))
        .collect();
    writer.append_all(&records)?;

    write_events(
        &workspace.events_csv_path(),
        &outcome.events,
        profile.events_csv_mode,
    )?;

    let report = DetectionReport::new(
        profile.variant,
        source_name,
        calculate_sha256(&bytes),
        ReportParams {
            window: effective_window(smoother.window),
            order: smoother.order,
            radius: outcome.detector.radius,
            max_points: outcome.detector.max_points,
            anchor_rule: outcome.detector.anchor_rule,
        },
        outcome.events.clone(),
    );
    let report_path = store_report(&workspace, &report)?;

    println!("Catalog updated: {}", writer.path().display());
    println!("Events CSV written: {}", workspace.events_csv_path().display());
    println!("Report written: {}", report_path.display());

    Ok(())
}

fn print_profiles() {
    println!("Available dataset profiles:");
    for profile in profiles::list_profiles() {
        println!(
            "  {:<6} columns [{}, {}]  catalog {}  radius {}  events csv {:?}",
            profile.variant.as_str(),
            profile.time_column,
            profile.velocity_column,
            profile.catalog_file,
            profile.radius,
            profile.events_csv_mode
        );
    }
}
