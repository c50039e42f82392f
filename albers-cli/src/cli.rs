//! Définition et implémentation des commandes CLI
//!
//! - `inverse` : un point Albers → lat/lon
//! - `radius` : rayon géocentrique WGS84
//! - `convert` : fichier CSV ou GeoJSON → CSV ou GeoJSON

use std::path::{Path, PathBuf};
use std::time::Instant;

use albers::{geocentric_radius, inverse_batch, AlbersProjection, AlbersReprojector, ThetaMode};
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use tracing::{info, warn};

use crate::config::{Config, OutputFormat};
use crate::export::{self, ConvertedPoint};
use crate::input::{self, InputKind, InputPoint};
use crate::report::{ConversionReport, ConversionStatus};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one Albers point (meters) to latitude/longitude (degrees)
    Inverse {
        /// Albers x-coordinate in meters
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Albers y-coordinate in meters
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Use atan2 for θ (fixes the quadrant when ρ₀ - y <= 0)
        #[arg(long)]
        atan2: bool,
    },

    /// Distance from the WGS84 ellipsoid center to its surface at a latitude
    Radius {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },

    /// Convert a file of Albers points or geometries
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input file: CSV (`x,y` or `id,x,y`) or GeoJSON FeatureCollection
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (.csv or .geojson)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (défaut : extension du fichier, puis config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Use atan2 for θ
    #[arg(long)]
    pub atan2: bool,

    /// Decimal places for lat/lon in CSV output
    #[arg(long)]
    pub precision: Option<u8>,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Number of worker threads
    #[arg(long, alias = "threads")]
    pub jobs: Option<usize>,
}

fn theta_mode(atan2_flag: bool, config: &Config) -> ThetaMode {
    if atan2_flag {
        ThetaMode::Atan2
    } else {
        config.theta_mode()
    }
}

/// Exécute la commande inverse
pub fn cmd_inverse(x: f64, y: f64, atan2: bool, verbose: bool, config: &Config) -> Result<()> {
    let projection = AlbersProjection::usgs().with_theta_mode(theta_mode(atan2, config));
    let (lat, lon) = projection.inverse_point(x, y, verbose).to_tuple();
    println!("{},{}", lat, lon);
    Ok(())
}

/// Exécute la commande radius
pub fn cmd_radius(lat: f64) -> Result<()> {
    println!("{}", geocentric_radius(lat));
    Ok(())
}

/// Inverse une liste de points en parallèle
pub fn convert_points(projection: &AlbersProjection, points: Vec<InputPoint>) -> Vec<ConvertedPoint> {
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let inversions = inverse_batch(projection, &coords);

    points
        .into_iter()
        .zip(inversions)
        .map(|(point, inversion)| ConvertedPoint {
            id: point.id,
            x: point.x,
            y: point.y,
            inversion,
        })
        .collect()
}

/// Exécute la commande convert
pub fn cmd_convert(args: &ConvertArgs, config: &Config) -> Result<ConversionReport> {
    if let Some(jobs) = args.jobs.or(config.jobs) {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            warn!("Failed to configure thread pool: {}", e);
        }
    }

    let start = Instant::now();
    let theta = theta_mode(args.atan2, config);
    let precision = args.precision.unwrap_or(config.precision);
    let format = args
        .format
        .or_else(|| OutputFormat::from_path(&args.output))
        .unwrap_or(config.format);

    let report = match InputKind::from_path(&args.input) {
        InputKind::Csv => {
            let points = input::read_csv(&args.input)?;
            info!(points = points.len(), "Converting points");

            let converted = convert_points(&AlbersProjection::usgs().with_theta_mode(theta), points);
            write_points(&converted, &args.output, format, precision)?;

            ConversionReport::from_inversions(
                &args.input,
                &args.output,
                converted.iter().map(|p| &p.inversion),
                start.elapsed(),
            )
        }
        InputKind::GeoJson => {
            if format != OutputFormat::Geojson {
                bail!("GeoJSON input can only be written as GeoJSON");
            }
            let collection = input::read_geojson(&args.input)?;
            let total = collection.features.len();
            info!(features = total, "Reprojecting features");

            let (collection, failures) = export::geojson::reproject_collection(
                &AlbersReprojector::with_theta_mode(theta),
                collection,
            );
            export::geojson::export_to_geojson(&collection, &args.output)?;

            ConversionReport::from_counts(
                &args.input,
                &args.output,
                total,
                failures,
                start.elapsed(),
            )
        }
    };

    if report.status != ConversionStatus::Success {
        warn!(
            "{} of {} entries not converted",
            report.diverged, report.total
        );
    }
    if let Some(path) = &args.report {
        report.save_json(path)?;
    }

    println!("{}", report.summary());
    Ok(report)
}

fn write_points(
    points: &[ConvertedPoint],
    output: &Path,
    format: OutputFormat,
    precision: u8,
) -> Result<()> {
    match format {
        OutputFormat::Csv => export::csv::export_to_csv(points, output, precision),
        OutputFormat::Geojson => export::geojson::export_to_geojson(
            &export::geojson::points_to_collection(points),
            output,
        ),
    }
}
