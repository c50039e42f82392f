//! # albers-cli
//!
//! Conversion de coordonnées Albers USGS (mètres) vers latitude/longitude.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Un point (exemple de Snyder, p. 103)
//! albers inverse --x 1885472.7 --y 1535925.0 -v
//!
//! # Rayon géocentrique WGS84 à 45°N
//! albers radius --lat 45
//!
//! # Fichier CSV ou GeoJSON
//! albers convert --input points.csv --output points.geojson --report report.json
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod input;
pub mod report;

pub use config::Config;
pub use report::{ConversionReport, ConversionStatus};
