//! Lecture des points Albers en entrée (CSV `x,y` ou `id,x,y`)

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Point Albers à convertir
#[derive(Debug, Clone, PartialEq)]
pub struct InputPoint {
    /// Identifiant (colonne `id` ou numéro de ligne)
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Type de fichier d'entrée
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    GeoJson,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("geojson") | Some("json") => Self::GeoJson,
            _ => Self::Csv,
        }
    }
}

fn parse_f64(field: &str) -> Option<f64> {
    fast_float::parse::<f64, _>(field.trim()).ok()
}

/// Parse un contenu CSV
///
/// Lignes vides et commentaires `#` ignorés. La première ligne n'est prise pour
/// un en-tête que si aucun de ses champs n'est numérique.
pub fn parse_csv(content: &str) -> Result<Vec<InputPoint>> {
    let mut points = Vec::new();
    let mut first_row = true;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        let parsed = match fields.as_slice() {
            [x, y] => parse_f64(x)
                .zip(parse_f64(y))
                .map(|(x, y)| (line_no.to_string(), x, y)),
            [id, x, y] => parse_f64(x)
                .zip(parse_f64(y))
                .map(|(x, y)| (id.trim().to_string(), x, y)),
            _ => bail!(
                "Line {}: expected 2 or 3 comma-separated fields, got {}",
                line_no,
                fields.len()
            ),
        };

        match parsed {
            Some((id, x, y)) => points.push(InputPoint { id, x, y }),
            None if first_row && fields.iter().all(|f| parse_f64(f).is_none()) => {}
            None => bail!("Line {}: invalid coordinates: {}", line_no, line),
        }
        first_row = false;
    }

    Ok(points)
}

/// Lit un fichier CSV de points
pub fn read_csv(path: &Path) -> Result<Vec<InputPoint>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read input file: {}", path.display()))?;
    parse_csv(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Lit une FeatureCollection GeoJSON (coordonnées Albers)
pub fn read_geojson(path: &Path) -> Result<geojson::FeatureCollection> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read input file: {}", path.display()))?;
    let geojson: geojson::GeoJson = content
        .parse()
        .with_context(|| format!("Invalid GeoJSON in {}", path.display()))?;
    geojson::FeatureCollection::try_from(geojson)
        .with_context(|| format!("{} is not a FeatureCollection", path.display()))
}
