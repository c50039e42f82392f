//! Export des points convertis

pub mod csv;
pub mod geojson;

use albers::Inversion;

/// Point converti, prêt à l'export
#[derive(Debug, Clone)]
pub struct ConvertedPoint {
    pub id: String,
    /// Coordonnées Albers d'origine (mètres)
    pub x: f64,
    pub y: f64,
    pub inversion: Inversion,
}
