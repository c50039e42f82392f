//! Export GeoJSON (EPSG:4326, ordre lon/lat)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use albers::AlbersReprojector;
use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use rayon::prelude::*;
use tracing::warn;

use super::ConvertedPoint;

/// Construit une feature Point ; géométrie nulle si l'itération n'a pas convergé
pub fn point_feature(point: &ConvertedPoint) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("x".into(), JsonValue::from(point.x));
    properties.insert("y".into(), JsonValue::from(point.y));
    properties.insert(
        "iterations".into(),
        JsonValue::from(point.inversion.iterations()),
    );
    properties.insert(
        "converged".into(),
        JsonValue::from(point.inversion.is_converged()),
    );

    let geometry = point.inversion.is_converged().then(|| {
        let (lat, lon) = point.inversion.to_tuple();
        Geometry::new(Value::Point(vec![lon, lat]))
    });

    Feature {
        bbox: None,
        geometry,
        id: Some(geojson::feature::Id::String(point.id.clone())),
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn points_to_collection(points: &[ConvertedPoint]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: points.iter().map(point_feature).collect(),
        foreign_members: None,
    }
}

/// Reprojette une feature Albers ; en cas d'échec la géométrie devient nulle
/// et la propriété `error` décrit la cause
pub fn reproject_feature(reprojector: &AlbersReprojector, mut feature: Feature) -> (Feature, bool) {
    let Some(geometry) = feature.geometry.take() else {
        return (feature, true);
    };

    let result = geo::Geometry::<f64>::try_from(geometry.value)
        .map_err(|e| e.to_string())
        .and_then(|geom| {
            reprojector
                .transform_geometry(&geom)
                .map_err(|e| e.to_string())
        });

    match result {
        Ok(geom) => {
            feature.geometry = Some(Geometry::new(Value::from(&geom)));
            (feature, true)
        }
        Err(message) => {
            warn!(id = ?feature.id, %message, "Feature not reprojected");
            feature.set_property("error", message);
            (feature, false)
        }
    }
}

/// Reprojette une FeatureCollection en parallèle, retourne (collection, nombre d'échecs)
pub fn reproject_collection(
    reprojector: &AlbersReprojector,
    collection: FeatureCollection,
) -> (FeatureCollection, usize) {
    let results: Vec<(Feature, bool)> = collection
        .features
        .into_par_iter()
        .map(|feature| reproject_feature(reprojector, feature))
        .collect();

    let failures = results.iter().filter(|(_, ok)| !ok).count();
    let features = results.into_iter().map(|(feature, _)| feature).collect();

    (
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: collection.foreign_members,
        },
        failures,
    )
}

/// Écrit une FeatureCollection dans un fichier
pub fn export_to_geojson(collection: &FeatureCollection, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection).context("Failed to serialize GeoJSON")?;
    writer.flush()?;
    Ok(())
}
