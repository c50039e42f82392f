//! Reprojection de géométries `geo` depuis Albers vers lon/lat (degrés)

use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use rayon::prelude::*;

use crate::projection::{AlbersProjection, ThetaMode};
use crate::types::Inversion;
use crate::AlbersError;

/// Reprojection Albers → géographique
///
/// Les coordonnées de sortie suivent la convention `geo` : x = longitude, y = latitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlbersReprojector {
    projection: AlbersProjection,
}

impl AlbersReprojector {
    pub fn new(projection: AlbersProjection) -> Self {
        Self { projection }
    }

    pub fn with_theta_mode(theta_mode: ThetaMode) -> Self {
        Self::new(AlbersProjection::usgs().with_theta_mode(theta_mode))
    }

    /// Transforme un point (x, y) en (lon, lat)
    pub fn transform_point(&self, x: f64, y: f64) -> Result<(f64, f64), AlbersError> {
        let geo = self.projection.inverse_point(x, y, false).into_result()?;
        Ok((geo.lon, geo.lat))
    }

    fn transform_coord(&self, coord: Coord) -> Result<Coord, AlbersError> {
        let (x, y) = self.transform_point(coord.x, coord.y)?;
        Ok(Coord { x, y })
    }

    fn transform_linestring(&self, ls: &LineString) -> Result<LineString, AlbersError> {
        let coords = ls
            .coords()
            .map(|c| self.transform_coord(*c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LineString::new(coords))
    }

    fn transform_polygon(&self, poly: &Polygon) -> Result<Polygon, AlbersError> {
        let exterior = self.transform_linestring(poly.exterior())?;
        let interiors = poly
            .interiors()
            .iter()
            .map(|ring| self.transform_linestring(ring))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon::new(exterior, interiors))
    }

    /// Transforme une géométrie ; un sommet qui ne converge pas fait échouer l'ensemble
    pub fn transform_geometry(&self, geom: &Geometry) -> Result<Geometry, AlbersError> {
        match geom {
            Geometry::Point(p) => Ok(Geometry::Point(Point(self.transform_coord(p.0)?))),
            Geometry::LineString(ls) => Ok(Geometry::LineString(self.transform_linestring(ls)?)),
            Geometry::Polygon(poly) => Ok(Geometry::Polygon(self.transform_polygon(poly)?)),
            Geometry::MultiPoint(mp) => {
                let points = mp
                    .iter()
                    .map(|p| self.transform_coord(p.0).map(Point))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::MultiPoint(MultiPoint::new(points)))
            }
            Geometry::MultiLineString(mls) => {
                let lines = mls
                    .iter()
                    .map(|ls| self.transform_linestring(ls))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::MultiLineString(MultiLineString::new(lines)))
            }
            Geometry::MultiPolygon(mp) => {
                let polys = mp
                    .iter()
                    .map(|poly| self.transform_polygon(poly))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::MultiPolygon(MultiPolygon::new(polys)))
            }
            Geometry::GeometryCollection(_) => {
                Err(AlbersError::UnsupportedGeometry("GeometryCollection"))
            }
            Geometry::Line(_) => Err(AlbersError::UnsupportedGeometry("Line")),
            Geometry::Rect(_) => Err(AlbersError::UnsupportedGeometry("Rect")),
            Geometry::Triangle(_) => Err(AlbersError::UnsupportedGeometry("Triangle")),
        }
    }
}

/// Inverse un lot de points en parallèle, ordre conservé
///
/// Chaque élément est calculé indépendamment, le résultat est identique
/// à l'appel scalaire point par point.
pub fn inverse_batch(projection: &AlbersProjection, points: &[(f64, f64)]) -> Vec<Inversion> {
    points
        .par_iter()
        .map(|&(x, y)| projection.inverse_point(x, y, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    #[test]
    fn test_transform_point() {
        let reproj = AlbersReprojector::default();
        let (lon, lat) = reproj.transform_point(1885472.7, 1535925.0).unwrap();
        assert!((lon - (-75.0)).abs() < 1e-4, "lon={}", lon);
        assert!((lat - 35.0).abs() < 1e-4, "lat={}", lat);
    }

    #[test]
    fn test_transform_polygon() {
        let reproj = AlbersReprojector::default();
        let poly = polygon![
            (x: 0.0, y: 0.0),
            (x: 100_000.0, y: 0.0),
            (x: 100_000.0, y: 100_000.0),
            (x: 0.0, y: 0.0)
        ];
        let out = reproj.transform_geometry(&Geometry::Polygon(poly)).unwrap();
        let Geometry::Polygon(out) = out else {
            panic!("expected polygon");
        };
        assert_eq!(out.exterior().0.len(), 4);
        let first = out.exterior().0[0];
        assert!((first.x - (-96.0)).abs() < 1e-9, "lon={}", first.x);
        assert!((first.y - 23.0).abs() < 1e-6, "lat={}", first.y);
        // Vers l'est, la longitude augmente
        assert!(out.exterior().0[1].x > first.x);
    }

    #[test]
    fn test_diverging_vertex_fails_geometry() {
        let reproj = AlbersReprojector::default();
        let ls = line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 8_000_000.0)];
        let err = reproj
            .transform_geometry(&Geometry::LineString(ls))
            .unwrap_err();
        assert!(matches!(err, AlbersError::NotConverged { .. }));
    }

    #[test]
    fn test_unsupported_geometry() {
        let reproj = AlbersReprojector::default();
        let rect = geo::Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        assert_eq!(
            reproj.transform_geometry(&Geometry::Rect(rect)).unwrap_err(),
            AlbersError::UnsupportedGeometry("Rect")
        );
    }

    #[test]
    fn test_batch_matches_scalar() {
        let proj = AlbersProjection::usgs();
        let points: Vec<(f64, f64)> = (0..64)
            .map(|i| (i as f64 * 50_000.0 - 1_600_000.0, i as f64 * 40_000.0 - 1_000_000.0))
            .chain([(0.0, 8_000_000.0)])
            .collect();

        let batch = inverse_batch(&proj, &points);
        assert_eq!(batch.len(), points.len());
        for (&(x, y), inv) in points.iter().zip(&batch) {
            let scalar = proj.inverse_point(x, y, false);
            assert_eq!(scalar.latitude().to_bits(), inv.latitude().to_bits());
            assert_eq!(scalar.longitude().to_bits(), inv.longitude().to_bits());
        }
        assert!(!batch.last().unwrap().is_converged());
    }
}
