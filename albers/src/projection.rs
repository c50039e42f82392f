//! Projection conique équivalente d'Albers, inverse sur l'ellipsoïde
//!
//! Formules de Snyder (USGS Professional Paper 1395, 1987, pp. 98-103) :
//! constantes (14-12 à 14-15), puis latitude par itération de l'éq. 3-16.

use tracing::{debug, info, trace};

use crate::types::{Geographic, Inversion};
use crate::AlbersError;

/// Nombre maximal d'itérations de l'éq. 3-16
pub const MAX_ITERATIONS: usize = 100;

/// Seuil de convergence sur |φ - φ_suivant| (degrés), comparaison stricte
pub const TOLERANCE: f64 = 1e-7;

/// Paramètres d'une définition Albers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbersParams {
    /// Latitude origine (degrés)
    lat0: f64,
    /// Longitude origine (degrés)
    lon0: f64,
    /// Premier parallèle standard (degrés)
    lat1: f64,
    /// Deuxième parallèle standard (degrés)
    lat2: f64,
    /// Demi-grand axe (mètres)
    a: f64,
    /// Excentricité
    e: f64,
}

impl AlbersParams {
    /// Albers USGS des États-Unis contigus, ellipsoïde Clarke 1866
    pub const USGS_CONUS: AlbersParams = AlbersParams {
        lat0: 23.0,
        lon0: -96.0,
        lat1: 29.5,
        lat2: 45.5,
        a: 6378206.4,
        e: 0.0822719,
    };

    pub fn e(&self) -> f64 {
        self.e
    }
}

impl Default for AlbersParams {
    fn default() -> Self {
        Self::USGS_CONUS
    }
}

/// Calcul de l'angle θ à partir de (x, ρ₀ - y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThetaMode {
    /// atan(x / (ρ₀ - y)) : faux quadrant quand ρ₀ - y <= 0
    #[default]
    Atan,
    /// atan2(x, ρ₀ - y)
    Atan2,
}

/// Facteur m de Snyder (éq. 14-15)
fn scale_factor(lat_deg: f64, e: f64) -> f64 {
    let lat = lat_deg.to_radians();
    lat.cos() / (1.0 - e * e * lat.sin().powi(2)).sqrt()
}

/// Fonction q de Snyder (éq. 3-12) pour une latitude en degrés
///
/// La valeur absolue porte sur tout le crochet : q(-φ) = q(φ).
pub fn authalic_q(lat_deg: f64, e: f64) -> f64 {
    let sin_lat = lat_deg.to_radians().sin();
    let e2 = e * e;
    (1.0 - e2)
        * (sin_lat / (1.0 - e2 * sin_lat * sin_lat)
            - (1.0 / (2.0 * e)) * ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).ln())
        .abs()
}

/// Projection Albers avec ses constantes précalculées
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbersProjection {
    params: AlbersParams,
    theta_mode: ThetaMode,
    /// Constante du cône
    n: f64,
    /// Constante C
    c: f64,
    /// Rayon à la latitude origine
    rho0: f64,
}

impl AlbersProjection {
    pub fn new(params: AlbersParams, theta_mode: ThetaMode) -> Self {
        let e = params.e;

        let m1 = scale_factor(params.lat1, e);
        let m2 = scale_factor(params.lat2, e);

        let q0 = authalic_q(params.lat0, e);
        let q1 = authalic_q(params.lat1, e);
        let q2 = authalic_q(params.lat2, e);

        let n = (m1 * m1 - m2 * m2) / (q2 - q1);
        let c = m1 * m1 + n * q1;
        let rho0 = params.a * (c - n * q0).sqrt() / n;

        Self {
            params,
            theta_mode,
            n,
            c,
            rho0,
        }
    }

    /// Définition USGS, θ par atan simple
    pub fn usgs() -> Self {
        Self::new(AlbersParams::USGS_CONUS, ThetaMode::Atan)
    }

    pub fn with_theta_mode(self, theta_mode: ThetaMode) -> Self {
        Self { theta_mode, ..self }
    }

    pub fn params(&self) -> &AlbersParams {
        &self.params
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn rho0(&self) -> f64 {
        self.rho0
    }

    /// Angle θ (degrés) et valeur q cible pour un point projeté
    pub fn theta_and_q(&self, x: f64, y: f64) -> (f64, f64) {
        let a = self.params.a;
        let dy = self.rho0 - y;

        let rho = (x * x + dy * dy).sqrt();
        let theta = match self.theta_mode {
            ThetaMode::Atan => (x / dy).atan(),
            ThetaMode::Atan2 => x.atan2(dy),
        }
        .to_degrees();
        let q = (self.c - rho * rho * self.n * self.n / (a * a)) / self.n;

        (theta, q)
    }

    /// Latitude suivante (degrés) selon l'éq. 3-16
    fn next_latitude(&self, lat_deg: f64, q: f64) -> f64 {
        let e = self.params.e;
        let e2 = e * e;
        let lat = lat_deg.to_radians();
        let sin_lat = lat.sin();
        let denom = 1.0 - e2 * sin_lat * sin_lat;

        let correction = denom * denom / (2.0 * lat.cos())
            * (q / (1.0 - e2) - sin_lat / denom
                + (1.0 / (2.0 * e)) * ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).ln());

        lat_deg + correction.to_degrees()
    }

    /// Convertit (x, y) en mètres vers latitude/longitude en degrés
    ///
    /// `verbose` ne fait que remonter le diagnostic de convergence au niveau INFO.
    /// Ce diagnostic passe par `tracing` : sans subscriber installé, rien ne s'affiche.
    pub fn inverse_point(&self, x: f64, y: f64, verbose: bool) -> Inversion {
        let (theta, q) = self.theta_and_q(x, y);
        debug!(x, y, theta, q, "Albers inverse");

        // Point de départ : asin(q/2), NaN si |q/2| > 1
        let mut lat = (q / 2.0).asin().to_degrees();
        let mut last_error = f64::NAN;

        for i in 0..MAX_ITERATIONS {
            let next = self.next_latitude(lat, q);
            let error = lat - next;
            trace!(iteration = i, lat, error);

            if error.abs() < TOLERANCE {
                if verbose {
                    info!("converged in {} iterations", i);
                } else {
                    debug!("converged in {} iterations", i);
                }
                let lon = self.params.lon0 + theta / self.n;
                return Inversion::Converged {
                    position: Geographic::new(lat, lon),
                    iterations: i,
                };
            }

            last_error = error;
            lat = next;
        }

        if verbose {
            info!("did not converge");
        } else {
            debug!("did not converge");
        }
        Inversion::Diverged {
            last_latitude: lat,
            iterations: MAX_ITERATIONS,
            last_error,
        }
    }
}

impl Default for AlbersProjection {
    fn default() -> Self {
        Self::usgs()
    }
}

/// Albers USGS vers (latitude, longitude) en degrés
///
/// La longitude vaut NaN si l'itération ne converge pas, la latitude
/// contient alors le dernier itéré.
///
/// Avec `verbose`, le message `converged in N iterations` (ou `did not converge`)
/// est émis au niveau INFO via `tracing`. L'appelant doit installer un subscriber
/// (par ex. `tracing_subscriber::fmt().init()`) pour le voir.
pub fn inverse(x: f64, y: f64, verbose: bool) -> (f64, f64) {
    AlbersProjection::usgs().inverse_point(x, y, verbose).to_tuple()
}

/// Comme [`inverse`], la non-convergence devenant une erreur
pub fn try_inverse(x: f64, y: f64) -> Result<Geographic, AlbersError> {
    AlbersProjection::usgs().inverse_point(x, y, false).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        // Snyder p. 102
        let proj = AlbersProjection::usgs();
        assert!((proj.n() - 0.6029035).abs() < 1e-7, "n={}", proj.n());
        assert!((proj.c() - 1.3491594).abs() < 1e-7, "C={}", proj.c());
        assert!((proj.rho0() - 9929079.6).abs() < 0.1, "rho0={}", proj.rho0());
    }

    #[test]
    fn test_authalic_q() {
        let e = AlbersParams::USGS_CONUS.e();
        assert!((authalic_q(29.5, e) - 0.9792529).abs() < 1e-7);
        assert!((authalic_q(45.5, e) - 1.4201080).abs() < 1e-7);
        assert_eq!(authalic_q(-35.0, e), authalic_q(35.0, e));
    }

    #[test]
    fn test_snyder_example() {
        let (lat, lon) = inverse(1885472.7, 1535925.0, false);
        assert!((lat - 35.0).abs() < 1e-4, "lat={}", lat);
        assert!((lon - (-75.0)).abs() < 1e-4, "lon={}", lon);
    }

    #[test]
    fn test_origin() {
        let (lat, lon) = inverse(0.0, 0.0, false);
        assert!((lat - 23.0).abs() < 1e-6, "lat={}", lat);
        assert!((lon - (-96.0)).abs() < 1e-9, "lon={}", lon);
    }

    #[test]
    fn test_stops_at_first_accepted_iterate() {
        let inv = AlbersProjection::usgs().inverse_point(1885472.7, 1535925.0, false);
        assert!(inv.is_converged());
        assert_eq!(inv.iterations(), 2);
    }

    #[test]
    fn test_q_out_of_range_diverges() {
        // |q/2| > 1 : graine NaN, aucune itération ne passe le seuil
        let inv = AlbersProjection::usgs().inverse_point(0.0, 8_000_000.0, false);
        assert!(!inv.is_converged());
        assert_eq!(inv.iterations(), MAX_ITERATIONS);
        assert!(inv.longitude().is_nan());
        assert!(matches!(
            inv.into_result(),
            Err(AlbersError::NotConverged { iterations: 100, .. })
        ));
    }

    #[test]
    fn test_finite_divergence_returns_last_iterate() {
        // q entre le maximum atteignable (~1.9954) et 2 : graine finie, pas de racine
        let proj = AlbersProjection::usgs();
        let (x, y) = (0.0, 5_906_530.0);
        let (_, q) = proj.theta_and_q(x, y);
        assert!(q.abs() < 2.0 && q > authalic_q(90.0, proj.params().e()), "q={}", q);

        let mut lat = (q / 2.0).asin().to_degrees();
        assert!(lat.is_finite());
        let mut last_error = f64::NAN;
        for i in 0..MAX_ITERATIONS {
            let next = proj.next_latitude(lat, q);
            let error = lat - next;
            assert!(!(error.abs() < TOLERANCE), "accepted at iteration {}", i);
            last_error = error;
            lat = next;
        }

        match proj.inverse_point(x, y, false) {
            Inversion::Diverged {
                last_latitude,
                iterations,
                last_error: error,
            } => {
                assert_eq!(iterations, MAX_ITERATIONS);
                assert!(last_latitude.is_finite(), "lat={}", last_latitude);
                assert!(error.is_finite(), "error={}", error);
                assert_eq!(last_latitude.to_bits(), lat.to_bits());
                assert_eq!(error.to_bits(), last_error.to_bits());
            }
            other => panic!("unexpected {:?}", other),
        }

        let (lat, lon) = inverse(x, y, false);
        assert!(lat.is_finite());
        assert!(lon.is_nan());
    }

    #[test]
    fn test_apex_is_nan() {
        // x = 0, y = ρ₀ : θ = 0/0
        let proj = AlbersProjection::usgs();
        let (lat, lon) = proj.inverse_point(0.0, proj.rho0(), false).to_tuple();
        assert!(lat.is_nan());
        assert!(lon.is_nan());
    }

    #[test]
    fn test_atan2_mode() {
        let atan = AlbersProjection::usgs();
        let atan2 = atan.with_theta_mode(ThetaMode::Atan2);
        let (x, y) = (5_000_000.0, atan.rho0() + 1_000_000.0);

        let (lat_a, lon_a) = atan.inverse_point(x, y, false).to_tuple();
        let (lat_b, lon_b) = atan2.inverse_point(x, y, false).to_tuple();

        assert_eq!(lat_a, lat_b);
        // Écart d'un demi-tour en θ, soit 180/n en longitude
        assert!((lon_b - lon_a - 180.0 / atan.n()).abs() < 1e-9, "lon_a={} lon_b={}", lon_a, lon_b);
        assert!((lon_b - 72.0367295).abs() < 1e-6, "lon_b={}", lon_b);

        // Même résultat dans le demi-plan ρ₀ - y > 0
        let (lat_a, lon_a) = atan.inverse_point(1885472.7, 1535925.0, false).to_tuple();
        let (lat_b, lon_b) = atan2.inverse_point(1885472.7, 1535925.0, false).to_tuple();
        assert_eq!(lat_a, lat_b);
        assert!((lon_a - lon_b).abs() < 1e-9, "lon_a={} lon_b={}", lon_a, lon_b);
    }

    #[test]
    fn test_verbose_does_not_change_values() {
        let proj = AlbersProjection::usgs();
        for (x, y) in [(1885472.7, 1535925.0), (0.0, 8_000_000.0)] {
            let quiet = proj.inverse_point(x, y, false);
            let loud = proj.inverse_point(x, y, true);
            assert_eq!(quiet.latitude().to_bits(), loud.latitude().to_bits());
            assert_eq!(quiet.longitude().to_bits(), loud.longitude().to_bits());
        }
    }

    #[test]
    fn test_try_inverse() {
        let geo = try_inverse(1885472.7, 1535925.0).unwrap();
        assert!((geo.lat - 35.0).abs() < 1e-4);
        assert!(try_inverse(0.0, 8_000_000.0).is_err());
    }
}
