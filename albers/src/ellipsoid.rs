//! Définitions des ellipsoïdes et rayon géocentrique

/// Ellipsoïde de révolution défini par ses deux demi-axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,
    /// Demi-petit axe (rayon polaire) en mètres
    pub b: f64,
}

impl Ellipsoid {
    /// Ellipsoïde WGS84
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        b: 6356752.3142,
    };

    /// Distance du centre de l'ellipsoïde à sa surface pour une latitude en degrés
    ///
    /// Aucune validation de plage : une latitude hors de [-90, 90] donne un
    /// résultat défini mais sans sens physique, NaN reste NaN.
    pub fn geocentric_radius(&self, lat_deg: f64) -> f64 {
        let a2 = self.a * self.a;
        let b2 = self.b * self.b;
        let cos_lat = lat_deg.to_radians().cos();
        (a2 * b2 / (a2 + (b2 - a2) * cos_lat * cos_lat)).sqrt()
    }
}

/// Rayon géocentrique WGS84 (mètres) à la latitude `lat_deg` (degrés)
pub fn geocentric_radius(lat_deg: f64) -> f64 {
    Ellipsoid::WGS84.geocentric_radius(lat_deg)
}
