//! Types de données pour le crate albers

use crate::AlbersError;

/// Point en coordonnées géographiques (degrés)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geographic {
    /// Latitude en degrés
    pub lat: f64,
    /// Longitude en degrés
    pub lon: f64,
}

impl Geographic {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Résultat d'une projection inverse
///
/// `iterations` est l'indice (base 0) de l'itération ayant validé le seuil
/// pour `Converged`, et le nombre total d'itérations exécutées pour `Diverged`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inversion {
    /// Le seuil |erreur| < 1e-7 a été atteint
    Converged {
        position: Geographic,
        iterations: usize,
    },
    /// Itérations épuisées sans atteindre le seuil
    Diverged {
        /// Dernier itéré de latitude (degrés)
        last_latitude: f64,
        iterations: usize,
        /// Erreur calculée à la dernière itération
        last_error: f64,
    },
}

impl Inversion {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Latitude en degrés (dernier itéré en cas de non-convergence)
    pub fn latitude(&self) -> f64 {
        match self {
            Self::Converged { position, .. } => position.lat,
            Self::Diverged { last_latitude, .. } => *last_latitude,
        }
    }

    /// Longitude en degrés, NaN en cas de non-convergence
    pub fn longitude(&self) -> f64 {
        match self {
            Self::Converged { position, .. } => position.lon,
            Self::Diverged { .. } => f64::NAN,
        }
    }

    pub fn iterations(&self) -> usize {
        match self {
            Self::Converged { iterations, .. } | Self::Diverged { iterations, .. } => *iterations,
        }
    }

    /// Vue numérique (latitude, longitude) avec NaN comme sentinelle de non-convergence
    pub fn to_tuple(&self) -> (f64, f64) {
        (self.latitude(), self.longitude())
    }

    /// Convertit en `Result`, la non-convergence devient `AlbersError::NotConverged`
    pub fn into_result(self) -> Result<Geographic, AlbersError> {
        match self {
            Self::Converged { position, .. } => Ok(position),
            Self::Diverged {
                last_latitude,
                iterations,
                last_error,
            } => Err(AlbersError::not_converged(
                last_latitude,
                iterations,
                last_error,
            )),
        }
    }
}
