//! Types d'erreurs pour le crate albers

use thiserror::Error;

/// Erreurs pouvant survenir lors de la projection inverse
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlbersError {
    /// L'itération de Snyder (éq. 3-16) n'a pas convergé
    #[error("Inverse Albers did not converge after {iterations} iterations (last latitude {last_latitude}, last error {last_error})")]
    NotConverged {
        last_latitude: f64,
        iterations: usize,
        last_error: f64,
    },

    /// Type de géométrie non géré par la reprojection
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(&'static str),
}

impl AlbersError {
    /// Crée une erreur de non-convergence avec contexte
    pub fn not_converged(last_latitude: f64, iterations: usize, last_error: f64) -> Self {
        Self::NotConverged {
            last_latitude,
            iterations,
            last_error,
        }
    }
}
