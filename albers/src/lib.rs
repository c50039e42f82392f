//! # albers
//!
//! Projection inverse Albers équivalente conique sur l'ellipsoïde, d'après
//! Snyder, *Map Projections: A Working Manual* (USGS Professional Paper 1395, 1987).
//!
//! ## Features
//!
//! - Inverse Albers USGS (Clarke 1866, parallèles 29.5°N / 45.5°N) par itération de l'éq. 3-16
//! - Résultat typé (`Inversion`) avec vue tuple compatible NaN
//! - Rayon géocentrique de l'ellipsoïde WGS84
//! - Reprojection de géométries `geo` et inversion par lot avec `rayon`
//!
//! ## Usage
//!
//! ```rust
//! let (lat, lon) = albers::inverse(1885472.7, 1535925.0, false);
//! assert!((lat - 35.0).abs() < 1e-4);
//! assert!((lon + 75.0).abs() < 1e-4);
//!
//! let r = albers::geocentric_radius(0.0);
//! assert!((r - 6378137.0).abs() < 1e-6);
//! ```

pub mod ellipsoid;
pub mod error;
pub mod projection;
pub mod reproject;
pub mod types;

pub use ellipsoid::{geocentric_radius, Ellipsoid};
pub use error::AlbersError;
pub use projection::{
    authalic_q, inverse, try_inverse, AlbersParams, AlbersProjection, ThetaMode, MAX_ITERATIONS,
    TOLERANCE,
};
pub use reproject::{inverse_batch, AlbersReprojector};
pub use types::{Geographic, Inversion};
