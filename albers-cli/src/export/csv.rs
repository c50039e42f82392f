//! Export CSV

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::ConvertedPoint;

pub const HEADER: &str = "id,x,y,lat,lon,iterations,converged";

/// Écrit les points en CSV ; lon vaut `NaN` pour les points non convergés
pub fn write_points<W: Write>(writer: &mut W, points: &[ConvertedPoint], precision: u8) -> Result<()> {
    let precision = precision as usize;
    writeln!(writer, "{}", HEADER)?;
    for point in points {
        let (lat, lon) = point.inversion.to_tuple();
        writeln!(
            writer,
            "{},{},{},{:.*},{:.*},{},{}",
            escape_csv(&point.id),
            point.x,
            point.y,
            precision,
            lat,
            precision,
            lon,
            point.inversion.iterations(),
            point.inversion.is_converged()
        )?;
    }
    Ok(())
}

/// Exporte les points dans un fichier CSV
pub fn export_to_csv(points: &[ConvertedPoint], output_path: &Path, precision: u8) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_points(&mut writer, points, precision)?;
    writer.flush()?;
    Ok(())
}

fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
