//! Rapport de conversion
//!
//! Compte les points convertis et non convergés, affiche un résumé
//! et peut l'enregistrer en JSON.

use std::path::Path;
use std::time::Duration;

use albers::Inversion;
use anyhow::{Context, Result};
use serde::Serialize;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionStatus {
    /// Tous les points ont convergé
    Success,
    /// Certains points n'ont pas convergé
    PartialSuccess,
    /// Aucun point converti
    Failed,
}

/// Rapport d'une conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub status: ConversionStatus,
    /// Fichier source
    pub input: String,
    /// Fichier de sortie
    pub output: String,
    pub total: usize,
    pub converged: usize,
    pub diverged: usize,
    /// Plus grand nombre d'itérations parmi les points convergés
    pub max_iterations: usize,
    pub elapsed_ms: u128,
}

impl ConversionReport {
    /// Construit le rapport depuis les résultats d'inversion
    pub fn from_inversions<'a>(
        input: &Path,
        output: &Path,
        inversions: impl IntoIterator<Item = &'a Inversion>,
        elapsed: Duration,
    ) -> Self {
        let mut report = Self::empty(input, output, elapsed);
        for inversion in inversions {
            report.total += 1;
            if inversion.is_converged() {
                report.converged += 1;
                report.max_iterations = report.max_iterations.max(inversion.iterations());
            } else {
                report.diverged += 1;
            }
        }
        report.status = report.compute_status();
        report
    }

    /// Construit le rapport depuis des compteurs (reprojection de géométries)
    pub fn from_counts(
        input: &Path,
        output: &Path,
        total: usize,
        failures: usize,
        elapsed: Duration,
    ) -> Self {
        let mut report = Self::empty(input, output, elapsed);
        report.total = total;
        report.diverged = failures.min(total);
        report.converged = total - report.diverged;
        report.status = report.compute_status();
        report
    }

    fn empty(input: &Path, output: &Path, elapsed: Duration) -> Self {
        Self {
            status: ConversionStatus::Failed,
            input: input.display().to_string(),
            output: output.display().to_string(),
            total: 0,
            converged: 0,
            diverged: 0,
            max_iterations: 0,
            elapsed_ms: elapsed.as_millis(),
        }
    }

    fn compute_status(&self) -> ConversionStatus {
        if self.converged == 0 && self.total > 0 {
            ConversionStatus::Failed
        } else if self.diverged > 0 {
            ConversionStatus::PartialSuccess
        } else {
            ConversionStatus::Success
        }
    }

    /// Résumé lisible
    pub fn summary(&self) -> String {
        let status = match self.status {
            ConversionStatus::Success => "OK",
            ConversionStatus::PartialSuccess => "PARTIEL",
            ConversionStatus::Failed => "ÉCHEC",
        };
        format!(
            "[{}] {} → {} : {}/{} convertis, {} non convergés ({} ms)",
            status,
            self.input,
            self.output,
            self.converged,
            self.total,
            self.diverged,
            self.elapsed_ms
        )
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .context(format!("Failed to write report: {}", path.display()))
    }
}
