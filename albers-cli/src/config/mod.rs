//! Configuration de la conversion

use std::path::Path;

use albers::ThetaMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Variable d'environnement pointant vers un fichier de configuration JSON
pub const CONFIG_ENV: &str = "ALBERS_CONFIG";

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Calcul de θ : "atan" (historique) ou "atan2"
    pub theta: ThetaSetting,

    /// Nombre de décimales pour lat/lon en sortie CSV
    pub precision: u8,

    /// Format de sortie par défaut
    pub format: OutputFormat,

    /// Nombre de threads rayon (défaut : tous les cœurs)
    pub jobs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theta: ThetaSetting::Atan,
            precision: 7,
            format: OutputFormat::Csv,
            jobs: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThetaSetting {
    #[default]
    Atan,
    Atan2,
}

impl From<ThetaSetting> for ThetaMode {
    fn from(value: ThetaSetting) -> Self {
        match value {
            ThetaSetting::Atan => ThetaMode::Atan,
            ThetaSetting::Atan2 => ThetaMode::Atan2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Geojson,
}

impl OutputFormat {
    /// Déduit le format depuis l'extension du fichier de sortie
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "geojson" | "json" => Some(Self::Geojson),
            _ => None,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }

    /// Résout la configuration : chemin explicite, sinon `ALBERS_CONFIG`, sinon défauts
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(env_path) if !env_path.is_empty() => Self::load(Path::new(&env_path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn theta_mode(&self) -> ThetaMode {
        self.theta.into()
    }
}
