//! Линейная модель, обученная офлайн

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::predictor::PredictError;

/// JSON-артефакт модели: имена входных колонок в её позиционном
/// порядке, веса и свободный член.
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub columns: Vec<String>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

pub struct LinearModel {
    columns: Vec<String>,
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact {}", path.display()))?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse model artifact {}", path.display()))?;

        if artifact.coef.len() != artifact.columns.len() {
            anyhow::bail!(
                "model artifact has {} coefficients for {} columns",
                artifact.coef.len(),
                artifact.columns.len()
            );
        }

        Ok(Self {
            columns: artifact.columns,
            coef: artifact.coef,
            intercept: artifact.intercept,
        })
    }

    pub fn from_parts(columns: Vec<String>, coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            columns,
            coef,
            intercept,
        }
    }

    /// Входные колонки модели, в её позиционном порядке.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Скалярное предсказание: coef . x + intercept
    pub fn predict(&self, row: &[f64]) -> Result<f64, PredictError> {
        if row.len() != self.coef.len() {
            return Err(PredictError::Model(format!(
                "input has {} values, model expects {}",
                row.len(),
                self.coef.len()
            )));
        }
        let score: f64 = row.iter().zip(self.coef.iter()).map(|(x, w)| x * w).sum();
        Ok(score + self.intercept)
    }
}
