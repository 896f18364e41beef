//! Стандартный скейлер, обученный офлайн

use std::path::Path;

use anyhow::Context;
use ndarray::Array1;
use serde::Deserialize;

use crate::predictor::PredictError;
use crate::preprocessing::FEATURE_COLUMNS;

/// JSON-артефакт скейлера: имена колонок плюс mean/scale по каждой.
#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Загрузка артефакта с проверкой схемы: число и порядок колонок
    /// должны в точности совпадать с FEATURE_COLUMNS, иначе transform
    /// молча выдаст неверные числа. Дрейф схемы — ошибка старта.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scaler artifact {}", path.display()))?;
        let artifact: ScalerArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse scaler artifact {}", path.display()))?;

        if artifact.columns.len() != FEATURE_COLUMNS.len() {
            anyhow::bail!(
                "scaler artifact has {} columns, expected {}",
                artifact.columns.len(),
                FEATURE_COLUMNS.len()
            );
        }
        for (i, (got, expected)) in artifact
            .columns
            .iter()
            .zip(FEATURE_COLUMNS.iter())
            .enumerate()
        {
            if got != expected {
                anyhow::bail!("scaler column {i} is '{got}', expected '{expected}'");
            }
        }
        if artifact.mean.len() != artifact.columns.len()
            || artifact.scale.len() != artifact.columns.len()
        {
            anyhow::bail!("scaler artifact mean/scale length mismatch");
        }

        let mean = Array1::from(artifact.mean);
        let mut scale = Array1::from(artifact.scale);

        // Избегаем деления на ноль
        for val in scale.iter_mut() {
            if val.abs() < 1e-10 {
                *val = 1.0;
            }
        }

        Ok(Self { mean, scale })
    }

    /// Сборка из готовых массивов, без артефакта. Для тестов и обвязки.
    pub fn from_parts(mean: Array1<f64>, scale: Array1<f64>) -> Self {
        Self { mean, scale }
    }

    /// Стандартизация: (x - mean) / scale
    pub fn transform(&self, row: &Array1<f64>) -> Result<Array1<f64>, PredictError> {
        if row.len() != self.mean.len() {
            return Err(PredictError::Scaler(format!(
                "input has {} values, scaler was fitted on {}",
                row.len(),
                self.mean.len()
            )));
        }
        Ok((row - &self.mean) / &self.scale)
    }
}
