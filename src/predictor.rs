//! Оркестратор предсказаний

use std::path::Path;

use thiserror::Error;

use crate::models::{LinearModel, StandardScaler};
use crate::preprocessing::{FeatureVector, PRICE_MODEL_COLUMNS};
use crate::types::{CleanedInput, RawCarForm};

/// Единый исход пайплайна: валидация и отказ коллаборатора — разные
/// варианты, но на HTTP-границе оба превращаются в один и тот же 400.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("missing or unparseable field '{0}'")]
    MissingField(&'static str),
    #[error("unknown fuel type '{0}'")]
    UnknownFuel(String),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("scaler failure: {0}")]
    Scaler(String),
    #[error("model failure: {0}")]
    Model(String),
}

/// Неизменяемый процесс-wide хендл с артефактами. Загружается один
/// раз на старте и дальше только читается.
pub struct Predictor {
    scaler: StandardScaler,
    price_model: LinearModel,
    categoria_model: LinearModel,
    price_slots: Vec<usize>,
}

impl Predictor {
    /// Загрузка трёх артефактов из каталога. Привязка входных колонок
    /// ценовой модели к позициям отскейленного вектора выводится по
    /// именам и проверяется здесь, а не зашивается индексами.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let scaler = StandardScaler::load(&dir.join("scaler.json"))?;
        let price_model = LinearModel::load(&dir.join("price_model.json"))?;
        let categoria_model = LinearModel::load(&dir.join("categoria_model.json"))?;

        if price_model.columns() != PRICE_MODEL_COLUMNS {
            anyhow::bail!(
                "price model columns {:?} do not match expected {:?}",
                price_model.columns(),
                PRICE_MODEL_COLUMNS
            );
        }

        let mut price_slots = Vec::with_capacity(PRICE_MODEL_COLUMNS.len());
        for column in price_model.columns() {
            let idx = FeatureVector::column_index(column).ok_or_else(|| {
                anyhow::anyhow!("price model column '{column}' is not in the training schema")
            })?;
            price_slots.push(idx);
        }

        for column in categoria_model.columns() {
            if !PRICE_MODEL_COLUMNS.contains(&column.as_str()) {
                anyhow::bail!("categoria model column '{column}' is not a live input field");
            }
        }

        Ok(Self {
            scaler,
            price_model,
            categoria_model,
            price_slots,
        })
    }

    pub fn from_parts(
        scaler: StandardScaler,
        price_model: LinearModel,
        categoria_model: LinearModel,
        price_slots: Vec<usize>,
    ) -> Self {
        Self {
            scaler,
            price_model,
            categoria_model,
            price_slots,
        }
    }

    /// Позиции отскейленных колонок, которые потребляет ценовая модель.
    pub fn price_slots(&self) -> &[usize] {
        &self.price_slots
    }

    /// Вариант со скейлером: нормализация -> проверка полноты ->
    /// 15-слотовый вектор -> transform -> выборка связанных колонок ->
    /// predict -> округление до двух знаков.
    pub fn predict_price(&self, raw: &RawCarForm) -> Result<f64, PredictError> {
        let cleaned = self.normalize(raw)?;
        let vector = FeatureVector::from_cleaned(&cleaned)?;
        let scaled = self.scaler.transform(&vector.as_array())?;

        let inputs: Vec<f64> = self.price_slots.iter().map(|i| scaled[*i]).collect();
        let prediction = self.price_model.predict(&inputs)?;
        Ok(round2(prediction))
    }

    /// Вариант без скейлера: те же четыре значения подаются модели
    /// напрямую, в её собственном порядке колонок.
    pub fn predict_categoria(&self, raw: &RawCarForm) -> Result<f64, PredictError> {
        let cleaned = self.normalize(raw)?;

        let mut inputs = Vec::with_capacity(self.categoria_model.columns().len());
        for column in self.categoria_model.columns() {
            inputs.push(live_value(&cleaned, column)?);
        }
        let prediction = self.categoria_model.predict(&inputs)?;
        Ok(round2(prediction))
    }

    fn normalize(&self, raw: &RawCarForm) -> Result<CleanedInput, PredictError> {
        let cleaned = CleanedInput::from_raw(raw);
        // Непустое, но нераспознанное топливо — отдельное сообщение
        if cleaned.fuel.is_none() && !raw.fuel.trim().is_empty() {
            return Err(PredictError::UnknownFuel(raw.fuel.trim().to_string()));
        }
        Ok(cleaned)
    }
}

fn live_value(cleaned: &CleanedInput, column: &str) -> Result<f64, PredictError> {
    match column {
        "max_power (in bph)" => cleaned
            .max_power
            .ok_or(PredictError::MissingField("max_power (in bph)")),
        "year" => cleaned.year.ok_or(PredictError::MissingField("year")),
        "km_driven" => cleaned
            .km_driven
            .ok_or(PredictError::MissingField("km_driven")),
        "fuel" => cleaned
            .fuel
            .map(|f| f.code())
            .ok_or(PredictError::MissingField("fuel")),
        other => Err(PredictError::SchemaMismatch(format!(
            "unknown column '{other}'"
        ))),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::FEATURE_COLUMNS;
    use ndarray::Array1;
    use std::path::Path;

    fn identity_scaler() -> StandardScaler {
        StandardScaler::from_parts(
            Array1::zeros(FEATURE_COLUMNS.len()),
            Array1::ones(FEATURE_COLUMNS.len()),
        )
    }

    fn sum_price_model() -> LinearModel {
        LinearModel::from_parts(
            PRICE_MODEL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            vec![1.0, 1.0, 1.0, 1.0],
            0.0,
        )
    }

    fn categoria_model() -> LinearModel {
        LinearModel::from_parts(
            vec![
                "max_power (in bph)".to_string(),
                "year".to_string(),
                "km_driven".to_string(),
                "fuel".to_string(),
            ],
            vec![0.0, 0.0, 0.0, 1.0],
            0.0,
        )
    }

    fn test_predictor() -> Predictor {
        Predictor::from_parts(
            identity_scaler(),
            sum_price_model(),
            categoria_model(),
            vec![2, 3, 4, 8],
        )
    }

    fn raw(max_power: &str, year: &str, km_driven: &str, fuel: &str) -> RawCarForm {
        RawCarForm {
            max_power: max_power.to_string(),
            year: year.to_string(),
            km_driven: km_driven.to_string(),
            fuel: fuel.to_string(),
        }
    }

    #[test]
    fn well_formed_input_predicts() {
        let predictor = test_predictor();
        let result = predictor
            .predict_price(&raw("120", "2018", "45000", "Petrol"))
            .unwrap();
        // единичный скейлер, суммирующая модель: 2018 + 45000 + 1 + 120
        assert_eq!(result, 47139.0);
    }

    #[test]
    fn units_are_stripped_before_prediction() {
        let predictor = test_predictor();
        let with_units = predictor
            .predict_price(&raw("120 bph", "2018", "45000 km", "Petrol"))
            .unwrap();
        let plain = predictor
            .predict_price(&raw("120", "2018", "45000", "Petrol"))
            .unwrap();
        assert_eq!(with_units, plain);
    }

    #[test]
    fn unknown_fuel_is_rejected() {
        let predictor = test_predictor();
        let err = predictor
            .predict_price(&raw("120", "2018", "45000", "Hydrogen"))
            .unwrap_err();
        assert!(matches!(err, PredictError::UnknownFuel(_)));
    }

    #[test]
    fn unparseable_power_is_rejected() {
        let predictor = test_predictor();
        let err = predictor
            .predict_price(&raw("abc", "2018", "45000", "Petrol"))
            .unwrap_err();
        assert!(matches!(
            err,
            PredictError::MissingField("max_power (in bph)")
        ));
    }

    #[test]
    fn empty_field_is_rejected_not_zeroed() {
        let predictor = test_predictor();
        let err = predictor
            .predict_price(&raw("120", "", "45000", "Petrol"))
            .unwrap_err();
        assert!(matches!(err, PredictError::MissingField("year")));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let predictor = test_predictor();
        let input = raw("88.5", "2015", "70000", "Diesel");
        let first = predictor.predict_price(&input).unwrap();
        let second = predictor.predict_price(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn categoria_variant_uses_its_own_column_order() {
        let predictor = test_predictor();
        // модель категории весит только колонку fuel
        let result = predictor
            .predict_categoria(&raw("120", "2018", "45000", "LPG"))
            .unwrap();
        assert_eq!(result, 3.0);
    }

    #[test]
    fn categoria_variant_rejects_bad_input_too() {
        let predictor = test_predictor();
        let err = predictor
            .predict_categoria(&raw("120", "2018", "xx", "Diesel"))
            .unwrap_err();
        assert!(matches!(err, PredictError::MissingField("km_driven")));
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let predictor = Predictor::from_parts(
            identity_scaler(),
            LinearModel::from_parts(
                PRICE_MODEL_COLUMNS.iter().map(|c| c.to_string()).collect(),
                vec![0.001, 0.0, 0.0, 0.0],
                0.0,
            ),
            categoria_model(),
            vec![2, 3, 4, 8],
        );
        let result = predictor
            .predict_price(&raw("120", "2018", "45000", "Petrol"))
            .unwrap();
        assert_eq!(result, 2.02); // 2018 * 0.001 = 2.018
    }

    #[test]
    fn bundled_artifacts_load_and_bind() {
        let predictor = Predictor::load(Path::new("models")).unwrap();
        assert_eq!(predictor.price_slots(), &[2, 3, 4, 8]);

        let price = predictor
            .predict_price(&raw("120", "2018", "45000", "Petrol"))
            .unwrap();
        assert!(price.is_finite() && price > 0.0);

        let categoria = predictor
            .predict_categoria(&raw("120", "2018", "45000", "Petrol"))
            .unwrap();
        assert!(categoria.is_finite());
    }
}
