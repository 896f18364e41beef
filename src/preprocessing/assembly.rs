//! Сборка вектора признаков по схеме обучающей выборки

use ndarray::Array1;

use crate::predictor::PredictError;
use crate::types::CleanedInput;

/// Колонки, на которых был обучен скейлер, в исходном порядке.
/// Живые значения идут только в year, km_driven, fuel и max_power;
/// остальные слоты всегда нулевые заглушки.
pub const FEATURE_COLUMNS: [&str; 15] = [
    "mileage (in km/ltr/kg)",
    "engine (in CC)",
    "year",
    "km_driven",
    "fuel",
    "seller_type",
    "transmission",
    "owner",
    "max_power (in bph)",
    "torque_nm",
    "torque_rpm",
    "seats",
    "brand_rank",
    "model_age",
    "region",
];

/// Колонки, которые реально потребляет ценовая модель после скейлера,
/// в её позиционном порядке. Индексы выводятся по именам при старте,
/// а не зашиваются числами.
pub const PRICE_MODEL_COLUMNS: [&str; 4] = ["year", "km_driven", "fuel", "max_power (in bph)"];

/// Запись фиксированной длины, совпадающая со схемой скейлера.
/// Слоты адресуются по имени колонки, позиционные индексы наружу
/// не выдаются.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COLUMNS.len()],
}

impl FeatureVector {
    /// Собирает 15-слотовую запись из нормализованного ввода.
    /// Любое отсутствующее поле — отказ до обращения к моделям.
    pub fn from_cleaned(cleaned: &CleanedInput) -> Result<Self, PredictError> {
        let max_power = cleaned
            .max_power
            .ok_or(PredictError::MissingField("max_power (in bph)"))?;
        let year = cleaned.year.ok_or(PredictError::MissingField("year"))?;
        let km_driven = cleaned
            .km_driven
            .ok_or(PredictError::MissingField("km_driven"))?;
        let fuel = cleaned.fuel.ok_or(PredictError::MissingField("fuel"))?;

        let mut vector = Self {
            values: [0.0; FEATURE_COLUMNS.len()],
        };
        vector.set("year", year)?;
        vector.set("km_driven", km_driven)?;
        vector.set("fuel", fuel.code())?;
        vector.set("max_power (in bph)", max_power)?;
        Ok(vector)
    }

    /// Позиция колонки в схеме, по имени.
    pub fn column_index(name: &str) -> Option<usize> {
        FEATURE_COLUMNS.iter().position(|c| *c == name)
    }

    fn set(&mut self, column: &str, value: f64) -> Result<(), PredictError> {
        let idx = Self::column_index(column)
            .ok_or_else(|| PredictError::SchemaMismatch(format!("unknown column '{column}'")))?;
        self.values[idx] = value;
        Ok(())
    }

    pub fn as_array(&self) -> Array1<f64> {
        Array1::from_iter(self.values.iter().copied())
    }
}
