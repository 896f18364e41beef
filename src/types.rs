/// Типы данных для сервиса предсказаний

use serde::{Deserialize, Serialize};

/// Сырые поля формы, как они приходят в POST-запросе.
/// Формат не гарантирован: поля могут содержать единицы измерения и мусор.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCarForm {
    #[serde(rename = "max_power (in bph)")]
    pub max_power: String,
    pub year: String,
    pub km_driven: String,
    pub fuel: String,
}

/// Тип топлива с фиксированными кодами из обучающей выборки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Diesel = 0,
    Petrol = 1,
    Cng = 2,
    Lpg = 3,
    Electric = 4,
}

impl FuelType {
    /// Сопоставление текста формы с кодом. Неизвестная строка — None,
    /// никогда не код 0 по умолчанию.
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim() {
            "Diesel" => Some(FuelType::Diesel),
            "Petrol" => Some(FuelType::Petrol),
            "CNG" => Some(FuelType::Cng),
            "LPG" => Some(FuelType::Lpg),
            "Electric" => Some(FuelType::Electric),
            _ => None,
        }
    }

    pub fn code(self) -> f64 {
        self as i32 as f64
    }
}

/// Результат нормализации: None означает "значение отсутствует",
/// что отличимо от легитимного нуля.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedInput {
    pub max_power: Option<f64>,
    pub year: Option<f64>,
    pub km_driven: Option<f64>,
    pub fuel: Option<FuelType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub prediction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriaResponse {
    pub categoria: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
