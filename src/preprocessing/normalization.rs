//! Нормализация сырых полей формы

use crate::types::{CleanedInput, FuelType, RawCarForm};

/// Приведение текстового поля к числу: убираем всё, кроме цифр,
/// точки и минуса, затем парсим. "120 bph" -> 120.0.
/// Непарсящееся значение (пустое, две точки и т.д.) — None.
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl CleanedInput {
    /// Пополевая нормализация формы. Ошибка парсинга не фатальна:
    /// поле просто помечается отсутствующим.
    pub fn from_raw(raw: &RawCarForm) -> Self {
        Self {
            max_power: clean_numeric(&raw.max_power),
            year: clean_numeric(&raw.year),
            km_driven: clean_numeric(&raw.km_driven),
            fuel: FuelType::from_form(&raw.fuel),
        }
    }
}
