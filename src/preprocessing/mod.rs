/// Модуль предобработки данных

pub mod assembly;
pub mod normalization;

pub use assembly::{FeatureVector, FEATURE_COLUMNS, PRICE_MODEL_COLUMNS};
pub use normalization::clean_numeric;
