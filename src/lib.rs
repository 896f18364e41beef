//! Carprice ML - Rust сервис предсказания цены автомобиля

pub mod models;
pub mod predictor;
pub mod preprocessing;
pub mod types;

pub use models::*;
pub use preprocessing::*;
pub use types::*;

// Re-export для удобства
pub use predictor::{PredictError, Predictor};
