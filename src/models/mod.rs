/// Обученные артефакты-коллабораторы

pub mod linear;
pub mod scaler;

pub use linear::LinearModel;
pub use scaler::StandardScaler;
