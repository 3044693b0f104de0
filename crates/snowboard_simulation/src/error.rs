//! Ошибки загрузки/валидации параметров модели и построения террейна
//!
//! Численные команды (tilt, speed ratio) не валидируются - хост обязан
//! передавать корректные значения. Ошибки есть только у пресетов и heightfield'ов.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParameterError {
    /// Нормализованный slider вне [0, 1]
    #[error("Parameter {name} = {value} is outside of [0, 1]")]
    OutOfRange {
        name: &'static str,
        value: f32,
    },

    /// NaN / infinity там, где ожидается конечное число
    #[error("Parameter {name} is not finite: {value}")]
    NonFinite {
        name: &'static str,
        value: f32,
    },

    /// Геометрия доски не имеет смысла (нулевая длина, ширина ≥ длины)
    #[error("Invalid board dimensions: length {length}, width {width}")]
    InvalidBoard {
        length: f32,
        width: f32,
    },

    /// Пресет не распарсился
    #[error("Failed to parse parameter preset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    /// Heightfield меньше 2x2 узлов - нечего интерполировать
    #[error("Heightfield needs at least 2x2 nodes, got {nx}x{nz}")]
    TooSmall { nx: u32, nz: u32 },

    /// Число высот не совпадает с nx × nz
    #[error("Heightfield expects {expected} heights, got {actual}")]
    HeightCount { expected: usize, actual: usize },
}
