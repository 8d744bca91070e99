//! Error types for configuration loading and item insertion.
//!
//! The interactive operations on [`crate::engine::PositioningEngine`] report
//! failure with a plain `bool`; these errors cover the places where the caller
//! hands the engine data that cannot be corrected in place.

use crate::item::ItemId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid constraints JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("grid size must be non-negative, got {0}")]
    InvalidGridSize(f64),
    #[error("minimum item size must be positive, got {0}")]
    InvalidMinItemSize(f64),
    #[error("maximum item size {max} is below minimum item size {min}")]
    InvertedItemSize { min: f64, max: f64 },
    #[error("history size must be at least 1")]
    ZeroHistorySize,
}

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("item already exists: {0}")]
    DuplicateId(ItemId),
    #[error("item {id} has non-positive size {width}x{height}")]
    InvalidSize { id: ItemId, width: f64, height: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Item(#[from] ItemError),
}
