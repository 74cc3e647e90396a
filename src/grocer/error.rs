use crate::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrocerError {
    #[error("Invalid item: {0}")]
    Validation(String),

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Invalid import: {0}")]
    Format(String),

    #[error("Could not save list: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, GrocerError>;
