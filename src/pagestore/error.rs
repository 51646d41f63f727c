use crate::model::PageId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("page with id={0} not found")]
    NotFound(PageId),

    #[error("invalid due date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PageError>;
