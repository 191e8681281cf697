//! Error types for sheet operations

use std::path::PathBuf;

use thiserror::Error;

/// Errors from editing, loading and saving a sheet
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid character file: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    #[error("unknown profile field: {0}")]
    UnknownProfileField(String),

    #[error("attack not found: {0}")]
    AttackNotFound(String),

    #[error("spell level {0} out of range")]
    InvalidSpellLevel(u8),

    #[error("spell slot {index} out of range for level {level}")]
    InvalidSpellSlot { level: u8, index: usize },

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

pub type Result<T> = std::result::Result<T, SheetError>;
