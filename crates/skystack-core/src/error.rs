//! Core synthesis error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling a stack template
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Missing context key: {0}")]
    MissingContext(String),

    #[error("Duplicate resource id: {0}")]
    DuplicateResource(String),

    #[error("Duplicate output name: {0}")]
    DuplicateOutput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {path}: {message}")]
    Io { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SynthError>;
