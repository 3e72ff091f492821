//! Unified application error type.
//! All modules (db, core, cli, api) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Event #{0} not found")]
    NotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors caused by bad caller input, reported before any
    /// storage interaction.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::InvalidDate(_))
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        if self.is_validation() { 2 } else { 1 }
    }
}

pub type AppResult<T> = Result<T, AppError>;
