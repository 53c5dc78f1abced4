//! Database primitives and the record repositories.
//!
//! The repositories own all reads and writes of department and employee
//! records; handlers never touch the entities directly. The pool is
//! constructed once at startup and handed to handlers through app state.

pub mod departments;
pub mod employees;

use std::collections::BTreeMap;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;

/// Shared connection alias.
pub type DbPool = DatabaseConnection;

/// Field name mapped to its validation messages, in stable order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    url: String,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Reads `DATABASE_URL`, defaulting to a local SQLite file.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://staffdir.db?mode=rwc".to_string());
        Self { url }
    }

    pub fn database_url(&self) -> &str {
        &self.url
    }
}

pub async fn connect(settings: &DatabaseSettings) -> Result<DbPool, DbErr> {
    let mut options = ConnectOptions::new(settings.database_url());
    options.sqlx_logging(false);
    Database::connect(options).await
}

/// A row deleted between the existence check and the write surfaces as
/// `RecordNotUpdated`; that is a missing record, not a database fault.
pub(crate) fn map_update_err(err: DbErr) -> StoreError {
    match err {
        DbErr::RecordNotUpdated => StoreError::NotFound,
        other => StoreError::Db(other),
    }
}

/// Trims `value` and records a field error when it is missing or blank.
pub(crate) fn require_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        None => {
            errors
                .entry(field.to_string())
                .or_default()
                .push("this field is required".to_string());
            None
        }
        Some("") => {
            errors
                .entry(field.to_string())
                .or_default()
                .push("this field may not be blank".to_string());
            None
        }
        Some(text) => Some(text.to_string()),
    }
}
