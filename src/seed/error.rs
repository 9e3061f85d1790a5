//! Seed-specific error types.

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Password hashing error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Invalid seed template: {0}")]
    InvalidTemplate(String),

    #[error("Derived record violates invariant: {0}")]
    Invariant(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed plan parsing error: {0}")]
    PlanFormat(#[from] serde_json::Error),
}
