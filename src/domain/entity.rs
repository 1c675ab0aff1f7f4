//! Domain Layer - Core Types
//!
//! Common result and error types shared by all domain operations.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Expected conditions (duplicate items, cancelled gestures, empty history)
/// are reported as values, not as errors; these variants cover genuinely
/// malformed input and internal failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainError {
    InvalidInput(String),
    InvalidProfile(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::InvalidProfile(msg) => write!(f, "Invalid profile: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
