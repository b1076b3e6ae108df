use thiserror::Error;
use uuid::Uuid;

use crate::models::ResultType;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Inconsistent row: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Attach an entity name to a bare `NotFound` when it crosses into the
    /// scoring layer; every other variant passes through unchanged.
    pub fn or_not_found(self, entity: &'static str) -> ScoringError {
        match self {
            StorageError::NotFound => ScoringError::NotFound(entity),
            other => ScoringError::Storage(other),
        }
    }
}

/// Rejection reasons for a submitted result. Each carries a stable
/// machine-readable code surfaced in API error bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("value does not have the shape of a {0} result")]
    TypeMismatch(ResultType),

    #[error("cannot parse {0:?} as mm:ss or hh:mm:ss")]
    InvalidTimeFormat(String),

    #[error("participant kind does not match the category participation mode")]
    ParticipantTypeMismatch,

    #[error("participant is not eligible to receive results in this category")]
    IneligibleParticipant,

    #[error("participant appears more than once in the batch")]
    DuplicateParticipant,
}

impl ValidationFailure {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch(_) => "type_mismatch",
            Self::InvalidTimeFormat(_) => "invalid_time_format",
            Self::ParticipantTypeMismatch => "participant_type_mismatch",
            Self::IneligibleParticipant => "ineligible_participant",
            Self::DuplicateParticipant => "duplicate_participant",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    /// The per-category writer lock could not be acquired in time. The
    /// whole submission is safe to retry.
    #[error("category {0} is busy recomputing scores")]
    CategoryLocked(Uuid),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(failure) => failure.code(),
            Self::CategoryLocked(_) => "category_locked",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Whether the caller may retry the identical request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CategoryLocked(_))
    }
}
