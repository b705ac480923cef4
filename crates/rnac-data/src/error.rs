//! Error types for the canonical data model

use thiserror::Error;

/// Result type alias for data model operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Construction and lookup failures of the canonical data model.
///
/// Semantic validity problems (sequence too short, too many ambiguous bases)
/// are not errors; they are reported by `Entry::is_valid`.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Unexpected RNA type: {0}")]
    UnexpectedRnaType(String),

    #[error("Unknown publication type: {0}")]
    UnknownPublicationType(String),

    #[error("No way to handle raw strand: {0}")]
    UnknownStrand(String),

    #[error("Unknown coordinate start: {0}")]
    UnknownCoordinateStart(String),

    #[error("Unknown close status: {0}")]
    UnknownCloseStatus(String),

    #[error("Unknown coordinate system: {0}")]
    UnknownCoordinateSystem(String),

    #[error("Exon stop ({stop}) must be >= start ({start})")]
    InvalidExon { start: i64, stop: i64 },

    #[error("Negative size for interval {start}-{stop}")]
    NegativeSize { start: i64, stop: i64 },

    #[error("Region on {0} has no exons")]
    EmptyRegion(String),

    #[error("Invalid sequence version: {0:?}")]
    InvalidSeqVersion(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Unknown relationship type: {0}")]
    UnknownRelationship(String),

    #[error("Cannot build an id reference for {0}")]
    NoIdReference(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] rnac_common::RncError),
}
