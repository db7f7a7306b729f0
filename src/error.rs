//! Mutation engine errors.
//!
//! These are bounded and stable: they represent domain/refusal states the
//! service boundary maps onto its own status codes, not library
//! implementation details.

use thiserror::Error;

/// External error taxonomy.
///
/// Every [`UpdateError`] maps onto exactly one kind; the RPC layer turns
/// kinds into its status codes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// A build id the operation requires does not exist.
    NotFound,
    /// An identifier exists but is misused by the request.
    InvalidArgument,
    /// A per-queue cap would be exceeded.
    FailedPrecondition,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::FailedPrecondition => "failed_precondition",
        }
    }
}

/// Refusal states of the version-set mutation engine.
///
/// No partial mutation is ever observable behind one of these: the engine
/// either returns a fresh structure or this.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UpdateError {
    #[error("build id must not be empty")]
    EmptyBuildId,
    #[error("build id `{0}` is not an active member of any compatible set")]
    BuildIdNotFound(String),
    #[error("build id `{0}` already exists and cannot found a new default set")]
    BuildIdAlreadyExists(String),
    #[error("build id `{id}` already belongs to a different compatible set")]
    BuildIdInWrongSet { id: String },
    #[error("build id `{id}` already exists in its set with a different default configuration")]
    DefaultConflict { id: String },
    #[error("merge target `{0}` is not an active member of any compatible set")]
    MergeTargetNotFound(String),
    #[error("update would exceed the maximum of {limit} compatible sets")]
    MaxSetsExceeded { limit: usize },
    #[error("update would exceed the maximum of {limit} build ids")]
    MaxBuildIdsExceeded { limit: usize },
}

impl UpdateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UpdateError::BuildIdNotFound(_) => ErrorKind::NotFound,
            UpdateError::EmptyBuildId
            | UpdateError::BuildIdAlreadyExists(_)
            | UpdateError::BuildIdInWrongSet { .. }
            | UpdateError::DefaultConflict { .. }
            | UpdateError::MergeTargetNotFound(_) => ErrorKind::InvalidArgument,
            UpdateError::MaxSetsExceeded { .. } | UpdateError::MaxBuildIdsExceeded { .. } => {
                ErrorKind::FailedPrecondition
            }
        }
    }
}
