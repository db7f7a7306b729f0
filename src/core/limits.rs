//! Per-queue caps on versioning structure growth.

use serde::{Deserialize, Serialize};

use crate::error::UpdateError;

/// Caps applied before a mutation is allowed to grow the structure.
///
/// Zero means unlimited. Checks run only for operations that strictly
/// grow the respective count, so a no-op against a queue already at the
/// cap still succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of compatible sets.
    pub max_sets: usize,
    /// Maximum number of build ids, tombstones included.
    pub max_build_ids: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self::none()
    }
}

impl Limits {
    pub fn new(max_sets: usize, max_build_ids: usize) -> Self {
        Self {
            max_sets,
            max_build_ids,
        }
    }

    /// No caps at all.
    pub fn none() -> Self {
        Self {
            max_sets: 0,
            max_build_ids: 0,
        }
    }

    /// Reject a mutation that would leave `post` sets in place.
    pub fn check_sets(&self, post: usize) -> Result<(), UpdateError> {
        if self.max_sets > 0 && post > self.max_sets {
            return Err(UpdateError::MaxSetsExceeded {
                limit: self.max_sets,
            });
        }
        Ok(())
    }

    /// Reject a mutation that would leave `post` build ids in place.
    pub fn check_build_ids(&self, post: usize) -> Result<(), UpdateError> {
        if self.max_build_ids > 0 && post > self.max_build_ids {
            return Err(UpdateError::MaxBuildIdsExceeded {
                limit: self.max_build_ids,
            });
        }
        Ok(())
    }
}
