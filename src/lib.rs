#![forbid(unsafe_code)]

//! Worker build-id compatibility (version set) management.
//!
//! Tracks which worker build ids may run continuations of each other's
//! workflows on a task queue. Build ids group into ordered compatible
//! sets; the last set is the overall default and each set's last active
//! entry is its internal default. Everything here is pure: mutations are
//! copy-on-write transformers over snapshots, and persistence,
//! concurrency control, and dispatch live with the caller.

pub mod core;
pub mod error;

pub use error::{ErrorKind, UpdateError};
pub type Result<T> = std::result::Result<T, UpdateError>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    BuildId, BuildIdOrderingResponse, BuildIdState, CompatibleVersionSet,
    CompatibleVersionSummary, HybridLogicalClock, Limits, SET_ID_LEN, SystemWallClockSource,
    VersionSetUpdate, VersioningData, WallClockSource, clear_tombstones, get_build_id_deltas,
    hash_build_id, merge_set_ids, remove_build_ids, to_build_id_ordering_response,
    update_version_sets,
};
