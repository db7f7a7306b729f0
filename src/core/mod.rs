//! Core domain types for worker build-id compatibility
//!
//! Module hierarchy follows type dependency order:
//! - time: HLC primitives (Layer 0)
//! - hash: set identifier digests (Layer 1)
//! - version_set: BuildId, CompatibleVersionSet, VersioningData (Layer 2)
//! - limits: per-queue growth caps (Layer 2)
//! - update: mutation engine (Layer 3)
//! - tombstone: removal and compaction (Layer 4)
//! - project: public views and deltas (Layer 5)

pub mod hash;
pub mod limits;
pub mod project;
pub mod time;
pub mod tombstone;
pub mod update;
pub mod version_set;

pub use hash::{SET_ID_LEN, hash_build_id};
pub use limits::Limits;
pub use project::{
    BuildIdOrderingResponse, CompatibleVersionSummary, get_build_id_deltas,
    to_build_id_ordering_response,
};
pub use time::{HybridLogicalClock, SystemWallClockSource, WallClockSource};
pub use tombstone::{clear_tombstones, remove_build_ids};
pub use update::{VersionSetUpdate, update_version_sets};
pub use version_set::{
    BuildId, BuildIdState, CompatibleVersionSet, VersioningData, merge_set_ids,
};
