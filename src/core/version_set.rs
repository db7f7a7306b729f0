//! Layer 2: Versioning data model
//!
//! Two-level ordered structure: `VersioningData` holds compatible sets
//! from least-recent default to most-recent default (the last set is the
//! overall default), and each `CompatibleVersionSet` holds build ids from
//! oldest to newest (the last active entry is the set-internal default).
//!
//! All types are plain owned values. Mutation functions clone the
//! structure they transform; nothing here aliases caller state.

use serde::{Deserialize, Serialize};

use super::hash::hash_build_id;
use super::time::HybridLogicalClock;

/// Lifecycle state of a build id.
///
/// `Deleted` entries are tombstones: they keep the identifier reserved
/// and let delta extraction surface removals. Physical removal is a
/// separate compaction step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildIdState {
    Active,
    Deleted,
}

impl BuildIdState {
    pub fn is_active(self) -> bool {
        matches!(self, BuildIdState::Active)
    }
}

/// A worker build identifier inside a compatible set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildId {
    pub id: String,
    pub state: BuildIdState,
    pub state_update_timestamp: HybridLogicalClock,
}

impl BuildId {
    pub fn new_active(id: impl Into<String>, clock: HybridLogicalClock) -> Self {
        Self {
            id: id.into(),
            state: BuildIdState::Active,
            state_update_timestamp: clock,
        }
    }
}

/// An ordered group of mutually compatible build ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibleVersionSet {
    /// Digests that have ever named this set. Grows on merge, never
    /// shrinks: the founding digest stays a member forever so stale
    /// routing handles keep resolving.
    pub set_ids: Vec<String>,
    /// Oldest to newest. The last active entry is the internal default.
    pub build_ids: Vec<BuildId>,
    /// Advanced when the internal default or the set's position changes.
    pub default_update_timestamp: HybridLogicalClock,
}

impl CompatibleVersionSet {
    /// A brand-new set founded by `build_id`.
    pub fn founding(build_id: impl Into<String>, clock: HybridLogicalClock) -> Self {
        let build_id = build_id.into();
        Self {
            set_ids: vec![hash_build_id(&build_id)],
            build_ids: vec![BuildId::new_active(build_id, clock.clone())],
            default_update_timestamp: clock,
        }
    }

    /// Index of the set-internal default: the last active entry.
    pub fn default_build_index(&self) -> Option<usize> {
        self.build_ids.iter().rposition(|b| b.state.is_active())
    }

    /// The set-internal default build id, if any entry is still active.
    pub fn default_build_id(&self) -> Option<&BuildId> {
        self.default_build_index().map(|i| &self.build_ids[i])
    }

    pub fn position_of(&self, build_id: &str) -> Option<usize> {
        self.build_ids.iter().position(|b| b.id == build_id)
    }
}

/// The full per-queue versioning structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersioningData {
    /// Least-recent default first; the last set is the overall default.
    pub version_sets: Vec<CompatibleVersionSet>,
    /// Advanced when the identity of the last set changes.
    pub default_update_timestamp: HybridLogicalClock,
}

impl VersioningData {
    /// An empty structure stamped with `clock`.
    pub fn new(clock: HybridLogicalClock) -> Self {
        Self {
            version_sets: Vec::new(),
            default_update_timestamp: clock,
        }
    }

    /// Locate `build_id` as an active member: (set index, entry index).
    pub fn find_active(&self, build_id: &str) -> Option<(usize, usize)> {
        self.version_sets.iter().enumerate().find_map(|(si, set)| {
            set.build_ids
                .iter()
                .position(|b| b.id == build_id && b.state.is_active())
                .map(|bi| (si, bi))
        })
    }

    /// Locate `build_id` in any state, tombstones included.
    pub fn find_any(&self, build_id: &str) -> Option<(usize, usize)> {
        self.version_sets.iter().enumerate().find_map(|(si, set)| {
            set.position_of(build_id).map(|bi| (si, bi))
        })
    }

    /// Total build id count, tombstones included.
    pub fn build_id_count(&self) -> usize {
        self.version_sets.iter().map(|s| s.build_ids.len()).sum()
    }

    /// The overall default set, if any.
    pub fn default_set(&self) -> Option<&CompatibleVersionSet> {
        self.version_sets.last()
    }
}

/// Duplicate-free, stably sorted union of two set-id sequences.
///
/// Merged sets keep every digest either side ever answered to.
pub fn merge_set_ids(a: &[String], b: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = a.iter().chain(b.iter()).cloned().collect();
    merged.sort();
    merged.dedup();
    merged
}
