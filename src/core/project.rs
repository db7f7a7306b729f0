//! Layer 5: Query and projection
//!
//! Read-side views over `VersioningData` snapshots: the trimmed public
//! ordering response consumed by task dispatch, and live-id deltas
//! between two snapshots for cache invalidation.

use serde::{Deserialize, Serialize};

use super::version_set::VersioningData;

/// One compatible set as exposed to users: active build ids only, in
/// storage order (internal default last).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibleVersionSummary {
    pub build_ids: Vec<String>,
}

/// The user-visible ordering view. Sets run from least-recent default to
/// most-recent default; the last entry is the overall default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildIdOrderingResponse {
    pub major_version_sets: Vec<CompatibleVersionSummary>,
}

/// Project a snapshot to the public view. Tombstoned entries are
/// omitted, as is any set with no active entries left. `max_depth > 0`
/// keeps only the last `max_depth` sets (the most recent defaults);
/// zero means everything.
pub fn to_build_id_ordering_response(
    data: &VersioningData,
    max_depth: usize,
) -> BuildIdOrderingResponse {
    let mut entries = Vec::with_capacity(data.version_sets.len());
    for set in &data.version_sets {
        let build_ids: Vec<String> = set
            .build_ids
            .iter()
            .filter(|b| b.state.is_active())
            .map(|b| b.id.clone())
            .collect();
        if !build_ids.is_empty() {
            entries.push(CompatibleVersionSummary { build_ids });
        }
    }
    if max_depth > 0 && entries.len() > max_depth {
        entries.drain(..entries.len() - max_depth);
    }
    BuildIdOrderingResponse {
        major_version_sets: entries,
    }
}

/// Diff two snapshots by live build id.
///
/// `added` holds ids active in `curr` but absent or tombstoned in
/// `prev`; `removed` the reverse. `None` counts as an empty snapshot.
/// Entries follow storage iteration order of the snapshot they came
/// from: `curr` for added, `prev` for removed.
pub fn get_build_id_deltas(
    prev: Option<&VersioningData>,
    curr: Option<&VersioningData>,
) -> (Vec<String>, Vec<String>) {
    let mut added = Vec::new();
    let mut removed = Vec::new();

    if let Some(prev_data) = prev {
        for set in &prev_data.version_sets {
            for build in set.build_ids.iter().filter(|b| b.state.is_active()) {
                let still_active = curr.is_some_and(|c| c.find_active(&build.id).is_some());
                if !still_active {
                    removed.push(build.id.clone());
                }
            }
        }
    }
    if let Some(curr_data) = curr {
        for set in &curr_data.version_sets {
            for build in set.build_ids.iter().filter(|b| b.state.is_active()) {
                let was_active = prev.is_some_and(|p| p.find_active(&build.id).is_some());
                if !was_active {
                    added.push(build.id.clone());
                }
            }
        }
    }
    (added, removed)
}
