//! Layer 4: Tombstoning and compaction
//!
//! Removal is a two-step affair. `remove_build_ids` flips entries to
//! `Deleted` in place: the identifier stays reserved, delta extraction
//! can still surface the removal, and nothing about set ordering or
//! default timestamps moves. `clear_tombstones` is the explicit second
//! step that physically drops deleted entries and any set they empty.

use tracing::debug;

use super::time::HybridLogicalClock;
use super::version_set::{BuildIdState, VersioningData};

/// Tombstone every listed id that is currently active. Ids that are
/// unknown or already tombstoned are ignored. Pure; the input snapshot
/// is never touched.
pub fn remove_build_ids(
    clock: HybridLogicalClock,
    data: &VersioningData,
    build_ids: &[String],
) -> VersioningData {
    let mut next = data.clone();
    for id in build_ids {
        if let Some((set_idx, build_idx)) = next.find_active(id) {
            let entry = &mut next.version_sets[set_idx].build_ids[build_idx];
            entry.state = BuildIdState::Deleted;
            entry.state_update_timestamp = clock.clone();
            debug!(build_id = id.as_str(), "tombstoned build id");
        }
    }
    next
}

/// Physically drop every tombstoned entry; a set left with no entries is
/// dropped with them. Surviving timestamps and set ids are preserved.
/// Pure; the input snapshot is never touched.
pub fn clear_tombstones(data: &VersioningData) -> VersioningData {
    let mut next = data.clone();
    next.version_sets.retain_mut(|set| {
        set.build_ids.retain(|build| build.state.is_active());
        !set.build_ids.is_empty()
    });
    next
}
