//! Layer 3: Mutation engine
//!
//! Deterministic application of a single compatibility update onto a
//! `VersioningData` snapshot. Copy-on-write: the input is never touched,
//! success returns a freshly built structure, failure returns an error
//! and nothing else. Callers serialize writes externally and retry under
//! optimistic concurrency; this layer is pure.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::limits::Limits;
use super::time::HybridLogicalClock;
use super::version_set::{BuildId, CompatibleVersionSet, VersioningData, merge_set_ids};
use crate::error::UpdateError;

/// A single compatibility mutation. Exactly one intent per request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSetUpdate {
    /// Found a brand-new set containing only this id and make it the
    /// overall default.
    AddNewBuildIdInNewDefaultSet(String),
    /// Add a new id to the set containing an existing one, making the new
    /// id that set's internal default.
    AddNewCompatibleBuildId {
        new_build_id: String,
        existing_compatible_build_id: String,
        make_set_default: bool,
    },
    /// Move the set containing this id to the overall-default position.
    PromoteSetByBuildId(String),
    /// Move this id to the internal-default position within its set.
    PromoteBuildIdWithinSet(String),
    /// Declare two sets mutually compatible. The primary's lineage wins
    /// the internal default and the merged set takes the primary's slot.
    MergeSets {
        primary_set_build_id: String,
        secondary_set_build_id: String,
    },
}

/// Apply `update` to `data` at time `clock`.
///
/// Operations that find the structure already in the requested state
/// return it unchanged, timestamps included; callers treat timestamp
/// movement as a change signal. Caps are enforced before mutation and
/// only for operations that strictly grow the capped count.
pub fn update_version_sets(
    clock: HybridLogicalClock,
    data: &VersioningData,
    update: &VersionSetUpdate,
    limits: &Limits,
) -> Result<VersioningData, UpdateError> {
    match update {
        VersionSetUpdate::AddNewBuildIdInNewDefaultSet(build_id) => {
            add_new_default_set(clock, data, build_id, limits)
        }
        VersionSetUpdate::AddNewCompatibleBuildId {
            new_build_id,
            existing_compatible_build_id,
            make_set_default,
        } => add_compatible_build_id(
            clock,
            data,
            new_build_id,
            existing_compatible_build_id,
            *make_set_default,
            limits,
        ),
        VersionSetUpdate::PromoteSetByBuildId(build_id) => {
            promote_set_by_build_id(clock, data, build_id)
        }
        VersionSetUpdate::PromoteBuildIdWithinSet(build_id) => {
            promote_build_id_within_set(clock, data, build_id)
        }
        VersionSetUpdate::MergeSets {
            primary_set_build_id,
            secondary_set_build_id,
        } => merge_sets(clock, data, primary_set_build_id, secondary_set_build_id),
    }
}

fn add_new_default_set(
    clock: HybridLogicalClock,
    data: &VersioningData,
    build_id: &str,
    limits: &Limits,
) -> Result<VersioningData, UpdateError> {
    if build_id.is_empty() {
        return Err(UpdateError::EmptyBuildId);
    }
    if data.find_any(build_id).is_some() {
        // Re-requesting the current state is fine; repurposing an
        // existing id into a new set is not.
        if let Some(last) = data.version_sets.last()
            && last.build_ids.len() == 1
            && last.build_ids[0].id == build_id
        {
            debug!(build_id, "new default set already in place");
            return Ok(data.clone());
        }
        return Err(UpdateError::BuildIdAlreadyExists(build_id.to_string()));
    }
    limits.check_sets(data.version_sets.len() + 1)?;
    limits.check_build_ids(data.build_id_count() + 1)?;

    let mut next = data.clone();
    next.version_sets
        .push(CompatibleVersionSet::founding(build_id, clock.clone()));
    next.default_update_timestamp = clock;
    debug!(build_id, "founded new default version set");
    Ok(next)
}

fn add_compatible_build_id(
    clock: HybridLogicalClock,
    data: &VersioningData,
    new_build_id: &str,
    existing_compatible_build_id: &str,
    make_set_default: bool,
    limits: &Limits,
) -> Result<VersioningData, UpdateError> {
    if new_build_id.is_empty() {
        return Err(UpdateError::EmptyBuildId);
    }
    let (set_idx, _) = data
        .find_active(existing_compatible_build_id)
        .ok_or_else(|| UpdateError::BuildIdNotFound(existing_compatible_build_id.to_string()))?;

    if let Some((extant_set, extant_idx)) = data.find_any(new_build_id) {
        if extant_set != set_idx {
            return Err(UpdateError::BuildIdInWrongSet {
                id: new_build_id.to_string(),
            });
        }
        let set = &data.version_sets[set_idx];
        let is_internal_default = set.default_build_index() == Some(extant_idx);
        let is_overall_default = set_idx == data.version_sets.len() - 1;
        if is_internal_default && make_set_default == is_overall_default {
            debug!(build_id = new_build_id, "compatibility already in place");
            return Ok(data.clone());
        }
        return Err(UpdateError::DefaultConflict {
            id: new_build_id.to_string(),
        });
    }
    limits.check_build_ids(data.build_id_count() + 1)?;

    let mut next = data.clone();
    let set = &mut next.version_sets[set_idx];
    set.build_ids
        .push(BuildId::new_active(new_build_id, clock.clone()));
    set.default_update_timestamp = clock.clone();
    debug!(
        build_id = new_build_id,
        compatible_with = existing_compatible_build_id,
        "added compatible build id"
    );

    if make_set_default {
        let last = next.version_sets.len() - 1;
        if set_idx != last {
            let set = next.version_sets.remove(set_idx);
            next.version_sets.push(set);
        }
        next.default_update_timestamp = clock;
    }
    Ok(next)
}

fn promote_set_by_build_id(
    clock: HybridLogicalClock,
    data: &VersioningData,
    build_id: &str,
) -> Result<VersioningData, UpdateError> {
    let (set_idx, _) = data
        .find_active(build_id)
        .ok_or_else(|| UpdateError::BuildIdNotFound(build_id.to_string()))?;
    if set_idx == data.version_sets.len() - 1 {
        return Ok(data.clone());
    }

    let mut next = data.clone();
    let mut set = next.version_sets.remove(set_idx);
    set.default_update_timestamp = clock.clone();
    next.version_sets.push(set);
    next.default_update_timestamp = clock;
    debug!(build_id, "promoted set to overall default");
    Ok(next)
}

fn promote_build_id_within_set(
    clock: HybridLogicalClock,
    data: &VersioningData,
    build_id: &str,
) -> Result<VersioningData, UpdateError> {
    let (set_idx, build_idx) = data
        .find_active(build_id)
        .ok_or_else(|| UpdateError::BuildIdNotFound(build_id.to_string()))?;
    if data.version_sets[set_idx].default_build_index() == Some(build_idx) {
        return Ok(data.clone());
    }

    let mut next = data.clone();
    let set = &mut next.version_sets[set_idx];
    let entry = set.build_ids.remove(build_idx);
    set.build_ids.push(entry);
    set.default_update_timestamp = clock;
    debug!(build_id, "promoted build id within its set");
    Ok(next)
}

fn merge_sets(
    clock: HybridLogicalClock,
    data: &VersioningData,
    primary_set_build_id: &str,
    secondary_set_build_id: &str,
) -> Result<VersioningData, UpdateError> {
    if primary_set_build_id.is_empty() || secondary_set_build_id.is_empty() {
        return Err(UpdateError::EmptyBuildId);
    }
    let (primary_idx, _) = data
        .find_active(primary_set_build_id)
        .ok_or_else(|| UpdateError::MergeTargetNotFound(primary_set_build_id.to_string()))?;
    let (secondary_idx, _) = data
        .find_active(secondary_set_build_id)
        .ok_or_else(|| UpdateError::MergeTargetNotFound(secondary_set_build_id.to_string()))?;
    if primary_idx == secondary_idx {
        // Already merged; re-issuing the request must not disturb
        // ordering or timestamps.
        return Ok(data.clone());
    }

    let mut next = data.clone();
    let secondary = next.version_sets.remove(secondary_idx);
    let primary_idx = if secondary_idx < primary_idx {
        primary_idx - 1
    } else {
        primary_idx
    };
    // The merged set takes the primary's slot, so the overall default
    // only changes if the primary already was it. The secondary's entries
    // go first: the primary's internal default stays the tail.
    let primary = &mut next.version_sets[primary_idx];
    primary.set_ids = merge_set_ids(&primary.set_ids, &secondary.set_ids);
    let mut merged_builds = secondary.build_ids;
    merged_builds.append(&mut primary.build_ids);
    primary.build_ids = merged_builds;
    primary.default_update_timestamp = clock;
    debug!(
        primary = primary_set_build_id,
        secondary = secondary_set_build_id,
        "merged compatible sets"
    );
    Ok(next)
}
