//! Layer 0: Time primitives
//!
//! Hybrid logical clock for ordering version-set updates across clusters.
//! The mutation engine never reads a wall clock itself; callers obtain a
//! fresh value with [`HybridLogicalClock::next`] and pass it in.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// HLC timestamp - the ordering primitive for versioning updates.
///
/// Compares on (wall_clock, version) with cluster_id as final tiebreaker.
/// !Copy intentional - forces explicit .clone() to think about causality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HybridLogicalClock {
    /// Milliseconds since the Unix epoch.
    pub wall_clock: i64,
    /// Ties between updates within the same millisecond.
    pub version: i64,
    /// Identifies the cluster that produced the timestamp.
    pub cluster_id: i64,
}

impl HybridLogicalClock {
    /// The initial clock for a cluster: everything else compares greater.
    pub fn zero(cluster_id: i64) -> Self {
        Self {
            wall_clock: 0,
            version: 0,
            cluster_id,
        }
    }

    /// Generate a timestamp greater than `prev` given the current wall
    /// clock reading. Time never moves backwards: if `wall_ms` is not
    /// ahead of `prev`, the version counter advances instead.
    pub fn next(prev: &Self, wall_ms: i64) -> Self {
        if wall_ms > prev.wall_clock {
            Self {
                wall_clock: wall_ms,
                version: 0,
                cluster_id: prev.cluster_id,
            }
        } else {
            Self {
                wall_clock: prev.wall_clock,
                version: prev.version + 1,
                cluster_id: prev.cluster_id,
            }
        }
    }

    /// `next` against a live clock source.
    pub fn next_from(prev: &Self, source: &dyn WallClockSource) -> Self {
        Self::next(prev, source.now_ms())
    }

    /// The later of two timestamps.
    pub fn max(a: &Self, b: &Self) -> Self {
        if a >= b { a.clone() } else { b.clone() }
    }
}

impl PartialOrd for HybridLogicalClock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HybridLogicalClock {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wall_clock
            .cmp(&other.wall_clock)
            .then_with(|| self.version.cmp(&other.version))
            .then_with(|| self.cluster_id.cmp(&other.cluster_id))
    }
}

/// Wall clock reading - NOT an ordering primitive on its own.
pub trait WallClockSource: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// System time source for production callers.
pub struct SystemWallClockSource;

impl WallClockSource for SystemWallClockSource {
    fn now_ms(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic_with_cluster_tiebreak() {
        let a = HybridLogicalClock {
            wall_clock: 1,
            version: 5,
            cluster_id: 1,
        };
        let b = HybridLogicalClock {
            wall_clock: 2,
            version: 0,
            cluster_id: 1,
        };
        assert!(a < b);

        let c = HybridLogicalClock {
            wall_clock: 1,
            version: 6,
            cluster_id: 1,
        };
        assert!(a < c);

        let d = HybridLogicalClock {
            wall_clock: 1,
            version: 5,
            cluster_id: 2,
        };
        assert!(a < d);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn next_advances_wall_clock_and_resets_version() {
        let c0 = HybridLogicalClock::zero(1);
        let c1 = HybridLogicalClock::next(&c0, 100);
        assert_eq!(c1.wall_clock, 100);
        assert_eq!(c1.version, 0);
        assert_eq!(c1.cluster_id, 1);
        assert!(c0 < c1);
    }

    #[test]
    fn next_bumps_version_when_wall_clock_stalls() {
        let c0 = HybridLogicalClock::next(&HybridLogicalClock::zero(1), 100);
        let c1 = HybridLogicalClock::next(&c0, 100);
        assert_eq!(c1.wall_clock, 100);
        assert_eq!(c1.version, 1);
        assert!(c0 < c1);

        // Backwards wall clock is ignored.
        let c2 = HybridLogicalClock::next(&c1, 50);
        assert_eq!(c2.wall_clock, 100);
        assert_eq!(c2.version, 2);
        assert!(c1 < c2);
    }

    #[test]
    fn max_picks_later_timestamp() {
        let a = HybridLogicalClock::zero(1);
        let b = HybridLogicalClock::next(&a, 10);
        assert_eq!(HybridLogicalClock::max(&a, &b), b);
        assert_eq!(HybridLogicalClock::max(&b, &a), b);
    }

    #[test]
    fn serializes_as_flat_triple() {
        let clock = HybridLogicalClock {
            wall_clock: 42,
            version: 7,
            cluster_id: 3,
        };
        let json = serde_json::to_value(&clock).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"wall_clock": 42, "version": 7, "cluster_id": 3})
        );
    }
}
