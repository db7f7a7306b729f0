//! Layer 1: Set identifier hashing
//!
//! A compatible set is named by the digest of the build id that created
//! it. The digest is part of the persisted format, so the algorithm is
//! frozen: SHA-256, url-safe base64 without padding, first 20 characters.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

/// Length of a set identifier digest.
pub const SET_ID_LEN: usize = 20;

/// Canonical digest of a build id, used as a set identifier.
///
/// Frozen. Changing this orphans every persisted set id.
pub fn hash_build_id(build_id: &str) -> String {
    let digest = Sha256::digest(build_id.as_bytes());
    let mut encoded = URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(SET_ID_LEN);
    encoded
}
