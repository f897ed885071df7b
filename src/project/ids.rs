//! Object id generation.
//!
//! Ids are 24 upper-case hex characters, like the ones Xcode writes. They are
//! derived from the owning configuration list and the configuration name so
//! repeated runs against the same project produce the same file.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Length of an object id in hex characters
pub const OBJECT_ID_LEN: usize = 24;

/// Derive an id for configuration `name` in list `list_id` that does not
/// collide with any id in `taken`.
pub fn derive_object_id(list_id: &str, name: &str, taken: &HashSet<String>) -> String {
    let mut salt: u32 = 0;
    loop {
        let mut hasher = Sha256::new();
        hasher.update(list_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(name.as_bytes());
        if salt > 0 {
            hasher.update(salt.to_le_bytes());
        }
        let digest = hasher.finalize();
        let id = hex::encode_upper(&digest[..OBJECT_ID_LEN / 2]);
        if !taken.contains(&id) {
            return id;
        }
        salt += 1;
    }
}
