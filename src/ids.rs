//! Identifier generation for every entity instance.

use uuid::Uuid;

/// Returns a fresh random identifier rendered as a hyphenated UUID.
///
/// No counter is persisted; uniqueness rests on the 122 random bits of a
/// version 4 UUID.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
