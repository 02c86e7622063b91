//! Collision-resistant conversation identifiers.

use uuid::Uuid;

/// Build a candidate conversation identifier.
///
/// UUID v7 contributes a millisecond timestamp plus random bits; the
/// caller's pseudo is appended for traceability in logs. Uniqueness
/// against live conversations is enforced by the store's create loop,
/// not here.
#[must_use]
pub fn conversation_id(pseudo: &str) -> String {
    format!("{}{pseudo}", Uuid::now_v7().as_simple())
}
