//! Opaque node identifiers.
//!
//! Every tree node (area, sub-area, item, template) carries a [`NodeId`]
//! assigned once at creation and never reused. Identifiers are stable across
//! renames and reorders; equality is plain string equality.
//!
//! [`NodeId::generate`] guarantees process-level uniqueness: the wall-clock
//! millisecond discriminator is combined with a process-wide sequence counter
//! (two calls in the same tick cannot collide) and a random suffix (restarts
//! of the process cannot collide with stored identifiers in practice).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Stable, process-unique identifier for a tree or template node.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an existing identifier without validation.
    ///
    /// Used when adopting identifiers from cache or remote payloads; the
    /// normalizer replaces empty identifiers with generated ones.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier, unique within this process.
    #[must_use]
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let suffix: u64 = rand::random();
        Self(format!("{millis}-{seq:x}-{suffix:012x}"))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty (unassigned) identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::NodeId;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique_within_a_tick() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(NodeId::generate()), "collision");
        }
    }

    #[test]
    fn generated_ids_are_never_empty() {
        assert!(!NodeId::generate().is_empty());
    }

    #[test]
    fn serde_is_transparent() {
        let id = NodeId::new_unchecked("1712000000000-a-00000000beef");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"1712000000000-a-00000000beef\"");
        let back: NodeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn default_is_the_unassigned_id() {
        assert!(NodeId::default().is_empty());
    }
}
