//! File identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a tracked file.
///
/// Unique within a session: identifiers come from a monotonically
/// increasing [`IdGenerator`] and are never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(u64);

impl FileId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

/// Hands out fresh [`FileId`]s, starting at 1.
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: u64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Next unused identifier.
    pub const fn next_id(&mut self) -> FileId {
        self.issued += 1;
        FileId(self.issued)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut ids = IdGenerator::new();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(ids.next_id()));
        }
    }

    #[test]
    fn ids_start_at_one() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_id(), FileId::new(1));
        assert_eq!(ids.next_id(), FileId::new(2));
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(FileId::new(7).to_string(), "file-7");
    }
}
