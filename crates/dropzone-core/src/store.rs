//! In-memory [`PreviewStore`] that keeps an allocation ledger.
//!
//! Used by the native CLI (where there are no object URLs) and by tests
//! to check that every preview handle is released exactly once.

use std::collections::HashMap;

use crate::media::MediaType;
use crate::session::PreviewStore;
use crate::types::{PreviewError, PreviewUrl};

/// Preview store backed by a map of live handles.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    issued: u64,
    live: HashMap<PreviewUrl, Vec<u8>>,
    allocated: u64,
    released: u64,
    double_releases: u64,
    fail_allocations: bool,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every allocation fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_allocations: true,
            ..Self::default()
        }
    }

    /// Handles allocated and not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub const fn allocated(&self) -> u64 {
        self.allocated
    }

    #[must_use]
    pub const fn released(&self) -> u64 {
        self.released
    }

    /// Releases of handles that were not live (already released or
    /// never issued by this store).
    #[must_use]
    pub const fn double_releases(&self) -> u64 {
        self.double_releases
    }

    #[must_use]
    pub fn is_live(&self, url: &PreviewUrl) -> bool {
        self.live.contains_key(url)
    }

    /// Bytes behind a live handle.
    #[must_use]
    pub fn contents(&self, url: &PreviewUrl) -> Option<&[u8]> {
        self.live.get(url).map(Vec::as_slice)
    }
}

impl PreviewStore for InMemoryStore {
    fn allocate(
        &mut self,
        payload: &[u8],
        media_type: &MediaType,
    ) -> Result<PreviewUrl, PreviewError> {
        if self.fail_allocations {
            let reason = "in-memory store refuses allocations".to_owned();
            return Err(PreviewError::Allocation(reason));
        }
        self.issued += 1;
        let url = PreviewUrl::new(format!("mem://{}/{media_type}", self.issued));
        self.live.insert(url.clone(), payload.to_vec());
        self.allocated += 1;
        Ok(url)
    }

    fn release(&mut self, url: PreviewUrl) {
        if self.live.remove(&url).is_some() {
            self.released += 1;
        } else {
            self.double_releases += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn allocate_issues_distinct_live_handles() {
        let mut store = InMemoryStore::new();
        let png = MediaType::new("image/png");
        let a = store.allocate(b"a", &png).unwrap();
        let b = store.allocate(b"b", &png).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.live(), 2);
        assert_eq!(store.contents(&a), Some(&b"a"[..]));
    }

    #[test]
    fn release_is_counted_once() {
        let mut store = InMemoryStore::new();
        let url = store.allocate(b"a", &MediaType::new("text/plain")).unwrap();
        store.release(url.clone());
        store.release(url.clone());
        assert!(!store.is_live(&url));
        assert_eq!(store.released(), 1);
        assert_eq!(store.double_releases(), 1);
    }

    #[test]
    fn failing_store_allocates_nothing() {
        let mut store = InMemoryStore::failing();
        assert!(store.allocate(b"a", &MediaType::new("image/png")).is_err());
        assert_eq!(store.allocated(), 0);
    }
}
