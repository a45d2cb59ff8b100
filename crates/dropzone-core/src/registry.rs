//! Ordered registry of tracked files.
//!
//! Insertion order is preserved (oldest first). Every mutation replaces
//! a whole entity by identifier, so a reader between two mutations
//! always sees consistent entities.

use crate::id::FileId;
use crate::types::{FileEntity, PreviewUrl, Progress, RegistryError};

/// Result of [`Registry::update_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The entity was replaced with the new reading.
    Applied,
    /// No entity with this identifier (deleted mid-upload). Nothing changed.
    Missing,
    /// The entity already completed and is immutable. Nothing changed.
    Frozen,
    /// The reading was lower than the current progress. Nothing changed.
    Stale,
}

/// The ordered collection of all tracked files.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Registry {
    entries: Vec<FileEntity>,
}

impl Registry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a new entity.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if an entity with the same
    /// identifier is already tracked.
    pub fn add(&mut self, entity: FileEntity) -> Result<(), RegistryError> {
        if self.contains(entity.id()) {
            return Err(RegistryError::DuplicateId(entity.id()));
        }
        self.entries.push(entity);
        Ok(())
    }

    /// Replace the entity at `id` with a copy at `progress`.
    ///
    /// `preview` and `text` are stored only when `progress` is complete.
    /// Completed entities are never touched again, and progress never
    /// moves backwards.
    pub fn update_progress(
        &mut self,
        id: FileId,
        progress: Progress,
        preview: Option<PreviewUrl>,
        text: Option<String>,
    ) -> UpdateOutcome {
        let Some(slot) = self.entries.iter_mut().find(|e| e.id() == id) else {
            return UpdateOutcome::Missing;
        };
        if slot.is_complete() {
            return UpdateOutcome::Frozen;
        }
        if progress < slot.progress() {
            return UpdateOutcome::Stale;
        }
        *slot = slot.advanced(progress, preview, text);
        UpdateOutcome::Applied
    }

    /// Remove and return the entity at `id`.
    ///
    /// The caller owns the returned entity's preview handle and must
    /// release it.
    pub fn remove(&mut self, id: FileId) -> Option<FileEntity> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: FileId) -> Option<&FileEntity> {
        self.entries.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: FileId) -> bool {
        self.get(id).is_some()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntity> {
        self.entries.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
