//! The upload session: single owner of all mutable upload state.
//!
//! A [`Session`] holds the registry, the error slot, the identifier
//! generator, the configuration and the preview store. Everything that
//! mutates upload state goes through `&mut Session`, so there is
//! exactly one writer. In the browser the session lives in one Dioxus
//! signal; on native it is a plain local.

use tracing::{debug, info, warn};

use crate::error_slot::{ErrorSlot, UploadError};
use crate::format::now_utc;
use crate::id::{FileId, IdGenerator};
use crate::media::MediaType;
use crate::progress::{ProgressSource, SimulatedProgress, StepRange};
use crate::registry::{Registry, UpdateOutcome};
use crate::types::{
    ConfigError, FileEntity, FileHandle, PreviewError, PreviewUrl, Progress, UploadConfig,
};
use crate::upload::{Completion, TickOutcome, UploadTask};
use crate::validate::validate;

/// Allocates and releases preview handles for completed files.
pub trait PreviewStore {
    /// Produce a previewable handle for `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Allocation`] if the handle cannot be
    /// created. The file then completes without a preview.
    fn allocate(
        &mut self,
        payload: &[u8],
        media_type: &MediaType,
    ) -> Result<PreviewUrl, PreviewError>;

    /// Free a handle previously returned by [`allocate`](Self::allocate).
    fn release(&mut self, url: PreviewUrl);
}

/// All upload state for one page lifetime.
#[derive(Debug)]
pub struct Session<S> {
    registry: Registry,
    errors: ErrorSlot,
    ids: IdGenerator,
    config: UploadConfig,
    steps: StepRange,
    store: S,
}

impl<S: PreviewStore> Session<S> {
    /// Create a session with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails
    /// [`UploadConfig::validate`].
    pub fn new(config: UploadConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let steps = StepRange::from_config(&config)?;
        Ok(Self {
            registry: Registry::new(),
            errors: ErrorSlot::new(),
            ids: IdGenerator::new(),
            config,
            steps,
            store,
        })
    }

    /// Create a session with [`UploadConfig::default`].
    #[must_use]
    pub fn with_default_config(store: S) -> Self {
        Self {
            registry: Registry::new(),
            errors: ErrorSlot::new(),
            ids: IdGenerator::new(),
            config: UploadConfig::default(),
            steps: StepRange::default(),
            store,
        }
    }

    /// Ingest selected files with entropy-seeded simulated transfers.
    ///
    /// See [`select_files_with`](Self::select_files_with).
    pub fn select_files(
        &mut self,
        handles: Vec<FileHandle>,
    ) -> Vec<UploadTask<SimulatedProgress>> {
        let steps = self.steps;
        self.select_files_with(handles, |_| SimulatedProgress::from_entropy(steps))
    }

    /// Ingest selected files, creating one entity and one task per
    /// accepted file.
    ///
    /// Each file is checked against the acceptance filter. Accepted
    /// files are appended to the registry at zero progress and get an
    /// [`UploadTask`] whose progress comes from `make_source`. Rejected
    /// files are not tracked; the error slot shows the last rejection.
    pub fn select_files_with<P, F>(
        &mut self,
        handles: Vec<FileHandle>,
        mut make_source: F,
    ) -> Vec<UploadTask<P>>
    where
        P: ProgressSource,
        F: FnMut(FileId) -> P,
    {
        let mut tasks = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Err(err) = validate(&handle, &self.config) {
                warn!(file = %handle.name, error = %err, "rejected selection");
                self.errors.set(UploadError::from(&err));
                continue;
            }

            let id = self.ids.next_id();
            let entity = FileEntity::new(id, &handle, now_utc());
            if let Err(err) = self.registry.add(entity) {
                // Unreachable with a monotonic id generator; skip rather than clobber.
                warn!(%id, error = %err, "failed to register selection");
                continue;
            }
            info!(
                %id,
                file = %handle.name,
                size = handle.size,
                media_type = %handle.media_type,
                "accepted selection"
            );
            tasks.push(UploadTask::new(id, handle, make_source(id)));
        }
        tasks
    }

    /// Remove a file and release its preview handle.
    ///
    /// Returns `false` if no such file is tracked.
    pub fn delete_file(&mut self, id: FileId) -> bool {
        let Some(entity) = self.registry.remove(id) else {
            debug!(%id, "delete of untracked file ignored");
            return false;
        };
        debug!(%id, file = entity.name(), progress = %entity.progress(), "deleted file");
        if let Some(url) = entity.into_preview() {
            self.store.release(url);
        }
        true
    }

    /// Tracked files, oldest first.
    pub fn files(&self) -> impl Iterator<Item = &FileEntity> {
        self.registry.iter()
    }

    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&FileEntity> {
        self.registry.get(id)
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The currently displayed error.
    #[must_use]
    pub const fn error(&self) -> Option<&UploadError> {
        self.errors.current()
    }

    /// Display `error`, replacing the current one.
    pub fn report_error(&mut self, error: UploadError) {
        self.errors.set(error);
    }

    pub fn dismiss_error(&mut self) {
        self.errors.dismiss();
    }

    #[must_use]
    pub const fn config(&self) -> &UploadConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Apply one in-flight reading.
    ///
    /// A complete reading is not written here: completion goes through
    /// [`finalize`](Self::finalize) so progress, preview and text land
    /// together. A reading below the stored one is dropped and the
    /// stored progress is reported instead.
    pub(crate) fn apply_progress(&mut self, id: FileId, progress: Progress) -> TickOutcome {
        if !self.registry.contains(id) {
            debug!(%id, "tick for deleted file ignored");
            return TickOutcome::Orphaned;
        }
        if progress.is_complete() {
            return TickOutcome::Finished;
        }
        match self.registry.update_progress(id, progress, None, None) {
            UpdateOutcome::Applied => TickOutcome::InFlight(progress),
            UpdateOutcome::Stale => {
                let current = self.registry.get(id).map_or(progress, FileEntity::progress);
                TickOutcome::InFlight(current)
            }
            UpdateOutcome::Missing => TickOutcome::Orphaned,
            UpdateOutcome::Frozen => TickOutcome::Finished,
        }
    }

    /// Complete the file at `id`: allocate its preview handle and write
    /// progress 100, the handle and `text` in a single replace.
    ///
    /// Does nothing (and allocates nothing) if the file was deleted or
    /// has already completed.
    pub(crate) fn finalize(
        &mut self,
        id: FileId,
        payload: &[u8],
        media_type: &MediaType,
        text: Option<String>,
    ) -> Completion {
        match self.registry.get(id) {
            None => {
                debug!(%id, "completion for deleted file ignored");
                return Completion::Orphaned;
            }
            Some(entity) if entity.is_complete() => return Completion::AlreadyComplete,
            Some(_) => {}
        }

        let preview = match self.store.allocate(payload, media_type) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(%id, error = %err, "completing without preview");
                None
            }
        };

        match self
            .registry
            .update_progress(id, Progress::COMPLETE, preview.clone(), text)
        {
            UpdateOutcome::Applied => {
                debug!(%id, "upload complete");
                Completion::Completed
            }
            outcome => {
                // The checks above make this unreachable; never leak the handle.
                if let Some(url) = preview {
                    self.store.release(url);
                }
                if outcome == UpdateOutcome::Missing {
                    Completion::Orphaned
                } else {
                    Completion::AlreadyComplete
                }
            }
        }
    }
}
