//! One file's simulated upload, driven tick by tick.
//!
//! An [`UploadTask`] owns the file's bytes and its progress source. The
//! caller decides when ticks happen (a browser timer, a CLI loop, a
//! test) and feeds each one the session:
//!
//! ```rust
//! # use dropzone_core::{FileHandle, InMemoryStore, Session, TickOutcome};
//! let mut session = Session::with_default_config(InMemoryStore::new());
//! let handle = FileHandle::from_bytes("a.txt", Some("text/plain"), b"hello".to_vec());
//! for mut task in session.select_files(vec![handle]) {
//!     loop {
//!         match task.tick(&mut session) {
//!             TickOutcome::InFlight(_) => continue,
//!             TickOutcome::Finished => {
//!                 task.complete(&mut session);
//!                 break;
//!             }
//!             TickOutcome::Orphaned => break,
//!         }
//!     }
//! }
//! assert_eq!(session.files().next().and_then(|f| f.text()), Some("hello"));
//! ```
//!
//! Deleting the file at any point turns the remaining ticks and the
//! completion into no-ops. Completing before a tick has reported
//! [`TickOutcome::Finished`] writes nothing.

use tracing::{debug, warn};

use crate::id::FileId;
use crate::media::{MediaCategory, MediaType};
use crate::progress::ProgressSource;
use crate::session::{PreviewStore, Session};
use crate::types::{DecodeError, FileHandle, Progress};

/// UTF-8 byte order mark, stripped before decoding.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Result of one [`UploadTask::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The reading was applied; keep ticking.
    InFlight(Progress),
    /// The transfer reached 100%. Stop ticking and call
    /// [`UploadTask::complete`].
    Finished,
    /// The file was deleted. Stop ticking and drop the task.
    Orphaned,
}

/// Result of [`UploadTask::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The file now holds progress 100 and its preview data.
    Completed,
    /// The file was deleted before completion; nothing was written.
    Orphaned,
    /// The file had already completed; nothing was written.
    AlreadyComplete,
    /// No tick has reported [`TickOutcome::Finished`] yet; nothing was
    /// written and the task can keep ticking.
    NotFinished,
}

/// An in-flight upload of one accepted file.
#[derive(Debug)]
#[must_use = "an upload task does nothing until it is ticked"]
pub struct UploadTask<P> {
    id: FileId,
    name: String,
    media_type: MediaType,
    payload: Vec<u8>,
    source: P,
    finished: bool,
}

impl<P: ProgressSource> UploadTask<P> {
    pub(crate) fn new(id: FileId, handle: FileHandle, source: P) -> Self {
        Self {
            id,
            name: handle.name,
            media_type: handle.media_type,
            payload: handle.payload,
            source,
            finished: false,
        }
    }

    /// The file this task uploads.
    #[must_use]
    pub const fn id(&self) -> FileId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pull one reading from the progress source and apply it.
    ///
    /// Once a tick has returned [`TickOutcome::Finished`] the source is
    /// never polled again.
    pub fn tick<S: PreviewStore>(&mut self, session: &mut Session<S>) -> TickOutcome {
        if self.finished {
            return TickOutcome::Finished;
        }
        let reading = self.source.next_progress();
        let outcome = session.apply_progress(self.id, reading);
        if outcome == TickOutcome::Finished {
            self.finished = true;
        }
        outcome
    }

    /// Run the completion step once the transfer has finished.
    ///
    /// Text files are decoded first; a decode failure only means the
    /// file completes without text. The result is written only if the
    /// file is still tracked. The payload is dropped once written, and
    /// later calls report [`Completion::AlreadyComplete`].
    pub fn complete<S: PreviewStore>(&mut self, session: &mut Session<S>) -> Completion {
        if session.file(self.id).is_none() {
            return Completion::Orphaned;
        }
        if !self.finished {
            debug!(id = %self.id, "completion before transfer finished ignored");
            return Completion::NotFinished;
        }

        let text = if self.media_type.category() == MediaCategory::Text {
            match decode_text(&self.payload) {
                Ok(text) => Some(text),
                Err(err) => {
                    warn!(
                        id = %self.id,
                        file = %self.name,
                        error = %err,
                        "completing without text preview"
                    );
                    None
                }
            }
        } else {
            None
        };

        let completion = session.finalize(self.id, &self.payload, &self.media_type, text);
        if completion == Completion::Completed {
            self.payload = Vec::new();
        }
        completion
    }

    /// Tick until the transfer finishes, then complete.
    ///
    /// Returns the completion and the number of ticks taken. Used where
    /// there is no timer to wait on (the CLI and tests).
    pub fn run_to_completion<S: PreviewStore>(
        mut self,
        session: &mut Session<S>,
    ) -> (Completion, u32) {
        let mut ticks = 0;
        loop {
            ticks += 1;
            match self.tick(session) {
                TickOutcome::InFlight(_) => {}
                TickOutcome::Finished => return (self.complete(session), ticks),
                TickOutcome::Orphaned => return (Completion::Orphaned, ticks),
            }
        }
    }
}

/// Decode file bytes as UTF-8 text.
///
/// A leading byte order mark is dropped.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidUtf8`] if the bytes are not valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String, DecodeError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(body.to_vec()).map_err(|e| DecodeError::InvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}
