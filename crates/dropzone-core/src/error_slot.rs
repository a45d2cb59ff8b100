//! User-visible upload errors and the single-slot error display.

use serde::{Deserialize, Serialize};

use crate::types::SelectionError;

/// An error shown to the user, optionally naming the file it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadError {
    /// What went wrong.
    pub message: String,
    /// The file it pertains to, if any.
    pub file: Option<String>,
}

impl UploadError {
    /// An error not tied to a particular file.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
        }
    }

    /// An error about `file`.
    #[must_use]
    pub fn for_file(message: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: Some(file.into()),
        }
    }
}

impl From<&SelectionError> for UploadError {
    fn from(err: &SelectionError) -> Self {
        Self::for_file(err.to_string(), err.file_name())
    }
}

/// Holds at most one displayed error. Newer errors replace older ones.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorSlot(Option<UploadError>);

impl ErrorSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    /// Show `error`, replacing whatever was displayed.
    pub fn set(&mut self, error: UploadError) {
        self.0 = Some(error);
    }

    /// Clear the slot.
    pub fn dismiss(&mut self) {
        self.0 = None;
    }

    #[must_use]
    pub const fn current(&self) -> Option<&UploadError> {
        self.0.as_ref()
    }
}
