//! Shared types for the dropzone upload lifecycle.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::format_file_size;
use crate::id::FileId;
use crate::media::{MediaPattern, MediaType};

/// Upload completion as a percentage in `[0, 100]`.
///
/// Every constructor clamps, so a `Progress` can never leave the
/// valid range. `NaN` readings collapse to zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Nothing transferred yet.
    pub const ZERO: Self = Self(0.0);

    /// Transfer finished.
    pub const COMPLETE: Self = Self(100.0);

    /// Create a progress value, clamping into `[0, 100]`.
    #[must_use]
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::ZERO;
        }
        Self(percent.clamp(0.0, 100.0))
    }

    /// The percentage as a float.
    #[must_use]
    pub const fn percent(self) -> f64 {
        self.0
    }

    /// Returns `true` once the transfer has reached 100%.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 100.0
    }
}

impl From<f64> for Progress {
    fn from(percent: f64) -> Self {
        Self::new(percent)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

/// Opaque handle to a previewable copy of a file's bytes.
///
/// In the browser this is an object URL (`blob:...`). Handles are
/// allocated and released through a [`PreviewStore`](crate::PreviewStore);
/// the entity holding one owns it until deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    /// Wrap a URL string produced by a preview store.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL as a string slice (for `src`/`href` attributes).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the host platform reports about a selected file before any of
/// its bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// File name, including extension.
    pub name: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Declared media type.
    pub media_type: MediaType,
}

impl FileMeta {
    /// Capture the host's metadata for one file.
    ///
    /// A non-blank `declared_type` is kept verbatim. Only a missing or
    /// blank one is inferred from the file name extension.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, declared_type: Option<&str>) -> Self {
        let name = name.into();
        let media_type = match declared_type {
            Some(declared) if !declared.trim().is_empty() => MediaType::new(declared),
            _ => MediaType::from_file_name(&name),
        };
        Self {
            name,
            size,
            media_type,
        }
    }

    /// Attach the file's bytes. The declared size is kept as is.
    #[must_use]
    pub fn into_handle(self, payload: Vec<u8>) -> FileHandle {
        FileHandle {
            name: self.name,
            size: self.size,
            media_type: self.media_type,
            payload,
        }
    }
}

/// A file as handed over by the host platform's file picker or drop
/// target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// File name, including extension.
    pub name: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Declared media type.
    pub media_type: MediaType,
    /// Full byte content of the file.
    pub payload: Vec<u8>,
}

impl FileHandle {
    /// Build a handle from a file name and its bytes.
    ///
    /// The declared size is the payload length. When `declared_type` is
    /// `None` or blank the media type is inferred from the extension.
    #[must_use]
    pub fn from_bytes(
        name: impl Into<String>,
        declared_type: Option<&str>,
        payload: Vec<u8>,
    ) -> Self {
        FileMeta::new(name, payload.len() as u64, declared_type).into_handle(payload)
    }
}

/// The tracked record for one accepted file.
///
/// Identity and metadata are fixed at creation. Only the registry
/// advances `progress`, `preview` and `text`, always by replacing the
/// whole entity, and never again once progress reaches 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntity {
    id: FileId,
    name: String,
    size: u64,
    media_type: MediaType,
    uploaded_at: DateTime<Utc>,
    progress: Progress,
    preview: Option<PreviewUrl>,
    text: Option<String>,
}

impl FileEntity {
    /// Create a fresh entity at zero progress with no preview.
    #[must_use]
    pub fn new(id: FileId, handle: &FileHandle, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: handle.name.clone(),
            size: handle.size,
            media_type: handle.media_type.clone(),
            uploaded_at,
            progress: Progress::ZERO,
            preview: None,
            text: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> FileId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// When the file was selected.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns `true` once the entity has reached its terminal state.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    /// Preview handle, present only on completed entities.
    #[must_use]
    pub const fn preview(&self) -> Option<&PreviewUrl> {
        self.preview.as_ref()
    }

    /// Decoded text content, present only on completed text files.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Copy of this entity at a new progress reading.
    ///
    /// `preview` and `text` are only carried over when `progress` is
    /// complete, so an in-flight entity can never hold them.
    #[must_use]
    pub(crate) fn advanced(
        &self,
        progress: Progress,
        preview: Option<PreviewUrl>,
        text: Option<String>,
    ) -> Self {
        let complete = progress.is_complete();
        Self {
            progress,
            preview: preview.filter(|_| complete),
            text: text.filter(|_| complete),
            ..self.clone()
        }
    }

    /// Take the preview handle out of a removed entity for release.
    pub(crate) fn into_preview(self) -> Option<PreviewUrl> {
        self.preview
    }
}

/// Configuration for uploads in one session.
///
/// All parameters have defaults matching the upload zone's advertised
/// limits. Use [`validate`](Self::validate) (or
/// [`Session::new`](crate::Session::new), which calls it) before
/// driving uploads with a hand-built config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,

    /// Media types accepted by the upload zone. A file must match at
    /// least one pattern.
    pub accept: Vec<MediaPattern>,

    /// Delay between simulated progress ticks, in milliseconds.
    pub tick_interval_ms: u32,

    /// Smallest simulated progress step, in percent. Must be positive
    /// so every upload finishes in a bounded number of ticks.
    pub min_step: f64,

    /// Largest simulated progress step, in percent.
    pub max_step: f64,
}

impl UploadConfig {
    /// 5 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
    pub const DEFAULT_TICK_INTERVAL_MS: u32 = 200;
    pub const DEFAULT_MIN_STEP: f64 = 0.5;
    pub const DEFAULT_MAX_STEP: f64 = 30.0;

    /// Check that the step range is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepRange`] unless
    /// `0 < min_step <= max_step <= 100` (both finite).
    /// Returns [`ConfigError::ZeroTickInterval`] if `tick_interval_ms` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::progress::StepRange::new(self.min_step, self.max_step)?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// The tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms))
    }

    /// The `accept` attribute value for a file input, e.g.
    /// `"image/*,application/pdf,text/*"`.
    #[must_use]
    pub fn accept_attribute(&self) -> String {
        self.accept
            .iter()
            .map(MediaPattern::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            accept: vec![
                MediaPattern::new("image/*"),
                MediaPattern::new("application/pdf"),
                MediaPattern::new("text/*"),
            ],
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            min_step: Self::DEFAULT_MIN_STEP,
            max_step: Self::DEFAULT_MAX_STEP,
        }
    }
}

/// Reasons a selected file is turned away before it is tracked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The file exceeds [`UploadConfig::max_file_size`].
    #[error(
        "File is too large ({}). Maximum size is {}",
        format_file_size(.size.to_owned()),
        format_file_size(.limit.to_owned())
    )]
    TooLarge {
        /// Rejected file name.
        name: String,
        /// Declared size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The media type matches none of [`UploadConfig::accept`].
    #[error("Unsupported file type: {media_type}")]
    UnsupportedType {
        /// Rejected file name.
        name: String,
        /// Declared media type.
        media_type: String,
    },
}

impl SelectionError {
    /// Name of the rejected file.
    #[must_use]
    pub fn file_name(&self) -> &str {
        match self {
            Self::TooLarge { name, .. } | Self::UnsupportedType { name, .. } => name,
        }
    }
}

/// Registry mutations that cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An entity with this identifier is already tracked.
    #[error("duplicate file id: {0}")]
    DuplicateId(FileId),
}

/// Text decoding failures. Recovered locally: the file completes
/// without text content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not valid UTF-8.
    #[error("file is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the longest valid prefix.
        valid_up_to: usize,
    },
}

/// Preview handle allocation failures. Recovered locally: the file
/// completes without a preview.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// The store could not produce a handle.
    #[error("failed to allocate preview: {0}")]
    Allocation(String),
}

/// Invalid [`UploadConfig`] values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Step bounds out of order, non-positive, non-finite, or above 100.
    #[error("invalid progress step range {min}..={max} (expected 0 < min <= max <= 100)")]
    InvalidStepRange {
        /// Configured minimum step.
        min: f64,
        /// Configured maximum step.
        max: f64,
    },

    /// A zero tick interval would spin without yielding.
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn handle(name: &str, media_type: &str, payload: &[u8]) -> FileHandle {
        FileHandle::from_bytes(name, Some(media_type), payload.to_vec())
    }

    fn entity() -> FileEntity {
        let h = handle("a.txt", "text/plain", b"x");
        FileEntity::new(FileId::new(1), &h, DateTime::default())
    }

    // --- Progress ---

    #[test]
    fn progress_clamps_into_range() {
        assert_eq!(Progress::new(-5.0), Progress::ZERO);
        assert_eq!(Progress::new(140.0), Progress::COMPLETE);
        assert!((Progress::new(42.5).percent() - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_nan_is_zero() {
        assert_eq!(Progress::new(f64::NAN), Progress::ZERO);
    }

    #[test]
    fn progress_complete_only_at_hundred() {
        assert!(!Progress::new(99.9).is_complete());
        assert!(Progress::COMPLETE.is_complete());
    }

    #[test]
    fn progress_display_rounds() {
        assert_eq!(Progress::new(41.6).to_string(), "42%");
        assert_eq!(Progress::COMPLETE.to_string(), "100%");
    }

    #[test]
    fn progress_deserialize_clamps() {
        let p: Progress = serde_json::from_str("250.0").unwrap();
        assert_eq!(p, Progress::COMPLETE);
    }

    // --- FileHandle ---

    #[test]
    fn handle_uses_declared_type() {
        let h = handle("notes.dat", "text/plain", b"hi");
        assert_eq!(h.media_type.as_str(), "text/plain");
        assert_eq!(h.size, 2);
    }

    #[test]
    fn handle_infers_type_when_missing_or_blank() {
        let h = FileHandle::from_bytes("photo.PNG", None, vec![0; 4]);
        assert_eq!(h.media_type.as_str(), "image/png");
        let h = FileHandle::from_bytes("doc.pdf", Some("  "), vec![]);
        assert_eq!(h.media_type.as_str(), "application/pdf");
    }

    // --- FileMeta ---

    #[test]
    fn meta_prefers_declared_type_over_extension() {
        let meta = FileMeta::new("scan.png", 3, Some("application/pdf"));
        assert_eq!(meta.media_type.as_str(), "application/pdf");
        let meta = FileMeta::new("scan.png", 3, Some(""));
        assert_eq!(meta.media_type.as_str(), "image/png");
    }

    #[test]
    fn meta_keeps_declared_size() {
        let h = FileMeta::new("a.txt", 10, None).into_handle(b"hello".to_vec());
        assert_eq!(h.size, 10);
        assert_eq!(h.payload, b"hello");
        assert_eq!(h.media_type.as_str(), "text/plain");
    }

    // --- FileEntity ---

    #[test]
    fn new_entity_starts_empty() {
        let e = entity();
        assert_eq!(e.progress(), Progress::ZERO);
        assert!(e.preview().is_none());
        assert!(e.text().is_none());
        assert!(!e.is_complete());
    }

    #[test]
    fn advanced_drops_preview_and_text_below_complete() {
        let e = entity();
        let next = e.advanced(
            Progress::new(50.0),
            Some(PreviewUrl::new("blob:1")),
            Some("x".into()),
        );
        assert!(next.preview().is_none());
        assert!(next.text().is_none());
        assert_eq!(next.id(), e.id());
        assert_eq!(next.name(), "a.txt");
    }

    #[test]
    fn advanced_keeps_preview_and_text_at_complete() {
        let e = entity();
        let done = e.advanced(
            Progress::COMPLETE,
            Some(PreviewUrl::new("blob:1")),
            Some("x".into()),
        );
        assert_eq!(done.preview().map(PreviewUrl::as_str), Some("blob:1"));
        assert_eq!(done.text(), Some("x"));
    }

    // --- UploadConfig ---

    #[test]
    fn default_config_is_valid() {
        assert!(UploadConfig::default().validate().is_ok());
    }

    #[test]
    fn config_rejects_zero_min_step() {
        let config = UploadConfig {
            min_step: 0.0,
            ..UploadConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStepRange { .. })
        ));
    }

    #[test]
    fn config_rejects_zero_tick_interval() {
        let config = UploadConfig {
            tick_interval_ms: 0,
            ..UploadConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn config_accept_attribute() {
        assert_eq!(
            UploadConfig::default().accept_attribute(),
            "image/*,application/pdf,text/*"
        );
    }

    #[test]
    fn config_partial_json_fills_defaults() {
        let config: UploadConfig = serde_json::from_str(r#"{"max_file_size": 10}"#).unwrap();
        assert_eq!(config.max_file_size, 10);
        assert_eq!(
            config.tick_interval_ms,
            UploadConfig::DEFAULT_TICK_INTERVAL_MS
        );
        assert_eq!(config.accept.len(), 3);
    }

    // --- SelectionError ---

    #[test]
    fn too_large_message_uses_human_sizes() {
        let err = SelectionError::TooLarge {
            name: "big.png".into(),
            size: 6 * 1024 * 1024,
            limit: UploadConfig::DEFAULT_MAX_FILE_SIZE,
        };
        let expected = "File is too large (6 MB). Maximum size is 5 MB";
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.file_name(), "big.png");
    }
}
