//! dropzone-core: Upload lifecycle and preview selection (sans-IO).
//!
//! Turns selected files into tracked [`FileEntity`] records, advances
//! each one through a simulated transfer, and decides how a completed
//! file should be previewed:
//!
//! selection -> acceptance filter -> registry -> progress ticks ->
//! completion (preview handle + decoded text) -> preview selection.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte buffers and hands out plain data. Preview handles are produced
//! by a [`PreviewStore`] supplied by the caller; the browser
//! implementation (object URLs) lives in `dropzone-io`.

pub mod error_slot;
pub mod format;
pub mod id;
pub mod media;
pub mod preview;
pub mod progress;
pub mod registry;
pub mod session;
pub mod store;
pub mod types;
pub mod upload;
pub mod validate;

pub use error_slot::{ErrorSlot, UploadError};
pub use format::{format_file_size, format_upload_date};
pub use id::{FileId, IdGenerator};
pub use media::{MediaCategory, MediaPattern, MediaType};
pub use preview::{PreviewVariant, select_preview};
pub use progress::{ProgressSource, SimulatedProgress, StepRange};
pub use registry::{Registry, UpdateOutcome};
pub use session::{PreviewStore, Session};
pub use store::InMemoryStore;
pub use types::{
    ConfigError, DecodeError, FileEntity, FileHandle, FileMeta, PreviewError, PreviewUrl, Progress,
    RegistryError, SelectionError, UploadConfig,
};
pub use upload::{Completion, TickOutcome, UploadTask, decode_text};
pub use validate::{validate, validate_meta};
