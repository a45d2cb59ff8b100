//! dropzone-io: Browser I/O and Dioxus component library.
//!
//! Allocates object URLs for file previews, drives simulated uploads
//! on browser timers, triggers downloads, and provides the upload zone,
//! file list, preview panel, and error banner components for the
//! dropzone web application.

pub mod components;
pub mod download;
pub mod driver;
pub mod object_url;
pub mod view;

pub use components::{ErrorBanner, FileList, PreviewPanel, UploadZone};
pub use driver::drive_upload;
pub use object_url::ObjectUrlStore;
