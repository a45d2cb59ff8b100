//! Dioxus UI components for dropzone.
//!
//! Provides the drag-and-drop upload zone, the file list with per-file
//! progress and actions, the preview panel, and the dismissable error
//! banner.

mod error_banner;
mod file_list;
mod preview;
mod upload_zone;

pub use error_banner::ErrorBanner;
pub use file_list::FileList;
pub use preview::PreviewPanel;
pub use upload_zone::UploadZone;
