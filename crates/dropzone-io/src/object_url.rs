//! Object URL allocation for file previews.
//!
//! Completed files are wrapped in a `Blob` carrying their media type and
//! exposed to `<img>`, `<iframe>` and download links through
//! `URL.createObjectURL`. Every URL handed out is revoked when the
//! session deletes the file.
//!
//! Requires a browser environment (`wasm32-unknown-unknown` target).

use dropzone_core::{MediaType, PreviewError, PreviewStore, PreviewUrl};
use tracing::debug;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur while creating an object URL.
#[derive(Debug, thiserror::Error)]
pub enum ObjectUrlError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ObjectUrlError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<ObjectUrlError> for PreviewError {
    fn from(err: ObjectUrlError) -> Self {
        Self::Allocation(err.to_string())
    }
}

/// Wrap `bytes` in a `Blob` of type `mime_type` and return its object URL.
///
/// The returned URL must be revoked via [`revoke_blob_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns [`ObjectUrlError::JsError`] if Blob or URL creation fails.
pub fn blob_url(bytes: &[u8], mime_type: &str) -> Result<String, ObjectUrlError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke a URL previously created by [`blob_url`].
///
/// Best-effort: the URL may already have been revoked.
pub fn revoke_blob_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

/// [`PreviewStore`] backed by browser object URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlStore;

impl PreviewStore for ObjectUrlStore {
    fn allocate(
        &mut self,
        payload: &[u8],
        media_type: &MediaType,
    ) -> Result<PreviewUrl, PreviewError> {
        let url = blob_url(payload, media_type.as_str())?;
        debug!(%url, %media_type, bytes = payload.len(), "allocated object URL");
        Ok(PreviewUrl::new(url))
    }

    fn release(&mut self, url: PreviewUrl) {
        debug!(%url, "revoking object URL");
        revoke_blob_url(url.as_str());
    }
}
