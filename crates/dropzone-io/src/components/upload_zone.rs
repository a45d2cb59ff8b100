//! Upload zone with drag-and-drop and a multi-file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use dropzone_core::{FileHandle, FileMeta, UploadConfig, UploadError};
use tracing::warn;

use crate::view::{accept_summary, drop_prompt, screen_selection};

/// Props for the [`UploadZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadZoneProps {
    /// Limits and accepted types, shown to the user, passed to the
    /// picker's `accept` attribute and checked before any file is read.
    config: UploadConfig,
    /// Called with every accepted file that could be read, in
    /// selection order.
    on_select: EventHandler<Vec<FileHandle>>,
    /// Called once per file that is rejected or cannot be read.
    on_error: EventHandler<UploadError>,
}

/// A drag-and-drop zone with a multi-file picker.
///
/// Each selected or dropped file is judged by the browser's declared
/// name, size and media type first. Rejected files are reported and
/// never read. The bytes of the rest are read and forwarded as
/// [`FileHandle`]s that keep the declared size and type.
#[component]
pub fn UploadZone(props: UploadZoneProps) -> Element {
    let mut dragging = use_signal(|| false);
    let on_select = props.on_select;
    let on_error = props.on_error;
    let picker_config = props.config.clone();
    let drop_config = props.config.clone();

    let handle_files = move |evt: FormEvent| {
        let config = picker_config.clone();
        async move {
            read_selection(evt.files(), &config, on_select, on_error).await;
        }
    };

    let handle_drop = move |evt: DragEvent| {
        let config = drop_config.clone();
        async move {
            evt.prevent_default();
            dragging.set(false);
            read_selection(evt.files(), &config, on_select, on_error).await;
        }
    };

    let border_class = if dragging() {
        "border-blue-500 bg-blue-50"
    } else {
        "border-gray-300 hover:border-gray-400"
    };
    let accept = props.config.accept_attribute();
    let summary = accept_summary(&props.config);

    rsx! {
        label {
            class: "block border-2 border-dashed rounded-lg p-8 text-center cursor-pointer transition-colors {border_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                r#type: "file",
                multiple: true,
                accept: "{accept}",
                class: "hidden",
                onchange: handle_files,
            }

            div { class: "flex justify-center mb-4 text-gray-400",
                Icon { width: 48, height: 48, icon: LdUpload }
            }
            p { class: "text-lg font-medium text-gray-700",
                "{drop_prompt(dragging())}"
            }
            p { class: "text-sm text-gray-500 mt-1", "or click to select files" }
            p { class: "text-xs text-gray-400 mt-2", "{summary}" }
        }
    }
}

/// Screen `files` on their metadata, then read the accepted ones.
#[allow(clippy::future_not_send)]
async fn read_selection(
    files: Vec<FileData>,
    config: &UploadConfig,
    on_select: EventHandler<Vec<FileHandle>>,
    on_error: EventHandler<UploadError>,
) {
    let described = files
        .into_iter()
        .map(|file| {
            let meta = FileMeta::new(file.name(), file.size(), file.content_type().as_deref());
            (meta, file)
        })
        .collect();
    let (accepted, rejected) = screen_selection(described, config);
    for err in rejected {
        warn!(file = ?err.file, message = %err.message, "rejected before reading");
        on_error.call(err);
    }

    let mut handles = Vec::with_capacity(accepted.len());
    for (meta, file) in accepted {
        match file.read_bytes().await {
            Ok(bytes) => handles.push(meta.into_handle(bytes.to_vec())),
            Err(e) => {
                warn!(file = %meta.name, error = %e, "failed to read file");
                let message = format!("Failed to read file: {e}");
                on_error.call(UploadError::for_file(message, meta.name));
            }
        }
    }
    if !handles.is_empty() {
        on_select.call(handles);
    }
}
