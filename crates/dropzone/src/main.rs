use std::collections::HashMap;

use dioxus::core::Task;
use dioxus::prelude::*;
use dropzone_core::{FileEntity, FileHandle, FileId, Session, UploadError};
use dropzone_io::{ErrorBanner, FileList, ObjectUrlStore, UploadZone, drive_upload};
use tracing::info;

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the upload session in a single signal and one Dioxus task per
/// in-flight upload. Deleting a file cancels its task before removing
/// it from the session, so no timer outlives its file.
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(|| Session::with_default_config(ObjectUrlStore));
    let mut uploads = use_signal(HashMap::<FileId, Task>::new);

    // --- Selection handler ---
    let on_select = move |handles: Vec<FileHandle>| {
        let count = handles.len();
        let tasks = session.write().select_files(handles);
        let interval = session.peek().config().tick_interval();
        info!(selected = count, accepted = tasks.len(), "files selected");

        for task in tasks {
            let id = task.id();
            let handle = spawn(async move {
                drive_upload(session, task, interval).await;
                uploads.write().remove(&id);
            });
            uploads.write().insert(id, handle);
        }
    };

    // --- Delete handler ---
    let on_delete = move |id: FileId| {
        if let Some(task) = uploads.write().remove(&id) {
            task.cancel();
        }
        session.write().delete_file(id);
    };

    let on_error = move |error: UploadError| session.write().report_error(error);
    let on_dismiss = move |()| session.write().dismiss_error();

    // --- Read view ---
    let files: Vec<FileEntity> = session.read().files().cloned().collect();
    let file_count = files.len();
    let error = session.read().error().cloned();
    let config = session.read().config().clone();

    // --- Layout ---
    rsx! {
        // Tailwind utilities via the Play CDN; no build step.
        script { src: "https://cdn.tailwindcss.com" }

        div { class: "min-h-screen bg-gray-50 text-gray-900",
            div { class: "max-w-3xl mx-auto px-4 py-8 flex flex-col gap-6",
                header {
                    h1 { class: "text-3xl font-bold", "File Upload Portal" }
                    p { class: "text-gray-500 mt-1",
                        "Upload images, PDFs, and text files and preview them in the browser"
                    }
                }

                if let Some(error) = error {
                    ErrorBanner { error, on_dismiss }
                }

                UploadZone { config, on_select, on_error }

                section {
                    h2 { class: "text-xl font-semibold mb-3", "Uploaded Files ({file_count})" }
                    FileList { files, on_delete, on_error }
                }
            }
        }
    }
}
