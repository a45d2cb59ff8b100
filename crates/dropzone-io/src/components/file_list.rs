//! File list with per-file progress, preview toggle, download, and delete.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{
    LdDownload, LdEye, LdEyeOff, LdFile, LdFileText, LdImage, LdTrash2,
};
use dropzone_core::{FileEntity, FileId, MediaCategory, UploadError, select_preview};
use tracing::warn;

use super::PreviewPanel;
use crate::download::trigger_url_download;
use crate::view::{badge_class, file_meta, progress_style, toggle_expanded};

/// Props for the [`FileList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileListProps {
    /// Tracked files, oldest first.
    files: Vec<FileEntity>,
    /// Called when the user deletes a file.
    on_delete: EventHandler<FileId>,
    /// Called when a download cannot be started.
    on_error: EventHandler<UploadError>,
}

/// One card per tracked file.
///
/// In-flight files show a progress bar. Completed files get a preview
/// toggle (one file expanded at a time) and, when they have an object
/// URL, a download button. Every file can be deleted.
#[component]
pub fn FileList(props: FileListProps) -> Element {
    let mut expanded = use_signal(|| Option::<FileId>::None);

    if props.files.is_empty() {
        return rsx! {
            p { class: "text-center text-gray-500 py-8", "No files uploaded yet" }
        };
    }

    let on_delete = props.on_delete;
    let on_error = props.on_error;
    let cards = props.files.into_iter().map(move |file| {
        let id = file.id();
        rsx! {
            FileCard {
                key: "{id}",
                expanded: expanded() == Some(id),
                on_toggle: move |clicked| expanded.set(toggle_expanded(expanded(), clicked)),
                on_delete: move |deleted| {
                    if expanded() == Some(deleted) {
                        expanded.set(None);
                    }
                    on_delete.call(deleted);
                },
                on_error,
                file,
            }
        }
    });

    rsx! {
        ul { class: "space-y-3", {cards} }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FileCardProps {
    file: FileEntity,
    expanded: bool,
    on_toggle: EventHandler<FileId>,
    on_delete: EventHandler<FileId>,
    on_error: EventHandler<UploadError>,
}

#[component]
fn FileCard(props: FileCardProps) -> Element {
    let file = props.file;
    let id = file.id();
    let category = file.media_type().category();
    let badge = badge_class(category);
    let meta = file_meta(&file);
    let bar = progress_style(&file);
    let progress = file.progress();
    let complete = file.is_complete();
    let download = file
        .preview()
        .map(|url| (url.as_str().to_owned(), file.name().to_owned()));
    let on_error = props.on_error;
    let toggle_label = if props.expanded {
        "Hide preview"
    } else {
        "Show preview"
    };

    rsx! {
        li { class: "border border-gray-200 rounded-lg p-4 bg-white",
            div { class: "flex items-center gap-3",
                div { class: "text-gray-500", {category_icon(category)} }
                div { class: "flex-1 min-w-0",
                    div { class: "flex items-center gap-2",
                        span { class: "text-xs font-medium px-2 py-0.5 rounded {badge}", "{category}" }
                        p { class: "font-medium truncate", "{file.name()}" }
                    }
                    p { class: "text-sm text-gray-500", "{meta}" }
                }

                if complete {
                    button {
                        class: "p-2 text-gray-500 hover:text-gray-800",
                        aria_label: toggle_label,
                        onclick: move |_| props.on_toggle.call(id),
                        if props.expanded {
                            Icon { width: 18, height: 18, icon: LdEyeOff }
                        } else {
                            Icon { width: 18, height: 18, icon: LdEye }
                        }
                    }
                    if let Some((url, name)) = download {
                        button {
                            class: "p-2 text-gray-500 hover:text-gray-800",
                            aria_label: "Download",
                            onclick: move |_| {
                                if let Err(e) = trigger_url_download(&url, &name) {
                                    warn!(file = %name, error = %e, "download failed");
                                    let message = format!("Download failed: {e}");
                                    on_error.call(UploadError::for_file(message, name.clone()));
                                }
                            },
                            Icon { width: 18, height: 18, icon: LdDownload }
                        }
                    }
                }
                button {
                    class: "p-2 text-gray-500 hover:text-red-600",
                    aria_label: "Delete",
                    onclick: move |_| props.on_delete.call(id),
                    Icon { width: 18, height: 18, icon: LdTrash2 }
                }
            }

            if !complete {
                div { class: "mt-3",
                    div { class: "w-full bg-gray-200 rounded-full h-2",
                        div { class: "bg-blue-600 h-2 rounded-full transition-all", style: "{bar}" }
                    }
                    p { class: "text-xs text-gray-500 mt-1", "{progress}" }
                }
            }

            if complete && props.expanded {
                div { class: "mt-4 border-t border-gray-100 pt-4",
                    PreviewPanel { variant: select_preview(&file) }
                }
            }
        }
    }
}

fn category_icon(category: MediaCategory) -> Element {
    match category {
        MediaCategory::Image => rsx! { Icon { width: 24, height: 24, icon: LdImage } },
        MediaCategory::Pdf | MediaCategory::Text => {
            rsx! { Icon { width: 24, height: 24, icon: LdFileText } }
        }
        MediaCategory::Other => rsx! { Icon { width: 24, height: 24, icon: LdFile } },
    }
}
