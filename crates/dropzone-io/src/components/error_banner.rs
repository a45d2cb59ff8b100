//! Dismissable error banner.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use dropzone_core::UploadError;

/// Props for the [`ErrorBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ErrorBannerProps {
    error: UploadError,
    on_dismiss: EventHandler<()>,
}

/// Shows the current error, the offending file if known, and a
/// dismiss button.
#[component]
pub fn ErrorBanner(props: ErrorBannerProps) -> Element {
    let UploadError { message, file } = props.error;

    rsx! {
        div {
            class: "flex items-start justify-between bg-red-50 border border-red-200 text-red-800 rounded-lg p-4",
            role: "alert",
            div {
                p { class: "font-medium", "{message}" }
                if let Some(name) = file {
                    p { class: "text-sm mt-1", "File: {name}" }
                }
            }
            button {
                class: "ml-4 text-red-500 hover:text-red-700",
                aria_label: "Dismiss error",
                onclick: move |_| props.on_dismiss.call(()),
                Icon { width: 16, height: 16, icon: LdX }
            }
        }
    }
}
