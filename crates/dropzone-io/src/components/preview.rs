//! Inline preview of a completed file.

use dioxus::prelude::*;
use dropzone_core::PreviewVariant;

/// Props for the [`PreviewPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PreviewPanelProps {
    variant: PreviewVariant,
}

/// Renders one [`PreviewVariant`].
#[component]
pub fn PreviewPanel(props: PreviewPanelProps) -> Element {
    match props.variant {
        PreviewVariant::Image { url, alt } => rsx! {
            img {
                src: "{url}",
                alt: "{alt}",
                class: "max-w-full h-auto max-h-96 mx-auto rounded",
            }
        },
        PreviewVariant::Document { url, title } => rsx! {
            iframe {
                src: "{url}",
                title: "{title}",
                class: "w-full h-96 border-0 rounded",
            }
        },
        PreviewVariant::Text { content } => rsx! {
            pre { class: "bg-gray-50 p-4 rounded text-sm overflow-auto max-h-96 whitespace-pre-wrap",
                "{content}"
            }
        },
        PreviewVariant::Unsupported { name } => rsx! {
            div { class: "text-center text-gray-500 py-8",
                p { "This file type cannot be previewed" }
                p { class: "text-sm mt-1", "{name}" }
            }
        },
    }
}
