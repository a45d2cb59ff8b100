//! Preview selection for completed files.

use serde::Serialize;

use crate::media::MediaCategory;
use crate::types::{FileEntity, PreviewUrl};

/// How a completed file should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewVariant {
    /// Inline image (`<img src>`).
    Image {
        url: PreviewUrl,
        /// Alternative text (the file name).
        alt: String,
    },
    /// Embedded document viewer (`<iframe src>`).
    Document {
        url: PreviewUrl,
        /// Frame title (the file name).
        title: String,
    },
    /// Preformatted text.
    Text { content: String },
    /// No preview available; identify the file by name only.
    Unsupported { name: String },
}

impl PreviewVariant {
    /// Short machine-readable kind, matching the serialized tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Document { .. } => "document",
            Self::Text { .. } => "text",
            Self::Unsupported { .. } => "unsupported",
        }
    }
}

/// Choose the preview for `entity`.
///
/// Strict priority: image, then document, then text, then unsupported.
/// Each variant also needs its data: images and documents need a
/// preview handle, text needs decoded content. Entities that have not
/// completed never hold either, so they always come out unsupported.
#[must_use]
pub fn select_preview(entity: &FileEntity) -> PreviewVariant {
    let name = entity.name().to_owned();
    let category = entity.media_type().category();
    match (category, entity.preview(), entity.text()) {
        (MediaCategory::Image, Some(url), _) => PreviewVariant::Image {
            url: url.clone(),
            alt: name,
        },
        (MediaCategory::Pdf, Some(url), _) => PreviewVariant::Document {
            url: url.clone(),
            title: name,
        },
        (MediaCategory::Text, _, Some(content)) => PreviewVariant::Text {
            content: content.to_owned(),
        },
        _ => PreviewVariant::Unsupported { name },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::id::FileId;
    use crate::types::{FileHandle, Progress};

    fn completed(
        name: &str,
        media_type: &str,
        preview: Option<&str>,
        text: Option<&str>,
    ) -> FileEntity {
        let handle = FileHandle::from_bytes(name, Some(media_type), Vec::new());
        FileEntity::new(FileId::new(1), &handle, DateTime::default()).advanced(
            Progress::COMPLETE,
            preview.map(PreviewUrl::new),
            text.map(str::to_owned),
        )
    }

    #[test]
    fn image_with_preview() {
        let e = completed("b.png", "image/png", Some("blob:1"), None);
        assert_eq!(
            select_preview(&e),
            PreviewVariant::Image {
                url: PreviewUrl::new("blob:1"),
                alt: "b.png".into(),
            }
        );
    }

    #[test]
    fn image_wins_even_with_text_present() {
        let e = completed("b.png", "image/png", Some("blob:1"), Some("text"));
        assert_eq!(select_preview(&e).kind(), "image");
    }

    #[test]
    fn pdf_with_preview_is_document() {
        let e = completed("c.pdf", "application/pdf", Some("blob:2"), None);
        assert_eq!(select_preview(&e).kind(), "document");
    }

    #[test]
    fn text_with_content() {
        let e = completed("a.txt", "text/plain", Some("blob:3"), Some("hello"));
        assert_eq!(
            select_preview(&e),
            PreviewVariant::Text {
                content: "hello".into()
            }
        );
    }

    #[test]
    fn text_without_content_is_unsupported() {
        let e = completed("a.txt", "text/plain", Some("blob:3"), None);
        assert_eq!(
            select_preview(&e),
            PreviewVariant::Unsupported {
                name: "a.txt".into()
            }
        );
    }

    #[test]
    fn image_without_preview_is_unsupported() {
        let e = completed("b.png", "image/png", None, None);
        assert_eq!(select_preview(&e).kind(), "unsupported");
    }

    #[test]
    fn other_types_are_unsupported() {
        let e = completed("c.bin", "application/octet-stream", Some("blob:4"), None);
        assert_eq!(
            select_preview(&e),
            PreviewVariant::Unsupported {
                name: "c.bin".into()
            }
        );
    }

    #[test]
    fn in_flight_entity_is_unsupported() {
        let handle = FileHandle::from_bytes("b.png", Some("image/png"), Vec::new());
        let e = FileEntity::new(FileId::new(1), &handle, DateTime::default());
        assert_eq!(select_preview(&e).kind(), "unsupported");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let e = completed("a.txt", "text/plain", None, Some("hi"));
        let json = serde_json::to_value(select_preview(&e)).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["content"], "hi");
    }
}
