//! Media types and the closed set of preview categories.
//!
//! The declared MIME-style string is kept verbatim on every entity, but
//! all branching on it goes through [`MediaCategory`], resolved once
//! from the string. Prefix checks are ASCII case-insensitive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback when neither the host nor the file extension tells us
/// anything.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// The exact media type of PDF documents.
pub const PDF: &str = "application/pdf";

/// Known file extensions and the media types browsers report for them.
const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("pdf", PDF),
    ("txt", "text/plain"),
    ("log", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("tsv", "text/tab-separated-values"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("xml", "text/xml"),
    ("json", "application/json"),
    ("zip", "application/zip"),
];

/// A declared media type such as `image/png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaType(String);

impl MediaType {
    /// Wrap a declared media type verbatim.
    #[must_use]
    pub fn new(media_type: impl Into<String>) -> Self {
        Self(media_type.into())
    }

    /// Infer the media type from a file name's extension.
    ///
    /// Unknown or missing extensions yield `application/octet-stream`.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let inferred = name
            .rsplit_once('.')
            .and_then(|(_, ext)| {
                EXTENSION_TYPES
                    .iter()
                    .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            })
            .map_or(OCTET_STREAM, |&(_, media_type)| media_type);
        Self::new(inferred)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The preview category this media type falls into.
    #[must_use]
    pub fn category(&self) -> MediaCategory {
        MediaCategory::of(&self.0)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of media categories that drive preview and icon choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaCategory {
    /// Any `image/*` type.
    Image,
    /// Exactly `application/pdf`.
    Pdf,
    /// Any `text/*` type.
    Text,
    /// Everything else.
    Other,
}

impl MediaCategory {
    /// All categories, in preview priority order.
    pub const ALL: [Self; 4] = [Self::Image, Self::Pdf, Self::Text, Self::Other];

    /// Resolve the category of a media type string.
    ///
    /// Checked in priority order so a malformed type can only land in
    /// the first matching category.
    #[must_use]
    pub fn of(media_type: &str) -> Self {
        let media_type = media_type.trim();
        if has_prefix(media_type, "image/") {
            Self::Image
        } else if media_type.eq_ignore_ascii_case(PDF) {
            Self::Pdf
        } else if has_prefix(media_type, "text/") {
            Self::Text
        } else {
            Self::Other
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Pdf => "PDF",
            Self::Text => "Text",
            Self::Other => "File",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An accept pattern: either an exact type (`application/pdf`) or a
/// wildcard over a top-level type (`image/*`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaPattern(String);

impl MediaPattern {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `media_type` satisfies this pattern.
    #[must_use]
    pub fn matches(&self, media_type: &MediaType) -> bool {
        let candidate = media_type.as_str().trim();
        match self.0.strip_suffix("/*") {
            Some("*") => true,
            Some(top_level) => candidate
                .split_once('/')
                .is_some_and(|(ty, _)| ty.eq_ignore_ascii_case(top_level)),
            None => candidate.eq_ignore_ascii_case(&self.0),
        }
    }
}

/// ASCII case-insensitive `starts_with`.
fn has_prefix(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_prefix() {
        assert_eq!(MediaCategory::of("image/png"), MediaCategory::Image);
        assert_eq!(MediaCategory::of("IMAGE/JPEG"), MediaCategory::Image);
        assert_eq!(MediaCategory::of("text/plain"), MediaCategory::Text);
        assert_eq!(MediaCategory::of("application/pdf"), MediaCategory::Pdf);
        assert_eq!(
            MediaCategory::of("application/octet-stream"),
            MediaCategory::Other
        );
        assert_eq!(MediaCategory::of(""), MediaCategory::Other);
    }

    #[test]
    fn pdf_must_match_exactly() {
        assert_eq!(MediaCategory::of("application/pdfx"), MediaCategory::Other);
        assert_eq!(MediaCategory::of("application/x-pdf"), MediaCategory::Other);
    }

    #[test]
    fn prefix_check_handles_short_and_multibyte_input() {
        assert_eq!(MediaCategory::of("img"), MediaCategory::Other);
        assert_eq!(MediaCategory::of("ïmage/png"), MediaCategory::Other);
    }

    #[test]
    fn all_is_in_priority_order() {
        assert_eq!(MediaCategory::ALL[0], MediaCategory::Image);
        assert_eq!(MediaCategory::ALL[3], MediaCategory::Other);
    }

    #[test]
    fn infer_from_extension() {
        assert_eq!(MediaType::from_file_name("b.png").as_str(), "image/png");
        assert_eq!(MediaType::from_file_name("B.JPG").as_str(), "image/jpeg");
        assert_eq!(MediaType::from_file_name("a.txt").as_str(), "text/plain");
        assert_eq!(MediaType::from_file_name("report.pdf").as_str(), PDF);
        assert_eq!(MediaType::from_file_name("c.bin").as_str(), OCTET_STREAM);
        assert_eq!(MediaType::from_file_name("Makefile").as_str(), OCTET_STREAM);
    }

    #[test]
    fn infer_uses_last_extension() {
        let inferred = MediaType::from_file_name("archive.txt.zip");
        assert_eq!(inferred.as_str(), "application/zip");
    }

    #[test]
    fn wildcard_pattern_matches_top_level_type() {
        let pattern = MediaPattern::new("image/*");
        assert!(pattern.matches(&MediaType::new("image/png")));
        assert!(pattern.matches(&MediaType::new("Image/WebP")));
        assert!(!pattern.matches(&MediaType::new("text/plain")));
        assert!(!pattern.matches(&MediaType::new("image")));
    }

    #[test]
    fn exact_pattern_matches_only_that_type() {
        let pattern = MediaPattern::new("application/pdf");
        assert!(pattern.matches(&MediaType::new("application/pdf")));
        assert!(!pattern.matches(&MediaType::new("application/json")));
    }

    #[test]
    fn any_pattern_matches_everything() {
        let pattern = MediaPattern::new("*/*");
        assert!(pattern.matches(&MediaType::new("application/octet-stream")));
    }
}
