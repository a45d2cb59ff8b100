//! Pure view helpers shared by the components.
//!
//! Kept free of Dioxus and browser types so they can be unit tested on
//! the host.

use dropzone_core::{
    FileEntity, FileId, FileMeta, MediaCategory, UploadConfig, UploadError, format_file_size,
    format_upload_date, validate_meta,
};

/// Prompt shown inside the drop zone.
#[must_use]
pub const fn drop_prompt(dragging: bool) -> &'static str {
    if dragging {
        "Drop files here"
    } else {
        "Drag & drop files here"
    }
}

/// Human summary of what the drop zone accepts, e.g.
/// `"Supported: Images, PDFs, Text files (max 5 MB)"`.
#[must_use]
pub fn accept_summary(config: &UploadConfig) -> String {
    let kinds: Vec<&str> = config
        .accept
        .iter()
        .map(|pattern| match pattern.as_str() {
            "image/*" => "Images",
            "application/pdf" => "PDFs",
            "text/*" => "Text files",
            "*/*" => "All files",
            other => other,
        })
        .collect();
    format!(
        "Supported: {} (max {})",
        kinds.join(", "),
        format_file_size(config.max_file_size)
    )
}

/// Split a selection into the files worth reading and the rejections
/// to report, judging each file by its metadata alone.
///
/// `T` is whatever the host needs to read the file later. Both halves
/// keep selection order.
#[must_use]
pub fn screen_selection<T>(
    files: Vec<(FileMeta, T)>,
    config: &UploadConfig,
) -> (Vec<(FileMeta, T)>, Vec<UploadError>) {
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();
    for (meta, file) in files {
        match validate_meta(&meta, config) {
            Ok(()) => accepted.push((meta, file)),
            Err(err) => rejected.push(UploadError::from(&err)),
        }
    }
    (accepted, rejected)
}

/// Tailwind classes for the category badge.
#[must_use]
pub const fn badge_class(category: MediaCategory) -> &'static str {
    match category {
        MediaCategory::Image => "bg-green-100 text-green-800",
        MediaCategory::Pdf => "bg-red-100 text-red-800",
        MediaCategory::Text => "bg-blue-100 text-blue-800",
        MediaCategory::Other => "bg-gray-100 text-gray-800",
    }
}

/// Secondary line under the file name: size and upload date.
#[must_use]
pub fn file_meta(entity: &FileEntity) -> String {
    format!(
        "{} \u{2022} {}",
        format_file_size(entity.size()),
        format_upload_date(entity.uploaded_at())
    )
}

/// Inline style for the progress bar fill.
#[must_use]
pub fn progress_style(entity: &FileEntity) -> String {
    format!("width: {:.0}%", entity.progress().percent())
}

/// Next expanded file after the preview toggle of `clicked` is pressed.
///
/// At most one file is expanded; pressing the open one closes it.
#[must_use]
pub fn toggle_expanded(current: Option<FileId>, clicked: FileId) -> Option<FileId> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use dropzone_core::{FileHandle, MediaPattern};

    use super::*;

    fn entity(size: u64) -> FileEntity {
        let mut handle = FileHandle::from_bytes("a.txt", None, Vec::new());
        handle.size = size;
        // 2023-11-14T22:13:20Z
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        FileEntity::new(FileId::new(1), &handle, at)
    }

    #[test]
    fn prompt_follows_drag_state() {
        assert_eq!(drop_prompt(true), "Drop files here");
        assert_eq!(drop_prompt(false), "Drag & drop files here");
    }

    #[test]
    fn default_accept_summary() {
        assert_eq!(
            accept_summary(&UploadConfig::default()),
            "Supported: Images, PDFs, Text files (max 5 MB)"
        );
    }

    #[test]
    fn custom_pattern_listed_verbatim() {
        let config = UploadConfig {
            accept: vec![MediaPattern::new("audio/mpeg")],
            max_file_size: 1024,
            ..UploadConfig::default()
        };
        assert_eq!(accept_summary(&config), "Supported: audio/mpeg (max 1 KB)");
    }

    #[test]
    fn screening_uses_declared_type_and_size() {
        let big = 6 * 1024 * 1024;
        let files = vec![
            (FileMeta::new("scan.avif", 10, Some("image/avif")), 0),
            (FileMeta::new("huge.png", big, Some("image/png")), 1),
            (FileMeta::new("notes", 10, Some("text/markdown")), 2),
            (FileMeta::new("blob.avif", 10, None), 3),
        ];
        let (accepted, rejected) = screen_selection(files, &UploadConfig::default());

        let kept: Vec<_> = accepted
            .iter()
            .map(|(meta, i)| (meta.name.as_str(), *i))
            .collect();
        assert_eq!(kept, [("scan.avif", 0), ("notes", 2)]);

        let names: Vec<_> = rejected.iter().map(|e| e.file.as_deref()).collect();
        assert_eq!(names, [Some("huge.png"), Some("blob.avif")]);
        assert!(rejected[0].message.starts_with("File is too large"));
        let expected = "Unsupported file type: application/octet-stream";
        assert_eq!(rejected[1].message, expected);
    }

    #[test]
    fn every_category_has_a_badge() {
        for category in MediaCategory::ALL {
            assert!(badge_class(category).starts_with("bg-"));
        }
    }

    #[test]
    fn meta_line() {
        assert_eq!(file_meta(&entity(1536)), "1.5 KB \u{2022} 2023-11-14");
    }

    #[test]
    fn progress_width() {
        assert_eq!(progress_style(&entity(1)), "width: 0%");
    }

    #[test]
    fn toggle_opens_switches_and_closes() {
        let a = FileId::new(1);
        let b = FileId::new(2);
        assert_eq!(toggle_expanded(None, a), Some(a));
        assert_eq!(toggle_expanded(Some(a), b), Some(b));
        assert_eq!(toggle_expanded(Some(b), b), None);
    }
}
