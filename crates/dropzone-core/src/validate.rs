//! Acceptance filter applied to every selected file.

use crate::media::MediaType;
use crate::types::{FileHandle, FileMeta, SelectionError, UploadConfig};

/// Check a selected file against the size limit and accepted types.
///
/// The size limit is checked first, so a file that is both too large
/// and of an unsupported type is reported as too large.
///
/// # Errors
///
/// Returns [`SelectionError::TooLarge`] if the declared size exceeds
/// `config.max_file_size`. Returns [`SelectionError::UnsupportedType`]
/// if the media type matches none of `config.accept`.
pub fn validate(handle: &FileHandle, config: &UploadConfig) -> Result<(), SelectionError> {
    check(&handle.name, handle.size, &handle.media_type, config)
}

/// Same check as [`validate`], run on metadata alone so a host can
/// reject a file before reading its bytes.
///
/// # Errors
///
/// See [`validate`].
pub fn validate_meta(meta: &FileMeta, config: &UploadConfig) -> Result<(), SelectionError> {
    check(&meta.name, meta.size, &meta.media_type, config)
}

fn check(
    name: &str,
    size: u64,
    media_type: &MediaType,
    config: &UploadConfig,
) -> Result<(), SelectionError> {
    if size > config.max_file_size {
        return Err(SelectionError::TooLarge {
            name: name.to_owned(),
            size,
            limit: config.max_file_size,
        });
    }

    if !config
        .accept
        .iter()
        .any(|pattern| pattern.matches(media_type))
    {
        return Err(SelectionError::UnsupportedType {
            name: name.to_owned(),
            media_type: media_type.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaPattern;

    fn handle(name: &str, media_type: &str, size: u64) -> FileHandle {
        FileMeta::new(name, size, Some(media_type)).into_handle(Vec::new())
    }

    #[test]
    fn accepts_default_kinds() {
        let config = UploadConfig::default();
        for (name, media_type) in [
            ("a.txt", "text/plain"),
            ("b.png", "image/png"),
            ("c.pdf", "application/pdf"),
        ] {
            assert!(validate(&handle(name, media_type, 10), &config).is_ok());
        }
    }

    #[test]
    fn size_limit_is_inclusive() {
        let config = UploadConfig::default();
        let limit = UploadConfig::DEFAULT_MAX_FILE_SIZE;
        let at_limit = handle("a.png", "image/png", limit);
        assert!(validate(&at_limit, &config).is_ok());

        let over = handle("a.png", "image/png", limit + 1);
        assert!(matches!(
            validate(&over, &config),
            Err(SelectionError::TooLarge { ref name, .. }) if name == "a.png"
        ));
    }

    #[test]
    fn rejects_unaccepted_type() {
        let config = UploadConfig::default();
        let result = validate(&handle("c.bin", "application/octet-stream", 10), &config);
        assert_eq!(
            result,
            Err(SelectionError::UnsupportedType {
                name: "c.bin".into(),
                media_type: "application/octet-stream".into(),
            })
        );
    }

    #[test]
    fn too_large_wins_over_unsupported() {
        let config = UploadConfig {
            max_file_size: 5,
            ..UploadConfig::default()
        };
        let result = validate(&handle("c.bin", "application/octet-stream", 10), &config);
        assert!(matches!(result, Err(SelectionError::TooLarge { .. })));
    }

    #[test]
    fn custom_accept_list() {
        let config = UploadConfig {
            accept: vec![MediaPattern::new("*/*")],
            ..UploadConfig::default()
        };
        let bin = handle("c.bin", "application/octet-stream", 10);
        assert!(validate(&bin, &config).is_ok());
    }

    #[test]
    fn empty_accept_list_rejects_everything() {
        let config = UploadConfig {
            accept: Vec::new(),
            ..UploadConfig::default()
        };
        let txt = handle("a.txt", "text/plain", 1);
        assert!(validate(&txt, &config).is_err());
    }

    #[test]
    fn oversize_metadata_is_rejected_without_bytes() {
        let config = UploadConfig::default();
        let meta = FileMeta::new("huge.png", 6 * 1024 * 1024, Some("image/png"));
        assert_eq!(
            validate_meta(&meta, &config),
            Err(SelectionError::TooLarge {
                name: "huge.png".into(),
                size: 6 * 1024 * 1024,
                limit: UploadConfig::DEFAULT_MAX_FILE_SIZE,
            })
        );
    }

    #[test]
    fn declared_type_decides_acceptance() {
        let config = UploadConfig::default();
        // No extension mapping for .avif, so only the declared type admits it.
        let declared = FileMeta::new("photo.avif", 10, Some("image/avif"));
        assert!(validate_meta(&declared, &config).is_ok());

        let inferred = FileMeta::new("photo.avif", 10, None);
        assert_eq!(inferred.media_type.as_str(), "application/octet-stream");
        assert!(matches!(
            validate_meta(&inferred, &config),
            Err(SelectionError::UnsupportedType { .. })
        ));
    }
}
