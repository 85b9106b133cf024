//! Filename checks and multipart plumbing for the upload handler

use axum::extract::multipart::Field;
use futures::TryStreamExt;
use pixdrop_storage::StorageReader;
use tokio_util::io::StreamReader;
use unicode_normalization::UnicodeNormalization;

const MAX_FILENAME_LENGTH: usize = 255;

/// Lower-cased text after the last `.`, or `None` when the name has no `.`.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

/// Whether the filename's extension is in the allow-set (entries are lower-case).
pub fn allowed_file(filename: &str, allowed_extensions: &[String]) -> bool {
    file_extension(filename).is_some_and(|extension| allowed_extensions.contains(&extension))
}

/// Reduce a client-supplied filename to a flat, ASCII-only storage key.
///
/// Non-ASCII characters are decomposed and dropped, directory separators and
/// whitespace runs become `_`, everything outside `[A-Za-z0-9._-]` is removed
/// and leading/trailing `.`/`_` are stripped. The result never contains a path
/// separator, so it cannot leave the bucket root. Applying it twice gives the
/// same result as applying it once.
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let safe: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = safe.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        return "file".to_string();
    }

    if trimmed.len() <= MAX_FILENAME_LENGTH {
        return trimmed.to_string();
    }

    // Keep the extension when shortening
    match trimmed.rsplit_once('.') {
        Some((stem, extension)) if extension.len() + 1 < MAX_FILENAME_LENGTH => {
            let stem_len = MAX_FILENAME_LENGTH - extension.len() - 1;
            format!("{}.{}", &stem[..stem_len.min(stem.len())], extension)
        }
        _ => trimmed[..MAX_FILENAME_LENGTH]
            .trim_end_matches(|c| c == '.' || c == '_')
            .to_string(),
    }
}

/// Expose a multipart file field as a byte reader for the storage backend.
pub fn field_reader(field: Field<'_>) -> StorageReader<'_> {
    Box::pin(StreamReader::new(field.map_err(std::io::Error::other)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_set() -> Vec<String> {
        ["png", "jpg", "jpeg", "gif"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn extension_is_after_last_dot_and_lowercased() {
        assert_eq!(file_extension("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(file_extension("archive.tar.GZ").as_deref(), Some("gz"));
        assert_eq!(file_extension("trailing."), Some(String::new()));
        assert_eq!(file_extension("README"), None);
    }

    #[test]
    fn allowed_file_is_case_insensitive() {
        let allowed = allow_set();
        for name in ["a.png", "a.PNG", "a.JpG", "a.jpeg", "a.gif", ".png", "x.txt.gif"] {
            assert!(allowed_file(name, &allowed), "{} should be allowed", name);
        }
    }

    #[test]
    fn allowed_file_rejects_other_suffixes() {
        let allowed = allow_set();
        for name in ["notes.txt", "README", "image.", "image.png.exe", "png", "a.webp"] {
            assert!(!allowed_file(name, &allowed), "{} should be rejected", name);
        }
    }

    #[test]
    fn sanitize_keeps_safe_names() {
        for name in ["photo.JPG", "my-file_1.jpg", "image.gif", "a.b.c.png"] {
            assert_eq!(sanitize_filename(name), name);
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "photo.JPG",
            "../../etc/passwd.png",
            "My cool   picture.jpeg",
            "C:\\Users\\me\\Desktop\\shot.png",
            "café au lait.gif",
            "__.hidden_.png",
            "tab\tand\nnewline.png",
            "\u{1}\u{7f}ctrl.gif",
            "...",
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn sanitize_strips_traversal_and_absolute_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "etc_passwd.png");
        assert_eq!(sanitize_filename("/var/www/index.png"), "var_www_index.png");
        assert_eq!(sanitize_filename("..\\..\\evil.gif"), "evil.gif");
        assert_eq!(sanitize_filename("C:\\Users\\me\\shot.png"), "C_Users_me_shot.png");

        for input in ["../x.png", "a/../../b.jpg", "/abs/path.gif", "..\\y.jpeg"] {
            let key = sanitize_filename(input);
            assert!(!key.contains('/'), "{:?} -> {:?}", input, key);
            assert!(!key.contains('\\'), "{:?} -> {:?}", input, key);
            assert!(!key.starts_with('.'), "{:?} -> {:?}", input, key);
        }
    }

    #[test]
    fn sanitize_handles_whitespace_unicode_and_control_chars() {
        assert_eq!(sanitize_filename("My cool   picture.jpeg"), "My_cool_picture.jpeg");
        assert_eq!(sanitize_filename("café.gif"), "cafe.gif");
        assert_eq!(sanitize_filename("a\u{0}b\u{1b}c.png"), "abc.png");
        assert_eq!(sanitize_filename("照片.png"), "png");
        assert_eq!(sanitize_filename("..."), "file");
    }

    #[test]
    fn sanitize_truncates_but_keeps_extension() {
        let long = format!("{}.png", "a".repeat(400));
        let key = sanitize_filename(&long);
        assert_eq!(key.len(), MAX_FILENAME_LENGTH);
        assert!(key.ends_with(".png"));
        assert_eq!(sanitize_filename(&key), key);
    }
}
