//! Storage-key construction.
//!
//! Key format: `{unix_millis}_{sanitized_filename}`. The timestamp prefix
//! gives probabilistic uniqueness across uploads of identically named files;
//! the key is computed once per request, after the file is fully received.

use chrono::Utc;

const MAX_FILENAME_LENGTH: usize = 255;

/// Build the storage key for an upload received now.
///
/// `filename` is the client-declared original filename; `None` (raw-binary
/// transport without an `x-filename` header) falls back to `file`.
pub fn build_storage_key(filename: Option<&str>) -> Result<String, String> {
    let sanitized = sanitize_filename(filename.unwrap_or("file"))?;
    Ok(format!("{}_{}", Utc::now().timestamp_millis(), sanitized))
}

/// Sanitize a filename to prevent path traversal and invalid characters.
///
/// Path components are stripped to the final file name, which neutralizes
/// traversal sequences like `foo/../bar`. An error is returned only when the
/// stripped name itself still contains `..`.
pub fn sanitize_filename(filename: &str) -> Result<String, String> {
    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err("Filename contains invalid path traversal".to_string());
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_embeds_the_sanitized_filename() {
        let key = build_storage_key(Some("photo.png")).unwrap();
        assert!(key.ends_with("_photo.png"));
        let millis: i64 = key.split('_').next().unwrap().parse().unwrap();
        assert!(millis > 0);
    }

    #[test]
    fn keys_differ_across_timestamps() {
        // Same filename, different millisecond timestamps -> different keys.
        let a = format!("{}_{}", 1700000000000i64, "a.png");
        let b = format!("{}_{}", 1700000000001i64, "a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn missing_filename_falls_back() {
        let key = build_storage_key(None).unwrap();
        assert!(key.ends_with("_file"));
    }

    #[test]
    fn sanitize_neutralizes_path_traversal() {
        // Only a bare `..` survives the strip and gets rejected; traversal
        // sequences inside a path reduce to their final component.
        assert!(sanitize_filename("..").is_err());
        assert_eq!(sanitize_filename("foo/../bar").unwrap(), "bar");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
    }

    #[test]
    fn sanitize_accepts_valid_names() {
        assert_eq!(sanitize_filename("image.png").unwrap(), "image.png");
        assert_eq!(sanitize_filename("my-file_1.jpg").unwrap(), "my-file_1.jpg");
    }

    #[test]
    fn sanitize_replaces_special_characters() {
        assert_eq!(
            sanitize_filename("mi archivo (1).png").unwrap(),
            "mi_archivo__1_.png"
        );
        assert_eq!(sanitize_filename("dir/name.txt").unwrap(), "name.txt");
    }
}
