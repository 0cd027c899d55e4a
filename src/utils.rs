//! Utility functions for filenames and human-readable formatting

/// Maximum length of a sanitized filename stem (characters)
const MAX_FILENAME_LEN: usize = 200;

/// Convert a byte count to a human-readable size string
///
/// A size of zero reads as "Unknown": the resolver reports zero when the
/// service omitted both the exact and the approximate size.
///
/// # Examples
///
/// ```
/// use playlist_grab::utils::format_size;
///
/// assert_eq!(format_size(0), "Unknown");
/// assert_eq!(format_size(47_395_635), "45.2 MB");
/// ```
#[must_use]
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "Unknown".to_string();
    }

    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }

    format!("{:.1} TB", size)
}

/// Sanitize a string for use as a filename on any OS
///
/// Replaces characters that are invalid on Windows or POSIX filesystems,
/// trims leading/trailing dots and spaces, and caps the length. An input
/// that sanitizes to nothing becomes "output".
///
/// # Examples
///
/// ```
/// use playlist_grab::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("My Playlist: Vol. 2"), "My Playlist_ Vol. 2");
/// assert_eq!(sanitize_filename(" ... "), "output");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    const INVALID: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

    let cleaned: String = name
        .chars()
        .map(|c| if INVALID.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == ' ');

    let capped: String = trimmed.chars().take(MAX_FILENAME_LEN).collect();

    // "???" sanitizes to "___" which trims to nothing only when the input
    // was all dots/spaces; underscores survive, so re-check emptiness after
    // the trim, not before the replacement.
    if capped.is_empty() {
        "output".to_string()
    } else {
        capped
    }
}
