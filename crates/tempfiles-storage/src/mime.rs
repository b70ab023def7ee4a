//! Content type guessing for downloads.

/// MIME type for a stored file, guessed from its extension.
///
/// Unknown or missing extensions yield `application/octet-stream`.
pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string()
}
