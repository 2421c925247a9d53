//! Content type detection by magic-byte sniffing

use std::path::Path;

/// Content type used when sniffing finds no known signature
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Sniff the content type of a file on disk.
///
/// Only the leading bytes are inspected. Unreadable, missing and empty files
/// all come back as `None`; this never fails.
pub fn classify(path: &Path) -> Option<&'static str> {
    match infer::get_from_path(path) {
        Ok(Some(kind)) => Some(kind.mime_type()),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("content sniffing failed for {}: {}", path.display(), e);
            None
        }
    }
}
