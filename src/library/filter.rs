use std::ffi::OsStr;
use std::path::Path;

use crate::tags::TagFormat;

/// MIME types accepted for scanned files.
pub(super) const SUPPORTED_MIMES: &[&str] = &["audio/mpeg", "audio/mp3", "audio/flac", "audio/x-flac"];

pub(super) fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map(|n| n.starts_with('.')).unwrap_or(false)
}

/// Extension and MIME check; no I/O.
///
/// Returns the format the file would be read as.
pub(super) fn looks_supported(path: &Path) -> Option<TagFormat> {
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(TagFormat::from_extension)?;

    let mime_ok = match mime_guess::from_path(path).first() {
        Some(mime) => SUPPORTED_MIMES.contains(&mime.essence_str()),
        None => format.tolerates_unknown_mime(),
    };

    mime_ok.then_some(format)
}
