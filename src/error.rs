//! Crate-wide error type.
//!
//! Scan exclusions and skipped playlist entries are not errors; they never
//! surface here. Failed tag saves are reported as `Ok(false)` by
//! `AudioFile::update_metadata` instead of an `Error`.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Extension is neither `.mp3` nor `.flac`.
    #[error("unsupported format for {path} (expected .mp3 or .flac)")]
    UnsupportedFormat { path: PathBuf },

    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tag library could not open or parse the file.
    #[error("failed to read tags from {path}: {source}")]
    Tag {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("malformed playlist document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write playlist document: {0}")]
    XmlWrite(#[source] std::io::Error),

    #[error("playback error: {0}")]
    Playback(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn tag(path: impl Into<PathBuf>, source: lofty::error::LoftyError) -> Self {
        Self::Tag {
            path: path.into(),
            source,
        }
    }
}
