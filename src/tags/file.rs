use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::format::TagFormat;
use super::model::{MetadataUpdate, TrackMetadata};
use super::{read, write};

/// Check that `path` exists, is a regular file and has a supported extension.
pub fn validate_audio_file(path: &Path) -> Result<TagFormat> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    TagFormat::from_path(path)
}

/// A tagged audio file on disk.
///
/// Holds only the path and its format; the file itself is opened anew by each
/// `read_metadata` / `update_metadata` call.
#[derive(Debug, Clone)]
pub struct AudioFile {
    path: PathBuf,
    format: TagFormat,
}

impl AudioFile {
    /// Fails with `Error::UnsupportedFormat` for anything but `.mp3` / `.flac`.
    /// No I/O happens here.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = TagFormat::from_path(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> TagFormat {
        self.format
    }

    pub fn read_metadata(&self) -> Result<TrackMetadata> {
        read::read_metadata(&self.path, self.format)
    }

    /// Write every `Some` field of `update` to the file.
    ///
    /// Returns `Ok(false)` when the final save fails; errors while opening or
    /// parsing the file are returned as `Err`. An empty update does not touch
    /// the file and returns `Ok(true)`.
    pub fn update_metadata(&self, update: &MetadataUpdate) -> Result<bool> {
        if update.is_empty() {
            return Ok(true);
        }
        write::update_metadata(&self.path, self.format, update)
    }
}
