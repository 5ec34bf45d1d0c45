use std::fmt;
use std::path::Path;

use lofty::tag::{ItemKey, TagType};

use crate::error::{Error, Result};

/// ID3v2 frame holding a free-form year.
pub(crate) const TYER: &str = "TYER";

/// Supported tag containers, chosen purely by file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagFormat {
    /// MPEG audio with an ID3v2 tag (TIT2, TPE1, TALB, TDRC/TYER, TCON, TRCK).
    Mp3,
    /// FLAC with Vorbis comments (TITLE, ARTIST, ALBUM, DATE/YEAR, GENRE, TRACKNUMBER).
    Flac,
}

impl TagFormat {
    /// Pick the format for `path`, or fail with `Error::UnsupportedFormat`.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// Case-insensitive lookup of an extension without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
        }
    }

    /// Some platforms cannot guess a MIME type for FLAC at all.
    pub(crate) fn tolerates_unknown_mime(self) -> bool {
        matches!(self, Self::Flac)
    }

    pub(crate) fn tag_type(self) -> TagType {
        match self {
            Self::Mp3 => TagType::Id3v2,
            Self::Flac => TagType::VorbisComments,
        }
    }

    /// Keys tried in order when reading the year.
    ///
    /// ID3v2.4 keeps a plain TYER frame as an unmapped item; ID3v2.3 tags
    /// already have it folded into TDRC by lofty.
    pub(crate) fn year_keys(self) -> [ItemKey; 2] {
        match self {
            Self::Mp3 => [ItemKey::RecordingDate, ItemKey::Unknown(TYER.to_string())],
            Self::Flac => [ItemKey::RecordingDate, ItemKey::Year],
        }
    }
}

impl fmt::Display for TagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mp3 => "MP3",
            Self::Flac => "FLAC",
        })
    }
}
