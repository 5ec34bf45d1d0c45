//! Tag reading and writing for MP3 (ID3v2) and FLAC (Vorbis comments).
//!
//! `AudioFile` picks a `TagFormat` from the file extension and maps the fixed
//! `TrackMetadata` schema onto that format's fields. Every read or write
//! opens the file, works on it in memory and flushes once; nothing is kept
//! open between calls.

mod date;
mod file;
mod format;
mod model;
mod read;
mod write;

pub use date::normalize_year;
pub use file::{AudioFile, validate_audio_file};
pub use format::TagFormat;
pub use model::{MetadataUpdate, TrackMetadata};

pub(crate) use read::is_readable_audio;
