//! Library scanning: find MP3/FLAC files under a directory tree.
//!
//! The scanner is a plain blocking call. Candidates are filtered by
//! extension, by the MIME type guessed from their name and, optionally, by
//! whether the tag reader can actually parse them. Filtered files are simply
//! left out of the result.

mod filter;
mod scan;

pub use scan::{iter_audio_files, resolve_path, scan};
