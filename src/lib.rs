//! Music library tooling: find MP3/FLAC files, read and write their tags,
//! and build, save and load XSPF playlists.

pub mod audio;
pub mod config;
pub mod error;
pub mod library;
pub mod playlist;
pub mod tags;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
