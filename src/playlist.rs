//! Playlists and their XSPF representation.

mod model;
mod xspf;

pub use model::{DEFAULT_PLAYLIST_NAME, Playlist, TrackRecord, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
pub use xspf::{XSPF_NAMESPACE, deserialize, deserialize_playlist, serialize};
