use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::library::resolve_path;
use crate::tags::{AudioFile, TrackMetadata};

pub const UNKNOWN_ARTIST: &str = "Unknown";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const DEFAULT_PLAYLIST_NAME: &str = "Untitled";

fn non_blank(v: impl Into<String>) -> Option<String> {
    let v = v.into();
    (!v.trim().is_empty()).then_some(v)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One playlist entry.
///
/// Title, artist and album always hold a value: missing ones are replaced by
/// the file stem, `UNKNOWN_ARTIST` and `UNKNOWN_ALBUM` when the record is
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// Absolute path for local files; the raw location for remote entries.
    pub path: PathBuf,
    /// `file://` URI for local files, or the verbatim remote location.
    pub location: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: Option<Duration>,
    pub track_number: Option<String>,
}

impl TrackRecord {
    /// A local entry with default metadata. `path` is resolved to an absolute path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = resolve_path(path.as_ref());
        let location = Url::from_file_path(&path)
            .map(String::from)
            .unwrap_or_else(|_| format!("file://{}", path.display()));
        Self::with_location(path, location)
    }

    /// An entry whose location is not a local file (e.g. an `http://` stream).
    pub fn remote(location: impl Into<String>) -> Self {
        let location = location.into();
        Self::with_location(PathBuf::from(&location), location)
    }

    fn with_location(path: PathBuf, location: String) -> Self {
        Self {
            title: stem_of(&path),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration: None,
            track_number: None,
            path,
            location,
        }
    }

    /// A local entry populated from tag metadata.
    pub fn from_metadata(path: impl AsRef<Path>, md: &TrackMetadata) -> Self {
        let mut rec = Self::new(path);
        if let Some(v) = &md.title {
            rec = rec.with_title(v.as_str());
        }
        if let Some(v) = &md.artist {
            rec = rec.with_artist(v.as_str());
        }
        if let Some(v) = &md.album {
            rec = rec.with_album(v.as_str());
        }
        if let Some(secs) = md.duration_secs {
            rec = rec.with_duration(Duration::from_secs(secs));
        }
        rec.track_number = md.track_number.clone();
        rec
    }

    /// Blank values keep the current (default) title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        if let Some(v) = non_blank(title) {
            self.title = v;
        }
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        if let Some(v) = non_blank(artist) {
            self.artist = v;
        }
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        if let Some(v) = non_blank(album) {
            self.album = v;
        }
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_track_number(mut self, track_number: impl Into<String>) -> Self {
        self.track_number = non_blank(track_number);
        self
    }

    pub fn is_local(&self) -> bool {
        self.location.starts_with("file://")
    }

    /// `"Artist - Title"`.
    pub fn display(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

/// An ordered list of tracks with a name.
///
/// Insertion order is playback order. The same path may appear more than
/// once until `dedup_by_path` is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    name: String,
    tracks: Vec<TrackRecord>,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYLIST_NAME)
    }
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Build a playlist by reading the tags of every file in `paths`.
    ///
    /// Files whose tags cannot be read still get an entry with default
    /// metadata.
    pub fn from_paths<P: AsRef<Path>>(
        name: impl Into<String>,
        paths: impl IntoIterator<Item = P>,
    ) -> Self {
        let mut playlist = Self::new(name);
        for p in paths {
            let p = p.as_ref();
            let rec = match AudioFile::from_path(p).and_then(|f| f.read_metadata()) {
                Ok(md) => TrackRecord::from_metadata(p, &md),
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "using bare entry");
                    TrackRecord::new(p)
                }
            };
            playlist.add_track(rec);
        }
        playlist
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<TrackRecord> {
        self.tracks
    }

    pub fn add_track(&mut self, track: TrackRecord) {
        self.tracks.push(track);
    }

    /// Remove and return the track at `index`; `None` if out of range.
    pub fn remove_track(&mut self, index: usize) -> Option<TrackRecord> {
        (index < self.tracks.len()).then(|| self.tracks.remove(index))
    }

    /// Move the track at `from` so it ends up at index `to`.
    ///
    /// Both indices must be in range; otherwise nothing changes and `false`
    /// is returned.
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return false;
        }
        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        true
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn get(&self, index: usize) -> Option<&TrackRecord> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackRecord> {
        self.tracks.iter()
    }

    /// Sum of the known durations.
    pub fn total_duration(&self) -> Duration {
        self.tracks.iter().filter_map(|t| t.duration).sum()
    }

    /// Drop later entries that repeat an earlier path. Returns how many were removed.
    pub fn dedup_by_path(&mut self) -> usize {
        let before = self.tracks.len();
        let mut seen = HashSet::new();
        self.tracks.retain(|t| seen.insert(t.path.clone()));
        before - self.tracks.len()
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a TrackRecord;
    type IntoIter = std::slice::Iter<'a, TrackRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Playlist '{}' ({} tracks, {} min)",
            self.name,
            self.tracks.len(),
            self.total_duration().as_secs() / 60
        )
    }
}
