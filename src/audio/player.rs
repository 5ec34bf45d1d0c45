use std::path::Path;

use rodio::{OutputStream, OutputStreamBuilder};
use tracing::{info, warn};

use crate::config::PlaybackSettings;
use crate::error::{Error, Result};
use crate::playlist::TrackRecord;

use super::sink::{create_sink, open_source};

/// Local entries of `tracks`, in order. Remote ones are logged and dropped.
pub(super) fn local_entries(tracks: &[TrackRecord]) -> impl Iterator<Item = &TrackRecord> {
    tracks.iter().filter(|t| {
        if !t.is_local() {
            warn!(location = %t.location, "skipping non-local entry");
        }
        t.is_local()
    })
}

/// Plays files one after another, blocking the calling thread.
pub struct Player {
    stream: OutputStream,
    volume: f32,
}

impl Player {
    /// Open the default output device.
    pub fn new(settings: &PlaybackSettings) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Playback(format!("no audio output device: {e}")))?;
        // rodio prints to stderr when the stream is dropped.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            volume: settings.volume,
        })
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play one file to the end.
    pub fn play_file(&self, path: &Path) -> Result<()> {
        let source = open_source(path)?;
        let sink = create_sink(&self.stream, source, self.volume);
        info!(path = %path.display(), "playing");
        sink.sleep_until_end();
        Ok(())
    }

    /// Play every local entry in order and return how many were played.
    ///
    /// Remote entries and files that fail to open or decode are skipped with
    /// a warning.
    pub fn play_queue(&self, tracks: &[TrackRecord]) -> usize {
        let mut played = 0;
        for track in local_entries(tracks) {
            match self.play_file(&track.path) {
                Ok(()) => played += 1,
                Err(e) => warn!(path = %track.path.display(), error = %e, "skipping track"),
            }
        }
        played
    }
}
