//! Opening and decoding files into `rodio` sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::{Error, Result};

pub(super) type FileSource = Decoder<BufReader<File>>;

/// Open `path` and set up a decoder for it.
pub(super) fn open_source(path: &Path) -> Result<FileSource> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| Error::Playback(format!("cannot decode {}: {e}", path.display())))
}

/// A sink on `stream` that is already playing `source` at `volume`.
pub(super) fn create_sink(stream: &OutputStream, source: FileSource, volume: f32) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink
}
