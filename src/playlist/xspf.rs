//! XSPF 1.0 reading and writing.
//!
//! `<duration>` is written and read in milliseconds, as XSPF defines it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quick_xml::NsReader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

use super::model::{DEFAULT_PLAYLIST_NAME, Playlist, TrackRecord};

pub const XSPF_NAMESPACE: &str = "http://xspf.org/ns/0/";

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(Error::XmlWrite)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_track(writer: &mut Writer<Vec<u8>>, track: &TrackRecord) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new("track")))?;
    write_text_element(writer, "location", &track.location)?;
    for (name, value) in [
        ("title", &track.title),
        ("creator", &track.artist),
        ("album", &track.album),
    ] {
        if !value.is_empty() {
            write_text_element(writer, name, value)?;
        }
    }
    if let Some(d) = track.duration {
        write_text_element(writer, "duration", &d.as_millis().to_string())?;
    }
    emit(writer, Event::End(BytesEnd::new("track")))?;
    Ok(())
}

/// Render `playlist` as an indented XSPF document with an XML declaration.
pub fn serialize(playlist: &Playlist) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let root = BytesStart::new("playlist")
        .with_attributes([("version", "1"), ("xmlns", XSPF_NAMESPACE)]);
    emit(&mut writer, Event::Start(root))?;

    let title = match playlist.name().trim() {
        "" => DEFAULT_PLAYLIST_NAME,
        _ => playlist.name(),
    };
    write_text_element(&mut writer, "title", title)?;

    emit(&mut writer, Event::Start(BytesStart::new("trackList")))?;
    for track in playlist {
        write_track(&mut writer, track)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("trackList")))?;
    emit(&mut writer, Event::End(BytesEnd::new("playlist")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A child value, remembering whether it came from the XSPF namespace.
#[derive(Default)]
struct Slot(Option<(String, bool)>);

impl Slot {
    /// Namespaced values win over unnamespaced ones; otherwise the first wins.
    fn offer(&mut self, value: String, namespaced: bool) {
        let replace = match &self.0 {
            None => true,
            Some((_, had_ns)) => namespaced && !had_ns,
        };
        if replace {
            self.0 = Some((value, namespaced));
        }
    }

    fn take(self) -> Option<String> {
        self.0.map(|(v, _)| v)
    }
}

#[derive(Copy, Clone)]
enum Field {
    Location,
    Title,
    Creator,
    Album,
    Duration,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"location" => Some(Self::Location),
            b"title" => Some(Self::Title),
            b"creator" => Some(Self::Creator),
            b"album" => Some(Self::Album),
            b"duration" => Some(Self::Duration),
            _ => None,
        }
    }
}

#[derive(Default)]
struct TrackFields {
    location: Slot,
    title: Slot,
    creator: Slot,
    album: Slot,
    duration: Slot,
}

impl TrackFields {
    fn slot(&mut self, field: Field) -> &mut Slot {
        match field {
            Field::Location => &mut self.location,
            Field::Title => &mut self.title,
            Field::Creator => &mut self.creator,
            Field::Album => &mut self.album,
            Field::Duration => &mut self.duration,
        }
    }

    /// `None` when the track has no location.
    fn into_record(self) -> Option<TrackRecord> {
        let location = self.location.take()?;
        let mut rec = if location.starts_with("file://") {
            TrackRecord::new(file_uri_to_path(&location))
        } else {
            TrackRecord::remote(location)
        };

        if let Some(v) = self.title.take() {
            rec = rec.with_title(v);
        }
        if let Some(v) = self.creator.take() {
            rec = rec.with_artist(v);
        }
        if let Some(v) = self.album.take() {
            rec = rec.with_album(v);
        }
        if let Some(ms) = self.duration.take().and_then(|v| v.parse::<u64>().ok()) {
            rec = rec.with_duration(Duration::from_millis(ms));
        }
        Some(rec)
    }
}

/// Percent-decode a `file://` URI into a path.
fn file_uri_to_path(location: &str) -> PathBuf {
    Url::parse(location)
        .ok()
        .and_then(|u| u.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(location.trim_start_matches("file://")))
}

/// `Some(true)` for the XSPF namespace, `Some(false)` for no namespace,
/// `None` for anything else.
fn xspf_namespace(ns: &ResolveResult) -> Option<bool> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) if *uri == XSPF_NAMESPACE.as_bytes() => Some(true),
        ResolveResult::Unbound => Some(false),
        _ => None,
    }
}

/// What the text currently being read belongs to.
enum Capture {
    None,
    PlaylistTitle,
    TrackField(Field, bool),
}

/// Parse an XSPF document, keeping its title as the playlist name.
///
/// Tracks without a location are skipped.
pub fn deserialize_playlist(xml: &str) -> Result<Playlist> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut name: Option<String> = None;
    let mut tracks: Vec<TrackRecord> = Vec::new();
    let mut skipped = 0usize;

    let mut depth = 0usize;
    let mut track: Option<(TrackFields, usize)> = None;
    let mut capture = Capture::None;
    let mut text = String::new();

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(e)) => {
                depth += 1;
                let Some(namespaced) = xspf_namespace(&ns) else {
                    continue;
                };
                let local = e.local_name();
                match &track {
                    None if local.as_ref() == b"track" => {
                        track = Some((TrackFields::default(), depth));
                    }
                    None if depth == 2 && local.as_ref() == b"title" => {
                        capture = Capture::PlaylistTitle;
                        text.clear();
                    }
                    Some((_, track_depth)) if depth == track_depth + 1 => {
                        if let Some(field) = Field::from_local_name(local.as_ref()) {
                            capture = Capture::TrackField(field, namespaced);
                            text.clear();
                        }
                    }
                    _ => {}
                }
            }
            (ns, Event::Empty(e)) => {
                // `<track/>` has no location and is dropped like any other.
                if track.is_none()
                    && xspf_namespace(&ns).is_some()
                    && e.local_name().as_ref() == b"track"
                {
                    skipped += 1;
                }
            }
            (_, Event::Text(t)) => {
                if !matches!(capture, Capture::None) {
                    text.push_str(&t.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            (_, Event::CData(c)) => {
                if !matches!(capture, Capture::None) {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            (_, Event::End(_)) => {
                match std::mem::replace(&mut capture, Capture::None) {
                    Capture::PlaylistTitle => {
                        name = Some(text.trim().to_string()).filter(|v| !v.is_empty());
                    }
                    Capture::TrackField(field, namespaced) => {
                        let value = text.trim();
                        if let Some((fields, _)) = track.as_mut() {
                            if !value.is_empty() {
                                fields.slot(field).offer(value.to_string(), namespaced);
                            }
                        }
                    }
                    Capture::None => {
                        if matches!(&track, Some((_, d)) if *d == depth) {
                            if let Some((fields, _)) = track.take() {
                                match fields.into_record() {
                                    Some(rec) => tracks.push(rec),
                                    None => skipped += 1,
                                }
                            }
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    if skipped > 0 {
        debug!(skipped, "dropped tracks without a location");
    }

    let mut playlist = Playlist::new(name.unwrap_or_else(|| DEFAULT_PLAYLIST_NAME.to_string()));
    for rec in tracks {
        playlist.add_track(rec);
    }
    Ok(playlist)
}

/// Parse an XSPF document into its ordered track records.
pub fn deserialize(xml: &str) -> Result<Vec<TrackRecord>> {
    Ok(deserialize_playlist(xml)?.into_tracks())
}

impl Playlist {
    /// Write the playlist to `path` as XSPF.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = serialize(self)?;
        fs::write(path, xml).map_err(|e| Error::io(path, e))?;
        info!(path = %path.display(), tracks = self.len(), "playlist saved");
        Ok(())
    }

    /// Read an XSPF file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        deserialize_playlist(&xml)
    }
}
