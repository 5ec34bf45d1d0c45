use std::path::Path;

use lofty::file::{AudioFile as _, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};
use tracing::debug;

use crate::error::{Error, Result};

use super::date::normalize_year;
use super::format::TagFormat;
use super::model::TrackMetadata;

/// Open and fully parse `path` with lofty.
pub(super) fn open_tagged(path: &Path) -> Result<TaggedFile> {
    Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| Error::tag(path, e))
}

/// True when lofty recognizes `path` as an audio container it can parse.
pub(crate) fn is_readable_audio(path: &Path) -> bool {
    let probe = Probe::open(path).and_then(|p| Ok(p.guess_file_type()?));
    match probe {
        Ok(probe) if probe.file_type().is_some() => probe.read().is_ok(),
        _ => false,
    }
}

fn text(tag: &Tag, key: &ItemKey) -> Option<String> {
    tag.get_string(key)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Rejoin a track number lofty may have split into number and total.
fn track_number(tag: &Tag) -> Option<String> {
    let number = text(tag, &ItemKey::TrackNumber)?;
    if number.contains('/') {
        return Some(number);
    }
    match text(tag, &ItemKey::TrackTotal) {
        Some(total) => Some(format!("{number}/{total}")),
        None => Some(number),
    }
}

pub(super) fn read_metadata(path: &Path, format: TagFormat) -> Result<TrackMetadata> {
    let tagged = open_tagged(path)?;
    let duration_secs = Some(tagged.properties().duration().as_secs());

    let Some(tag) = tagged
        .tag(format.tag_type())
        .or_else(|| tagged.first_tag())
    else {
        debug!(path = %path.display(), "no tags found");
        return Ok(TrackMetadata {
            duration_secs,
            ..TrackMetadata::default()
        });
    };

    let year = format
        .year_keys()
        .iter()
        .find_map(|key| text(tag, key))
        .and_then(|raw| normalize_year(&raw));

    Ok(TrackMetadata {
        title: text(tag, &ItemKey::TrackTitle),
        artist: text(tag, &ItemKey::TrackArtist),
        album: text(tag, &ItemKey::AlbumTitle),
        track_number: track_number(tag),
        year,
        genre: text(tag, &ItemKey::Genre),
        duration_secs,
    })
}
