use std::fs;
use std::io;
use std::path::Path;

use lofty::config::WriteOptions;
use lofty::error::LoftyError;
use lofty::file::TaggedFileExt;
use lofty::tag::items::Timestamp;
use lofty::tag::{Accessor, ItemKey, ItemValue, Tag, TagExt, TagItem};
use tracing::{debug, error};

use crate::error::Result;

use super::format::{TYER, TagFormat};
use super::model::MetadataUpdate;
use super::read::open_tagged;

fn set_text(tag: &mut Tag, key: ItemKey, value: Option<&String>) {
    if let Some(v) = value {
        tag.insert_text(key, v.clone());
    }
}

/// `"N/total"` sets both number and total; a bare `"N"` drops any old total.
fn set_track_number(tag: &mut Tag, value: Option<&String>) {
    let Some(v) = value else { return };
    match v.split_once('/') {
        Some((number, total)) if !total.trim().is_empty() => {
            tag.insert_text(ItemKey::TrackNumber, number.trim().to_string());
            tag.insert_text(ItemKey::TrackTotal, total.trim().to_string());
        }
        Some((number, _)) => {
            tag.insert_text(ItemKey::TrackNumber, number.trim().to_string());
            tag.remove_track_total();
        }
        None => {
            tag.insert_text(ItemKey::TrackNumber, v.trim().to_string());
            tag.remove_track_total();
        }
    }
}

/// The ISO 8601 form of `raw` when TDRC can hold it.
///
/// `YYYYMMDD` is rewritten as `YYYY-MM-DD` first. Values lofty would parse
/// differently from what was given, or with out-of-range parts, are refused.
fn id3_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let candidate = if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..])
    } else {
        raw.to_string()
    };

    let ts: Timestamp = candidate.parse().ok()?;
    let in_range = |v: Option<u8>, lo: u8, hi: u8| v.is_none_or(|v| (lo..=hi).contains(&v));
    let valid = in_range(ts.month, 1, 12)
        && in_range(ts.day, 1, 31)
        && in_range(ts.hour, 0, 23)
        && in_range(ts.minute, 0, 59)
        && in_range(ts.second, 0, 59);

    (valid && ts.to_string() == candidate).then_some(candidate)
}

/// Vorbis DATE takes any text. ID3v2 gets TDRC for timestamps and a plain
/// TYER frame for everything else, never both.
fn set_year(tag: &mut Tag, format: TagFormat, value: Option<&String>) {
    let Some(v) = value else { return };
    match format {
        TagFormat::Flac => {
            tag.insert_text(ItemKey::RecordingDate, v.clone());
        }
        TagFormat::Mp3 => {
            let tyer = ItemKey::Unknown(TYER.to_string());
            match id3_timestamp(v) {
                Some(iso) => {
                    tag.remove_key(&tyer);
                    tag.insert_text(ItemKey::RecordingDate, iso);
                }
                None => {
                    debug!(year = %v, "not a timestamp, writing TYER");
                    tag.remove_key(&ItemKey::RecordingDate);
                    tag.insert_unchecked(TagItem::new(tyer, ItemValue::Text(v.trim().to_string())));
                }
            }
        }
    }
}

fn apply(tag: &mut Tag, format: TagFormat, update: &MetadataUpdate) {
    set_text(tag, ItemKey::TrackTitle, update.title.as_ref());
    set_text(tag, ItemKey::TrackArtist, update.artist.as_ref());
    set_text(tag, ItemKey::AlbumTitle, update.album.as_ref());
    set_year(tag, format, update.year.as_ref());
    set_text(tag, ItemKey::Genre, update.genre.as_ref());
    set_track_number(tag, update.track_number.as_ref());
}

const FLAC_MARKER: &[u8] = b"fLaC";
const FLAC_LAST_BLOCK: u8 = 0x80;
const FLAC_PADDING: u8 = 1;
const FLAC_HEADER_LEN: usize = 4;
const FLAC_PADDING_LEN: usize = 1024;

/// Make a PADDING block the last metadata block of the FLAC at `path`.
///
/// lofty's FLAC writer needs one there. Audio frames are left untouched and
/// the return value says whether the file changed. Malformed block chains
/// are left for lofty to reject.
fn ensure_trailing_padding(path: &Path) -> io::Result<bool> {
    let mut bytes = fs::read(path)?;
    if !bytes.starts_with(FLAC_MARKER) {
        return Ok(false);
    }

    let mut pos = FLAC_MARKER.len();
    loop {
        let Some(header) = bytes.get(pos..pos + FLAC_HEADER_LEN) else {
            return Ok(false);
        };
        let flags = header[0];
        let len = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
        let end = pos + FLAC_HEADER_LEN + len;
        if end > bytes.len() {
            return Ok(false);
        }

        if flags & FLAC_LAST_BLOCK == 0 {
            pos = end;
            continue;
        }
        if flags & !FLAC_LAST_BLOCK == FLAC_PADDING {
            return Ok(false);
        }

        bytes[pos] = flags & !FLAC_LAST_BLOCK;
        let mut padding = vec![0; FLAC_HEADER_LEN + FLAC_PADDING_LEN];
        padding[0] = FLAC_LAST_BLOCK | FLAC_PADDING;
        padding[1..FLAC_HEADER_LEN].copy_from_slice(&(FLAC_PADDING_LEN as u32).to_be_bytes()[1..]);
        bytes.splice(end..end, padding);
        fs::write(path, &bytes)?;
        return Ok(true);
    }
}

fn save(tag: &Tag, path: &Path, format: TagFormat) -> std::result::Result<(), LoftyError> {
    if format == TagFormat::Flac && ensure_trailing_padding(path)? {
        debug!(path = %path.display(), "added trailing padding block");
    }
    tag.save_to_path(path, WriteOptions::default())
}

/// Read the file's tag and apply `update` on top of it.
fn prepare_tag(path: &Path, format: TagFormat, update: &MetadataUpdate) -> Result<Tag> {
    let tagged = open_tagged(path)?;
    let tag_type = format.tag_type();

    // Start from the existing tag so untouched fields survive the save.
    let mut tag = tagged
        .tag(tag_type)
        .cloned()
        .unwrap_or_else(|| Tag::new(tag_type));
    apply(&mut tag, format, update);
    Ok(tag)
}

/// Write `tag` back; failures are logged and reported as `false`.
fn persist(tag: &Tag, path: &Path, format: TagFormat) -> bool {
    match save(tag, path, format) {
        Ok(()) => {
            debug!(path = %path.display(), %format, "tags saved");
            true
        }
        Err(e) => {
            error!(path = %path.display(), %format, error = %e, "failed to save tags");
            false
        }
    }
}

pub(super) fn update_metadata(
    path: &Path,
    format: TagFormat,
    update: &MetadataUpdate,
) -> Result<bool> {
    let tag = prepare_tag(path, format, update)?;
    Ok(persist(&tag, path, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FLAC_AUDIO, bare_flac_bytes, write_bare_flac, write_flac, write_mp3};
    use tempfile::tempdir;

    #[test]
    fn timestamps_are_checked_before_tdrc() {
        assert_eq!(id3_timestamp("2018").as_deref(), Some("2018"));
        assert_eq!(id3_timestamp("2018-07-05").as_deref(), Some("2018-07-05"));
        assert_eq!(id3_timestamp("20180705").as_deref(), Some("2018-07-05"));
        assert_eq!(id3_timestamp("2018-07-05T10:30").as_deref(), Some("2018-07-05T10:30"));

        for raw in ["circa-2018", "05/07/2018", "2018-7-5", "2018-13-01", "20181340", "18"] {
            assert_eq!(id3_timestamp(raw), None, "{raw}");
        }
    }

    #[test]
    fn failed_save_reports_false_and_leaves_path_alone() {
        let dir = tempdir().unwrap();
        let path = write_mp3(dir.path(), "a.mp3");
        let update = MetadataUpdate::new().title("Song");
        let tag = prepare_tag(&path, TagFormat::Mp3, &update).unwrap();

        // Swap the file for a directory between reading and saving.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(!persist(&tag, &path, TagFormat::Mp3));
        assert!(path.is_dir());
        assert_eq!(fs::read_dir(&path).unwrap().count(), 0);
    }

    #[test]
    fn failed_flac_save_reports_false() {
        let dir = tempdir().unwrap();
        let path = write_flac(dir.path(), "a.flac", 1);
        let update = MetadataUpdate::new().title("Song");
        let tag = prepare_tag(&path, TagFormat::Flac, &update).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(!persist(&tag, &path, TagFormat::Flac));
        assert!(path.is_dir());
    }

    #[test]
    fn trailing_padding_is_added_after_the_last_block() {
        let dir = tempdir().unwrap();
        let path = write_bare_flac(dir.path(), "a.flac", 1);
        let before = bare_flac_bytes(1);

        assert!(ensure_trailing_padding(&path).unwrap());
        let after = fs::read(&path).unwrap();

        // STREAMINFO lost its last-block flag and is followed by PADDING.
        let streaminfo_end = 4 + FLAC_HEADER_LEN + 34;
        assert_eq!(after[4], 0x00);
        assert_eq!(&after[5..streaminfo_end], &before[5..streaminfo_end]);
        assert_eq!(
            &after[streaminfo_end..streaminfo_end + FLAC_HEADER_LEN],
            &[0x81, 0x00, 0x04, 0x00]
        );
        assert_eq!(after.len(), before.len() + FLAC_HEADER_LEN + FLAC_PADDING_LEN);
        assert!(after.ends_with(&FLAC_AUDIO));

        // Second pass finds the padding and leaves the file alone.
        assert!(!ensure_trailing_padding(&path).unwrap());
        assert_eq!(fs::read(&path).unwrap(), after);
    }

    #[test]
    fn padded_and_foreign_files_are_left_alone() {
        let dir = tempdir().unwrap();

        let padded = write_flac(dir.path(), "a.flac", 1);
        let before = fs::read(&padded).unwrap();
        assert!(!ensure_trailing_padding(&padded).unwrap());
        assert_eq!(fs::read(&padded).unwrap(), before);

        let mp3 = write_mp3(dir.path(), "b.flac");
        assert!(!ensure_trailing_padding(&mp3).unwrap());

        let truncated = dir.path().join("c.flac");
        fs::write(&truncated, &bare_flac_bytes(1)[..20]).unwrap();
        assert!(!ensure_trailing_padding(&truncated).unwrap());
    }
}
