use super::player::local_entries;
use super::sink::open_source;
use crate::error::Error;
use crate::playlist::TrackRecord;
use std::fs;
use tempfile::tempdir;

#[test]
fn local_entries_drop_remote_locations() {
    let tracks = vec![
        TrackRecord::new("/music/a.mp3"),
        TrackRecord::remote("http://example.com/live.mp3"),
        TrackRecord::new("/music/b.flac"),
    ];
    let titles: Vec<_> = local_entries(&tracks).map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b"]);
}

#[test]
fn open_source_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let Err(err) = open_source(&dir.path().join("gone.mp3")) else {
        panic!("expected an error");
    };
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn open_source_rejects_undecodable_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noise.mp3");
    fs::write(&path, b"definitely not audio").unwrap();

    let Err(err) = open_source(&path) else {
        panic!("expected an error");
    };
    assert!(matches!(err, Error::Playback(_)));
}
