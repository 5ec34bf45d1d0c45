//! Console text for command output.

use std::time::Duration;

use tunedex::playlist::TrackRecord;
use tunedex::tags::{TagFormat, TrackMetadata};

/// `"3 min 25 s"`, `"42 s"`, or `"Unknown"`.
pub fn format_duration(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "Unknown".to_string();
    };
    let secs = d.as_secs();
    if secs < 60 {
        format!("{secs} s")
    } else {
        format!("{} min {} s", secs / 60, secs % 60)
    }
}

/// One `Label: value` line per field; missing fields print as `-`.
pub fn metadata_lines(md: &TrackMetadata, format: TagFormat) -> Vec<String> {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    vec![
        format!("Format:   {format}"),
        format!("Title:    {}", show(&md.title)),
        format!("Artist:   {}", show(&md.artist)),
        format!("Album:    {}", show(&md.album)),
        format!("Track:    {}", show(&md.track_number)),
        format!("Year:     {}", show(&md.year)),
        format!("Genre:    {}", show(&md.genre)),
        format!(
            "Duration: {}",
            format_duration(md.duration_secs.map(Duration::from_secs))
        ),
    ]
}

/// `"  1. Artist - Title (3 min 25 s)"`, numbered from 1.
pub fn track_line(index: usize, track: &TrackRecord) -> String {
    format!(
        "{:>3}. {} ({})",
        index + 1,
        track.display(),
        format_duration(track.duration)
    )
}
