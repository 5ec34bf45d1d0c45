use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;
use crate::error::Result;
use crate::tags::is_readable_audio;

use super::filter::{is_hidden, looks_supported};

/// Absolute form of `path`, with symlinks resolved when the path exists.
///
/// Paths that do not exist are made absolute against the current directory
/// and cleaned of `.` and `..` components lexically.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(p) = fs::canonicalize(path) {
        return p;
    }
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut out = PathBuf::new();
    for c in abs.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn classify(entry: walkdir::Result<DirEntry>, settings: &LibrarySettings) -> Option<Result<PathBuf>> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) if e.loop_ancestor().is_some() => {
            warn!(error = %e, "skipping symlink loop");
            return None;
        }
        Err(e) => return Some(Err(e.into())),
    };

    let path = entry.path();
    if !path.is_file() {
        return None;
    }

    let Some(format) = looks_supported(path) else {
        trace!(path = %path.display(), "not an mp3/flac candidate");
        return None;
    };

    if settings.sanity_check && !is_readable_audio(path) {
        debug!(path = %path.display(), %format, "failed sanity check, skipping");
        return None;
    }

    Some(Ok(resolve_path(path)))
}

/// Lazily walk `root` and yield every supported audio file.
///
/// Items come in traversal order (file-name order when
/// `settings.sort_entries` is set). A missing root yields nothing.
pub fn iter_audio_files<'a>(
    root: &Path,
    settings: &'a LibrarySettings,
) -> impl Iterator<Item = Result<PathBuf>> + 'a {
    let walker = root.exists().then(|| {
        let walker = WalkDir::new(root).follow_links(settings.follow_links);
        if settings.sort_entries {
            walker.sort_by_file_name()
        } else {
            walker
        }
    });

    let include_hidden = settings.include_hidden;
    walker
        .into_iter()
        .flat_map(move |walker| {
            walker.into_iter().filter_entry(move |e| {
                include_hidden || e.depth() == 0 || !is_hidden(e.file_name())
            })
        })
        .filter_map(move |entry| classify(entry, settings))
}

/// Collect every supported audio file under `root` as absolute paths.
///
/// A missing root gives an empty list. Walk errors other than symlink loops
/// abort the scan.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Result<Vec<PathBuf>> {
    let files = iter_audio_files(root, settings).collect::<Result<Vec<_>>>()?;
    debug!(root = %root.display(), count = files.len(), "scan finished");
    Ok(files)
}
