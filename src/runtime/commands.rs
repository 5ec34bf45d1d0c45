use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use tunedex::audio::Player;
use tunedex::config::Settings;
use tunedex::library::scan;
use tunedex::playlist::Playlist;
use tunedex::tags::{AudioFile, MetadataUpdate, validate_audio_file};

use super::cli::{Command, ScanArgs};
use super::format::{metadata_lines, track_line};

pub fn dispatch(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Info { file } => info_cmd(&file),
        Command::Scan(args) => scan_cmd(&args, settings),
        Command::Edit { file, fields } => edit_cmd(&file, fields.into()),
        Command::Play { file } => play_cmd(&file, settings),
        Command::PlayList { playlist } => play_list_cmd(&playlist, settings),
        Command::Show { playlist } => show_cmd(&playlist),
    }
}

fn info_cmd(file: &Path) -> Result<()> {
    let format = validate_audio_file(file)?;
    let md = AudioFile::from_path(file)?
        .read_metadata()
        .with_context(|| format!("cannot read tags of {}", file.display()))?;

    println!("{}", file.display());
    for line in metadata_lines(&md, format) {
        println!("  {line}");
    }
    Ok(())
}

fn scan_cmd(args: &ScanArgs, settings: &Settings) -> Result<()> {
    let library = args.apply(&settings.library);
    let files = scan(&args.dir, &library)
        .with_context(|| format!("cannot scan {}", args.dir.display()))?;

    if files.is_empty() {
        println!("No audio files found in {}", args.dir.display());
    }
    for f in &files {
        println!("{}", f.display());
    }

    if let Some(out) = &args.output {
        let name = args
            .name
            .clone()
            .unwrap_or_else(|| settings.playlist.default_name.clone());
        let playlist = Playlist::from_paths(name, &files);
        playlist
            .save(out)
            .with_context(|| format!("cannot write {}", out.display()))?;
        println!("Saved {playlist} to {}", out.display());
    }
    Ok(())
}

fn edit_cmd(file: &Path, update: MetadataUpdate) -> Result<()> {
    validate_audio_file(file)?;
    if update.is_empty() {
        println!("Nothing to change in {}", file.display());
        return Ok(());
    }

    let saved = AudioFile::from_path(file)?
        .update_metadata(&update)
        .with_context(|| format!("cannot update tags of {}", file.display()))?;
    if !saved {
        bail!("failed to save tags to {}", file.display());
    }
    println!("Updated {}", file.display());
    Ok(())
}

fn play_cmd(file: &Path, settings: &Settings) -> Result<()> {
    validate_audio_file(file)?;
    let player = Player::new(&settings.playback)?;
    info!(volume = player.volume(), "output opened");
    player.play_file(file)?;
    Ok(())
}

fn play_list_cmd(path: &Path, settings: &Settings) -> Result<()> {
    let playlist =
        Playlist::load(path).with_context(|| format!("cannot read {}", path.display()))?;
    if playlist.is_empty() {
        println!("{playlist} has nothing to play");
        return Ok(());
    }

    let player = Player::new(&settings.playback)?;
    println!("{playlist}");
    let played = player.play_queue(playlist.tracks());
    println!("Played {played} of {} tracks", playlist.len());
    Ok(())
}

fn show_cmd(path: &Path) -> Result<()> {
    let playlist =
        Playlist::load(path).with_context(|| format!("cannot read {}", path.display()))?;
    println!("{playlist}");
    for (i, track) in playlist.iter().enumerate() {
        println!("{}", track_line(i, track));
    }
    Ok(())
}
