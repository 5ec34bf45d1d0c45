use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use tunedex::config::LibrarySettings;
use tunedex::tags::MetadataUpdate;

#[derive(Debug, Parser)]
#[command(name = "tunedex", version, about = "Scan MP3/FLAC libraries, edit tags and build XSPF playlists")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the tags and duration of one audio file
    Info { file: PathBuf },
    /// List the MP3/FLAC files under a directory, optionally saving them as a playlist
    Scan(ScanArgs),
    /// Change tags of one audio file
    Edit {
        file: PathBuf,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Play one audio file to the end
    Play { file: PathBuf },
    /// Play every local track of an XSPF playlist in order
    PlayList { playlist: PathBuf },
    /// Print the tracks of an XSPF playlist
    Show { playlist: PathBuf },
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    pub dir: PathBuf,
    /// Write the result as an XSPF playlist
    #[arg(short, long, value_name = "OUT.xspf")]
    pub output: Option<PathBuf>,
    /// Playlist title (defaults to `playlist.default_name`)
    #[arg(long)]
    pub name: Option<String>,
    /// Include dotfiles and dot-directories
    #[arg(long)]
    pub include_hidden: bool,
    /// Accept files by extension without parsing them
    #[arg(long)]
    pub no_sanity_check: bool,
    /// Follow symbolic links
    #[arg(long)]
    pub follow_links: bool,
    /// Visit directory entries in file-name order
    #[arg(long)]
    pub sorted: bool,
}

impl ScanArgs {
    /// Flags only ever switch behavior on top of the configured settings.
    pub fn apply(&self, base: &LibrarySettings) -> LibrarySettings {
        LibrarySettings {
            include_hidden: base.include_hidden || self.include_hidden,
            sanity_check: base.sanity_check && !self.no_sanity_check,
            follow_links: base.follow_links || self.follow_links,
            sort_entries: base.sort_entries || self.sorted,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub artist: Option<String>,
    #[arg(long)]
    pub album: Option<String>,
    /// Year or date, stored as given; `YYYYMMDD` and `YYYY-MM-DD` show as `DD/MM/YYYY`
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    /// Track number, `N` or `N/total`
    #[arg(long)]
    pub track: Option<String>,
}

impl From<EditArgs> for MetadataUpdate {
    fn from(a: EditArgs) -> Self {
        MetadataUpdate {
            title: a.title,
            artist: a.artist,
            album: a.album,
            year: a.year,
            genre: a.genre,
            track_number: a.track,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_scan_flags() {
        let cli = Cli::try_parse_from([
            "tunedex", "scan", "/music", "-o", "out.xspf", "--name", "Mix", "--no-sanity-check",
            "--sorted",
        ])
        .unwrap();
        let Command::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.dir, PathBuf::from("/music"));
        assert_eq!(args.output, Some(PathBuf::from("out.xspf")));
        assert_eq!(args.name.as_deref(), Some("Mix"));

        let lib = args.apply(&LibrarySettings::default());
        assert!(!lib.sanity_check);
        assert!(lib.sort_entries);
        assert!(!lib.include_hidden);
        assert!(!lib.follow_links);
    }

    #[test]
    fn scan_flags_do_not_undo_config() {
        let cli = Cli::try_parse_from(["tunedex", "scan", "/music"]).unwrap();
        let Command::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        let base = LibrarySettings {
            include_hidden: true,
            sanity_check: false,
            follow_links: true,
            sort_entries: true,
        };
        let lib = args.apply(&base);
        assert!(lib.include_hidden && !lib.sanity_check && lib.follow_links && lib.sort_entries);
    }

    #[test]
    fn edit_flags_become_update() {
        let cli = Cli::try_parse_from([
            "tunedex", "edit", "a.mp3", "--title", "Song", "--track", "3/12",
        ])
        .unwrap();
        let Command::Edit { file, fields } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(file, PathBuf::from("a.mp3"));

        let update = MetadataUpdate::from(fields);
        assert_eq!(update, MetadataUpdate::new().title("Song").track_number("3/12"));
    }

    #[test]
    fn edit_year_is_passed_through_unchanged() {
        let cli = Cli::try_parse_from(["tunedex", "edit", "a.mp3", "--year", "20180705"]).unwrap();
        let Command::Edit { fields, .. } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(MetadataUpdate::from(fields), MetadataUpdate::new().year("20180705"));

        let mut cmd = Cli::command();
        let help = cmd
            .find_subcommand_mut("edit")
            .unwrap()
            .render_long_help()
            .to_string();
        assert!(help.contains("stored as given"));
    }

    #[test]
    fn play_list_is_kebab_case() {
        let cli = Cli::try_parse_from(["tunedex", "play-list", "mix.xspf"]).unwrap();
        assert!(matches!(cli.command, Command::PlayList { .. }));
    }
}
