//! The standard music token set.
//!
//! | Token | Name | Value |
//! |-------|------|-------|
//! | `album_artist` | Album Artist | album artist, else track artist |
//! | `album_artist_initial` | Album Artist Initial | first letter of the above |
//! | `track_artist` | Track Artist | track artist |
//! | `album` | Album Title | album |
//! | `title` | Track Title | title |
//! | `genre` | Genre | empty when untagged |
//! | `year` | Year | empty when 0 |
//! | `track_number` / `track_count` | Number / Count | two digits, empty when 0 |
//! | `track_number_nz` / `track_count_nz` | Number (unsorted) / Count (unsorted) | no padding |
//! | `disc_number` / `disc_count` | Disc / Disc Count | empty when 0 |
//! | `grouping`, `composer`, `conductor` | | empty when untagged |
//! | `path_sep` | / | platform directory separator |

use crate::models::TrackInfo;
use crate::pattern::{escape, FileNamePattern, PATH_SEP_TOKEN};
use anyhow::Result;
use std::path::MAIN_SEPARATOR;

pub const DEFAULT_FOLDER: &str = "%album_artist%%path_sep%%album%";
pub const DEFAULT_FILE: &str = "{%track_number%. }%title%";

pub const SUGGESTED_FOLDERS: &[&str] = &[
    "%album_artist%%path_sep%%album%",
    "%album_artist%%path_sep%%album%{ (%year%)}",
    "%album_artist%%path_sep%%album_artist% - %album%",
    "%album_artist_initial%%path_sep%%album_artist%%path_sep%%album%",
    "%genre%%path_sep%%album_artist%%path_sep%%album%",
    "%album_artist%%path_sep%{%year% - }%album%",
];

pub const SUGGESTED_FILES: &[&str] = &[
    "{%track_number%. }%title%",
    "{%track_number%. }%track_artist% - %title%",
    "%track_artist% - %title%",
    "{%disc_number%-}{%track_number% }%title%",
    "{%track_number% of %track_count%. }%title%",
];

fn text(value: &str) -> Option<String> {
    Some(escape(value)).filter(|s| !s.is_empty())
}

fn opt_text(value: Option<&str>) -> Option<String> {
    value.and_then(text)
}

fn padded(n: u32) -> Option<String> {
    (n > 0).then(|| format!("{:02}", n))
}

fn plain(n: u32) -> Option<String> {
    (n > 0).then(|| n.to_string())
}

/// Pattern engine with every standard token registered and the default and
/// suggested templates filled in.
pub fn music_pattern() -> Result<FileNamePattern<TrackInfo>> {
    let mut p = FileNamePattern::new();

    p.add_conversion("album_artist", "Album Artist", |t: &TrackInfo| text(t.display_album_artist()))?;
    p.add_conversion("album_artist_initial", "Album Artist Initial", |t: &TrackInfo| {
        text(t.display_album_artist())
            .and_then(|s| s.chars().next())
            .map(|c| c.to_uppercase().to_string())
    })?;
    p.add_conversion("track_artist", "Track Artist", |t: &TrackInfo| text(t.display_artist()))?;
    p.add_conversion("album", "Album Title", |t: &TrackInfo| text(t.display_album()))?;
    p.add_conversion("title", "Track Title", |t: &TrackInfo| text(t.display_title()))?;
    p.add_conversion("genre", "Genre", |t: &TrackInfo| opt_text(t.genre()))?;
    p.add_conversion("year", "Year", |t: &TrackInfo| plain(t.year))?;
    p.add_conversion("track_number", "Number", |t: &TrackInfo| padded(t.track_number))?;
    p.add_conversion("track_count", "Count", |t: &TrackInfo| padded(t.track_count))?;
    p.add_conversion("track_number_nz", "Number (unsorted)", |t: &TrackInfo| plain(t.track_number))?;
    p.add_conversion("track_count_nz", "Count (unsorted)", |t: &TrackInfo| plain(t.track_count))?;
    p.add_conversion("disc_number", "Disc", |t: &TrackInfo| plain(t.disc_number))?;
    p.add_conversion("disc_count", "Disc Count", |t: &TrackInfo| plain(t.disc_count))?;
    p.add_conversion("grouping", "Grouping", |t: &TrackInfo| opt_text(t.grouping()))?;
    p.add_conversion("composer", "Composer", |t: &TrackInfo| opt_text(t.composer()))?;
    p.add_conversion("conductor", "Conductor", |t: &TrackInfo| opt_text(t.conductor()))?;
    p.add_conversion(PATH_SEP_TOKEN, "/", |_: &TrackInfo| Some(MAIN_SEPARATOR.to_string()))?;

    p.set_default_folder(DEFAULT_FOLDER);
    p.set_default_file(DEFAULT_FILE);
    p.set_suggested_folders(SUGGESTED_FOLDERS.iter().map(|s| s.to_string()).collect());
    p.set_suggested_files(SUGGESTED_FILES.iter().map(|s| s.to_string()).collect());

    Ok(p)
}

/// Tracks used to preview a pattern: one fully tagged, one sparse.
pub fn sample_tracks() -> Vec<TrackInfo> {
    vec![
        TrackInfo::sample(),
        TrackInfo {
            title: Some("Untitled Demo".into()),
            artist: Some("Someone".into()),
            ..TrackInfo::default()
        },
    ]
}
