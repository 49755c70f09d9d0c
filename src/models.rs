use crate::pattern::SourceLocation;
use serde::{Deserialize, Serialize};

/// Tag metadata for one track, as handed over by whatever read the file.
/// Numbers use 0 for "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub composer: Option<String>,
    pub conductor: Option<String>,
    pub grouping: Option<String>,
    pub year: u32,
    pub track_number: u32,
    pub track_count: u32,
    pub disc_number: u32,
    pub disc_count: u32,
    /// Where the track lives, e.g. `file:///music/in/song.flac`.
    pub uri: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TrackInfo {
    pub fn display_artist(&self) -> &str {
        non_empty(&self.artist).unwrap_or("Unknown Artist")
    }

    /// Album artist, falling back to the track artist.
    pub fn display_album_artist(&self) -> &str {
        non_empty(&self.album_artist).unwrap_or_else(|| self.display_artist())
    }

    pub fn display_album(&self) -> &str {
        non_empty(&self.album).unwrap_or("Unknown Album")
    }

    pub fn display_title(&self) -> &str {
        non_empty(&self.title).unwrap_or("Unknown Title")
    }

    pub fn genre(&self) -> Option<&str> {
        non_empty(&self.genre)
    }

    pub fn composer(&self) -> Option<&str> {
        non_empty(&self.composer)
    }

    pub fn conductor(&self) -> Option<&str> {
        non_empty(&self.conductor)
    }

    pub fn grouping(&self) -> Option<&str> {
        non_empty(&self.grouping)
    }

    /// A fully tagged track used for pattern previews.
    pub fn sample() -> Self {
        Self {
            title: Some("Song Title".into()),
            artist: Some("Artist Name".into()),
            album_artist: Some("Album Artist Name".into()),
            album: Some("Album Title".into()),
            genre: Some("Genre".into()),
            composer: Some("Composer Name".into()),
            conductor: Some("Conductor Name".into()),
            grouping: Some("Grouping".into()),
            year: 2008,
            track_number: 7,
            track_count: 12,
            disc_number: 1,
            disc_count: 2,
            uri: Some("file:///music/sample.mp3".into()),
        }
    }
}

impl SourceLocation for TrackInfo {
    fn source_uri(&self) -> Option<&str> {
        non_empty(&self.uri)
    }
}
