use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restrictions {
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedArtist {
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Followers {
    pub href: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistData {
    #[serde(flatten)]
    pub artist: SimplifiedArtist,
    pub followers: Followers,
    pub genres: Vec<String>,
    pub images: Vec<Image>,
    pub popularity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedFrom {
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedTrack {
    pub artists: Vec<SimplifiedArtist>,
    pub available_markets: Vec<String>,
    pub disc_number: u32,
    pub duration_ms: u64,
    pub explicit: bool,
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    pub is_playable: bool,
    pub linked_from: Option<LinkedFrom>,
    pub restrictions: Option<Restrictions>,
    pub name: String,
    pub preview_url: Option<String>,
    pub track_number: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    pub is_local: bool,
}

/// One page of an offset-paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub previous: Option<String>,
    pub total: u32,
    pub items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            href: String::new(),
            limit: 0,
            next: None,
            offset: 0,
            previous: None,
            total: 0,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Copyright {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalIds {
    pub isrc: Option<String>,
    pub ean: Option<String>,
    pub upc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedAlbum {
    pub album_type: String,
    pub total_tracks: u32,
    pub available_markets: Vec<String>,
    pub external_urls: ExternalUrls,
    pub href: String,
    pub id: String,
    pub images: Vec<Image>,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: String,
    pub restrictions: Option<Restrictions>,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    pub artists: Vec<SimplifiedArtist>,
}

/// Full album record. `tracks` holds every track once the album has been
/// fetched through [`crate::ApiReference::get_album`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumData {
    #[serde(flatten)]
    pub album: SimplifiedAlbum,
    pub tracks: Page<SimplifiedTrack>,
    pub copyrights: Vec<Copyright>,
    pub external_ids: ExternalIds,
    pub genres: Vec<String>,
    pub label: String,
    pub popularity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedAlbum {
    pub added_at: String,
    pub album: AlbumData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    #[serde(flatten)]
    pub track: SimplifiedTrack,
    pub album: SimplifiedAlbum,
    pub external_ids: ExternalIds,
    pub popularity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SeveralAlbums {
    pub albums: Vec<AlbumData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SeveralArtists {
    pub artists: Vec<ArtistData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TopTracks {
    pub tracks: Vec<Track>,
}

/// Album groups accepted by the artist albums endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Album,
    Single,
    AppearsOn,
    Compilation,
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Album => "album",
            Group::Single => "single",
            Group::AppearsOn => "appears_on",
            Group::Compilation => "compilation",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "album" => Ok(Group::Album),
            "single" => Ok(Group::Single),
            "appears_on" => Ok(Group::AppearsOn),
            "compilation" => Ok(Group::Compilation),
            other => Err(format!("unknown album group: {}", other)),
        }
    }
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub date: String,
    pub name: String,
    pub artists: String,
    pub tracks: u32,
}

impl From<&SimplifiedAlbum> for AlbumTableRow {
    fn from(album: &SimplifiedAlbum) -> Self {
        Self {
            date: album.release_date.clone(),
            name: album.name.clone(),
            artists: join_artist_names(&album.artists),
            tracks: album.total_tracks,
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub number: usize,
    pub name: String,
    pub artists: String,
    pub duration: String,
}

impl TrackTableRow {
    pub fn new(number: usize, track: &SimplifiedTrack) -> Self {
        let seconds = track.duration_ms / 1000;
        Self {
            number,
            name: track.name.clone(),
            artists: join_artist_names(&track.artists),
            duration: format!("{}:{:02}", seconds / 60, seconds % 60),
        }
    }
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub genres: String,
    pub followers: u64,
}

impl From<&ArtistData> for ArtistTableRow {
    fn from(artist: &ArtistData) -> Self {
        Self {
            name: artist.artist.name.clone(),
            genres: artist
                .genres
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
            followers: artist.followers.total,
        }
    }
}

fn join_artist_names(artists: &[SimplifiedArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
