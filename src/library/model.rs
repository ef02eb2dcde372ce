use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::Deserialize;

/// A named attribute of a [`Record`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Field {
    File,
    Artist,
    AlbumArtist,
    ArtistSort,
    AlbumArtistSort,
    Title,
    Album,
    Track,
    TrackShort,
    Disc,
    Date,
    Year,
    Genre,
    Composer,
    Performer,
    Comment,
    Time,
}

impl Field {
    /// Fields in the order they are tested by the matcher.
    pub const MATCH_ORDER: [Field; 17] = [
        Field::File,
        Field::Artist,
        Field::AlbumArtist,
        Field::ArtistSort,
        Field::AlbumArtistSort,
        Field::Title,
        Field::Album,
        Field::Track,
        Field::TrackShort,
        Field::Disc,
        Field::Date,
        Field::Year,
        Field::Genre,
        Field::Composer,
        Field::Performer,
        Field::Comment,
        Field::Time,
    ];

    /// Identifier used in config files and sort key lists.
    pub fn name(self) -> &'static str {
        match self {
            Field::File => "file",
            Field::Artist => "artist",
            Field::AlbumArtist => "albumartist",
            Field::ArtistSort => "artistsort",
            Field::AlbumArtistSort => "albumartistsort",
            Field::Title => "title",
            Field::Album => "album",
            Field::Track => "track",
            Field::TrackShort => "trackshort",
            Field::Disc => "disc",
            Field::Date => "date",
            Field::Year => "year",
            Field::Genre => "genre",
            Field::Composer => "composer",
            Field::Performer => "performer",
            Field::Comment => "comment",
            Field::Time => "time",
        }
    }

    /// Whether the field sorts by parsed numeric value rather than text.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::Track | Field::TrackShort | Field::Disc | Field::Date | Field::Year | Field::Time
        )
    }

    /// The single-bit mask for this field.
    pub fn mask(self) -> FieldMask {
        match self {
            Field::File => FieldMask::FILE,
            Field::Artist => FieldMask::ARTIST,
            Field::AlbumArtist => FieldMask::ALBUM_ARTIST,
            Field::ArtistSort => FieldMask::ARTIST_SORT,
            Field::AlbumArtistSort => FieldMask::ALBUM_ARTIST_SORT,
            Field::Title => FieldMask::TITLE,
            Field::Album => FieldMask::ALBUM,
            Field::Track => FieldMask::TRACK,
            Field::TrackShort => FieldMask::TRACK_SHORT,
            Field::Disc => FieldMask::DISC,
            Field::Date => FieldMask::DATE,
            Field::Year => FieldMask::YEAR,
            Field::Genre => FieldMask::GENRE,
            Field::Composer => FieldMask::COMPOSER,
            Field::Performer => FieldMask::PERFORMER,
            Field::Comment => FieldMask::COMMENT,
            Field::Time => FieldMask::TIME,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a field identifier is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "file" | "filename" => Field::File,
            "artist" => Field::Artist,
            "albumartist" | "album-artist" => Field::AlbumArtist,
            "artistsort" | "artist-sort" => Field::ArtistSort,
            "albumartistsort" | "album-artist-sort" => Field::AlbumArtistSort,
            "title" => Field::Title,
            "album" => Field::Album,
            "track" => Field::Track,
            "trackshort" | "short-track" => Field::TrackShort,
            "disc" => Field::Disc,
            "date" => Field::Date,
            "year" => Field::Year,
            "genre" => Field::Genre,
            "composer" => Field::Composer,
            "performer" => Field::Performer,
            "comment" => Field::Comment,
            "time" | "duration" => Field::Time,
            _ => return Err(UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

impl TryFrom<String> for Field {
    type Error = UnknownField;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

bitflags! {
    /// Set of fields taking part in a match.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldMask: u32 {
        const FILE = 1 << 0;
        const ARTIST = 1 << 1;
        const ALBUM_ARTIST = 1 << 2;
        const ARTIST_SORT = 1 << 3;
        const ALBUM_ARTIST_SORT = 1 << 4;
        const TITLE = 1 << 5;
        const ALBUM = 1 << 6;
        const TRACK = 1 << 7;
        const TRACK_SHORT = 1 << 8;
        const DISC = 1 << 9;
        const DATE = 1 << 10;
        const YEAR = 1 << 11;
        const GENRE = 1 << 12;
        const COMPOSER = 1 << 13;
        const PERFORMER = 1 << 14;
        const COMMENT = 1 << 15;
        const TIME = 1 << 16;
    }
}

impl FieldMask {
    /// Every field.
    pub const ALL: Self = Self::all();

    /// Parse a mask from field identifiers, rejecting the first unknown one.
    pub fn parse<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, UnknownField> {
        names
            .into_iter()
            .try_fold(FieldMask::empty(), |acc, n| Ok(acc | n.parse::<Field>()?.mask()))
    }
}

/// One logical track.
///
/// `id` and `pos` are assigned by the data source; a record that only exists
/// in a local library leaves both unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub file: String,
    pub artist: String,
    pub album_artist: String,
    pub artist_sort: String,
    pub album_artist_sort: String,
    pub title: String,
    pub album: String,
    pub track: String,
    pub track_short: String,
    pub disc: String,
    pub date: String,
    pub year: String,
    pub genre: String,
    pub composer: String,
    pub performer: String,
    pub comment: String,
    /// Duration in whole seconds.
    pub time: Option<u64>,
    pub id: Option<u32>,
    pub pos: Option<usize>,
    pub selected: bool,
}

impl Record {
    /// Create a record for `file` with every other field empty.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Fill the derived fields (`year`, `track_short`) from `date` and `track`.
    pub fn derive_fields(&mut self) {
        if self.year.is_empty() {
            self.year = self.date.chars().take(4).collect();
        }
        if self.track_short.is_empty() {
            self.track_short = self
                .track
                .split('/')
                .next()
                .unwrap_or_default()
                .trim()
                .trim_start_matches('0')
                .to_string();
        }
    }

    /// A copy suitable for another list: not selected, no identity, no position.
    pub fn detached(&self) -> Self {
        Self {
            id: None,
            pos: None,
            selected: false,
            ..self.clone()
        }
    }

    /// Text value of `field`.
    pub fn field(&self, field: Field) -> Cow<'_, str> {
        let s: &str = match field {
            Field::File => &self.file,
            Field::Artist => &self.artist,
            Field::AlbumArtist => &self.album_artist,
            Field::ArtistSort => &self.artist_sort,
            Field::AlbumArtistSort => &self.album_artist_sort,
            Field::Title => &self.title,
            Field::Album => &self.album,
            Field::Track => &self.track,
            Field::TrackShort => &self.track_short,
            Field::Disc => &self.disc,
            Field::Date => &self.date,
            Field::Year => &self.year,
            Field::Genre => &self.genre,
            Field::Composer => &self.composer,
            Field::Performer => &self.performer,
            Field::Comment => &self.comment,
            Field::Time => {
                return Cow::Owned(super::display::format_time(self.time));
            }
        };
        Cow::Borrowed(s)
    }
}
