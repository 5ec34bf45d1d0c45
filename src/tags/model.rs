/// Metadata read from a file's tags.
///
/// `None` means the field is not present in the source tags. Values are
/// never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Track number, possibly `"N/total"`.
    pub track_number: Option<String>,
    /// Normalized year or date (see `normalize_year`).
    pub year: Option<String>,
    pub genre: Option<String>,
    /// Stream duration in whole seconds, truncated.
    pub duration_secs: Option<u64>,
}

/// Fields to write back to a file. `None` leaves the existing tag untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub track_number: Option<String>,
}

impl MetadataUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.title = Some(v.into());
        self
    }

    pub fn artist(mut self, v: impl Into<String>) -> Self {
        self.artist = Some(v.into());
        self
    }

    pub fn album(mut self, v: impl Into<String>) -> Self {
        self.album = Some(v.into());
        self
    }

    pub fn year(mut self, v: impl ToString) -> Self {
        self.year = Some(v.to_string());
        self
    }

    pub fn genre(mut self, v: impl Into<String>) -> Self {
        self.genre = Some(v.into());
        self
    }

    pub fn track_number(mut self, v: impl ToString) -> Self {
        self.track_number = Some(v.to_string());
        self
    }

    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.track_number.is_none()
    }
}
