//! Ordered collection of formats with lookup, filter and ranking operations
//!
//! Every operation here is total: absence is `None`, a filter that matches
//! nothing returns an empty list. Filters allocate a new list and leave the
//! receiver untouched; only [`FormatList::sort`] reorders in place.

use crate::format::models::Format;
use crate::utils::error::FormatError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::ops::Deref;
use std::path::Path;
use tracing::{info, trace};

/// Formats in source priority order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatList(Vec<Format>);

impl FormatList {
    pub fn new(formats: Vec<Format>) -> Self {
        Self(formats)
    }

    pub fn into_inner(self) -> Vec<Format> {
        self.0
    }

    /// First format whose quality or quality label equals `quality`
    ///
    /// Both fields are checked on each element before moving on, so the
    /// earliest element matching either one wins.
    pub fn find_by_quality(&self, quality: &str) -> Option<&Format> {
        self.0
            .iter()
            .find(|f| f.quality == quality || f.quality_label == quality)
    }

    /// First format carrying `itag_no`
    pub fn find_by_itag(&self, itag_no: i32) -> Option<&Format> {
        self.0.iter().find(|f| f.itag_no == itag_no)
    }

    /// Formats whose mime type starts with `prefix`
    ///
    /// This is a raw string prefix test: `"video"` also matches `"video2/x"`.
    pub fn of_type(&self, prefix: &str) -> FormatList {
        self.0
            .iter()
            .filter(|f| f.mime_type.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Formats that carry an audio track, muxed or audio-only
    pub fn with_audio_channels(&self) -> FormatList {
        self.0.iter().filter(|f| f.has_audio()).cloned().collect()
    }

    /// Rank by width, widest first
    ///
    /// The sort is stable and width is the only key: equal widths keep their
    /// current relative order. References obtained before sorting cannot
    /// outlive this call, so look formats up again afterwards.
    pub fn sort(&mut self) {
        trace!(len = self.0.len(), "sorting formats by width");
        self.0.sort_by(|a, b| b.width.cmp(&a.width));
    }

    /// Identifiers in list order
    pub fn itags(&self) -> Vec<i32> {
        self.0.iter().map(|f| f.itag_no).collect()
    }

    /// Parse a JSON array of format records
    pub fn from_json_str(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FormatError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let file = std::fs::File::open(path)?;
        let formats = Self::from_reader(std::io::BufReader::new(file))?;
        info!("Loaded {} formats from {}", formats.len(), path.display());
        Ok(formats)
    }
}

impl Deref for FormatList {
    type Target = [Format];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Format>> for FormatList {
    fn from(formats: Vec<Format>) -> Self {
        Self(formats)
    }
}

impl FromIterator<Format> for FormatList {
    fn from_iter<I: IntoIterator<Item = Format>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FormatList {
    type Item = Format;
    type IntoIter = std::vec::IntoIter<Format>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormatList {
    type Item = &'a Format;
    type IntoIter = std::slice::Iter<'a, Format>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
