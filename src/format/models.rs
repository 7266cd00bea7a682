//! Data structures for format records

use serde::{Deserialize, Serialize};
use std::fmt;

/// One encoding/quality variant exposed by a media source
///
/// Records are built by whatever parses the source metadata; nothing here
/// validates field values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Format {
    /// Source-assigned identifier, expected to be unique within a list
    #[serde(rename = "itag")]
    pub itag_no: i32,
    /// Coarse quality bucket, e.g. "medium"
    pub quality: String,
    /// Resolution label, e.g. "360p"
    pub quality_label: String,
    /// Full content type, e.g. `video/mp4; codecs="avc1.42001E, mp4a.40.2"`
    pub mime_type: String,
    /// Pixel width, 0 for audio-only or unknown
    pub width: u32,
    /// Channel count, 0 means no audio track
    pub audio_channels: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub bitrate: u64,
    pub average_bitrate: u64,
    pub fps: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approx_duration_ms: Option<String>,
}

impl Format {
    /// Type token before the first `/` of the mime type ("video", "audio")
    pub fn media_kind(&self) -> Option<&str> {
        self.mime_type.split_once('/').map(|(kind, _)| kind.trim())
    }

    /// Entries of the `codecs="..."` parameter, in declared order
    pub fn codecs(&self) -> Vec<&str> {
        let Some((_, params)) = self.mime_type.split_once(';') else {
            return Vec::new();
        };

        params
            .split(';')
            .filter_map(|param| param.trim().strip_prefix("codecs="))
            .flat_map(|value| value.trim_matches('"').split(','))
            .map(str::trim)
            .filter(|codec| !codec.is_empty())
            .collect()
    }

    pub fn has_audio(&self) -> bool {
        self.audio_channels > 0
    }

    /// Audio track and no picture
    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && self.width == 0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

        write!(
            f,
            "{} {} {} {} {}w {}ch",
            self.itag_no,
            or_dash(&self.quality),
            or_dash(&self.quality_label),
            or_dash(&self.mime_type),
            self.width,
            self.audio_channels
        )
    }
}
