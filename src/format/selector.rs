//! Settings-driven format selection
//!
//! Chains the list operations in a fixed order: type filter, audio filter,
//! width ranking, then the quality preference. The chosen format is handed
//! back as a reference into the caller's list, not into the derived one.

use crate::format::list::FormatList;
use crate::format::models::Format;
use crate::utils::config::{QualityPreference, SelectionSettings};
use crate::utils::error::FormatError;
use tracing::debug;

/// Picks formats according to [`SelectionSettings`]
pub struct FormatSelector;

impl FormatSelector {
    /// Filtered and ranked candidates for `settings`
    pub fn candidates(formats: &FormatList, settings: &SelectionSettings) -> FormatList {
        let mut candidates = match settings.mime_type.as_deref() {
            Some(prefix) => formats.of_type(prefix),
            None => formats.clone(),
        };

        if settings.require_audio {
            candidates = candidates.with_audio_channels();
        }

        candidates.sort();

        debug!(
            total = formats.len(),
            candidates = candidates.len(),
            mime_type = ?settings.mime_type,
            require_audio = settings.require_audio,
            "filtered formats"
        );

        candidates
    }

    /// Pick one format, or `None` if nothing survives the settings
    pub fn select<'a>(formats: &'a FormatList, settings: &SelectionSettings) -> Option<&'a Format> {
        let candidates = Self::candidates(formats, settings);

        let chosen = match &settings.quality {
            QualityPreference::Best => candidates.first(),
            QualityPreference::Worst => candidates.last(),
            QualityPreference::Named(name) => candidates.find_by_quality(name),
            QualityPreference::Itag(itag_no) => candidates.find_by_itag(*itag_no),
        }?;

        debug!(itag = chosen.itag_no, preference = settings.quality.as_str(), "selected format");

        // Candidates are clones; hand back the first equal record from the source list
        formats.iter().find(|f| *f == chosen)
    }

    /// Like [`FormatSelector::select`], but absence is an error
    pub fn select_strict<'a>(
        formats: &'a FormatList,
        settings: &SelectionSettings,
    ) -> Result<&'a Format, FormatError> {
        settings.validate()?;
        Self::select(formats, settings).ok_or_else(|| FormatError::NoMatch(describe(settings)))
    }
}

fn describe(settings: &SelectionSettings) -> String {
    let mut parts = Vec::new();
    if let Some(prefix) = &settings.mime_type {
        parts.push(format!("type {:?}", prefix));
    }
    if settings.require_audio {
        parts.push("with audio".to_string());
    }
    match &settings.quality {
        QualityPreference::Named(name) => parts.push(format!("quality {:?}", name)),
        QualityPreference::Itag(itag_no) => parts.push(format!("itag {}", itag_no)),
        other => parts.push(other.as_str().to_lowercase()),
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_format(itag_no: i32, label: &str, mime_type: &str, width: u32, audio_channels: u32) -> Format {
        Format {
            itag_no,
            quality_label: label.to_string(),
            mime_type: mime_type.to_string(),
            width,
            audio_channels,
            ..Default::default()
        }
    }

    fn sample_formats() -> FormatList {
        FormatList::new(vec![
            make_format(18, "360p", "video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"", 640, 2),
            make_format(137, "1080p", "video/mp4; codecs=\"avc1.640028\"", 1920, 0),
            make_format(140, "", "audio/mp4; codecs=\"mp4a.40.2\"", 0, 2),
            make_format(22, "720p", "video/mp4; codecs=\"avc1.64001F, mp4a.40.2\"", 1280, 2),
            make_format(251, "", "audio/webm; codecs=\"opus\"", 0, 2),
        ])
    }

    #[test]
    fn test_best_is_widest() {
        let formats = sample_formats();
        let best = FormatSelector::select(&formats, &SelectionSettings::default()).unwrap();
        assert_eq!(best.itag_no, 137);
        assert!(std::ptr::eq(best, &formats[1]));
    }

    #[test]
    fn test_best_muxed_video() {
        let formats = sample_formats();
        let settings = SelectionSettings {
            mime_type: Some("video".to_string()),
            require_audio: true,
            ..Default::default()
        };

        let chosen = FormatSelector::select(&formats, &settings).unwrap();
        assert_eq!(chosen.itag_no, 22);
    }

    #[test]
    fn test_worst_audio_keeps_source_order_on_ties() {
        let formats = sample_formats();
        let settings = SelectionSettings {
            mime_type: Some("audio".to_string()),
            quality: QualityPreference::Worst,
            ..Default::default()
        };

        // Both audio formats have width 0, so the later one stays last
        assert_eq!(FormatSelector::select(&formats, &settings).unwrap().itag_no, 251);
    }

    #[test]
    fn test_named_and_itag_preferences() {
        let formats = sample_formats();

        let settings = SelectionSettings {
            quality: QualityPreference::Named("720p".to_string()),
            ..Default::default()
        };
        assert_eq!(FormatSelector::select(&formats, &settings).unwrap().itag_no, 22);

        let settings = SelectionSettings {
            mime_type: Some("audio".to_string()),
            quality: QualityPreference::Itag(18),
            ..Default::default()
        };
        assert!(FormatSelector::select(&formats, &settings).is_none());
    }

    #[test]
    fn test_candidates_leaves_source_untouched() {
        let formats = sample_formats();
        let before = formats.clone();

        let candidates = FormatSelector::candidates(&formats, &SelectionSettings::default());

        assert_eq!(candidates.itags(), vec![137, 22, 18, 140, 251]);
        assert_eq!(formats, before);
    }

    #[test]
    fn test_select_strict() {
        let formats = sample_formats();
        let settings = SelectionSettings {
            mime_type: Some("text".to_string()),
            ..Default::default()
        };

        let err = FormatSelector::select_strict(&formats, &settings).unwrap_err();
        assert!(matches!(err, FormatError::NoMatch(_)));
        assert_eq!(err.to_string(), "No format matches type \"text\", best available");

        let ok = FormatSelector::select_strict(&formats, &SelectionSettings::default()).unwrap();
        assert_eq!(ok.itag_no, 137);
    }

    #[test]
    fn test_select_strict_validates_settings() {
        let formats = sample_formats();
        let settings = SelectionSettings {
            quality: QualityPreference::Named(String::new()),
            ..Default::default()
        };

        assert!(matches!(
            FormatSelector::select_strict(&formats, &settings),
            Err(FormatError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_select_on_empty_list() {
        let formats = FormatList::default();
        assert!(FormatSelector::select(&formats, &SelectionSettings::default()).is_none());
    }
}
