//! Product video payload as delivered by the Storefront API.
//!
//! Every field is optional because upstream queries select a partial shape.
//! [`VideoData::validated_sources`] is the single place that decides whether a
//! payload is renderable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a video payload cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoError {
    /// `sources` was not selected or was null.
    #[error("video requires a `sources` array")]
    MissingSources,
    /// `sources` was selected but empty.
    #[error("video requires at least one source")]
    EmptySources,
    /// A source lacked its `url` or `mimeType`.
    #[error("video source {index} needs both `url` and `mimeType`")]
    IncompleteSource {
        /// Position of the offending source.
        index: usize,
    },
    /// Two sources shared a URL.
    #[error("video source url `{url}` appears more than once")]
    DuplicateSource {
        /// Repeated URL.
        url: String,
    },
}

/// Still image shown before playback starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewImage {
    /// Image location, when selected.
    #[serde(default)]
    pub url: Option<String>,
}

/// One encoding of the video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    /// Media location.
    #[serde(default)]
    pub url: Option<String>,
    /// MIME type such as `video/mp4`.
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl VideoSource {
    /// Source with both fields set.
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            mime_type: Some(mime_type.into()),
        }
    }
}

/// Partial Storefront API `Video` object.
///
/// # Examples
/// ```
/// use storefront::domain::VideoData;
///
/// let data: VideoData = serde_json::from_value(serde_json::json!({
///     "id": "gid://shopify/Video/1",
///     "sources": [{"url": "https://cdn.example/a.mp4", "mimeType": "video/mp4"}]
/// }))
/// .unwrap();
/// assert_eq!(data.validated_sources().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    /// Global id of the media object.
    #[serde(default)]
    pub id: Option<String>,
    /// Poster image.
    #[serde(default)]
    pub preview_image: Option<PreviewImage>,
    /// Available encodings in preference order.
    #[serde(default)]
    pub sources: Option<Vec<VideoSource>>,
}

/// Source whose `url` and `mime_type` are both present and non-blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedSource<'a> {
    /// Media location.
    pub url: &'a str,
    /// MIME type.
    pub mime_type: &'a str,
}

impl VideoData {
    /// Preview image URL when one is present and non-blank.
    #[must_use]
    pub fn preview_image_url(&self) -> Option<&str> {
        self.preview_image
            .as_ref()
            .and_then(|image| image.url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    /// Check every source and return them in upstream order.
    ///
    /// # Errors
    /// Returns the first [`VideoError`] encountered; no sources are returned
    /// unless all of them are valid.
    pub fn validated_sources(&self) -> Result<Vec<ValidatedSource<'_>>, VideoError> {
        let sources = self.sources.as_ref().ok_or(VideoError::MissingSources)?;
        if sources.is_empty() {
            return Err(VideoError::EmptySources);
        }

        let mut seen = HashSet::with_capacity(sources.len());
        let mut validated = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            let url = non_blank(source.url.as_deref());
            let mime_type = non_blank(source.mime_type.as_deref());
            let (Some(url), Some(mime_type)) = (url, mime_type) else {
                return Err(VideoError::IncompleteSource { index });
            };
            if !seen.insert(url) {
                return Err(VideoError::DuplicateSource {
                    url: url.to_owned(),
                });
            }
            validated.push(ValidatedSource { url, mime_type });
        }
        Ok(validated)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn with_sources(sources: Option<Vec<VideoSource>>) -> VideoData {
        VideoData {
            id: Some("gid://shopify/Video/1".to_owned()),
            preview_image: None,
            sources,
        }
    }

    #[rstest]
    fn valid_sources_keep_upstream_order() {
        let data = with_sources(Some(vec![
            VideoSource::new("https://cdn.example/a.webm", "video/webm"),
            VideoSource::new("https://cdn.example/a.mp4", "video/mp4"),
        ]));
        let sources = data.validated_sources().expect("valid sources");
        let urls: Vec<_> = sources.iter().map(|source| source.url).collect();
        assert_eq!(
            urls,
            vec!["https://cdn.example/a.webm", "https://cdn.example/a.mp4"]
        );
        assert_eq!(sources[1].mime_type, "video/mp4");
    }

    #[rstest]
    #[case(None, VideoError::MissingSources)]
    #[case(Some(vec![]), VideoError::EmptySources)]
    #[case(
        Some(vec![VideoSource { url: Some("https://cdn.example/a.mp4".into()), mime_type: None }]),
        VideoError::IncompleteSource { index: 0 }
    )]
    #[case(
        Some(vec![
            VideoSource::new("https://cdn.example/a.mp4", "video/mp4"),
            VideoSource { url: Some(" ".into()), mime_type: Some("video/mp4".into()) },
        ]),
        VideoError::IncompleteSource { index: 1 }
    )]
    #[case(
        Some(vec![
            VideoSource::new("https://cdn.example/a.mp4", "video/mp4"),
            VideoSource::new("https://cdn.example/a.mp4", "video/webm"),
        ]),
        VideoError::DuplicateSource { url: "https://cdn.example/a.mp4".into() }
    )]
    fn invalid_sources_are_rejected(
        #[case] sources: Option<Vec<VideoSource>>,
        #[case] expected: VideoError,
    ) {
        assert_eq!(with_sources(sources).validated_sources(), Err(expected));
    }

    #[rstest]
    #[case(json!({}), None)]
    #[case(json!({"previewImage": null}), None)]
    #[case(json!({"previewImage": {"url": ""}}), None)]
    #[case(json!({"previewImage": {"url": "https://cdn.example/p.jpg"}}), Some("https://cdn.example/p.jpg"))]
    fn preview_url_ignores_absent_and_blank_values(
        #[case] payload: serde_json::Value,
        #[case] expected: Option<&str>,
    ) {
        let data: VideoData = serde_json::from_value(payload).expect("valid payload");
        assert_eq!(data.preview_image_url(), expected);
    }

    #[rstest]
    fn null_sources_deserialise_as_missing() {
        let data: VideoData =
            serde_json::from_value(json!({"sources": null})).expect("valid payload");
        assert_eq!(data.validated_sources(), Err(VideoError::MissingSources));
    }
}
